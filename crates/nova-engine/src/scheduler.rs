/// Frame scheduler: pacing, visibility caps, and idle sleep.
///
/// The host drives the loop by calling `begin_frame(now_ms, ..)` once per
/// host frame; the scheduler decides whether that frame runs and at what
/// delta. All decisions are pure functions of the supplied timestamps, so
/// they are testable without a display.

use crate::api::config::SimConfig;

/// Pending idle sleep. Replacing the token supersedes the old deadline, so
/// a hide-show-hide sequence cannot sleep off the first hide's timer.
#[derive(Debug, Clone, Copy)]
struct SleepToken {
    deadline_ms: f64,
}

pub struct FrameScheduler {
    running: bool,
    visible: bool,
    sleeping: bool,
    last_frame_ms: Option<f64>,
    pending_sleep: Option<SleepToken>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            running: false,
            visible: true,
            sleeping: false,
            last_frame_ms: None,
            pending_sleep: None,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.sleeping = false;
        self.last_frame_ms = None;
        log::info!("frame scheduler started");
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Page visibility change. Hiding arms (or re-arms) the deferred sleep;
    /// showing cancels it and wakes immediately. Focus loss and gain report
    /// through the same path.
    pub fn set_visible(&mut self, visible: bool, now_ms: f64, config: &SimConfig) {
        if visible {
            self.visible = true;
            self.pending_sleep = None;
            self.wake();
        } else {
            self.visible = false;
            self.pending_sleep = Some(SleepToken {
                deadline_ms: now_ms + config.sleep_delay * 1000.0,
            });
        }
    }

    /// Host-requested suspension, effective immediately. The host observes
    /// `is_sleeping` and stops scheduling frames.
    pub fn request_sleep(&mut self) {
        self.pending_sleep = None;
        self.sleeping = true;
        self.last_frame_ms = None;
        log::info!("scheduler suspended on request");
    }

    /// Wake from sleep. The frame clock restarts from the next timestamp,
    /// so the sleep gap never shows up as a giant delta.
    pub fn wake(&mut self) {
        if self.sleeping {
            log::info!("scheduler waking up");
        }
        self.sleeping = false;
        self.last_frame_ms = None;
    }

    /// Decide whether the frame at `now_ms` runs. Returns the clamped delta
    /// in seconds when it does; `None` means the frame is skipped (asleep,
    /// entering sleep, rate-capped, or not running).
    pub fn begin_frame(&mut self, now_ms: f64, modal_open: bool, config: &SimConfig) -> Option<f64> {
        if !self.running {
            return None;
        }

        if self.sleeping {
            return None;
        }
        if let Some(token) = self.pending_sleep {
            if now_ms >= token.deadline_ms {
                self.pending_sleep = None;
                self.sleeping = true;
                self.last_frame_ms = None;
                log::info!("idle sleep engaged after background delay");
                return None;
            }
        }

        // The tightest applicable cap wins when several apply.
        let mut cap_fps = f64::INFINITY;
        if modal_open {
            cap_fps = cap_fps.min(config.modal_fps_cap);
        }
        if !self.visible {
            cap_fps = cap_fps.min(config.hidden_fps_cap);
        }

        let last = match self.last_frame_ms {
            Some(last) => last,
            None => {
                // First frame after start or wake: run at zero delta.
                self.last_frame_ms = Some(now_ms);
                return Some(0.0);
            }
        };

        let elapsed_ms = now_ms - last;
        if cap_fps.is_finite() {
            let min_interval_ms = 1000.0 / cap_fps;
            if elapsed_ms < min_interval_ms {
                return None;
            }
        }

        self.last_frame_ms = Some(now_ms);
        let delta = (elapsed_ms / 1000.0).max(0.0);
        Some(delta.min(config.max_frame_delta as f64))
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn not_running_skips_every_frame() {
        let mut s = FrameScheduler::new();
        assert_eq!(s.begin_frame(0.0, false, &cfg()), None);
        s.start();
        assert_eq!(s.begin_frame(0.0, false, &cfg()), Some(0.0));
    }

    #[test]
    fn uncapped_delta_is_wall_time() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, false, &cfg());
        let d = s.begin_frame(16.0, false, &cfg()).unwrap();
        assert!((d - 0.016).abs() < 1e-9);
    }

    #[test]
    fn delta_clamps_after_a_stall() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, false, &cfg());
        // A 5-second hitch must not teleport the simulation.
        let d = s.begin_frame(5000.0, false, &cfg()).unwrap();
        assert_eq!(d, cfg().max_frame_delta as f64);
    }

    #[test]
    fn modal_caps_to_thirty_fps() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, true, &cfg());
        // 60 Hz host frames: every other one is dropped under the modal cap.
        assert_eq!(s.begin_frame(16.7, true, &cfg()), None);
        assert!(s.begin_frame(33.4, true, &cfg()).is_some());
        assert_eq!(s.begin_frame(50.0, true, &cfg()), None);
        assert!(s.begin_frame(66.8, true, &cfg()).is_some());
    }

    #[test]
    fn hidden_caps_to_fifteen_fps() {
        let mut s = FrameScheduler::new();
        s.start();
        s.set_visible(false, 0.0, &cfg());
        s.begin_frame(0.0, false, &cfg());
        assert_eq!(s.begin_frame(33.0, false, &cfg()), None);
        assert!(s.begin_frame(67.0, false, &cfg()).is_some());
    }

    #[test]
    fn hidden_and_modal_takes_the_tighter_cap() {
        let mut s = FrameScheduler::new();
        s.start();
        s.set_visible(false, 0.0, &cfg());
        s.begin_frame(0.0, true, &cfg());
        // 30 FPS would allow 33ms; the 15 FPS hidden cap must not.
        assert_eq!(s.begin_frame(40.0, true, &cfg()), None);
        assert!(s.begin_frame(67.0, true, &cfg()).is_some());
    }

    #[test]
    fn sleeps_after_deferred_delay_then_wakes_on_show() {
        let mut s = FrameScheduler::new();
        s.start();
        s.set_visible(false, 0.0, &cfg());

        // 9.9s hidden: still ticking (at the hidden cap).
        assert!(s.begin_frame(0.0, false, &cfg()).is_some());
        assert!(s.begin_frame(9_900.0, false, &cfg()).is_some());
        assert!(!s.is_sleeping());

        // Past the 10s deadline the frame enters sleep instead of running.
        assert_eq!(s.begin_frame(10_500.0, false, &cfg()), None);
        assert!(s.is_sleeping());
        assert_eq!(s.begin_frame(60_000.0, false, &cfg()), None);

        // Becoming visible wakes; the first frame back is zero-delta so the
        // minutes asleep never reach the simulation.
        s.set_visible(true, 120_000.0, &cfg());
        assert!(!s.is_sleeping());
        assert_eq!(s.begin_frame(120_016.0, false, &cfg()), Some(0.0));
        let d = s.begin_frame(120_032.0, false, &cfg()).unwrap();
        assert!(d < 0.02);
    }

    #[test]
    fn rehiding_rearms_the_sleep_deadline() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, false, &cfg());
        s.set_visible(false, 0.0, &cfg());
        s.set_visible(true, 5_000.0, &cfg());
        s.set_visible(false, 8_000.0, &cfg());
        // The first hide's 10s deadline (at t=10s) is stale; only the
        // rearmed one (t=18s) counts.
        assert!(s.begin_frame(11_000.0, false, &cfg()).is_some());
        assert!(!s.is_sleeping());
        assert_eq!(s.begin_frame(18_100.0, false, &cfg()), None);
        assert!(s.is_sleeping());
    }

    #[test]
    fn requested_sleep_is_immediate() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, false, &cfg());
        s.request_sleep();
        assert!(s.is_sleeping());
        assert_eq!(s.begin_frame(16.0, false, &cfg()), None);
        s.wake();
        assert_eq!(s.begin_frame(32.0, false, &cfg()), Some(0.0));
    }

    #[test]
    fn wake_restarts_the_frame_clock() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame(0.0, false, &cfg());
        s.wake();
        assert_eq!(s.begin_frame(9_000.0, false, &cfg()), Some(0.0));
    }
}
