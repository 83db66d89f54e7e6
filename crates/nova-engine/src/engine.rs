/// Engine shell: owns every subsystem and runs the per-frame pipeline.
///
/// The host calls `tick(now_ms)` once per host frame and pushes input in
/// between. Frame admission (caps, sleep) is the scheduler's call; the
/// pipeline below only runs for admitted frames.

use crate::api::config::SimConfig;
use crate::api::types::{BodyId, SimEvent, SoundCue, EVENT_DATE, EVENT_MODAL_CLOSED};
use crate::core::body::{BodyKind, CelestialBody};
use crate::core::clock::{OrbitalClock, TimeMode};
use crate::core::context::SimContext;
use crate::core::registry::BodyRegistry;
use crate::input::queue::{InputEvent, InputQueue};
use crate::scheduler::FrameScheduler;
use crate::systems::flight::CameraFlightController;
use crate::systems::interact::InteractionArbiter;
use crate::systems::lifecycle::StellarLifecycleFSM;
use crate::systems::orbits;

/// `InputEvent::Custom` command kinds the shell routes.
pub mod commands {
    /// Begin the stellar death sequence. No payload.
    pub const LIFECYCLE_TRIGGER: u32 = 1;
    /// Restore the system to its initial state. No payload.
    pub const LIFECYCLE_RESET: u32 = 2;
    /// Toggle the simulation pause. No payload.
    pub const TOGGLE_PAUSE: u32 = 3;
    /// Set the time scale; `a` is simulated days per real second.
    /// `a <= 0` selects real-time (1:1) mode.
    pub const SET_TIME_SCALE: u32 = 4;
    /// Open the 2D menu overlay; `a` is the entry count.
    pub const MENU_OPEN: u32 = 5;
    /// Close the 2D menu overlay. No payload.
    pub const MENU_CLOSE: u32 = 6;
    /// A blocking modal opened. No payload.
    pub const MODAL_OPEN: u32 = 7;
    /// The blocking modal closed. No payload.
    pub const MODAL_CLOSE: u32 = 8;
    /// Pointer entered (`a != 0`) or left (`a == 0`) a UI overlay region.
    pub const POINTER_OVER_UI: u32 = 9;
    /// Fly the camera to body `a` (an id), bypassing picking. Used by
    /// list-style UI navigation.
    pub const FOCUS_BODY: u32 = 10;
    /// Release the camera from any focused body. No payload.
    pub const CLEAR_FOCUS: u32 = 11;
    /// Spawn a short-lived novelty body on a circular orbit.
    /// `a` is orbital distance, `b` orbital period in days, `c` radius.
    pub const SPAWN_EPHEMERAL: u32 = 12;
}

pub struct Engine {
    pub ctx: SimContext,
    scheduler: FrameScheduler,
    flight: CameraFlightController,
    arbiter: InteractionArbiter,
    lifecycle: StellarLifecycleFSM,
    input: InputQueue,
}

impl Engine {
    pub fn new(config: SimConfig, registry: BodyRegistry, clock: OrbitalClock) -> Self {
        Self {
            ctx: SimContext::new(config, registry, clock),
            scheduler: FrameScheduler::new(),
            flight: CameraFlightController::new(),
            arbiter: InteractionArbiter::new(),
            lifecycle: StellarLifecycleFSM::new(),
            input: InputQueue::new(),
        }
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Visibility change from the host (page hide/show, focus loss/gain).
    pub fn set_visible(&mut self, visible: bool, now_ms: f64) {
        self.scheduler.set_visible(visible, now_ms, &self.ctx.config);
    }

    pub fn request_sleep(&mut self) {
        self.scheduler.request_sleep();
    }

    pub fn wake(&mut self) {
        self.scheduler.wake();
    }

    pub fn is_sleeping(&self) -> bool {
        self.scheduler.is_sleeping()
    }

    pub fn lifecycle_phase(&self) -> u32 {
        self.lifecycle.phase().raw()
    }

    pub fn focused(&self) -> Option<BodyId> {
        self.ctx.focused
    }

    /// Events emitted during the last processed frame.
    pub fn events(&self) -> &[SimEvent] {
        &self.ctx.events
    }

    pub fn sounds(&self) -> &[SoundCue] {
        &self.ctx.sounds
    }

    pub fn display_date(&self) -> String {
        self.ctx.clock.display_string()
    }

    /// Run one frame at `now_ms` (host milliseconds). Returns true when
    /// the frame was admitted and processed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(delta) =
            self.scheduler
                .begin_frame(now_ms, self.ctx.ui.modal_open, &self.ctx.config)
        else {
            return false;
        };
        let delta = delta as f32;

        // A camera corrupted by bad input must never propagate NaN into
        // picking or flights. Checked only on admitted frames; dropped
        // frames do no work.
        if !self.ctx.camera.is_finite() {
            log::warn!("camera pose went non-finite; resetting to safe pose");
            self.flight.clear_focus(&mut self.ctx);
            self.ctx.camera.reset_safe(&self.ctx.config);
        }

        self.ctx.clear_frame_data();

        for event in self.input.drain() {
            match event {
                InputEvent::Custom { kind, a, b, c } => self.route_command(kind, a, b, c, now_ms),
                other => self
                    .arbiter
                    .handle_event(&mut self.ctx, &other, &mut self.flight, now_ms),
            }
        }

        let scaled_days = self.ctx.clock.advance(delta as f64);
        orbits::apply_to_all(&mut self.ctx, delta, scaled_days);

        self.flight.step(&mut self.ctx, now_ms);
        self.arbiter.resolve_hover(&mut self.ctx);
        self.lifecycle
            .step(&mut self.ctx, delta, now_ms, &mut self.flight);
        self.ctx.registry.sweep_ephemeral(delta as f64);

        self.ctx.emit_event(SimEvent::new(
            EVENT_DATE,
            self.ctx.clock.days() as f32,
            self.ctx.clock.time_scale() as f32,
            if self.ctx.clock.is_paused() { 1.0 } else { 0.0 },
        ));

        true
    }

    fn route_command(&mut self, kind: u32, a: f32, b: f32, c: f32, now_ms: f64) {
        match kind {
            commands::LIFECYCLE_TRIGGER => {
                self.lifecycle.trigger(&mut self.ctx);
            }
            commands::LIFECYCLE_RESET => self.lifecycle.reset(&mut self.ctx, &mut self.flight),
            commands::TOGGLE_PAUSE => self.ctx.clock.toggle_pause(),
            commands::SET_TIME_SCALE => {
                let mode = if a > 0.0 {
                    TimeMode::Scaled(a as f64)
                } else {
                    TimeMode::RealTime
                };
                self.ctx.clock.set_mode(mode);
            }
            commands::MENU_OPEN => self.arbiter.open_menu(&mut self.ctx, a.max(0.0) as usize),
            commands::MENU_CLOSE => self.arbiter.close_menu(&mut self.ctx),
            commands::MODAL_OPEN => self.ctx.ui.modal_open = true,
            commands::MODAL_CLOSE => {
                self.ctx.ui.modal_open = false;
                self.ctx
                    .emit_event(SimEvent::new(EVENT_MODAL_CLOSED, 0.0, 0.0, 0.0));
            }
            commands::POINTER_OVER_UI => self.ctx.ui.pointer_over_ui = a != 0.0,
            commands::FOCUS_BODY => {
                let id = BodyId(a as u32);
                if self.ctx.registry.get(id).is_some() {
                    self.flight.focus_on(&mut self.ctx, id, now_ms);
                }
            }
            commands::CLEAR_FOCUS => self.flight.clear_focus(&mut self.ctx),
            commands::SPAWN_EPHEMERAL => {
                let id = self.ctx.registry.next_id();
                let lifetime = self.ctx.config.ephemeral_lifetime;
                let visitor = CelestialBody::new(id, "visitor", BodyKind::Ephemeral, c.max(0.1))
                    .with_orbit(a.max(0.0), 0.0)
                    .with_period(b as f64, 0.0)
                    .expiring(lifetime);
                self.ctx.registry.register(visitor);
                log::info!("spawned ephemeral body {:?} for {}s", id, lifetime);
            }
            other => log::warn!("unknown UI command kind {}", other),
        }
    }
}
