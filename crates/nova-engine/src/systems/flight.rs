/// Camera flight controller: eased point-to-point transitions.
///
/// Two states: Idle and Flying. A flight interpolates camera position and
/// look-target over a fixed duration with a sine in/out profile. While
/// Idle with a focused body, the controller keeps tracking the body's
/// moving world position without re-triggering a flight.

use glam::Vec3;

use crate::api::types::{BodyId, SimEvent, EVENT_FOCUS};
use crate::core::body::BodyKind;
use crate::core::context::SimContext;
use crate::extensions::easing::{lerp_vec3, Easing};

/// Transient interpolation state, owned exclusively by the controller.
#[derive(Debug, Clone)]
struct Flight {
    start_ms: f64,
    duration_ms: f64,
    start_pos: Vec3,
    end_pos: Vec3,
    start_target: Vec3,
    end_target: Vec3,
}

pub struct CameraFlightController {
    flight: Option<Flight>,
}

/// Normalized flight progress, clamped to [0, 1].
pub fn flight_progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)) as f32
}

impl CameraFlightController {
    pub fn new() -> Self {
        Self { flight: None }
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Begin a flight toward `id`. Overwrites any flight in progress.
    /// Returns false (leaving the camera untouched at a safe pose) when the
    /// computed end pose is not finite.
    pub fn focus_on(&mut self, ctx: &mut SimContext, id: BodyId, now_ms: f64) -> bool {
        let Some(body) = ctx.registry.get(id) else {
            return false;
        };
        let kind = body.kind;
        let central = matches!(kind, BodyKind::Star | BodyKind::Remnant);

        // Degenerate world position (first frame, hidden handle): fall back
        // to the distance-derived position on the orbit.
        let mut target = body.visual.world_pos;
        if !central && target.length_squared() < 1e-6 {
            let a = body.start_angle;
            let d = body.orbital_distance;
            target = Vec3::new(a.cos() * d, 0.0, a.sin() * d);
        }

        let view_distance = body.visual.scaled_radius() * 4.0 + 12.0;
        let offset_dir = if central {
            // Keep the viewer's current approach side.
            let approach = ctx.camera.position - target;
            if approach.length_squared() > 1e-6 && approach.is_finite() {
                approach.normalize()
            } else {
                Vec3::new(0.0, 0.3, 1.0).normalize()
            }
        } else {
            // Bias toward the side facing the star for daylight framing.
            let to_star = -target;
            if to_star.length_squared() > 1e-6 {
                (to_star.normalize() + Vec3::Y * 0.35).normalize()
            } else {
                Vec3::new(0.0, 0.3, 1.0).normalize()
            }
        };
        let end_pos = target + offset_dir * view_distance;

        if !end_pos.is_finite() || !target.is_finite() {
            log::warn!("aborting flight to {:?}: non-finite end pose", id);
            self.flight = None;
            ctx.focused = None;
            ctx.camera.reset_safe(&ctx.config);
            ctx.emit_event(SimEvent::new(EVENT_FOCUS, SimEvent::body_payload(None), 0.0, 0.0));
            return false;
        }

        self.flight = Some(Flight {
            start_ms: now_ms,
            duration_ms: ctx.config.flight_duration_ms,
            start_pos: ctx.camera.position,
            end_pos,
            start_target: ctx.camera.target,
            end_target: target,
        });
        ctx.camera.controls_enabled = false;
        ctx.camera.pan_enabled = false;
        ctx.camera.keys_enabled = false;
        ctx.focused = Some(id);
        ctx.emit_event(SimEvent::new(EVENT_FOCUS, SimEvent::body_payload(Some(id)), 0.0, 0.0));
        true
    }

    /// Drop focus and any flight in progress, handing the camera back to
    /// the free controls.
    pub fn clear_focus(&mut self, ctx: &mut SimContext) {
        self.flight = None;
        if ctx.focused.take().is_some() {
            ctx.emit_event(SimEvent::new(EVENT_FOCUS, SimEvent::body_payload(None), 0.0, 0.0));
        }
        ctx.camera.controls_enabled = true;
        ctx.camera.pan_enabled = true;
        ctx.camera.keys_enabled = true;
    }

    /// Per-frame update: advance a flight, or track the focused body.
    pub fn step(&mut self, ctx: &mut SimContext, now_ms: f64) {
        if let Some(flight) = &self.flight {
            let progress = flight_progress(now_ms, flight.start_ms, flight.duration_ms);
            let eased = Easing::SineInOut.apply(progress);
            ctx.camera.position = lerp_vec3(flight.start_pos, flight.end_pos, eased);
            ctx.camera.target = lerp_vec3(flight.start_target, flight.end_target, eased);
            if progress >= 1.0 {
                self.flight = None;
                ctx.camera.controls_enabled = true;
                ctx.camera.pan_enabled = true;
                ctx.camera.keys_enabled = true;
            }
            return;
        }

        // Idle tracking: re-center on the focused body's current position,
        // shifting the camera by the same delta so framing is preserved.
        if let Some(id) = ctx.focused {
            if let Some(pos) = ctx.body_pos(id) {
                let delta = pos - ctx.camera.target;
                if delta.is_finite() {
                    ctx.camera.target = pos;
                    ctx.camera.position += delta;
                }
            }
        }
    }
}

impl Default for CameraFlightController {
    fn default() -> Self {
        Self::new()
    }
}
