// extensions/easing.rs
//
// Easing and interpolation helpers for camera flights and lifecycle blends.
// No dependencies on the registry or context, just math.

use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start and stop; the camera-flight profile.
    SineInOut,
}

impl Easing {
    /// Apply to a normalized time value `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: glam::Vec3, b: glam::Vec3, t: f32) -> glam::Vec3 {
    a + (b - a) * t
}

/// Move `value` toward `target` by a frame-rate-scaled factor.
/// The factor is clamped so large deltas never overshoot.
#[inline]
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor.clamp(0.0, 1.0)
}
