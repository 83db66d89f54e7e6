use glam::Vec3;

/// Engine tuning knobs, provided by the host. All fields have sensible
/// defaults; hosts usually override only the safe camera pose.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Frame cap while a modal overlay is open (frames per second).
    pub modal_fps_cap: f64,
    /// Frame cap while the page/window is hidden.
    pub hidden_fps_cap: f64,
    /// Seconds a hidden page waits before the loop is fully suspended.
    pub sleep_delay: f64,
    /// Largest real-time delta fed to the simulation in one frame (seconds).
    /// Anything above this (tab restore, debugger pause) is clamped.
    pub max_frame_delta: f32,
    /// Camera flight duration in milliseconds.
    pub flight_duration_ms: f64,
    /// Camera-to-star distance below which the expanding star pushes the
    /// camera back.
    pub star_retreat_distance: f32,
    /// Minimum camera-to-star distance enforced after a lifecycle reset.
    pub reset_min_distance: f32,
    /// Known-safe camera pose the watchdog falls back to.
    pub safe_camera_pos: Vec3,
    pub safe_camera_target: Vec3,
    /// Real-time lifetime of an ephemeral novelty body (seconds).
    pub ephemeral_lifetime: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            modal_fps_cap: 30.0,
            hidden_fps_cap: 15.0,
            sleep_delay: 10.0,
            max_frame_delta: 0.1,
            flight_duration_ms: 1000.0,
            star_retreat_distance: 300.0,
            reset_min_distance: 120.0,
            safe_camera_pos: Vec3::new(0.0, 120.0, 320.0),
            safe_camera_target: Vec3::ZERO,
            ephemeral_lifetime: 30.0,
        }
    }
}
