use glam::Vec3;

use crate::api::config::SimConfig;

/// A ray in world space, used for pointer picking.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Nearest intersection distance with a sphere, if the ray hits it in
    /// front of the origin.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let t0 = -b - sqrt_disc;
        let t1 = -b + sqrt_disc;
        if t0 > 0.0 {
            Some(t0)
        } else if t1 > 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}

/// Handle onto the host's camera/controls. The simulation moves the pose
/// and toggles the control flags; the presentation layer owns the actual
/// control widget and reads these back every frame.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Free orbit/rotate control.
    pub controls_enabled: bool,
    pub pan_enabled: bool,
    /// WASD-style keyboard movement.
    pub keys_enabled: bool,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
}

impl CameraRig {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            controls_enabled: true,
            pan_enabled: true,
            keys_enabled: true,
            fov_y: std::f32::consts::FRAC_PI_3,
            aspect: 16.0 / 9.0,
        }
    }

    /// True when both pose vectors are free of NaN/inf components.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }

    /// Snap to the known-safe pose and re-enable the free controls.
    pub fn reset_safe(&mut self, cfg: &SimConfig) {
        self.position = cfg.safe_camera_pos;
        self.target = cfg.safe_camera_target;
        self.controls_enabled = true;
        self.pan_enabled = true;
        self.keys_enabled = true;
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Build a picking ray through a pointer position in normalized device
    /// coordinates (-1..1, y up). None if the view direction is degenerate.
    pub fn pointer_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let forward = self.target - self.position;
        if forward.length_squared() < 1e-8 || !forward.is_finite() {
            return None;
        }
        let forward = forward.normalize();
        let world_up = if forward.y.abs() > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);

        let half_h = (self.fov_y * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = (forward + right * (ndc_x * half_w) + up * (ndc_y * half_h)).normalize();
        Some(Ray {
            origin: self.position,
            dir,
        })
    }
}
