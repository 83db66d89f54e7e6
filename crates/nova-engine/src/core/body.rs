use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;

/// What kind of body this is. Drives dispatch in the orbital model,
/// the interaction arbiter, and the stellar lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Dwarf,
    Moon,
    Remnant,
    Ephemeral,
}

/// Descriptive metadata shown in the info panel. Supplied by the host
/// catalog; the simulation only reads it, except for the star's one-time
/// red-giant rewrite during the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    #[serde(default)]
    pub type_label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub period_label: String,
}

/// The slice of a body's renderable state the simulation is allowed to
/// touch. The presentation layer owns the actual mesh and label; it writes
/// `world_pos` transforms out from here and reads the flags back. The
/// simulation never constructs or frees render objects.
#[derive(Debug, Clone)]
pub struct BodyVisual {
    /// World position, recomputed every frame by the orbital model.
    pub world_pos: Vec3,
    /// Base visual radius in world units (picking and consumption tests).
    pub radius: f32,
    /// Uniform scale multiplier (grows during stellar expansion).
    pub scale: f32,
    /// Mesh opacity, 1.0 = opaque.
    pub opacity: f32,
    /// Emissive intensity and color.
    pub emissive: f32,
    pub emissive_color: (f32, f32, f32),
    /// Attached light source (the star carries one; zero elsewhere).
    pub light_intensity: f32,
    pub light_color: (f32, f32, f32),
    pub visible: bool,
    pub label_visible: bool,
    pub orbit_path_visible: bool,
    /// Hover highlight flag, at most one body holds it at a time.
    pub highlighted: bool,
}

impl BodyVisual {
    pub fn new(radius: f32) -> Self {
        Self {
            world_pos: Vec3::ZERO,
            radius,
            scale: 1.0,
            opacity: 1.0,
            emissive: 0.0,
            emissive_color: (0.0, 0.0, 0.0),
            light_intensity: 0.0,
            light_color: (1.0, 1.0, 1.0),
            visible: true,
            label_visible: true,
            orbit_path_visible: true,
            highlighted: false,
        }
    }

    /// Effective radius after scaling (the star grows during expansion).
    pub fn scaled_radius(&self) -> f32 {
        self.radius * self.scale
    }

    /// Hide mesh, orbit path, and label together.
    pub fn hide_all(&mut self) {
        self.visible = false;
        self.label_visible = false;
        self.orbit_path_visible = false;
    }

    /// Restore mesh, orbit path, and label together.
    pub fn show_all(&mut self) {
        self.visible = true;
        self.label_visible = true;
        self.orbit_path_visible = true;
    }
}

/// Fat body struct with every field the update systems need.
/// Designed for simplicity over ECS purity: a planetary system holds
/// tens of bodies, not thousands.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub visual: BodyVisual,

    /// Current orbital parameters, mutated by the lifecycle.
    pub orbital_distance: f32,
    pub orbital_speed: f32,
    /// Immutable snapshot taken at registration, used by lifecycle reset.
    pub original_distance: f32,
    pub original_speed: f32,

    /// Angular offset at epoch, radians.
    pub start_angle: f32,
    pub orbital_period_days: f64,
    pub rotation_period_days: f64,
    pub retrograde: bool,
    pub axial_tilt_deg: f32,

    /// Accumulated self-rotation, radians. Fixed visual rate, not tied to
    /// `rotation_period_days`.
    pub spin_angle: f32,
    /// Accumulated orbit angle for moons (incremental, parent-relative).
    pub local_orbit_angle: f32,

    pub parent: Option<BodyId>,
    /// The one distinguished body whose revolution uses the exact-year
    /// day-of-year convention.
    pub home: bool,
    /// Whether a click on this body starts a camera flight.
    pub focusable: bool,
    /// Real-time seconds until an ephemeral body is removed.
    pub expires_in: Option<f64>,

    pub info: BodyInfo,
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, kind: BodyKind, radius: f32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            visual: BodyVisual::new(radius),
            orbital_distance: 0.0,
            orbital_speed: 0.0,
            original_distance: 0.0,
            original_speed: 0.0,
            start_angle: 0.0,
            orbital_period_days: 0.0,
            rotation_period_days: 0.0,
            retrograde: false,
            axial_tilt_deg: 0.0,
            spin_angle: 0.0,
            local_orbit_angle: 0.0,
            parent: None,
            home: false,
            focusable: true,
            expires_in: None,
            info: BodyInfo::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_orbit(mut self, distance: f32, speed: f32) -> Self {
        self.orbital_distance = distance;
        self.orbital_speed = speed;
        self
    }

    pub fn with_period(mut self, orbital_days: f64, rotation_days: f64) -> Self {
        self.orbital_period_days = orbital_days;
        self.rotation_period_days = rotation_days;
        self
    }

    pub fn with_start_angle(mut self, radians: f32) -> Self {
        self.start_angle = radians;
        self
    }

    pub fn with_tilt(mut self, degrees: f32) -> Self {
        self.axial_tilt_deg = degrees;
        self
    }

    pub fn retrograde(mut self) -> Self {
        self.retrograde = true;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn home(mut self) -> Self {
        self.home = true;
        self
    }

    pub fn focusable(mut self, yes: bool) -> Self {
        self.focusable = yes;
        self
    }

    pub fn expiring(mut self, seconds: f64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    pub fn with_info(mut self, info: BodyInfo) -> Self {
        self.info = info;
        self
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    pub fn is_moon(&self) -> bool {
        self.kind == BodyKind::Moon
    }
}

/// A rigid particle ring (asteroid or Kuiper analogue). Rotates as a group;
/// the lifecycle scales it outward after the collapse.
#[derive(Debug, Clone)]
pub struct Belt {
    pub angle: f32,
    /// Base angular rate in radians per simulated day.
    pub rate: f32,
    pub scale: f32,
    pub visible: bool,
}

impl Belt {
    pub fn new(rate: f32) -> Self {
        Self {
            angle: 0.0,
            rate,
            scale: 1.0,
            visible: true,
        }
    }
}
