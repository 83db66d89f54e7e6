/// Body catalog: serde-backed system definitions.
///
/// Hosts can ship a JSON catalog instead of hardcoding bodies; the engine
/// turns records into registered bodies, resolving moon parents by name.
/// `default_sol` is the built-in nine-planet system the demos use.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::body::{BodyInfo, BodyKind, CelestialBody};
use crate::core::registry::BodyRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    #[serde(default)]
    pub distance: f32,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub orbital_period_days: f64,
    #[serde(default)]
    pub rotation_period_days: f64,
    #[serde(default)]
    pub start_angle: f32,
    #[serde(default)]
    pub axial_tilt_deg: f32,
    #[serde(default)]
    pub retrograde: bool,
    /// Name of the parent body; only meaningful for moons.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub home: bool,
    #[serde(default = "default_true")]
    pub focusable: bool,
    #[serde(default)]
    pub info: BodyInfo,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub name: String,
    pub bodies: Vec<BodyRecord>,
}

impl BodyCatalog {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build a registry from the records. Parents are registered before
    /// their moons regardless of catalog order; a moon naming a missing
    /// parent is registered parentless with a warning.
    pub fn build_registry(&self) -> BodyRegistry {
        let mut registry = BodyRegistry::new();

        let (moons, others): (Vec<&BodyRecord>, Vec<&BodyRecord>) = self
            .bodies
            .iter()
            .partition(|r| r.kind == BodyKind::Moon);

        for record in others {
            let id = registry.next_id();
            registry.register(record.to_body(id, None));
        }
        for record in moons {
            let parent_id = record
                .parent
                .as_deref()
                .and_then(|name| registry.find_by_name(name))
                .map(|p| p.id);
            if parent_id.is_none() {
                log::warn!(
                    "moon {:?} references missing parent {:?}",
                    record.name,
                    record.parent
                );
            }
            let id = registry.next_id();
            registry.register(record.to_body(id, parent_id));
        }

        log::info!(
            "catalog {:?} loaded: {} bodies",
            self.name,
            registry.len()
        );
        registry
    }
}

impl BodyRecord {
    fn to_body(
        &self,
        id: crate::api::types::BodyId,
        parent: Option<crate::api::types::BodyId>,
    ) -> CelestialBody {
        let mut body = CelestialBody::new(id, self.name.clone(), self.kind, self.radius)
            .with_orbit(self.distance, self.speed)
            .with_period(self.orbital_period_days, self.rotation_period_days)
            .with_start_angle(self.start_angle)
            .with_tilt(self.axial_tilt_deg)
            .focusable(self.focusable)
            .with_info(self.info.clone());
        if self.retrograde {
            body = body.retrograde();
        }
        if self.home {
            body = body.home();
        }
        if let Some(pid) = parent {
            body = body.with_parent(pid);
        }
        if self.kind == BodyKind::Remnant {
            // The remnant pre-exists hidden until the collapse reveals it.
            body.visual.hide_all();
        }
        if self.kind == BodyKind::Star {
            body.visual.emissive = 1.2;
            body.visual.emissive_color = (1.0, 0.85, 0.55);
            body.visual.light_intensity = 1.6;
            body.visual.light_color = (1.0, 0.95, 0.88);
        }
        body
    }
}

fn info(type_label: &str, description: &str, age: &str, period_label: &str) -> BodyInfo {
    BodyInfo {
        type_label: type_label.into(),
        description: description.into(),
        age: age.into(),
        period_label: period_label.into(),
    }
}

/// The built-in system: a Sun analogue, eight planets, one dwarf, a
/// handful of notable moons, and a hidden white-dwarf remnant.
/// Distances and radii are display units, not astronomical ones; periods
/// are real sidereal days so the calendar drives believable positions.
pub fn default_sol() -> BodyCatalog {
    fn rec(
        name: &str,
        kind: BodyKind,
        radius: f32,
        distance: f32,
        speed: f32,
        period: f64,
        start_angle: f32,
    ) -> BodyRecord {
        BodyRecord {
            name: name.into(),
            kind,
            radius,
            distance,
            speed,
            orbital_period_days: period,
            rotation_period_days: 0.0,
            start_angle,
            axial_tilt_deg: 0.0,
            retrograde: false,
            parent: None,
            home: false,
            focusable: true,
            info: BodyInfo::default(),
        }
    }
    fn moon(name: &str, parent: &str, radius: f32, distance: f32, speed: f32) -> BodyRecord {
        let mut r = rec(name, BodyKind::Moon, radius, distance, speed, 0.0, 0.0);
        r.parent = Some(parent.into());
        r
    }

    let mut bodies = vec![
        BodyRecord {
            info: info(
                "G-type main-sequence star",
                "The system's star, about halfway through its hydrogen-burning life.",
                "4.6 billion years",
                "",
            ),
            ..rec("Sun", BodyKind::Star, 16.0, 0.0, 0.0, 0.0, 0.0)
        },
        rec("Mercury", BodyKind::Planet, 1.2, 30.0, 4.1, 87.97, 0.0),
        rec("Venus", BodyKind::Planet, 2.4, 44.0, 1.6, 224.70, 0.8 * TAU),
        BodyRecord {
            info: info(
                "Terrestrial planet",
                "The only known inhabited world.",
                "4.5 billion years",
                "365.25 days",
            ),
            home: true,
            ..rec("Earth", BodyKind::Planet, 2.5, 60.0, 1.0, 365.25, 0.0)
        },
        rec("Mars", BodyKind::Planet, 1.8, 78.0, 0.53, 686.98, 0.3 * TAU),
        rec("Jupiter", BodyKind::Planet, 8.0, 120.0, 0.084, 4_332.6, 0.6 * TAU),
        rec("Saturn", BodyKind::Planet, 7.0, 160.0, 0.034, 10_759.2, 0.15 * TAU),
        rec("Uranus", BodyKind::Planet, 4.5, 200.0, 0.012, 30_688.5, 0.45 * TAU),
        rec("Neptune", BodyKind::Planet, 4.3, 235.0, 0.006, 60_182.0, 0.7 * TAU),
        rec("Pluto", BodyKind::Dwarf, 0.9, 270.0, 0.004, 90_560.0, 0.9 * TAU),
        moon("Moon", "Earth", 0.7, 5.0, 2.5),
        moon("Io", "Jupiter", 0.6, 11.0, 3.2),
        moon("Europa", "Jupiter", 0.55, 13.5, 2.6),
        moon("Titan", "Saturn", 0.9, 11.5, 1.9),
        BodyRecord {
            retrograde: true,
            ..moon("Triton", "Neptune", 0.5, 7.5, 1.4)
        },
        BodyRecord {
            focusable: false,
            ..moon("Charon", "Pluto", 0.35, 2.2, 2.0)
        },
        BodyRecord {
            info: info(
                "White dwarf",
                "The dense remnant left behind after the star sheds its envelope.",
                "",
                "",
            ),
            ..rec("Remnant", BodyKind::Remnant, 4.0, 0.0, 0.0, 0.0, 0.0)
        },
    ];

    // Mercury and Venus get spin/tilt flavor.
    bodies[1].axial_tilt_deg = 0.03;
    bodies[2].retrograde = true;
    bodies[2].axial_tilt_deg = 177.4;
    bodies[3].axial_tilt_deg = 23.4;

    BodyCatalog {
        name: "Sol".into(),
        bodies,
    }
}
