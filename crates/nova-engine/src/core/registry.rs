use crate::api::types::BodyId;
use crate::core::body::{BodyKind, CelestialBody};

/// Authoritative collection of all simulated bodies.
/// Flat Vec storage; a planetary system holds tens of bodies, so linear
/// scans are cheaper than any indexing scheme.
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    next_id: u32,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(32),
            next_id: 1,
        }
    }

    /// Allocate the next unique body id.
    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a body. Non-ephemeral bodies snapshot their orbital parameters
    /// here so a lifecycle reset can restore them exactly.
    pub fn register(&mut self, mut body: CelestialBody) -> BodyId {
        if body.kind != BodyKind::Ephemeral {
            body.original_distance = body.orbital_distance;
            body.original_speed = body.orbital_speed;
        }
        let id = body.id;
        self.bodies.push(body);
        id
    }

    /// Remove a body by id. Returns the removed body if found.
    pub fn remove(&mut self, id: BodyId) -> Option<CelestialBody> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.swap_remove(idx))
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.iter_mut()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// The central star. One exists until the lifecycle's terminal phase
    /// hides it; the body itself is never removed.
    pub fn star(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.kind == BodyKind::Star)
    }

    pub fn star_mut(&mut self) -> Option<&mut CelestialBody> {
        self.bodies.iter_mut().find(|b| b.kind == BodyKind::Star)
    }

    /// The pre-created, initially hidden remnant body.
    pub fn remnant(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.kind == BodyKind::Remnant)
    }

    pub fn remnant_mut(&mut self) -> Option<&mut CelestialBody> {
        self.bodies.iter_mut().find(|b| b.kind == BodyKind::Remnant)
    }

    pub fn home(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.home)
    }

    /// Restore every body's orbital parameters from the registration
    /// snapshot. Ephemeral bodies carry no snapshot and keep their
    /// current orbit.
    pub fn restore_originals(&mut self) {
        for body in &mut self.bodies {
            if body.kind == BodyKind::Ephemeral {
                continue;
            }
            body.orbital_distance = body.original_distance;
            body.orbital_speed = body.original_speed;
        }
    }

    /// Age ephemeral bodies by `delta` real seconds and drop the expired
    /// ones. Returns how many were removed.
    pub fn sweep_ephemeral(&mut self, delta: f64) -> usize {
        let before = self.bodies.len();
        for body in &mut self.bodies {
            if let Some(remaining) = body.expires_in.as_mut() {
                *remaining -= delta;
            }
        }
        self.bodies.retain(|b| b.expires_in.map_or(true, |r| r > 0.0));
        let removed = before - self.bodies.len();
        if removed > 0 {
            log::info!("swept {} expired ephemeral body(ies)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
