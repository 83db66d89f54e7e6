pub mod api;
pub mod assets;
pub mod camera;
pub mod core;
pub mod engine;
pub mod extensions;
pub mod input;
pub mod scheduler;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::types::{BodyId, SimEvent, SoundCue};
pub use assets::catalog::{default_sol, BodyCatalog, BodyRecord};
pub use camera::{CameraRig, Ray};
pub use core::body::{Belt, BodyInfo, BodyKind, BodyVisual, CelestialBody};
pub use core::clock::{OrbitalClock, TimeMode};
pub use core::context::{SimContext, UiState};
pub use core::registry::BodyRegistry;
pub use engine::{commands, Engine};
pub use input::queue::{keys, InputEvent, InputQueue};
pub use scheduler::FrameScheduler;
pub use systems::flight::CameraFlightController;
pub use systems::interact::InteractionArbiter;
pub use systems::lifecycle::{LifecyclePhase, StellarLifecycleFSM};

// Extensions — decoupled optional helpers
pub use extensions::{approach, lerp, lerp_vec3, Easing};
