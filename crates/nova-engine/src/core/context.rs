use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::types::{BodyId, SimEvent, SoundCue};
use crate::camera::CameraRig;
use crate::core::body::Belt;
use crate::core::clock::OrbitalClock;
use crate::core::registry::BodyRegistry;

/// UI modality flags, reduced from the host's DOM state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    /// A 2D overlay (menu) owns pointer and keyboard input.
    pub ui_exclusive: bool,
    /// A blocking overlay is open; also caps the frame rate.
    pub modal_open: bool,
    /// The pointer is currently over a UI overlay region.
    pub pointer_over_ui: bool,
}

/// All shared simulation state, owned by the engine and passed by
/// mutable reference to each system's update call. No system keeps a
/// private copy of any of it.
pub struct SimContext {
    pub config: SimConfig,
    pub registry: BodyRegistry,
    pub clock: OrbitalClock,
    pub camera: CameraRig,
    /// Inner and outer particle rings.
    pub belts: [Belt; 2],
    pub ui: UiState,

    /// Body the camera is centered on, if any.
    pub focused: Option<BodyId>,
    /// Body currently under the pointer, if any.
    pub hovered: Option<BodyId>,

    /// Per-frame notifications to the presentation layer.
    pub events: Vec<SimEvent>,
    pub sounds: Vec<SoundCue>,
}

impl SimContext {
    pub fn new(config: SimConfig, registry: BodyRegistry, clock: OrbitalClock) -> Self {
        let camera = CameraRig::new(config.safe_camera_pos, config.safe_camera_target);
        Self {
            config,
            registry,
            clock,
            camera,
            belts: [Belt::new(0.004), Belt::new(0.0015)],
            ui: UiState::default(),
            focused: None,
            hovered: None,
            events: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn emit_event(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn emit_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    /// Clear per-frame transient data. Called at the top of each processed
    /// frame.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.sounds.clear();
    }

    /// World position of a body, if it exists.
    pub fn body_pos(&self, id: BodyId) -> Option<Vec3> {
        self.registry.get(id).map(|b| b.visual.world_pos)
    }
}
