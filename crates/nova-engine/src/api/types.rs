/// Unique identifier for a body in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// A sound cue emitted by the simulation (hover blip, UI click).
/// The numeric value maps to a track in the host's sound layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundCue(pub u32);

/// A notification from the simulation to the presentation layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

// ── Event kinds to the presentation layer ────────────────────────────

/// Simulated date changed: a = days from J2000, b = time-scale, c = paused.
pub const EVENT_DATE: f32 = 1.0;
/// Focus changed: a = body id (-1 when cleared).
pub const EVENT_FOCUS: f32 = 2.0;
/// Hover changed: a = body id (-1 when cleared), b = 1 on enter.
pub const EVENT_HOVER: f32 = 3.0;
/// Stellar lifecycle phase changed: a = raw phase number.
pub const EVENT_PHASE: f32 = 4.0;
/// Menu selection confirmed: a = menu index.
pub const EVENT_MENU_SELECT: f32 = 5.0;
/// Modal closed by escape.
pub const EVENT_MODAL_CLOSED: f32 = 6.0;
/// Global shortcut pressed: a = key code.
pub const EVENT_SHORTCUT: f32 = 7.0;

// ── Sound cues ───────────────────────────────────────────────────────

pub const CUE_HOVER: SoundCue = SoundCue(1);

impl SimEvent {
    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Encode an optional body id into the `a` payload slot.
    pub fn body_payload(id: Option<BodyId>) -> f32 {
        id.map(|b| b.0 as f32).unwrap_or(-1.0)
    }
}
