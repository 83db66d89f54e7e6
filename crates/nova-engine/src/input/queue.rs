/// Input event types the engine understands.
/// Pointer coordinates are normalized device coordinates (-1..1, y up).
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// The pointer moved.
    PointerMove { x: f32, y: f32 },
    /// The pointer button was pressed at the last pointer position.
    PointerDown,
    /// The pointer button was released. The arbiter decides whether the
    /// press-release pair was a click or an orbit drag.
    PointerUp,
    /// A key was pressed.
    KeyDown { code: u32 },
    /// A key was released.
    KeyUp { code: u32 },
    /// A command from the UI layer (buttons, menus).
    /// `kind` identifies the command; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Key codes the arbiter gives special meaning to.
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_DOWN: u32 = 40;
    pub const KEY_A: u32 = 65;
    pub const KEY_D: u32 = 68;
    /// Info-panel toggle, intercepted globally.
    pub const KEY_I: u32 = 73;
    /// Audio mute toggle, intercepted globally.
    pub const KEY_M: u32 = 77;
    /// Audio track skip, intercepted globally.
    pub const KEY_N: u32 = 78;
    pub const KEY_S: u32 = 83;
    pub const KEY_W: u32 = 87;
}

/// A queue of input events. The host pushes events as they arrive; the
/// engine drains them once per processed frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, clearing the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 0.1, y: -0.2 });
        q.push(InputEvent::KeyDown { code: keys::KEY_W });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event_payload() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        match q.drain()[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!((a, b, c), (1.5, 2.5, 3.5));
            }
            _ => panic!("expected Custom event"),
        }
    }
}
