/// Interaction arbiter: turns raw pointer/keyboard events into hover and
/// focus intents against the body registry, honoring UI-exclusivity and
/// modal locks.

use std::collections::HashMap;

use crate::api::types::{
    BodyId, SimEvent, CUE_HOVER, EVENT_HOVER, EVENT_MENU_SELECT, EVENT_MODAL_CLOSED,
    EVENT_SHORTCUT,
};
use crate::core::context::SimContext;
use crate::input::queue::{keys, InputEvent};
use crate::systems::flight::CameraFlightController;

/// Picking is slightly forgiving; small bodies are hard to hit exactly.
const PICK_PADDING: f32 = 1.25;

/// Pointer travel (NDC) between press and release beyond which the gesture
/// counts as an orbit drag, not a click.
const DRAG_THRESHOLD: f32 = 0.01;

pub struct InteractionArbiter {
    /// Keys currently held, with the timestamp each press started.
    /// Doubles as the hold-duration primitive for press-and-hold
    /// confirmations: key-up removes the entry, cancelling the hold.
    keys_down: HashMap<u32, f64>,
    /// Last pointer position in normalized device coordinates.
    pointer: Option<(f32, f32)>,
    /// Pointer position at button press, pending release.
    press: Option<(f32, f32)>,
    /// Cyclic index over the visible menu entries while UI-exclusive.
    menu_len: usize,
    menu_index: usize,
}

impl InteractionArbiter {
    pub fn new() -> Self {
        Self {
            keys_down: HashMap::new(),
            pointer: None,
            press: None,
            menu_len: 0,
            menu_index: 0,
        }
    }

    // ── Menu state (driven by the host's UI commands) ────────────────

    pub fn open_menu(&mut self, ctx: &mut SimContext, entries: usize) {
        self.menu_len = entries;
        self.menu_index = 0;
        ctx.ui.ui_exclusive = true;
    }

    pub fn close_menu(&mut self, ctx: &mut SimContext) {
        self.menu_len = 0;
        ctx.ui.ui_exclusive = false;
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    // ── Key state primitives ─────────────────────────────────────────

    pub fn is_down(&self, code: u32) -> bool {
        self.keys_down.contains_key(&code)
    }

    /// Movement keys are readable only when no overlay owns the input.
    pub fn movement_key_down(&self, ctx: &SimContext, code: u32) -> bool {
        !ctx.ui.ui_exclusive && !ctx.ui.modal_open && self.is_down(code)
    }

    /// How long `code` has been held, in milliseconds. None once released.
    pub fn hold_duration(&self, code: u32, now_ms: f64) -> Option<f64> {
        self.keys_down.get(&code).map(|since| now_ms - since)
    }

    // ── Event handling ───────────────────────────────────────────────

    pub fn handle_event(
        &mut self,
        ctx: &mut SimContext,
        event: &InputEvent,
        flight: &mut CameraFlightController,
        now_ms: f64,
    ) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.pointer = Some((x, y));
            }
            InputEvent::PointerDown => {
                self.press = self.pointer;
            }
            InputEvent::PointerUp => {
                let press = self.press.take();
                let travel = match (press, self.pointer) {
                    (Some((px, py)), Some((x, y))) => {
                        ((x - px).powi(2) + (y - py).powi(2)).sqrt()
                    }
                    _ => return,
                };
                if travel <= DRAG_THRESHOLD {
                    self.handle_click(ctx, flight, now_ms);
                }
            }
            InputEvent::KeyDown { code } => self.handle_key_down(ctx, code, flight, now_ms),
            InputEvent::KeyUp { code } => {
                self.keys_down.remove(&code);
            }
            // Custom commands are routed by the engine shell.
            InputEvent::Custom { .. } => {}
        }
    }

    fn handle_click(
        &mut self,
        ctx: &mut SimContext,
        flight: &mut CameraFlightController,
        now_ms: f64,
    ) {
        if ctx.ui.ui_exclusive || ctx.ui.modal_open || ctx.ui.pointer_over_ui {
            return;
        }
        let Some(id) = ctx.hovered else { return };
        let Some(body) = ctx.registry.get(id) else {
            return;
        };
        if body.visual.visible && body.focusable {
            flight.focus_on(ctx, id, now_ms);
        }
    }

    fn handle_key_down(
        &mut self,
        ctx: &mut SimContext,
        code: u32,
        flight: &mut CameraFlightController,
        now_ms: f64,
    ) {
        self.keys_down.entry(code).or_insert(now_ms);

        // Global shortcuts bypass the exclusivity check entirely.
        if matches!(code, keys::KEY_M | keys::KEY_N | keys::KEY_I) {
            ctx.emit_event(SimEvent::new(EVENT_SHORTCUT, code as f32, 0.0, 0.0));
            return;
        }

        if ctx.ui.ui_exclusive {
            match code {
                keys::ARROW_UP if self.menu_len > 0 => {
                    self.menu_index = (self.menu_index + self.menu_len - 1) % self.menu_len;
                }
                keys::ARROW_DOWN if self.menu_len > 0 => {
                    self.menu_index = (self.menu_index + 1) % self.menu_len;
                }
                keys::ENTER => {
                    let index = self.menu_index as f32;
                    ctx.emit_event(SimEvent::new(EVENT_MENU_SELECT, index, 0.0, 0.0));
                }
                keys::ESCAPE => self.escape(ctx, flight),
                _ => {}
            }
            return;
        }

        if code == keys::ESCAPE {
            self.escape(ctx, flight);
        }
    }

    /// Escape closes, in priority order: modal, then menu, then focus.
    fn escape(&mut self, ctx: &mut SimContext, flight: &mut CameraFlightController) {
        if ctx.ui.modal_open {
            ctx.ui.modal_open = false;
            ctx.emit_event(SimEvent::new(EVENT_MODAL_CLOSED, 0.0, 0.0, 0.0));
        } else if ctx.ui.ui_exclusive {
            self.close_menu(ctx);
        } else if ctx.focused.is_some() {
            flight.clear_focus(ctx);
        }
    }

    // ── Hover resolution (per frame, cached pointer) ─────────────────

    pub fn resolve_hover(&mut self, ctx: &mut SimContext) {
        if ctx.ui.pointer_over_ui || ctx.ui.ui_exclusive || ctx.ui.modal_open {
            self.set_hover(ctx, None);
            return;
        }
        let Some((px, py)) = self.pointer else { return };
        let Some(ray) = ctx.camera.pointer_ray(px, py) else {
            self.set_hover(ctx, None);
            return;
        };

        // Nearest visible hit wins. Hidden handles (consumed bodies, the
        // faded star) are never pickable.
        let mut best: Option<(BodyId, f32)> = None;
        for body in ctx.registry.iter() {
            if !body.visual.visible {
                continue;
            }
            let radius = body.visual.scaled_radius() * PICK_PADDING;
            if let Some(t) = ray.intersect_sphere(body.visual.world_pos, radius) {
                if best.map_or(true, |(_, bt)| t < bt) {
                    best = Some((body.id, t));
                }
            }
        }
        self.set_hover(ctx, best.map(|(id, _)| id));
    }

    fn set_hover(&mut self, ctx: &mut SimContext, next: Option<BodyId>) {
        if ctx.hovered == next {
            return;
        }
        // Leave effects on the previous body.
        if let Some(prev) = ctx.hovered {
            if let Some(body) = ctx.registry.get_mut(prev) {
                body.visual.highlighted = false;
            }
            ctx.emit_event(SimEvent::new(EVENT_HOVER, SimEvent::body_payload(None), 0.0, 0.0));
        }
        // Enter effects on the new one. At most one highlight at a time.
        if let Some(id) = next {
            if let Some(body) = ctx.registry.get_mut(id) {
                body.visual.highlighted = true;
            }
            ctx.emit_event(SimEvent::new(EVENT_HOVER, SimEvent::body_payload(Some(id)), 1.0, 0.0));
            ctx.emit_sound(CUE_HOVER);
        }
        ctx.hovered = next;
    }
}

impl Default for InteractionArbiter {
    fn default() -> Self {
        Self::new()
    }
}
