//! Host input → engine state.
//!
//! Each entry point builds an [`InputEvent`], runs it through the gesture state
//! and then the session. The return value tells the host whether the event was
//! handled.

use crate::coords::Vec2;
use crate::input::{InputEvent, KeyCode, PointerEvent, TextEvent, WheelDelta};

use super::Engine;

impl Engine {
    /// Pointer moved without a press (or with one; hover is always tolerated).
    pub fn hover(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerMoved(PointerEvent { x, y }))
    }

    pub fn touch_down(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerDown(PointerEvent { x, y }))
    }

    /// Pointer moved while pressed. `false` without a preceding `touch_down`.
    pub fn touch_dragged(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerDragged(PointerEvent { x, y }))
    }

    /// Pointer released. A release without a press is a no-op.
    pub fn touch_up(&mut self, x: f32, y: f32) -> bool {
        self.handle_event(InputEvent::PointerUp(PointerEvent { x, y }))
    }

    pub fn touch_wheel(&mut self, dx: f32, dy: f32) -> bool {
        self.handle_event(InputEvent::Wheel(WheelDelta { dx, dy }))
    }

    /// Inserts a typed UTF-8 fragment.
    pub fn key_down(&mut self, text: &str) -> bool {
        self.handle_event(InputEvent::Text(TextEvent { text: text.to_owned() }))
    }

    /// Non-text key by numeric code (see [`KeyCode`]). Unknown codes return
    /// `false` and change nothing.
    pub fn special_key_down(&mut self, code: u32) -> bool {
        match KeyCode::from_u32(code) {
            Some(key) => self.handle_event(InputEvent::Key(key)),
            None => {
                log::debug!("ignoring unknown key code {code}");
                false
            }
        }
    }

    /// Applies one event in call order and reports whether it was handled.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.input.apply_event(&event) {
            log::trace!("input rejected: {event:?}");
            return false;
        }

        let handled = match &event {
            InputEvent::PointerMoved(p) => {
                if self.input.pressed {
                    self.session.drag(p.pos());
                }
                self.session.hover(p.pos())
            }
            InputEvent::PointerDown(p) => self.session.press(p.pos()),
            InputEvent::PointerDragged(p) => self.session.drag(p.pos()),
            InputEvent::PointerUp(p) => {
                let at = if p.pos().is_finite() {
                    p.pos()
                } else {
                    self.input.pointer_pos.unwrap_or(Vec2::new(-1.0, -1.0))
                };
                self.session.release(at)
            }
            InputEvent::Wheel(w) => self.session.scroll(w.dx, w.dy),
            InputEvent::Text(t) => self.session.type_text(&t.text),
            InputEvent::Key(k) => self.session.special_key(*k),
        };

        if handled {
            self.session.mark_active();
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::Mode;
    use crate::input::KeyCode;
    use crate::Engine;

    fn engine() -> Engine {
        Engine::initialize(None)
    }

    /// Screen point of a text cell under the default viewport.
    fn cell(e: &Engine, line: f32, col: f32) -> (f32, f32) {
        let o = e.session().layout().text_origin();
        let c = e.session().cell();
        (o.x + col * c.x + 1.0, o.y + line * c.y + 1.0)
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn touch_up_without_touch_down_is_noop() {
        let mut e = engine();
        e.key_down("abc");
        let before = e.session().document().clone();
        assert!(!e.touch_up(10.0, 10.0));
        assert_eq!(e.session().document(), &before);
    }

    #[test]
    fn drag_without_press_is_rejected() {
        let mut e = engine();
        assert!(!e.touch_dragged(100.0, 100.0));
    }

    #[test]
    fn press_drag_release_selects() {
        let mut e = engine();
        e.key_down("selection");
        let (x0, y0) = cell(&e, 0.0, 0.0);
        let (x1, y1) = cell(&e, 0.0, 3.0);
        assert!(e.touch_down(x0, y0));
        assert!(e.touch_dragged(x1, y1));
        assert!(e.touch_up(x1, y1));
        assert_eq!(e.copy().as_deref(), Some("sel"));
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut e = engine();
        assert!(!e.touch_down(f32::NAN, 0.0));
        assert!(!e.hover(0.0, f32::INFINITY));
    }

    #[test]
    fn zero_wheel_is_unhandled() {
        let mut e = engine();
        assert!(!e.touch_wheel(0.0, 0.0));
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn out_of_range_key_codes_are_rejected() {
        let mut e = engine();
        e.key_down("x");
        let before = e.session().document().clone();
        for code in [9, 10, 255, u32::MAX] {
            assert!(!e.special_key_down(code));
        }
        assert_eq!(e.session().document(), &before);
    }

    #[test]
    fn empty_fragment_is_unhandled() {
        let mut e = engine();
        assert!(!e.key_down(""));
        assert!(e.key_down("é語"));
        assert_eq!(e.session().document().text(), "é語");
    }

    #[test]
    fn arrows_and_delete() {
        let mut e = engine();
        e.key_down("ab");
        assert!(e.special_key_down(KeyCode::Left.code()));
        assert!(e.special_key_down(KeyCode::Delete.code()));
        assert_eq!(e.session().document().text(), "b");
    }

    #[test]
    fn typing_is_ignored_while_panel_shows() {
        let mut e = engine();
        e.open();
        e.update();
        assert_eq!(e.session().mode(), Mode::Browser);
        assert!(!e.key_down("x"));
        assert!(e.special_key_down(KeyCode::Escape.code()));
        assert!(e.key_down("x"));
    }
}
