use crate::coords::Vec2;

use super::types::InputEvent;

/// Pointer gesture state for one engine instance.
///
/// Expected sequence: `PointerDown` → `PointerDragged`* → `PointerUp`, with
/// `PointerMoved` interleaved at any time. Drag and release events without a
/// preceding press are rejected.
#[derive(Debug, Default)]
pub struct InputState {
    /// Last known pointer position.
    pub pointer_pos: Option<Vec2>,

    /// Whether the primary button is held.
    pub pressed: bool,

    /// Where the current press started.
    pub press_origin: Option<Vec2>,

    /// Events accepted since creation.
    pub accepted: u64,
}

impl InputState {
    /// Applies `ev` to the gesture state.
    ///
    /// Returns `false` when the event does not fit the gesture lifecycle or
    /// carries non-finite coordinates; the state is left untouched in that case.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        let accepted = match ev {
            InputEvent::PointerMoved(p) => {
                if !p.pos().is_finite() {
                    return false;
                }
                self.pointer_pos = Some(p.pos());
                true
            }

            InputEvent::PointerDown(p) => {
                if !p.pos().is_finite() {
                    return false;
                }
                if self.pressed {
                    // The host lost a release; treat this as a fresh press.
                    log::debug!("pointer down while already pressed, restarting gesture");
                }
                self.pointer_pos = Some(p.pos());
                self.pressed = true;
                self.press_origin = Some(p.pos());
                true
            }

            InputEvent::PointerDragged(p) => {
                if !self.pressed || !p.pos().is_finite() {
                    return false;
                }
                self.pointer_pos = Some(p.pos());
                true
            }

            InputEvent::PointerUp(p) => {
                if !self.pressed {
                    return false;
                }
                if p.pos().is_finite() {
                    self.pointer_pos = Some(p.pos());
                }
                self.pressed = false;
                true
            }

            InputEvent::Wheel(w) => w.dx.is_finite() && w.dy.is_finite(),

            InputEvent::Text(_) | InputEvent::Key(_) => true,
        };

        if accepted {
            self.accepted += 1;
        }
        accepted
    }

    /// Clears the press, e.g. when the session changes mode mid-gesture.
    pub fn cancel_press(&mut self) {
        self.pressed = false;
        self.press_origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::types::PointerEvent;

    fn at(x: f32, y: f32) -> PointerEvent {
        PointerEvent { x, y }
    }

    #[test]
    fn release_without_press_is_rejected() {
        let mut s = InputState::default();
        assert!(!s.apply_event(&InputEvent::PointerUp(at(1.0, 1.0))));
        assert_eq!(s.accepted, 0);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn drag_without_press_is_rejected() {
        let mut s = InputState::default();
        assert!(!s.apply_event(&InputEvent::PointerDragged(at(1.0, 1.0))));
    }

    #[test]
    fn full_gesture_with_interleaved_hover() {
        let mut s = InputState::default();
        assert!(s.apply_event(&InputEvent::PointerDown(at(2.0, 3.0))));
        assert!(s.apply_event(&InputEvent::PointerMoved(at(4.0, 4.0))));
        assert!(s.apply_event(&InputEvent::PointerDragged(at(5.0, 6.0))));
        assert!(s.apply_event(&InputEvent::PointerUp(at(5.0, 6.0))));
        assert!(!s.pressed);
        assert_eq!(s.press_origin, Some(Vec2::new(2.0, 3.0)));
        assert_eq!(s.pointer_pos, Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut s = InputState::default();
        assert!(!s.apply_event(&InputEvent::PointerDown(at(f32::NAN, 0.0))));
        assert!(!s.pressed);
    }
}
