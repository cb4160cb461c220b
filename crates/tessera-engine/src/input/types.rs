use std::fmt;

use crate::coords::Vec2;

/// Named key identifier with a stable numeric identity across the C boundary.
///
/// The discriminants are part of the ABI and must never change.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyCode {
    Escape = 0,
    Return = 1,
    Delete = 2,
    Up = 3,
    Right = 4,
    Down = 5,
    Left = 6,
    Space = 7,
    Tab = 8,
}

impl KeyCode {
    /// Every key in ABI order.
    pub const ALL: [KeyCode; 9] = [
        KeyCode::Escape,
        KeyCode::Return,
        KeyCode::Delete,
        KeyCode::Up,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Space,
        KeyCode::Tab,
    ];

    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Maps a boundary code to a key. Codes outside `0..=8` yield `None`.
    #[inline]
    pub fn from_u32(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

/// Returned when a boundary code is not a [`KeyCode`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown key code {0}")]
pub struct UnknownKeyCode(pub u32);

impl TryFrom<u32> for KeyCode {
    type Error = UnknownKeyCode;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_u32(code).ok_or(UnknownKeyCode(code))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Pointer position in buffer pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Scroll delta in pixels. Positive `dy` scrolls content up (reveals below).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WheelDelta {
    pub dx: f32,
    pub dy: f32,
}

/// Printable input: a short UTF-8 fragment, possibly several code points.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEvent {
    pub text: String,
}

/// Host-agnostic input events, one per boundary call.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved with no button held (hover). Allowed at any time.
    PointerMoved(PointerEvent),
    /// Primary button pressed.
    PointerDown(PointerEvent),
    /// Pointer moved with the primary button held.
    PointerDragged(PointerEvent),
    /// Primary button released.
    PointerUp(PointerEvent),
    Wheel(WheelDelta),
    Text(TextEvent),
    Key(KeyCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_codes_are_stable() {
        for (i, key) in KeyCode::ALL.iter().enumerate() {
            assert_eq!(key.code(), i as u32);
            assert_eq!(KeyCode::from_u32(i as u32), Some(*key));
        }
        assert_eq!(KeyCode::Tab.code(), 8);
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(KeyCode::from_u32(9), None);
        assert_eq!(KeyCode::try_from(u32::MAX), Err(UnknownKeyCode(u32::MAX)));
    }
}
