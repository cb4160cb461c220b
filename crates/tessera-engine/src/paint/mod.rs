//! Paint model shared between layout and the shading stage.
//!
//! Colors are linear premultiplied alpha. [`palette`] holds the fixed colors
//! the session is drawn with.

pub mod color;

pub use color::Color;

/// Session colors.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::from_premul(0.102, 0.106, 0.118, 1.0);
    pub const GRID_LINE: Color = Color::from_premul(0.055, 0.059, 0.067, 0.35);

    pub const TOOLBAR: Color = Color::from_premul(0.141, 0.145, 0.161, 1.0);
    pub const TOOLBAR_EDGE: Color = Color::from_premul(0.220, 0.224, 0.247, 1.0);

    pub const BUTTON: Color = Color::from_premul(0.275, 0.286, 0.322, 1.0);
    pub const BUTTON_HOVER: Color = Color::from_premul(0.376, 0.553, 0.839, 1.0);
    pub const BUTTON_PRESSED: Color = Color::from_premul(0.251, 0.392, 0.627, 1.0);
    pub const BUTTON_DISABLED: Color = Color::from_premul(0.094, 0.098, 0.110, 0.5);

    pub const DOCUMENT: Color = Color::from_premul(0.078, 0.082, 0.090, 1.0);
    pub const DOCUMENT_EDGE: Color = Color::from_premul(0.275, 0.286, 0.322, 1.0);
    pub const DOCUMENT_FOCUS: Color = Color::from_premul(0.376, 0.553, 0.839, 1.0);

    pub const TEXT: Color = Color::from_premul(0.863, 0.871, 0.890, 1.0);
    pub const SELECTION: Color = Color::from_premul(0.094, 0.165, 0.282, 0.45);
    pub const CARET: Color = Color::from_premul(0.949, 0.953, 0.961, 1.0);

    pub const PANEL: Color = Color::from_premul(0.165, 0.169, 0.188, 1.0);
    pub const PANEL_EDGE: Color = Color::from_premul(0.376, 0.553, 0.839, 1.0);
    pub const BACKDROP: Color = Color::from_premul(0.0, 0.0, 0.0, 0.45);
}
