use crate::coords::{Rect, Vec2};

use super::session::Mode;

/// Frame size assumed until the first `render` reports a real one.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

pub const TOOLBAR_HEIGHT: f32 = 36.0;
pub const BUTTON_RADIUS: f32 = 11.0;
const MARGIN: f32 = 8.0;
const BADGE_SIZE: f32 = 20.0;
/// Text inset inside the document box.
pub const DOCUMENT_PADDING: f32 = 10.0;

/// What a screen point lands on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Nothing,
    /// Toolbar strip outside any button.
    Toolbar,
    Undo,
    Redo,
    Document,
    /// Open panel body.
    Panel,
    /// Dimmed area around the open panel.
    Backdrop,
}

/// Screen regions for one frame size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub screen: Vec2,
    pub toolbar: Rect,
    pub undo_center: Vec2,
    pub redo_center: Vec2,
    pub badge: Rect,
    pub document: Rect,
    pub panel: Rect,
}

impl Layout {
    pub fn new(screen: Vec2) -> Self {
        let screen = Vec2::new(screen.x.max(1.0), screen.y.max(1.0));
        let mid = TOOLBAR_HEIGHT * 0.5;

        let document = Rect::new(
            MARGIN,
            TOOLBAR_HEIGHT + MARGIN,
            (screen.x - 2.0 * MARGIN).max(0.0),
            (screen.y - TOOLBAR_HEIGHT - 2.0 * MARGIN).max(0.0),
        );

        let panel_size = Vec2::new(
            (screen.x * 0.6).clamp(120.0_f32.min(screen.x), 480.0),
            (screen.y * 0.5).clamp(90.0_f32.min(screen.y), 320.0),
        );

        Self {
            screen,
            toolbar: Rect::new(0.0, 0.0, screen.x, TOOLBAR_HEIGHT),
            undo_center: Vec2::new(MARGIN + BUTTON_RADIUS + 4.0, mid),
            redo_center: Vec2::new(MARGIN + 3.0 * BUTTON_RADIUS + 12.0, mid),
            badge: Rect::new(
                screen.x - MARGIN - BADGE_SIZE,
                mid - BADGE_SIZE * 0.5,
                BADGE_SIZE,
                BADGE_SIZE,
            ),
            document,
            panel: Rect::from_center_size(screen * 0.5, panel_size),
        }
    }

    /// Origin of the first text cell, before scrolling.
    #[inline]
    pub fn text_origin(&self) -> Vec2 {
        self.document.origin + Vec2::splat(DOCUMENT_PADDING)
    }

    /// Area text may be drawn into.
    #[inline]
    pub fn text_clip(&self) -> Rect {
        self.document.inset(DOCUMENT_PADDING * 0.5)
    }

    pub fn hit(&self, p: Vec2, mode: Mode) -> Target {
        if mode == Mode::Browser {
            return if self.panel.contains(p) { Target::Panel } else { Target::Backdrop };
        }
        if (p - self.undo_center).length() <= BUTTON_RADIUS {
            return Target::Undo;
        }
        if (p - self.redo_center).length() <= BUTTON_RADIUS {
            return Target::Redo;
        }
        if self.toolbar.contains(p) {
            return Target::Toolbar;
        }
        if self.document.contains(p) {
            return Target::Document;
        }
        Target::Nothing
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_hit_inside_radius() {
        let l = Layout::default();
        assert_eq!(l.hit(l.undo_center, Mode::Edit), Target::Undo);
        let near_edge = l.redo_center + Vec2::new(BUTTON_RADIUS - 1.0, 0.0);
        assert_eq!(l.hit(near_edge, Mode::Edit), Target::Redo);
        assert_eq!(l.hit(Vec2::new(400.0, 5.0), Mode::Edit), Target::Toolbar);
        assert_eq!(l.hit(Vec2::new(400.0, 300.0), Mode::Edit), Target::Document);
    }

    #[test]
    fn browser_mode_splits_panel_and_backdrop() {
        let l = Layout::default();
        assert_eq!(l.hit(l.panel.center(), Mode::Browser), Target::Panel);
        assert_eq!(l.hit(l.undo_center, Mode::Browser), Target::Backdrop);
    }

    #[test]
    fn tiny_viewport_stays_finite() {
        let l = Layout::new(Vec2::new(0.0, 0.0));
        assert!(l.document.is_finite());
        assert!(l.panel.is_finite());
        assert!(l.panel.size.x <= l.screen.x);
    }
}
