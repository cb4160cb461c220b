//! Host lifecycle requests: open, undo/redo and clipboard exchange.

use super::Engine;

impl Engine {
    /// Queues the open panel. It appears on the next `render` or `update`.
    pub fn open(&mut self) {
        log::debug!("open requested");
        self.session.request_open();
        self.session.mark_active();
    }

    /// Restores the previous snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> bool {
        let changed = self.session.undo();
        if changed {
            self.session.mark_active();
        }
        changed
    }

    /// Re-applies an undone snapshot. No-op at the end of history.
    pub fn redo(&mut self) -> bool {
        let changed = self.session.redo();
        if changed {
            self.session.mark_active();
        }
        changed
    }

    /// Removes and returns the selection. `None` without one.
    pub fn cut(&mut self) -> Option<String> {
        let text = self.session.cut()?;
        self.session.mark_active();
        Some(text)
    }

    /// Returns the selection without changing anything.
    pub fn copy(&self) -> Option<String> {
        self.session.copy()
    }

    /// Inserts clipboard text at the caret, replacing the selection.
    /// `None` and empty text are no-ops.
    pub fn paste(&mut self, text: Option<&str>) -> bool {
        let Some(text) = text else { return false };
        let changed = self.session.paste(text);
        if changed {
            self.session.mark_active();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use crate::Engine;

    fn select_all(e: &mut Engine, text: &str) {
        e.paste(Some(text));
        let o = e.session().layout().text_origin();
        assert!(e.touch_down(o.x + 1.0, o.y + 1.0));
        let end = o.x + text.chars().count() as f32 * e.session().cell().x + 1.0;
        e.touch_dragged(end, o.y + 1.0);
        e.touch_up(end, o.y + 1.0);
    }

    // ── clipboard ─────────────────────────────────────────────────────────

    #[test]
    fn cut_then_paste_round_trips() {
        let mut e = Engine::initialize(None);
        select_all(&mut e, "clip me");
        let cut = e.cut();
        assert_eq!(cut.as_deref(), Some("clip me"));
        assert_eq!(e.session().document().text(), "");
        assert!(e.paste(cut.as_deref()));
        assert_eq!(e.session().document().text(), "clip me");
    }

    #[test]
    fn copy_does_not_mutate() {
        let mut e = Engine::initialize(None);
        select_all(&mut e, "copy");
        assert_eq!(e.copy().as_deref(), Some("copy"));
        assert_eq!(e.session().document().text(), "copy");
    }

    #[test]
    fn clipboard_without_selection_is_none() {
        let mut e = Engine::initialize(None);
        e.paste(Some("abc"));
        assert_eq!(e.copy(), None);
        assert_eq!(e.cut(), None);
        assert!(!e.paste(None));
        assert!(!e.paste(Some("")));
    }

    // ── history ───────────────────────────────────────────────────────────

    #[test]
    fn undo_redo_are_inverse() {
        let mut e = Engine::initialize(None);
        e.key_down("a");
        e.key_down("b");
        let after = e.session().document().clone();
        assert!(e.undo());
        assert_eq!(e.session().document().text(), "a");
        assert!(e.redo());
        assert_eq!(e.session().document(), &after);
    }

    #[test]
    fn history_boundaries_are_idempotent() {
        let mut e = Engine::initialize(None);
        let empty = e.session().document().clone();
        assert!(!e.undo());
        assert_eq!(e.session().document(), &empty);
        e.key_down("x");
        assert!(!e.redo());
        assert!(e.undo());
        assert!(!e.undo());
        assert_eq!(e.session().document(), &empty);
    }

    #[test]
    fn history_limit_is_respected() {
        let mut config = crate::EngineConfig::default();
        config.history.limit = 2;
        let mut e = Engine::with_config(config);
        for s in ["a", "b", "c"] {
            e.key_down(s);
        }
        assert!(e.undo());
        assert!(e.undo());
        assert!(!e.undo());
        assert_eq!(e.session().document().text(), "a");
    }

    // ── open ──────────────────────────────────────────────────────────────

    #[test]
    fn open_is_deferred_to_next_frame() {
        let mut e = Engine::initialize(None);
        e.open();
        assert_eq!(e.session().mode(), crate::editor::Mode::Edit);
        e.update();
        assert_eq!(e.session().mode(), crate::editor::Mode::Browser);
    }
}
