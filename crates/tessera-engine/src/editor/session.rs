use crate::coords::Vec2;
use crate::input::KeyCode;

use super::document::TextDocument;
use super::history::History;
use super::layout::{Layout, Target};

/// Spaces inserted for [`KeyCode::Tab`].
const TAB: &str = "    ";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    /// The open panel covers the editor and takes all pointer input.
    Browser,
}

/// A pointer gesture in progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Pressed on a toolbar button; fires on release over the same button.
    Armed(Target),
    /// Dragging a text selection.
    Selecting,
}

/// Editing state mutated by input and lifecycle calls.
///
/// Methods return `true` when the call changed something or was consumed,
/// which the bridge reports to the host as "handled".
#[derive(Debug)]
pub struct Session {
    document: TextDocument,
    history: History,
    mode: Mode,
    open_requested: bool,
    layout: Layout,
    /// Text cell size (advance, line height) from the glyph atlas.
    cell: Vec2,
    /// Scroll offset applied to the document text and the grid. Never positive.
    view_offset: Vec2,
    hovered: Target,
    gesture: Option<Gesture>,
    caret_visible: bool,
    ticks: u64,
    last_activity: Option<u64>,
}

impl Session {
    pub fn new(cell: Vec2, history_limit: usize) -> Self {
        Self {
            document: TextDocument::default(),
            history: History::new(history_limit),
            mode: Mode::Edit,
            open_requested: false,
            layout: Layout::default(),
            cell: Vec2::new(cell.x.max(1.0), cell.y.max(1.0)),
            view_offset: Vec2::zero(),
            hovered: Target::Nothing,
            gesture: None,
            caret_visible: true,
            ticks: 0,
            last_activity: None,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn cell(&self) -> Vec2 {
        self.cell
    }

    #[inline]
    pub fn view_offset(&self) -> Vec2 {
        self.view_offset
    }

    #[inline]
    pub fn hovered(&self) -> Target {
        self.hovered
    }

    #[inline]
    pub fn gesture(&self) -> Option<Gesture> {
        self.gesture
    }

    #[inline]
    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ── frame hooks ───────────────────────────────────────────────────────

    /// Adopts the size of the frame being rendered. Hit testing uses the last
    /// size until the next render.
    pub fn set_viewport(&mut self, screen: Vec2) {
        if screen != self.layout.screen {
            self.layout = Layout::new(screen);
            self.clamp_view();
        }
    }

    /// Applies requests queued since the last frame. Returns `true` when the
    /// open panel appeared.
    pub fn drain_requests(&mut self) -> bool {
        if !std::mem::take(&mut self.open_requested) || self.mode == Mode::Browser {
            return false;
        }
        self.mode = Mode::Browser;
        self.gesture = None;
        self.hovered = Target::Nothing;
        log::debug!("open panel shown");
        true
    }

    /// One logical tick.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.caret_visible = !self.caret_visible;
        log::trace!("session tick {}", self.ticks);
    }

    /// Records that a handled event happened at the current tick.
    pub fn mark_active(&mut self) {
        self.last_activity = Some(self.ticks);
    }

    /// Whether the host should render at its active rate.
    pub fn is_active(&self, idle_after_ticks: u32) -> bool {
        if self.mode == Mode::Browser || self.gesture.is_some() || self.open_requested {
            return true;
        }
        self.last_activity
            .is_some_and(|at| self.ticks.saturating_sub(at) < u64::from(idle_after_ticks))
    }

    // ── pointer ───────────────────────────────────────────────────────────

    pub fn hover(&mut self, p: Vec2) -> bool {
        let target = self.layout.hit(p, self.mode);
        let changed = target != self.hovered;
        self.hovered = target;
        changed
    }

    pub fn press(&mut self, p: Vec2) -> bool {
        let target = self.layout.hit(p, self.mode);
        self.hovered = target;
        self.gesture = None;
        match target {
            Target::Undo if self.history.can_undo() => {
                self.gesture = Some(Gesture::Armed(target));
                true
            }
            Target::Redo if self.history.can_redo() => {
                self.gesture = Some(Gesture::Armed(target));
                true
            }
            Target::Document => {
                let offset = self.offset_at_point(p);
                self.document.set_cursor(offset, false);
                self.gesture = Some(Gesture::Selecting);
                self.show_caret();
                true
            }
            Target::Backdrop => {
                self.close_panel();
                true
            }
            Target::Panel => true,
            Target::Undo | Target::Redo | Target::Toolbar | Target::Nothing => false,
        }
    }

    pub fn drag(&mut self, p: Vec2) -> bool {
        match self.gesture {
            Some(Gesture::Selecting) => {
                let before = self.document.cursor();
                let offset = self.offset_at_point(p);
                self.document.set_cursor(offset, true);
                self.show_caret();
                self.document.cursor() != before
            }
            Some(Gesture::Armed(_)) => self.hover(p),
            None => false,
        }
    }

    pub fn release(&mut self, p: Vec2) -> bool {
        match self.gesture.take() {
            Some(Gesture::Armed(target)) => {
                if self.layout.hit(p, self.mode) == target {
                    match target {
                        Target::Undo => {
                            self.undo();
                        }
                        Target::Redo => {
                            self.redo();
                        }
                        _ => {}
                    }
                }
                true
            }
            Some(Gesture::Selecting) => true,
            None => false,
        }
    }

    /// Pans the view. Wheel deltas follow the usual convention: positive `dy`
    /// scrolls toward later lines.
    pub fn scroll(&mut self, dx: f32, dy: f32) -> bool {
        if self.mode == Mode::Browser || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        let before = self.view_offset;
        self.view_offset = self.view_offset - Vec2::new(dx, dy);
        self.clamp_view();
        self.view_offset != before
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    /// Inserts a typed fragment. Control characters are removed.
    pub fn type_text(&mut self, text: &str) -> bool {
        if self.mode == Mode::Browser {
            return false;
        }
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return false;
        }
        self.insert(&clean);
        true
    }

    pub fn special_key(&mut self, key: KeyCode) -> bool {
        if self.mode == Mode::Browser {
            return match key {
                KeyCode::Escape | KeyCode::Return => self.close_panel(),
                _ => false,
            };
        }
        match key {
            KeyCode::Escape => self.document.collapse_selection(),
            KeyCode::Return => {
                self.insert("\n");
                true
            }
            KeyCode::Space => {
                self.insert(" ");
                true
            }
            KeyCode::Tab => {
                self.insert(TAB);
                true
            }
            KeyCode::Delete => self.delete_backward(),
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                match key {
                    KeyCode::Left => self.document.move_left(),
                    KeyCode::Right => self.document.move_right(),
                    KeyCode::Up => self.document.move_up(),
                    _ => self.document.move_down(),
                }
                self.show_caret();
                self.scroll_to_caret();
                true
            }
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Queues the open panel for the next frame.
    pub fn request_open(&mut self) {
        self.open_requested = true;
    }

    /// Hides the open panel. Returns `false` when it was not showing.
    pub fn close_panel(&mut self) -> bool {
        if self.mode != Mode::Browser {
            return false;
        }
        self.mode = Mode::Edit;
        self.gesture = None;
        log::debug!("open panel closed");
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.undo(self.document.snapshot()) else {
            return false;
        };
        self.document.restore(prev);
        self.after_edit();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(self.document.snapshot()) else {
            return false;
        };
        self.document.restore(next);
        self.after_edit();
        true
    }

    pub fn copy(&self) -> Option<String> {
        self.document.selected_text().map(str::to_owned)
    }

    pub fn cut(&mut self) -> Option<String> {
        if !self.document.has_selection() {
            return None;
        }
        self.history.record(self.document.snapshot());
        let removed = self.document.delete_selection();
        self.after_edit();
        removed
    }

    /// Inserts clipboard text verbatim (line breaks included).
    pub fn paste(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.insert(text);
        true
    }

    // ── private helpers ───────────────────────────────────────────────────

    fn insert(&mut self, text: &str) {
        self.history.record(self.document.snapshot());
        self.document.insert_str(text);
        self.after_edit();
    }

    fn delete_backward(&mut self) -> bool {
        let before = self.document.snapshot();
        if !self.document.delete_backward() {
            return false;
        }
        self.history.record(before);
        self.after_edit();
        true
    }

    fn after_edit(&mut self) {
        self.show_caret();
        self.clamp_view();
        self.scroll_to_caret();
    }

    fn show_caret(&mut self) {
        self.caret_visible = true;
    }

    /// Text offset under a screen point.
    fn offset_at_point(&self, p: Vec2) -> usize {
        let local = p - self.layout.text_origin() - self.view_offset;
        let max_line = self.document.line_count().saturating_sub(1);
        let line = (local.y / self.cell.y).floor().clamp(0.0, max_line as f32) as usize;
        let col = (local.x / self.cell.x).round().max(0.0) as usize;
        self.document.offset_at(line, col)
    }

    /// Scroll extent of the content beyond the visible text area.
    fn max_scroll(&self) -> Vec2 {
        let clip = self.layout.text_clip();
        let content = Vec2::new(
            (self.document.max_columns() + 1) as f32 * self.cell.x,
            self.document.line_count() as f32 * self.cell.y,
        );
        Vec2::new(
            (content.x - clip.size.x).max(0.0),
            (content.y - clip.size.y).max(0.0),
        )
    }

    fn clamp_view(&mut self) {
        let max = self.max_scroll();
        self.view_offset = Vec2::new(
            self.view_offset.x.clamp(-max.x, 0.0),
            self.view_offset.y.clamp(-max.y, 0.0),
        );
    }

    /// Adjusts the view so the caret cell is inside the text area.
    fn scroll_to_caret(&mut self) {
        let clip = self.layout.text_clip();
        let (line, col) = self.document.line_col(self.document.cursor());
        let text_origin = self.layout.text_origin();
        let cell = Vec2::new(col as f32 * self.cell.x, line as f32 * self.cell.y);
        let top_left = text_origin + self.view_offset + cell;
        let bottom_right = top_left + self.cell;

        let mut off = self.view_offset;
        if top_left.y < clip.origin.y {
            off.y += clip.origin.y - top_left.y;
        } else if bottom_right.y > clip.max().y {
            off.y -= bottom_right.y - clip.max().y;
        }
        if top_left.x < clip.origin.x {
            off.x += clip.origin.x - top_left.x;
        } else if bottom_right.x > clip.max().x {
            off.x -= bottom_right.x - clip.max().x;
        }
        self.view_offset = off;
        self.clamp_view();
    }
}
