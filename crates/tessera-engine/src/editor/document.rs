/// Saved document state used by the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub text: String,
    pub cursor: usize,
    pub anchor: usize,
}

/// Multi-line text with a caret and a selection anchor.
///
/// All offsets are byte offsets kept on UTF-8 char boundaries. Columns are
/// counted in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    /// Byte offset of the caret.
    cursor: usize,
    /// Byte offset of the selection anchor. `cursor == anchor` means no selection.
    anchor: usize,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self { text, cursor: end, anchor: end }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// `(lo, hi)` sorted byte range of the selection.
    #[inline]
    pub fn sel_range(&self) -> (usize, usize) {
        (self.cursor.min(self.anchor), self.cursor.max(self.anchor))
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.cursor != self.anchor
    }

    pub fn selected_text(&self) -> Option<&str> {
        let (lo, hi) = self.sel_range();
        (lo != hi).then(|| &self.text[lo..hi])
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { text: self.text.clone(), cursor: self.cursor, anchor: self.anchor }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.text = snapshot.text;
        self.cursor = floor_boundary(&self.text, snapshot.cursor);
        self.anchor = floor_boundary(&self.text, snapshot.anchor);
    }

    // ── caret movement ────────────────────────────────────────────────────

    /// Places the caret at `offset` (snapped to a char boundary). With `extend`
    /// the anchor stays put and the selection grows.
    pub fn set_cursor(&mut self, offset: usize, extend: bool) {
        self.cursor = floor_boundary(&self.text, offset);
        if !extend {
            self.anchor = self.cursor;
        }
    }

    pub fn collapse_selection(&mut self) -> bool {
        let had = self.has_selection();
        self.anchor = self.cursor;
        had
    }

    pub fn move_left(&mut self) {
        if self.has_selection() {
            let left = self.sel_range().0;
            self.set_cursor(left, false);
        } else {
            self.set_cursor(prev_char(&self.text, self.cursor), false);
        }
    }

    pub fn move_right(&mut self) {
        if self.has_selection() {
            let right = self.sel_range().1;
            self.set_cursor(right, false);
        } else {
            self.set_cursor(next_char(&self.text, self.cursor), false);
        }
    }

    /// Moves to the same column on the previous line, or to the start.
    pub fn move_up(&mut self) {
        let (line, col) = self.line_col(self.cursor);
        let target = if line == 0 { 0 } else { self.offset_at(line - 1, col) };
        self.set_cursor(target, false);
    }

    /// Moves to the same column on the next line, or to the end.
    pub fn move_down(&mut self) {
        let (line, col) = self.line_col(self.cursor);
        let target = if line + 1 >= self.line_count() {
            self.text.len()
        } else {
            self.offset_at(line + 1, col)
        };
        self.set_cursor(target, false);
    }

    // ── editing ───────────────────────────────────────────────────────────

    /// Inserts `s` at the caret, replacing the selection if any.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.anchor = self.cursor;
    }

    /// Deletes the selection, or one char before the caret.
    /// Returns `false` when there was nothing to delete.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection().is_some() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char(&self.text, self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        self.anchor = prev;
        true
    }

    /// Removes the selection and returns it.
    pub fn delete_selection(&mut self) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let (lo, hi) = self.sel_range();
        let removed: String = self.text.drain(lo..hi).collect();
        self.cursor = lo;
        self.anchor = lo;
        Some(removed)
    }

    // ── line geometry ─────────────────────────────────────────────────────

    #[inline]
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Lines with their starting byte offsets.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let mut start = 0;
        self.text.split('\n').map(move |line| {
            let at = start;
            start += line.len() + 1;
            (at, line)
        })
    }

    /// `(line, column)` of a byte offset; column counted in chars.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = floor_boundary(&self.text, offset);
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (line, before[line_start..].chars().count())
    }

    /// Byte offset of `(line, column)`, clamped to the document and line end.
    pub fn offset_at(&self, line: usize, col: usize) -> usize {
        let Some((start, text)) = self.lines().nth(line) else {
            return self.text.len();
        };
        start + text.char_indices().nth(col).map_or(text.len(), |(i, _)| i)
    }

    /// Longest line, in chars.
    pub fn max_columns(&self) -> usize {
        self.text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

// ── UTF-8 helpers ─────────────────────────────────────────────────────────

fn floor_boundary(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while !s.is_char_boundary(i) { i -= 1; }
    i
}

/// Step one codepoint boundary backward from `from`.
fn prev_char(s: &str, from: usize) -> usize {
    if from == 0 {
        return 0;
    }
    floor_boundary(s, from - 1)
}

/// Step one codepoint boundary forward from `from`.
fn next_char(s: &str, from: usize) -> usize {
    if from >= s.len() {
        return s.len();
    }
    let mut i = from + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_selection() {
        let mut d = TextDocument::new("hello world");
        d.set_cursor(0, false);
        d.set_cursor(5, true);
        d.insert_str("howdy");
        assert_eq!(d.text(), "howdy world");
        assert_eq!(d.cursor(), 5);
        assert!(!d.has_selection());
    }

    #[test]
    fn multibyte_navigation_stays_on_boundaries() {
        let mut d = TextDocument::new("añ語");
        d.move_left();
        assert_eq!(d.cursor(), 3);
        d.move_left();
        assert_eq!(d.cursor(), 1);
        d.set_cursor(2, false); // inside 'ñ'
        assert_eq!(d.cursor(), 1);
    }

    #[test]
    fn delete_backward_at_start_is_noop() {
        let mut d = TextDocument::new("x");
        d.set_cursor(0, false);
        assert!(!d.delete_backward());
        assert_eq!(d.text(), "x");
    }

    #[test]
    fn line_col_round_trips() {
        let d = TextDocument::new("ab\ncdé\n\nf");
        assert_eq!(d.line_count(), 4);
        let off = d.offset_at(1, 2);
        assert_eq!(&d.text()[off..], "é\n\nf");
        assert_eq!(d.line_col(off), (1, 2));
        // Column past the end clamps to line end.
        assert_eq!(d.offset_at(0, 99), 2);
        assert_eq!(d.offset_at(99, 0), d.text().len());
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut d = TextDocument::new("abcd\nxy\nlonger");
        d.set_cursor(3, false);
        d.move_down();
        assert_eq!(d.line_col(d.cursor()), (1, 2));
        d.move_down();
        assert_eq!(d.line_col(d.cursor()), (2, 2));
        d.move_down();
        assert_eq!(d.cursor(), d.text().len());
        d.set_cursor(1, false);
        d.move_up();
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn snapshot_restore() {
        let mut d = TextDocument::new("one");
        let snap = d.snapshot();
        d.insert_str(" two");
        d.restore(snap.clone());
        assert_eq!(d.snapshot(), snap);
    }
}
