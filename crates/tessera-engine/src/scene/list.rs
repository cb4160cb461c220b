use crate::uniforms::Quad;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + quad + uniform record.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub quad: Quad,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, quad: Quad, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem { key: SortKey::new(z, order), quad, cmd });
        self.sorted_dirty = true;
    }

    /// Iterates items back-to-front without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        let items = &self.items;
        self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::uniforms::{quad, GridUniform};

    fn grid(tag: f32) -> DrawCmd {
        DrawCmd::Grid(GridUniform::new(Vec2::zero(), Vec2::zero(), tag, 1.0))
    }

    fn tags(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Grid(g) => g.grid_size,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let q = quad(Rect::new(0.0, 0.0, 1.0, 1.0));
        let mut list = DrawList::new();
        list.push(ZIndex::OVERLAY, q, grid(1.0));
        list.push(ZIndex::BACKGROUND, q, grid(2.0));
        list.push(ZIndex::OVERLAY, q, grid(3.0));
        list.push(ZIndex::CONTENT, q, grid(4.0));
        assert_eq!(tags(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_order() {
        let q = quad(Rect::new(0.0, 0.0, 1.0, 1.0));
        let mut list = DrawList::new();
        list.push(ZIndex::CONTENT, q, grid(1.0));
        list.clear();
        assert!(list.is_empty());
        list.push(ZIndex::CONTENT, q, grid(5.0));
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(tags(&mut list), vec![5.0]);
    }
}
