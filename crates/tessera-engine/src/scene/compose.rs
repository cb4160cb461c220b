use core::f32::consts::TAU;

use crate::coords::{Rect, Vec2};
use crate::editor::{Gesture, Mode, Session, Target, BUTTON_RADIUS};
use crate::paint::{palette, Color};
use crate::text::GlyphAtlas;
use crate::uniforms::{
    quad, BoxUniform, DiscUniform, GridUniform, TextUniform, TextureUniform,
};

use super::{DrawCmd, DrawList, TextureId, ZIndex};

/// Texture slot of the toolbar badge.
pub const BADGE_TEXTURE: TextureId = TextureId(0);

const GRID_SIZE: f32 = 24.0;
/// Animation counter steps per badge pulse.
const PULSE_PERIOD: usize = 60;

/// Per-frame values the session does not own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInputs {
    pub anim_counter: usize,
    /// Size of [`BADGE_TEXTURE`] in texels.
    pub badge_size: Vec2,
}

/// Records the draw stream for the current session state.
pub fn compose(list: &mut DrawList, session: &Session, atlas: &GlyphAtlas, frame: FrameInputs) {
    let layout = session.layout();
    let screen = layout.screen;
    let full = Rect::from_origin_size(Vec2::zero(), screen);

    list.push(
        ZIndex::BACKGROUND,
        quad(full),
        DrawCmd::Grid(GridUniform::new(screen, session.view_offset(), GRID_SIZE, 1.0)),
    );

    // Toolbar.
    let toolbar = BoxUniform::new(screen, layout.toolbar, palette::TOOLBAR)
        .with_border(1.0, palette::TOOLBAR_EDGE);
    list.push(
        ZIndex::CHROME,
        quad(layout.toolbar),
        DrawCmd::Box { uniform: toolbar, texture: None },
    );

    let can = [session.history().can_undo(), session.history().can_redo()];
    for ((target, center, label), enabled) in [
        (Target::Undo, layout.undo_center, '<'),
        (Target::Redo, layout.redo_center, '>'),
    ]
    .into_iter()
    .zip(can)
    {
        push_button(list, session, atlas, target, center, label, enabled);
    }

    let badge = TextureUniform::new(screen, layout.badge)
        .with_alpha(pulse(frame.anim_counter))
        .with_mirror_x(session.ticks() % 2 == 1);
    list.push(
        ZIndex::CHROME.above(1),
        quad(layout.badge),
        DrawCmd::Texture { uniform: badge, texture: BADGE_TEXTURE },
    );

    push_document(list, session, atlas);

    if session.mode() == Mode::Browser {
        push_panel(list, session, atlas, frame);
    }
}

/// Badge opacity for an animation counter value.
fn pulse(anim_counter: usize) -> f32 {
    let phase = (anim_counter % PULSE_PERIOD) as f32 / PULSE_PERIOD as f32;
    0.7 + 0.3 * (phase * TAU).cos()
}

fn push_button(
    list: &mut DrawList,
    session: &Session,
    atlas: &GlyphAtlas,
    target: Target,
    center: Vec2,
    label: char,
    enabled: bool,
) {
    let radius = BUTTON_RADIUS;
    let armed = session.gesture() == Some(Gesture::Armed(target));
    let hovered = session.hovered() == target;

    let mut disc = match (enabled, armed, hovered) {
        (false, _, _) => DiscUniform::new(radius, palette::BUTTON_DISABLED),
        (true, true, _) => DiscUniform::new(radius, palette::BUTTON_PRESSED),
        (true, false, true) => DiscUniform::new(radius, palette::BUTTON_HOVER)
            .with_onion(0.55),
        (true, false, false) => DiscUniform::new(radius, palette::BUTTON),
    };
    disc = disc.with_border(1.0, palette::TOOLBAR_EDGE);

    let rect = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
    list.push(ZIndex::CHROME.above(1), quad(rect), DrawCmd::Disc { uniform: disc, texture: None });

    let color = if enabled { palette::TEXT } else { palette::TEXT.with_opacity(0.35) };
    if let Some(g) = atlas.glyph(label) {
        let size = Vec2::from(g.size);
        let at = Rect::from_center_size(center, size);
        push_glyph(list, atlas, ZIndex::CHROME.above(2), at, g.atlas_pos, color);
    }
}

fn push_document(list: &mut DrawList, session: &Session, atlas: &GlyphAtlas) {
    let layout = session.layout();
    let screen = layout.screen;
    let doc = session.document();
    let cell = session.cell();
    let clip = layout.text_clip();
    let origin = layout.text_origin() + session.view_offset();
    if layout.document.is_empty() {
        return;
    }

    let edge = if session.hovered() == Target::Document {
        palette::DOCUMENT_FOCUS
    } else {
        palette::DOCUMENT_EDGE
    };
    let body = BoxUniform::new(screen, layout.document, palette::DOCUMENT)
        .with_corner_radius(6.0)
        .with_border(1.0, edge);
    list.push(
        ZIndex::CONTENT,
        quad(layout.document),
        DrawCmd::Box { uniform: body, texture: None },
    );

    let (sel_lo, sel_hi) = doc.sel_range();

    for (row, (start, line)) in doc.lines().enumerate() {
        let y = origin.y + row as f32 * cell.y;
        if y + cell.y < clip.origin.y {
            continue;
        }
        if y > clip.max().y {
            break;
        }

        // Selection band for the part of this line inside the selection.
        let end = start + line.len();
        if sel_lo != sel_hi && sel_lo <= end && sel_hi > start {
            let c0 = line[..sel_lo.max(start) - start].chars().count();
            let c1 = line[..sel_hi.min(end) - start].chars().count();
            // The selection covers the line break: show a half cell past the end.
            let tail = if sel_hi > end { 0.5 } else { 0.0 };
            let band = Rect::new(
                origin.x + c0 as f32 * cell.x,
                y,
                ((c1 - c0) as f32 + tail) * cell.x,
                cell.y,
            );
            if let Some(band) = band.intersect(clip) {
                let u = BoxUniform::new(screen, band, palette::SELECTION);
                let cmd = DrawCmd::Box { uniform: u, texture: None };
                list.push(ZIndex::CONTENT.above(1), quad(band), cmd);
            }
        }

        for (col, ch) in line.chars().enumerate() {
            let Some(g) = atlas.glyph(ch) else { continue };
            let cell_origin = Vec2::new(origin.x + col as f32 * cell.x, y);
            let at = Rect::from_origin_size(cell_origin + g.offset, g.size.into());
            if contains_rect(clip, at) {
                push_glyph(list, atlas, ZIndex::CONTENT.above(2), at, g.atlas_pos, palette::TEXT);
            }
        }
    }

    if session.mode() == Mode::Edit && session.caret_visible() {
        let (line, col) = doc.line_col(doc.cursor());
        let caret = Rect::new(
            origin.x + col as f32 * cell.x - 1.0,
            origin.y + line as f32 * cell.y,
            2.0,
            cell.y,
        );
        if let Some(caret) = caret.intersect(clip) {
            let u = BoxUniform::new(screen, caret, palette::CARET);
            let cmd = DrawCmd::Box { uniform: u, texture: None };
            list.push(ZIndex::CONTENT.above(3), quad(caret), cmd);
        }
    }
}

fn push_panel(list: &mut DrawList, session: &Session, atlas: &GlyphAtlas, frame: FrameInputs) {
    let layout = session.layout();
    let screen = layout.screen;
    let full = Rect::from_origin_size(Vec2::zero(), screen);
    let panel = layout.panel;

    let backdrop = BoxUniform::new(screen, full, palette::BACKDROP);
    list.push(ZIndex::OVERLAY, quad(full), DrawCmd::Box { uniform: backdrop, texture: None });

    let body = BoxUniform::new(screen, panel, palette::PANEL)
        .with_corner_radius(10.0)
        .with_border(2.0, palette::PANEL_EDGE)
        .with_checker(Vec2::splat(12.0));
    list.push(ZIndex::OVERLAY.above(1), quad(panel), DrawCmd::Box { uniform: body, texture: None });

    let title = panel.origin + Vec2::splat(16.0);
    for (i, ch) in "Open".chars().enumerate() {
        if let Some(g) = atlas.glyph(ch) {
            let cell_origin = title + Vec2::new(i as f32 * atlas.advance(), 0.0);
            let at = Rect::from_origin_size(cell_origin + g.offset, g.size.into());
            push_glyph(list, atlas, ZIndex::OVERLAY.above(2), at, g.atlas_pos, palette::TEXT);
        }
    }

    // Two previews of the badge: a mirrored tile and a spinning disc.
    let side = (panel.size.y * 0.4).min(panel.size.x * 0.3);
    let center_y = panel.origin.y + panel.size.y * 0.6;
    let tile = Rect::from_center_size(
        Vec2::new(panel.origin.x + panel.size.x * 0.3, center_y),
        Vec2::splat(side),
    );
    let tile_u = BoxUniform::new(screen, tile, Color::from_premul(1.0, 1.0, 1.0, 1.0))
        .with_corner_radius(6.0)
        .with_mirror(true, false)
        .with_texture(frame.badge_size);
    list.push(
        ZIndex::OVERLAY.above(2),
        quad(tile),
        DrawCmd::Box { uniform: tile_u, texture: Some(BADGE_TEXTURE) },
    );

    let radius = side * 0.5;
    let spin = (frame.anim_counter % 360) as f32 * (TAU / 360.0);
    let disc = DiscUniform::new(radius, Color::from_premul(1.0, 1.0, 1.0, 1.0))
        .with_border(2.0, palette::PANEL_EDGE)
        .with_rotation(spin)
        .with_texture(frame.badge_size);
    let disc_rect = Rect::from_center_size(
        Vec2::new(panel.origin.x + panel.size.x * 0.7, center_y),
        Vec2::splat(side),
    );
    list.push(
        ZIndex::OVERLAY.above(2),
        quad(disc_rect),
        DrawCmd::Disc { uniform: disc, texture: Some(BADGE_TEXTURE) },
    );
}

fn push_glyph(
    list: &mut DrawList,
    atlas: &GlyphAtlas,
    z: ZIndex,
    at: Rect,
    atlas_pos: [f32; 2],
    color: Color,
) {
    let u = TextUniform::new(atlas.size(), atlas_pos, at.size.to_array(), color);
    list.push(z, quad(at), DrawCmd::Text(u));
}

fn contains_rect(outer: Rect, inner: Rect) -> bool {
    let (omax, imax) = (outer.max(), inner.max());
    inner.origin.x >= outer.origin.x
        && inner.origin.y >= outer.origin.y
        && imax.x <= omax.x
        && imax.y <= omax.y
}
