//! The engine instance and its frame driver.
//!
//! One [`Engine`] holds everything a host session needs: configuration, the
//! tick clock, input and editing state, the glyph atlas and textures, and a
//! reusable draw list. Input methods live in `bridge`, lifecycle requests in
//! `lifecycle`.

mod bridge;
mod config;
mod error;
mod lifecycle;

pub use config::{
    EngineConfig, FrameConfig, HistoryConfig, LogConfig, TextConfig, CONFIG_FILE_NAME,
};
pub use error::EngineError;

use std::path::Path;

use crate::coords::Vec2;
use crate::editor::Session;
use crate::input::InputState;
use crate::paint::palette;
use crate::raster::{rasterize, Canvas, Resources, Texture};
use crate::scene::{compose, DrawList, FrameInputs, BADGE_TEXTURE};
use crate::text::GlyphAtlas;
use crate::time::{MonotonicTime, TickBatch, TickClock, TimeSource};

/// Outcome of one [`Engine::render`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameReport {
    /// Ticks fired before drawing.
    pub ticks: u32,
    /// Whole ticks discarded by the catch-up bound.
    pub dropped_ticks: u64,
    /// `false` when the frame was skipped and the buffer left untouched.
    pub drawn: bool,
    /// Draw items shaded.
    pub primitives: usize,
    /// Draw items skipped for invalid geometry.
    pub skipped: usize,
}

/// Rendering-and-input engine driven by a host.
pub struct Engine {
    config: EngineConfig,
    clock: TickClock,
    time: Box<dyn TimeSource>,
    input: InputState,
    session: Session,
    atlas: GlyphAtlas,
    textures: Vec<Texture>,
    draw_list: DrawList,
    frames: u64,
}

impl Engine {
    /// Builds an engine from an optional config file or directory.
    ///
    /// Total: a missing or broken config logs a warning and uses defaults.
    /// Each call returns an independent instance.
    pub fn initialize(config_path: Option<&Path>) -> Self {
        let config = match config_path {
            Some(path) => EngineConfig::load_or_default(path),
            None => EngineConfig::default(),
        };
        Self::with_config(config)
    }

    /// Engine on the monotonic wall clock.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_time_source(config, MonotonicTime::new())
    }

    /// Engine reading time from `time`. Tests drive it with
    /// [`crate::time::ManualTime`].
    pub fn with_time_source(config: EngineConfig, time: impl TimeSource + 'static) -> Self {
        let config = config.sanitized();
        let atlas = load_atlas(&config);
        let session = Session::new(
            Vec2::new(atlas.advance(), atlas.line_height()),
            config.history.limit,
        );

        log::info!(
            "engine initialized (active {} fps, idle {} fps, catch-up {} ticks)",
            config.frame.active_fps,
            config.frame.idle_fps,
            config.frame.max_catch_up_ticks,
        );

        Self {
            clock: TickClock::new(config.frame.max_catch_up_ticks),
            time: Box::new(time),
            input: InputState::default(),
            session,
            atlas,
            textures: vec![Texture::badge()],
            draw_list: DrawList::new(),
            frames: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Frames drawn so far (skipped frames excluded).
    #[inline]
    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Frame rate the host should drive `render` at right now.
    pub fn target_frame_rate(&self) -> u32 {
        let frame = &self.config.frame;
        if self.input.pressed || self.session.is_active(frame.idle_after_ticks) {
            frame.active_fps
        } else {
            frame.idle_fps
        }
    }

    /// Advances time and draws the session into `buffer`
    /// (`width * height` RGBA8 premultiplied pixels, row-major).
    ///
    /// An invalid buffer skips the draw: the buffer is left as it was and
    /// [`FrameReport::drawn`] is `false`. Ticks due still fire.
    pub fn render(
        &mut self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        anim_counter: usize,
    ) -> FrameReport {
        let batch = self.advance();
        let mut report = FrameReport {
            ticks: batch.count,
            dropped_ticks: batch.dropped,
            ..FrameReport::default()
        };

        let mut canvas = match Canvas::new(buffer, width, height) {
            Ok(canvas) => canvas,
            Err(err) => {
                log::error!("skipping frame: {err}");
                return report;
            }
        };

        self.session.set_viewport(Vec2::new(width as f32, height as f32));
        self.draw_list.clear();
        let badge_size = self.textures.get(BADGE_TEXTURE.0).map_or(Vec2::zero(), Texture::size);
        compose(
            &mut self.draw_list,
            &self.session,
            &self.atlas,
            FrameInputs { anim_counter, badge_size },
        );

        canvas.clear(palette::BACKGROUND);
        let stats = rasterize(
            &mut canvas,
            &mut self.draw_list,
            Resources { atlas: &self.atlas, textures: &self.textures },
        );

        self.frames += 1;
        report.drawn = true;
        report.primitives = stats.drawn;
        report.skipped = stats.skipped;
        log::trace!("frame {} drawn: {report:?}", self.frames);
        report
    }

    /// Advances time without drawing. Returns the ticks fired.
    pub fn update(&mut self) -> u32 {
        self.advance().count
    }

    /// Applies queued requests and runs the ticks that are due.
    fn advance(&mut self) -> TickBatch {
        if self.session.drain_requests() {
            self.input.cancel_press();
        }
        let batch = self.clock.advance(self.time.now());
        for _ in batch.indices() {
            self.session.tick();
        }
        batch
    }
}

fn load_atlas(config: &EngineConfig) -> GlyphAtlas {
    let px = config.text.font_size;
    let Some(path) = config.font_path() else {
        return GlyphAtlas::builtin(px);
    };
    match GlyphAtlas::load(&path, px) {
        Ok(atlas) => atlas,
        Err(err) => {
            log::warn!("{err:#}; using built-in glyphs");
            GlyphAtlas::builtin(px)
        }
    }
}
