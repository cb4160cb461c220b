use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::time::DEFAULT_MAX_CATCH_UP;

/// File looked up when `initialize` is given a directory.
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Engine settings read from `tessera.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub frame: FrameConfig,
    pub history: HistoryConfig,
    pub text: TextConfig,
    pub logging: LogConfig,

    /// Directory relative paths are resolved against. Set by [`EngineConfig::load`].
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Requested frame rate while the session is active.
    pub active_fps: u32,
    /// Requested frame rate once idle.
    pub idle_fps: u32,
    /// Ticks without input before the session counts as idle.
    pub idle_after_ticks: u32,
    /// Most ticks a single `render`/`update` call may fire.
    pub max_catch_up_ticks: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            active_fps: 60,
            idle_fps: 4,
            idle_after_ticks: 8,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Undo depth; the oldest snapshot is dropped beyond it.
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: 256 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// TrueType/OpenType file; the built-in block atlas is used without one.
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { font_path: None, font_size: 14.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `env_logger` filter; falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
}

impl EngineConfig {
    /// Parses TOML text. Values are sanitized.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("parsing engine config")?;
        Ok(config.sanitized())
    }

    /// Reads a config file, or `tessera.toml` inside a directory.
    ///
    /// A directory without the file yields defaults rooted at that directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let (file, base) = if path.is_dir() {
            (path.join(CONFIG_FILE_NAME), path.to_path_buf())
        } else {
            (path.to_path_buf(), path.parent().map(Path::to_path_buf).unwrap_or_default())
        };

        if path.is_dir() && !file.exists() {
            log::info!("no {CONFIG_FILE_NAME} in {}, using defaults", path.display());
            return Ok(Self { base_dir: Some(base), ..Self::default() });
        }

        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("loading {}", file.display()))?;
        config.base_dir = Some(base);
        log::debug!("loaded config from {}", file.display());
        Ok(config)
    }

    /// [`EngineConfig::load`] that logs failures and falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err:#}; using default configuration");
                Self::default()
            }
        }
    }

    /// Clamps values into their usable ranges.
    pub fn sanitized(mut self) -> Self {
        let f = &mut self.frame;
        f.active_fps = f.active_fps.max(1);
        f.idle_fps = f.idle_fps.max(1);
        f.max_catch_up_ticks = f.max_catch_up_ticks.max(1);
        self.history.limit = self.history.limit.max(1);
        self.text.font_size = if self.text.font_size.is_finite() {
            self.text.font_size.clamp(6.0, 96.0)
        } else {
            TextConfig::default().font_size
        };
        self
    }

    /// Font path resolved against the config directory.
    pub fn font_path(&self) -> Option<PathBuf> {
        let path = self.text.font_path.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_defaults() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let c = EngineConfig::from_toml_str("[frame]\nidle_fps = 2\n").unwrap();
        assert_eq!(c.frame.idle_fps, 2);
        assert_eq!(c.frame.active_fps, 60);
        assert_eq!(c.history.limit, 256);
    }

    #[test]
    fn values_are_sanitized() {
        let c = EngineConfig::from_toml_str(
            "[frame]\nactive_fps = 0\nmax_catch_up_ticks = 0\n\
             [history]\nlimit = 0\n[text]\nfont_size = 400.0\n",
        )
        .unwrap();
        assert_eq!(c.frame.active_fps, 1);
        assert_eq!(c.frame.max_catch_up_ticks, 1);
        assert_eq!(c.history.limit, 1);
        assert_eq!(c.text.font_size, 96.0);
    }

    #[test]
    fn unknown_keys_are_errors() {
        assert!(EngineConfig::from_toml_str("[frame]\nfps = 3\n").is_err());
        assert!(EngineConfig::from_toml_str("frame = 3").is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let c = EngineConfig::load_or_default(Path::new("/nonexistent/tessera/config.toml"));
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn directory_is_searched_for_config_file() {
        let dir = std::env::temp_dir().join(format!("tessera-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let defaults = EngineConfig::load(&dir).unwrap();
        assert_eq!(defaults.base_dir.as_deref(), Some(dir.as_path()));
        assert_eq!(defaults.frame, FrameConfig::default());

        std::fs::write(dir.join(CONFIG_FILE_NAME), "[history]\nlimit = 3\n").unwrap();
        let loaded = EngineConfig::load(&dir).unwrap();
        assert_eq!(loaded.history.limit, 3);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn relative_font_path_resolves_against_base() {
        let mut c =
            EngineConfig::from_toml_str("[text]\nfont_path = \"fonts/mono.ttf\"\n").unwrap();
        c.base_dir = Some(PathBuf::from("/assets"));
        assert_eq!(c.font_path(), Some(PathBuf::from("/assets/fonts/mono.ttf")));
    }
}
