//! Engine configuration resource.
//!
//! Holds the canvas request (size, aspect ratio), background fill, the
//! collision ignore table and loop pacing. Defaults are safe for headless
//! startup; an INI file can override any of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [canvas]
//! width = 450
//! height = 800
//! aspect_ratio = 0.5625
//! # hex digits; '#' starts a comment in INI files
//! background_color = 4ec0ca
//!
//! [engine]
//! target_fps = 60
//! debug = false
//!
//! [ignore_collisions]
//! ground = Pipe, Ceiling
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::color::{Color, ColorParseError};
use crate::resources::ignorecollisions::IgnoreCollisions;

/// Default safe values for startup
const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

const IGNORE_SECTION: &str = "ignore_collisions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to save config file {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid background_color: {0}")]
    Color(#[from] ColorParseError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Requested width in pixels.
    pub width: f32,
    /// Requested height in pixels.
    pub height: f32,
    /// Width / height. `None` derives it from `width` and `height`.
    pub aspect_ratio: Option<f32>,
    /// Fill painted every frame after clearing; `None` leaves the surface cleared.
    pub background_color: Option<Color>,
    pub ignore_collisions: IgnoreCollisions,
    /// Pacing used by real-time loops and the stepped clock.
    pub target_fps: u32,
    /// Start with debug drawing on.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            aspect_ratio: None,
            background_color: None,
            ignore_collisions: IgnoreCollisions::new(),
            target_fps: DEFAULT_TARGET_FPS,
            debug: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_ignore_collisions(mut self, ignore: IgnoreCollisions) -> Self {
        self.ignore_collisions = ignore;
        self
    }

    /// Effective aspect ratio: the configured one or `width / height`.
    pub fn effective_aspect_ratio(&self) -> f32 {
        self.aspect_ratio.unwrap_or(self.width / self.height)
    }

    /// Frame budget in milliseconds for `target_fps`.
    pub fn frame_budget_ms(&self) -> f64 {
        1000.0 / self.target_fps.max(1) as f64
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or unparsable numeric values retain their current values. A
    /// malformed background color is an error.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        // Case-sensitive so collision tags keep their spelling.
        let mut config = Ini::new_cs();
        config
            .load(&self.config_path)
            .map_err(|reason| ConfigError::Load {
                path: self.config_path.clone(),
                reason,
            })?;
        self.apply_ini(&config)?;

        info!(
            "Loaded config: {}x{} canvas, aspect={:?}, fps={}, debug={}, {} ignore rule(s)",
            self.width,
            self.height,
            self.aspect_ratio,
            self.target_fps,
            self.debug,
            self.ignore_collisions.sorted_rules().len()
        );

        Ok(())
    }

    /// Parse configuration from INI text; same rules as [`load_from_file`](Self::load_from_file).
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new_cs();
        config.read(text.to_string()).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), ConfigError> {
        // [canvas] section
        if let Some(width) = config.getfloat("canvas", "width").ok().flatten() {
            self.width = width as f32;
        }
        if let Some(height) = config.getfloat("canvas", "height").ok().flatten() {
            self.height = height as f32;
        }
        if let Some(aspect) = config.getfloat("canvas", "aspect_ratio").ok().flatten() {
            self.aspect_ratio = Some(aspect as f32);
        }
        if let Some(color) = config.get("canvas", "background_color") {
            self.background_color = Some(Color::from_hex(&color)?);
        }

        // [engine] section
        if let Some(fps) = config.getuint("engine", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(debug) = config.getbool("engine", "debug").ok().flatten() {
            self.debug = debug;
        }

        // [ignore_collisions] section: tag = tag, tag, ...
        if let Some(section) = config.get_map_ref().get(IGNORE_SECTION) {
            for (tag, value) in section {
                let ignored = value
                    .as_deref()
                    .unwrap_or_default()
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty());
                self.ignore_collisions.ignore(tag.as_str(), ignored);
            }
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new_cs();

        // [canvas] section
        config.set("canvas", "width", Some(self.width.to_string()));
        config.set("canvas", "height", Some(self.height.to_string()));
        if let Some(aspect) = self.aspect_ratio {
            config.set("canvas", "aspect_ratio", Some(aspect.to_string()));
        }
        if let Some(color) = self.background_color {
            config.set("canvas", "background_color", Some(color.hex_digits()));
        }

        // [engine] section
        config.set("engine", "target_fps", Some(self.target_fps.to_string()));
        config.set("engine", "debug", Some(self.debug.to_string()));

        // [ignore_collisions] section
        for (tag, ignored) in self.ignore_collisions.sorted_rules() {
            config.set(IGNORE_SECTION, &tag, Some(ignored.join(", ")));
        }

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
