//! Rune Morph configuration system
//!
//! This crate provides centralized configuration for the text morph engine,
//! loading settings from `morph.toml` with environment variable overrides.
//! Values are kept in their file form (names, hex strings); `rune-morph`
//! validates and converts them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "morph.toml";

/// Main configuration structure for Rune Morph
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MorphConfig {
    /// Timing and curve settings
    pub animation: AnimationConfig,
    /// Alignment and viewport settings
    pub layout: LayoutConfig,
    /// Font and colour settings
    pub text: TextConfig,
    /// Demo application settings
    pub demo: DemoConfig,
}

/// Animation timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of each character's show/hide curve in milliseconds
    pub duration_ms: i64,
    /// Delay between consecutive characters in milliseconds
    pub spacing_ms: i64,
    /// Slide glyphs between positions while the curves run
    pub auto_slide: bool,
    /// Curve preset for incoming glyphs (fade, rotate, drop, rise, squash, zoom, none)
    pub show: String,
    /// Curve preset for outgoing glyphs; defaults to the show preset
    pub hide: Option<String>,
    /// Easing name applied to both presets (linear, ease, ease_in, ..., bounce)
    pub easing: Option<String>,
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal alignment (start, end, center)
    pub alignment: String,
    /// Walk order used for pairing (alignment, left_to_right, right_to_left)
    pub walk: String,
    /// Viewport width in pixels
    pub width: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
}

/// Text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Path to a font file (.ttf/.otf) used for glyph measurement
    pub font: Option<PathBuf>,
    /// Default text size in pixels
    pub text_size: f32,
    /// Default text colour as `#rrggbb` or `#rrggbbaa`
    pub color: String,
    /// Colour interpolation space (srgb, linear)
    pub color_blend: String,
}

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Phrases cycled by the demo
    pub phrases: Vec<String>,
    /// Simulated frame interval in milliseconds
    pub frame_interval_ms: i64,
    /// Width of one cell of the printed strip, in pixels
    pub cell_width: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 100,
            spacing_ms: 50,
            auto_slide: true,
            show: "fade".to_string(),
            hide: None,
            easing: None,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            alignment: "start".to_string(),
            walk: "alignment".to_string(),
            width: 480.0,
            padding_left: 0.0,
            padding_right: 0.0,
            padding_top: 0.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: None,
            text_size: 16.0,
            color: "#000000".to_string(),
            color_blend: "srgb".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Hello world!".to_string(),
                "Something something".to_string(),
                "Hello world with more".to_string(),
                "Hello wesley".to_string(),
                "Bye   wes".to_string(),
            ],
            frame_interval_ms: 16,
            cell_width: 8.0,
        }
    }
}

impl MorphConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the morph.toml configuration file
    ///
    /// # Returns
    /// * `Ok(MorphConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (morph.toml in the current directory)
    /// or return default configuration if the file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable numeric values are ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("MORPH_DURATION_MS") {
            if let Ok(ms) = val.parse::<i64>() {
                self.animation.duration_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("MORPH_SPACING_MS") {
            if let Ok(ms) = val.parse::<i64>() {
                self.animation.spacing_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("MORPH_AUTO_SLIDE") {
            self.animation.auto_slide = val == "1" || val.eq_ignore_ascii_case("true");
        }
        // A single name selects the same preset for both directions.
        if let Ok(name) = std::env::var("MORPH_TRANSITION") {
            self.animation.show = name;
            self.animation.hide = None;
        }

        if let Ok(alignment) = std::env::var("MORPH_ALIGNMENT") {
            self.layout.alignment = alignment;
        }
        if let Ok(walk) = std::env::var("MORPH_WALK") {
            self.layout.walk = walk;
        }

        if let Ok(font) = std::env::var("MORPH_FONT") {
            self.text.font = Some(PathBuf::from(font));
        }
        if let Ok(val) = std::env::var("MORPH_TEXT_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.text.text_size = size;
            }
        }
        if let Ok(blend) = std::env::var("MORPH_COLOR_BLEND") {
            self.text.color_blend = blend;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from morph.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Preset name for outgoing glyphs.
    pub fn hide_preset(&self) -> &str {
        self.animation.hide.as_deref().unwrap_or(&self.animation.show)
    }
}
