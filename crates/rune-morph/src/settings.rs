//! Engine settings and animation specs, including conversion from the
//! `rune-config` file model.

use rune_config::{LayoutConfig, MorphConfig};

use crate::align::WalkOrder;
use crate::color::{Color, ColorBlend};
use crate::curve::{Curve, CurvePreset, DEFAULT_DURATION_MS, GlyphCurve, Millis};
use crate::easing::EasingFunction;
use crate::error::{MorphError, Result};
use crate::layout::{Alignment, Viewport};
use crate::text::SideStyle;

/// Default delay between consecutive characters.
pub const DEFAULT_SPACING_MS: Millis = 50;

/// Default ambient text size in pixels.
pub const DEFAULT_TEXT_SIZE: f32 = 16.0;

/// Everything that shapes a transition apart from the curves themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphSettings {
    pub alignment: Alignment,
    pub walk: WalkOrder,
    pub spacing_ms: Millis,
    pub duration_ms: Millis,
    pub auto_slide: bool,
    pub color_blend: ColorBlend,
    pub text_size: f32,
    pub text_color: Color,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            alignment: Alignment::Start,
            walk: WalkOrder::Alignment,
            spacing_ms: DEFAULT_SPACING_MS,
            duration_ms: DEFAULT_DURATION_MS,
            auto_slide: true,
            color_blend: ColorBlend::Srgb,
            text_size: DEFAULT_TEXT_SIZE,
            text_color: Color::BLACK,
        }
    }
}

impl MorphSettings {
    /// Validate and convert the file model.
    pub fn from_config(config: &MorphConfig) -> Result<Self> {
        let text_size = config.text.text_size;
        if !is_valid_size(text_size) {
            return Err(MorphError::invalid("text size", &text_size.to_string()));
        }

        Ok(Self {
            alignment: config.layout.alignment.parse()?,
            walk: config.layout.walk.parse()?,
            spacing_ms: config.animation.spacing_ms.max(0),
            duration_ms: normalize_duration(config.animation.duration_ms),
            auto_slide: config.animation.auto_slide,
            color_blend: config.text.color_blend.parse()?,
            text_size,
            text_color: Color::from_hex(&config.text.color)?,
        })
    }

    /// Ambient style of the current text.
    pub fn ambient(&self) -> SideStyle {
        SideStyle {
            color: self.text_color,
            size: self.text_size,
        }
    }
}

impl From<&LayoutConfig> for Viewport {
    fn from(layout: &LayoutConfig) -> Self {
        Self {
            width: layout.width,
            padding_left: layout.padding_left,
            padding_right: layout.padding_right,
            padding_top: layout.padding_top,
        }
    }
}

/// Show and hide curves with the shared duration and stagger interval.
#[derive(Debug)]
pub struct AnimationSpec {
    pub show: Box<dyn Curve>,
    pub hide: Box<dyn Curve>,
    pub duration_ms: Millis,
    pub spacing_ms: Millis,
}

impl AnimationSpec {
    pub fn new(show: Box<dyn Curve>, hide: Box<dyn Curve>) -> Self {
        Self {
            show,
            hide,
            duration_ms: DEFAULT_DURATION_MS,
            spacing_ms: DEFAULT_SPACING_MS,
        }
    }

    /// `show` preset for incoming glyphs, `hide` preset for outgoing ones.
    pub fn preset(show: CurvePreset, hide: CurvePreset) -> Self {
        Self::new(Box::new(show.show()), Box::new(hide.hide()))
    }

    pub fn with_duration(mut self, duration_ms: Millis) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_spacing(mut self, spacing_ms: Millis) -> Self {
        self.spacing_ms = spacing_ms;
        self
    }

    pub fn from_config(config: &MorphConfig) -> Result<Self> {
        let show: CurvePreset = config.animation.show.parse()?;
        let hide: CurvePreset = config.hide_preset().parse()?;
        let easing = config
            .animation
            .easing
            .as_deref()
            .map(str::parse::<EasingFunction>)
            .transpose()?;

        let eased = |curve: GlyphCurve| -> Box<dyn Curve> {
            match easing {
                Some(easing) => Box::new(curve.with_easing(easing)),
                None => Box::new(curve),
            }
        };

        Ok(Self::new(eased(show.show()), eased(hide.hide()))
            .with_duration(config.animation.duration_ms)
            .with_spacing(config.animation.spacing_ms))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::preset(CurvePreset::Fade, CurvePreset::Fade)
    }
}

/// Replace a non-positive duration with [`DEFAULT_DURATION_MS`].
pub fn normalize_duration(duration_ms: Millis) -> Millis {
    if duration_ms > 0 {
        duration_ms
    } else {
        log::warn!(
            "duration {}ms is not positive, using {}ms",
            duration_ms,
            DEFAULT_DURATION_MS
        );
        DEFAULT_DURATION_MS
    }
}

pub(crate) fn is_valid_size(size: f32) -> bool {
    size.is_finite() && size > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let from_file = MorphSettings::from_config(&MorphConfig::default()).unwrap();
        assert_eq!(from_file, MorphSettings::default());
    }

    #[test]
    fn test_from_config_parses_names() {
        let mut config = MorphConfig::default();
        config.layout.alignment = "right".to_string();
        config.layout.walk = "ltr".to_string();
        config.text.color = "#ff000080".to_string();
        config.text.color_blend = "linear".to_string();
        config.animation.spacing_ms = -5;
        config.animation.duration_ms = 0;

        let settings = MorphSettings::from_config(&config).unwrap();
        assert_eq!(settings.alignment, Alignment::End);
        assert_eq!(settings.walk, WalkOrder::LeftToRight);
        assert_eq!(settings.color_blend, ColorBlend::Linear);
        assert_eq!(settings.text_color.to_srgba_u8(), [255, 0, 0, 128]);
        assert_eq!(settings.spacing_ms, 0);
        assert_eq!(settings.duration_ms, DEFAULT_DURATION_MS);
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let mut config = MorphConfig::default();
        config.layout.alignment = "justify".to_string();
        assert!(matches!(
            MorphSettings::from_config(&config),
            Err(MorphError::InvalidConfig { field: "alignment", .. })
        ));

        let mut config = MorphConfig::default();
        config.text.text_size = 0.0;
        assert!(MorphSettings::from_config(&config).is_err());

        let mut config = MorphConfig::default();
        config.text.color = "teal".to_string();
        assert!(matches!(
            MorphSettings::from_config(&config),
            Err(MorphError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_animation_spec_from_config() {
        let mut config = MorphConfig::default();
        config.animation.show = "zoom".to_string();
        config.animation.hide = Some("drop".to_string());
        config.animation.easing = Some("linear".to_string());
        config.animation.duration_ms = 300;

        let spec = AnimationSpec::from_config(&config).unwrap();
        assert_eq!(spec.duration_ms, 300);
        assert_eq!(spec.spacing_ms, DEFAULT_SPACING_MS);
        assert_eq!(spec.show.interpolation(0.3), 0.3);
        assert_eq!(spec.hide.interpolation(0.3), 0.3);

        config.animation.show = "spin".to_string();
        assert!(AnimationSpec::from_config(&config).is_err());
    }

    #[test]
    fn test_viewport_from_layout() {
        let mut config = MorphConfig::default();
        config.layout.padding_left = 12.0;
        let viewport = Viewport::from(&config.layout);
        assert_eq!(viewport.width, 480.0);
        assert_eq!(viewport.padding_left, 12.0);
    }

    #[test]
    fn test_normalize_duration() {
        assert_eq!(normalize_duration(250), 250);
        assert_eq!(normalize_duration(0), DEFAULT_DURATION_MS);
        assert_eq!(normalize_duration(-3), DEFAULT_DURATION_MS);
    }
}
