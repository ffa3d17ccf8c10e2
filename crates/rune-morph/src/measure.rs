//! Glyph measurement backends.

use std::path::Path;

use crate::error::{MorphError, Result};

/// On-screen box of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
}

/// Measures single characters at a font size. Must be deterministic for a
/// given font state; the layout walk calls it once per glyph per batch.
pub trait TextMeasurer {
    fn measure(&self, ch: char, size: f32) -> GlyphMetrics;

    /// Advance of an optional character; absent characters are zero wide.
    fn advance(&self, ch: Option<char>, size: f32) -> f32 {
        ch.map_or(0.0, |c| self.measure(c, size).width)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, ch: char, size: f32) -> GlyphMetrics {
        (**self).measure(ch, size)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&self, ch: char, size: f32) -> GlyphMetrics {
        (**self).measure(ch, size)
    }
}

/// Every glyph advances by `size * ratio`. Monospace approximation used by
/// terminal hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl TextMeasurer for FixedAdvance {
    fn measure(&self, _ch: char, size: f32) -> GlyphMetrics {
        GlyphMetrics {
            width: size * self.ratio,
            height: size,
        }
    }
}

/// Advance widths from a real font via fontdue.
pub struct FontdueMeasurer {
    font: fontdue::Font,
}

impl FontdueMeasurer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| MorphError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {:?} ({} bytes)", path.as_ref(), bytes.len());
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for FontdueMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueMeasurer")
            .field("units_per_em", &self.font.units_per_em())
            .finish_non_exhaustive()
    }
}

impl TextMeasurer for FontdueMeasurer {
    fn measure(&self, ch: char, size: f32) -> GlyphMetrics {
        let metrics = self.font.metrics(ch, size);
        let height = self
            .font
            .horizontal_line_metrics(size)
            .map_or(size, |line| line.new_line_size);
        GlyphMetrics {
            width: metrics.advance_width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance() {
        let m = FixedAdvance { ratio: 0.6 };
        let g = m.measure('W', 20.0);
        assert_eq!(g.width, 12.0);
        assert_eq!(g.height, 20.0);
    }

    #[test]
    fn test_absent_char_is_zero_wide() {
        let m = FixedAdvance::default();
        assert_eq!(m.advance(None, 40.0), 0.0);
        assert_eq!(m.advance(Some('a'), 40.0), 20.0);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = FontdueMeasurer::from_bytes(b"not a font").unwrap_err();
        assert!(matches!(err, MorphError::FontLoad(_)));
    }

    #[test]
    fn test_missing_font_file() {
        let err = FontdueMeasurer::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, MorphError::Io(_)));
    }
}
