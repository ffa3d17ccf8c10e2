//! Character sequences with per-range colour and size overrides.

use std::ops::Range;

use crate::color::Color;

/// A style override covering `range` (character indices, end exclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub color: Option<Color>,
    pub size: Option<f32>,
}

/// The sequence the engine animates between.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    chars: Vec<char>,
    spans: Vec<StyleSpan>,
}

impl StyledText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            spans: Vec::new(),
        }
    }

    /// Colour `range` with `color`. Later spans do not override earlier ones.
    pub fn with_color(mut self, range: Range<usize>, color: Color) -> Self {
        self.spans.push(StyleSpan {
            range,
            color: Some(color),
            size: None,
        });
        self
    }

    pub fn with_size(mut self, range: Range<usize>, size: f32) -> Self {
        self.spans.push(StyleSpan {
            range,
            color: None,
            size: Some(size),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `index`; out-of-range reads as absent.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// First colour override covering `index`.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.spans
            .iter()
            .filter(|s| s.range.contains(&index))
            .find_map(|s| s.color)
    }

    /// First usable size override covering `index`. Non-finite or
    /// non-positive sizes are skipped.
    pub fn size_at(&self, index: usize) -> Option<f32> {
        self.spans
            .iter()
            .filter(|s| s.range.contains(&index))
            .filter_map(|s| s.size)
            .find(|size| size.is_finite() && *size > 0.0)
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::new(&text)
    }
}

/// Ambient style of one end of a transition: what a glyph gets when its
/// sequence has no override at that index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideStyle {
    pub color: Color,
    pub size: f32,
}

impl SideStyle {
    pub fn color_at(&self, text: &StyledText, index: usize) -> Color {
        text.color_at(index).unwrap_or(self.color)
    }

    pub fn size_at(&self, text: &StyledText, index: usize) -> f32 {
        text.size_at(index).unwrap_or(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_by_index() {
        let blue = Color::from_argb(0xFF0000FF);
        let text = StyledText::new("Hello world!").with_color(6..12, blue);
        assert_eq!(text.len(), 12);
        assert_eq!(text.color_at(5), None);
        assert_eq!(text.color_at(6), Some(blue));
        assert_eq!(text.color_at(11), Some(blue));
        assert_eq!(text.color_at(12), None);
    }

    #[test]
    fn test_malformed_size_falls_back() {
        let text = StyledText::new("abc")
            .with_size(0..1, -3.0)
            .with_size(0..2, f32::NAN)
            .with_size(1..3, 24.0);
        assert_eq!(text.size_at(0), None);
        assert_eq!(text.size_at(1), Some(24.0));

        let ambient = SideStyle {
            color: Color::BLACK,
            size: 16.0,
        };
        assert_eq!(ambient.size_at(&text, 0), 16.0);
        assert_eq!(ambient.size_at(&text, 2), 24.0);
    }

    #[test]
    fn test_char_at_out_of_range() {
        let text = StyledText::from("ab");
        assert_eq!(text.char_at(1), Some('b'));
        assert_eq!(text.char_at(2), None);
        assert_eq!(text.as_string(), "ab");
    }
}
