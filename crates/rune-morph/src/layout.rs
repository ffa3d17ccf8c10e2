//! Horizontal placement of transition ends and of static text.
//!
//! Each side of a transition is a single-line block of glyphs whose left
//! edge follows from its alignment inside the [`Viewport`]. A walk starts
//! at the block edge on its leading side (left edge walking left-to-right,
//! right edge walking right-to-left), so the old and new blocks are always
//! consumed from the same side even when their alignments differ.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::align::WalkDirection;
use crate::error::MorphError;
use crate::glyph::{GlyphDraw, GlyphLayer};
use crate::measure::TextMeasurer;
use crate::text::{SideStyle, StyledText};
use crate::transition::Transition;

/// Horizontal alignment of a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    End,
    Center,
}

impl FromStr for Alignment {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "left" => Ok(Self::Start),
            "end" | "right" => Ok(Self::End),
            "center" | "centre" => Ok(Self::Center),
            _ => Err(MorphError::invalid("alignment", s)),
        }
    }
}

/// Alignment of the old ("from") and new ("to") text. They differ only for
/// a batch started by an alignment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentState {
    pub from: Alignment,
    pub to: Alignment,
}

impl AlignmentState {
    pub fn uniform(alignment: Alignment) -> Self {
        Self {
            from: alignment,
            to: alignment,
        }
    }
}

/// Horizontal frame the host lays text into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.padding_left - self.padding_right
    }

    /// Left edge of a block `total_width` wide.
    pub fn block_left(&self, alignment: Alignment, total_width: f32) -> f32 {
        match alignment {
            Alignment::Start => self.padding_left,
            Alignment::End => self.width - self.padding_right - total_width,
            Alignment::Center => self.padding_left + (self.content_width() - total_width) / 2.0,
        }
    }

    /// Baseline for a glyph of `size`; glyphs hang from the top padding.
    pub fn baseline(&self, size: f32) -> f32 {
        self.padding_top + size
    }
}

/// Total advance of `text` with ambient `style`.
pub fn sequence_width(text: &StyledText, style: SideStyle, measurer: &dyn TextMeasurer) -> f32 {
    text.chars()
        .iter()
        .enumerate()
        .map(|(i, &c)| measurer.measure(c, style.size_at(text, i)).width)
        .sum()
}

/// Fill in `from_position` / `to_position` for a batch produced by
/// [`crate::align::align`] with the same walk direction.
pub fn position(
    batch: &mut [Transition],
    alignment: AlignmentState,
    walk: WalkDirection,
    viewport: &Viewport,
    measurer: &dyn TextMeasurer,
) {
    // Every old and new character occurs exactly once in the batch, so the
    // block widths fall out of the batch itself.
    let (old_width, new_width) = batch.iter().fold((0.0, 0.0), |(old, new), t| {
        (
            old + measurer.advance(t.from_char, t.from_size),
            new + measurer.advance(t.to_char, t.to_size),
        )
    });

    let leading_edge = |alignment: Alignment, width: f32| {
        let left = viewport.block_left(alignment, width);
        match walk {
            WalkDirection::LeftToRight => left,
            WalkDirection::RightToLeft => left + width,
        }
    };
    let mut from_cursor = leading_edge(alignment.from, old_width);
    let mut to_cursor = leading_edge(alignment.to, new_width);

    for t in batch.iter_mut() {
        let from_advance = measurer.advance(t.from_char, t.from_size);
        let to_advance = measurer.advance(t.to_char, t.to_size);

        match walk {
            WalkDirection::LeftToRight => {
                t.from_position = from_cursor;
                t.to_position = to_cursor;
                from_cursor += from_advance;
                to_cursor += to_advance;
            }
            WalkDirection::RightToLeft => {
                from_cursor -= from_advance;
                to_cursor -= to_advance;
                t.from_position = from_cursor;
                t.to_position = to_cursor;
            }
        }

        if t.from_char.is_none() {
            t.from_position = t.to_position;
        } else if t.to_char.is_none() {
            t.to_position = t.from_position;
        }
    }
}

/// Non-transitional layout of `text`: glyphs left to right from the block's
/// left edge, full opacity, no transform.
pub fn static_layout(
    text: &StyledText,
    style: SideStyle,
    alignment: Alignment,
    viewport: &Viewport,
    measurer: &dyn TextMeasurer,
) -> Vec<GlyphDraw> {
    let total = sequence_width(text, style, measurer);
    let mut x = viewport.block_left(alignment, total);

    text.chars()
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            let size = style.size_at(text, i);
            let glyph = GlyphDraw {
                ch,
                x,
                baseline: viewport.baseline(size),
                size,
                color: style.color_at(text, i),
                transform: None,
                layer: GlyphLayer::Static,
            };
            x += measurer.measure(ch, size).width;
            glyph
        })
        .collect()
}
