//! Positional pairing of old and new characters.
//!
//! The destination is walked in one direction while the source is consumed
//! from the same edge. Character identity plays no part: "AB" → "BC" pairs
//! A with B and B with C.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MorphError;
use crate::layout::Alignment;
use crate::text::{SideStyle, StyledText};
use crate::transition::{Transition, TransitionBatch};

/// Resolved direction of one pairing walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    LeftToRight,
    RightToLeft,
}

impl WalkDirection {
    /// Index visited at `step` in a sequence of `len` characters.
    fn index(self, step: usize, len: usize) -> usize {
        match self {
            Self::LeftToRight => step,
            Self::RightToLeft => len - 1 - step,
        }
    }
}

/// How the walk direction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOrder {
    /// End-aligned destinations walk right-to-left, all others left-to-right.
    #[default]
    Alignment,
    LeftToRight,
    RightToLeft,
}

impl WalkOrder {
    pub fn resolve(self, destination: Alignment) -> WalkDirection {
        match self {
            Self::Alignment if destination == Alignment::End => WalkDirection::RightToLeft,
            Self::Alignment | Self::LeftToRight => WalkDirection::LeftToRight,
            Self::RightToLeft => WalkDirection::RightToLeft,
        }
    }
}

impl FromStr for WalkOrder {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "alignment" | "gravity" => Ok(Self::Alignment),
            "left_to_right" | "ltr" | "left" => Ok(Self::LeftToRight),
            "right_to_left" | "rtl" | "right" => Ok(Self::RightToLeft),
            _ => Err(MorphError::invalid("walk order", s)),
        }
    }
}

/// Pair `old` with `new`, producing one transition per destination position
/// followed by one per unmatched source position. Positions are left at zero
/// for [`crate::layout::position`] to fill in.
pub fn align(
    old: &StyledText,
    new: &StyledText,
    walk: WalkDirection,
    from_style: SideStyle,
    to_style: SideStyle,
) -> TransitionBatch {
    let (old_len, new_len) = (old.len(), new.len());
    let mut batch = Vec::with_capacity(old_len.max(new_len));

    for step in 0..new_len {
        let to_index = walk.index(step, new_len);
        let from_index = (step < old_len).then(|| walk.index(step, old_len));
        batch.push(pair(old, new, from_index, Some(to_index), from_style, to_style));
    }

    for step in new_len..old_len {
        let from_index = walk.index(step, old_len);
        batch.push(pair(old, new, Some(from_index), None, from_style, to_style));
    }

    batch
}

fn pair(
    old: &StyledText,
    new: &StyledText,
    from_index: Option<usize>,
    to_index: Option<usize>,
    from_style: SideStyle,
    to_style: SideStyle,
) -> Transition {
    let from_char = from_index.and_then(|i| old.char_at(i));
    let to_char = to_index.and_then(|i| new.char_at(i));

    let mut from_color = from_index.map_or(from_style.color, |i| from_style.color_at(old, i));
    let mut to_color = to_index.map_or(to_style.color, |i| to_style.color_at(new, i));
    // A glyph with only one end keeps that end's colour throughout.
    if from_char.is_none() {
        from_color = to_color;
    } else if to_char.is_none() {
        to_color = from_color;
    }

    Transition {
        from_char,
        to_char,
        from_position: 0.0,
        to_position: 0.0,
        from_color,
        to_color,
        from_size: from_index.map_or(from_style.size, |i| from_style.size_at(old, i)),
        to_size: to_index.map_or(to_style.size, |i| to_style.size_at(new, i)),
    }
}
