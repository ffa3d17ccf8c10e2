//! Per-character transition records.

use std::fmt;

use crate::color::Color;

/// How a transition's two ends relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Same character at both ends; drawn once and slid/resized/recoloured.
    Persisting,
    /// Different characters; the old one hides while the new one shows.
    Replacing,
    /// No old character.
    Appearing,
    /// No new character.
    Disappearing,
}

/// One character's journey from an old glyph (or none) to a new glyph (or
/// none). Positions are glyph left edges in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from_char: Option<char>,
    pub to_char: Option<char>,
    pub from_position: f32,
    pub to_position: f32,
    pub from_color: Color,
    pub to_color: Color,
    pub from_size: f32,
    pub to_size: f32,
}

/// Transitions in walk order, which is also stagger order.
pub type TransitionBatch = Vec<Transition>;

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match (self.from_char, self.to_char) {
            (Some(a), Some(b)) if a == b => TransitionKind::Persisting,
            (Some(_), Some(_)) => TransitionKind::Replacing,
            (None, _) => TransitionKind::Appearing,
            (Some(_), None) => TransitionKind::Disappearing,
        }
    }

    pub fn is_paired(&self) -> bool {
        self.from_char.is_some() && self.to_char.is_some()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |c: Option<char>| c.map_or_else(|| "∅".to_string(), |c| format!("{c:?}"));
        write!(
            f,
            "{} @{:.1} -> {} @{:.1}",
            show(self.from_char),
            self.from_position,
            show(self.to_char),
            self.to_position
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Option<char>, to: Option<char>) -> Transition {
        Transition {
            from_char: from,
            to_char: to,
            from_position: 0.0,
            to_position: 8.0,
            from_color: Color::BLACK,
            to_color: Color::BLACK,
            from_size: 16.0,
            to_size: 16.0,
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(record(Some('a'), Some('a')).kind(), TransitionKind::Persisting);
        assert_eq!(record(Some('a'), Some('b')).kind(), TransitionKind::Replacing);
        assert_eq!(record(None, Some('b')).kind(), TransitionKind::Appearing);
        assert_eq!(record(Some('a'), None).kind(), TransitionKind::Disappearing);
        assert!(!record(None, Some('b')).is_paired());
    }

    #[test]
    fn test_display() {
        assert_eq!(record(Some('a'), None).to_string(), "'a' @0.0 -> ∅ @8.0");
    }
}
