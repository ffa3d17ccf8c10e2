//! Per-character time offsets.

use crate::curve::Millis;

/// Delays each transition by `spacing_ms` relative to the one before it in
/// walk order, so glyph animations ripple across the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaggerClock {
    spacing_ms: Millis,
}

impl StaggerClock {
    /// Negative spacing is treated as zero (lockstep).
    pub fn new(spacing_ms: Millis) -> Self {
        Self {
            spacing_ms: spacing_ms.max(0),
        }
    }

    pub fn spacing_ms(&self) -> Millis {
        self.spacing_ms
    }

    /// Local time of the `index`-th transition at global time `now`.
    pub fn local_time(&self, now: Millis, index: usize) -> Millis {
        now - index as Millis * self.spacing_ms
    }

    /// Extra time the stagger adds to a batch of `len` transitions.
    pub fn span(&self, len: usize) -> Millis {
        len.saturating_sub(1) as Millis * self.spacing_ms
    }
}
