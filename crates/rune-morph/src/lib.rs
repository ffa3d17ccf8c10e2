//! rune-morph: per-character text transitions.
//!
//! When the displayed text changes, every character gets a [`Transition`]
//! from its old glyph to its new one. The pieces:
//! - [`align`]: positional pairing of old and new characters
//! - [`layout`]: pixel positions for both ends of every transition
//! - [`stagger`]: per-character time offsets
//! - [`curve`] / [`blend`]: show/hide curves and per-frame blending
//! - [`engine`]: the frame driver a host calls once per frame

pub mod align;
pub mod blend;
pub mod color;
pub mod curve;
pub mod easing;
pub mod engine;
pub mod error;
pub mod glyph;
pub mod interpolate;
pub mod layout;
pub mod measure;
pub mod settings;
pub mod stagger;
pub mod text;
pub mod transform;
pub mod transition;

pub use align::{WalkDirection, WalkOrder, align};
pub use blend::Phase;
pub use color::{Color, ColorBlend};
pub use curve::{
    Curve, CurvePreset, CurveTrack, DEFAULT_DURATION_MS, Effect, GlyphCurve, GlyphExtent, Millis,
    Pivot, TransformKind, Transformation,
};
pub use easing::{EasingFunction, StepPosition};
pub use engine::{Frame, MorphEngine};
pub use error::{MorphError, Result};
pub use glyph::{GlyphDraw, GlyphLayer};
pub use interpolate::Interpolate;
pub use layout::{Alignment, AlignmentState, Viewport, position, sequence_width, static_layout};
pub use measure::{FixedAdvance, FontdueMeasurer, GlyphMetrics, TextMeasurer};
pub use settings::{AnimationSpec, DEFAULT_SPACING_MS, MorphSettings};
pub use stagger::StaggerClock;
pub use text::{SideStyle, StyleSpan, StyledText};
pub use transform::Transform2D;
pub use transition::{Transition, TransitionBatch, TransitionKind};
