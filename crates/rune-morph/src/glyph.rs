use crate::color::Color;
use crate::transform::Transform2D;

/// Which part of the frame a glyph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLayer {
    /// Non-transitional draw of the current text.
    Static,
    /// A persisting character sliding to its new place.
    Morphing,
    /// An old character on its hide curve.
    Outgoing,
    /// A new character on its show curve.
    Incoming,
}

/// One draw instruction for the host surface.
///
/// The host translates to `(x, baseline)`, concatenates `transform` if any,
/// and draws `ch` at `size` with `color` (curve opacity is already folded
/// into the alpha).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub ch: char,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub color: Color,
    pub transform: Option<Transform2D>,
    pub layer: GlyphLayer,
}
