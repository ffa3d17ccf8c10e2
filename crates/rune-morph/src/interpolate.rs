//! Interpolation between animatable values.
//!
//! Every blended quantity in a glyph transition (position, font size,
//! colour) goes through the `Interpolate` trait so the blending
//! code does not care which one it is lerping.

/// Trait for types that can be interpolated between two values.
///
/// # Arguments
/// * `to` - Target value to interpolate towards
/// * `t` - Interpolation factor (0.0 = self, 1.0 = to)
pub trait Interpolate: Sized {
    /// When t = 0.0, returns self. When t = 1.0, returns to.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

/// Linear interpolation helper for f32 values.
#[inline]
pub(crate) fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f32(*self, *to, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_interpolation() {
        assert_eq!(10.0f32.interpolate(&20.0, 0.0), 10.0);
        assert_eq!(10.0f32.interpolate(&20.0, 0.25), 12.5);
        assert_eq!(10.0f32.interpolate(&20.0, 1.0), 20.0);
        // Overshooting curves extrapolate.
        assert_eq!(10.0f32.interpolate(&20.0, 1.5), 25.0);
    }
}
