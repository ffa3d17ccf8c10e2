//! 2D affine transforms produced by glyph curves.
//!
//! Stored as a 3x2 matrix (the bottom row [0, 0, 1] is implicit):
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! | 0  0  1  |
//! ```

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    pub fn rotate(angle_rad: f32) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn rotate_deg(angle_deg: f32) -> Self {
        Self::rotate(angle_deg * PI / 180.0)
    }

    /// Compose this transform with another (this * other).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Apply this transform about `(px, py)` instead of the origin.
    pub fn about(&self, px: f32, py: f32) -> Self {
        Self::translate(px, py)
            .then(self)
            .then(&Self::translate(-px, -py))
    }

    pub fn apply_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_translate_then_scale() {
        let m = Transform2D::translate(10.0, 5.0).then(&Transform2D::scale(2.0, 3.0));
        let (x, y) = m.apply_point(1.0, 1.0);
        assert!(approx_eq(x, 12.0));
        assert!(approx_eq(y, 8.0));
    }

    #[test]
    fn test_rotate_about_pivot_keeps_pivot_fixed() {
        let m = Transform2D::rotate_deg(90.0).about(5.0, 5.0);
        let (x, y) = m.apply_point(5.0, 5.0);
        assert!(approx_eq(x, 5.0));
        assert!(approx_eq(y, 5.0));
        let (x, y) = m.apply_point(10.0, 5.0);
        assert!(approx_eq(x, 5.0));
        assert!(approx_eq(y, 10.0));
    }
}
