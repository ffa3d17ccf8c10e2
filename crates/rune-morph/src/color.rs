use palette::{FromColor, LinSrgba, Srgba};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MorphError;
use crate::interpolate::{Interpolate, lerp_f32};

/// Straight (non-premultiplied) sRGB colour with float channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from sRGB u8 RGBA array.
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        Self::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        )
    }

    /// Create from a packed `0xAARRGGBB` integer, the layout most UI toolkits
    /// hand out for colour spans.
    #[inline]
    pub fn from_argb(packed: u32) -> Self {
        let [a, r, g, b] = packed.to_be_bytes();
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Convert back to sRGB u8 RGBA array.
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Same colour with its alpha multiplied by `opacity`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, MorphError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || MorphError::InvalidColor(hex.to_string());
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(bad());
        }
        let mut bytes = [0u8, 0, 0, 255];
        for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| bad())?;
            bytes[i] = u8::from_str_radix(pair, 16).map_err(|_| bad())?;
        }
        Ok(Self::from_srgba_u8(bytes))
    }
}

impl Interpolate for Color {
    /// Per-channel lerp of the stored sRGB components.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            r: lerp_f32(self.r, to.r, t),
            g: lerp_f32(self.g, to.g, t),
            b: lerp_f32(self.b, to.b, t),
            a: lerp_f32(self.a, to.a, t),
        }
    }
}

/// Space in which colour channels are interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBlend {
    /// Lerp the encoded sRGB channels directly.
    #[default]
    Srgb,
    /// Decode to linear light, lerp, re-encode.
    Linear,
}

impl ColorBlend {
    pub fn blend(self, from: Color, to: Color, t: f32) -> Color {
        match self {
            Self::Srgb => from.interpolate(&to, t),
            Self::Linear => {
                let a: LinSrgba = LinSrgba::from_color(Srgba::new(from.r, from.g, from.b, from.a));
                let b: LinSrgba = LinSrgba::from_color(Srgba::new(to.r, to.g, to.b, to.a));
                let mixed = LinSrgba::new(
                    lerp_f32(a.red, b.red, t),
                    lerp_f32(a.green, b.green, t),
                    lerp_f32(a.blue, b.blue, t),
                    lerp_f32(a.alpha, b.alpha, t),
                );
                let srgb: Srgba = Srgba::from_color(mixed);
                Color::new(srgb.red, srgb.green, srgb.blue, srgb.alpha)
            }
        }
    }
}

impl FromStr for ColorBlend {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" => Ok(Self::Srgb),
            "linear" => Ok(Self::Linear),
            _ => Err(MorphError::invalid("color blend", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.002;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_argb_unpacks_channels() {
        let c = Color::from_argb(0xFF0000FF);
        assert_eq!(c.to_srgba_u8(), [0, 0, 255, 255]);
        let c = Color::from_argb(0x80FF0000);
        assert_eq!(c.to_srgba_u8(), [255, 0, 0, 128]);
    }

    #[test]
    fn test_per_channel_blend_does_not_bleed() {
        // Packed-integer arithmetic between these two would carry into the
        // green byte; per-channel lerp keeps green at zero.
        let from = Color::from_argb(0xFF0000FF);
        let to = Color::from_argb(0xFFFF0000);
        let mid = ColorBlend::Srgb.blend(from, to, 0.5);
        assert!(approx_eq(mid.r, 0.5));
        assert!(approx_eq(mid.g, 0.0));
        assert!(approx_eq(mid.b, 0.5));
        assert!(approx_eq(mid.a, 1.0));
    }

    #[test]
    fn test_linear_blend_endpoints() {
        let from = Color::from_hex("#336699").unwrap();
        let to = Color::WHITE;
        let start = ColorBlend::Linear.blend(from, to, 0.0);
        let end = ColorBlend::Linear.blend(from, to, 1.0);
        assert_eq!(start.to_srgba_u8(), from.to_srgba_u8());
        assert_eq!(end.to_srgba_u8(), to.to_srgba_u8());

        // Linear-light midpoint of black and white is brighter than 0.5 encoded.
        let mid = ColorBlend::Linear.blend(Color::BLACK, Color::WHITE, 0.5);
        assert!(mid.r > 0.7);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#0000ff").unwrap().to_srgba_u8(), [0, 0, 255, 255]);
        assert_eq!(Color::from_hex("ff000080").unwrap().to_srgba_u8(), [255, 0, 0, 128]);
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_with_opacity() {
        let c = Color::from_argb(0x80FFFFFF).with_opacity(0.5);
        assert!(approx_eq(c.a, 128.0 / 255.0 * 0.5));
        assert!(approx_eq(Color::BLACK.with_opacity(3.0).a, 1.0));
    }

    #[test]
    fn test_blend_from_str() {
        assert_eq!("Linear".parse::<ColorBlend>().unwrap(), ColorBlend::Linear);
        assert!("hsl".parse::<ColorBlend>().is_err());
    }
}
