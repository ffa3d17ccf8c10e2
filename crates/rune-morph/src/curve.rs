//! Show/hide curves and their timeline bookkeeping.
//!
//! A [`Curve`] is a pure mapping: linear fraction → eased fraction, and eased
//! fraction → [`Transformation`] (opacity and/or matrix) for a glyph of a given
//! extent. Hosts may plug in their own curves; [`GlyphCurve`] covers the
//! usual fade/rotate/drop/rise/squash/zoom effects.
//!
//! [`CurveTrack`] wraps a curve with a start time and an "ended" latch. The
//! latch is only set when the track is evaluated at or past its end, which
//! is what lets the frame driver keep a curve alive while staggered glyphs
//! are still running.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::easing::EasingFunction;
use crate::error::MorphError;
use crate::interpolate::Interpolate;
use crate::transform::Transform2D;

/// Milliseconds on the host's animation clock.
pub type Millis = i64;

/// Default curve duration; also replaces zero durations.
pub const DEFAULT_DURATION_MS: Millis = 100;

/// Size of the glyph a transformation is computed for. Pivots and relative
/// translations are expressed against it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphExtent {
    pub width: f32,
    pub height: f32,
}

/// Which parts of a [`Transformation`] carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Identity,
    Alpha,
    Matrix,
    Both,
}

/// Output of a curve at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transformation {
    pub alpha: Option<f32>,
    pub matrix: Option<Transform2D>,
}

impl Transformation {
    pub fn kind(&self) -> TransformKind {
        match (self.alpha.is_some(), self.matrix.is_some()) {
            (false, false) => TransformKind::Identity,
            (true, false) => TransformKind::Alpha,
            (false, true) => TransformKind::Matrix,
            (true, true) => TransformKind::Both,
        }
    }

    /// Opacity to draw with; 1.0 when the curve does not touch alpha.
    pub fn opacity(&self) -> f32 {
        self.alpha.unwrap_or(1.0)
    }
}

/// A time-to-progress mapping plus per-glyph transformation.
pub trait Curve: fmt::Debug {
    fn duration_ms(&self) -> Millis;

    fn set_duration_ms(&mut self, duration_ms: Millis);

    /// Eased progress for a linear fraction in [0, 1].
    fn interpolation(&self, fraction: f32) -> f32;

    /// Transformation at an already-eased progress.
    fn transformation(&self, eased: f32, glyph: GlyphExtent) -> Transformation;
}

/// Point inside the glyph box, as fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub x: f32,
    pub y: f32,
}

impl Pivot {
    pub const CENTER: Pivot = Pivot { x: 0.5, y: 0.5 };
    /// Bottom edge, where the baseline sits.
    pub const BASELINE: Pivot = Pivot { x: 0.5, y: 1.0 };

    fn resolve(&self, glyph: GlyphExtent) -> (f32, f32) {
        (self.x * glyph.width, self.y * glyph.height)
    }
}

/// A single animated property of a [`GlyphCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Alpha { from: f32, to: f32 },
    Scale { from: (f32, f32), to: (f32, f32), pivot: Pivot },
    Rotate { from_deg: f32, to_deg: f32, pivot: Pivot },
    /// Offsets in multiples of the glyph's width/height.
    Translate { from: (f32, f32), to: (f32, f32) },
}

impl Effect {
    fn matrix(&self, eased: f32, glyph: GlyphExtent) -> Option<Transform2D> {
        match *self {
            Effect::Alpha { .. } => None,
            Effect::Scale { from, to, pivot } => {
                let (px, py) = pivot.resolve(glyph);
                Some(
                    Transform2D::scale(from.0.interpolate(&to.0, eased), from.1.interpolate(&to.1, eased))
                        .about(px, py),
                )
            }
            Effect::Rotate {
                from_deg,
                to_deg,
                pivot,
            } => {
                let (px, py) = pivot.resolve(glyph);
                Some(Transform2D::rotate_deg(from_deg.interpolate(&to_deg, eased)).about(px, py))
            }
            Effect::Translate { from, to } => Some(Transform2D::translate(
                from.0.interpolate(&to.0, eased) * glyph.width,
                from.1.interpolate(&to.1, eased) * glyph.height,
            )),
        }
    }
}

/// Built-in curve: one easing function driving a set of effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphCurve {
    pub duration_ms: Millis,
    pub easing: EasingFunction,
    pub effects: Vec<Effect>,
}

impl GlyphCurve {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: EasingFunction::default(),
            effects,
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_duration(mut self, duration_ms: Millis) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn fade_in() -> Self {
        Self::new(vec![Effect::Alpha { from: 0.0, to: 1.0 }])
    }

    pub fn fade_out() -> Self {
        Self::new(vec![Effect::Alpha { from: 1.0, to: 0.0 }])
    }
}

impl Curve for GlyphCurve {
    fn duration_ms(&self) -> Millis {
        self.duration_ms
    }

    fn set_duration_ms(&mut self, duration_ms: Millis) {
        self.duration_ms = duration_ms;
    }

    fn interpolation(&self, fraction: f32) -> f32 {
        self.easing.evaluate(fraction)
    }

    fn transformation(&self, eased: f32, glyph: GlyphExtent) -> Transformation {
        let mut out = Transformation::default();
        for effect in &self.effects {
            if let Effect::Alpha { from, to } = *effect {
                let alpha = from.interpolate(&to, eased).clamp(0.0, 1.0);
                out.alpha = Some(out.alpha.unwrap_or(1.0) * alpha);
            } else if let Some(m) = effect.matrix(eased, glyph) {
                out.matrix = Some(out.matrix.map_or(m, |acc| acc.then(&m)));
            }
        }
        out
    }
}

/// Named show/hide curve pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvePreset {
    /// Identity transformation; glyphs only slide, resize and recolour.
    None,
    #[default]
    Fade,
    Rotate,
    Drop,
    Rise,
    Squash,
    Zoom,
}

impl CurvePreset {
    /// Curve for glyphs entering the text.
    pub fn show(self) -> GlyphCurve {
        match self {
            Self::None => GlyphCurve::new(Vec::new()),
            Self::Fade => GlyphCurve::fade_in(),
            Self::Rotate => GlyphCurve::new(vec![
                Effect::Alpha { from: 0.0, to: 1.0 },
                Effect::Rotate {
                    from_deg: -90.0,
                    to_deg: 0.0,
                    pivot: Pivot::CENTER,
                },
            ]),
            Self::Drop => GlyphCurve::new(vec![
                Effect::Alpha { from: 0.0, to: 1.0 },
                Effect::Translate {
                    from: (0.0, -1.0),
                    to: (0.0, 0.0),
                },
            ])
            .with_easing(EasingFunction::Bounce),
            Self::Rise => GlyphCurve::new(vec![
                Effect::Alpha { from: 0.0, to: 1.0 },
                Effect::Translate {
                    from: (0.0, 1.0),
                    to: (0.0, 0.0),
                },
            ])
            .with_easing(EasingFunction::overshoot()),
            Self::Squash => GlyphCurve::new(vec![Effect::Scale {
                from: (1.0, 0.0),
                to: (1.0, 1.0),
                pivot: Pivot::BASELINE,
            }]),
            Self::Zoom => GlyphCurve::new(vec![
                Effect::Alpha { from: 0.0, to: 1.0 },
                Effect::Scale {
                    from: (0.0, 0.0),
                    to: (1.0, 1.0),
                    pivot: Pivot::CENTER,
                },
            ]),
        }
    }

    /// Curve for glyphs leaving the text.
    pub fn hide(self) -> GlyphCurve {
        match self {
            Self::None => GlyphCurve::new(Vec::new()),
            Self::Fade => GlyphCurve::fade_out(),
            Self::Rotate => GlyphCurve::new(vec![
                Effect::Alpha { from: 1.0, to: 0.0 },
                Effect::Rotate {
                    from_deg: 0.0,
                    to_deg: 90.0,
                    pivot: Pivot::CENTER,
                },
            ]),
            Self::Drop => GlyphCurve::new(vec![
                Effect::Alpha { from: 1.0, to: 0.0 },
                Effect::Translate {
                    from: (0.0, 0.0),
                    to: (0.0, 1.0),
                },
            ])
            .with_easing(EasingFunction::EaseIn),
            Self::Rise => GlyphCurve::new(vec![
                Effect::Alpha { from: 1.0, to: 0.0 },
                Effect::Translate {
                    from: (0.0, 0.0),
                    to: (0.0, -1.0),
                },
            ])
            .with_easing(EasingFunction::EaseIn),
            Self::Squash => GlyphCurve::new(vec![Effect::Scale {
                from: (1.0, 1.0),
                to: (1.0, 0.0),
                pivot: Pivot::BASELINE,
            }]),
            Self::Zoom => GlyphCurve::new(vec![
                Effect::Alpha { from: 1.0, to: 0.0 },
                Effect::Scale {
                    from: (1.0, 1.0),
                    to: (2.0, 2.0),
                    pivot: Pivot::CENTER,
                },
            ]),
        }
    }
}

impl FromStr for CurvePreset {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "fade" => Ok(Self::Fade),
            "rotate" => Ok(Self::Rotate),
            "drop" | "drop_in" => Ok(Self::Drop),
            "rise" | "rise_up" => Ok(Self::Rise),
            "squash" => Ok(Self::Squash),
            "zoom" => Ok(Self::Zoom),
            _ => Err(MorphError::invalid("transition preset", s)),
        }
    }
}

/// A curve placed on the timeline.
#[derive(Debug)]
pub struct CurveTrack {
    curve: Box<dyn Curve>,
    start_ms: Millis,
    ended: bool,
}

impl CurveTrack {
    /// A track that has not been started reports itself ended.
    pub fn new(curve: Box<dyn Curve>) -> Self {
        Self {
            curve,
            start_ms: 0,
            ended: true,
        }
    }

    pub fn start(&mut self, now: Millis) {
        self.start_ms = now;
        self.ended = false;
    }

    pub fn start_ms(&self) -> Millis {
        self.start_ms
    }

    pub fn duration_ms(&self) -> Millis {
        self.curve.duration_ms()
    }

    pub fn end_ms(&self) -> Millis {
        self.start_ms + self.duration_ms()
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn curve(&self) -> &dyn Curve {
        self.curve.as_ref()
    }

    pub fn set_duration_ms(&mut self, duration_ms: Millis) {
        self.curve.set_duration_ms(duration_ms);
    }

    /// Swap the curve, keeping the start time and the ended latch.
    pub fn replace(&mut self, curve: Box<dyn Curve>) {
        self.curve = curve;
    }

    /// Linear fraction at `time`, unclamped. A zero duration reads as
    /// finished once `time` reaches the start.
    fn fraction(&self, time: Millis) -> f32 {
        let duration = self.duration_ms();
        if duration > 0 {
            (time - self.start_ms) as f32 / duration as f32
        } else if time < self.start_ms {
            0.0
        } else {
            1.0
        }
    }

    /// Eased progress at `time`, with the linear fraction clamped to [0, 1].
    pub fn progress(&self, time: Millis) -> f32 {
        self.curve.interpolation(self.fraction(time).clamp(0.0, 1.0))
    }

    /// Evaluate the curve at `time`. Latches `has_ended` once `time` reaches
    /// the end of the curve.
    pub fn transformation_at(&mut self, time: Millis, glyph: GlyphExtent) -> Transformation {
        let fraction = self.fraction(time);
        if fraction >= 1.0 {
            self.ended = true;
        }
        let eased = self.curve.interpolation(fraction.clamp(0.0, 1.0));
        self.curve.transformation(eased, glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn glyph() -> GlyphExtent {
        GlyphExtent {
            width: 10.0,
            height: 20.0,
        }
    }

    fn linear(curve: GlyphCurve) -> Box<dyn Curve> {
        Box::new(curve.with_easing(EasingFunction::Linear))
    }

    #[test]
    fn test_fade_kind_and_opacity() {
        let t = GlyphCurve::fade_in().transformation(0.25, glyph());
        assert_eq!(t.kind(), TransformKind::Alpha);
        assert!(approx_eq(t.opacity(), 0.25));
    }

    #[test]
    fn test_zoom_has_both() {
        let t = CurvePreset::Zoom.show().transformation(0.5, glyph());
        assert_eq!(t.kind(), TransformKind::Both);
        let m = t.matrix.unwrap();
        // Scaling about the centre keeps the centre still.
        let (x, y) = m.apply_point(5.0, 10.0);
        assert!(approx_eq(x, 5.0));
        assert!(approx_eq(y, 10.0));
    }

    #[test]
    fn test_none_preset_is_identity() {
        let t = CurvePreset::None.hide().transformation(0.7, glyph());
        assert_eq!(t.kind(), TransformKind::Identity);
        assert!(approx_eq(t.opacity(), 1.0));
    }

    #[test]
    fn test_drop_translates_by_glyph_height() {
        let t = CurvePreset::Drop.hide().transformation(1.0, glyph());
        assert_eq!(t.kind(), TransformKind::Both);
        assert!(approx_eq(t.matrix.unwrap().ty, 20.0));
    }

    #[test]
    fn test_track_latches_ended_only_at_end() {
        let mut track = CurveTrack::new(linear(GlyphCurve::fade_in()));
        assert!(track.has_ended());
        track.start(1_000);
        assert!(!track.has_ended());

        track.transformation_at(1_050, glyph());
        assert!(!track.has_ended());
        track.transformation_at(track.end_ms() - 1, glyph());
        assert!(!track.has_ended());
        let t = track.transformation_at(track.end_ms(), glyph());
        assert!(track.has_ended());
        assert!(approx_eq(t.opacity(), 1.0));
    }

    #[test]
    fn test_track_before_start_clamps() {
        let mut track = CurveTrack::new(linear(GlyphCurve::fade_in()));
        track.start(500);
        let t = track.transformation_at(100, glyph());
        assert!(approx_eq(t.opacity(), 0.0));
        assert!(approx_eq(track.progress(100), 0.0));
        assert!(approx_eq(track.progress(550), 0.5));
        assert!(!track.has_ended());
    }

    #[test]
    fn test_zero_duration_never_divides() {
        let mut track = CurveTrack::new(linear(GlyphCurve::fade_in().with_duration(0)));
        track.start(10);
        assert!(approx_eq(track.progress(9), 0.0));
        assert!(approx_eq(track.progress(10), 1.0));
        track.transformation_at(10, glyph());
        assert!(track.has_ended());
    }

    #[test]
    fn test_replace_keeps_timeline() {
        let mut track = CurveTrack::new(linear(GlyphCurve::fade_in()));
        track.start(200);
        track.replace(linear(CurvePreset::Zoom.show().with_duration(400)));
        assert_eq!(track.start_ms(), 200);
        assert_eq!(track.end_ms(), 600);
        assert!(!track.has_ended());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Drop_In".parse::<CurvePreset>().unwrap(), CurvePreset::Drop);
        assert_eq!("rise_up".parse::<CurvePreset>().unwrap(), CurvePreset::Rise);
        assert!("spin".parse::<CurvePreset>().is_err());
    }
}
