//! Per-transition evaluation: phase, blend fractions and draw instructions.

use crate::color::ColorBlend;
use crate::curve::{CurveTrack, GlyphExtent, Millis};
use crate::glyph::{GlyphDraw, GlyphLayer};
use crate::interpolate::Interpolate;
use crate::layout::Viewport;
use crate::measure::TextMeasurer;
use crate::transition::{Transition, TransitionKind};

/// Where a transition is on its own (staggered) timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Local time is before the show curve's start.
    Pending,
    /// Inside the show curve's duration.
    Active,
    /// Past the show curve's end.
    Settled,
}

impl Phase {
    pub fn at(local: Millis, show: &CurveTrack) -> Self {
        if local < show.start_ms() {
            Self::Pending
        } else if local < show.end_ms() {
            Self::Active
        } else {
            Self::Settled
        }
    }
}

/// Blend weights for the incoming (`show`) and outgoing (`hide`) glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fractions {
    pub show: f32,
    pub hide: f32,
}

impl Fractions {
    /// With auto-slide off glyphs do not travel: the incoming glyph sits at
    /// its destination and the outgoing one at its origin.
    const HELD: Fractions = Fractions { show: 1.0, hide: 0.0 };

    pub fn at(phase: Phase, local: Millis, show: &CurveTrack, hide: &CurveTrack, auto_slide: bool) -> Self {
        match phase {
            Phase::Settled => Fractions { show: 1.0, hide: 1.0 },
            _ if !auto_slide => Self::HELD,
            Phase::Pending => Fractions { show: 0.0, hide: 0.0 },
            Phase::Active => Fractions {
                show: show.progress(local),
                hide: hide.progress(local),
            },
        }
    }
}

/// Read-only inputs for turning blended values into glyphs.
#[derive(Clone, Copy)]
pub struct GlyphPaint<'a> {
    pub color_blend: ColorBlend,
    pub viewport: &'a Viewport,
    pub measurer: &'a dyn TextMeasurer,
}

/// Everything a transition needs from the engine for one frame.
pub struct BlendContext<'a> {
    pub show: &'a mut CurveTrack,
    pub hide: &'a mut CurveTrack,
    pub auto_slide: bool,
    pub paint: GlyphPaint<'a>,
}

/// Instant at which a track is sampled for a glyph in `phase`. Settled
/// glyphs sample one millisecond before the end so the track does not latch
/// "ended" while staggered neighbours are still running.
fn sample_time(phase: Phase, local: Millis, track: &CurveTrack) -> Millis {
    match phase {
        Phase::Pending => track.start_ms(),
        Phase::Active => local,
        Phase::Settled => (track.end_ms() - 1).max(track.start_ms()),
    }
}

/// Evaluate `transition` at its local time, appending its glyphs to `out`.
pub fn evaluate(
    transition: &Transition,
    local: Millis,
    ctx: &mut BlendContext<'_>,
    out: &mut Vec<GlyphDraw>,
) -> Phase {
    let phase = Phase::at(local, ctx.show);
    let fractions = Fractions::at(phase, local, ctx.show, ctx.hide, ctx.auto_slide);

    if transition.kind() == TransitionKind::Persisting {
        if let Some(ch) = transition.to_char {
            out.push(morphing_glyph(transition, ch, fractions.hide, ctx.paint));
        }
        return phase;
    }

    if let Some(ch) = transition.from_char {
        let time = sample_time(phase, local, ctx.hide);
        out.push(curve_glyph(
            transition,
            ch,
            fractions.hide,
            ctx.hide,
            time,
            GlyphLayer::Outgoing,
            ctx.paint,
        ));
    }
    if let Some(ch) = transition.to_char {
        let time = sample_time(phase, local, ctx.show);
        out.push(curve_glyph(
            transition,
            ch,
            fractions.show,
            ctx.show,
            time,
            GlyphLayer::Incoming,
            ctx.paint,
        ));
    }

    phase
}

/// A character present at both ends: one glyph, blended geometry and
/// colour, no curve transformation.
fn morphing_glyph(t: &Transition, ch: char, dt: f32, paint: GlyphPaint<'_>) -> GlyphDraw {
    let size = t.from_size.interpolate(&t.to_size, dt);
    GlyphDraw {
        ch,
        x: t.from_position.interpolate(&t.to_position, dt),
        baseline: paint.viewport.baseline(size),
        size,
        color: paint.color_blend.blend(t.from_color, t.to_color, dt),
        transform: None,
        layer: GlyphLayer::Morphing,
    }
}

fn curve_glyph(
    t: &Transition,
    ch: char,
    dt: f32,
    track: &mut CurveTrack,
    time: Millis,
    layer: GlyphLayer,
    paint: GlyphPaint<'_>,
) -> GlyphDraw {
    let size = t.from_size.interpolate(&t.to_size, dt);
    let extent = GlyphExtent {
        width: paint.measurer.measure(ch, size).width,
        height: size,
    };
    let transformation = track.transformation_at(time, extent);

    GlyphDraw {
        ch,
        x: t.from_position.interpolate(&t.to_position, dt),
        baseline: paint.viewport.baseline(size),
        size,
        color: paint
            .color_blend
            .blend(t.from_color, t.to_color, dt)
            .with_opacity(transformation.opacity()),
        transform: transformation.matrix,
        layer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::curve::GlyphCurve;
    use crate::easing::EasingFunction;
    use crate::measure::FixedAdvance;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn tracks(start: Millis) -> (CurveTrack, CurveTrack) {
        let mut show = CurveTrack::new(Box::new(GlyphCurve::fade_in().with_easing(EasingFunction::Linear)));
        let mut hide = CurveTrack::new(Box::new(GlyphCurve::fade_out().with_easing(EasingFunction::Linear)));
        show.start(start);
        hide.start(start);
        (show, hide)
    }

    fn replacing() -> Transition {
        Transition {
            from_char: Some('a'),
            to_char: Some('b'),
            from_position: 0.0,
            to_position: 100.0,
            from_color: Color::BLACK,
            to_color: Color::WHITE,
            from_size: 10.0,
            to_size: 30.0,
        }
    }

    fn run(t: &Transition, local: Millis, auto_slide: bool) -> (Phase, Vec<GlyphDraw>) {
        let (mut show, mut hide) = tracks(1_000);
        let viewport = Viewport::new(200.0);
        let measurer = FixedAdvance::default();
        let mut ctx = BlendContext {
            show: &mut show,
            hide: &mut hide,
            auto_slide,
            paint: GlyphPaint {
                color_blend: ColorBlend::Srgb,
                viewport: &viewport,
                measurer: &measurer,
            },
        };
        let mut out = Vec::new();
        let phase = evaluate(t, local, &mut ctx, &mut out);
        (phase, out)
    }

    #[test]
    fn test_phases() {
        assert_eq!(run(&replacing(), 999, true).0, Phase::Pending);
        assert_eq!(run(&replacing(), 1_000, true).0, Phase::Active);
        assert_eq!(run(&replacing(), 1_099, true).0, Phase::Active);
        assert_eq!(run(&replacing(), 1_100, true).0, Phase::Settled);
    }

    #[test]
    fn test_active_blends_both_glyphs() {
        let (_, glyphs) = run(&replacing(), 1_050, true);
        assert_eq!(glyphs.len(), 2);
        let outgoing = &glyphs[0];
        let incoming = &glyphs[1];
        assert_eq!(outgoing.layer, GlyphLayer::Outgoing);
        assert_eq!(incoming.layer, GlyphLayer::Incoming);

        assert!(approx_eq(incoming.x, 50.0));
        assert!(approx_eq(incoming.size, 20.0));
        assert!(approx_eq(incoming.baseline, 20.0));
        assert!(approx_eq(incoming.color.r, 0.5));
        // fade_in at half way: alpha 0.5 on an opaque colour
        assert!(approx_eq(incoming.color.a, 0.5));
        assert!(approx_eq(outgoing.color.a, 0.5));
        assert!(incoming.transform.is_none());
    }

    #[test]
    fn test_pending_snaps_to_start() {
        let (_, glyphs) = run(&replacing(), 500, true);
        assert!(approx_eq(glyphs[1].x, 0.0));
        assert!(approx_eq(glyphs[1].color.a, 0.0));
        assert!(approx_eq(glyphs[0].color.a, 1.0));
    }

    #[test]
    fn test_pending_without_auto_slide_holds() {
        let (_, glyphs) = run(&replacing(), 500, false);
        // Outgoing stays at its origin, incoming at its destination.
        assert!(approx_eq(glyphs[0].x, 0.0));
        assert!(approx_eq(glyphs[1].x, 100.0));
        let (_, glyphs) = run(&replacing(), 1_050, false);
        assert!(approx_eq(glyphs[1].x, 100.0));
        assert!(approx_eq(glyphs[1].color.a, 0.5));
    }

    #[test]
    fn test_settled_pins_fractions_without_ending_curves() {
        let (mut show, mut hide) = tracks(1_000);
        let viewport = Viewport::new(200.0);
        let measurer = FixedAdvance::default();
        let mut ctx = BlendContext {
            show: &mut show,
            hide: &mut hide,
            auto_slide: true,
            paint: GlyphPaint {
                color_blend: ColorBlend::Srgb,
                viewport: &viewport,
                measurer: &measurer,
            },
        };
        let mut out = Vec::new();
        assert_eq!(evaluate(&replacing(), 5_000, &mut ctx, &mut out), Phase::Settled);
        assert!(approx_eq(out[1].x, 100.0));
        assert!(approx_eq(out[0].x, 100.0));
        assert!(out[1].color.a > 0.98);
        assert!(!show.has_ended());
        assert!(!hide.has_ended());
    }

    #[test]
    fn test_persisting_draws_once_by_hide_fraction() {
        let t = Transition {
            from_char: Some('x'),
            to_char: Some('x'),
            ..replacing()
        };
        let (_, glyphs) = run(&t, 1_025, true);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].layer, GlyphLayer::Morphing);
        assert!(approx_eq(glyphs[0].x, 25.0));
        assert!(approx_eq(glyphs[0].color.a, 1.0));
        assert!(approx_eq(glyphs[0].color.g, 0.25));
    }

    #[test]
    fn test_absent_glyph_skipped() {
        let t = Transition {
            from_char: None,
            from_position: 100.0,
            ..replacing()
        };
        let (_, glyphs) = run(&t, 1_050, true);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].ch, 'b');
        assert!(approx_eq(glyphs[0].x, 100.0));
    }
}
