//! Frame driver.
//!
//! [`MorphEngine`] owns the displayed text, the in-flight batch and the two
//! curve tracks. Mutators rebuild the batch (alignment and layout run once,
//! at call time); [`MorphEngine::render_frame`] evaluates it and tells the
//! host whether another frame is needed.

use rune_config::MorphConfig;

use crate::align::align;
use crate::blend::{BlendContext, GlyphPaint, Phase, evaluate};
use crate::color::Color;
use crate::curve::{CurveTrack, GlyphExtent, Millis};
use crate::error::Result;
use crate::glyph::GlyphDraw;
use crate::layout::{Alignment, AlignmentState, Viewport, position, static_layout};
use crate::measure::{FixedAdvance, FontdueMeasurer, TextMeasurer};
use crate::settings::{AnimationSpec, MorphSettings, is_valid_size, normalize_duration};
use crate::stagger::StaggerClock;
use crate::text::{SideStyle, StyledText};
use crate::transition::TransitionBatch;

/// Output of one [`MorphEngine::render_frame`] call.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Draw instructions in batch order (outgoing before incoming).
    pub glyphs: Vec<GlyphDraw>,
    /// The host should schedule another frame.
    pub request_next_frame: bool,
    /// Transitions that were mid-curve this frame.
    pub active: usize,
    /// Transitions whose staggered start is still ahead.
    pub pending: usize,
}

pub struct MorphEngine {
    measurer: Box<dyn TextMeasurer>,
    viewport: Viewport,
    settings: MorphSettings,
    show: CurveTrack,
    hide: CurveTrack,
    text: StyledText,
    batch: TransitionBatch,
}

impl MorphEngine {
    /// Engine with fade curves and `settings.duration_ms`.
    pub fn new(measurer: impl TextMeasurer + 'static, settings: MorphSettings) -> Self {
        let spec = AnimationSpec::default();
        let mut engine = Self {
            measurer: Box::new(measurer),
            viewport: Viewport::default(),
            settings,
            show: CurveTrack::new(spec.show),
            hide: CurveTrack::new(spec.hide),
            text: StyledText::default(),
            batch: TransitionBatch::new(),
        };
        engine.set_duration(settings.duration_ms);
        engine
    }

    /// Build an engine from the file model: settings, viewport, curve
    /// presets and, when a font path is configured, fontdue measurement.
    pub fn from_config(config: &MorphConfig) -> Result<Self> {
        let settings = MorphSettings::from_config(config)?;
        let spec = AnimationSpec::from_config(config)?;

        let mut engine = match &config.text.font {
            Some(path) => Self::new(FontdueMeasurer::from_file(path)?, settings),
            None => Self::new(FixedAdvance::default(), settings),
        };
        engine.set_viewport(Viewport::from(&config.layout));
        engine.set_animation_spec(spec);
        Ok(engine)
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    pub fn batch(&self) -> &TransitionBatch {
        &self.batch
    }

    pub fn settings(&self) -> &MorphSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn show_track(&self) -> &CurveTrack {
        &self.show
    }

    pub fn hide_track(&self) -> &CurveTrack {
        &self.hide
    }

    /// A batch is in flight.
    pub fn is_animating(&self) -> bool {
        !self.batch.is_empty()
    }

    /// Takes effect for the next batch; an in-flight batch keeps the
    /// positions it was laid out with.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the displayed text without animating.
    pub fn set_text(&mut self, text: impl Into<StyledText>) {
        self.text = text.into();
        self.batch.clear();
    }

    /// Animate from the displayed text to `text`. Any batch in flight is
    /// discarded; pairing starts from what is on screen now.
    pub fn set_target_sequence(&mut self, text: impl Into<StyledText>, now: Millis) {
        let style = self.settings.ambient();
        let alignment = AlignmentState::uniform(self.settings.alignment);
        self.retarget(text.into(), alignment, style, style, now);
    }

    /// Slide the displayed text to a new alignment.
    pub fn set_alignment(&mut self, alignment: Alignment, now: Millis) {
        let from = self.settings.alignment;
        if from == alignment {
            return;
        }
        self.settings.alignment = alignment;

        let style = self.settings.ambient();
        let text = self.text.clone();
        self.retarget(text, AlignmentState { from, to: alignment }, style, style, now);
    }

    /// Animate the ambient text size. Non-finite or non-positive sizes are
    /// ignored.
    pub fn set_text_size(&mut self, size: f32, now: Millis) {
        if !is_valid_size(size) {
            log::warn!("ignoring text size {}", size);
            return;
        }
        let from_style = self.settings.ambient();
        self.settings.text_size = size;
        self.restyle(from_style, now);
    }

    /// Animate the ambient text colour.
    pub fn set_text_color(&mut self, color: Color, now: Millis) {
        let from_style = self.settings.ambient();
        self.settings.text_color = color;
        self.restyle(from_style, now);
    }

    /// Negative spacing is clamped to zero.
    pub fn set_spacing_interval(&mut self, spacing_ms: Millis) {
        self.settings.spacing_ms = spacing_ms.max(0);
    }

    /// Duration of both curves; non-positive values fall back to the default.
    pub fn set_duration(&mut self, duration_ms: Millis) {
        let duration_ms = normalize_duration(duration_ms);
        self.settings.duration_ms = duration_ms;
        self.show.set_duration_ms(duration_ms);
        self.hide.set_duration_ms(duration_ms);
    }

    /// Install new show/hide curves, duration and stagger interval. A batch
    /// in flight continues on the new curves from its original start.
    pub fn set_animation_spec(&mut self, spec: AnimationSpec) {
        self.show.replace(spec.show);
        self.hide.replace(spec.hide);
        self.set_duration(spec.duration_ms);
        self.set_spacing_interval(spec.spacing_ms);
    }

    pub fn set_auto_slide(&mut self, auto_slide: bool) {
        self.settings.auto_slide = auto_slide;
    }

    /// Evaluate the batch at `now`. Without a batch this is the static
    /// layout of the displayed text.
    pub fn render_frame(&mut self, now: Millis) -> Frame {
        if self.batch.is_empty() {
            return Frame {
                glyphs: self.static_glyphs(),
                request_next_frame: false,
                active: 0,
                pending: 0,
            };
        }

        let clock = StaggerClock::new(self.settings.spacing_ms);
        let mut glyphs = Vec::with_capacity(self.batch.len() * 2);
        let (mut active, mut pending) = (0, 0);

        let mut ctx = BlendContext {
            show: &mut self.show,
            hide: &mut self.hide,
            auto_slide: self.settings.auto_slide,
            paint: GlyphPaint {
                color_blend: self.settings.color_blend,
                viewport: &self.viewport,
                measurer: self.measurer.as_ref(),
            },
        };
        for (i, transition) in self.batch.iter().enumerate() {
            match evaluate(transition, clock.local_time(now, i), &mut ctx, &mut glyphs) {
                Phase::Active => active += 1,
                Phase::Pending => pending += 1,
                Phase::Settled => {}
            }
        }

        // Every transition settled: sample the tracks at global time so they
        // latch "ended". A spacing longer than the duration leaves frames
        // with nothing active but later glyphs still pending.
        if active == 0 && pending == 0 {
            ctx.show.transformation_at(now, GlyphExtent::default());
            ctx.hide.transformation_at(now, GlyphExtent::default());
        }

        let request_next_frame = !self.show.has_ended() || !self.hide.has_ended();
        if !request_next_frame {
            log::debug!("retiring batch of {} transitions at {}ms", self.batch.len(), now);
            self.batch.clear();
        }

        Frame {
            glyphs,
            request_next_frame,
            active,
            pending,
        }
    }

    /// Non-transitional draw of the displayed text.
    pub fn static_glyphs(&self) -> Vec<GlyphDraw> {
        static_layout(
            &self.text,
            self.settings.ambient(),
            self.settings.alignment,
            &self.viewport,
            self.measurer.as_ref(),
        )
    }

    fn restyle(&mut self, from_style: SideStyle, now: Millis) {
        let to_style = self.settings.ambient();
        let alignment = AlignmentState::uniform(self.settings.alignment);
        let text = self.text.clone();
        self.retarget(text, alignment, from_style, to_style, now);
    }

    fn retarget(
        &mut self,
        target: StyledText,
        alignment: AlignmentState,
        from_style: SideStyle,
        to_style: SideStyle,
        now: Millis,
    ) {
        if !self.batch.is_empty() {
            log::debug!("discarding in-flight batch of {} transitions", self.batch.len());
        }

        let walk = self.settings.walk.resolve(alignment.to);
        let mut batch = align(&self.text, &target, walk, from_style, to_style);
        position(&mut batch, alignment, walk, &self.viewport, self.measurer.as_ref());

        log::debug!(
            "built batch of {} transitions walking {:?} ({:?} -> {:?})",
            batch.len(),
            walk,
            alignment.from,
            alignment.to
        );
        for transition in &batch {
            log::trace!("  {}", transition);
        }

        if !batch.is_empty() {
            self.show.start(now);
            self.hide.start(now);
        }
        self.text = target;
        self.batch = batch;
    }
}
