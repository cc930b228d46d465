use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::{SourceImage, decode::load_source_image},
    effects::Effect,
    encode::{
        sink::FrameSink,
        webm::{WebmSink, WebmSinkOpts, ensure_parent_dir},
    },
    foundation::{
        core::{Canvas, Fps},
        error::{FxError, FxResult},
    },
    layout::placement::PlacementRegion,
    render::{context::RenderContext, frame::FrameRGBA, pipeline},
    session::{
        config::{AnimatorConfig, validate_duration},
        effect_session::EffectSession,
    },
};

/// Selects an effect for an image, then renders it to a transparent clip.
///
/// Usage is select-then-render: each `select*` call replaces the pending session, and each
/// render consumes it.
#[derive(Debug)]
pub struct Animator {
    config: AnimatorConfig,
    canvas: Canvas,
    region: PlacementRegion,
    session: Option<EffectSession>,
    last_effect: Option<Effect>,
}

impl Animator {
    /// Validate `config` and create its output directory.
    pub fn new(config: AnimatorConfig) -> FxResult<Self> {
        let (canvas, region) = config.validate()?;
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("create output dir '{}'", config.output_dir.display())
        })?;
        Ok(Self {
            config,
            canvas,
            region,
            session: None,
            last_effect: None,
        })
    }

    /// Effective configuration.
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Canvas derived from the configuration.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Load `image_path` and select `effect` for it.
    ///
    /// `duration` falls back to the configured default. A failed selection leaves no pending
    /// session behind.
    #[tracing::instrument(skip(self, effect), fields(effect = effect.name()))]
    pub fn select(
        &mut self,
        effect: Effect,
        image_path: &Path,
        duration: Option<f64>,
    ) -> FxResult<()> {
        self.session = None;
        let source = load_source_image(image_path)?;
        self.select_image(effect, source, duration)
    }

    /// Select `effect` for an already decoded image.
    pub fn select_image(
        &mut self,
        effect: Effect,
        source: SourceImage,
        duration: Option<f64>,
    ) -> FxResult<()> {
        self.session = None;
        effect.validate()?;
        let duration = validate_duration(duration.unwrap_or(self.config.default_duration))?;
        let ctx = RenderContext::new(self.canvas, self.region, source)?;
        tracing::debug!(
            effect = effect.name(),
            duration,
            target_w = ctx.layout().target.width,
            target_h = ctx.layout().target.height,
            "effect selected"
        );
        self.session = Some(EffectSession::new(effect, ctx, duration, self.config.seed));
        self.last_effect = Some(effect);
        Ok(())
    }

    /// Select an effect by name with default parameters.
    pub fn select_by_name(
        &mut self,
        name: &str,
        image_path: &Path,
        duration: Option<f64>,
    ) -> FxResult<()> {
        self.session = None;
        let effect = Effect::from_name(name)?;
        self.select(effect, image_path, duration)
    }

    /// Most recently selected effect, kept after its render.
    pub fn last_effect(&self) -> Option<&Effect> {
        self.last_effect.as_ref()
    }

    /// Duration of the pending session, if any.
    pub fn current_duration(&self) -> Option<f64> {
        self.session.as_ref().map(EffectSession::duration)
    }

    /// Composite a single frame of the pending session without consuming it.
    pub fn frame_at(&mut self, t: f64) -> FxResult<FrameRGBA> {
        let session = self.session.as_mut().ok_or(FxError::NoEffectSelected)?;
        session.frame(t)
    }

    /// Resolve `filename` against the output directory.
    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.config.output_dir.join(filename)
    }

    /// Render the pending session to `<output_dir>/<filename>` as VP9 WebM with alpha.
    pub fn render(&mut self, filename: &str, fps: Fps) -> FxResult<PathBuf> {
        let mut sink = WebmSink::new(WebmSinkOpts::default());
        self.render_with_sink(filename, fps, &mut sink)
    }

    /// Render the pending session into any [`FrameSink`]. Returns the output path.
    pub fn render_with_sink(
        &mut self,
        filename: &str,
        fps: Fps,
        sink: &mut dyn FrameSink,
    ) -> FxResult<PathBuf> {
        if filename.trim().is_empty() {
            return Err(FxError::invalid_input("output filename must not be empty"));
        }
        let mut session = self.session.take().ok_or(FxError::NoEffectSelected)?;
        let out = self.output_path(filename);
        ensure_parent_dir(&out)?;
        let stats = pipeline::render_to_sink(&mut session, fps, sink, &out)?;
        tracing::info!(
            out = %out.display(),
            frames = stats.frames_total,
            "clip written"
        );
        Ok(out)
    }

    /// Consume the pending session and return its frames in memory.
    pub fn render_frames(&mut self, fps: Fps) -> FxResult<Vec<FrameRGBA>> {
        let mut session = self.session.take().ok_or(FxError::NoEffectSelected)?;
        pipeline::render_frames(&mut session, fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animator.rs"]
mod tests;
