use rand::{SeedableRng, rngs::StdRng};

use crate::{
    effects::Effect,
    foundation::{core::Progress, error::FxResult},
    render::{context::RenderContext, frame::FrameRGBA},
};

/// One selected effect bound to its image, duration and random source.
///
/// Produced by an effect selection and consumed by one render.
#[derive(Clone, Debug)]
pub struct EffectSession {
    effect: Effect,
    ctx: RenderContext,
    duration: f64,
    rng: StdRng,
}

impl EffectSession {
    /// Bind `effect` to a prepared context. `seed` fixes the shake jitter.
    pub fn new(effect: Effect, ctx: RenderContext, duration: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            effect,
            ctx,
            duration,
            rng,
        }
    }

    /// The selected effect.
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// Clip length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Layout and source image.
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Composite the frame at sample time `t` seconds.
    ///
    /// `t` outside `[0, duration]` freezes at the start or end state.
    pub fn frame(&mut self, t: f64) -> FxResult<FrameRGBA> {
        let progress = Progress::from_time(t, self.duration);
        self.effect.evaluate(&self.ctx, progress, &mut self.rng)
    }
}
