use std::path::Path;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Fps, FrameIndex},
        error::{FxError, FxResult},
    },
    render::frame::FrameRGBA,
    session::effect_session::EffectSession,
};

/// Counters reported by a finished render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the sink.
    pub frames_total: u64,
}

/// Number of frames in a clip: `round(duration * fps)`.
pub fn frame_count(duration: f64, fps: Fps) -> u64 {
    (duration * fps.as_f64()).round().max(0.0) as u64
}

/// Sample time of frame `idx`: the temporal center of the frame, `(idx + 0.5) / fps`.
pub fn sample_time(idx: FrameIndex, fps: Fps) -> f64 {
    (idx.0 as f64 + 0.5) * fps.frame_duration_secs()
}

fn checked_frame_count(session: &EffectSession, fps: Fps) -> FxResult<u64> {
    let n = frame_count(session.duration(), fps);
    if n == 0 {
        return Err(FxError::invalid_input(format!(
            "{}s at {} fps yields no frames",
            session.duration(),
            fps.as_f64()
        )));
    }
    Ok(n)
}

/// Materialize every frame of the session in presentation order.
pub fn render_frames(session: &mut EffectSession, fps: Fps) -> FxResult<Vec<FrameRGBA>> {
    let n = checked_frame_count(session, fps)?;
    let mut out = Vec::with_capacity(n.min(4096) as usize);
    for i in 0..n {
        out.push(session.frame(sample_time(FrameIndex(i), fps))?);
    }
    Ok(out)
}

/// Stream every frame of the session into `sink`, targeting `out_path`.
///
/// On failure the sink is aborted before the error propagates, so temporary staging and any
/// partial output are gone.
#[tracing::instrument(skip(session, sink), fields(effect = session.effect().name()))]
pub fn render_to_sink(
    session: &mut EffectSession,
    fps: Fps,
    sink: &mut dyn FrameSink,
    out_path: &Path,
) -> FxResult<RenderStats> {
    let frames_total = checked_frame_count(session, fps)?;
    let canvas = session.context().layout().canvas;
    let cfg = SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
        frame_count: frames_total,
        out_path: out_path.to_path_buf(),
    };
    tracing::info!(
        frames = frames_total,
        fps = fps.as_f64(),
        duration = session.duration(),
        "rendering clip"
    );

    let result = stream(session, fps, frames_total, sink, cfg);
    if result.is_err() {
        sink.abort();
    }
    result
}

fn stream(
    session: &mut EffectSession,
    fps: Fps,
    frames_total: u64,
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
) -> FxResult<RenderStats> {
    sink.begin(cfg)?;
    for i in 0..frames_total {
        let idx = FrameIndex(i);
        let frame = session.frame(sample_time(idx, fps))?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;
    Ok(RenderStats { frames_total })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
