use crate::foundation::error::{FxError, FxResult};

/// 0-based index of a frame inside one rendered clip.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> FxResult<Self> {
        if den == 0 {
            return Err(FxError::invalid_input("fps denominator must be > 0"));
        }
        if num == 0 {
            return Err(FxError::invalid_input("fps numerator must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number frame rate, e.g. `Fps::integer(60)`.
    pub fn integer(fps: u32) -> FxResult<Self> {
        Self::new(fps, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// `num/den` form accepted by ffmpeg's `-r` and `-framerate`.
    pub fn to_ffmpeg_arg(self) -> String {
        if self.den == 1 {
            self.num.to_string()
        } else {
            format!("{}/{}", self.num, self.den)
        }
    }
}

/// Fixed output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    ///
    /// Both dimensions must be non-zero and even (yuva420p chroma subsampling).
    pub fn new(width: u32, height: u32) -> FxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FxError::invalid_input("canvas width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(FxError::invalid_input(
                "canvas width/height must be even (required for yuva420p output)",
            ));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in one RGBA8 frame of this canvas.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Animation progress at one sample time.
///
/// `linear` is `t / duration` clamped to `[0, 1]`; `t` is the raw sample time in seconds,
/// kept for laws that oscillate in absolute time (shake).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Clamped linear progress.
    pub linear: f64,
    /// Raw sample time in seconds.
    pub t: f64,
}

impl Progress {
    /// Progress for sample time `t` inside a clip of `duration` seconds.
    ///
    /// Times past either end freeze at that end; NaN maps to the start.
    pub fn from_time(t: f64, duration: f64) -> Self {
        let linear = if duration.is_nan() || duration <= 0.0 || t.is_nan() {
            0.0
        } else if t == f64::INFINITY {
            1.0
        } else {
            (t / duration).clamp(0.0, 1.0)
        };
        Self { linear, t }
    }

    /// Progress at an explicit linear value; `t` is set to `linear * duration`.
    pub fn at(linear: f64, duration: f64) -> Self {
        let linear = linear.clamp(0.0, 1.0);
        Self {
            linear,
            t: linear * duration,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
