//! Effect descriptors: one tagged variant per motion law, each with its own parameters.
//!
//! An [`Effect`] holds no image and no clock. Frames are produced by
//! [`Effect::evaluate`], which takes the per-selection [`RenderContext`], the clamped
//! [`Progress`] and an injected random source (only `shake` and `blur_in_shake` draw from it).

pub(crate) mod blur;
pub(crate) mod motion;

use rand::Rng;

use crate::{
    foundation::{
        core::Progress,
        error::{FxError, FxResult},
    },
    render::{context::RenderContext, frame::FrameRGBA, raster},
};

pub use motion::{Pose, shake_offset, shake_wave};

/// Which side of the canvas a slide starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Enter from the left edge (start at `x = -width`).
    #[default]
    Left,
    /// Enter from the right edge (start at `x = canvas_width`).
    Right,
}

/// Parameters for `slide_in`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideIn {
    /// Entry side.
    pub direction: Direction,
}

/// Parameters for `slide_in_overshoot`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideInOvershoot {
    /// Entry side.
    pub direction: Direction,
    /// Pixels travelled past center before springing back.
    pub overshoot: f64,
    /// Fraction of the duration spent reaching the overshoot point, in `(0, 1)`.
    pub overshoot_ratio: f64,
}

impl Default for SlideInOvershoot {
    fn default() -> Self {
        Self {
            direction: Direction::Left,
            overshoot: 100.0,
            overshoot_ratio: 0.7,
        }
    }
}

/// Parameters for `blur_in`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlurIn {
    /// Gaussian radius (standard deviation, pixels) at the first frame.
    pub max_blur_radius: f64,
}

impl Default for BlurIn {
    fn default() -> Self {
        Self {
            max_blur_radius: 15.0,
        }
    }
}

/// Parameters for `shake`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Shake {
    /// Peak horizontal amplitude in pixels.
    pub intensity: f64,
    /// Oscillation frequency in Hz.
    pub frequency: f64,
}

impl Default for Shake {
    fn default() -> Self {
        Self {
            intensity: 15.0,
            frequency: 25.0,
        }
    }
}

/// Parameters for `bounce`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bounce {
    /// Initial lift above the resting position, in pixels.
    pub bounce_height: f64,
}

impl Default for Bounce {
    fn default() -> Self {
        Self {
            bounce_height: 150.0,
        }
    }
}

/// Parameters for `blur_in_shake`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlurInShake {
    /// See [`BlurIn::max_blur_radius`].
    pub max_blur_radius: f64,
    /// See [`Shake::intensity`].
    pub intensity: f64,
    /// See [`Shake::frequency`].
    pub frequency: f64,
}

impl Default for BlurInShake {
    fn default() -> Self {
        let blur = BlurIn::default();
        let shake = Shake::default();
        Self {
            max_blur_radius: blur.max_blur_radius,
            intensity: shake.intensity,
            frequency: shake.frequency,
        }
    }
}

impl BlurInShake {
    pub(crate) fn blur(self) -> BlurIn {
        BlurIn {
            max_blur_radius: self.max_blur_radius,
        }
    }

    pub(crate) fn shake(self) -> Shake {
        Shake {
            intensity: self.intensity,
            frequency: self.frequency,
        }
    }
}

/// A named entrance effect and its parameters.
///
/// Serialized form is internally tagged, e.g. `{"effect": "slide_in", "direction": "right"}`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Grow from nothing to the target size, centered.
    BubblePop,
    /// Ease in horizontally from off-screen.
    SlideIn(SlideIn),
    /// Linear slide past center, then linear spring-back.
    SlideInOvershoot(SlideInOvershoot),
    /// Alpha scaled by cubic ease-out progress.
    FadeIn,
    /// Gaussian blur decaying to sharp.
    BlurIn(BlurIn),
    /// Ease down from above the canvas.
    Drop,
    /// Horizontal sine wobble plus bounded random jitter.
    Shake(Shake),
    /// Damped vertical bounce settling onto the resting position.
    Bounce(Bounce),
    /// `blur_in` and `shake` composed.
    BlurInShake(BlurInShake),
    /// Horizontal page flip around the vertical axis.
    #[serde(rename = "rotate_3d_page_flip")]
    PageFlip,
    /// Isotropic scale ringing around 1.
    #[serde(rename = "bounce_pop_animation")]
    BouncePop,
    /// Scale driven by a bounce ease curve, settling to exactly 1.
    BubbleBouncePop,
    /// Alpha ramps linearly with progress.
    TransparentIn,
    /// Shrink from 1.5x while fading in and moving down from above the canvas (linear).
    PlaceInY,
    /// Same as `place_in_y`, driven by cubic ease-out progress.
    PlaceInZ,
}

/// Largest accepted blur radius in pixels; wider than any canvas this crate renders.
pub const MAX_BLUR_RADIUS: f64 = 1000.0;

/// Canonical effect names, in catalog order.
pub const EFFECT_NAMES: [&str; 15] = [
    "bubble_pop",
    "slide_in",
    "slide_in_overshoot",
    "fade_in",
    "blur_in",
    "drop",
    "shake",
    "bounce",
    "blur_in_shake",
    "rotate_3d_page_flip",
    "bounce_pop_animation",
    "bubble_bounce_pop",
    "transparent_in",
    "place_in_y",
    "place_in_z",
];

impl Effect {
    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BubblePop => "bubble_pop",
            Self::SlideIn(_) => "slide_in",
            Self::SlideInOvershoot(_) => "slide_in_overshoot",
            Self::FadeIn => "fade_in",
            Self::BlurIn(_) => "blur_in",
            Self::Drop => "drop",
            Self::Shake(_) => "shake",
            Self::Bounce(_) => "bounce",
            Self::BlurInShake(_) => "blur_in_shake",
            Self::PageFlip => "rotate_3d_page_flip",
            Self::BouncePop => "bounce_pop_animation",
            Self::BubbleBouncePop => "bubble_bounce_pop",
            Self::TransparentIn => "transparent_in",
            Self::PlaceInY => "place_in_y",
            Self::PlaceInZ => "place_in_z",
        }
    }

    /// Build an effect with default parameters from its name.
    ///
    /// Accepts the canonical names plus the `slide_in_left` / `slide_in_right` aliases.
    pub fn from_name(name: &str) -> FxResult<Self> {
        let effect = match name.trim() {
            "bubble_pop" => Self::BubblePop,
            "slide_in" | "slide_in_left" => Self::SlideIn(SlideIn::default()),
            "slide_in_right" => Self::SlideIn(SlideIn {
                direction: Direction::Right,
            }),
            "slide_in_overshoot" => Self::SlideInOvershoot(SlideInOvershoot::default()),
            "fade_in" => Self::FadeIn,
            "blur_in" => Self::BlurIn(BlurIn::default()),
            "drop" => Self::Drop,
            "shake" => Self::Shake(Shake::default()),
            "bounce" => Self::Bounce(Bounce::default()),
            "blur_in_shake" => Self::BlurInShake(BlurInShake::default()),
            "rotate_3d_page_flip" => Self::PageFlip,
            "bounce_pop_animation" => Self::BouncePop,
            "bubble_bounce_pop" => Self::BubbleBouncePop,
            "transparent_in" => Self::TransparentIn,
            "place_in_y" => Self::PlaceInY,
            "place_in_z" => Self::PlaceInZ,
            other => {
                return Err(FxError::invalid_input(format!(
                    "unknown effect '{other}' (expected one of: {})",
                    EFFECT_NAMES.join(", ")
                )));
            }
        };
        Ok(effect)
    }

    /// Build an effect from a JSON object such as `{"effect": "shake", "intensity": 8}`.
    pub fn from_json(json: &str) -> FxResult<Self> {
        let effect: Self = serde_json::from_str(json)
            .map_err(|e| FxError::invalid_input(format!("invalid effect parameters: {e}")))?;
        effect.validate()?;
        Ok(effect)
    }

    /// `false` for effects that draw from the random source.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Self::Shake(_) | Self::BlurInShake(_))
    }

    /// Reject non-finite or out-of-range parameters.
    pub fn validate(&self) -> FxResult<()> {
        match *self {
            Self::SlideInOvershoot(p) => {
                finite("overshoot", p.overshoot)?;
                if !(p.overshoot_ratio > 0.0 && p.overshoot_ratio < 1.0) {
                    return Err(FxError::invalid_input(format!(
                        "overshoot_ratio must be strictly between 0 and 1, got {}",
                        p.overshoot_ratio
                    )));
                }
            }
            Self::BlurIn(p) => blur_radius(p.max_blur_radius)?,
            Self::Shake(p) => {
                non_negative("intensity", p.intensity)?;
                finite("frequency", p.frequency)?;
            }
            Self::Bounce(p) => finite("bounce_height", p.bounce_height)?,
            Self::BlurInShake(p) => {
                blur_radius(p.max_blur_radius)?;
                non_negative("intensity", p.intensity)?;
                finite("frequency", p.frequency)?;
            }
            Self::BubblePop
            | Self::SlideIn(_)
            | Self::FadeIn
            | Self::Drop
            | Self::PageFlip
            | Self::BouncePop
            | Self::BubbleBouncePop
            | Self::TransparentIn
            | Self::PlaceInY
            | Self::PlaceInZ => {}
        }
        Ok(())
    }

    /// Composite one frame: a canvas-sized premultiplied RGBA8 buffer.
    pub fn evaluate<R: Rng>(
        &self,
        ctx: &RenderContext,
        progress: Progress,
        rng: &mut R,
    ) -> FxResult<FrameRGBA> {
        let pose = self.pose(ctx.layout(), progress, rng);
        raster::rasterize(ctx, &pose)
    }
}

fn finite(name: &str, v: f64) -> FxResult<()> {
    if !v.is_finite() {
        return Err(FxError::invalid_input(format!("{name} must be finite, got {v}")));
    }
    Ok(())
}

fn non_negative(name: &str, v: f64) -> FxResult<()> {
    finite(name, v)?;
    if v < 0.0 {
        return Err(FxError::invalid_input(format!("{name} must be >= 0, got {v}")));
    }
    Ok(())
}

fn blur_radius(v: f64) -> FxResult<()> {
    non_negative("max_blur_radius", v)?;
    if v > MAX_BLUR_RADIUS {
        return Err(FxError::invalid_input(format!(
            "max_blur_radius must be <= {MAX_BLUR_RADIUS}, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
