use std::f64::consts::{FRAC_PI_2, PI, TAU};

use rand::Rng;

use crate::{
    animation::ease::{Ease, damped_cosine, pop_oscillation},
    effects::{Direction, Effect, Shake, SlideIn, SlideInOvershoot},
    foundation::core::Progress,
    layout::placement::{Layout, TargetSize},
};

/// Where and how the source image is painted for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Painted size; `None` paints nothing (zero-scale states).
    pub size: Option<(u32, u32)>,
    /// Left edge on the canvas, may be negative or past the right edge.
    pub x: i64,
    /// Top edge on the canvas.
    pub y: i64,
    /// Multiplier on the source alpha, `[0, 1]`.
    pub opacity: f64,
    /// Gaussian blur standard deviation in pixels.
    pub blur_radius: f64,
    /// Paint the horizontally mirrored image.
    pub mirrored: bool,
}

impl Pose {
    /// Target size at the resting position, fully opaque and sharp.
    pub fn rest(layout: &Layout) -> Self {
        let (x, y) = layout.rest();
        Self {
            size: Some((layout.target.width, layout.target.height)),
            x,
            y,
            opacity: 1.0,
            blur_radius: 0.0,
            mirrored: false,
        }
    }

    /// Paint `size`, centered in the band.
    fn centered(layout: &Layout, size: Option<(u32, u32)>) -> Self {
        let mut pose = Self::rest(layout);
        pose.size = size;
        if let Some((w, h)) = size {
            (pose.x, pose.y) = layout.centered(w, h);
        }
        pose
    }
}

impl Effect {
    /// Evaluate the motion law at `progress`.
    ///
    /// Pure for deterministic effects; `shake` and `blur_in_shake` draw one sample from `rng`.
    pub fn pose<R: Rng>(&self, layout: &Layout, progress: Progress, rng: &mut R) -> Pose {
        let p = progress.linear;
        let e = Ease::OutCubic.apply(p);
        let target = layout.target;
        let (rest_x, rest_y) = layout.rest();

        match *self {
            Self::BubblePop => Pose::centered(layout, scaled_size(target, p)),
            Self::SlideIn(params) => {
                let mut pose = Pose::rest(layout);
                pose.x = slide_in_x(params, layout, e);
                pose
            }
            Self::SlideInOvershoot(params) => {
                let mut pose = Pose::rest(layout);
                pose.x = slide_in_overshoot_x(params, layout, p);
                pose
            }
            Self::FadeIn => Pose {
                opacity: e,
                ..Pose::rest(layout)
            },
            Self::BlurIn(params) => Pose {
                blur_radius: params.max_blur_radius * (1.0 - e),
                ..Pose::rest(layout)
            },
            Self::Drop => {
                let start_y = -f64::from(target.height);
                Pose {
                    y: lerp(start_y, rest_y as f64, e).round() as i64,
                    ..Pose::rest(layout)
                }
            }
            Self::Shake(params) => Pose {
                x: shaken_x(layout, rest_x, shake_offset(params, progress.t, rng)),
                ..Pose::rest(layout)
            },
            Self::Bounce(params) => Pose {
                y: (rest_y as f64 - params.bounce_height * damped_cosine(p)).round() as i64,
                ..Pose::rest(layout)
            },
            Self::BlurInShake(params) => Pose {
                x: shaken_x(layout, rest_x, shake_offset(params.shake(), progress.t, rng)),
                blur_radius: params.blur().max_blur_radius * (1.0 - e),
                ..Pose::rest(layout)
            },
            Self::PageFlip => {
                let angle = Ease::SmoothStep.apply(p) * PI;
                let w = ((f64::from(target.width) * angle.cos().abs()).round() as u32).max(1);
                Pose {
                    // Past edge-on the back face shows.
                    mirrored: angle > FRAC_PI_2,
                    ..Pose::centered(layout, Some((w, target.height)))
                }
            }
            Self::BouncePop => Pose::centered(layout, scaled_size(target, pop_oscillation(p))),
            Self::BubbleBouncePop => {
                Pose::centered(layout, scaled_size(target, bubble_bounce_scale(p)))
            }
            Self::TransparentIn => Pose {
                opacity: p,
                ..Pose::rest(layout)
            },
            Self::PlaceInY => place_in(layout, p),
            Self::PlaceInZ => place_in(layout, e),
        }
    }
}

/// `target * scale` rounded, at least 1px; `None` when `scale <= 0`.
pub(crate) fn scaled_size(target: TargetSize, scale: f64) -> Option<(u32, u32)> {
    if scale.is_nan() || scale <= 0.0 {
        return None;
    }
    let w = (f64::from(target.width) * scale).round() as u32;
    let h = (f64::from(target.height) * scale).round() as u32;
    Some((w.max(1), h.max(1)))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn slide_start_x(direction: Direction, layout: &Layout) -> f64 {
    match direction {
        Direction::Left => -f64::from(layout.target.width),
        Direction::Right => f64::from(layout.canvas.width),
    }
}

pub(crate) fn slide_in_x(params: SlideIn, layout: &Layout, eased: f64) -> i64 {
    let start = slide_start_x(params.direction, layout);
    let (center, _) = layout.rest();
    lerp(start, center as f64, eased).round() as i64
}

pub(crate) fn slide_in_overshoot_x(params: SlideInOvershoot, layout: &Layout, p: f64) -> i64 {
    let start = slide_start_x(params.direction, layout);
    let center = layout.rest().0 as f64;
    let over = match params.direction {
        Direction::Left => center + params.overshoot,
        Direction::Right => center - params.overshoot,
    };
    let ratio = params.overshoot_ratio;
    let x = if p < ratio {
        lerp(start, over, p / ratio)
    } else {
        lerp(over, center, (p - ratio) / (1.0 - ratio))
    };
    x.round() as i64
}

/// Deterministic part of the shake offset: `intensity * sin(2π * frequency * t)`.
pub fn shake_wave(params: Shake, t: f64) -> f64 {
    params.intensity * (TAU * params.frequency * t).sin()
}

/// Horizontal shake offset in pixels: the sine wave plus uniform jitter in
/// `[-intensity/3, intensity/3]`.
pub fn shake_offset<R: Rng>(params: Shake, t: f64, rng: &mut R) -> f64 {
    let bound = params.intensity / 3.0;
    let jitter = if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    };
    shake_wave(params, t) + jitter
}

/// Resting `x` moved by a shake offset, truncated toward zero. Offsets beyond one canvas plus
/// one image width are clamped; the image is off-canvas either way.
pub(crate) fn shaken_x(layout: &Layout, rest_x: i64, offset: f64) -> i64 {
    let limit = f64::from(layout.canvas.width) + f64::from(layout.target.width);
    let offset = if offset.is_nan() { 0.0 } else { offset.clamp(-limit, limit) };
    rest_x.saturating_add(offset.trunc() as i64)
}

pub(crate) fn bubble_bounce_scale(p: f64) -> f64 {
    let scale = Ease::OutBounce.apply(p) / 1.05 * 1.2;
    if p > 0.95 {
        let settle = ((p - 0.95) / 0.05).clamp(0.0, 1.0);
        scale * (1.0 - settle) + settle
    } else {
        scale
    }
}

/// Shared law of `place_in_y` / `place_in_z`: scale 1.5 -> 1, alpha 0 -> 1, and a drop from
/// one scaled height above the canvas to the resting `y`.
fn place_in(layout: &Layout, k: f64) -> Pose {
    const START_SCALE: f64 = 1.5;
    let target = layout.target;
    let scale = lerp(START_SCALE, 1.0, k);
    let size = scaled_size(target, scale);
    let start_y = -(f64::from(target.height) * START_SCALE).round();
    let (_, rest_y) = layout.rest();
    let mut pose = Pose::centered(layout, size);
    pose.y = lerp(start_y, rest_y as f64, k).round() as i64;
    pose.opacity = k;
    pose
}

#[cfg(test)]
#[path = "../../tests/unit/effects/motion.rs"]
mod tests;
