use std::f64::consts::PI;

/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-out: `1 - (1 - t)^3`.
    OutCubic,
    /// Hermite smoothstep: `t^2 (3 - 2t)`.
    SmoothStep,
    /// Four-segment piecewise quadratic "bounce" ease-out.
    OutBounce,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::OutBounce => out_bounce(t),
        }
    }
}

fn out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// `cos(4.5πp) · e^(−6p)`: starts at 1 and decays toward 0 with alternating sign.
pub fn damped_cosine(p: f64) -> f64 {
    (4.5 * PI * p).cos() * (-6.0 * p).exp()
}

/// `1 + 0.2 · e^(−5p) · cos(8πp)`: isotropic scale that rings around 1.
pub fn pop_oscillation(p: f64) -> f64 {
    1.0 + 0.2 * (-5.0 * p).exp() * (8.0 * PI * p).cos()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
