use crate::foundation::error::{FxError, FxResult};

/// Radii below this are treated as sharp.
pub(crate) const MIN_BLUR_RADIUS: f64 = 0.05;

/// Gaussian blur of a premultiplied RGBA8 buffer with standard deviation `sigma` pixels.
///
/// Separable Q16 kernel of half-width `ceil(3 * sigma)`, capped at the longer side; samples
/// past the edges clamp to the border, so the footprint keeps its size.
pub(crate) fn gaussian_blur_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f64,
) -> FxResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FxError::invalid_input("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(FxError::invalid_input(
            "gaussian_blur_premul expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma < MIN_BLUR_RADIUS {
        return Ok(src.to_vec());
    }

    // Taps past the longer side only resample the clamped edge.
    let max_radius = width.max(height) as usize;
    let radius = ((3.0 * sigma).ceil() as usize).min(max_radius);
    let kernel = gaussian_kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    convolve(src, &mut tmp, width as usize, height as usize, &kernel, Axis::X);
    convolve(&tmp, &mut out, width as usize, height as usize, &kernel, Axis::Y);
    Ok(out)
}

/// Normalized weights in Q16; the center tap absorbs rounding drift so they sum to 1.0.
fn gaussian_kernel_q16(radius: usize, sigma: f64) -> Vec<u32> {
    let r = radius as i64;
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;
    weights
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn convolve(src: &[u8], dst: &mut [u8], w: usize, h: usize, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x as i64 + d).clamp(0, w as i64 - 1) as usize, y),
                    Axis::Y => (x, (y as i64 + d).clamp(0, h as i64 - 1) as usize),
                };
                let idx = (sy * w + sx) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = (y * w + x) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
