//! Target sizing and centered placement inside the illustration band of the canvas.

use crate::foundation::{
    core::Canvas,
    error::{FxError, FxResult},
};

/// Vertical band of the canvas reserved for content.
///
/// Content is centered between `padding_top` and `top_area_height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRegion {
    /// Bottom edge of the band, `int(canvas_height * illustration_fraction)`.
    pub top_area_height: u32,
    /// Top edge of the band, `int(canvas_height * padding_fraction)`.
    pub padding_top: u32,
}

impl PlacementRegion {
    /// Derive the band from canvas height and the two fractions.
    pub fn from_fractions(
        canvas_height: u32,
        illustration_fraction: f64,
        padding_fraction: f64,
    ) -> FxResult<Self> {
        for (name, v) in [
            ("illustration height fraction", illustration_fraction),
            ("padding fraction", padding_fraction),
        ] {
            if !v.is_finite() || v < 0.0 || v > 1.0 {
                return Err(FxError::invalid_input(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        let h = f64::from(canvas_height);
        let region = Self {
            top_area_height: (h * illustration_fraction) as u32,
            padding_top: (h * padding_fraction) as u32,
        };
        if region.available_height() == 0 {
            return Err(FxError::invalid_input(
                "placement region is empty (padding must be smaller than the illustration area)",
            ));
        }
        Ok(region)
    }

    /// Usable content height, `top_area_height - padding_top`.
    pub fn available_height(self) -> u32 {
        self.top_area_height.saturating_sub(self.padding_top)
    }
}

/// Size the source image is scaled to for its resting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSize {
    /// Width in pixels, at least 1.
    pub width: u32,
    /// Height in pixels, at least 1.
    pub height: u32,
}

/// Largest aspect-preserving size that fits the region without upscaling.
///
/// `scale = min(max_w / w, max_h / h, 1)`; each dimension is floored and kept `>= 1`.
pub fn compute_target_size(
    source: (u32, u32),
    region: PlacementRegion,
    canvas_width: u32,
) -> FxResult<TargetSize> {
    let (iw, ih) = source;
    if iw == 0 || ih == 0 {
        return Err(FxError::invalid_input("source image has zero area"));
    }
    let (iw, ih) = (u64::from(iw), u64::from(ih));
    let max_w = u64::from(canvas_width);
    let max_h = u64::from(region.available_height());
    if max_w == 0 || max_h == 0 {
        return Err(FxError::invalid_input("placement region has zero area"));
    }
    // Exact rational form of floor(dim * min(max_w / iw, max_h / ih, 1)).
    let (w, h) = if iw <= max_w && ih <= max_h {
        (iw, ih)
    } else if iw * max_h >= ih * max_w {
        (max_w, ih * max_w / iw)
    } else {
        (iw * max_h / ih, max_h)
    };
    Ok(TargetSize {
        width: w.max(1) as u32,
        height: h.max(1) as u32,
    })
}

/// Top-left corner that centers `content` horizontally on the canvas and vertically in the band.
///
/// Floor division, so content wider than the canvas gets a deterministic negative `x`.
pub fn centered_position(
    content: (u32, u32),
    region: PlacementRegion,
    canvas_width: u32,
) -> (i64, i64) {
    let (w, h) = (i64::from(content.0), i64::from(content.1));
    let x = (i64::from(canvas_width) - w).div_euclid(2);
    let band = i64::from(region.top_area_height) - i64::from(region.padding_top);
    let y = i64::from(region.padding_top) + (band - h).div_euclid(2);
    (x, y)
}

/// Canvas, band and resting size for one effect selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Output surface.
    pub canvas: Canvas,
    /// Content band.
    pub region: PlacementRegion,
    /// Resting size of the source image.
    pub target: TargetSize,
}

impl Layout {
    /// Compute the layout for a source image of `source` pixels.
    pub fn new(canvas: Canvas, region: PlacementRegion, source: (u32, u32)) -> FxResult<Self> {
        let target = compute_target_size(source, region, canvas.width)?;
        Ok(Self {
            canvas,
            region,
            target,
        })
    }

    /// Centered top-left for arbitrary content size.
    pub fn centered(&self, width: u32, height: u32) -> (i64, i64) {
        centered_position((width, height), self.region, self.canvas.width)
    }

    /// Centered top-left for the target size (the resting position of most effects).
    pub fn rest(&self) -> (i64, i64) {
        self.centered(self.target.width, self.target.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
