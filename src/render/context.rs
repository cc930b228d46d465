use image::imageops::{self, FilterType};

use crate::{
    assets::SourceImage,
    foundation::{core::Canvas, error::FxResult},
    layout::placement::{Layout, PlacementRegion},
};

/// Everything an effect needs to paint a frame, fixed at selection time.
#[derive(Clone, Debug)]
pub struct RenderContext {
    layout: Layout,
    source: SourceImage,
    /// Source resampled once to the target size; reused by fixed-size poses.
    rest: image::RgbaImage,
}

impl RenderContext {
    /// Compute the layout for `source` and pre-resample its resting size.
    pub fn new(canvas: Canvas, region: PlacementRegion, source: SourceImage) -> FxResult<Self> {
        let layout = Layout::new(canvas, region, (source.width(), source.height()))?;
        let rest = resample(&source, layout.target.width, layout.target.height);
        Ok(Self {
            layout,
            source,
            rest,
        })
    }

    /// Canvas, band and target size.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The decoded source image.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Source at `width x height`, always resampled from the original pixels.
    pub(crate) fn sized(&self, width: u32, height: u32) -> image::RgbaImage {
        if (width, height) == (self.layout.target.width, self.layout.target.height) {
            return self.rest.clone();
        }
        resample(&self.source, width, height)
    }
}

fn resample(source: &SourceImage, width: u32, height: u32) -> image::RgbaImage {
    let rgba = source.as_rgba();
    if rgba.dimensions() == (width, height) {
        return rgba.clone();
    }
    imageops::resize(rgba, width, height, FilterType::Lanczos3)
}
