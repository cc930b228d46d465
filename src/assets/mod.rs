pub(crate) mod decode;

/// Decoded source illustration, straight-alpha RGBA8.
///
/// Loaded once per effect selection and never mutated; every frame resamples from it.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub(crate) rgba: image::RgbaImage,
}

impl SourceImage {
    /// Wrap an already decoded RGBA8 image.
    ///
    /// Zero-area images are rejected.
    pub fn from_rgba(rgba: image::RgbaImage) -> crate::FxResult<Self> {
        let (w, h) = rgba.dimensions();
        if w == 0 || h == 0 {
            return Err(crate::FxError::invalid_input(format!(
                "source image has zero area ({w}x{h})"
            )));
        }
        Ok(Self { rgba })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Borrow the decoded pixels.
    pub fn as_rgba(&self) -> &image::RgbaImage {
        &self.rgba
    }
}
