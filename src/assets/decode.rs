use std::path::Path;

use crate::{
    assets::SourceImage,
    foundation::error::{FxError, FxResult},
};

/// Read and decode a source illustration from disk.
pub fn load_source_image(path: &Path) -> FxResult<SourceImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        FxError::invalid_input(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_source_image(&bytes).map_err(|e| match e {
        FxError::InvalidInput(msg) => {
            FxError::invalid_input(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Decode encoded image bytes into a straight-alpha RGBA8 [`SourceImage`].
pub fn decode_source_image(bytes: &[u8]) -> FxResult<SourceImage> {
    if bytes.is_empty() {
        return Err(FxError::invalid_input("image data is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FxError::invalid_input(format!("failed to decode image: {e}")))?;
    SourceImage::from_rgba(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
