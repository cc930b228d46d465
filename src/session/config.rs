use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Canvas,
        error::{FxError, FxResult},
    },
    layout::placement::PlacementRegion,
};

/// Construction parameters for an [`Animator`](crate::Animator).
///
/// Every field has a default, so a JSON config only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Bottom of the illustration band as a fraction of canvas height.
    pub illustration_height_percent: f64,
    /// Top padding of the band as a fraction of canvas height.
    pub padding_percent: f64,
    /// Clip length in seconds when a selection does not pass one.
    pub default_duration: f64,
    /// Directory that rendered files are written to; created if absent.
    pub output_dir: PathBuf,
    /// Seed for the shake jitter; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1080,
            canvas_height: 1920,
            illustration_height_percent: 0.4,
            padding_percent: 0.01,
            default_duration: 0.3,
            output_dir: PathBuf::from("./"),
            seed: None,
        }
    }
}

impl AnimatorConfig {
    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> FxResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f)).map_err(|e| {
            FxError::invalid_input(format!("parse config '{}': {e}", path.display()))
        })?;
        Ok(cfg)
    }

    /// Validate and derive the canvas and placement band.
    pub fn validate(&self) -> FxResult<(Canvas, PlacementRegion)> {
        let canvas = Canvas::new(self.canvas_width, self.canvas_height)?;
        if self.illustration_height_percent <= 0.0 {
            return Err(FxError::invalid_input(
                "illustration_height_percent must be > 0",
            ));
        }
        let region = PlacementRegion::from_fractions(
            self.canvas_height,
            self.illustration_height_percent,
            self.padding_percent,
        )?;
        validate_duration(self.default_duration)?;
        Ok((canvas, region))
    }
}

/// Durations must be finite and strictly positive.
pub(crate) fn validate_duration(duration: f64) -> FxResult<f64> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(FxError::invalid_input(format!(
            "duration must be a positive number of seconds, got {duration}"
        )));
    }
    Ok(duration)
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
