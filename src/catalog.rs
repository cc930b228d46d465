//! Recommended duration and sound cue for every named effect.

use crate::{effects::Effect, foundation::error::FxResult};

/// One catalog row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CatalogEntry {
    /// Effect name as accepted by [`Effect::from_name`].
    pub animation: &'static str,
    /// Recommended clip length in seconds.
    pub duration_secs: f64,
    /// Sound-effect tag to pair with the clip.
    pub sfx: &'static str,
}

impl CatalogEntry {
    /// Effect with default parameters for this row.
    pub fn effect(&self) -> FxResult<Effect> {
        Effect::from_name(self.animation)
    }
}

const fn entry(animation: &'static str, duration_secs: f64, sfx: &'static str) -> CatalogEntry {
    CatalogEntry {
        animation,
        duration_secs,
        sfx,
    }
}

/// Every catalog row, in presentation order.
pub static CATALOG: [CatalogEntry; 16] = [
    entry("bubble_pop", 0.15, "pop"),
    entry("slide_in_left", 0.3, "whoosh"),
    entry("slide_in_right", 0.3, "whoosh"),
    entry("slide_in_overshoot", 0.5, "spring"),
    entry("fade_in", 0.5, "chime"),
    entry("blur_in", 0.5, "whoosh"),
    entry("drop", 0.5, "thud"),
    entry("shake", 0.3, "shake"),
    entry("bounce", 0.3, "boing"),
    entry("blur_in_shake", 0.3, "whoosh"),
    entry("rotate_3d_page_flip", 0.5, "page_flip"),
    entry("bounce_pop_animation", 0.5, "pop"),
    entry("bubble_bounce_pop", 0.5, "pop"),
    entry("transparent_in", 0.5, "shimmer"),
    entry("place_in_y", 0.5, "whoosh"),
    entry("place_in_z", 0.5, "zoom"),
];

/// Find a catalog row by exact name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.animation == name)
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
