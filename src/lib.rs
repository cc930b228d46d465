//! fxclip turns a still image into a short transparent motion-graphics clip.
//!
//! The API is select-then-render:
//!
//! - Build an [`Animator`] from an [`AnimatorConfig`]
//! - Select an [`Effect`] for an image (this fixes layout, duration and random seed)
//! - Render the selection into a [`FrameSink`], by default a VP9 WebM with alpha via `ffmpeg`
//!
//! Every effect resolves each frame to a [`Pose`] (size, position, opacity, blur, mirroring)
//! and composites the resampled image onto a transparent canvas.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod catalog;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Progress};
pub use crate::foundation::error::{FxError, FxResult};

pub use crate::animation::ease::{Ease, damped_cosine, pop_oscillation};
pub use crate::assets::SourceImage;
pub use crate::assets::decode::{decode_source_image, load_source_image};
pub use crate::catalog::{CATALOG, CatalogEntry, lookup};
pub use crate::effects::{
    BlurIn, BlurInShake, Bounce, Direction, EFFECT_NAMES, Effect, MAX_BLUR_RADIUS, Pose, Shake,
    SlideIn, SlideInOvershoot, shake_offset, shake_wave,
};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::webm::{WebmSink, WebmSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::layout::placement::{
    Layout, PlacementRegion, TargetSize, centered_position, compute_target_size,
};
pub use crate::render::context::RenderContext;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{
    RenderStats, frame_count, render_frames, render_to_sink, sample_time,
};
pub use crate::session::animator::Animator;
pub use crate::session::config::AnimatorConfig;
pub use crate::session::effect_session::EffectSession;
