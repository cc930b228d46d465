//! Encoder collaborators.
//!
//! Sinks consume rendered frames in presentation order; the ffmpeg-backed [`webm::WebmSink`]
//! is the production sink, [`sink::InMemorySink`] captures frames for tests and previews.

pub(crate) mod sink;
pub(crate) mod webm;
