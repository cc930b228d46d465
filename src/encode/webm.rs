use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;
use tempfile::TempDir;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameIndex,
        error::{FxError, FxResult},
        math::unpremultiply_rgba8,
    },
    render::frame::FrameRGBA,
};

/// File name pattern of the intermediate PNG sequence, as understood by ffmpeg's image2 demuxer.
const FRAME_PATTERN: &str = "frame_%06d.png";

/// Options for [`WebmSink`].
#[derive(Clone, Debug)]
pub struct WebmSinkOpts {
    /// ffmpeg executable to run.
    pub ffmpeg_bin: PathBuf,
    /// VP9 constant-quality level (`-crf`, 0..=63, lower is better).
    pub crf: u32,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl Default for WebmSinkOpts {
    fn default() -> Self {
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            crf: 30,
            overwrite: true,
        }
    }
}

/// Sink that stages frames as a lossless PNG sequence in a private temp directory, then runs
/// ffmpeg once to produce a VP9 + alpha WebM.
///
/// The staging directory is unique per render and is removed on every exit path.
pub struct WebmSink {
    opts: WebmSinkOpts,
    cfg: Option<SinkConfig>,
    staging: Option<TempDir>,
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
    output_touched: bool,
}

impl WebmSink {
    /// Create a new sink.
    pub fn new(opts: WebmSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            staging: None,
            scratch: Vec::new(),
            last_idx: None,
            output_touched: false,
        }
    }

    /// Staging directory of the render in progress, if any.
    pub fn staging_dir(&self) -> Option<&Path> {
        self.staging.as_ref().map(TempDir::path)
    }

    fn ffmpeg_command(&self, cfg: &SinkConfig, staging: &Path) -> Command {
        let fps = cfg.fps.to_ffmpeg_arg();
        let mut cmd = Command::new(&self.opts.ffmpeg_bin);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args(["-loglevel", "error", "-framerate", &fps, "-i"])
            .arg(staging.join(FRAME_PATTERN))
            // Single pass, no alternate reference frames: alt-ref corrupts the alpha plane.
            .args([
                "-c:v",
                "libvpx-vp9",
                "-auto-alt-ref",
                "0",
                "-b:v",
                "0",
                "-crf",
                &self.opts.crf.to_string(),
                "-pix_fmt",
                "yuva420p",
                "-an",
                "-r",
                &fps,
            ])
            .arg(&cfg.out_path);
        cmd
    }

    fn remove_partial_output(&mut self) {
        if !self.output_touched {
            return;
        }
        self.output_touched = false;
        if let Some(cfg) = self.cfg.as_ref()
            && let Err(e) = std::fs::remove_file(&cfg.out_path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                out = %cfg.out_path.display(),
                error = %e,
                "failed to remove partial output"
            );
        }
    }
}

impl FrameSink for WebmSink {
    fn begin(&mut self, cfg: SinkConfig) -> FxResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FxError::invalid_input(
                "webm sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(FxError::invalid_input(
                "webm sink width/height must be even (required for yuva420p output)",
            ));
        }
        if self.opts.crf > 63 {
            return Err(FxError::invalid_input("vp9 crf must be within 0..=63"));
        }

        ensure_parent_dir(&cfg.out_path)?;
        if !self.opts.overwrite && cfg.out_path.exists() {
            return Err(FxError::invalid_input(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        let staging = tempfile::Builder::new()
            .prefix("fxclip-frames-")
            .tempdir()
            .context("create frame staging directory")?;
        tracing::debug!(
            staging = %staging.path().display(),
            frames = cfg.frame_count,
            "staging frames for webm encode"
        );

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.staging = Some(staging);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.output_touched = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FxResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| FxError::encoding("webm sink not started"))?;
        let staging = self
            .staging
            .as_ref()
            .ok_or_else(|| FxError::encoding("webm sink is already finalized"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(FxError::encoding(
                "webm sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(FxError::invalid_input(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(FxError::invalid_input(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let pixels: &[u8] = if frame.premultiplied {
            unpremultiply_rgba8(&mut self.scratch, &frame.data);
            &self.scratch
        } else {
            &frame.data
        };

        // ffmpeg's image2 demuxer numbers from 0 when the first file is frame_000000.
        let path = staging.path().join(format!("frame_{:06}.png", idx.0));
        image::save_buffer_with_format(
            &path,
            pixels,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write staged frame '{}'", path.display()))?;

        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> FxResult<()> {
        let staging = self
            .staging
            .take()
            .ok_or_else(|| FxError::encoding("webm sink not started"))?;
        let cfg = self
            .cfg
            .clone()
            .ok_or_else(|| FxError::encoding("webm sink not started"))?;
        if self.last_idx.is_none() {
            return Err(FxError::encoding("webm sink received no frames"));
        }

        let mut cmd = self.ffmpeg_command(&cfg, staging.path());
        tracing::debug!(command = ?cmd, "running ffmpeg");
        self.output_touched = true;
        let output = cmd.output();
        drop(staging);

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                self.remove_partial_output();
                return Err(FxError::encoding(format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.opts.ffmpeg_bin.display()
                )));
            }
        };
        if !output.status.success() {
            self.remove_partial_output();
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FxError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        self.output_touched = false;
        self.cfg = None;
        Ok(())
    }

    fn abort(&mut self) {
        self.staging = None;
        self.remove_partial_output();
        self.cfg = None;
        self.last_idx = None;
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> FxResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `bin -version` runs successfully.
pub fn is_ffmpeg_on_path(bin: impl AsRef<Path>) -> bool {
    Command::new(bin.as_ref())
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/webm.rs"]
mod tests;
