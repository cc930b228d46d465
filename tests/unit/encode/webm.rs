use super::*;
use crate::foundation::core::{Canvas, Fps};

fn cfg(out_path: PathBuf) -> SinkConfig {
    SinkConfig {
        width: 8,
        height: 4,
        fps: Fps::integer(60).unwrap(),
        frame_count: 2,
        out_path,
    }
}

fn frame() -> FrameRGBA {
    let mut f = FrameRGBA::transparent(Canvas::new(8, 4).unwrap());
    f.data[0..4].copy_from_slice(&[128, 0, 0, 128]);
    f
}

#[test]
fn begin_rejects_odd_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts::default());
    let mut c = cfg(dir.path().join("out.webm"));
    c.width = 7;
    assert!(matches!(sink.begin(c), Err(FxError::InvalidInput(_))));
}

#[test]
fn begin_refuses_to_clobber_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.webm");
    std::fs::write(&out, b"keep me").unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts {
        overwrite: false,
        ..WebmSinkOpts::default()
    });
    assert!(sink.begin(cfg(out.clone())).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
}

#[test]
fn frames_are_staged_as_straight_alpha_pngs() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts::default());
    sink.begin(cfg(dir.path().join("out.webm"))).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();

    let staged = sink.staging_dir().unwrap().join("frame_000000.png");
    let img = image::open(&staged).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (8, 4));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
    sink.abort();
}

#[test]
fn out_of_order_frames_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts::default());
    sink.begin(cfg(dir.path().join("out.webm"))).unwrap();
    sink.push_frame(FrameIndex(1), &frame()).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame()).is_err());
    sink.abort();
}

#[test]
fn abort_removes_staging_and_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.webm");
    std::fs::write(&out, b"previous render").unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts::default());
    sink.begin(cfg(out.clone())).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    let staging = sink.staging_dir().unwrap().to_path_buf();
    assert!(staging.exists());

    sink.abort();
    assert!(!staging.exists());
    assert!(out.exists());
}

#[test]
fn missing_encoder_binary_is_encoding_failed() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.webm");
    let mut sink = WebmSink::new(WebmSinkOpts {
        ffmpeg_bin: dir.path().join("definitely-not-ffmpeg"),
        ..WebmSinkOpts::default()
    });
    sink.begin(cfg(out.clone())).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    let staging = sink.staging_dir().unwrap().to_path_buf();

    let err = sink.end().unwrap_err();
    assert!(matches!(err, FxError::EncodingFailed(_)), "{err}");
    assert!(!staging.exists());
    assert!(!out.exists());
}

#[cfg(unix)]
#[test]
fn non_zero_exit_is_encoding_failed_and_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.webm");
    std::fs::write(&out, b"stale").unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts {
        ffmpeg_bin: PathBuf::from("false"),
        ..WebmSinkOpts::default()
    });
    sink.begin(cfg(out.clone())).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    let staging = sink.staging_dir().unwrap().to_path_buf();

    let err = sink.end().unwrap_err();
    assert!(matches!(err, FxError::EncodingFailed(_)), "{err}");
    assert!(!staging.exists());
    assert!(!out.exists());
}

#[cfg(unix)]
#[test]
fn failed_cleanup_still_reports_the_encoder_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory in place of the output file cannot be removed with `remove_file`.
    let out = dir.path().join("out.webm");
    std::fs::create_dir(&out).unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts {
        ffmpeg_bin: PathBuf::from("false"),
        ..WebmSinkOpts::default()
    });
    sink.begin(cfg(out.clone())).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();

    let err = sink.end().unwrap_err();
    assert!(matches!(err, FxError::EncodingFailed(_)), "{err}");
    assert!(out.is_dir());
}

#[test]
fn end_without_frames_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = WebmSink::new(WebmSinkOpts::default());
    sink.begin(cfg(dir.path().join("out.webm"))).unwrap();
    assert!(sink.end().is_err());
}
