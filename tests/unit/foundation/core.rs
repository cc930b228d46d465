use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::integer(60).unwrap().as_f64(), 60.0);
}

#[test]
fn fps_ffmpeg_arg_is_rational_only_when_needed() {
    assert_eq!(Fps::integer(60).unwrap().to_ffmpeg_arg(), "60");
    assert_eq!(Fps::new(30000, 1001).unwrap().to_ffmpeg_arg(), "30000/1001");
}

#[test]
fn canvas_requires_even_non_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(11, 10).is_err());
    let c = Canvas::new(1080, 1920).unwrap();
    assert_eq!(c.rgba_len(), 1080 * 1920 * 4);
}

#[test]
fn progress_clamps_outside_duration() {
    assert_eq!(Progress::from_time(-1.0, 0.3).linear, 0.0);
    assert_eq!(Progress::from_time(0.6, 0.3).linear, 1.0);
    assert_eq!(Progress::from_time(0.6, 0.3).t, 0.6);
    assert!((Progress::from_time(0.15, 0.3).linear - 0.5).abs() < 1e-12);
}

#[test]
fn progress_freezes_at_ends_for_infinite_times() {
    assert_eq!(Progress::from_time(f64::INFINITY, 0.3).linear, 1.0);
    assert_eq!(Progress::from_time(f64::NEG_INFINITY, 0.3).linear, 0.0);
    assert_eq!(Progress::from_time(f64::NAN, 0.3).linear, 0.0);
    assert_eq!(Progress::from_time(f64::INFINITY, 0.0).linear, 0.0);
}
