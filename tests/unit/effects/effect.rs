use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{assets::SourceImage, foundation::core::Canvas, layout::placement::PlacementRegion};

fn ctx() -> RenderContext {
    let canvas = Canvas::new(64, 100).unwrap();
    let region = PlacementRegion::from_fractions(100, 0.4, 0.01).unwrap();
    let src = image::RgbaImage::from_pixel(20, 10, image::Rgba([0, 0, 255, 255]));
    RenderContext::new(canvas, region, SourceImage::from_rgba(src).unwrap()).unwrap()
}

#[test]
fn names_round_trip_through_from_name() {
    for name in EFFECT_NAMES {
        let effect = Effect::from_name(name).unwrap();
        assert_eq!(effect.name(), name);
    }
}

#[test]
fn slide_aliases_pick_direction() {
    assert_eq!(
        Effect::from_name("slide_in_left").unwrap(),
        Effect::SlideIn(SlideIn::default())
    );
    assert_eq!(
        Effect::from_name("slide_in_right").unwrap(),
        Effect::SlideIn(SlideIn {
            direction: Direction::Right
        })
    );
}

#[test]
fn unknown_name_is_invalid_input() {
    let err = Effect::from_name("spin").unwrap_err();
    assert!(matches!(err, FxError::InvalidInput(_)));
    assert!(err.to_string().contains("spin"));
}

#[test]
fn json_uses_snake_case_tag_and_defaults() {
    let e = Effect::from_json(r#"{"effect": "shake", "intensity": 8}"#).unwrap();
    assert_eq!(
        e,
        Effect::Shake(Shake {
            intensity: 8.0,
            frequency: 25.0
        })
    );
    let flip = Effect::from_json(r#"{"effect": "rotate_3d_page_flip"}"#).unwrap();
    assert_eq!(flip, Effect::PageFlip);
    let v = serde_json::to_value(Effect::SlideIn(SlideIn {
        direction: Direction::Right,
    }))
    .unwrap();
    assert_eq!(v, serde_json::json!({"effect": "slide_in", "direction": "right"}));
}

#[test]
fn json_rejects_bad_parameters() {
    for bad in [
        r#"{"effect": "slide_in_overshoot", "overshoot_ratio": 1.0}"#,
        r#"{"effect": "slide_in_overshoot", "overshoot_ratio": 0.0}"#,
        r#"{"effect": "blur_in", "max_blur_radius": -1}"#,
        r#"{"effect": "shake", "intensity": -2}"#,
        r#"{"effect": "shake", "intensty": 8}"#,
        r#"{"effect": "blur_in", "max_blur_radius": 1e13}"#,
        r#"{"effect": "blur_in_shake", "max_blur_radius": 1001}"#,
        r#"{"effect": "warp"}"#,
        r#"not json"#,
    ] {
        let err = Effect::from_json(bad).unwrap_err();
        assert!(matches!(err, FxError::InvalidInput(_)), "{bad}");
    }
}

#[test]
fn only_shakes_are_random() {
    let random: Vec<_> = EFFECT_NAMES
        .iter()
        .filter(|n| !Effect::from_name(n).unwrap().is_deterministic())
        .copied()
        .collect();
    assert_eq!(random, ["shake", "blur_in_shake"]);
}

#[test]
fn evaluate_produces_canvas_sized_premultiplied_frames() {
    let ctx = ctx();
    let mut rng = StdRng::seed_from_u64(5);
    for name in EFFECT_NAMES {
        let effect = Effect::from_name(name).unwrap();
        let frame = effect
            .evaluate(&ctx, Progress::at(0.5, 0.5), &mut rng)
            .unwrap();
        assert_eq!((frame.width, frame.height), (64, 100), "{name}");
        assert!(frame.premultiplied);
        assert_eq!(frame.data.len(), 64 * 100 * 4);
    }
}

#[test]
fn deterministic_effects_ignore_the_rng() {
    let ctx = ctx();
    let effect = Effect::BubbleBouncePop;
    let a = effect
        .evaluate(&ctx, Progress::at(0.3, 0.5), &mut StdRng::seed_from_u64(1))
        .unwrap();
    let b = effect
        .evaluate(&ctx, Progress::at(0.3, 0.5), &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn blur_radius_limit_is_inclusive() {
    let at_limit = Effect::BlurIn(BlurIn {
        max_blur_radius: MAX_BLUR_RADIUS,
    });
    at_limit.validate().unwrap();
}

#[test]
fn huge_shake_stays_on_a_finite_track() {
    let ctx = ctx();
    let effect = Effect::Shake(Shake {
        intensity: 1e30,
        frequency: 25.0,
    });
    effect.validate().unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    for i in 0..4 {
        let t = f64::from(i) * 0.01;
        let frame = effect
            .evaluate(&ctx, Progress::from_time(t, 0.3), &mut rng)
            .unwrap();
        assert_eq!(frame.data.len(), 64 * 100 * 4);
    }
}
