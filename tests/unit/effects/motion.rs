use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{
    effects::{BlurIn, BlurInShake, Bounce, EFFECT_NAMES},
    foundation::core::Canvas,
    layout::placement::PlacementRegion,
};

// 64x100 canvas, band rows 1..40, 20x10 source: rests at (22, 15) at its native size.
fn layout() -> Layout {
    let canvas = Canvas::new(64, 100).unwrap();
    let region = PlacementRegion::from_fractions(100, 0.4, 0.01).unwrap();
    Layout::new(canvas, region, (20, 10)).unwrap()
}

fn pose_at(effect: Effect, p: f64) -> Pose {
    let mut rng = StdRng::seed_from_u64(0);
    effect.pose(&layout(), Progress::at(p, 1.0), &mut rng)
}

#[test]
fn rest_pose_is_centered_in_band() {
    let pose = Pose::rest(&layout());
    assert_eq!(pose.size, Some((20, 10)));
    assert_eq!((pose.x, pose.y), (22, 15));
    assert_eq!(pose.opacity, 1.0);
    assert!(!pose.mirrored);
}

#[test]
fn every_effect_ends_at_rest() {
    let rest = Pose::rest(&layout());
    for name in EFFECT_NAMES {
        let effect = Effect::from_name(name).unwrap();
        if !effect.is_deterministic() {
            continue;
        }
        let end = pose_at(effect, 1.0);
        assert_eq!(end.size, rest.size, "{name}");
        assert_eq!((end.x, end.y), (rest.x, rest.y), "{name}");
        assert!((end.opacity - 1.0).abs() < 1e-12, "{name}");
        assert!(end.blur_radius < 1e-9, "{name}");
        // A finished page flip shows its back face.
        assert_eq!(end.mirrored, effect == Effect::PageFlip, "{name}");
    }
}

#[test]
fn bubble_pop_grows_from_nothing() {
    assert_eq!(pose_at(Effect::BubblePop, 0.0).size, None);
    let half = pose_at(Effect::BubblePop, 0.5);
    assert_eq!(half.size, Some((10, 5)));
    assert_eq!((half.x, half.y), (27, 18));
}

#[test]
fn scaled_size_keeps_one_pixel_minimum() {
    let target = TargetSize {
        width: 20,
        height: 10,
    };
    assert_eq!(scaled_size(target, 0.0), None);
    assert_eq!(scaled_size(target, -1.0), None);
    assert_eq!(scaled_size(target, f64::NAN), None);
    assert_eq!(scaled_size(target, 0.01), Some((1, 1)));
    assert_eq!(scaled_size(target, 1.5), Some((30, 15)));
}

#[test]
fn slide_in_starts_off_canvas() {
    let left = pose_at(Effect::SlideIn(SlideIn::default()), 0.0);
    assert_eq!((left.x, left.y), (-20, 15));
    let right = pose_at(
        Effect::SlideIn(SlideIn {
            direction: Direction::Right,
        }),
        0.0,
    );
    assert_eq!(right.x, 64);
}

#[test]
fn overshoot_passes_center_then_returns() {
    let params = SlideInOvershoot::default();
    let l = layout();
    assert_eq!(slide_in_overshoot_x(params, &l, 0.0), -20);
    assert_eq!(slide_in_overshoot_x(params, &l, 0.7), 122);
    assert_eq!(slide_in_overshoot_x(params, &l, 1.0), 22);

    let right = SlideInOvershoot {
        direction: Direction::Right,
        ..params
    };
    assert_eq!(slide_in_overshoot_x(right, &l, 0.0), 64);
    assert_eq!(slide_in_overshoot_x(right, &l, 0.7), -78);
    assert_eq!(slide_in_overshoot_x(right, &l, 1.0), 22);
}

#[test]
fn fade_and_transparent_differ_in_easing() {
    assert_eq!(pose_at(Effect::FadeIn, 0.0).opacity, 0.0);
    assert!((pose_at(Effect::FadeIn, 0.5).opacity - 0.875).abs() < 1e-12);
    assert!((pose_at(Effect::TransparentIn, 0.5).opacity - 0.5).abs() < 1e-12);
}

#[test]
fn blur_in_decays_from_max() {
    let p = pose_at(Effect::BlurIn(BlurIn::default()), 0.0);
    assert_eq!(p.blur_radius, 15.0);
    assert_eq!((p.x, p.y), (22, 15));
}

#[test]
fn drop_starts_one_height_above() {
    assert_eq!(pose_at(Effect::Drop, 0.0).y, -10);
}

#[test]
fn bounce_starts_lifted_by_height() {
    let p = pose_at(Effect::Bounce(Bounce::default()), 0.0);
    assert_eq!(p.y, 15 - 150);
    assert_eq!(p.x, 22);
}

#[test]
fn shake_jitter_is_bounded() {
    let params = Shake::default();
    let mut rng = StdRng::seed_from_u64(42);
    for i in 0..200 {
        let t = f64::from(i) / 60.0;
        let off = shake_offset(params, t, &mut rng);
        assert!((off - shake_wave(params, t)).abs() <= params.intensity / 3.0 + 1e-9);
    }
}

#[test]
fn shake_without_intensity_stays_put() {
    let params = Shake {
        intensity: 0.0,
        frequency: 25.0,
    };
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(shake_offset(params, 0.123, &mut rng), 0.0);
    let p = pose_at(Effect::Shake(params), 0.4);
    assert_eq!((p.x, p.y), (22, 15));
}

#[test]
fn shake_is_reproducible_for_a_seed() {
    let effect = Effect::Shake(Shake::default());
    let l = layout();
    let xs = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..30)
            .map(|i| effect.pose(&l, Progress::from_time(f64::from(i) / 60.0, 0.5), &mut rng).x)
            .collect::<Vec<_>>()
    };
    assert_eq!(xs(9), xs(9));
}

#[test]
fn blur_in_shake_combines_both_laws() {
    let effect = Effect::BlurInShake(BlurInShake::default());
    let mut rng = StdRng::seed_from_u64(3);
    let p = effect.pose(&layout(), Progress::at(0.0, 0.3), &mut rng);
    assert_eq!(p.blur_radius, 15.0);
    assert!((p.x - 22).abs() <= 20);
}

#[test]
fn page_flip_mirrors_only_past_edge_on() {
    let start = pose_at(Effect::PageFlip, 0.0);
    assert_eq!(start.size, Some((20, 10)));
    assert!(!start.mirrored);
    assert!(!pose_at(Effect::PageFlip, 0.25).mirrored);
    assert!(pose_at(Effect::PageFlip, 0.75).mirrored);
    assert!(pose_at(Effect::PageFlip, 1.0).mirrored);

    let mid = pose_at(Effect::PageFlip, 0.5);
    assert_eq!(mid.size, Some((1, 10)));
    assert_eq!(mid.x, (64 - 1) / 2);
    assert!(!mid.mirrored);
}

#[test]
fn shake_offset_is_clamped_to_canvas_reach() {
    let l = layout();
    let (rest_x, _) = l.rest();
    assert_eq!(shaken_x(&l, rest_x, 1e30), rest_x + 84);
    assert_eq!(shaken_x(&l, rest_x, -1e30), rest_x - 84);
    assert_eq!(shaken_x(&l, rest_x, f64::NAN), rest_x);
    assert_eq!(shaken_x(&l, rest_x, -3.7), rest_x - 3);

    let huge = Effect::Shake(Shake {
        intensity: 1e30,
        frequency: 25.0,
    });
    let mut rng = StdRng::seed_from_u64(2);
    for i in 0..4 {
        let p = huge.pose(&l, Progress::from_time(f64::from(i) * 0.01, 0.3), &mut rng);
        assert!((p.x - rest_x).abs() <= 84);
    }
}

#[test]
fn bounce_pop_starts_oversized() {
    assert_eq!(pose_at(Effect::BouncePop, 0.0).size, Some((24, 12)));
}

#[test]
fn bubble_bounce_settles_to_exactly_one() {
    assert_eq!(bubble_bounce_scale(0.0), 0.0);
    assert_eq!(bubble_bounce_scale(1.0), 1.0);
    assert_eq!(pose_at(Effect::BubbleBouncePop, 0.0).size, None);
}

#[test]
fn place_in_starts_large_and_above() {
    let start = pose_at(Effect::PlaceInY, 0.0);
    assert_eq!(start.size, Some((30, 15)));
    assert_eq!(start.y, -15);
    assert_eq!(start.x, 17);
    assert_eq!(start.opacity, 0.0);

    let z = pose_at(Effect::PlaceInZ, 0.5);
    let y = pose_at(Effect::PlaceInY, 0.5);
    assert!((z.opacity - 0.875).abs() < 1e-12);
    assert!((y.opacity - 0.5).abs() < 1e-12);
    assert!(z.y > y.y);
}
