use super::*;

#[test]
fn tiny_radius_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = gaussian_blur_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
    let out = gaussian_blur_premul(&src, 1, 2, 0.01).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = gaussian_blur_premul(&src, w, h, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = gaussian_blur_premul(&src, w, h, 1.0).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    assert!(out[center + 3] < 255);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 20);
}

#[test]
fn kernel_sums_to_one_in_q16() {
    for sigma in [0.5f64, 1.0, 3.7, 15.0] {
        let radius = (3.0 * sigma).ceil() as usize;
        let k = gaussian_kernel_q16(radius, sigma);
        assert_eq!(k.len(), 2 * radius + 1);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    }
}

#[test]
fn mismatched_buffer_is_rejected() {
    assert!(gaussian_blur_premul(&[0u8; 7], 1, 2, 1.0).is_err());
}

#[test]
fn huge_radius_is_bounded_by_the_image() {
    let (w, h) = (4u32, 2u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    src[0..4].copy_from_slice(&[255, 255, 255, 255]);
    let out = gaussian_blur_premul(&src, w, h, 1e13).unwrap();
    assert_eq!(out.len(), src.len());
    assert!(out.chunks_exact(4).all(|px| px[3] > 0));
}
