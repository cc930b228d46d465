use image::imageops;

use crate::{
    effects::{
        Pose,
        blur::{MIN_BLUR_RADIUS, gaussian_blur_premul},
    },
    foundation::{
        error::{FxError, FxResult},
        math::{mul_div255_u8, premultiply_rgba8_in_place},
    },
    render::{context::RenderContext, frame::FrameRGBA},
};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied sprite ready to composite.
pub(crate) struct Sprite {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba8_premul: Vec<u8>,
}

/// Paint `pose` onto a fresh transparent canvas.
pub(crate) fn rasterize(ctx: &RenderContext, pose: &Pose) -> FxResult<FrameRGBA> {
    let canvas = ctx.layout().canvas;
    let mut frame = FrameRGBA::transparent(canvas);
    let Some((w, h)) = pose.size else {
        return Ok(frame);
    };
    if pose.opacity <= 0.0 || !overlaps(pose.x, pose.y, w, h, canvas.width, canvas.height) {
        return Ok(frame);
    }

    let sprite = prepare_sprite(ctx, w, h, pose.mirrored, pose.blur_radius)?;
    draw_sprite_over(&mut frame, &sprite, pose.x, pose.y, pose.opacity as f32)?;
    Ok(frame)
}

fn overlaps(x: i64, y: i64, w: u32, h: u32, cw: u32, ch: u32) -> bool {
    x < i64::from(cw) && y < i64::from(ch) && x + i64::from(w) > 0 && y + i64::from(h) > 0
}

pub(crate) fn prepare_sprite(
    ctx: &RenderContext,
    width: u32,
    height: u32,
    mirrored: bool,
    blur_radius: f64,
) -> FxResult<Sprite> {
    let mut img = ctx.sized(width, height);
    if mirrored {
        imageops::flip_horizontal_in_place(&mut img);
    }
    let mut rgba8_premul = img.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    if blur_radius >= MIN_BLUR_RADIUS {
        rgba8_premul = gaussian_blur_premul(&rgba8_premul, width, height, blur_radius)?;
    }
    Ok(Sprite {
        width,
        height,
        rgba8_premul,
    })
}

/// Source-over `sprite` onto `frame` with its top-left at `(x, y)`, clipped to the frame.
pub(crate) fn draw_sprite_over(
    frame: &mut FrameRGBA,
    sprite: &Sprite,
    x: i64,
    y: i64,
    opacity: f32,
) -> FxResult<()> {
    if !frame.premultiplied {
        return Err(FxError::invalid_input(
            "draw_sprite_over expects a premultiplied frame",
        ));
    }
    let (fw, fh) = (i64::from(frame.width), i64::from(frame.height));
    let (sw, sh) = (i64::from(sprite.width), i64::from(sprite.height));
    let (x0, y0) = (x.max(0), y.max(0));
    let (x1, y1) = ((x + sw).min(fw), (y + sh).min(fh));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for dy in y0..y1 {
        let sy = dy - y;
        for dx in x0..x1 {
            let sx = dx - x;
            let si = ((sy * sw + sx) * 4) as usize;
            let di = ((dy * fw + dx) * 4) as usize;
            let s = &sprite.rgba8_premul[si..si + 4];
            let d = &mut frame.data[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Premultiplied source-over with an extra opacity multiplier on the source.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
