pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Straight RGBA8 -> premultiplied RGBA8, in place.
pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

/// Premultiplied RGBA8 -> straight RGBA8, writing into `dst`.
pub(crate) fn unpremultiply_rgba8(dst: &mut [u8], src_premul: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u32::from(s[3]);
        match a {
            0 => d.copy_from_slice(&[0, 0, 0, 0]),
            255 => d.copy_from_slice(s),
            _ => {
                for c in 0..3 {
                    let v = (u32::from(s[c]) * 255 + a / 2) / a;
                    d[c] = v.min(255) as u8;
                }
                d[3] = s[3];
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
