//! Alpha pasting - layering one RGBA image onto another

use image::{Rgba, RgbaImage};

/// Fully transparent pixel
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Paste `src` onto `canvas` with its top-left corner at (`x`, `y`).
///
/// Uses the source alpha as the paste mask (Porter-Duff "source over"):
/// transparent source pixels leave the canvas untouched, opaque ones replace
/// it, and partially transparent ones are blended. Anything falling outside
/// the canvas is clipped, so pasting an image with zero area is a no-op.
pub fn paste(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    paste_at(canvas, src, i64::from(x), i64::from(y));
}

/// Like [`paste`], but the offset may be negative; rows and columns left of
/// or above the canvas are clipped.
pub fn paste_at(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let canvas_width = i64::from(canvas.width());
    let canvas_height = i64::from(canvas.height());

    for (sy, row) in src.rows().enumerate() {
        let dest_y = y + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, pixel) in row.enumerate() {
            let dest_x = x + sx as i64;
            if dest_x < 0 || pixel[3] == 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }
            let (dest_x, dest_y) = (dest_x as u32, dest_y as u32);

            if pixel[3] == 255 {
                canvas.put_pixel(dest_x, dest_y, *pixel);
            } else {
                let dst = canvas.get_pixel(dest_x, dest_y);
                let blended = alpha_blend(pixel, dst);
                canvas.put_pixel(dest_x, dest_y, blended);
            }
        }
    }
}

/// Alpha blend source over destination
pub(crate) fn alpha_blend(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a == 0.0 {
        return TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        let s_f = s as f32 / 255.0;
        let d_f = d as f32 / 255.0;
        let out = (s_f * src_a + d_f * dst_a * (1.0 - src_a)) / out_a;
        (out.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
