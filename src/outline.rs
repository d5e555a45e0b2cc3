//! Outline effect - a one-pixel ring around a badge's opaque silhouette

use image::{Rgba, RgbaImage};

use crate::blend::TRANSPARENT;

/// Offsets of the 8 neighbours of a pixel
const NEIGHBOURS: [(i64, i64); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

/// The outline ring of `image` on its own, without the image.
///
/// The result is one pixel larger than `image` on every side; pixel (1, 1)
/// of the ring lines up with pixel (0, 0) of the image. A ring pixel is set
/// to `color` when the image is uncovered there (alpha 0 or outside its
/// bounds) but covered at one of its 8 neighbours.
pub fn ring(image: &RgbaImage, color: Rgba<u8>) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::from_pixel(width + 2, height + 2, TRANSPARENT);

    let covered = |x: i64, y: i64| -> bool {
        x >= 0
            && y >= 0
            && x < width as i64
            && y < height as i64
            && image.get_pixel(x as u32, y as u32)[3] > 0
    };

    for y in 0..height + 2 {
        for x in 0..width + 2 {
            let (ix, iy) = (x as i64 - 1, y as i64 - 1);
            if covered(ix, iy) {
                continue;
            }
            if NEIGHBOURS.iter().any(|(dx, dy)| covered(ix + dx, iy + dy)) {
                out.put_pixel(x, y, color);
            }
        }
    }

    out
}

/// Draw a one-pixel outline of `color` around the visible part of `image`.
///
/// The alpha-covered silhouette grows one pixel outward, so the returned
/// copy is `(w + 2) x (h + 2)` with the original at offset (1, 1). Original
/// pixels stay on top unchanged.
pub fn outline(image: &RgbaImage, color: Rgba<u8>) -> RgbaImage {
    let mut out = ring(image, color);
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            out.put_pixel(x + 1, y + 1, *pixel);
        }
    }
    out
}
