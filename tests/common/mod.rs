//! Shared fixtures: a complete asset tree written to a temporary directory

#![allow(dead_code)]

use image::{GrayImage, Luma, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const SHIRT: Rgba<u8> = Rgba([40, 60, 30, 255]);
pub const TAPE: Rgba<u8> = Rgba([220, 210, 170, 255]);
pub const GOLD: Rgba<u8> = Rgba([255, 215, 0, 255]);
pub const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Core color of each fixture ribbon
pub fn ribbon_color(name: &str) -> Rgba<u8> {
    match name {
        "A" => Rgba([200, 0, 0, 255]),
        "B" => Rgba([0, 200, 0, 255]),
        "C" => Rgba([0, 0, 200, 255]),
        "D" => Rgba([200, 200, 0, 255]),
        _ => Rgba([128, 128, 128, 255]),
    }
}

/// An 8x3 ribbon: one transparent pixel of margin around a 6x1 core
pub fn ribbon(color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(8, 3, |x, y| if (1..7).contains(&x) && y == 1 { color } else { CLEAR })
}

/// A 7x2 commendation: 6x1 core, transparent right column and bottom row
pub fn commendation(color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(7, 2, |x, y| if x < 6 && y == 0 { color } else { CLEAR })
}

/// Encode a PIL font where every uppercase letter is a 3x5 block advancing 4
/// and space advances 2.
fn write_block_font(dir: &Path) {
    let mut data = Vec::new();
    data.extend_from_slice(b"PILfont\n;;;;;;5;\nDATA\n");
    for code in 0..256u32 {
        let values: [i16; 10] = if (b'A' as u32..=b'Z' as u32).contains(&code) {
            [4, 0, 0, -5, 3, 0, 0, 0, 3, 5]
        } else if code == b' ' as u32 {
            [2, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        } else {
            [0; 10]
        };
        for v in values {
            data.extend_from_slice(&v.to_be_bytes());
        }
    }
    fs::write(dir.join("block.pil"), data).unwrap();
    GrayImage::from_pixel(3, 5, Luma([255])).save(dir.join("block.png")).unwrap();
}

/// Write a full asset tree plus `rack.toml` and return its directory.
pub fn asset_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let ribbons = root.join("apel/ribbons");
    let commendations = root.join("apel/commendations");
    fs::create_dir_all(&ribbons).unwrap();
    fs::create_dir_all(&commendations).unwrap();
    fs::create_dir_all(root.join("apel/awards")).unwrap();
    fs::create_dir_all(root.join("fonts")).unwrap();

    // Written out of order on purpose
    for name in ["D", "B", "A", "C"] {
        ribbon(ribbon_color(name)).save(ribbons.join(format!("{}.png", name))).unwrap();
    }
    commendation(Rgba([90, 90, 200, 255])).save(commendations.join("Service.png")).unwrap();
    commendation(Rgba([200, 90, 90, 255])).save(commendations.join("Honor.png")).unwrap();

    RgbaImage::from_pixel(128, 128, SHIRT).save(root.join("apel/shirt.png")).unwrap();
    RgbaImage::from_pixel(40, 7, TAPE).save(root.join("apel/nametape.png")).unwrap();
    RgbaImage::from_pixel(5, 5, GOLD).save(root.join("apel/awards/golden.png")).unwrap();
    write_block_font(&root.join("fonts"));

    fs::write(
        root.join("rack.toml"),
        r#"
[assets]
font = "fonts/block.pil"

[ribbons]
badge_size = [8, 3]
per_row = 3

[commendations]
badge_size = [7, 2]
per_row = 3
"#,
    )
    .unwrap();

    dir
}
