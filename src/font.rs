//! Bitmap fonts in the PIL `.pil` format
//!
//! A PIL font is two files sharing a stem: the `.pil` metrics file and a
//! bitmap (`.png`, `.gif` or `.pbm`) holding every glyph. The metrics file is
//!
//! ```text
//! PILfont\n
//! <header line>\n
//! <info lines...>\n
//! DATA\n
//! 256 x 10 big-endian i16: dx dy  dst.x0 dst.y0 dst.x1 dst.y1  src.x0 src.y0 src.x1 src.y1
//! ```
//!
//! `dx`/`dy` advance the pen, the destination box is relative to the pen and
//! baseline, and the source box selects the glyph from the bitmap.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use thiserror::Error;

const MAGIC: &[u8] = b"PILfont\n";
const DATA_MARKER: &[u8] = b"DATA\n";
const GLYPH_COUNT: usize = 256;
const RECORD_LEN: usize = 20;
const BITMAP_EXTENSIONS: [&str; 3] = ["png", "gif", "pbm"];

/// Luma values at or above this are ink
const INK_THRESHOLD: u8 = 128;

/// Error loading a bitmap font
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a PIL font file (bad magic)")]
    BadMagic,
    #[error("Font metrics truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("No glyph bitmap found next to '{}' (tried .png, .gif, .pbm)", .0.display())]
    MissingBitmap(PathBuf),
    #[error("Failed to decode glyph bitmap '{}': {source}", path.display())]
    Bitmap {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Glyph {code} source box {src:?} lies outside the {width}x{height} bitmap")]
    GlyphOutOfBounds { code: usize, src: [i16; 4], width: u32, height: u32 },
}

/// Metrics of a single glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Pen advance
    pub advance: (i16, i16),
    /// Destination box relative to the pen and baseline: x0, y0, x1, y1
    pub dst: [i16; 4],
    /// Source box in the glyph bitmap: x0, y0, x1, y1
    pub src: [i16; 4],
}

impl Glyph {
    fn is_empty(&self) -> bool {
        self.src[2] <= self.src[0] || self.src[3] <= self.src[1]
    }
}

/// A loaded bitmap font
#[derive(Debug, Clone)]
pub struct BitmapFont {
    glyphs: Vec<Glyph>,
    bitmap: GrayImage,
    baseline: i32,
    line_height: u32,
}

impl BitmapFont {
    /// Load a PIL font from its `.pil` file and the bitmap beside it.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io { path: path.to_path_buf(), source })?;
        let glyphs = parse_metrics(&data)?;

        let bitmap_path = BITMAP_EXTENSIONS
            .iter()
            .map(|ext| path.with_extension(ext))
            .find(|p| p.is_file())
            .ok_or_else(|| FontError::MissingBitmap(path.to_path_buf()))?;
        let bitmap = image::open(&bitmap_path)
            .map_err(|source| FontError::Bitmap { path: bitmap_path.clone(), source })?
            .to_luma8();

        let font = Self::from_parts(glyphs, bitmap)?;
        log::debug!(
            "Loaded font {} (line height {}, bitmap {})",
            path.display(),
            font.line_height,
            bitmap_path.display()
        );
        Ok(font)
    }

    /// Build a font from glyph metrics and a glyph bitmap.
    ///
    /// `glyphs` is indexed by character code; codes past its end have no
    /// glyph. Every non-empty source box must lie inside the bitmap.
    pub fn from_parts(glyphs: Vec<Glyph>, bitmap: GrayImage) -> Result<Self, FontError> {
        let (width, height) = bitmap.dimensions();
        for (code, glyph) in glyphs.iter().enumerate() {
            if glyph.is_empty() {
                continue;
            }
            let [x0, y0, x1, y1] = glyph.src;
            if x0 < 0 || y0 < 0 || x1 as i64 > width as i64 || y1 as i64 > height as i64 {
                return Err(FontError::GlyphOutOfBounds { code, src: glyph.src, width, height });
            }
        }

        let min_y = glyphs.iter().map(|g| g.dst[1] as i32).min().unwrap_or(0).min(0);
        let max_y = glyphs.iter().map(|g| g.dst[3] as i32).max().unwrap_or(0).max(0);

        Ok(Self {
            glyphs,
            bitmap,
            baseline: -min_y,
            line_height: (max_y - min_y) as u32,
        })
    }

    /// Height of a rendered line of text
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Distance from the top of a line to the baseline
    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    /// Glyph for a character, if the font has one
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(c as usize)
    }

    /// Width in pixels of `text` rendered on one line
    pub fn text_width(&self, text: &str) -> u32 {
        let width: i64 = text
            .chars()
            .filter_map(|c| self.glyph(c))
            .map(|g| g.advance.0 as i64)
            .sum();
        width.max(0) as u32
    }

    /// Render `text` to a mask of `text_width x line_height`; ink is 255.
    ///
    /// Characters without a glyph draw nothing and do not advance the pen.
    pub fn render_mask(&self, text: &str) -> GrayImage {
        let mut mask = GrayImage::new(self.text_width(text), self.line_height);
        let mut pen_x: i64 = 0;
        let mut pen_y: i64 = self.baseline as i64;

        for c in text.chars() {
            let Some(glyph) = self.glyph(c) else {
                log::warn!("No glyph for {:?}, skipping", c);
                continue;
            };
            self.draw_glyph(&mut mask, glyph, pen_x, pen_y);
            pen_x += glyph.advance.0 as i64;
            pen_y += glyph.advance.1 as i64;
        }

        mask
    }

    fn draw_glyph(&self, mask: &mut GrayImage, glyph: &Glyph, pen_x: i64, pen_y: i64) {
        if glyph.is_empty() {
            return;
        }
        let [sx0, sy0, sx1, sy1] = glyph.src.map(|v| v as i64);
        let dx0 = pen_x + glyph.dst[0] as i64;
        let dy0 = pen_y + glyph.dst[1] as i64;
        // Destination box may be smaller than the source box; crop to it
        let w = (sx1 - sx0).min(glyph.dst[2] as i64 - glyph.dst[0] as i64);
        let h = (sy1 - sy0).min(glyph.dst[3] as i64 - glyph.dst[1] as i64);

        for y in 0..h.max(0) {
            for x in 0..w.max(0) {
                let Luma([v]) = *self.bitmap.get_pixel((sx0 + x) as u32, (sy0 + y) as u32);
                if v < INK_THRESHOLD {
                    continue;
                }
                let (tx, ty) = (dx0 + x, dy0 + y);
                if tx >= 0 && ty >= 0 && tx < mask.width() as i64 && ty < mask.height() as i64 {
                    mask.put_pixel(tx as u32, ty as u32, Luma([255]));
                }
            }
        }
    }
}

/// Parse the metrics section of a `.pil` file.
fn parse_metrics(data: &[u8]) -> Result<Vec<Glyph>, FontError> {
    let rest = data.strip_prefix(MAGIC).ok_or(FontError::BadMagic)?;

    // Skip the header line and info lines up to DATA
    let mut offset = 0;
    let mut lines = 0;
    loop {
        let line_end = rest[offset..].iter().position(|&b| b == b'\n');
        let Some(end) = line_end else {
            return Err(FontError::Truncated { expected: GLYPH_COUNT * RECORD_LEN, found: 0 });
        };
        let line = &rest[offset..offset + end + 1];
        offset += end + 1;
        lines += 1;
        if lines > 1 && line == DATA_MARKER {
            break;
        }
    }

    let metrics = &rest[offset..];
    let expected = GLYPH_COUNT * RECORD_LEN;
    if metrics.len() < expected {
        return Err(FontError::Truncated { expected, found: metrics.len() });
    }

    let glyphs = metrics[..expected]
        .chunks_exact(RECORD_LEN)
        .map(|record| {
            let v: Vec<i16> =
                record.chunks_exact(2).map(|p| i16::from_be_bytes([p[0], p[1]])).collect();
            Glyph {
                advance: (v[0], v[1]),
                dst: [v[2], v[3], v[4], v[5]],
                src: [v[6], v[7], v[8], v[9]],
            }
        })
        .collect();
    Ok(glyphs)
}
