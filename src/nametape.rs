//! Nametape rendering - a name printed onto the nametape template

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::blend::alpha_blend;
use crate::font::BitmapFont;

/// Horizontal placement of the name on the tape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Centre the line inside the template, then shift by the offset
    #[default]
    Center,
    /// Top-left of the line at the offset
    Left,
}

/// How text is placed on the nametape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NametapeStyle {
    pub align: Align,
    pub offset: (i32, i32),
    pub color: Rgba<u8>,
}

impl Default for NametapeStyle {
    fn default() -> Self {
        Self { align: Align::Center, offset: (0, 0), color: Rgba([0, 0, 0, 255]) }
    }
}

/// Filter free text down to what the nametape font can print.
///
/// Keeps letters and spaces, upper-cases the letters and drops everything
/// else.
///
/// ```
/// use ribbonrack::nametape::normalize_name;
///
/// assert_eq!(normalize_name("John Doe!"), "JOHN DOE");
/// assert_eq!(normalize_name("J0hn"), "JHN");
/// ```
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic() || *c == ' ')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Render `text` onto a copy of `template`.
///
/// The template itself is left untouched. Text wider or taller than the
/// template is clipped at its edges.
pub fn render_nametape(
    template: &RgbaImage,
    text: &str,
    font: &BitmapFont,
    style: &NametapeStyle,
) -> RgbaImage {
    let mut tape = template.clone();
    if text.is_empty() {
        return tape;
    }

    let mask = font.render_mask(text);
    let (origin_x, origin_y) = text_origin(template.dimensions(), mask.dimensions(), style);

    for (mx, my, ink) in mask.enumerate_pixels() {
        if ink[0] == 0 {
            continue;
        }
        let x = origin_x + mx as i64;
        let y = origin_y + my as i64;
        if x < 0 || y < 0 || x >= tape.width() as i64 || y >= tape.height() as i64 {
            continue;
        }
        let dst = tape.get_pixel(x as u32, y as u32);
        let blended = alpha_blend(&style.color, dst);
        tape.put_pixel(x as u32, y as u32, blended);
    }

    tape
}

/// Top-left corner of the text line on the template
fn text_origin(template: (u32, u32), text: (u32, u32), style: &NametapeStyle) -> (i64, i64) {
    let (off_x, off_y) = (style.offset.0 as i64, style.offset.1 as i64);
    match style.align {
        Align::Left => (off_x, off_y),
        Align::Center => {
            // Floor division keeps odd leftovers on the right/bottom
            let x = (template.0 as i64 - text.0 as i64).div_euclid(2);
            let y = (template.1 as i64 - text.1 as i64).div_euclid(2);
            (x + off_x, y + off_y)
        }
    }
}
