//! Grid arrangement - tiles badges into a fixed-width grid with outlines

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::blend::{paste, paste_at, TRANSPARENT};
use crate::outline::ring;

/// Outline color used when none is configured (opaque black)
pub const DEFAULT_OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Largest grid canvas edge, in pixels
pub const MAX_GRID_DIMENSION: u32 = 16_384;

/// A warning generated while arranging a grid
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error arranging a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid dimension was zero
    #[error("Invalid grid: badge size {width}x{height} with {per_row} per row (all must be non-zero)")]
    ZeroDimension { width: u32, height: u32, per_row: u32 },
    /// The grid canvas would be wider or taller than [`MAX_GRID_DIMENSION`]
    #[error("Grid canvas {width}x{height} exceeds the {max} pixel limit")]
    TooLarge { width: u64, height: u64, max: u32 },
    /// Badge dimensions exceed the cell size (strict mode only)
    #[error("Badge #{index} ({badge_w}x{badge_h}) exceeds cell size ({cell_w}x{cell_h})", badge_w = .badge_size.0, badge_h = .badge_size.1, cell_w = .cell_size.0, cell_h = .cell_size.1)]
    BadgeTooLarge { index: usize, badge_size: (u32, u32), cell_size: (u32, u32) },
}

/// Layout parameters for one badge category.
///
/// Ribbons and commendations use different cell sizes, so each category
/// carries its own spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    badge_width: u32,
    badge_height: u32,
    per_row: u32,
    outline: Rgba<u8>,
}

impl GridSpec {
    /// Create a grid spec, rejecting zero-sized cells, empty rows and rows
    /// wider (or cells taller) than [`MAX_GRID_DIMENSION`].
    pub fn new(
        badge_width: u32,
        badge_height: u32,
        per_row: u32,
        outline: Rgba<u8>,
    ) -> Result<Self, GridError> {
        if badge_width == 0 || badge_height == 0 || per_row == 0 {
            return Err(GridError::ZeroDimension {
                width: badge_width,
                height: badge_height,
                per_row,
            });
        }
        let row_width = u64::from(per_row) * u64::from(badge_width);
        if row_width > u64::from(MAX_GRID_DIMENSION) || badge_height > MAX_GRID_DIMENSION {
            return Err(GridError::TooLarge {
                width: row_width,
                height: u64::from(badge_height),
                max: MAX_GRID_DIMENSION,
            });
        }
        Ok(Self { badge_width, badge_height, per_row, outline })
    }

    pub fn badge_size(&self) -> (u32, u32) {
        (self.badge_width, self.badge_height)
    }

    pub fn per_row(&self) -> u32 {
        self.per_row
    }

    pub fn outline(&self) -> Rgba<u8> {
        self.outline
    }

    /// Number of rows needed for `count` badges
    pub fn rows_for(&self, count: usize) -> u64 {
        (count as u64).div_ceil(u64::from(self.per_row))
    }

    /// Canvas dimensions for `count` badges: `(per_row * w, ceil(count / per_row) * h)`
    pub fn canvas_size(&self, count: usize) -> Result<(u32, u32), GridError> {
        let width = self.per_row * self.badge_width;
        let height = self
            .rows_for(count)
            .checked_mul(u64::from(self.badge_height))
            .filter(|h| *h <= u64::from(MAX_GRID_DIMENSION))
            .ok_or(GridError::TooLarge {
                width: u64::from(width),
                height: self.rows_for(count).saturating_mul(u64::from(self.badge_height)),
                max: MAX_GRID_DIMENSION,
            })?;
        Ok((width, height as u32))
    }

    /// Top-left corner of the cell holding the badge at `index`
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let col = (index as u64 % u64::from(self.per_row)) as u32;
        let row = index as u64 / u64::from(self.per_row);
        let y = row.saturating_mul(u64::from(self.badge_height)).min(u64::from(u32::MAX));
        (col * self.badge_width, y as u32)
    }
}

/// Arrange badges into a grid.
///
/// Badges fill rows left to right, top to bottom, in the order given. Each
/// badge's silhouette gets a one-pixel outline ring in the spec's outline
/// color, and the badge is alpha-pasted at its cell origin. Rings may spill
/// into neighbouring cells; badges are pasted after every ring, so a ring
/// never covers a badge. Rings and badges are clipped at the grid edge, and
/// cells past the last badge stay transparent.
///
/// An empty sequence produces a `(per_row * w) x 0` canvas, which pastes as a
/// no-op.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use ribbonrack::grid::{arrange_grid, GridSpec, DEFAULT_OUTLINE};
///
/// let spec = GridSpec::new(8, 3, 3, DEFAULT_OUTLINE).unwrap();
/// let badge = RgbaImage::from_pixel(8, 3, Rgba([200, 0, 0, 255]));
/// let badges = vec![&badge, &badge, &badge, &badge];
///
/// let grid = arrange_grid(&badges, &spec).unwrap();
/// assert_eq!(grid.dimensions(), (24, 6));
/// ```
pub fn arrange_grid(badges: &[&RgbaImage], spec: &GridSpec) -> Result<RgbaImage, GridError> {
    let (width, height) = spec.canvas_size(badges.len())?;
    let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);

    for (i, badge) in badges.iter().enumerate() {
        let (x, y) = spec.cell_origin(i);
        paste_at(&mut canvas, &ring(badge, spec.outline), i64::from(x) - 1, i64::from(y) - 1);
    }
    for (i, badge) in badges.iter().enumerate() {
        let (x, y) = spec.cell_origin(i);
        paste(&mut canvas, badge, x, y);
    }

    Ok(canvas)
}

/// Arrange badges into a grid, reporting badges larger than their cell.
///
/// In lenient mode (strict=false) an oversized badge is still pasted,
/// anchored top-left, and may cover its neighbours; a warning is returned for
/// it. In strict mode the first oversized badge is an error.
pub fn arrange_grid_checked(
    badges: &[&RgbaImage],
    spec: &GridSpec,
    strict: bool,
) -> Result<(RgbaImage, Vec<Warning>), GridError> {
    let mut warnings = Vec::new();
    let cell_size = spec.badge_size();

    for (index, badge) in badges.iter().enumerate() {
        let badge_size = badge.dimensions();
        if badge_size.0 > cell_size.0 || badge_size.1 > cell_size.1 {
            let err = GridError::BadgeTooLarge { index, badge_size, cell_size };
            if strict {
                return Err(err);
            }
            log::debug!("{}", err);
            warnings.push(Warning::new(err.to_string()));
        }
    }

    Ok((arrange_grid(badges, spec)?, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

    fn spec(w: u32, h: u32, per_row: u32) -> GridSpec {
        GridSpec::new(w, h, per_row, DEFAULT_OUTLINE).unwrap()
    }

    /// A badge with a one-pixel transparent margin around a solid core
    fn framed_badge(w: u32, h: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                TRANSPARENT
            } else {
                color
            }
        })
    }

    #[test]
    fn test_spec_rejects_zero_dimensions() {
        assert!(GridSpec::new(0, 3, 3, DEFAULT_OUTLINE).is_err());
        assert!(GridSpec::new(8, 0, 3, DEFAULT_OUTLINE).is_err());
        assert_eq!(
            GridSpec::new(8, 3, 0, DEFAULT_OUTLINE),
            Err(GridError::ZeroDimension { width: 8, height: 3, per_row: 0 })
        );
    }

    #[test]
    fn test_spec_rejects_oversized_rows() {
        assert_eq!(
            GridSpec::new(70_000, 1, 70_000, DEFAULT_OUTLINE),
            Err(GridError::TooLarge { width: 4_900_000_000, height: 1, max: MAX_GRID_DIMENSION })
        );
        assert!(GridSpec::new(MAX_GRID_DIMENSION, 1, 1, DEFAULT_OUTLINE).is_ok());
        assert!(GridSpec::new(MAX_GRID_DIMENSION + 1, 1, 1, DEFAULT_OUTLINE).is_err());
        assert!(GridSpec::new(1, MAX_GRID_DIMENSION + 1, 1, DEFAULT_OUTLINE).is_err());
    }

    #[test]
    fn test_canvas_size_rejects_too_many_rows() {
        let tall = spec(1, MAX_GRID_DIMENSION, 1);

        assert_eq!(tall.canvas_size(1), Ok((1, MAX_GRID_DIMENSION)));
        assert!(matches!(tall.canvas_size(2), Err(GridError::TooLarge { height: 32_768, .. })));
        assert!(tall.canvas_size(usize::MAX).is_err());
    }

    #[test]
    fn test_canvas_size_formula() {
        for per_row in 1..=5u32 {
            let spec = spec(7, 2, per_row);
            for count in 0..=12usize {
                let expected_rows = (count as u32 + per_row - 1) / per_row;
                assert_eq!(
                    spec.canvas_size(count),
                    Ok((per_row * 7, expected_rows * 2)),
                    "count={} per_row={}",
                    count,
                    per_row
                );
            }
        }
    }

    #[test]
    fn test_empty_grid_has_zero_area() {
        let grid = arrange_grid(&[], &spec(8, 3, 3)).unwrap();
        assert_eq!(grid.dimensions(), (24, 0));
    }

    #[test]
    fn test_grid_dimensions_match_formula() {
        let badge = RgbaImage::from_pixel(8, 3, RED);
        for count in 1..=10usize {
            let badges: Vec<&RgbaImage> = std::iter::repeat(&badge).take(count).collect();
            let grid = arrange_grid(&badges, &spec(8, 3, 3)).unwrap();
            assert_eq!(Ok(grid.dimensions()), spec(8, 3, 3).canvas_size(count));
        }
    }

    #[test]
    fn test_four_badges_three_per_row() {
        let a = RgbaImage::from_pixel(2, 2, RED);
        let b = RgbaImage::from_pixel(2, 2, GREEN);
        let c = RgbaImage::from_pixel(2, 2, BLUE);
        let d = RgbaImage::from_pixel(2, 2, YELLOW);

        let grid = arrange_grid(&[&a, &b, &c, &d], &spec(2, 2, 3)).unwrap();

        assert_eq!(grid.dimensions(), (6, 4));
        // Row 0: A, B, C, each fully intact
        for (x0, color) in [(0, RED), (2, GREEN), (4, BLUE)] {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                assert_eq!(*grid.get_pixel(x0 + dx, dy), color);
            }
        }
        // Row 1: D, then two empty cells
        assert_eq!(*grid.get_pixel(1, 3), YELLOW);
        // Rings spill into the empty cells
        assert_eq!(*grid.get_pixel(2, 2), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(2, 3), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(5, 2), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(3, 3), TRANSPARENT);
        assert_eq!(*grid.get_pixel(5, 3), TRANSPARENT);
    }

    #[test]
    fn test_full_bleed_badges_outline_into_empty_cells() {
        let badge = RgbaImage::from_pixel(8, 3, RED);

        let grid = arrange_grid(&[&badge, &badge], &spec(8, 3, 3)).unwrap();

        let outlined: Vec<(u32, u32)> = grid
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == DEFAULT_OUTLINE)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(outlined, vec![(16, 0), (16, 1), (16, 2)]);
        // Neither badge is covered by the other's ring
        assert!((0..16).all(|x| (0..3).all(|y| *grid.get_pixel(x, y) == RED)));
        assert_eq!(*grid.get_pixel(17, 1), TRANSPARENT);
    }

    #[test]
    fn test_badges_are_outlined_before_placement() {
        let badge = framed_badge(5, 4, RED);

        let grid = arrange_grid(&[&badge, &badge], &spec(5, 4, 2)).unwrap();

        // Margin of each cell turned into outline
        assert_eq!(*grid.get_pixel(0, 0), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(4, 3), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(5, 0), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(9, 3), DEFAULT_OUTLINE);
        // Core untouched
        assert_eq!(*grid.get_pixel(2, 2), RED);
        assert_eq!(*grid.get_pixel(7, 1), RED);
    }

    #[test]
    fn test_outline_color_from_spec() {
        let badge = framed_badge(3, 3, RED);
        let gold = Rgba([212, 175, 55, 255]);
        let spec = GridSpec::new(3, 3, 1, gold).unwrap();

        let grid = arrange_grid(&[&badge], &spec).unwrap();

        assert_eq!(*grid.get_pixel(0, 0), gold);
        assert_eq!(*grid.get_pixel(1, 1), RED);
    }

    #[test]
    fn test_smaller_badge_anchors_top_left() {
        let badge = RgbaImage::from_pixel(2, 1, RED);

        let grid = arrange_grid(&[&badge, &badge], &spec(4, 3, 2)).unwrap();

        assert_eq!(*grid.get_pixel(0, 0), RED);
        assert_eq!(*grid.get_pixel(4, 0), RED);
        // Ring right of and below each badge
        assert_eq!(*grid.get_pixel(2, 0), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(0, 1), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(2, 1), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(3, 0), DEFAULT_OUTLINE);
        assert_eq!(*grid.get_pixel(6, 1), DEFAULT_OUTLINE);
        // Nothing past the ring
        assert_eq!(*grid.get_pixel(0, 2), TRANSPARENT);
        assert_eq!(*grid.get_pixel(7, 0), TRANSPARENT);
    }

    #[test]
    fn test_arrange_is_deterministic() {
        let a = framed_badge(8, 3, RED);
        let b = framed_badge(8, 3, BLUE);
        let badges = [&a, &b, &a, &b, &b];

        let first = arrange_grid(&badges, &spec(8, 3, 3)).unwrap();
        let second = arrange_grid(&badges, &spec(8, 3, 3)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_checked_lenient_warns_on_oversized_badge() {
        let big = RgbaImage::from_pixel(4, 4, RED);
        let small = RgbaImage::from_pixel(2, 2, GREEN);

        let (grid, warnings) =
            arrange_grid_checked(&[&small, &big], &spec(2, 2, 2), false).unwrap();

        assert_eq!(grid.dimensions(), (4, 2));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Badge #1"));
        // Oversized badge covers its cell and is clipped at the canvas edge
        assert_eq!(*grid.get_pixel(3, 1), RED);
    }

    #[test]
    fn test_checked_strict_rejects_oversized_badge() {
        let big = RgbaImage::from_pixel(3, 2, RED);

        let result = arrange_grid_checked(&[&big], &spec(2, 2, 2), true);

        assert_eq!(
            result.unwrap_err(),
            GridError::BadgeTooLarge { index: 0, badge_size: (3, 2), cell_size: (2, 2) }
        );
    }

    #[test]
    fn test_checked_no_warnings_for_fitting_badges() {
        let badge = RgbaImage::from_pixel(2, 2, RED);
        let (_, warnings) = arrange_grid_checked(&[&badge], &spec(2, 2, 1), true).unwrap();
        assert!(warnings.is_empty());
    }
}
