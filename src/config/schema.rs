//! Configuration schema types for `rack.toml`
//!
//! Defines the structure and validation rules for ribbonrack configuration.
//! Every section is optional; missing values fall back to the stock shirt
//! layout.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::grid::{GridError, GridSpec};
use crate::nametape::{Align, NametapeStyle};
use crate::shirt::ShirtLayout;

/// Asset locations, relative to the config file's directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory of ribbon badge images
    #[serde(default = "default_ribbons_dir")]
    pub ribbons: PathBuf,
    /// Directory of commendation badge images
    #[serde(default = "default_commendations_dir")]
    pub commendations: PathBuf,
    /// Golden award overlay image
    #[serde(default = "default_award")]
    pub award: PathBuf,
    /// Blank nametape template
    #[serde(default = "default_nametape")]
    pub nametape: PathBuf,
    /// Base shirt template
    #[serde(default = "default_shirt")]
    pub shirt: PathBuf,
    /// PIL bitmap font (`.pil`, with its bitmap beside it)
    #[serde(default = "default_font")]
    pub font: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            ribbons: default_ribbons_dir(),
            commendations: default_commendations_dir(),
            award: default_award(),
            nametape: default_nametape(),
            shirt: default_shirt(),
            font: default_font(),
        }
    }
}

fn default_ribbons_dir() -> PathBuf {
    PathBuf::from("apel/ribbons")
}

fn default_commendations_dir() -> PathBuf {
    PathBuf::from("apel/commendations")
}

fn default_award() -> PathBuf {
    PathBuf::from("apel/awards/golden.png")
}

fn default_nametape() -> PathBuf {
    PathBuf::from("apel/nametape.png")
}

fn default_shirt() -> PathBuf {
    PathBuf::from("apel/shirt.png")
}

fn default_font() -> PathBuf {
    PathBuf::from("anrofont/anrofont.pil")
}

/// Grid layout for one badge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cell size [width, height]
    pub badge_size: [u32; 2],
    /// Badges per row
    #[serde(default = "default_per_row")]
    pub per_row: u32,
    /// Outline color [r, g, b, a]
    #[serde(default = "default_outline")]
    pub outline: [u8; 4],
}

impl GridConfig {
    fn ribbons() -> Self {
        Self { badge_size: [8, 3], per_row: default_per_row(), outline: default_outline() }
    }

    fn commendations() -> Self {
        Self { badge_size: [7, 2], per_row: default_per_row(), outline: default_outline() }
    }

    pub fn to_spec(&self) -> Result<GridSpec, GridError> {
        GridSpec::new(self.badge_size[0], self.badge_size[1], self.per_row, Rgba(self.outline))
    }
}

fn default_per_row() -> u32 {
    3
}

fn default_outline() -> [u8; 4] {
    [0, 0, 0, 255]
}

fn default_ribbons_grid() -> GridConfig {
    GridConfig::ribbons()
}

fn default_commendations_grid() -> GridConfig {
    GridConfig::commendations()
}

/// Paste offsets on the shirt, each [x, y]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_ribbons_at")]
    pub ribbons: [u32; 2],
    #[serde(default = "default_commendations_at")]
    pub commendations: [u32; 2],
    #[serde(default = "default_nametape_at")]
    pub nametape: [u32; 2],
    #[serde(default = "default_award_at")]
    pub award: [u32; 2],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ribbons: default_ribbons_at(),
            commendations: default_commendations_at(),
            nametape: default_nametape_at(),
            award: default_award_at(),
        }
    }
}

impl LayoutConfig {
    pub fn to_layout(&self) -> ShirtLayout {
        let pair = |v: [u32; 2]| (v[0], v[1]);
        ShirtLayout {
            ribbons: pair(self.ribbons),
            commendations: pair(self.commendations),
            nametape: pair(self.nametape),
            award: pair(self.award),
        }
    }
}

fn default_ribbons_at() -> [u32; 2] {
    [87, 19]
}

fn default_commendations_at() -> [u32; 2] {
    [89, 93]
}

fn default_nametape_at() -> [u32; 2] {
    [13, 31]
}

fn default_award_at() -> [u32; 2] {
    [23, 39]
}

/// Text placement on the nametape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NametapeConfig {
    #[serde(default)]
    pub align: Align,
    /// Shift [x, y] applied after alignment
    #[serde(default)]
    pub offset: [i32; 2],
    /// Text color [r, g, b, a]
    #[serde(default = "default_text_color")]
    pub color: [u8; 4],
}

impl Default for NametapeConfig {
    fn default() -> Self {
        Self { align: Align::default(), offset: [0, 0], color: default_text_color() }
    }
}

impl NametapeConfig {
    pub fn to_style(&self) -> NametapeStyle {
        NametapeStyle {
            align: self.align,
            offset: (self.offset[0], self.offset[1]),
            color: Rgba(self.color),
        }
    }
}

fn default_text_color() -> [u8; 4] {
    [0, 0, 0, 255]
}

/// Output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Integer upscale used for previews
    #[serde(default = "default_preview_scale")]
    pub preview_scale: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { preview_scale: default_preview_scale() }
    }
}

fn default_preview_scale() -> u8 {
    2
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackConfig {
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default = "default_ribbons_grid")]
    pub ribbons: GridConfig,
    #[serde(default = "default_commendations_grid")]
    pub commendations: GridConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub nametape: NametapeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            assets: AssetsConfig::default(),
            ribbons: GridConfig::ribbons(),
            commendations: GridConfig::commendations(),
            layout: LayoutConfig::default(),
            nametape: NametapeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "ribbons.per_row")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rack.toml: '{}' {}", self.field, self.message)
    }
}

impl RackConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (section, grid) in [("ribbons", &self.ribbons), ("commendations", &self.commendations)] {
            if grid.badge_size[0] == 0 || grid.badge_size[1] == 0 {
                errors.push(ConfigValidationError {
                    field: format!("{}.badge_size", section),
                    message: "dimensions must be positive".to_string(),
                });
            }
            if grid.per_row == 0 {
                errors.push(ConfigValidationError {
                    field: format!("{}.per_row", section),
                    message: "must be a positive integer".to_string(),
                });
            }
            if let Err(GridError::TooLarge { width, height, max }) = grid.to_spec() {
                errors.push(ConfigValidationError {
                    field: format!("{}.badge_size", section),
                    message: format!(
                        "gives a {}x{} row of badges, over the {} pixel limit",
                        width, height, max
                    ),
                });
            }
        }

        if !(1..=16).contains(&self.output.preview_scale) {
            errors.push(ConfigValidationError {
                field: "output.preview_scale".to_string(),
                message: "must be between 1 and 16".to_string(),
            });
        }

        errors
    }
}
