//! Shirt compositing - grids, nametape and award onto the base template

use std::path::Path;

use image::RgbaImage;

use crate::assets::{load_badges, load_image, AssetError, BadgeLibrary};
use crate::blend::paste;
use crate::config::{AssetsConfig, RackConfig};
use crate::font::BitmapFont;
use crate::grid::{arrange_grid_checked, GridError, GridSpec, Warning};
use crate::nametape::{render_nametape, NametapeStyle};
use crate::session::Selection;

/// Fixed paste offsets on the base template (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShirtLayout {
    pub ribbons: (u32, u32),
    pub commendations: (u32, u32),
    pub nametape: (u32, u32),
    pub award: (u32, u32),
}

impl Default for ShirtLayout {
    fn default() -> Self {
        Self { ribbons: (87, 19), commendations: (89, 93), nametape: (13, 31), award: (23, 39) }
    }
}

/// Everything the pipeline needs besides the selection
#[derive(Debug, Clone)]
pub struct ShirtParams {
    pub ribbons: GridSpec,
    pub commendations: GridSpec,
    pub layout: ShirtLayout,
    pub nametape: NametapeStyle,
    /// Reject badges that do not fit their cell instead of warning
    pub strict: bool,
}

impl ShirtParams {
    pub fn from_config(config: &RackConfig) -> Result<Self, GridError> {
        Ok(Self {
            ribbons: config.ribbons.to_spec()?,
            commendations: config.commendations.to_spec()?,
            layout: config.layout.to_layout(),
            nametape: config.nametape.to_style(),
            strict: false,
        })
    }
}

/// Resources loaded once at startup
#[derive(Debug, Clone)]
pub struct ShirtAssets {
    pub ribbons: BadgeLibrary,
    pub commendations: BadgeLibrary,
    pub shirt: RgbaImage,
    pub nametape: RgbaImage,
    pub award: RgbaImage,
    pub font: BitmapFont,
}

impl ShirtAssets {
    /// Load every asset named in the config; paths are relative to `root`.
    pub fn load(config: &AssetsConfig, root: &Path) -> Result<Self, AssetError> {
        let assets = Self {
            ribbons: load_badges(&root.join(&config.ribbons))?,
            commendations: load_badges(&root.join(&config.commendations))?,
            shirt: load_image(&root.join(&config.shirt))?,
            nametape: load_image(&root.join(&config.nametape))?,
            award: load_image(&root.join(&config.award))?,
            font: BitmapFont::load(&root.join(&config.font))?,
        };
        log::info!(
            "Assets ready: {} ribbons, {} commendations, shirt {}x{}",
            assets.ribbons.len(),
            assets.commendations.len(),
            assets.shirt.width(),
            assets.shirt.height()
        );
        Ok(assets)
    }
}

/// Paste every layer onto a copy of `base`.
///
/// Order is ribbons, commendations, nametape, then the award if present.
/// The result always has the dimensions of `base`; layers are clipped to it.
pub fn build_composite(
    base: &RgbaImage,
    ribbon_grid: &RgbaImage,
    commendation_grid: &RgbaImage,
    nametape: &RgbaImage,
    award: Option<&RgbaImage>,
    layout: &ShirtLayout,
) -> RgbaImage {
    let mut canvas = base.clone();

    paste(&mut canvas, ribbon_grid, layout.ribbons.0, layout.ribbons.1);
    paste(&mut canvas, commendation_grid, layout.commendations.0, layout.commendations.1);
    paste(&mut canvas, nametape, layout.nametape.0, layout.nametape.1);
    if let Some(award) = award {
        paste(&mut canvas, award, layout.award.0, layout.award.1);
    }

    canvas
}

/// Error generating a shirt from a selection
#[derive(Debug, thiserror::Error)]
pub enum ShirtError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Run the whole pipeline for one selection.
///
/// Badges are placed in library order regardless of the order they were
/// selected in.
pub fn generate_shirt(
    assets: &ShirtAssets,
    selection: &Selection,
    params: &ShirtParams,
) -> Result<(RgbaImage, Vec<Warning>), ShirtError> {
    let ribbons = assets.ribbons.select_in_library_order(&selection.ribbons)?;
    let commendations = assets.commendations.select_in_library_order(&selection.commendations)?;

    let (ribbon_grid, mut warnings) = arrange_grid_checked(&ribbons, &params.ribbons, params.strict)?;
    let (commendation_grid, more) =
        arrange_grid_checked(&commendations, &params.commendations, params.strict)?;
    warnings.extend(more);

    let tape = render_nametape(&assets.nametape, &selection.name, &assets.font, &params.nametape);
    let award = selection.golden.then_some(&assets.award);

    log::debug!(
        "Composing shirt: {} ribbons, {} commendations, name {:?}, golden {}",
        ribbons.len(),
        commendations.len(),
        selection.name,
        selection.golden
    );

    let shirt = build_composite(
        &assets.shirt,
        &ribbon_grid,
        &commendation_grid,
        &tape,
        award,
        &params.layout,
    );
    Ok((shirt, warnings))
}
