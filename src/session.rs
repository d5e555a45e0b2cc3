//! Generation session - the current shirt and what produced it
//!
//! A [`Session`] owns the loaded assets and a single "current result" slot.
//! Every [`Session::generate`] call builds a fresh shirt from a
//! [`Selection`] and replaces the slot; the previous shirt is dropped.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::grid::Warning;
use crate::nametape::normalize_name;
use crate::output::{save_atomic, scale_image, OutputError};
use crate::shirt::{generate_shirt, ShirtAssets, ShirtError, ShirtParams};

/// What the user picked for one shirt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected ribbon names
    pub ribbons: Vec<String>,
    /// Selected commendation names
    pub commendations: Vec<String>,
    /// Nametape text, already normalized
    pub name: String,
    /// Place the golden award
    pub golden: bool,
}

impl Selection {
    /// Set the nametape text, filtering it with [`normalize_name`].
    pub fn with_name(mut self, raw: &str) -> Self {
        self.name = normalize_name(raw);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ribbons.is_empty() && self.commendations.is_empty() && self.name.is_empty() && !self.golden
    }
}

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the destination
    Saved,
    /// No destination was chosen; nothing was written
    Cancelled,
}

/// Error during a session action
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Generate(#[from] ShirtError),
    #[error("Failed to save shirt to '{}': {source}", path.display())]
    SaveWrite {
        path: std::path::PathBuf,
        #[source]
        source: OutputError,
    },
}

/// Loaded assets plus the most recently generated shirt
#[derive(Debug)]
pub struct Session {
    assets: ShirtAssets,
    params: ShirtParams,
    current: Option<RgbaImage>,
}

impl Session {
    pub fn new(assets: ShirtAssets, params: ShirtParams) -> Self {
        Self { assets, params, current: None }
    }

    pub fn assets(&self) -> &ShirtAssets {
        &self.assets
    }

    pub fn params(&self) -> &ShirtParams {
        &self.params
    }

    /// The last generated shirt, if any
    pub fn current(&self) -> Option<&RgbaImage> {
        self.current.as_ref()
    }

    /// The last generated shirt, or the bare base template before the first
    /// generation.
    pub fn shirt(&self) -> &RgbaImage {
        self.current.as_ref().unwrap_or(&self.assets.shirt)
    }

    /// Build a shirt for `selection` and make it the current result.
    ///
    /// On error the previous result is kept.
    pub fn generate(&mut self, selection: &Selection) -> Result<(&RgbaImage, Vec<Warning>), SessionError> {
        let (shirt, warnings) = generate_shirt(&self.assets, selection, &self.params)?;
        let current: &RgbaImage = self.current.insert(shirt);
        Ok((current, warnings))
    }

    /// Current shirt upscaled by an integer factor for display
    pub fn preview(&self, scale: u8) -> RgbaImage {
        scale_image(self.shirt().clone(), scale)
    }

    /// Write the current shirt to `dest`.
    ///
    /// `None` means the user backed out of choosing a destination and is not
    /// an error. The file is written next to `dest` and renamed into place,
    /// so a failed save never leaves a partial file behind.
    pub fn save(&self, dest: Option<&Path>) -> Result<SaveOutcome, SessionError> {
        self.save_scaled(dest, 1)
    }

    /// Like [`Session::save`], writing the preview at `scale` instead.
    pub fn save_scaled(&self, dest: Option<&Path>, scale: u8) -> Result<SaveOutcome, SessionError> {
        let Some(path) = dest else {
            log::info!("Save cancelled, nothing written");
            return Ok(SaveOutcome::Cancelled);
        };

        let result = if scale > 1 {
            save_atomic(&self.preview(scale), path)
        } else {
            save_atomic(self.shirt(), path)
        };
        result.map_err(|source| SessionError::SaveWrite { path: path.to_path_buf(), source })?;

        log::info!("Saved shirt to {}", path.display());
        Ok(SaveOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Badge, BadgeLibrary};
    use crate::font::tests::block_font;
    use crate::grid::{GridSpec, DEFAULT_OUTLINE};
    use crate::nametape::NametapeStyle;
    use crate::shirt::ShirtLayout;
    use image::Rgba;
    use tempfile::tempdir;

    const SHIRT: Rgba<u8> = Rgba([40, 60, 30, 255]);

    fn library(names: &[&str], size: (u32, u32)) -> BadgeLibrary {
        let badges = names
            .iter()
            .enumerate()
            .map(|(i, n)| Badge {
                name: n.to_string(),
                image: RgbaImage::from_pixel(size.0, size.1, Rgba([50 + i as u8 * 40, 0, 0, 255])),
            })
            .collect();
        BadgeLibrary::from_badges(badges).unwrap()
    }

    fn session() -> Session {
        let assets = ShirtAssets {
            ribbons: library(&["A", "B", "C", "D"], (8, 3)),
            commendations: library(&["X", "Y"], (7, 2)),
            shirt: RgbaImage::from_pixel(128, 128, SHIRT),
            nametape: RgbaImage::from_pixel(40, 7, Rgba([220, 210, 170, 255])),
            award: RgbaImage::from_pixel(5, 5, Rgba([255, 215, 0, 255])),
            font: block_font(),
        };
        let params = ShirtParams {
            ribbons: GridSpec::new(8, 3, 3, DEFAULT_OUTLINE).unwrap(),
            commendations: GridSpec::new(7, 2, 3, DEFAULT_OUTLINE).unwrap(),
            layout: ShirtLayout::default(),
            nametape: NametapeStyle::default(),
            strict: false,
        };
        Session::new(assets, params)
    }

    #[test]
    fn test_selection_with_name_normalizes() {
        let selection = Selection::default().with_name("John Doe!");
        assert_eq!(selection.name, "JOHN DOE");
        assert!(!selection.is_empty());
        assert!(Selection::default().is_empty());
    }

    #[test]
    fn test_shirt_before_generate_is_base() {
        let session = session();
        assert!(session.current().is_none());
        assert_eq!(session.shirt(), &session.assets().shirt);
    }

    #[test]
    fn test_generate_replaces_current() {
        let mut session = session();

        let selection = Selection { ribbons: vec!["A".into()], ..Default::default() };
        session.generate(&selection).unwrap();
        let first = session.current().unwrap().clone();

        let selection = Selection { golden: true, ..Default::default() };
        session.generate(&selection).unwrap();
        let second = session.current().unwrap();

        assert_ne!(&first, second);
        assert_eq!(*second.get_pixel(87, 19), SHIRT);
        assert_eq!(*second.get_pixel(23, 39), Rgba([255, 215, 0, 255]));
    }

    #[test]
    fn test_generate_error_keeps_previous() {
        let mut session = session();
        let selection = Selection { ribbons: vec!["B".into()], ..Default::default() };
        session.generate(&selection).unwrap();
        let before = session.current().unwrap().clone();

        let bad = Selection { ribbons: vec!["nope".into()], ..Default::default() };
        assert!(session.generate(&bad).is_err());

        assert_eq!(session.current().unwrap(), &before);
    }

    #[test]
    fn test_generate_uses_library_order() {
        let mut session = session();
        let forward = Selection { ribbons: vec!["A".into(), "B".into()], ..Default::default() };
        let backward = Selection { ribbons: vec!["B".into(), "A".into()], ..Default::default() };

        let a = session.generate(&forward).unwrap().0.clone();
        let b = session.generate(&backward).unwrap().0.clone();

        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_selection_only_adds_blank_tape() {
        let mut session = session();
        let (shirt, warnings) = session.generate(&Selection::default()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(shirt.dimensions(), (128, 128));
        // Only the blank nametape differs from the bare shirt
        for (x, y, pixel) in shirt.enumerate_pixels() {
            let on_tape = (13..53).contains(&x) && (31..38).contains(&y);
            if on_tape {
                assert_eq!(*pixel, Rgba([220, 210, 170, 255]));
            } else {
                assert_eq!(*pixel, SHIRT, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_preview_scales() {
        let session = session();
        assert_eq!(session.preview(2).dimensions(), (256, 256));
        assert_eq!(session.preview(1).dimensions(), (128, 128));
    }

    #[test]
    fn test_save_cancelled_writes_nothing() {
        let session = session();
        assert_eq!(session.save(None).unwrap(), SaveOutcome::Cancelled);
    }

    #[test]
    fn test_save_writes_current() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shirt.png");
        let mut session = session();
        session.generate(&Selection { golden: true, ..Default::default() }).unwrap();

        assert_eq!(session.save(Some(&path)).unwrap(), SaveOutcome::Saved);

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&loaded, session.current().unwrap());
    }

    #[test]
    fn test_save_scaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let session = session();

        session.save_scaled(Some(&path), 2).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (256, 256));
    }

    #[test]
    fn test_save_write_failure() {
        let dir = tempdir().unwrap();
        // A directory cannot be replaced by the rename
        let path = dir.path().join("taken.png");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let session = session();

        let err = session.save(Some(&path)).unwrap_err();

        assert!(matches!(err, SessionError::SaveWrite { .. }));
        // No temporary file left behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() != "taken.png")
            .collect();
        assert!(leftovers.is_empty());
    }
}
