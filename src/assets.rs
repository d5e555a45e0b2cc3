//! Badge asset loading
//!
//! Scans a directory of badge images and decodes them into an ordered
//! library keyed by badge name (the file stem).

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::font::FontError;

/// Error loading badge or template assets
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// Badge directory is missing
    #[error("Asset directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    /// Single asset file is missing
    #[error("Asset file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// File exists but could not be decoded as an image
    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Two files in one directory share a stem
    #[error("Duplicate badge name '{name}' in {}", dir.display())]
    DuplicateName { name: String, dir: PathBuf },
    /// A selection named a badge that is not in the library
    #[error("Unknown badge '{name}' (available: {})", available.join(", "))]
    UnknownBadge { name: String, available: Vec<String> },
    /// Bitmap font could not be loaded
    #[error(transparent)]
    Font(#[from] FontError),
    /// Directory listing failed
    #[error("Failed to scan asset directory '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Badge file name cannot be used as a badge name
    #[error("Badge file name is not valid UTF-8: {}", .0.display())]
    InvalidName(PathBuf),
}

/// A decoded badge and its name
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub name: String,
    pub image: RgbaImage,
}

/// Ordered collection of badges for one category.
///
/// Badges are kept sorted by name, so enumeration order is the same on every
/// filesystem and every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeLibrary {
    badges: Vec<Badge>,
}

impl BadgeLibrary {
    /// Build a library from already-decoded badges.
    ///
    /// Badges are sorted by name; duplicate names are rejected.
    pub fn from_badges(mut badges: Vec<Badge>) -> Result<Self, AssetError> {
        badges.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = badges.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(AssetError::DuplicateName {
                name: pair[0].name.clone(),
                dir: PathBuf::new(),
            });
        }
        Ok(Self { badges })
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Badge names in library order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.badges.iter().map(|b| b.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter()
    }

    /// Look up a badge image by name
    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.badges
            .binary_search_by(|b| b.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.badges[i].image)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve badge names to images, in the order the names are given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&RgbaImage>, AssetError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name).ok_or_else(|| AssetError::UnknownBadge {
                    name: name.to_string(),
                    available: self.names().map(String::from).collect(),
                })
            })
            .collect()
    }

    /// Resolve badge names to images in library order, ignoring the order
    /// (and duplicates) of `names`.
    pub fn select_in_library_order<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<&RgbaImage>, AssetError> {
        // Validate first so unknown names are reported
        self.select(names)?;
        Ok(self
            .badges
            .iter()
            .filter(|b| names.iter().any(|n| n.as_ref() == b.name))
            .map(|b| &b.image)
            .collect())
    }
}

/// Load every badge image in `dir`.
///
/// Each regular, non-hidden file is decoded to RGBA. The badge name is the
/// file name without its extension. The returned library is sorted by name.
pub fn load_badges(dir: &Path) -> Result<BadgeLibrary, AssetError> {
    if !dir.is_dir() {
        return Err(AssetError::DirectoryNotFound(dir.to_path_buf()));
    }

    let scan_error = |source| AssetError::Io { path: dir.to_path_buf(), source };
    let entries = fs::read_dir(dir).map_err(scan_error)?;

    let mut badges = Vec::new();
    for entry in entries {
        let path = entry.map_err(scan_error)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = badge_name(&path)? else {
            continue;
        };

        let image = load_image(&path)?;
        log::debug!("Loaded badge '{}' ({}x{})", name, image.width(), image.height());
        badges.push(Badge { name, image });
    }

    let library = BadgeLibrary::from_badges(badges).map_err(|e| match e {
        AssetError::DuplicateName { name, .. } => {
            AssetError::DuplicateName { name, dir: dir.to_path_buf() }
        }
        other => other,
    })?;
    log::info!("Loaded {} badges from {}", library.len(), dir.display());
    Ok(library)
}

/// Decode a single image file to RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let image = image::open(path)
        .map_err(|source| AssetError::Decode { path: path.to_path_buf(), source })?;
    Ok(image.to_rgba8())
}

/// Derive a badge name from a file path: the stem, skipping hidden files.
///
/// Names must be valid UTF-8; anything else is an error rather than a badge
/// that silently goes missing.
fn badge_name(path: &Path) -> Result<Option<String>, AssetError> {
    let Some(file_name) = path.file_name() else {
        return Ok(None);
    };
    if file_name.as_encoded_bytes().starts_with(b".") {
        return Ok(None);
    }
    if file_name.to_str().is_none() {
        return Err(AssetError::InvalidName(path.to_path_buf()));
    }
    Ok(path.file_stem().and_then(|s| s.to_str()).map(String::from))
}
