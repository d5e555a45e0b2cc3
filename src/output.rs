//! Image output: atomic file writes and preview scaling

use image::imageops::FilterType;
use image::{ImageFormat, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Append `.png` when `path` has no extension.
///
/// Mirrors a save dialog with `.png` as its default extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Output format for `path`, chosen by extension; PNG when unknown.
fn format_for(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Png)
}

/// Save an RGBA image so that `path` is either fully written or untouched.
///
/// The image is encoded to a temporary file in the destination directory and
/// renamed over `path`. Missing parent directories are created. If anything
/// fails the temporary file is removed.
pub fn save_atomic(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let tmp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), std::process::id());
    let tmp = match parent {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    };

    let written = image
        .save_with_format(&tmp, format_for(path))
        .map_err(OutputError::from)
        .and_then(|()| std::fs::rename(&tmp, path).map_err(OutputError::from));

    if written.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    written
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art.
///
/// # Arguments
///
/// * `image` - The image to scale
/// * `factor` - Scale factor (1-16, where 1 means no scaling)
///
/// # Returns
///
/// The scaled image (or original if factor is 1)
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * factor as u32;
    let new_h = h * factor as u32;
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}
