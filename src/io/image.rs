//! Image codec boundary: decode files to RGB bitmaps and encode bitmaps back

use std::path::Path;

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::io::error::{DepixelError, Result};

/// Decode an image file into an 8-bit RGB bitmap
///
/// Any alpha channel is discarded and other color models are converted.
///
/// # Errors
///
/// Returns [`DepixelError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_bitmap(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| DepixelError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img.to_rgb8())
}

/// Encode a bitmap to `path`, choosing the format from its extension
///
/// # Errors
///
/// Returns an error if:
/// - No encoder is known for the path's extension
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_bitmap(bitmap: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(ImageFormat::writing_enabled)
        .ok_or_else(|| DepixelError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DepixelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    bitmap
        .save_with_format(path, format)
        .map_err(|e| DepixelError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!("encoded {} as {format:?}", path.display());

    Ok(())
}
