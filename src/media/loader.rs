// SPDX-License-Identifier: MPL-2.0
//! Image metadata loading backed by the `image` and `kamadak-exif` crates.
//!
//! Only image headers are read: the crop controller needs the displayed
//! dimensions, never the pixels.

use crate::application::port::{LoadedImage, MetadataError, MetadataLoader};
use crate::domain::cropping::{ExifOrientation, ImageDimensions};
use image_rs::{ImageError, ImageReader};
use std::io::Cursor;
use std::sync::Arc;

/// [`MetadataLoader`] reading dimensions from the image header and the
/// orientation from its EXIF block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifMetadataLoader;

impl ExifMetadataLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MetadataLoader for ExifMetadataLoader {
    fn load(&self, bytes: &[u8]) -> Result<LoadedImage, MetadataError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|err| MetadataError::DecodeFailed(err.to_string()))?;

        if reader.format().is_none() {
            return Err(MetadataError::UnsupportedFormat);
        }

        let (width, height) = reader.into_dimensions().map_err(|err| match err {
            ImageError::Unsupported(_) => MetadataError::UnsupportedFormat,
            other => MetadataError::DecodeFailed(other.to_string()),
        })?;

        let stored = ImageDimensions::new(width, height)
            .ok_or(MetadataError::InvalidDimensions { width, height })?;

        Ok(LoadedImage::oriented(stored, read_orientation(bytes)))
    }
}

/// Reads the EXIF orientation tag of an image, if present and valid.
#[must_use]
pub fn read_orientation(bytes: &[u8]) -> Option<ExifOrientation> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(err) => {
            log::trace!("No EXIF data: {err}");
            return None;
        }
    };

    let value = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)?;

    let orientation = ExifOrientation::from_tag(value);
    if orientation.is_none() {
        log::warn!("Ignoring invalid EXIF orientation {value}");
    }
    orientation
}

/// Runs `loader` on the blocking thread pool.
///
/// # Errors
///
/// Returns the loader's error, or [`MetadataError::Interrupted`] if the task
/// panicked or was cancelled.
pub async fn load_in_background<L>(
    loader: Arc<L>,
    bytes: Vec<u8>,
) -> Result<LoadedImage, MetadataError>
where
    L: MetadataLoader + 'static,
{
    tokio::task::spawn_blocking(move || loader.load(&bytes))
        .await
        .map_err(|err| MetadataError::Interrupted(err.to_string()))?
}
