// SPDX-License-Identifier: MPL-2.0
//! Image metadata loading port definition.
//!
//! This module defines the [`MetadataLoader`] trait for turning raw image bytes
//! into the information the crop controller needs: the displayed pixel
//! dimensions and the EXIF orientation, when present.

use crate::domain::cropping::{ExifOrientation, ImageDimensions};
use std::fmt;

// =============================================================================
// MetadataError
// =============================================================================

/// Errors that can occur while loading image metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The image format could not be recognized.
    UnsupportedFormat,

    /// The image reports zero width or height.
    InvalidDimensions {
        /// The width that was detected.
        width: u32,
        /// The height that was detected.
        height: u32,
    },

    /// The image header could not be decoded.
    DecodeFailed(String),

    /// The background load task did not complete.
    Interrupted(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::UnsupportedFormat => write!(f, "Unsupported image format"),
            MetadataError::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions: {width}x{height}")
            }
            MetadataError::DecodeFailed(msg) => write!(f, "Failed to decode image: {msg}"),
            MetadataError::Interrupted(msg) => write!(f, "Image load interrupted: {msg}"),
        }
    }
}

impl std::error::Error for MetadataError {}

// =============================================================================
// LoadedImage
// =============================================================================

/// Result of reading an image for cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    /// Displayed dimensions, i.e. after the EXIF orientation is applied.
    pub dimensions: ImageDimensions,

    /// EXIF orientation, if the image carries one.
    pub orientation: Option<ExifOrientation>,
}

impl LoadedImage {
    /// Creates a loaded image without orientation information.
    #[must_use]
    pub fn new(dimensions: ImageDimensions) -> Self {
        Self {
            dimensions,
            orientation: None,
        }
    }

    /// Builds a loaded image from the stored (undisplayed) dimensions and an
    /// optional orientation, swapping axes for quarter turns.
    #[must_use]
    pub fn oriented(stored: ImageDimensions, orientation: Option<ExifOrientation>) -> Self {
        let dimensions = orientation.map_or(stored, |o| o.apply_to(stored));
        Self {
            dimensions,
            orientation,
        }
    }
}

// =============================================================================
// MetadataLoader Trait
// =============================================================================

/// Port for extracting crop-relevant metadata from image bytes.
///
/// Orientation extraction is best effort: an image without EXIF data, or with
/// unreadable EXIF data, still loads with `orientation: None`. Only failing to
/// determine the pixel dimensions is an error.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so loads can run on a blocking pool.
pub trait MetadataLoader: Send + Sync {
    /// Reads dimensions and orientation from raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`MetadataError`] if the dimensions cannot be determined.
    fn load(&self, bytes: &[u8]) -> Result<LoadedImage, MetadataError>;
}
