// SPDX-License-Identifier: MPL-2.0
//! Orientation handling for crop constraints.
//!
//! Two concerns live here:
//! - [`effective_min_dimensions`]: rotates the configured minimum crop size so
//!   it matches the orientation of the uploaded image.
//! - [`ExifOrientation`]: the EXIF orientation tag, which decides whether the
//!   decoded pixel dimensions must be swapped before any crop is computed.

use super::geometry::{classify_orientation, Orientation};
use super::newtypes::{CropSize, ImageDimensions};

/// Returns the minimum crop size to use for an image.
///
/// When `adapt_rotation` is set and the image is portrait while the configured
/// minimum is not (or vice versa), width and height are swapped. Otherwise the
/// configured minimum is returned unchanged.
#[must_use]
pub fn effective_min_dimensions(
    min: CropSize,
    image: ImageDimensions,
    adapt_rotation: bool,
) -> CropSize {
    if !adapt_rotation {
        return min;
    }

    let image_orientation = classify_orientation(image.width, image.height);
    let image_is_portrait = image_orientation == Orientation::Portrait;
    let select_is_portrait = min.height() > min.width();

    if image_is_portrait == select_is_portrait {
        min
    } else {
        min.transposed()
    }
}

/// EXIF orientation tag (values 1 to 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExifOrientation {
    /// 1: no transformation.
    #[default]
    Normal,
    /// 2: mirrored horizontally.
    FlipHorizontal,
    /// 3: rotated 180°.
    Rotate180,
    /// 4: mirrored vertically.
    FlipVertical,
    /// 5: mirrored over the main diagonal.
    Transpose,
    /// 6: rotated 90° clockwise.
    Rotate90,
    /// 7: mirrored over the anti-diagonal.
    Transverse,
    /// 8: rotated 270° clockwise.
    Rotate270,
}

impl ExifOrientation {
    /// Maps a raw EXIF tag value; unknown values yield `None`.
    #[must_use]
    pub fn from_tag(value: u32) -> Option<Self> {
        Some(match value {
            1 => Self::Normal,
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => return None,
        })
    }

    /// Returns the raw EXIF tag value.
    #[must_use]
    pub fn tag(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Returns true if displaying the image exchanges its width and height.
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Returns the displayed dimensions of an image stored as `stored`.
    #[must_use]
    pub fn apply_to(self, stored: ImageDimensions) -> ImageDimensions {
        if self.swaps_axes() {
            stored.transposed()
        } else {
            stored
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
