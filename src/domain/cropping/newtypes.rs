// SPDX-License-Identifier: MPL-2.0
//! Cropping newtypes.
//!
//! This module provides type-safe wrappers for the values the crop engine
//! works with, ensuring they are always valid once constructed.

use std::fmt;
use std::num::NonZeroU32;

// =============================================================================
// FieldId
// =============================================================================

/// Identifier of a form field (crop field or image input).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(String);

impl FieldId {
    /// Creates a new field identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id of the preview element rendered for this field.
    #[must_use]
    pub fn image_element_id(&self) -> String {
        format!("{}-image", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// CropSize
// =============================================================================

/// A width/height pair where both sides are at least one pixel.
///
/// Used for the configured minimum crop size and its orientation-adapted
/// counterpart. Because zero is unrepresentable, ratios derived from a
/// `CropSize` are always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropSize {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl CropSize {
    /// Creates a new size, returning `None` if either side is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width.get()
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height.get()
    }

    /// Returns the size with width and height exchanged.
    #[must_use]
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Width divided by height.
    #[must_use]
    pub fn ratio(self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }
}

// =============================================================================
// ImageDimensions
// =============================================================================

/// Pixel dimensions of a decoded image.
///
/// Both sides are positive; a zero-sized image is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions, returning `None` if either side is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Returns the dimensions with width and height exchanged.
    #[must_use]
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Fixed width-to-height ratio enforced by the selection widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Creates a ratio, returning `None` unless the value is finite and positive.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

// =============================================================================
// Tests
// =============================================================================
