// SPDX-License-Identifier: MPL-2.0
//! Textual form of the persisted crop value.
//!
//! The stored value is `"x1,y1,x2,y2"` (four integers) or the empty string
//! when no selection has been made yet. This is the contract with the
//! server-side consumer that crops the original image.

use std::fmt;
use std::str::FromStr;

use super::geometry::{round_half_up, CropRectangle, SelectionRect};

/// Separator between coordinates in the stored value.
pub const SEPARATOR: char = ',';

/// Errors produced by the strict crop value parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropValueError {
    /// The value is empty (no stored selection).
    Empty,
    /// The value does not contain exactly four coordinates.
    WrongFieldCount(usize),
    /// A coordinate is not a non-negative integer.
    InvalidCoordinate(String),
}

impl fmt::Display for CropValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropValueError::Empty => write!(f, "Crop value is empty"),
            CropValueError::WrongFieldCount(count) => {
                write!(f, "Crop value has {count} coordinates, expected 4")
            }
            CropValueError::InvalidCoordinate(raw) => {
                write!(f, "Invalid crop coordinate: {raw:?}")
            }
        }
    }
}

impl std::error::Error for CropValueError {}

impl fmt::Display for CropRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl FromStr for CropRectangle {
    type Err = CropValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(CropValueError::Empty);
        }

        let parts: Vec<&str> = value.split(SEPARATOR).collect();
        let [x1, y1, x2, y2] = parts.as_slice() else {
            return Err(CropValueError::WrongFieldCount(parts.len()));
        };

        Ok(Self::new(
            parse_coordinate(x1)?,
            parse_coordinate(y1)?,
            parse_coordinate(x2)?,
            parse_coordinate(y2)?,
        ))
    }
}

fn parse_coordinate(raw: &str) -> Result<u32, CropValueError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CropValueError::InvalidCoordinate(raw.to_string()))
}

/// Serializes a selection, rounding each coordinate to the nearest integer.
///
/// A selection with a NaN or infinite coordinate has no textual form and
/// serializes to the empty string.
#[must_use]
pub fn serialize(rect: &SelectionRect) -> String {
    if !rect.is_finite() {
        log::warn!("Not serializing non-finite selection {rect:?}");
        return String::new();
    }
    let coords = [rect.x1, rect.y1, rect.x2, rect.y2].map(round_half_up);
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
        coords[0], coords[1], coords[2], coords[3]
    )
}

/// Parses a stored crop value.
///
/// Returns `None` for the empty string and for malformed values, so callers
/// fall back to computing a default rectangle instead of failing.
#[must_use]
pub fn parse_crop_value(value: &str) -> Option<CropRectangle> {
    match value.parse::<CropRectangle>() {
        Ok(rect) => Some(rect),
        Err(CropValueError::Empty) => None,
        Err(err) => {
            log::warn!("Ignoring stored crop value {value:?}: {err}");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
