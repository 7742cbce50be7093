// SPDX-License-Identifier: MPL-2.0
//! Cropping domain types.
//!
//! This module provides the pure crop logic used by every crop field:
//! - [`geometry`]: crop rectangles and the maximal centered crop
//! - [`codec`]: the persisted `"x1,y1,x2,y2"` value
//! - [`orientation`]: orientation-aware minimum size and EXIF orientation
//! - [`newtypes`]: validated value objects

pub mod codec;
pub mod geometry;
pub mod newtypes;
pub mod orientation;

pub use codec::{parse_crop_value, serialize, CropValueError};
pub use geometry::{
    classify_orientation, compute_max_crop, CropRectangle, Orientation, SelectionRect,
};
pub use newtypes::{AspectRatio, CropSize, FieldId, ImageDimensions};
pub use orientation::{effective_min_dimensions, ExifOrientation};
