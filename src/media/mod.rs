// SPDX-License-Identifier: MPL-2.0
//! Image file handling.
//!
//! Implements the metadata port on top of the `image` and `kamadak-exif`
//! crates and provides the background loading used by crop forms.

pub mod loader;

pub use loader::{load_in_background, read_orientation, ExifMetadataLoader};
