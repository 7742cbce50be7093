// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces of the collaborators the crop controller
//! talks to but does not implement itself.
//!
//! # Available Ports
//!
//! - [`metadata`]: Image dimensions and EXIF orientation extraction
//! - [`selection`]: The interactive rectangle-selection widget
//!
//! # Design Notes
//!
//! - Traits use domain types only (no DOM handles, no decoder types)
//! - The metadata loader is `Send + Sync` so it can run on a blocking pool
//! - Selection widgets are driven from a single thread and need neither
//! - No `async fn` - callers decide how to schedule loads
//!
//! # Example
//!
//! ```ignore
//! use image_cropping::application::port::{LoadedImage, MetadataLoader};
//!
//! fn displayed_size(loader: &impl MetadataLoader, bytes: &[u8]) -> Option<(u32, u32)> {
//!     let LoadedImage { dimensions, .. } = loader.load(bytes).ok()?;
//!     Some((dimensions.width, dimensions.height))
//! }
//! ```

pub mod metadata;
pub mod selection;

// Re-export main types for convenience
pub use metadata::{LoadedImage, MetadataError, MetadataLoader};
pub use selection::{
    SelectionOptions, SelectionWidget, SelectionWidgetFactory, SIZE_WARNING_CLASS, WIDGET_CLASS,
};
