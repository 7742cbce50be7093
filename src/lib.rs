// SPDX-License-Identifier: MPL-2.0
//! `image_cropping` computes crop rectangles for image upload forms and keeps
//! each crop field in sync with its interactive selection widget.
//!
//! A form declares crop fields, each tied to an image input and a minimum crop
//! size. When an image is shown the crate computes the largest centered crop
//! matching the minimum size's ratio (optionally adapted to the image's
//! orientation), restores a previously stored crop when it still applies, and
//! persists every user adjustment as `"x1,y1,x2,y2"` in original image pixels.
//!
//! The selection widget itself is a port ([`application::port::SelectionWidget`]);
//! image metadata comes from [`media::ExifMetadataLoader`].

#![doc(html_root_url = "https://docs.rs/image_cropping/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod form;
pub mod media;

pub use application::crop_field::{CropFieldController, FieldInit, ImageInput, LoadOutcome};
pub use form::CropForm;
