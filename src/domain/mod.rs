// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core crop logic.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It depends on nothing but `std` (and the `log` facade for degraded-input
//! warnings) to keep it trivially testable.
//!
//! # Modules
//!
//! - [`cropping`]: Crop geometry, the persisted crop value, orientation
//!   adaptation ([`CropRectangle`](cropping::CropRectangle),
//!   [`CropSize`](cropping::CropSize), [`ExifOrientation`](cropping::ExifOrientation))
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))

pub mod cropping;
pub mod diagnostics;
