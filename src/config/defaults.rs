// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Selection**: Fixed constraints handed to the selection widget
//! - **Diagnostics**: Event buffer capacity bounds

// ==========================================================================
// Selection Defaults
// ==========================================================================

/// Smallest selection (in pixels, both sides) the widget lets the user draw.
///
/// Independent of the configured minimum crop size; prevents zero-area
/// selections.
pub const MIN_SELECTION_SIZE: u32 = 5;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 256;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 4096;
