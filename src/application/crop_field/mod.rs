// SPDX-License-Identifier: MPL-2.0
//! Crop field lifecycle.
//!
//! - [`controller`]: initialization, image changes and selection events
//! - [`handler`]: per-widget selection-changed handling
//! - [`registry`]: ownership of live selection widgets
//! - [`state`]: per-field state

pub mod controller;
pub mod handler;
pub mod registry;
pub mod state;

pub use controller::{CropFieldController, FieldInit, LoadOutcome, LoadTicket};
pub use handler::{SelectionHandler, SelectionUpdate};
pub use registry::FieldRegistry;
pub use state::{CropFieldState, FieldPhase, ImageInput, SelectionOrigin};
