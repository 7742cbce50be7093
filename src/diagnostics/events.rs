// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for crop field activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a crop field was hidden instead of shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HideReason {
    /// The form has no image input the field refers to.
    NoImageInput,
    /// The image input exists but holds no image yet.
    NoExistingImage,
}

/// What happened to a crop field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The field was registered but stays hidden.
    FieldHidden { field: String, reason: HideReason },

    /// An image load was started for the field.
    LoadStarted {
        field: String,
        generation: u64,
        is_new: bool,
    },

    /// A load completed after a newer one was started and was dropped.
    StaleLoadDiscarded {
        field: String,
        generation: u64,
        current: u64,
    },

    /// The image could not be read; the field keeps its previous state.
    LoadFailed { field: String, message: String },

    /// The previous selection widget of the field was torn down.
    WidgetDestroyed { field: String },

    /// A maximal default crop was computed and stored.
    DefaultCropComputed { field: String, value: String },

    /// A previously stored crop value was reused.
    StoredValueRestored { field: String, value: String },

    /// A stored crop value was unusable and replaced by the default crop.
    StoredValueIgnored { field: String, value: String },

    /// The size warning indicator was switched on or off.
    SizeWarningChanged { field: String, active: bool },

    /// The field was removed from the form.
    FieldRemoved { field: String },
}

/// A diagnostic event with its timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }
}
