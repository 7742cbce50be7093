// SPDX-License-Identifier: MPL-2.0
//! Selection-changed handling for one widget instance.
//!
//! A [`SelectionHandler`] is handed to each selection widget when it is
//! created. It carries, by value, everything needed to react to the widget's
//! events: the owning field, the load generation the widget belongs to, and
//! the configured warning threshold.

use crate::domain::cropping::{serialize, CropSize, FieldId, SelectionRect};

/// Receiver of a selection widget's change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionHandler {
    field: FieldId,
    generation: u64,
    min_size: CropSize,
    size_warning: bool,
}

/// Result of evaluating a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionUpdate {
    /// Value to persist in the crop field.
    pub value: String,
    /// New state of the size warning indicator, if size warnings are enabled.
    pub size_warning: Option<bool>,
}

impl SelectionHandler {
    /// Creates a handler.
    ///
    /// `min_size` is the configured minimum, not the orientation-adapted one:
    /// it matches the ratio the widget enforces while dragging.
    #[must_use]
    pub fn new(field: FieldId, generation: u64, min_size: CropSize, size_warning: bool) -> Self {
        Self {
            field,
            generation,
            min_size,
            size_warning,
        }
    }

    #[must_use]
    pub fn field(&self) -> &FieldId {
        &self.field
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Computes the persisted value and warning state for a selection.
    ///
    /// The warning is advisory: an undersized selection is still persisted.
    #[must_use]
    pub fn evaluate(&self, selection: &SelectionRect) -> SelectionUpdate {
        SelectionUpdate {
            value: serialize(selection),
            size_warning: self
                .size_warning
                .then(|| selection.is_smaller_than(self.min_size)),
        }
    }
}
