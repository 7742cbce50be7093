// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for crop field activity.
//!
//! Every state change the controller makes that an operator cannot see
//! directly (stale loads, ignored stored values, widget teardown) is recorded
//! as a [`DiagnosticEvent`] in a memory-bounded [`CircularBuffer`] and mirrored
//! to the `log` facade. The buffer can be exported as JSON.

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind, HideReason};

use crate::error::Result;

/// Recorder of diagnostic events.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    events: CircularBuffer<DiagnosticEvent>,
}

impl Diagnostics {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
        }
    }

    /// Records an event and forwards it to the logger at debug level.
    pub fn record(&mut self, kind: DiagnosticEventKind) {
        log::debug!("{kind:?}");
        self.events.push(DiagnosticEvent::new(kind));
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Recorded event kinds, oldest first.
    pub fn kinds(&self) -> impl Iterator<Item = &DiagnosticEventKind> {
        self.events.iter().map(|event| &event.kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Serializes the recorded events as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let events: Vec<&DiagnosticEvent> = self.events.iter().collect();
        Ok(serde_json::to_string_pretty(&events)?)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
