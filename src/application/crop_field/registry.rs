// SPDX-License-Identifier: MPL-2.0
//! Field registry: the live selection widget of each crop field.
//!
//! The registry is owned by the controller and lives as long as the form.
//! It holds at most one widget per field; a widget is always destroyed before
//! it leaves the registry, including when the registry itself is dropped.

use crate::application::port::SelectionWidget;
use crate::domain::cropping::FieldId;
use std::collections::HashMap;

/// Mapping from field identifier to its active selection widget.
#[derive(Debug)]
pub struct FieldRegistry<W: SelectionWidget> {
    widgets: HashMap<FieldId, W>,
}

impl<W: SelectionWidget> FieldRegistry<W> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Registers the widget of a field.
    ///
    /// A widget still registered for the same field is destroyed first.
    pub fn register(&mut self, field: FieldId, widget: W) {
        if self.destroy(&field) {
            log::warn!("Selection widget of {field} was still registered; destroyed it");
        }
        self.widgets.insert(field, widget);
    }

    /// Destroys and removes the widget of a field.
    ///
    /// Returns `true` if a widget was registered.
    pub fn destroy(&mut self, field: &FieldId) -> bool {
        match self.widgets.remove(field) {
            Some(mut widget) => {
                widget.destroy();
                true
            }
            None => false,
        }
    }

    /// Destroys every registered widget, returning how many there were.
    pub fn destroy_all(&mut self) -> usize {
        let count = self.widgets.len();
        for (_, mut widget) in self.widgets.drain() {
            widget.destroy();
        }
        count
    }

    #[must_use]
    pub fn get(&self, field: &FieldId) -> Option<&W> {
        self.widgets.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &FieldId) -> bool {
        self.widgets.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl<W: SelectionWidget> Default for FieldRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SelectionWidget> Drop for FieldRegistry<W> {
    fn drop(&mut self) {
        self.destroy_all();
    }
}
