// SPDX-License-Identifier: MPL-2.0
//! Crop form composition.
//!
//! [`CropForm`] wires a validated [`FormConfig`], a [`MetadataLoader`] and a
//! [`SelectionWidgetFactory`] into one [`CropFieldController`]. Image decoding
//! runs on the blocking pool; completions are applied back on the caller's
//! task, so loads started for the same field may finish in any order.

use crate::application::crop_field::{
    CropFieldController, CropFieldState, FieldInit, ImageInput, LoadOutcome, LoadTicket,
    SelectionHandler, SelectionUpdate,
};
use crate::application::port::{LoadedImage, MetadataError, MetadataLoader, SelectionWidgetFactory};
use crate::config::{CropFieldConfig, FormConfig};
use crate::diagnostics::{BufferCapacity, Diagnostics};
use crate::domain::cropping::{FieldId, SelectionRect};
use crate::error::Result;
use crate::media::load_in_background;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// An image load that finished on the blocking pool, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedLoad {
    pub ticket: LoadTicket,
    pub result: std::result::Result<LoadedImage, MetadataError>,
}

/// A form with one or more crop fields.
pub struct CropForm<F: SelectionWidgetFactory, L: MetadataLoader + 'static> {
    controller: CropFieldController<F>,
    loader: Arc<L>,
    fields: Vec<CropFieldConfig>,
}

impl<F: SelectionWidgetFactory, L: MetadataLoader + 'static> CropForm<F, L> {
    /// Builds a form from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Config`] if a field is invalid.
    pub fn from_config(config: &FormConfig, factory: F, loader: L) -> Result<Self> {
        let fields = config.validate()?;
        let capacity = BufferCapacity::new(config.diagnostics.buffer_capacity);

        Ok(Self {
            controller: CropFieldController::new(factory, Diagnostics::new(capacity)),
            loader: Arc::new(loader),
            fields,
        })
    }

    /// Registers every configured field against the form's image inputs.
    ///
    /// `values` holds the crop values stored with the form; fields without an
    /// entry start empty.
    pub fn init(
        &mut self,
        inputs: &[ImageInput],
        values: &HashMap<FieldId, String>,
    ) -> Vec<(FieldId, FieldInit)> {
        self.fields
            .iter()
            .map(|config| {
                let value = values.get(&config.id).cloned().unwrap_or_default();
                let init = self.controller.init_field(config.clone(), value, inputs);
                (config.id.clone(), init)
            })
            .collect()
    }

    /// Starts loading a newly chosen file. See [`Self::load`].
    pub fn begin_image_change(&mut self, field: &FieldId) -> Option<LoadTicket> {
        self.controller.begin_image_change(field)
    }

    /// Decodes `bytes` on the blocking pool.
    ///
    /// The returned future does not borrow the form, so several loads can be
    /// in flight at once; hand each result to [`Self::complete`].
    pub fn load(
        &self,
        ticket: LoadTicket,
        bytes: Vec<u8>,
    ) -> impl Future<Output = CompletedLoad> + Send + 'static {
        let loader = Arc::clone(&self.loader);
        async move {
            let result = load_in_background(loader, bytes).await;
            CompletedLoad { ticket, result }
        }
    }

    /// Applies a finished load to its field.
    pub fn complete(&mut self, load: CompletedLoad) -> LoadOutcome {
        match load.result {
            Ok(image) => self.controller.on_image_ready(&load.ticket, image),
            Err(err) => self.controller.on_load_failed(&load.ticket, &err),
        }
    }

    /// Loads and shows the stored image of a field.
    pub async fn show_existing(&mut self, ticket: LoadTicket, bytes: Vec<u8>) -> LoadOutcome {
        let load = self.load(ticket, bytes).await;
        self.complete(load)
    }

    /// Replaces the image of a field with a newly chosen file.
    ///
    /// Returns [`LoadOutcome::UnknownField`] if the field does not exist or has
    /// no image input.
    pub async fn replace_image(&mut self, field: &FieldId, bytes: Vec<u8>) -> LoadOutcome {
        let Some(ticket) = self.begin_image_change(field) else {
            return LoadOutcome::UnknownField;
        };
        let load = self.load(ticket, bytes).await;
        self.complete(load)
    }

    pub fn selection_changed(
        &mut self,
        handler: &SelectionHandler,
        selection: SelectionRect,
    ) -> Option<SelectionUpdate> {
        self.controller.on_selection_changed(handler, selection)
    }

    /// Removes a field, e.g. when its inline form row is deleted.
    pub fn remove_field(&mut self, field: &FieldId) -> bool {
        self.fields.retain(|config| &config.id != field);
        self.controller.remove_field(field)
    }

    #[must_use]
    pub fn field(&self, field: &FieldId) -> Option<&CropFieldState> {
        self.controller.field(field)
    }

    #[must_use]
    pub fn value(&self, field: &FieldId) -> Option<&str> {
        self.controller.value(field)
    }

    /// Validated configuration of every field still on the form.
    #[must_use]
    pub fn field_configs(&self) -> &[CropFieldConfig] {
        &self.fields
    }

    #[must_use]
    pub fn controller(&self) -> &CropFieldController<F> {
        &self.controller
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        self.controller.diagnostics()
    }
}
