// SPDX-License-Identifier: MPL-2.0
//! Per-field crop state.

use crate::config::CropFieldConfig;
use crate::domain::cropping::{CropRectangle, FieldId, ImageDimensions};

/// Where a shown field's current rectangle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Computed default or restored stored value, untouched by the user.
    Initial,
    /// Changed through the selection widget since the image was shown.
    UserAdjusted,
}

/// Visible phase of a crop field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// No image available yet; the field and its form row are hidden.
    Hidden,
    /// An image is shown with a selection widget over it.
    HasImage(SelectionOrigin),
}

/// An image input of the form, as seen by crop fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Name of the input; matched against a crop field's associated image field.
    pub name: FieldId,
    /// Preview of an image stored before the form was opened.
    pub thumbnail_url: Option<String>,
    /// Pixel size of the stored original image.
    pub original_size: Option<ImageDimensions>,
}

impl ImageInput {
    /// Creates an input without a stored image.
    #[must_use]
    pub fn empty(name: FieldId) -> Self {
        Self {
            name,
            thumbnail_url: None,
            original_size: None,
        }
    }

    /// Creates an input holding a stored image.
    #[must_use]
    pub fn with_thumbnail(
        name: FieldId,
        thumbnail_url: impl Into<String>,
        original_size: ImageDimensions,
    ) -> Self {
        Self {
            name,
            thumbnail_url: Some(thumbnail_url.into()),
            original_size: Some(original_size),
        }
    }
}

/// Mutable state of one crop field, owned by the controller.
#[derive(Debug, Clone)]
pub struct CropFieldState {
    pub(crate) config: CropFieldConfig,
    pub(crate) phase: FieldPhase,
    pub(crate) has_image_input: bool,
    /// Original pixel size recorded on the image input.
    pub(crate) original_size: Option<ImageDimensions>,
    /// Pixel size the current rectangle refers to.
    pub(crate) image: Option<ImageDimensions>,
    pub(crate) rectangle: Option<CropRectangle>,
    /// Persisted crop value (`"x1,y1,x2,y2"` or empty).
    pub(crate) value: String,
    pub(crate) size_warning: bool,
    /// Generation of the most recently started image load.
    pub(crate) generation: u64,
    /// Generation whose selection widget is currently live.
    pub(crate) widget_generation: Option<u64>,
}

impl CropFieldState {
    pub(crate) fn new(config: CropFieldConfig, value: String, input: Option<&ImageInput>) -> Self {
        Self {
            config,
            phase: FieldPhase::Hidden,
            has_image_input: input.is_some(),
            original_size: input.and_then(|input| input.original_size),
            image: None,
            rectangle: None,
            value,
            size_warning: false,
            generation: 0,
            widget_generation: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CropFieldConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.phase == FieldPhase::Hidden
    }

    #[must_use]
    pub fn image(&self) -> Option<ImageDimensions> {
        self.image
    }

    #[must_use]
    pub fn rectangle(&self) -> Option<CropRectangle> {
        self.rectangle
    }

    /// The persisted crop value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the size warning indicator is currently shown.
    #[must_use]
    pub fn size_warning(&self) -> bool {
        self.size_warning
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
