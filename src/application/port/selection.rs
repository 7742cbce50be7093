// SPDX-License-Identifier: MPL-2.0
//! Selection widget port definition.
//!
//! The selection widget is the interactive overlay that draws a crop handle
//! over the preview image. It is created with the initial selection and the
//! field's constraints, reports selection changes back through the
//! [`SelectionHandler`] it was given, and must release all of its listeners
//! when destroyed.

use crate::application::crop_field::SelectionHandler;
use crate::config::MIN_SELECTION_SIZE;
use crate::domain::cropping::{AspectRatio, CropRectangle, ImageDimensions};
use std::num::NonZeroU32;

/// CSS class always applied to the widget holder.
pub const WIDGET_CLASS: &str = "jcrop-image";

/// CSS class flagging a selection smaller than the configured minimum.
pub const SIZE_WARNING_CLASS: &str = "size-warning";

/// Everything the widget needs to render a field's crop overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOptions {
    /// Id of the preview element the widget attaches to.
    pub element_id: String,
    /// Selection shown when the widget appears.
    pub initial: CropRectangle,
    /// Fixed ratio enforced while dragging, if any.
    pub aspect_ratio: Option<AspectRatio>,
    /// Smallest selection the user can draw, in pixels.
    pub min_selection: (u32, u32),
    /// Pixel size of the original image the coordinates refer to.
    pub true_size: ImageDimensions,
    /// Upper bound of the rendered preview box width.
    pub box_width: Option<NonZeroU32>,
    /// Upper bound of the rendered preview box height.
    pub box_height: Option<NonZeroU32>,
    /// Whether keyboard nudging is enabled.
    pub key_support: bool,
    /// Whether the initial selection is already below the minimum size.
    pub size_warning: bool,
    /// Receiver of the widget's selection-changed events.
    pub handler: SelectionHandler,
}

impl SelectionOptions {
    /// Creates options with the fixed defaults (5x5 floor, no key support).
    #[must_use]
    pub fn new(
        element_id: String,
        initial: CropRectangle,
        true_size: ImageDimensions,
        handler: SelectionHandler,
    ) -> Self {
        Self {
            element_id,
            initial,
            aspect_ratio: None,
            min_selection: (MIN_SELECTION_SIZE, MIN_SELECTION_SIZE),
            true_size,
            box_width: None,
            box_height: None,
            key_support: false,
            size_warning: false,
            handler,
        }
    }

    /// Returns the CSS classes for the widget holder.
    #[must_use]
    pub fn classes(&self) -> String {
        if self.size_warning {
            format!("{SIZE_WARNING_CLASS} {WIDGET_CLASS}")
        } else {
            WIDGET_CLASS.to_string()
        }
    }
}

// =============================================================================
// SelectionWidget Trait
// =============================================================================

/// A live selection widget instance.
pub trait SelectionWidget {
    /// Tears the widget down, releasing every listener it registered.
    ///
    /// Called exactly once, before the handle is dropped.
    fn destroy(&mut self);
}

// =============================================================================
// SelectionWidgetFactory Trait
// =============================================================================

/// Port for creating selection widgets.
pub trait SelectionWidgetFactory {
    /// Handle type of the widgets this factory creates.
    type Widget: SelectionWidget;

    /// Creates a widget rendering `options`.
    fn create(&mut self, options: SelectionOptions) -> Self::Widget;
}
