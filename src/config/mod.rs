// SPDX-License-Identifier: MPL-2.0
//! This module handles the form configuration: which crop fields exist and
//! which constraints each of them enforces.
//!
//! Field options are written once (typically rendered by the server next to
//! the form) and validated into a [`CropFieldConfig`] before any crop logic
//! runs, so the controller never reads loosely-typed attributes.
//!
//! # Configuration Sections
//!
//! - `[diagnostics]` - Event buffer settings
//! - `[[fields]]` - One entry per crop field
//!
//! # Examples
//!
//! ```
//! use image_cropping::config::FormConfig;
//!
//! let config = FormConfig::from_toml_str(
//!     r#"
//!     [[fields]]
//!     name = "form-0-cropping"
//!     my-name = "cropping"
//!     image-field = "image_field"
//!     min-width = 120
//!     min-height = 100
//!     ratio = 1.2
//!     "#,
//! )
//! .expect("valid config");
//!
//! let fields = config.validate().expect("valid fields");
//! assert_eq!(fields[0].image_field.as_str(), "form-0-image_field");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::cropping::{AspectRatio, CropSize, FieldId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

// =============================================================================
// Section Structs
// =============================================================================

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct DiagnosticsConfig {
    /// Number of diagnostic events kept in memory.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

fn default_buffer_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
}

/// Raw options of one crop field, as written in the form definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CropFieldSettings {
    /// Form name of the crop field (e.g. `form-0-cropping`).
    pub name: String,

    /// Element id of the crop field; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The model-level name of the crop field; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_name: Option<String>,

    /// The model-level name of the image field this crop applies to.
    #[serde(default)]
    pub image_field: String,

    /// Explicit name of the image input, overriding the derivation from
    /// `name`, `my-name` and `image-field`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_field_id: Option<String>,

    pub min_width: u32,
    pub min_height: u32,

    /// Fixed width/height ratio of the selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,

    #[serde(default)]
    pub adapt_rotation: bool,

    #[serde(default)]
    pub size_warning: bool,

    /// Whether the form lets the operator keep the full-size image.
    #[serde(default)]
    pub allow_fullsize: bool,

    /// Maximum preview box width; `0` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_max_width: Option<u32>,

    /// Maximum preview box height; `0` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_max_height: Option<u32>,
}

impl CropFieldSettings {
    /// Returns the name of the image input associated with this field.
    ///
    /// The first occurrence of `my-name` in `name` is replaced by
    /// `image-field`, which keeps inline form prefixes intact.
    #[must_use]
    pub fn associated_image_field(&self) -> String {
        if let Some(explicit) = &self.image_field_id {
            return explicit.clone();
        }
        let my_name = self.my_name.as_deref().unwrap_or(&self.name);
        self.name.replacen(my_name, &self.image_field, 1)
    }

    /// Validates the raw options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the name is empty, a minimum side is zero,
    /// or the ratio is not a finite positive number.
    pub fn validate(&self) -> Result<CropFieldConfig> {
        if self.name.is_empty() {
            return Err(Error::Config("crop field without a name".to_string()));
        }

        let min_size = CropSize::new(self.min_width, self.min_height).ok_or_else(|| {
            Error::Config(format!(
                "field {}: minimum size {}x{} must be positive",
                self.name, self.min_width, self.min_height
            ))
        })?;

        let ratio = self
            .ratio
            .map(|value| {
                AspectRatio::new(value).ok_or_else(|| {
                    Error::Config(format!(
                        "field {}: ratio {value} must be a finite positive number",
                        self.name
                    ))
                })
            })
            .transpose()?;

        let image_field = self.associated_image_field();
        if image_field.is_empty() {
            return Err(Error::Config(format!(
                "field {}: no associated image field",
                self.name
            )));
        }

        Ok(CropFieldConfig {
            id: FieldId::new(self.id.clone().unwrap_or_else(|| self.name.clone())),
            image_field: FieldId::new(image_field),
            min_size,
            ratio,
            adapt_rotation: self.adapt_rotation,
            size_warning: self.size_warning,
            allow_fullsize: self.allow_fullsize,
            box_max_width: self.box_max_width.and_then(NonZeroU32::new),
            box_max_height: self.box_max_height.and_then(NonZeroU32::new),
        })
    }
}

/// Validated, immutable configuration of one crop field.
#[derive(Debug, Clone, PartialEq)]
pub struct CropFieldConfig {
    /// Identifier of the crop field.
    pub id: FieldId,
    /// Name of the image input supplying the image.
    pub image_field: FieldId,
    /// Minimum acceptable crop size.
    pub min_size: CropSize,
    /// Fixed ratio enforced by the selection widget.
    pub ratio: Option<AspectRatio>,
    /// Swap the minimum size when the image orientation disagrees with it.
    pub adapt_rotation: bool,
    /// Flag selections smaller than the minimum size.
    pub size_warning: bool,
    pub allow_fullsize: bool,
    pub box_max_width: Option<NonZeroU32>,
    pub box_max_height: Option<NonZeroU32>,
}

impl CropFieldConfig {
    /// Creates a configuration with only the required options set.
    #[must_use]
    pub fn new(id: FieldId, image_field: FieldId, min_size: CropSize) -> Self {
        Self {
            id,
            image_field,
            min_size,
            ratio: None,
            adapt_rotation: false,
            size_warning: false,
            allow_fullsize: false,
            box_max_width: None,
            box_max_height: None,
        }
    }
}

// =============================================================================
// FormConfig
// =============================================================================

/// Configuration of a form containing crop fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    #[serde(default)]
    pub fields: Vec<CropFieldSettings>,
}

impl FormConfig {
    /// Parses a form configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TOML is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validates every field, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid field or duplicate field ids.
    pub fn validate(&self) -> Result<Vec<CropFieldConfig>> {
        let fields = self
            .fields
            .iter()
            .map(CropFieldSettings::validate)
            .collect::<Result<Vec<_>>>()?;

        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|other| other.id == field.id) {
                return Err(Error::Config(format!("duplicate crop field {}", field.id)));
            }
        }

        Ok(fields)
    }
}

/// Loads a form configuration from a TOML file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<FormConfig> {
    let content = fs::read_to_string(path)?;
    FormConfig::from_toml_str(&content)
}
