// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`crop_field`]: Crop field controller, field registry and per-field state
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer (`media`) implements application layer ports
//! - The form composition root (`form`) wires both together

pub mod crop_field;
pub mod port;
