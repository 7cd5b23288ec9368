//! Module model for VersaBoard.
//!
//! Defines module identifiers, descriptors, the [`Registry`] that holds them
//! and the built-in tile catalog.

pub mod catalog;
pub mod error;
pub mod ids;
pub mod registry;

pub use catalog::{DEFAULT_ORDER, STORAGE_KEY, default_order};
pub use error::{ModelError, Result};
pub use ids::ModuleId;
pub use registry::{ModuleDescriptor, Registry};
