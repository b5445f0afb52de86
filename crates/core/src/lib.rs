//! Shared foundation for the AdmitFlow builder platform — error type,
//! builder-type enum, and the element type registry consumed by the
//! authoring surfaces.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{AdmitError, AdmitResult};
pub use registry::ElementTypeRegistry;
pub use types::BuilderType;
