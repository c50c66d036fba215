//! Kubernetes manifest generation library
//!
//! This crate provides the core functionality for:
//! - Typed resource descriptions for 13 Kubernetes kinds
//! - Building and normalizing manifest documents
//! - Rendering multi-document YAML streams
//! - Best-practice advisories (warnings, suggestions, dependencies, commands)
//! - Input validation and observability helpers

pub mod advisory;
pub mod builder;
pub mod error;
pub mod models;
pub mod normalize;
pub mod observability;
pub mod render;
pub mod validate;

pub use advisory::{analyze, AdvisoryResult};
pub use builder::ManifestGenerator;
pub use error::{ManifestError, Result};
pub use models::*;
pub use normalize::clean;
pub use observability::{GeneratorMetrics, StructuredLogger};
pub use validate::{validate, ValidationReport};
