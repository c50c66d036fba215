//! Typed input model for the manifest generator
//!
//! Payloads follow the Kubernetes field layout (camelCase on the wire) but
//! only carry the fields the generator knows how to emit.

mod kind;
mod metadata;
mod pod;
mod request;
mod resources;

pub use kind::ResourceKind;
pub use metadata::{ClusterMetadata, Metadata, StringMap, DEFAULT_NAMESPACE};
pub use pod::*;
pub use request::{Resource, ResourceInput, ResourceRequest};
pub use resources::*;
