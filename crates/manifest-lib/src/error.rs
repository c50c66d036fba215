//! Error types for manifest generation

use thiserror::Error;

use crate::models::ResourceKind;

/// Errors raised while turning a request into manifest text
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The payload field matching `resourceKind` was absent
    #[error("resourceKind is {kind} but no `{field}` payload was provided")]
    MissingPayload {
        kind: ResourceKind,
        field: &'static str,
    },

    /// Input failed validation
    #[error("invalid {kind} input: {}", .errors.join("; "))]
    Validation {
        kind: ResourceKind,
        errors: Vec<String>,
    },

    /// YAML serialization failed
    #[error("failed to render manifest: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl ManifestError {
    /// Whether the caller sent bad input (as opposed to an internal failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ManifestError::MissingPayload { .. } | ManifestError::Validation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
