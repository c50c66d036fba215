//! Advisory engine
//!
//! Computes guidance for a resource input, independently of the built
//! document:
//! - Best-practice warnings
//! - Improvement suggestions
//! - Dependencies on other resource kinds
//! - Related (complementary) resource kinds
//! - Example kubectl commands
//! - The global recommended apply order

mod commands;
mod dependencies;
mod suggestions;
mod warnings;


use serde::Serialize;
use tracing::debug;

use crate::models::{ResourceInput, ResourceKind};

pub use commands::{deployment_commands, deployment_order};
pub use dependencies::{dependencies, related_resources};
pub use suggestions::suggestions;
pub use warnings::{is_valid_cron_schedule, warnings};

/// A resource kind the input needs (or benefits from) before it is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub resource_kind: String,
    pub reason: String,
    pub required: bool,
}

impl Dependency {
    fn new(resource_kind: impl Into<String>, reason: impl Into<String>, required: bool) -> Self {
        Self {
            resource_kind: resource_kind.into(),
            reason: reason.into(),
            required,
        }
    }
}

/// A complementary resource kind, purely suggestive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedResource {
    pub resource_kind: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentCommand {
    pub description: String,
    pub command: String,
}

/// One step of the recommended apply order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStep {
    pub step: u32,
    pub resource_kinds: Vec<String>,
    pub description: String,
}

/// Everything the advisory engine knows about one input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryResult {
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub related_resources: Vec<RelatedResource>,
    pub deployment_commands: Vec<DeploymentCommand>,
    pub deployment_order: Vec<DeploymentStep>,
}

/// Run every advisory rule table against an input
pub fn analyze(input: &ResourceInput) -> AdvisoryResult {
    let resource = &input.resource;
    let kind: ResourceKind = resource.kind();

    let result = AdvisoryResult {
        warnings: warnings(resource),
        suggestions: suggestions(resource),
        dependencies: dependencies(resource),
        related_resources: related_resources(kind),
        deployment_commands: deployment_commands(resource),
        deployment_order: deployment_order(),
    };

    debug!(
        kind = %kind,
        name = %resource.name(),
        warnings = result.warnings.len(),
        dependencies = result.dependencies.len(),
        "Analyzed resource"
    );
    result
}
