//! Resource document builder
//!
//! Maps a typed [`Resource`] onto the Kubernetes object layout. Each kind has
//! its own hand-written builder because resource shapes are not uniform (a
//! Job nests a pod template in its spec, a CronJob nests a Job template one
//! level deeper). Builders emit every field they know about; [`clean`] then
//! strips whatever the caller left empty.

mod autoscaling;
mod configuration;
mod network;
mod pod;
mod storage;
mod workloads;

#[cfg(test)]
mod tests;

use serde_json::{json, Value};
use tracing::debug;

use crate::error::Result;
use crate::models::{Metadata, Resource, ResourceInput, DEFAULT_NAMESPACE};
use crate::normalize::clean;
use crate::render;

/// Builds manifest documents from resource inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestGenerator;

impl ManifestGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the cleaned documents for an input, Namespace first when requested
    pub fn build_documents(&self, input: &ResourceInput) -> Vec<Value> {
        let mut documents = Vec::with_capacity(2);

        let namespace = input.resource.namespace();
        if input.include_namespace && namespace != DEFAULT_NAMESPACE {
            documents.push(namespace_document(namespace));
        }

        documents.push(self.build_resource(&input.resource));

        let documents: Vec<Value> = documents.into_iter().filter_map(clean).collect();
        debug!(
            kind = %input.kind(),
            name = %input.resource.name(),
            documents = documents.len(),
            "Built manifest documents"
        );
        documents
    }

    /// Build the raw (uncleaned) document for a single resource
    pub fn build_resource(&self, resource: &Resource) -> Value {
        match resource {
            Resource::Deployment(r) => workloads::deployment(r),
            Resource::StatefulSet(r) => workloads::stateful_set(r),
            Resource::DaemonSet(r) => workloads::daemon_set(r),
            Resource::Job(r) => workloads::job(r),
            Resource::CronJob(r) => workloads::cron_job(r),
            Resource::Service(r) => network::service(r),
            Resource::Ingress(r) => network::ingress(r),
            Resource::ConfigMap(r) => configuration::config_map(r),
            Resource::Secret(r) => configuration::secret(r),
            Resource::PersistentVolumeClaim(r) => storage::persistent_volume_claim(r),
            Resource::StorageClass(r) => storage::storage_class(r),
            Resource::PersistentVolume(r) => storage::persistent_volume(r),
            Resource::HorizontalPodAutoscaler(r) => autoscaling::horizontal_pod_autoscaler(r),
        }
    }

    /// Build and render the YAML stream for an input
    pub fn generate(&self, input: &ResourceInput) -> Result<String> {
        render::to_yaml_stream(&self.build_documents(input))
    }
}

fn namespace_document(name: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": { "name": name }
    })
}

/// `metadata` block for namespaced kinds
pub(crate) fn object_metadata(metadata: &Metadata) -> Value {
    json!({
        "name": metadata.name,
        "namespace": metadata.resolved_namespace(),
        "labels": metadata.labels,
        "annotations": metadata.annotations,
    })
}
