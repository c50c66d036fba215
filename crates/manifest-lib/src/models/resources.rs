//! Per-kind payloads

use serde::{Deserialize, Serialize};

use super::metadata::{ClusterMetadata, Metadata, StringMap};
use super::pod::{HostPathSource, IntOrString, PodSpecInput};

/// `ttlSecondsAfterFinished` applied to CronJob job templates when unset
pub const DEFAULT_CRONJOB_TTL_SECONDS: i32 = 86_400;

fn default_replicas() -> i32 {
    1
}

fn default_access_modes() -> Vec<AccessMode> {
    vec![AccessMode::ReadWriteOnce]
}

fn default_ingress_path() -> String {
    "/".to_string()
}

fn default_secret_type() -> String {
    "Opaque".to_string()
}

fn default_scale_target_api_version() -> String {
    "apps/v1".to_string()
}

fn default_scale_target_kind() -> String {
    "Deployment".to_string()
}

fn default_storage_class_reclaim() -> ReclaimPolicy {
    ReclaimPolicy::Delete
}

fn default_volume_reclaim() -> ReclaimPolicy {
    ReclaimPolicy::Retain
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    ReadWriteOnce,
    ReadOnlyMany,
    ReadWriteMany,
    ReadWriteOncePod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeMode {
    Filesystem,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReclaimPolicy {
    Retain,
    Delete,
    Recycle,
}

// ---------------------------------------------------------------------------
// Workloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStrategyType {
    #[default]
    RollingUpdate,
    Recreate,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateDeployment {
    #[serde(default)]
    pub max_surge: Option<IntOrString>,
    #[serde(default)]
    pub max_unavailable: Option<IntOrString>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStrategy {
    #[serde(rename = "type", default)]
    pub strategy_type: DeploymentStrategyType,
    #[serde(default)]
    pub rolling_update: Option<RollingUpdateDeployment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInput {
    pub metadata: Metadata,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(default)]
    pub strategy: Option<DeploymentStrategy>,
    #[serde(default)]
    pub revision_history_limit: Option<i32>,
    #[serde(default)]
    pub min_ready_seconds: Option<i32>,
    #[serde(flatten)]
    pub pod: PodSpecInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodManagementPolicy {
    OrderedReady,
    Parallel,
}

/// Update strategy shared by StatefulSet and DaemonSet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateStrategyType {
    #[default]
    RollingUpdate,
    OnDelete,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetRollingUpdate {
    #[serde(default)]
    pub partition: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetUpdateStrategy {
    #[serde(rename = "type", default)]
    pub strategy_type: UpdateStrategyType,
    #[serde(default)]
    pub rolling_update: Option<StatefulSetRollingUpdate>,
}

/// Claim template stamped out once per StatefulSet replica
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeClaimTemplate {
    pub name: String,
    #[serde(default = "default_access_modes")]
    pub access_modes: Vec<AccessMode>,
    #[serde(default)]
    pub storage_class_name: Option<String>,
    pub storage: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetInput {
    pub metadata: Metadata,
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    pub service_name: String,
    #[serde(default)]
    pub pod_management_policy: Option<PodManagementPolicy>,
    #[serde(default)]
    pub update_strategy: Option<StatefulSetUpdateStrategy>,
    #[serde(default)]
    pub volume_claim_templates: Vec<VolumeClaimTemplate>,
    #[serde(flatten)]
    pub pod: PodSpecInput,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetRollingUpdate {
    #[serde(default)]
    pub max_unavailable: Option<IntOrString>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetUpdateStrategy {
    #[serde(rename = "type", default)]
    pub strategy_type: UpdateStrategyType,
    #[serde(default)]
    pub rolling_update: Option<DaemonSetRollingUpdate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetInput {
    pub metadata: Metadata,
    #[serde(default)]
    pub update_strategy: Option<DaemonSetUpdateStrategy>,
    #[serde(default)]
    pub host_network: Option<bool>,
    #[serde(rename = "hostPID", default)]
    pub host_pid: Option<bool>,
    #[serde(flatten)]
    pub pod: PodSpecInput,
}

impl DaemonSetInput {
    pub fn uses_host_network(&self) -> bool {
        self.host_network.unwrap_or(false)
    }

    pub fn uses_host_pid(&self) -> bool {
        self.host_pid.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobRestartPolicy {
    #[default]
    OnFailure,
    Never,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub metadata: Metadata,
    #[serde(default)]
    pub completions: Option<i32>,
    #[serde(default)]
    pub parallelism: Option<i32>,
    #[serde(default)]
    pub backoff_limit: Option<i32>,
    #[serde(default)]
    pub active_deadline_seconds: Option<i64>,
    #[serde(default)]
    pub ttl_seconds_after_finished: Option<i32>,
    #[serde(default)]
    pub restart_policy: JobRestartPolicy,
    #[serde(flatten)]
    pub pod: PodSpecInput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcurrencyPolicy {
    #[default]
    Allow,
    Forbid,
    Replace,
}

/// Job spec nested inside a CronJob
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTemplateInput {
    #[serde(default)]
    pub completions: Option<i32>,
    #[serde(default)]
    pub parallelism: Option<i32>,
    #[serde(default)]
    pub backoff_limit: Option<i32>,
    #[serde(default)]
    pub active_deadline_seconds: Option<i64>,
    #[serde(default)]
    pub ttl_seconds_after_finished: Option<i32>,
    #[serde(default)]
    pub restart_policy: JobRestartPolicy,
    #[serde(flatten)]
    pub pod: PodSpecInput,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobInput {
    pub metadata: Metadata,
    pub schedule: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub concurrency_policy: Option<ConcurrencyPolicy>,
    #[serde(default)]
    pub suspend: Option<bool>,
    #[serde(default)]
    pub successful_jobs_history_limit: Option<i32>,
    #[serde(default)]
    pub failed_jobs_history_limit: Option<i32>,
    #[serde(default)]
    pub starting_deadline_seconds: Option<i64>,
    pub job_template: JobTemplateInput,
}

// ---------------------------------------------------------------------------
// Networking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    ClusterIP,
    NodePort,
    LoadBalancer,
    ExternalName,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(default)]
    pub name: Option<String>,
    pub port: i32,
    #[serde(default)]
    pub target_port: Option<IntOrString>,
    #[serde(default)]
    pub protocol: super::pod::Protocol,
    #[serde(default)]
    pub node_port: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub metadata: Metadata,
    #[serde(rename = "type", default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub selector: StringMap,
    #[serde(default)]
    pub ports: Vec<ServicePort>,
    #[serde(rename = "clusterIP", default)]
    pub cluster_ip: Option<String>,
    #[serde(default)]
    pub external_name: Option<String>,
    #[serde(default)]
    pub session_affinity: Option<String>,
    #[serde(default)]
    pub external_traffic_policy: Option<String>,
    #[serde(rename = "loadBalancerIP", default)]
    pub load_balancer_ip: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    #[default]
    Prefix,
    Exact,
    ImplementationSpecific,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    pub service_name: String,
    pub service_port: IntOrString,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressPath {
    #[serde(default = "default_ingress_path")]
    pub path: String,
    #[serde(default)]
    pub path_type: PathType,
    pub service_name: String,
    pub service_port: IntOrString,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub paths: Vec<IngressPath>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub secret_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressInput {
    pub metadata: Metadata,
    #[serde(default)]
    pub ingress_class_name: Option<String>,
    #[serde(default)]
    pub rules: Vec<IngressRule>,
    #[serde(default)]
    pub tls: Vec<IngressTls>,
    #[serde(default)]
    pub default_backend: Option<IngressBackend>,
}

impl IngressInput {
    /// Backend Service names in first-seen order
    pub fn backend_services(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let paths = self.rules.iter().flat_map(|r| r.paths.iter());
        let backends = self
            .default_backend
            .iter()
            .map(|b| b.service_name.as_str())
            .chain(paths.map(|p| p.service_name.as_str()));
        for name in backends {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// TLS secret names in first-seen order
    pub fn tls_secrets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.tls.iter().filter_map(|t| t.secret_name.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapInput {
    pub metadata: Metadata,
    #[serde(default)]
    pub data: StringMap,
    #[serde(default)]
    pub binary_data: StringMap,
    #[serde(default)]
    pub immutable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretInput {
    pub metadata: Metadata,
    #[serde(rename = "type", default = "default_secret_type")]
    pub secret_type: String,
    #[serde(default)]
    pub data: StringMap,
    #[serde(default)]
    pub string_data: StringMap,
    #[serde(default)]
    pub immutable: Option<bool>,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimInput {
    pub metadata: Metadata,
    #[serde(default = "default_access_modes")]
    pub access_modes: Vec<AccessMode>,
    #[serde(default)]
    pub storage_class_name: Option<String>,
    pub storage: String,
    #[serde(default)]
    pub volume_mode: Option<VolumeMode>,
    #[serde(default)]
    pub volume_name: Option<String>,
    #[serde(default)]
    pub selector: StringMap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeBindingMode {
    #[default]
    Immediate,
    WaitForFirstConsumer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassInput {
    pub metadata: ClusterMetadata,
    pub provisioner: String,
    #[serde(default)]
    pub parameters: StringMap,
    #[serde(default = "default_storage_class_reclaim")]
    pub reclaim_policy: ReclaimPolicy,
    #[serde(default)]
    pub volume_binding_mode: VolumeBindingMode,
    #[serde(default)]
    pub allow_volume_expansion: Option<bool>,
    #[serde(default)]
    pub mount_options: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsSource {
    pub server: String,
    pub path: String,
    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsElasticBlockStoreSource {
    #[serde(rename = "volumeID")]
    pub volume_id: String,
    #[serde(default)]
    pub fs_type: Option<String>,
    #[serde(default)]
    pub partition: Option<i32>,
    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcePersistentDiskSource {
    pub pd_name: String,
    #[serde(default)]
    pub fs_type: Option<String>,
    #[serde(default)]
    pub partition: Option<i32>,
    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimRef {
    pub namespace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeInput {
    pub metadata: ClusterMetadata,
    pub capacity: String,
    #[serde(default = "default_access_modes")]
    pub access_modes: Vec<AccessMode>,
    #[serde(default = "default_volume_reclaim")]
    pub persistent_volume_reclaim_policy: ReclaimPolicy,
    #[serde(default)]
    pub storage_class_name: Option<String>,
    #[serde(default)]
    pub volume_mode: Option<VolumeMode>,
    #[serde(default)]
    pub mount_options: Vec<String>,
    #[serde(default)]
    pub host_path: Option<HostPathSource>,
    #[serde(default)]
    pub nfs: Option<NfsSource>,
    #[serde(default)]
    pub aws_elastic_block_store: Option<AwsElasticBlockStoreSource>,
    #[serde(default)]
    pub gce_persistent_disk: Option<GcePersistentDiskSource>,
    #[serde(default)]
    pub claim_ref: Option<ClaimRef>,
}

impl PersistentVolumeInput {
    /// Source field names that are set, in emission priority order
    pub fn configured_sources(&self) -> Vec<&'static str> {
        [
            ("hostPath", self.host_path.is_some()),
            ("nfs", self.nfs.is_some()),
            ("awsElasticBlockStore", self.aws_elastic_block_store.is_some()),
            ("gcePersistentDisk", self.gce_persistent_disk.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Autoscaling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTargetRef {
    #[serde(default = "default_scale_target_api_version")]
    pub api_version: String,
    #[serde(default = "default_scale_target_kind")]
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerInput {
    pub metadata: Metadata,
    pub scale_target_ref: ScaleTargetRef,
    #[serde(default = "default_replicas")]
    pub min_replicas: i32,
    pub max_replicas: i32,
    #[serde(rename = "targetCPUUtilizationPercentage", default)]
    pub target_cpu_utilization_percentage: Option<i32>,
    #[serde(rename = "targetMemoryUtilizationPercentage", default)]
    pub target_memory_utilization_percentage: Option<i32>,
    /// `autoscaling/v2` metric specs, emitted verbatim
    #[serde(default)]
    pub metrics: Vec<serde_json::Value>,
    #[serde(default)]
    pub behavior: Option<serde_json::Value>,
}

impl HorizontalPodAutoscalerInput {
    pub fn has_scaling_metrics(&self) -> bool {
        !self.metrics.is_empty()
            || self.target_cpu_utilization_percentage.is_some()
            || self.target_memory_utilization_percentage.is_some()
    }
}
