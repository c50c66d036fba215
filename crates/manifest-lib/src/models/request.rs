//! Request envelope and the resolved resource sum type

use serde::Deserialize;

use super::kind::ResourceKind;
use super::metadata::DEFAULT_NAMESPACE;
use super::pod::PodSpecInput;
use super::resources::*;
use crate::error::ManifestError;

/// One resource description, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Deployment(DeploymentInput),
    Service(ServiceInput),
    ConfigMap(ConfigMapInput),
    Secret(SecretInput),
    Ingress(IngressInput),
    PersistentVolumeClaim(PersistentVolumeClaimInput),
    HorizontalPodAutoscaler(HorizontalPodAutoscalerInput),
    StorageClass(StorageClassInput),
    PersistentVolume(PersistentVolumeInput),
    StatefulSet(StatefulSetInput),
    DaemonSet(DaemonSetInput),
    Job(JobInput),
    CronJob(CronJobInput),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Deployment(_) => ResourceKind::Deployment,
            Resource::Service(_) => ResourceKind::Service,
            Resource::ConfigMap(_) => ResourceKind::ConfigMap,
            Resource::Secret(_) => ResourceKind::Secret,
            Resource::Ingress(_) => ResourceKind::Ingress,
            Resource::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            Resource::HorizontalPodAutoscaler(_) => ResourceKind::HorizontalPodAutoscaler,
            Resource::StorageClass(_) => ResourceKind::StorageClass,
            Resource::PersistentVolume(_) => ResourceKind::PersistentVolume,
            Resource::StatefulSet(_) => ResourceKind::StatefulSet,
            Resource::DaemonSet(_) => ResourceKind::DaemonSet,
            Resource::Job(_) => ResourceKind::Job,
            Resource::CronJob(_) => ResourceKind::CronJob,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Deployment(r) => &r.metadata.name,
            Resource::Service(r) => &r.metadata.name,
            Resource::ConfigMap(r) => &r.metadata.name,
            Resource::Secret(r) => &r.metadata.name,
            Resource::Ingress(r) => &r.metadata.name,
            Resource::PersistentVolumeClaim(r) => &r.metadata.name,
            Resource::HorizontalPodAutoscaler(r) => &r.metadata.name,
            Resource::StorageClass(r) => &r.metadata.name,
            Resource::PersistentVolume(r) => &r.metadata.name,
            Resource::StatefulSet(r) => &r.metadata.name,
            Resource::DaemonSet(r) => &r.metadata.name,
            Resource::Job(r) => &r.metadata.name,
            Resource::CronJob(r) => &r.metadata.name,
        }
    }

    /// Namespace the resource is created in
    ///
    /// Cluster-scoped kinds always report `default`, which keeps a Namespace
    /// document from ever being generated for them.
    pub fn namespace(&self) -> &str {
        match self {
            Resource::StorageClass(_) | Resource::PersistentVolume(_) => DEFAULT_NAMESPACE,
            Resource::Deployment(r) => r.metadata.resolved_namespace(),
            Resource::Service(r) => r.metadata.resolved_namespace(),
            Resource::ConfigMap(r) => r.metadata.resolved_namespace(),
            Resource::Secret(r) => r.metadata.resolved_namespace(),
            Resource::Ingress(r) => r.metadata.resolved_namespace(),
            Resource::PersistentVolumeClaim(r) => r.metadata.resolved_namespace(),
            Resource::HorizontalPodAutoscaler(r) => r.metadata.resolved_namespace(),
            Resource::StatefulSet(r) => r.metadata.resolved_namespace(),
            Resource::DaemonSet(r) => r.metadata.resolved_namespace(),
            Resource::Job(r) => r.metadata.resolved_namespace(),
            Resource::CronJob(r) => r.metadata.resolved_namespace(),
        }
    }

    /// Pod template of workload kinds
    pub fn pod_spec(&self) -> Option<&PodSpecInput> {
        match self {
            Resource::Deployment(r) => Some(&r.pod),
            Resource::StatefulSet(r) => Some(&r.pod),
            Resource::DaemonSet(r) => Some(&r.pod),
            Resource::Job(r) => Some(&r.pod),
            Resource::CronJob(r) => Some(&r.job_template.pod),
            _ => None,
        }
    }
}

/// A resolved request ready for the builder and advisory engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ResourceRequest")]
pub struct ResourceInput {
    pub resource: Resource,
    /// Prepend a Namespace document when the namespace is not `default`
    pub include_namespace: bool,
}

impl ResourceInput {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            include_namespace: false,
        }
    }

    pub fn with_include_namespace(mut self, include: bool) -> Self {
        self.include_namespace = include;
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.resource.kind()
    }
}

impl From<Resource> for ResourceInput {
    fn from(resource: Resource) -> Self {
        ResourceInput::new(resource)
    }
}

/// Wire envelope: `resourceKind` plus the payload field it names
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
    pub resource_kind: ResourceKind,
    #[serde(default)]
    pub deployment: Option<DeploymentInput>,
    #[serde(default)]
    pub service: Option<ServiceInput>,
    #[serde(default)]
    pub config_map: Option<ConfigMapInput>,
    #[serde(default)]
    pub secret: Option<SecretInput>,
    #[serde(default)]
    pub ingress: Option<IngressInput>,
    #[serde(default, alias = "pvc")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimInput>,
    #[serde(default, alias = "hpa")]
    pub horizontal_pod_autoscaler: Option<HorizontalPodAutoscalerInput>,
    #[serde(default)]
    pub storage_class: Option<StorageClassInput>,
    #[serde(default, alias = "pv")]
    pub persistent_volume: Option<PersistentVolumeInput>,
    #[serde(default)]
    pub stateful_set: Option<StatefulSetInput>,
    #[serde(default)]
    pub daemon_set: Option<DaemonSetInput>,
    #[serde(default)]
    pub job: Option<JobInput>,
    #[serde(default)]
    pub cron_job: Option<CronJobInput>,
    #[serde(default)]
    pub include_namespace: bool,
}

impl ResourceRequest {
    /// Wire name of the payload field for a kind
    pub fn payload_field(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Service => "service",
            ResourceKind::ConfigMap => "configMap",
            ResourceKind::Secret => "secret",
            ResourceKind::Ingress => "ingress",
            ResourceKind::PersistentVolumeClaim => "persistentVolumeClaim",
            ResourceKind::HorizontalPodAutoscaler => "horizontalPodAutoscaler",
            ResourceKind::StorageClass => "storageClass",
            ResourceKind::PersistentVolume => "persistentVolume",
            ResourceKind::StatefulSet => "statefulSet",
            ResourceKind::DaemonSet => "daemonSet",
            ResourceKind::Job => "job",
            ResourceKind::CronJob => "cronJob",
        }
    }

    /// Pick the payload named by `resourceKind`; other payloads are ignored
    pub fn into_input(self) -> Result<ResourceInput, ManifestError> {
        let kind = self.resource_kind;
        let resource = match kind {
            ResourceKind::Deployment => self.deployment.map(Resource::Deployment),
            ResourceKind::Service => self.service.map(Resource::Service),
            ResourceKind::ConfigMap => self.config_map.map(Resource::ConfigMap),
            ResourceKind::Secret => self.secret.map(Resource::Secret),
            ResourceKind::Ingress => self.ingress.map(Resource::Ingress),
            ResourceKind::PersistentVolumeClaim => self
                .persistent_volume_claim
                .map(Resource::PersistentVolumeClaim),
            ResourceKind::HorizontalPodAutoscaler => self
                .horizontal_pod_autoscaler
                .map(Resource::HorizontalPodAutoscaler),
            ResourceKind::StorageClass => self.storage_class.map(Resource::StorageClass),
            ResourceKind::PersistentVolume => self.persistent_volume.map(Resource::PersistentVolume),
            ResourceKind::StatefulSet => self.stateful_set.map(Resource::StatefulSet),
            ResourceKind::DaemonSet => self.daemon_set.map(Resource::DaemonSet),
            ResourceKind::Job => self.job.map(Resource::Job),
            ResourceKind::CronJob => self.cron_job.map(Resource::CronJob),
        }
        .ok_or(ManifestError::MissingPayload {
            kind,
            field: Self::payload_field(kind),
        })?;

        Ok(ResourceInput {
            resource,
            include_namespace: self.include_namespace,
        })
    }
}

impl TryFrom<ResourceRequest> for ResourceInput {
    type Error = ManifestError;

    fn try_from(request: ResourceRequest) -> Result<Self, Self::Error> {
        request.into_input()
    }
}
