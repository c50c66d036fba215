use serde::{Deserialize, Serialize};
use std::fmt;

/// The Kubernetes object types the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Deployment,
    Service,
    ConfigMap,
    Secret,
    Ingress,
    PersistentVolumeClaim,
    HorizontalPodAutoscaler,
    StorageClass,
    PersistentVolume,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::Ingress,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::HorizontalPodAutoscaler,
        ResourceKind::StorageClass,
        ResourceKind::PersistentVolume,
        ResourceKind::StatefulSet,
        ResourceKind::DaemonSet,
        ResourceKind::Job,
        ResourceKind::CronJob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
            ResourceKind::StorageClass => "StorageClass",
            ResourceKind::PersistentVolume => "PersistentVolume",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::Job => "Job",
            ResourceKind::CronJob => "CronJob",
        }
    }

    /// `apiVersion` written into generated documents
    pub fn api_version(&self) -> &'static str {
        match self {
            ResourceKind::Deployment | ResourceKind::StatefulSet | ResourceKind::DaemonSet => {
                "apps/v1"
            }
            ResourceKind::Service
            | ResourceKind::ConfigMap
            | ResourceKind::Secret
            | ResourceKind::PersistentVolumeClaim
            | ResourceKind::PersistentVolume => "v1",
            ResourceKind::Ingress => "networking.k8s.io/v1",
            ResourceKind::HorizontalPodAutoscaler => "autoscaling/v2",
            ResourceKind::StorageClass => "storage.k8s.io/v1",
            ResourceKind::Job | ResourceKind::CronJob => "batch/v1",
        }
    }

    /// Resource name as typed on the kubectl command line
    pub fn kubectl_name(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Service => "service",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Secret => "secret",
            ResourceKind::Ingress => "ingress",
            ResourceKind::PersistentVolumeClaim => "pvc",
            ResourceKind::HorizontalPodAutoscaler => "hpa",
            ResourceKind::StorageClass => "storageclass",
            ResourceKind::PersistentVolume => "pv",
            ResourceKind::StatefulSet => "statefulset",
            ResourceKind::DaemonSet => "daemonset",
            ResourceKind::Job => "job",
            ResourceKind::CronJob => "cronjob",
        }
    }

    /// Kinds that run pods
    pub fn is_workload(&self) -> bool {
        matches!(
            self,
            ResourceKind::Deployment
                | ResourceKind::StatefulSet
                | ResourceKind::DaemonSet
                | ResourceKind::Job
                | ResourceKind::CronJob
        )
    }

    pub fn is_cluster_scoped(&self) -> bool {
        matches!(
            self,
            ResourceKind::StorageClass | ResourceKind::PersistentVolume
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
