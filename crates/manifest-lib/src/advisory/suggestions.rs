//! Improvement suggestions

use crate::models::Resource;

/// Appended after the per-kind list for every kind
const GENERAL_SUGGESTIONS: &[&str] = &[
    "Use consistent labels such as app.kubernetes.io/name and app.kubernetes.io/version",
    "Keep manifests in version control and apply them through a CI/CD pipeline",
    "Validate changes with kubectl apply --dry-run=server before applying",
    "Use namespaces to separate environments and teams",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Suggestions for a resource: per-kind advice, then the general block
pub fn suggestions(resource: &Resource) -> Vec<String> {
    let mut out = match resource {
        Resource::Deployment(d) => {
            let mut list = owned(&[
                "Define liveness and readiness probes so Kubernetes can restart and route traffic correctly",
                "Set resource requests and limits for every container",
                "Add a HorizontalPodAutoscaler to scale with load",
                "Add a PodDisruptionBudget to keep the Deployment available during node maintenance",
            ]);
            if d.replicas < 2 {
                list.push("Run at least 2 replicas to avoid a single point of failure".to_string());
            }
            if d.strategy.is_none() {
                list.push(
                    "Configure a RollingUpdate strategy with maxSurge and maxUnavailable".to_string(),
                );
            }
            list
        }
        Resource::StatefulSet(s) => {
            let mut list = owned(&[
                "Create a headless Service matching serviceName for stable network identities",
                "Use volumeClaimTemplates to give each replica its own persistent storage",
                "Use podManagementPolicy Parallel when replicas do not depend on start order",
            ]);
            if s.replicas < 2 {
                list.push("Run at least 2 replicas for data redundancy".to_string());
            }
            list
        }
        Resource::DaemonSet(_) => owned(&[
            "Add tolerations if the DaemonSet must also run on tainted nodes",
            "Use a nodeSelector to limit the DaemonSet to the nodes that need it",
            "Set a RollingUpdate maxUnavailable to control rollout speed",
        ]),
        Resource::Job(_) => owned(&[
            "Set backoffLimit to bound retries of failing pods",
            "Set activeDeadlineSeconds to bound total run time",
            "Set ttlSecondsAfterFinished so finished Jobs are garbage collected",
        ]),
        Resource::CronJob(c) => {
            let mut list = owned(&[
                "Set concurrencyPolicy to Forbid or Replace if runs must not overlap",
                "Limit successfulJobsHistoryLimit and failedJobsHistoryLimit to keep history small",
                "Set startingDeadlineSeconds so missed runs are not started late",
            ]);
            if c.time_zone.is_none() {
                list.push(
                    "Set timeZone explicitly; the schedule otherwise follows the controller's time zone"
                        .to_string(),
                );
            }
            list
        }
        Resource::Service(_) => owned(&[
            "Name every port so it can be referenced from Ingress and probes",
            "Use an Ingress instead of NodePort or LoadBalancer for HTTP traffic",
            "Make sure the selector matches the pod template labels of the target workload",
        ]),
        Resource::Ingress(i) => {
            let mut list = owned(&[
                "Use cert-manager to issue and renew TLS certificates automatically",
                "Set ingressClassName to pin the Ingress to a specific controller",
            ]);
            if i.tls.is_empty() {
                list.push("Add a tls section to serve traffic over HTTPS".to_string());
            }
            list
        }
        Resource::ConfigMap(_) => owned(&[
            "Mark the ConfigMap immutable if it does not change after creation",
            "Store credentials in a Secret rather than a ConfigMap",
            "Roll workloads after updating the ConfigMap so pods pick up new values",
        ]),
        Resource::Secret(_) => owned(&[
            "Use an external secret manager such as Vault or External Secrets",
            "Enable encryption at rest for Secrets in etcd",
            "Restrict access to the Secret with RBAC",
            "Avoid committing Secret manifests with real values to version control",
        ]),
        Resource::PersistentVolumeClaim(_) => owned(&[
            "Set storageClassName explicitly to choose the provisioner",
            "Use a StorageClass with allowVolumeExpansion so the claim can grow",
            "Back up important volumes with VolumeSnapshots",
        ]),
        Resource::HorizontalPodAutoscaler(_) => owned(&[
            "Make sure the target containers set resource requests; utilization is computed from them",
            "Configure scaling behavior to avoid flapping",
            "Keep minReplicas at 2 or more for availability",
        ]),
        Resource::StorageClass(_) => owned(&[
            "Use volumeBindingMode WaitForFirstConsumer for topology-aware provisioning",
            "Enable allowVolumeExpansion so claims can be resized",
            "Use reclaimPolicy Retain for data that must survive claim deletion",
        ]),
        Resource::PersistentVolume(_) => owned(&[
            "Prefer dynamic provisioning through a StorageClass over static PersistentVolumes",
            "Use reclaimPolicy Retain for important data",
            "Configure exactly one volume source",
        ]),
    };

    out.extend(GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()));
    out
}
