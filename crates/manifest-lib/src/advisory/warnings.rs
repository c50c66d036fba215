//! Best-practice warning rules

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{
    AccessMode, ConcurrencyPolicy, Container, DeploymentStrategyType, PodSpecInput,
    ReclaimPolicy, Resource, ServiceType,
};

/// One cron field: `*`, a number or range, or a three-letter name or range,
/// with an optional step, as a comma-separated list
const CRON_FIELD: &str =
    r"(?:\*|[0-9]+(?:-[0-9]+)?|[A-Za-z]{3}(?:-[A-Za-z]{3})?)(?:/[0-9]+)?";

const CRON_MACROS: &[&str] = &[
    "@yearly",
    "@annually",
    "@monthly",
    "@weekly",
    "@daily",
    "@midnight",
    "@hourly",
];

const SENSITIVE_KEY_MARKERS: &[&str] = &["password", "secret", "token", "key"];

fn cron_regex() -> &'static Regex {
    static CRON: OnceLock<Regex> = OnceLock::new();
    CRON.get_or_init(|| {
        let field = format!("{CRON_FIELD}(?:,{CRON_FIELD})*");
        let pattern = format!(r"^{field}(?:\s+{field}){{4}}$");
        Regex::new(&pattern).expect("cron pattern is valid")
    })
}

/// Five-field cron expression or one of the `@` macros
pub fn is_valid_cron_schedule(schedule: &str) -> bool {
    let schedule = schedule.trim();
    CRON_MACROS.contains(&schedule) || cron_regex().is_match(schedule)
}

/// Warnings for a resource, in a fixed per-kind order
pub fn warnings(resource: &Resource) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(pod) = resource.pod_spec() {
        let long_running = matches!(
            resource,
            Resource::Deployment(_) | Resource::StatefulSet(_) | Resource::DaemonSet(_)
        );
        pod_warnings(pod, long_running, &mut out);
    }

    match resource {
        Resource::Deployment(d) => {
            if d.replicas < 2 {
                out.push(format!(
                    "Deployment \"{}\" has less than 2 replicas; consider at least 2 for high availability",
                    d.metadata.name
                ));
            }
            if d
                .strategy
                .as_ref()
                .is_some_and(|s| s.strategy_type == DeploymentStrategyType::Recreate)
            {
                out.push(
                    "Recreate strategy terminates all pods before starting new ones and causes downtime"
                        .to_string(),
                );
            }
        }
        Resource::StatefulSet(s) => {
            if s.replicas < 2 {
                out.push(format!(
                    "StatefulSet \"{}\" has less than 2 replicas; consider at least 2 for high availability",
                    s.metadata.name
                ));
            }
            if s.volume_claim_templates.is_empty() {
                out.push(
                    "StatefulSet has no volumeClaimTemplates; pods will not get stable persistent storage"
                        .to_string(),
                );
            }
        }
        Resource::DaemonSet(d) => {
            if d.uses_host_network() {
                out.push(
                    "DaemonSet uses hostNetwork; pods share the node network namespace".to_string(),
                );
            }
            if d.uses_host_pid() {
                out.push(
                    "DaemonSet uses hostPID; pods can see every process on the node".to_string(),
                );
            }
        }
        Resource::Job(j) => {
            if j.active_deadline_seconds.is_none() {
                out.push(
                    "Job has no activeDeadlineSeconds; a stuck Job can run indefinitely".to_string(),
                );
            }
            if j.ttl_seconds_after_finished.is_none() {
                out.push(
                    "Job has no ttlSecondsAfterFinished; finished Jobs and their pods will not be cleaned up"
                        .to_string(),
                );
            }
        }
        Resource::CronJob(c) => {
            if !is_valid_cron_schedule(&c.schedule) {
                out.push(format!(
                    "CronJob schedule \"{}\" is not a valid 5-field cron expression",
                    c.schedule
                ));
            }
            if c.concurrency_policy.unwrap_or_default() == ConcurrencyPolicy::Allow {
                out.push(
                    "CronJob concurrencyPolicy is Allow; overlapping runs may execute concurrently"
                        .to_string(),
                );
            }
        }
        Resource::Service(s) => {
            if s.selector.is_empty() && s.service_type != ServiceType::ExternalName {
                out.push(
                    "Service has no selector; endpoints must be managed manually".to_string(),
                );
            }
            match s.service_type {
                ServiceType::LoadBalancer => out.push(
                    "LoadBalancer Services provision a cloud load balancer per Service and may incur cost"
                        .to_string(),
                ),
                ServiceType::NodePort => out.push(
                    "NodePort Services expose a port on every node; prefer an Ingress for external traffic"
                        .to_string(),
                ),
                ServiceType::ClusterIP | ServiceType::ExternalName => {}
            }
        }
        Resource::ConfigMap(c) => {
            if c.data.is_empty() && c.binary_data.is_empty() {
                out.push("ConfigMap has no data".to_string());
            }
            for key in c.data.keys().chain(c.binary_data.keys()) {
                let lowered = key.to_lowercase();
                if SENSITIVE_KEY_MARKERS.iter().any(|m| lowered.contains(m)) {
                    out.push(format!(
                        "ConfigMap key \"{key}\" looks sensitive; store it in a Secret instead"
                    ));
                }
            }
        }
        Resource::Secret(s) => {
            if !s.string_data.is_empty() {
                out.push(
                    "Secret uses stringData; values are stored in plain text in the manifest"
                        .to_string(),
                );
            }
            if s.data.is_empty() && s.string_data.is_empty() {
                out.push("Secret has no data".to_string());
            }
        }
        Resource::Ingress(i) => {
            if i.tls.is_empty() {
                out.push("Ingress has no TLS configuration; traffic is served unencrypted".to_string());
            }
            if i.ingress_class_name.is_none() {
                out.push(
                    "Ingress has no ingressClassName; the cluster default controller will be used"
                        .to_string(),
                );
            }
            if i
                .rules
                .iter()
                .any(|r| r.host.as_deref().map_or(true, str::is_empty))
            {
                out.push("Ingress has a rule without a host; it matches all hostnames".to_string());
            }
        }
        Resource::PersistentVolumeClaim(p) => {
            if p.storage_class_name.is_none() {
                out.push(
                    "PersistentVolumeClaim has no storageClassName; the default StorageClass will be used"
                        .to_string(),
                );
            }
            if p.access_modes.contains(&AccessMode::ReadWriteMany) {
                out.push(
                    "ReadWriteMany access mode is not supported by every storage provisioner"
                        .to_string(),
                );
            }
        }
        Resource::HorizontalPodAutoscaler(h) => {
            if h.min_replicas < 2 {
                out.push(
                    "HorizontalPodAutoscaler minReplicas is less than 2; the target may scale down to a single pod"
                        .to_string(),
                );
            }
            if h.max_replicas <= h.min_replicas {
                out.push(
                    "HorizontalPodAutoscaler maxReplicas is not greater than minReplicas; it cannot scale"
                        .to_string(),
                );
            }
            if !h.has_scaling_metrics() {
                out.push(
                    "HorizontalPodAutoscaler has no metrics; set a CPU or memory utilization target"
                        .to_string(),
                );
            }
        }
        Resource::StorageClass(s) => {
            if s.reclaim_policy == ReclaimPolicy::Delete {
                out.push(
                    "StorageClass reclaimPolicy is Delete; volumes are destroyed when their claims are deleted"
                        .to_string(),
                );
            }
        }
        Resource::PersistentVolume(p) => {
            let sources = p.configured_sources();
            match sources.len() {
                0 => out.push("PersistentVolume has no volume source configured".to_string()),
                1 => {}
                _ => out.push(format!(
                    "PersistentVolume has multiple volume sources configured ({}); only {} will be used",
                    sources.join(", "),
                    sources[0]
                )),
            }
            if p.host_path.is_some() {
                out.push(
                    "PersistentVolume uses hostPath; data is tied to a single node and unsuitable for production"
                        .to_string(),
                );
            }
        }
    }

    out
}

fn pod_warnings(pod: &PodSpecInput, long_running: bool, out: &mut Vec<String>) {
    for container in pod.all_containers() {
        container_warnings(container, out);
    }
    if long_running {
        for container in &pod.containers {
            if container.liveness_probe.is_none() {
                out.push(format!(
                    "Container \"{}\" has no liveness probe",
                    container.name
                ));
            }
            if container.readiness_probe.is_none() {
                out.push(format!(
                    "Container \"{}\" has no readiness probe",
                    container.name
                ));
            }
        }
    }
}

fn container_warnings(container: &Container, out: &mut Vec<String>) {
    let name = &container.name;
    if container.uses_unpinned_image() {
        out.push(format!(
            "Container \"{name}\" uses the latest or an untagged image; pin a specific version"
        ));
    }
    if !container.has_limits() {
        out.push(format!("Container \"{name}\" has no resource limits defined"));
    }
    if !container.has_requests() {
        out.push(format!("Container \"{name}\" has no resource requests defined"));
    }
    if container.is_privileged() {
        out.push(format!("Container \"{name}\" runs in privileged mode"));
    }
}
