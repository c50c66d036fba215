//! Structural validation of resource inputs
//!
//! Checks the constraints a Kubernetes API server would reject outright:
//! object naming, container uniqueness, port ranges and the required fields
//! of each kind. Problems are collected into a [`ValidationReport`] rather
//! than returned early, so callers can show every error at once.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ManifestError;
use crate::models::{PodSpecInput, Resource, ServiceType};

const MAX_SUBDOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MAX_PORT_NAME_LEN: usize = 15;

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("label pattern is valid")
    })
}

fn subdomain_regex() -> &'static Regex {
    static SUBDOMAIN: OnceLock<Regex> = OnceLock::new();
    SUBDOMAIN.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .expect("subdomain pattern is valid")
    })
}

/// DNS-1123 label: lowercase alphanumerics and `-`, at most 63 characters
pub fn is_dns_label(value: &str) -> bool {
    value.len() <= MAX_LABEL_LEN && label_regex().is_match(value)
}

/// DNS-1123 subdomain: dot-separated labels, at most 253 characters
pub fn is_dns_subdomain(value: &str) -> bool {
    value.len() <= MAX_SUBDOMAIN_LEN && subdomain_regex().is_match(value)
}

/// IANA service name used for port names: a DNS label of at most 15
/// characters with at least one letter and no `--`
pub fn is_port_name(value: &str) -> bool {
    value.len() <= MAX_PORT_NAME_LEN
        && label_regex().is_match(value)
        && !value.contains("--")
        && value.chars().any(|c| c.is_ascii_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert an invalid report into a [`ManifestError::Validation`]
    pub fn into_result(self, resource: &Resource) -> Result<(), ManifestError> {
        if self.valid {
            Ok(())
        } else {
            Err(ManifestError::Validation {
                kind: resource.kind(),
                errors: self.errors,
            })
        }
    }
}

/// Validate a resource, collecting every error found
pub fn validate(resource: &Resource) -> ValidationReport {
    let mut errors = Vec::new();

    let name = resource.name();
    if name.is_empty() {
        errors.push("metadata.name is required".to_string());
    } else if !is_dns_subdomain(name) {
        errors.push(format!(
            "metadata.name \"{name}\" must be a lowercase DNS-1123 subdomain of at most {MAX_SUBDOMAIN_LEN} characters"
        ));
    }

    if !resource.kind().is_cluster_scoped() {
        let namespace = resource.namespace();
        if !is_dns_label(namespace) {
            errors.push(format!(
                "metadata.namespace \"{namespace}\" must be a DNS-1123 label of at most {MAX_LABEL_LEN} characters"
            ));
        }
    }

    if let Some(pod) = resource.pod_spec() {
        validate_pod(pod, &mut errors);
    }

    match resource {
        Resource::StatefulSet(s) => {
            if s.service_name.trim().is_empty() {
                errors.push("serviceName is required for a StatefulSet".to_string());
            }
        }
        Resource::CronJob(c) => {
            if c.schedule.trim().is_empty() {
                errors.push("schedule is required for a CronJob".to_string());
            }
        }
        Resource::Service(s) => {
            if s.service_type == ServiceType::ExternalName {
                if s.external_name.as_deref().map_or(true, str::is_empty) {
                    errors.push("externalName is required for an ExternalName Service".to_string());
                }
            } else if s.ports.is_empty() {
                errors.push("Service must declare at least one port".to_string());
            }
            for (i, port) in s.ports.iter().enumerate() {
                check_port(&format!("ports[{i}].port"), port.port, &mut errors);
                if let Some(name) = &port.name {
                    check_port_name(&format!("ports[{i}].name"), name, &mut errors);
                }
            }
        }
        Resource::Ingress(i) => {
            if i.rules.is_empty() && i.default_backend.is_none() {
                errors.push("Ingress must declare at least one rule or a defaultBackend".to_string());
            }
            for (n, rule) in i.rules.iter().enumerate() {
                if rule.paths.is_empty() {
                    errors.push(format!("rules[{n}] must declare at least one path"));
                }
            }
        }
        Resource::HorizontalPodAutoscaler(h) => {
            if h.max_replicas < 1 {
                errors.push("maxReplicas must be at least 1".to_string());
            }
            if h.max_replicas < h.min_replicas {
                errors.push(format!(
                    "maxReplicas ({}) must not be less than minReplicas ({})",
                    h.max_replicas, h.min_replicas
                ));
            }
            if h.scale_target_ref.name.trim().is_empty() {
                errors.push("scaleTargetRef.name is required".to_string());
            }
        }
        Resource::PersistentVolumeClaim(p) => {
            if p.storage.trim().is_empty() {
                errors.push("storage is required for a PersistentVolumeClaim".to_string());
            }
        }
        Resource::PersistentVolume(p) => {
            if p.capacity.trim().is_empty() {
                errors.push("capacity is required for a PersistentVolume".to_string());
            }
        }
        Resource::StorageClass(s) => {
            if s.provisioner.trim().is_empty() {
                errors.push("provisioner is required for a StorageClass".to_string());
            }
        }
        Resource::Deployment(_)
        | Resource::DaemonSet(_)
        | Resource::Job(_)
        | Resource::ConfigMap(_)
        | Resource::Secret(_) => {}
    }

    ValidationReport::from_errors(errors)
}

fn check_label(field: &str, value: &str, errors: &mut Vec<String>) {
    if !is_dns_label(value) {
        errors.push(format!(
            "{field} \"{value}\" must be a DNS-1123 label of at most {MAX_LABEL_LEN} characters"
        ));
    }
}

fn check_port_name(field: &str, value: &str, errors: &mut Vec<String>) {
    if !is_port_name(value) {
        errors.push(format!(
            "{field} \"{value}\" must be at most {MAX_PORT_NAME_LEN} lowercase alphanumerics or '-' with at least one letter"
        ));
    }
}

fn check_port(field: &str, port: i32, errors: &mut Vec<String>) {
    if !(1..=65_535).contains(&port) {
        errors.push(format!("{field} {port} must be between 1 and 65535"));
    }
}

fn validate_pod(pod: &PodSpecInput, errors: &mut Vec<String>) {
    if pod.containers.is_empty() {
        errors.push("at least one container is required".to_string());
    }

    let volumes: HashSet<&str> = pod.volumes.iter().map(|v| v.name.as_str()).collect();
    let mut seen = HashSet::new();

    for container in pod.all_containers() {
        let name = container.name.as_str();
        check_label("container name", name, errors);
        if !seen.insert(name) {
            errors.push(format!("container name \"{name}\" is used more than once"));
        }
        if container.image.trim().is_empty() {
            errors.push(format!("container \"{name}\" must set an image"));
        }
        for port in &container.ports {
            check_port(
                &format!("container \"{name}\" containerPort"),
                port.container_port,
                errors,
            );
            if let Some(port_name) = &port.name {
                check_port_name(&format!("container \"{name}\" port name"), port_name, errors);
            }
        }
        for mount in &container.volume_mounts {
            if !volumes.contains(mount.name.as_str()) {
                errors.push(format!(
                    "container \"{name}\" mounts undeclared volume \"{}\"",
                    mount.name
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceInput;
    use serde_json::{json, Value};

    fn resource(request: Value) -> Resource {
        serde_json::from_value::<ResourceInput>(request)
            .unwrap()
            .resource
    }

    #[test]
    fn test_dns_names() {
        assert!(is_dns_label("web-1"));
        assert!(!is_dns_label("Web"));
        assert!(!is_dns_label("-web"));
        assert!(!is_dns_label(&"a".repeat(64)));
        assert!(is_dns_subdomain("api.v1.example"));
        assert!(!is_dns_subdomain("api_v1"));
    }

    #[test]
    fn test_port_names_follow_service_name_rules() {
        assert!(is_port_name("http"));
        assert!(is_port_name("grpc-web"));
        assert!(is_port_name("h2c"));
        assert!(!is_port_name("metrics-exporter-1"));
        assert!(!is_port_name("8080"));
        assert!(!is_port_name("http--alt"));
        assert!(!is_port_name("-http"));
        assert!(!is_port_name("HTTP"));
    }

    #[test]
    fn test_long_or_numeric_port_names_are_rejected() {
        let report = validate(&resource(json!({
            "resourceKind": "Deployment",
            "deployment": {
                "metadata": { "name": "api" },
                "containers": [{
                    "name": "api",
                    "image": "api:1",
                    "ports": [
                        { "name": "metrics-exporter-1", "containerPort": 9100 },
                        { "name": "http", "containerPort": 8080 }
                    ]
                }]
            }
        })));
        assert_eq!(report.errors.len(), 1, "{:?}", report.errors);
        assert!(report.errors[0].starts_with("container \"api\" port name \"metrics-exporter-1\""));

        let service = validate(&resource(json!({
            "resourceKind": "Service",
            "service": {
                "metadata": { "name": "web" },
                "ports": [{ "name": "8080", "port": 80 }]
            }
        })));
        assert_eq!(service.errors.len(), 1, "{:?}", service.errors);
        assert!(service.errors[0].starts_with("ports[0].name \"8080\""));
    }

    #[test]
    fn test_valid_deployment() {
        let report = validate(&resource(json!({
            "resourceKind": "Deployment",
            "deployment": {
                "metadata": { "name": "api", "namespace": "shop" },
                "containers": [{
                    "name": "api",
                    "image": "api:1",
                    "ports": [{ "name": "http", "containerPort": 8080 }],
                    "volumeMounts": [{ "name": "cache", "mountPath": "/cache" }]
                }],
                "volumes": [{ "name": "cache", "type": "emptyDir" }]
            }
        })));
        assert_eq!(report, ValidationReport { valid: true, errors: vec![] });
    }

    #[test]
    fn test_pod_errors_are_collected() {
        let report = validate(&resource(json!({
            "resourceKind": "Deployment",
            "deployment": {
                "metadata": { "name": "API" },
                "containers": [
                    { "name": "app", "image": "app:1", "ports": [{ "containerPort": 70000 }] },
                    { "name": "app", "image": "app:1", "volumeMounts": [{ "name": "missing", "mountPath": "/m" }] }
                ]
            }
        })));

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 4, "{:?}", report.errors);
        assert!(report.errors.iter().any(|e| e.contains("metadata.name")));
        assert!(report.errors.iter().any(|e| e.contains("used more than once")));
        assert!(report.errors.iter().any(|e| e.contains("70000")));
        assert!(report.errors.iter().any(|e| e.contains("undeclared volume \"missing\"")));
    }

    #[test]
    fn test_empty_container_list() {
        let report = validate(&resource(json!({
            "resourceKind": "Job",
            "job": { "metadata": { "name": "noop" }, "containers": [] }
        })));
        assert_eq!(report.errors, ["at least one container is required"]);
    }

    #[test]
    fn test_service_port_requirements() {
        let external = validate(&resource(json!({
            "resourceKind": "Service",
            "service": { "metadata": { "name": "db" }, "type": "ExternalName" }
        })));
        assert_eq!(
            external.errors,
            ["externalName is required for an ExternalName Service"]
        );

        let cluster_ip = validate(&resource(json!({
            "resourceKind": "Service",
            "service": { "metadata": { "name": "web" }, "selector": { "app": "web" } }
        })));
        assert_eq!(cluster_ip.errors, ["Service must declare at least one port"]);
    }

    #[test]
    fn test_hpa_replica_bounds() {
        let report = validate(&resource(json!({
            "resourceKind": "HorizontalPodAutoscaler",
            "hpa": {
                "metadata": { "name": "api" },
                "scaleTargetRef": { "name": "api" },
                "minReplicas": 5,
                "maxReplicas": 2
            }
        })));
        assert_eq!(
            report.errors,
            ["maxReplicas (2) must not be less than minReplicas (5)"]
        );
    }

    #[test]
    fn test_ingress_needs_routes() {
        let report = validate(&resource(json!({
            "resourceKind": "Ingress",
            "ingress": { "metadata": { "name": "web" }, "rules": [{ "host": "a.example.com" }] }
        })));
        assert_eq!(report.errors, ["rules[0] must declare at least one path"]);
    }

    #[test]
    fn test_invalid_report_converts_to_error() {
        let statefulset = resource(json!({
            "resourceKind": "StatefulSet",
            "statefulSet": {
                "metadata": { "name": "db" },
                "serviceName": "",
                "containers": [{ "name": "db", "image": "postgres:16" }]
            }
        }));
        let err = validate(&statefulset).into_result(&statefulset).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("serviceName is required"));
    }
}
