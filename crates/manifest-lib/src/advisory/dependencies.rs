//! Dependency and related-resource tables

use super::{Dependency, RelatedResource};
use crate::models::{PodSpecInput, Resource, ResourceKind};

fn pod_dependencies(pod: &PodSpecInput, out: &mut Vec<Dependency>) {
    for name in pod.referenced_config_maps() {
        out.push(Dependency::new(
            ResourceKind::ConfigMap.as_str(),
            format!("ConfigMap \"{name}\" is referenced by the pod template"),
            true,
        ));
    }
    for name in pod.referenced_secrets() {
        out.push(Dependency::new(
            ResourceKind::Secret.as_str(),
            format!("Secret \"{name}\" is referenced by the pod template"),
            true,
        ));
    }
    for name in pod.referenced_claims() {
        out.push(Dependency::new(
            ResourceKind::PersistentVolumeClaim.as_str(),
            format!("PersistentVolumeClaim \"{name}\" is mounted by the pod template"),
            true,
        ));
    }
    if let Some(account) = &pod.service_account_name {
        out.push(Dependency::new(
            "ServiceAccount",
            format!("ServiceAccount \"{account}\" must exist before pods can start"),
            true,
        ));
    }
}

/// Resource kinds that must (or should) exist before this resource
pub fn dependencies(resource: &Resource) -> Vec<Dependency> {
    let mut out = Vec::new();

    if let Resource::StatefulSet(s) = resource {
        out.push(Dependency::new(
            ResourceKind::Service.as_str(),
            format!(
                "Headless Service \"{}\" provides the network identity of the StatefulSet pods",
                s.service_name
            ),
            true,
        ));
        if !s.volume_claim_templates.is_empty() {
            out.push(Dependency::new(
                ResourceKind::StorageClass.as_str(),
                "volumeClaimTemplates provision storage through a StorageClass",
                true,
            ));
        }
    }

    if let Some(pod) = resource.pod_spec() {
        pod_dependencies(pod, &mut out);
    }

    match resource {
        Resource::Service(_) => out.push(Dependency::new(
            ResourceKind::Deployment.as_str(),
            "Service routes traffic to pods created by a workload such as a Deployment",
            false,
        )),
        Resource::Ingress(i) => {
            for service in i.backend_services() {
                out.push(Dependency::new(
                    ResourceKind::Service.as_str(),
                    format!("Backend Service \"{service}\" receives the routed traffic"),
                    true,
                ));
            }
            for secret in i.tls_secrets() {
                out.push(Dependency::new(
                    ResourceKind::Secret.as_str(),
                    format!("TLS Secret \"{secret}\" holds the certificate"),
                    true,
                ));
            }
        }
        Resource::PersistentVolumeClaim(p) => {
            match &p.storage_class_name {
                Some(class) => out.push(Dependency::new(
                    ResourceKind::StorageClass.as_str(),
                    format!("StorageClass \"{class}\" provisions the volume"),
                    true,
                )),
                None => out.push(Dependency::new(
                    ResourceKind::StorageClass.as_str(),
                    "The cluster default StorageClass provisions the volume",
                    false,
                )),
            }
            if let Some(volume) = &p.volume_name {
                out.push(Dependency::new(
                    ResourceKind::PersistentVolume.as_str(),
                    format!("PersistentVolume \"{volume}\" is bound explicitly"),
                    true,
                ));
            }
        }
        Resource::HorizontalPodAutoscaler(h) => out.push(Dependency::new(
            h.scale_target_ref.kind.as_str(),
            format!(
                "{} \"{}\" is the scale target",
                h.scale_target_ref.kind, h.scale_target_ref.name
            ),
            true,
        )),
        Resource::PersistentVolume(p) => {
            if let Some(class) = &p.storage_class_name {
                out.push(Dependency::new(
                    ResourceKind::StorageClass.as_str(),
                    format!("StorageClass \"{class}\" groups the volume for matching claims"),
                    false,
                ));
            }
        }
        Resource::Deployment(_)
        | Resource::StatefulSet(_)
        | Resource::DaemonSet(_)
        | Resource::Job(_)
        | Resource::CronJob(_)
        | Resource::ConfigMap(_)
        | Resource::Secret(_)
        | Resource::StorageClass(_) => {}
    }

    out
}

/// Complementary kinds commonly deployed alongside a kind
pub fn related_resources(kind: ResourceKind) -> Vec<RelatedResource> {
    let table: &[(&str, &str)] = match kind {
        ResourceKind::Deployment => &[
            ("Service", "Expose the Deployment pods on a stable address"),
            ("HorizontalPodAutoscaler", "Scale replicas with load"),
            ("ConfigMap", "Provide configuration"),
            ("Secret", "Provide credentials"),
        ],
        ResourceKind::StatefulSet => &[
            ("Service", "Headless Service for stable network identities"),
            ("PersistentVolumeClaim", "Persistent storage per replica"),
            ("StorageClass", "Provision volumes dynamically"),
            ("ConfigMap", "Provide configuration"),
        ],
        ResourceKind::DaemonSet => &[
            ("ConfigMap", "Provide configuration"),
            ("Secret", "Provide credentials"),
            ("ServiceAccount", "Grant node agents API access"),
        ],
        ResourceKind::Job => &[
            ("ConfigMap", "Provide configuration"),
            ("Secret", "Provide credentials"),
            ("CronJob", "Run the Job on a schedule"),
        ],
        ResourceKind::CronJob => &[
            ("Job", "Each scheduled run creates a Job"),
            ("ConfigMap", "Provide configuration"),
            ("Secret", "Provide credentials"),
        ],
        ResourceKind::Service => &[
            ("Deployment", "Run the pods the Service routes to"),
            ("Ingress", "Expose the Service over HTTP(S)"),
            ("StatefulSet", "Run stateful pods behind a headless Service"),
        ],
        ResourceKind::Ingress => &[
            ("Service", "Backend that receives routed traffic"),
            ("Secret", "TLS certificate"),
        ],
        ResourceKind::ConfigMap => &[
            ("Deployment", "Consume the configuration"),
            ("StatefulSet", "Consume the configuration"),
            ("Secret", "Hold sensitive configuration"),
        ],
        ResourceKind::Secret => &[
            ("Deployment", "Consume the credentials"),
            ("Ingress", "Use the Secret as a TLS certificate"),
            ("ConfigMap", "Hold non-sensitive configuration"),
        ],
        ResourceKind::PersistentVolumeClaim => &[
            ("PersistentVolume", "Backing volume for the claim"),
            ("StorageClass", "Provision the volume dynamically"),
            ("StatefulSet", "Mount the claim in stateful pods"),
        ],
        ResourceKind::HorizontalPodAutoscaler => &[
            ("Deployment", "Scale target"),
            ("StatefulSet", "Scale target"),
        ],
        ResourceKind::StorageClass => &[
            ("PersistentVolumeClaim", "Request storage from the class"),
            ("PersistentVolume", "Volumes provisioned by the class"),
        ],
        ResourceKind::PersistentVolume => &[
            ("PersistentVolumeClaim", "Claim that binds the volume"),
            ("StorageClass", "Class the volume belongs to"),
        ],
    };

    table
        .iter()
        .map(|(kind, reason)| RelatedResource {
            resource_kind: kind.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}
