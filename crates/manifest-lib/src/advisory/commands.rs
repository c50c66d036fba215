//! Example kubectl commands and the global apply order

use super::{DeploymentCommand, DeploymentStep};
use crate::models::{Resource, ResourceKind, StringMap};

fn command(description: impl Into<String>, command: impl Into<String>) -> DeploymentCommand {
    DeploymentCommand {
        description: description.into(),
        command: command.into(),
    }
}

/// `-l` value matching the pods a workload's selector picks
fn label_selector(labels: &StringMap) -> String {
    labels
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Commands for operating a resource, with its name and namespace filled in
pub fn deployment_commands(resource: &Resource) -> Vec<DeploymentCommand> {
    let kind = resource.kind();
    let name = resource.name();
    let ns = if kind.is_cluster_scoped() {
        String::new()
    } else {
        format!(" -n {}", resource.namespace())
    };
    let short = kind.kubectl_name();

    let mut out = vec![
        command("Apply the manifest", format!("kubectl apply -f {name}.yaml")),
        command(
            "Validate the manifest against the API server without persisting it",
            format!("kubectl apply -f {name}.yaml --dry-run=server"),
        ),
    ];

    match resource {
        Resource::Deployment(d) => {
            let selector = label_selector(&d.metadata.selector_labels());
            out.push(command(
                "Watch the rollout",
                format!("kubectl rollout status deployment/{name}{ns}"),
            ));
            out.push(command(
                "List the pods",
                format!("kubectl get pods -l {selector}{ns}"),
            ));
            out.push(command(
                "Follow the logs",
                format!("kubectl logs -f deployment/{name}{ns}"),
            ));
            out.push(command(
                "Scale the Deployment",
                format!("kubectl scale deployment/{name} --replicas=3{ns}"),
            ));
            out.push(command(
                "Roll back to the previous revision",
                format!("kubectl rollout undo deployment/{name}{ns}"),
            ));
        }
        Resource::StatefulSet(s) => {
            let selector = label_selector(&s.metadata.selector_labels());
            out.push(command(
                "Watch the rollout",
                format!("kubectl rollout status statefulset/{name}{ns}"),
            ));
            out.push(command(
                "List the pods",
                format!("kubectl get pods -l {selector}{ns}"),
            ));
            out.push(command(
                "List the claims created from volumeClaimTemplates",
                format!("kubectl get pvc{ns}"),
            ));
        }
        Resource::DaemonSet(d) => {
            let selector = label_selector(&d.metadata.selector_labels());
            out.push(command(
                "Watch the rollout",
                format!("kubectl rollout status daemonset/{name}{ns}"),
            ));
            out.push(command(
                "List the pods with their nodes",
                format!("kubectl get pods -l {selector} -o wide{ns}"),
            ));
        }
        Resource::Job(_) => {
            out.push(command(
                "Wait for completion",
                format!("kubectl wait --for=condition=complete job/{name}{ns}"),
            ));
            out.push(command(
                "Show the logs",
                format!("kubectl logs job/{name}{ns}"),
            ));
        }
        Resource::CronJob(_) => {
            out.push(command(
                "Trigger a run now",
                format!("kubectl create job --from=cronjob/{name} {name}-manual{ns}"),
            ));
            out.push(command(
                "List the Jobs",
                format!("kubectl get jobs{ns}"),
            ));
        }
        Resource::Service(_) => {
            out.push(command(
                "Show the endpoints",
                format!("kubectl get endpoints {name}{ns}"),
            ));
            out.push(command(
                "Forward a local port",
                format!("kubectl port-forward service/{name} 8080:80{ns}"),
            ));
        }
        Resource::Ingress(_) => {
            out.push(command(
                "Show the Ingress address",
                format!("kubectl get ingress {name}{ns}"),
            ));
            out.push(command(
                "Describe the routing rules",
                format!("kubectl describe ingress {name}{ns}"),
            ));
        }
        Resource::ConfigMap(_) => {
            out.push(command(
                "Show the data",
                format!("kubectl get configmap {name} -o yaml{ns}"),
            ));
        }
        Resource::Secret(_) => {
            out.push(command(
                "Show the keys",
                format!("kubectl describe secret {name}{ns}"),
            ));
        }
        Resource::PersistentVolumeClaim(_) => {
            out.push(command(
                "Check the binding status",
                format!("kubectl get pvc {name}{ns}"),
            ));
        }
        Resource::HorizontalPodAutoscaler(_) => {
            out.push(command(
                "Watch the autoscaler",
                format!("kubectl get hpa {name} --watch{ns}"),
            ));
            out.push(command(
                "Show scaling events",
                format!("kubectl describe hpa {name}{ns}"),
            ));
        }
        Resource::StorageClass(_) => {
            out.push(command(
                "List the storage classes",
                "kubectl get storageclass",
            ));
        }
        Resource::PersistentVolume(_) => {
            out.push(command(
                "Check the binding status",
                format!("kubectl get pv {name}"),
            ));
        }
    }

    if kind.is_workload() {
        out.push(command(
            format!("Describe the {kind}"),
            format!("kubectl describe {short} {name}{ns}"),
        ));
    }

    out
}

fn step(step: u32, kinds: &[&str], description: &str) -> DeploymentStep {
    DeploymentStep {
        step,
        resource_kinds: kinds.iter().map(|k| k.to_string()).collect(),
        description: description.to_string(),
    }
}

/// Recommended apply order across all kinds
pub fn deployment_order() -> Vec<DeploymentStep> {
    vec![
        step(
            1,
            &["Namespace", ResourceKind::StorageClass.as_str()],
            "Create namespaces and storage classes first",
        ),
        step(
            2,
            &[ResourceKind::PersistentVolume.as_str()],
            "Create statically provisioned volumes",
        ),
        step(
            3,
            &[ResourceKind::ConfigMap.as_str(), ResourceKind::Secret.as_str()],
            "Create configuration and credentials consumed by workloads",
        ),
        step(
            4,
            &[ResourceKind::PersistentVolumeClaim.as_str()],
            "Claim storage before workloads mount it",
        ),
        step(
            5,
            &[
                ResourceKind::Deployment.as_str(),
                ResourceKind::StatefulSet.as_str(),
                ResourceKind::DaemonSet.as_str(),
                ResourceKind::Job.as_str(),
                ResourceKind::CronJob.as_str(),
            ],
            "Deploy workloads",
        ),
        step(
            6,
            &[ResourceKind::Service.as_str()],
            "Expose workloads inside the cluster",
        ),
        step(
            7,
            &[ResourceKind::Ingress.as_str()],
            "Route external traffic to Services",
        ),
        step(
            8,
            &[ResourceKind::HorizontalPodAutoscaler.as_str()],
            "Enable autoscaling once workloads are running",
        ),
    ]
}
