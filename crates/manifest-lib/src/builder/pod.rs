//! Pod template, container and volume layout shared by workload builders

use serde_json::{json, Value};

use crate::models::{
    Container, ContainerPort, EnvVar, KeySelector, PodSpecInput, Probe, ResourceQuantities,
    ResourceRequirements, SecurityContext, StringMap, Toleration, Volume, VolumeMount,
    VolumeSource,
};

/// `template` block: pod labels plus pod spec
pub(super) fn pod_template(labels: &StringMap, pod: &PodSpecInput) -> Value {
    json!({
        "metadata": { "labels": labels },
        "spec": pod_spec(pod),
    })
}

pub(super) fn pod_spec(pod: &PodSpecInput) -> Value {
    json!({
        "serviceAccountName": pod.service_account_name,
        "securityContext": pod.security_context.as_ref().map(|sc| json!({
            "runAsUser": sc.run_as_user,
            "runAsGroup": sc.run_as_group,
            "runAsNonRoot": sc.run_as_non_root,
            "fsGroup": sc.fs_group,
        })),
        "initContainers": pod.init_containers.iter().map(container).collect::<Vec<_>>(),
        "containers": pod.containers.iter().map(container).collect::<Vec<_>>(),
        "volumes": pod.volumes.iter().map(volume).collect::<Vec<_>>(),
        "nodeSelector": pod.node_selector,
        "tolerations": pod.tolerations.iter().map(toleration).collect::<Vec<_>>(),
        "imagePullSecrets": pod
            .image_pull_secrets
            .iter()
            .map(|name| json!({ "name": name }))
            .collect::<Vec<_>>(),
    })
}

/// Insert a field into a built pod template's spec
pub(super) fn set_pod_field(template: &mut Value, key: &str, value: Value) {
    if let Some(spec) = template.get_mut("spec").and_then(Value::as_object_mut) {
        spec.insert(key.to_string(), value);
    }
}

pub(super) fn container(c: &Container) -> Value {
    json!({
        "name": c.name,
        "image": c.image,
        "imagePullPolicy": c.image_pull_policy,
        "command": c.command,
        "args": c.args,
        "ports": c.ports.iter().map(container_port).collect::<Vec<_>>(),
        "env": c.env.iter().map(env_var).collect::<Vec<_>>(),
        "resources": c.resources.as_ref().map(resources),
        "volumeMounts": c.volume_mounts.iter().map(volume_mount).collect::<Vec<_>>(),
        "livenessProbe": c.liveness_probe.as_ref().map(probe),
        "readinessProbe": c.readiness_probe.as_ref().map(probe),
        "startupProbe": c.startup_probe.as_ref().map(probe),
        "securityContext": c.security_context.as_ref().map(security_context),
    })
}

fn container_port(port: &ContainerPort) -> Value {
    json!({
        "name": port.name,
        "containerPort": port.container_port,
        "protocol": port.protocol,
    })
}

fn env_var(env: &EnvVar) -> Value {
    json!({
        "name": env.name,
        "value": env.value,
        "valueFrom": env.value_from.as_ref().map(|from| json!({
            "configMapKeyRef": from.config_map_key_ref.as_ref().map(key_selector),
            "secretKeyRef": from.secret_key_ref.as_ref().map(key_selector),
        })),
    })
}

fn key_selector(selector: &KeySelector) -> Value {
    json!({
        "name": selector.name,
        "key": selector.key,
        "optional": selector.optional,
    })
}

fn quantities(q: &ResourceQuantities) -> Value {
    json!({ "cpu": q.cpu, "memory": q.memory })
}

fn resources(r: &ResourceRequirements) -> Value {
    json!({
        "requests": r.requests.as_ref().map(quantities),
        "limits": r.limits.as_ref().map(quantities),
    })
}

fn volume_mount(mount: &VolumeMount) -> Value {
    json!({
        "name": mount.name,
        "mountPath": mount.mount_path,
        "readOnly": mount.read_only,
        "subPath": mount.sub_path,
    })
}

fn probe(p: &Probe) -> Value {
    json!({
        "httpGet": p.http_get.as_ref().map(|h| json!({
            "path": h.path,
            "port": h.port,
            "scheme": h.scheme,
        })),
        "tcpSocket": p.tcp_socket.as_ref().map(|t| json!({ "port": t.port })),
        "exec": p.exec.as_ref().map(|e| json!({ "command": e.command })),
        "initialDelaySeconds": p.initial_delay_seconds,
        "periodSeconds": p.period_seconds,
        "timeoutSeconds": p.timeout_seconds,
        "failureThreshold": p.failure_threshold,
        "successThreshold": p.success_threshold,
    })
}

fn security_context(sc: &SecurityContext) -> Value {
    json!({
        "runAsUser": sc.run_as_user,
        "runAsGroup": sc.run_as_group,
        "runAsNonRoot": sc.run_as_non_root,
        "readOnlyRootFilesystem": sc.read_only_root_filesystem,
        "allowPrivilegeEscalation": sc.allow_privilege_escalation,
        "privileged": sc.privileged,
        "capabilities": sc.capabilities.as_ref().map(|caps| json!({
            "add": caps.add,
            "drop": caps.drop,
        })),
    })
}

fn toleration(t: &Toleration) -> Value {
    json!({
        "key": t.key,
        "operator": t.operator,
        "value": t.value,
        "effect": t.effect,
        "tolerationSeconds": t.toleration_seconds,
    })
}

// A volume whose emptyDir block cleans away is still valid: the API server
// defaults a source-less volume to emptyDir.
pub(super) fn volume(v: &Volume) -> Value {
    match &v.source {
        VolumeSource::EmptyDir { empty_dir } => json!({
            "name": v.name,
            "emptyDir": empty_dir.as_ref().map(|e| json!({
                "medium": e.medium,
                "sizeLimit": e.size_limit,
            })),
        }),
        VolumeSource::ConfigMap { config_map } => json!({
            "name": v.name,
            "configMap": {
                "name": config_map.name,
                "items": config_map.items.iter().map(|i| json!({ "key": i.key, "path": i.path })).collect::<Vec<_>>(),
                "defaultMode": config_map.default_mode,
            },
        }),
        VolumeSource::Secret { secret } => json!({
            "name": v.name,
            "secret": {
                "secretName": secret.secret_name,
                "items": secret.items.iter().map(|i| json!({ "key": i.key, "path": i.path })).collect::<Vec<_>>(),
                "defaultMode": secret.default_mode,
            },
        }),
        VolumeSource::PersistentVolumeClaim {
            persistent_volume_claim,
        } => json!({
            "name": v.name,
            "persistentVolumeClaim": {
                "claimName": persistent_volume_claim.claim_name,
                "readOnly": persistent_volume_claim.read_only,
            },
        }),
        VolumeSource::HostPath { host_path } => json!({
            "name": v.name,
            "hostPath": {
                "path": host_path.path,
                "type": host_path.path_type,
            },
        }),
    }
}
