use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::ManifestGenerator;
use crate::models::ResourceInput;
use crate::normalize::clean;

fn input(request: Value) -> ResourceInput {
    serde_json::from_value(request).unwrap()
}

fn documents(request: Value) -> Vec<Value> {
    ManifestGenerator::new().build_documents(&input(request))
}

fn single(request: Value) -> Value {
    let mut docs = documents(request);
    assert_eq!(docs.len(), 1);
    docs.remove(0)
}

#[test]
fn test_deployment_selector_falls_back_to_app_name() {
    let doc = single(json!({
        "resourceKind": "Deployment",
        "deployment": {
            "metadata": { "name": "api" },
            "containers": [{ "name": "api", "image": "api:1.2" }]
        }
    }));

    assert_eq!(doc["apiVersion"], "apps/v1");
    assert_eq!(doc["kind"], "Deployment");
    assert_eq!(doc["metadata"]["namespace"], "default");
    assert_eq!(doc["spec"]["selector"]["matchLabels"], json!({ "app": "api" }));
    assert_eq!(
        doc["spec"]["template"]["metadata"]["labels"],
        json!({ "app": "api" })
    );
    assert!(doc["metadata"].get("labels").is_none());
}

#[test]
fn test_deployment_uses_declared_labels_as_selector() {
    let doc = single(json!({
        "resourceKind": "Deployment",
        "deployment": {
            "metadata": { "name": "api", "labels": { "tier": "web", "team": "core" } },
            "containers": [{ "name": "api", "image": "api:1.2" }]
        }
    }));

    let labels = json!({ "tier": "web", "team": "core" });
    assert_eq!(doc["metadata"]["labels"], labels);
    assert_eq!(doc["spec"]["selector"]["matchLabels"], labels);
}

#[test]
fn test_zero_replicas_survive_cleaning() {
    let doc = single(json!({
        "resourceKind": "Deployment",
        "deployment": {
            "metadata": { "name": "paused" },
            "replicas": 0,
            "containers": [{ "name": "app", "image": "app:1" }]
        }
    }));
    assert_eq!(doc["spec"]["replicas"], 0);
}

#[test]
fn test_namespace_document_comes_first() {
    let docs = documents(json!({
        "resourceKind": "ConfigMap",
        "configMap": {
            "metadata": { "name": "settings", "namespace": "kube-system" },
            "data": { "LOG_LEVEL": "info" }
        },
        "includeNamespace": true
    }));

    assert_eq!(docs.len(), 2);
    assert_eq!(
        docs[0],
        json!({ "apiVersion": "v1", "kind": "Namespace", "metadata": { "name": "kube-system" } })
    );
    assert_eq!(docs[1]["kind"], "ConfigMap");
}

#[test]
fn test_default_namespace_never_gets_a_document() {
    let docs = documents(json!({
        "resourceKind": "ConfigMap",
        "configMap": { "metadata": { "name": "settings" }, "data": { "a": "1" } },
        "includeNamespace": true
    }));
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_namespace_document_requires_opt_in() {
    let docs = documents(json!({
        "resourceKind": "ConfigMap",
        "configMap": { "metadata": { "name": "settings", "namespace": "apps" }, "data": { "a": "1" } }
    }));
    assert_eq!(docs.len(), 1);
}

#[test]
fn test_cluster_scoped_kinds_never_get_a_namespace() {
    let docs = documents(json!({
        "resourceKind": "StorageClass",
        "storageClass": {
            "metadata": { "name": "fast" },
            "provisioner": "kubernetes.io/aws-ebs"
        },
        "includeNamespace": true
    }));
    assert_eq!(docs.len(), 1);
    assert!(docs[0]["metadata"].get("namespace").is_none());

    let docs = documents(json!({
        "resourceKind": "PersistentVolume",
        "persistentVolume": {
            "metadata": { "name": "pv-1" },
            "capacity": "10Gi",
            "nfs": { "server": "nfs.local", "path": "/exports" }
        },
        "includeNamespace": true
    }));
    assert_eq!(docs.len(), 1);
    assert!(docs[0]["metadata"].get("namespace").is_none());
}

#[test]
fn test_default_storage_class_annotation() {
    let doc = single(json!({
        "resourceKind": "StorageClass",
        "storageClass": {
            "metadata": { "name": "standard" },
            "provisioner": "kubernetes.io/gce-pd",
            "isDefault": true
        }
    }));
    assert_eq!(
        doc["metadata"]["annotations"]["storageclass.kubernetes.io/is-default-class"],
        "true"
    );
    assert_eq!(doc["reclaimPolicy"], "Delete");
    assert_eq!(doc["volumeBindingMode"], "Immediate");
}

#[test]
fn test_hpa_explicit_metrics_win() {
    let custom = json!({
        "type": "Pods",
        "pods": {
            "metric": { "name": "requests_per_second" },
            "target": { "type": "AverageValue", "averageValue": "100" }
        }
    });
    let doc = single(json!({
        "resourceKind": "HorizontalPodAutoscaler",
        "hpa": {
            "metadata": { "name": "api" },
            "scaleTargetRef": { "name": "api" },
            "maxReplicas": 5,
            "targetCPUUtilizationPercentage": 70,
            "metrics": [custom.clone()]
        }
    }));

    assert_eq!(doc["apiVersion"], "autoscaling/v2");
    assert_eq!(doc["spec"]["metrics"], json!([custom]));
}

#[test]
fn test_hpa_synthesizes_utilization_metrics() {
    let doc = single(json!({
        "resourceKind": "HorizontalPodAutoscaler",
        "horizontalPodAutoscaler": {
            "metadata": { "name": "api" },
            "scaleTargetRef": { "name": "api" },
            "minReplicas": 2,
            "maxReplicas": 10,
            "targetCPUUtilizationPercentage": 70,
            "targetMemoryUtilizationPercentage": 80
        }
    }));

    assert_eq!(
        doc["spec"]["scaleTargetRef"],
        json!({ "apiVersion": "apps/v1", "kind": "Deployment", "name": "api" })
    );
    assert_eq!(
        doc["spec"]["metrics"],
        json!([
            {
                "type": "Resource",
                "resource": { "name": "cpu", "target": { "type": "Utilization", "averageUtilization": 70 } }
            },
            {
                "type": "Resource",
                "resource": { "name": "memory", "target": { "type": "Utilization", "averageUtilization": 80 } }
            }
        ])
    );
}

#[test]
fn test_hpa_without_targets_omits_metrics() {
    let doc = single(json!({
        "resourceKind": "HorizontalPodAutoscaler",
        "hpa": {
            "metadata": { "name": "api" },
            "scaleTargetRef": { "name": "api" },
            "maxReplicas": 3
        }
    }));
    assert!(doc["spec"].get("metrics").is_none());
}

#[test]
fn test_persistent_volume_without_source() {
    let doc = single(json!({
        "resourceKind": "PersistentVolume",
        "pv": { "metadata": { "name": "orphan" }, "capacity": "1Gi" }
    }));

    let spec = &doc["spec"];
    for key in ["hostPath", "nfs", "awsElasticBlockStore", "gcePersistentDisk"] {
        assert!(spec.get(key).is_none(), "unexpected {key}");
    }
    assert_eq!(spec["capacity"]["storage"], "1Gi");
    assert_eq!(spec["persistentVolumeReclaimPolicy"], "Retain");
    assert_eq!(spec["accessModes"], json!(["ReadWriteOnce"]));
}

#[test]
fn test_persistent_volume_keeps_first_source_by_priority() {
    let doc = single(json!({
        "resourceKind": "PersistentVolume",
        "persistentVolume": {
            "metadata": { "name": "shared" },
            "capacity": "100Gi",
            "gcePersistentDisk": { "pdName": "disk-1", "fsType": "ext4" },
            "nfs": { "server": "10.0.0.5", "path": "/srv/share", "readOnly": true }
        }
    }));

    let spec = &doc["spec"];
    assert_eq!(
        spec["nfs"],
        json!({ "server": "10.0.0.5", "path": "/srv/share", "readOnly": true })
    );
    assert!(spec.get("gcePersistentDisk").is_none());
}

#[test]
fn test_cronjob_defaults_ttl_but_job_does_not() {
    let cron = single(json!({
        "resourceKind": "CronJob",
        "cronJob": {
            "metadata": { "name": "report" },
            "schedule": "0 2 * * *",
            "jobTemplate": { "containers": [{ "name": "report", "image": "report:3" }] }
        }
    }));
    let job_spec = &cron["spec"]["jobTemplate"]["spec"];
    assert_eq!(job_spec["ttlSecondsAfterFinished"], 86_400);
    assert_eq!(job_spec["template"]["spec"]["restartPolicy"], "OnFailure");
    assert_eq!(cron["apiVersion"], "batch/v1");

    let job = single(json!({
        "resourceKind": "Job",
        "job": {
            "metadata": { "name": "migrate" },
            "restartPolicy": "Never",
            "containers": [{ "name": "migrate", "image": "migrate:3" }]
        }
    }));
    assert!(job["spec"].get("ttlSecondsAfterFinished").is_none());
    assert_eq!(job["spec"]["template"]["spec"]["restartPolicy"], "Never");
}

#[test]
fn test_service_target_port_defaults_to_port() {
    let doc = single(json!({
        "resourceKind": "Service",
        "service": {
            "metadata": { "name": "web" },
            "selector": { "app": "web" },
            "ports": [
                { "port": 80 },
                { "name": "metrics", "port": 9090, "targetPort": "metrics" }
            ]
        }
    }));

    assert_eq!(doc["spec"]["type"], "ClusterIP");
    assert_eq!(
        doc["spec"]["ports"],
        json!([
            { "port": 80, "targetPort": 80, "protocol": "TCP" },
            { "name": "metrics", "port": 9090, "targetPort": "metrics", "protocol": "TCP" }
        ])
    );
}

#[test]
fn test_ingress_backend_shapes() {
    let doc = single(json!({
        "resourceKind": "Ingress",
        "ingress": {
            "metadata": { "name": "web" },
            "ingressClassName": "nginx",
            "rules": [{
                "host": "example.com",
                "paths": [{ "serviceName": "web", "servicePort": 80 }]
            }],
            "tls": [{ "hosts": ["example.com"], "secretName": "web-tls" }]
        }
    }));

    let path = &doc["spec"]["rules"][0]["http"]["paths"][0];
    assert_eq!(path["path"], "/");
    assert_eq!(path["pathType"], "Prefix");
    assert_eq!(
        path["backend"],
        json!({ "service": { "name": "web", "port": { "number": 80 } } })
    );
    assert_eq!(doc["spec"]["tls"][0]["secretName"], "web-tls");
}

#[test]
fn test_daemonset_host_flags_land_in_pod_spec() {
    let doc = single(json!({
        "resourceKind": "DaemonSet",
        "daemonSet": {
            "metadata": { "name": "node-exporter", "namespace": "monitoring" },
            "hostNetwork": true,
            "containers": [{ "name": "exporter", "image": "prom/node-exporter:v1.8.0" }]
        }
    }));
    let pod_spec = &doc["spec"]["template"]["spec"];
    assert_eq!(pod_spec["hostNetwork"], true);
    assert!(pod_spec.get("hostPID").is_none());
}

#[test]
fn test_statefulset_claim_templates() {
    let doc = single(json!({
        "resourceKind": "StatefulSet",
        "statefulSet": {
            "metadata": { "name": "db" },
            "serviceName": "db",
            "replicas": 3,
            "containers": [{ "name": "db", "image": "postgres:16" }],
            "volumeClaimTemplates": [{ "name": "data", "storage": "20Gi" }]
        }
    }));

    assert_eq!(doc["spec"]["serviceName"], "db");
    assert_eq!(
        doc["spec"]["volumeClaimTemplates"],
        json!([{
            "metadata": { "name": "data" },
            "spec": {
                "accessModes": ["ReadWriteOnce"],
                "resources": { "requests": { "storage": "20Gi" } }
            }
        }])
    );
}

#[test]
fn test_built_documents_are_already_clean() {
    let docs = documents(json!({
        "resourceKind": "Secret",
        "secret": {
            "metadata": { "name": "creds", "namespace": "apps" },
            "stringData": { "password": "" , "user": "admin" }
        },
        "includeNamespace": true
    }));

    for doc in docs {
        assert_eq!(clean(doc.clone()), Some(doc));
    }
}

#[test]
fn test_generate_renders_namespace_first() {
    let yaml = ManifestGenerator::new()
        .generate(&input(json!({
            "resourceKind": "ConfigMap",
            "configMap": {
                "metadata": { "name": "settings", "namespace": "kube-system" },
                "data": { "a": "1" }
            },
            "includeNamespace": true
        })))
        .unwrap();

    assert!(yaml.starts_with("apiVersion: v1\nkind: Namespace\n"));
    assert_eq!(yaml.matches("---\n").count(), 1);
    assert!(yaml.contains("kind: ConfigMap\n"));
}

#[test]
fn test_pod_spec_volumes_and_container_blocks() {
    let doc = single(json!({
        "resourceKind": "Deployment",
        "deployment": {
            "metadata": { "name": "api" },
            "serviceAccountName": "api",
            "securityContext": { "runAsNonRoot": true, "fsGroup": 2000 },
            "initContainers": [{ "name": "migrate", "image": "api:1.2", "command": ["./migrate"] }],
            "containers": [{
                "name": "api",
                "image": "api:1.2",
                "ports": [{ "name": "http", "containerPort": 8080 }],
                "env": [
                    { "name": "MODE", "value": "prod" },
                    { "name": "LEVEL", "valueFrom": { "configMapKeyRef": { "name": "settings", "key": "level" } } },
                    { "name": "TOKEN", "valueFrom": { "secretKeyRef": { "name": "creds", "key": "token", "optional": false } } }
                ],
                "volumeMounts": [
                    { "name": "scratch", "mountPath": "/tmp" },
                    { "name": "data", "mountPath": "/data", "readOnly": false }
                ],
                "livenessProbe": { "httpGet": { "port": 8080 }, "periodSeconds": 10 },
                "readinessProbe": { "tcpSocket": { "port": "http" } },
                "startupProbe": { "exec": { "command": ["cat", "/tmp/ready"] }, "failureThreshold": 30 },
                "securityContext": {
                    "allowPrivilegeEscalation": false,
                    "capabilities": { "drop": ["ALL"] }
                }
            }],
            "volumes": [
                { "name": "scratch", "type": "emptyDir" },
                { "name": "cache", "type": "emptyDir", "emptyDir": { "medium": "Memory" } },
                {
                    "name": "settings",
                    "type": "configMap",
                    "configMap": { "name": "settings", "items": [{ "key": "app.conf", "path": "app.conf" }] }
                },
                { "name": "certs", "type": "secret", "secret": { "secretName": "tls", "defaultMode": 256 } },
                {
                    "name": "data",
                    "type": "persistentVolumeClaim",
                    "persistentVolumeClaim": { "claimName": "data", "readOnly": false }
                },
                { "name": "logs", "type": "hostPath", "hostPath": { "path": "/var/log", "type": "Directory" } }
            ],
            "tolerations": [{ "key": "dedicated", "operator": "Equal", "value": "api", "effect": "NoSchedule" }],
            "imagePullSecrets": ["registry"]
        }
    }));

    let pod_spec = &doc["spec"]["template"]["spec"];
    assert_eq!(
        *pod_spec,
        json!({
            "serviceAccountName": "api",
            "securityContext": { "runAsNonRoot": true, "fsGroup": 2000 },
            "initContainers": [{
                "name": "migrate",
                "image": "api:1.2",
                "imagePullPolicy": "IfNotPresent",
                "command": ["./migrate"]
            }],
            "containers": [{
                "name": "api",
                "image": "api:1.2",
                "imagePullPolicy": "IfNotPresent",
                "ports": [{ "name": "http", "containerPort": 8080, "protocol": "TCP" }],
                "env": [
                    { "name": "MODE", "value": "prod" },
                    { "name": "LEVEL", "valueFrom": { "configMapKeyRef": { "name": "settings", "key": "level" } } },
                    { "name": "TOKEN", "valueFrom": { "secretKeyRef": { "name": "creds", "key": "token", "optional": false } } }
                ],
                "volumeMounts": [
                    { "name": "scratch", "mountPath": "/tmp" },
                    { "name": "data", "mountPath": "/data", "readOnly": false }
                ],
                "livenessProbe": { "httpGet": { "path": "/", "port": 8080 }, "periodSeconds": 10 },
                "readinessProbe": { "tcpSocket": { "port": "http" } },
                "startupProbe": { "exec": { "command": ["cat", "/tmp/ready"] }, "failureThreshold": 30 },
                "securityContext": {
                    "allowPrivilegeEscalation": false,
                    "capabilities": { "drop": ["ALL"] }
                }
            }],
            "volumes": [
                { "name": "scratch" },
                { "name": "cache", "emptyDir": { "medium": "Memory" } },
                { "name": "settings", "configMap": { "name": "settings", "items": [{ "key": "app.conf", "path": "app.conf" }] } },
                { "name": "certs", "secret": { "secretName": "tls", "defaultMode": 256 } },
                { "name": "data", "persistentVolumeClaim": { "claimName": "data", "readOnly": false } },
                { "name": "logs", "hostPath": { "path": "/var/log", "type": "Directory" } }
            ],
            "tolerations": [{ "key": "dedicated", "operator": "Equal", "value": "api", "effect": "NoSchedule" }],
            "imagePullSecrets": [{ "name": "registry" }]
        })
    );

    let keys: Vec<&str> = pod_spec
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        [
            "serviceAccountName",
            "securityContext",
            "initContainers",
            "containers",
            "volumes",
            "tolerations",
            "imagePullSecrets"
        ]
    );
}

#[test]
fn test_generate_is_repeatable_and_keeps_label_order() {
    let request = input(json!({
        "resourceKind": "Deployment",
        "deployment": {
            "metadata": {
                "name": "api",
                "namespace": "shop",
                "labels": { "zone": "b", "app": "api", "tier": "web" }
            },
            "replicas": 2,
            "containers": [{ "name": "api", "image": "api:1.2", "args": ["serve", "8080"] }]
        },
        "includeNamespace": true
    }));
    let generator = ManifestGenerator::new();

    let first = generator.generate(&request).unwrap();
    let second = generator.generate(&request).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("  labels:\n    zone: b\n    app: api\n    tier: web\n"));
    assert!(first.contains("      containers:\n        - name: api\n"));
    assert!(first.contains("          args:\n            - serve\n            - '8080'\n"));
}
