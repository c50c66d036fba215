//! Service and Ingress builders

use serde_json::{json, Value};

use super::object_metadata;
use crate::models::{
    IngressBackend, IngressInput, IntOrString, ResourceKind, ServiceInput, ServicePort,
};

pub(super) fn service(s: &ServiceInput) -> Value {
    json!({
        "apiVersion": ResourceKind::Service.api_version(),
        "kind": ResourceKind::Service,
        "metadata": object_metadata(&s.metadata),
        "spec": {
            "type": s.service_type,
            "selector": s.selector,
            "ports": s.ports.iter().map(service_port).collect::<Vec<_>>(),
            "clusterIP": s.cluster_ip,
            "externalName": s.external_name,
            "sessionAffinity": s.session_affinity,
            "externalTrafficPolicy": s.external_traffic_policy,
            "loadBalancerIP": s.load_balancer_ip,
        }
    })
}

fn service_port(p: &ServicePort) -> Value {
    let target_port = p
        .target_port
        .clone()
        .unwrap_or(IntOrString::Int(p.port));
    json!({
        "name": p.name,
        "port": p.port,
        "targetPort": target_port,
        "protocol": p.protocol,
        "nodePort": p.node_port,
    })
}

/// `networking.k8s.io/v1` backend: numeric ports use `number`, named ports `name`
fn backend(service_name: &str, port: &IntOrString) -> Value {
    let port = match port {
        IntOrString::Int(number) => json!({ "number": number }),
        IntOrString::String(name) => json!({ "name": name }),
    };
    json!({ "service": { "name": service_name, "port": port } })
}

fn default_backend(b: &IngressBackend) -> Value {
    backend(&b.service_name, &b.service_port)
}

pub(super) fn ingress(i: &IngressInput) -> Value {
    json!({
        "apiVersion": ResourceKind::Ingress.api_version(),
        "kind": ResourceKind::Ingress,
        "metadata": object_metadata(&i.metadata),
        "spec": {
            "ingressClassName": i.ingress_class_name,
            "defaultBackend": i.default_backend.as_ref().map(default_backend),
            "tls": i.tls.iter().map(|t| json!({
                "hosts": t.hosts,
                "secretName": t.secret_name,
            })).collect::<Vec<_>>(),
            "rules": i.rules.iter().map(|rule| json!({
                "host": rule.host,
                "http": {
                    "paths": rule.paths.iter().map(|p| json!({
                        "path": p.path,
                        "pathType": p.path_type,
                        "backend": backend(&p.service_name, &p.service_port),
                    })).collect::<Vec<_>>(),
                },
            })).collect::<Vec<_>>(),
        }
    })
}
