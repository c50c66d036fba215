//! HorizontalPodAutoscaler builder

use serde_json::{json, Value};

use super::object_metadata;
use crate::models::{HorizontalPodAutoscalerInput, ResourceKind};

fn utilization_metric(resource: &str, average_utilization: i32) -> Value {
    json!({
        "type": "Resource",
        "resource": {
            "name": resource,
            "target": {
                "type": "Utilization",
                "averageUtilization": average_utilization,
            }
        }
    })
}

/// Explicit metrics win; otherwise synthesize from the utilization targets
fn metrics(h: &HorizontalPodAutoscalerInput) -> Vec<Value> {
    if !h.metrics.is_empty() {
        return h.metrics.clone();
    }
    let cpu = h
        .target_cpu_utilization_percentage
        .map(|pct| utilization_metric("cpu", pct));
    let memory = h
        .target_memory_utilization_percentage
        .map(|pct| utilization_metric("memory", pct));
    cpu.into_iter().chain(memory).collect()
}

pub(super) fn horizontal_pod_autoscaler(h: &HorizontalPodAutoscalerInput) -> Value {
    json!({
        "apiVersion": ResourceKind::HorizontalPodAutoscaler.api_version(),
        "kind": ResourceKind::HorizontalPodAutoscaler,
        "metadata": object_metadata(&h.metadata),
        "spec": {
            "scaleTargetRef": {
                "apiVersion": h.scale_target_ref.api_version,
                "kind": h.scale_target_ref.kind,
                "name": h.scale_target_ref.name,
            },
            "minReplicas": h.min_replicas,
            "maxReplicas": h.max_replicas,
            "metrics": metrics(h),
            "behavior": h.behavior,
        }
    })
}
