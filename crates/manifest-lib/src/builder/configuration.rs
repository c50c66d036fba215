//! ConfigMap and Secret builders

use serde_json::{json, Value};

use super::object_metadata;
use crate::models::{ConfigMapInput, ResourceKind, SecretInput};

pub(super) fn config_map(c: &ConfigMapInput) -> Value {
    json!({
        "apiVersion": ResourceKind::ConfigMap.api_version(),
        "kind": ResourceKind::ConfigMap,
        "metadata": object_metadata(&c.metadata),
        "data": c.data,
        "binaryData": c.binary_data,
        "immutable": c.immutable,
    })
}

pub(super) fn secret(s: &SecretInput) -> Value {
    json!({
        "apiVersion": ResourceKind::Secret.api_version(),
        "kind": ResourceKind::Secret,
        "metadata": object_metadata(&s.metadata),
        "type": s.secret_type,
        "data": s.data,
        "stringData": s.string_data,
        "immutable": s.immutable,
    })
}
