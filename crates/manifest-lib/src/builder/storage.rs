//! PersistentVolumeClaim, StorageClass and PersistentVolume builders

use serde_json::{json, Value};

use super::object_metadata;
use crate::models::{
    ClusterMetadata, PersistentVolumeClaimInput, PersistentVolumeInput, ResourceKind,
    StorageClassInput,
};

const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

fn cluster_metadata(metadata: &ClusterMetadata) -> Value {
    json!({
        "name": metadata.name,
        "labels": metadata.labels,
        "annotations": metadata.annotations,
    })
}

pub(super) fn persistent_volume_claim(p: &PersistentVolumeClaimInput) -> Value {
    json!({
        "apiVersion": ResourceKind::PersistentVolumeClaim.api_version(),
        "kind": ResourceKind::PersistentVolumeClaim,
        "metadata": object_metadata(&p.metadata),
        "spec": {
            "accessModes": p.access_modes,
            "storageClassName": p.storage_class_name,
            "volumeMode": p.volume_mode,
            "volumeName": p.volume_name,
            "resources": { "requests": { "storage": p.storage } },
            "selector": { "matchLabels": p.selector },
        }
    })
}

pub(super) fn storage_class(s: &StorageClassInput) -> Value {
    let mut metadata = cluster_metadata(&s.metadata);
    if s.is_default {
        metadata["annotations"][DEFAULT_CLASS_ANNOTATION] = json!("true");
    }

    json!({
        "apiVersion": ResourceKind::StorageClass.api_version(),
        "kind": ResourceKind::StorageClass,
        "metadata": metadata,
        "provisioner": s.provisioner,
        "parameters": s.parameters,
        "reclaimPolicy": s.reclaim_policy,
        "volumeBindingMode": s.volume_binding_mode,
        "allowVolumeExpansion": s.allow_volume_expansion,
        "mountOptions": s.mount_options,
    })
}

/// The single volume source to emit, first set in priority order
fn volume_source(p: &PersistentVolumeInput) -> Option<(&'static str, Value)> {
    if let Some(host_path) = &p.host_path {
        return Some((
            "hostPath",
            json!({ "path": host_path.path, "type": host_path.path_type }),
        ));
    }
    if let Some(nfs) = &p.nfs {
        return Some((
            "nfs",
            json!({ "server": nfs.server, "path": nfs.path, "readOnly": nfs.read_only }),
        ));
    }
    if let Some(ebs) = &p.aws_elastic_block_store {
        return Some((
            "awsElasticBlockStore",
            json!({
                "volumeID": ebs.volume_id,
                "fsType": ebs.fs_type,
                "partition": ebs.partition,
                "readOnly": ebs.read_only,
            }),
        ));
    }
    p.gce_persistent_disk.as_ref().map(|gce| {
        (
            "gcePersistentDisk",
            json!({
                "pdName": gce.pd_name,
                "fsType": gce.fs_type,
                "partition": gce.partition,
                "readOnly": gce.read_only,
            }),
        )
    })
}

pub(super) fn persistent_volume(p: &PersistentVolumeInput) -> Value {
    let mut spec = json!({
        "capacity": { "storage": p.capacity },
        "accessModes": p.access_modes,
        "persistentVolumeReclaimPolicy": p.persistent_volume_reclaim_policy,
        "storageClassName": p.storage_class_name,
        "volumeMode": p.volume_mode,
        "mountOptions": p.mount_options,
        "claimRef": p.claim_ref.as_ref().map(|c| json!({
            "namespace": c.namespace,
            "name": c.name,
        })),
    });
    if let (Some((key, source)), Some(fields)) = (volume_source(p), spec.as_object_mut()) {
        fields.insert(key.to_string(), source);
    }

    json!({
        "apiVersion": ResourceKind::PersistentVolume.api_version(),
        "kind": ResourceKind::PersistentVolume,
        "metadata": cluster_metadata(&p.metadata),
        "spec": spec,
    })
}
