//! Pod-level building blocks shared by all workload kinds

use serde::{Deserialize, Serialize};

use super::metadata::StringMap;

/// A port or quantity that may be given as a number or a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i32),
    String(String),
}

impl From<i32> for IntOrString {
    fn from(value: i32) -> Self {
        IntOrString::Int(value)
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        IntOrString::String(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePullPolicy {
    Always,
    #[default]
    IfNotPresent,
    Never,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "SCTP")]
    Sctp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(default)]
    pub name: Option<String>,
    pub container_port: i32,
    #[serde(default)]
    pub protocol: Protocol,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySelector {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub optional: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default)]
    pub config_map_key_ref: Option<KeySelector>,
    #[serde(default)]
    pub secret_key_ref: Option<KeySelector>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub value_from: Option<EnvVarSource>,
}

/// CPU and memory quantities, e.g. `250m` / `512Mi`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceQuantities {
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
}

impl ResourceQuantities {
    pub fn is_empty(&self) -> bool {
        let blank = |q: &Option<String>| q.as_deref().map_or(true, str::is_empty);
        blank(&self.cpu) && blank(&self.memory)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default)]
    pub requests: Option<ResourceQuantities>,
    #[serde(default)]
    pub limits: Option<ResourceQuantities>,
}

impl ResourceRequirements {
    pub fn has_requests(&self) -> bool {
        self.requests.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn has_limits(&self) -> bool {
        self.limits.as_ref().is_some_and(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    #[serde(default)]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub sub_path: Option<String>,
}

fn default_probe_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HttpGetAction {
    #[serde(default = "default_probe_path")]
    pub path: String,
    pub port: IntOrString,
    #[serde(default)]
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TcpSocketAction {
    pub port: IntOrString,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecAction {
    pub command: Vec<String>,
}

/// Liveness / readiness / startup probe
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(default)]
    pub http_get: Option<HttpGetAction>,
    #[serde(default)]
    pub tcp_socket: Option<TcpSocketAction>,
    #[serde(default)]
    pub exec: Option<ExecAction>,
    #[serde(default)]
    pub initial_delay_seconds: Option<i32>,
    #[serde(default)]
    pub period_seconds: Option<i32>,
    #[serde(default)]
    pub timeout_seconds: Option<i32>,
    #[serde(default)]
    pub failure_threshold: Option<i32>,
    #[serde(default)]
    pub success_threshold: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub drop: Vec<String>,
}

/// Container-level security settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    #[serde(default)]
    pub run_as_user: Option<i64>,
    #[serde(default)]
    pub run_as_group: Option<i64>,
    #[serde(default)]
    pub run_as_non_root: Option<bool>,
    #[serde(default)]
    pub read_only_root_filesystem: Option<bool>,
    #[serde(default)]
    pub allow_privilege_escalation: Option<bool>,
    #[serde(default)]
    pub privileged: Option<bool>,
    #[serde(default)]
    pub capabilities: Option<Capabilities>,
}

/// Pod-level security settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityContext {
    #[serde(default)]
    pub run_as_user: Option<i64>,
    #[serde(default)]
    pub run_as_group: Option<i64>,
    #[serde(default)]
    pub run_as_non_root: Option<bool>,
    #[serde(default)]
    pub fs_group: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub image_pull_policy: ImagePullPolicy,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub ports: Vec<ContainerPort>,
    #[serde(default)]
    pub env: Vec<EnvVar>,
    #[serde(default)]
    pub resources: Option<ResourceRequirements>,
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
    #[serde(default)]
    pub liveness_probe: Option<Probe>,
    #[serde(default)]
    pub readiness_probe: Option<Probe>,
    #[serde(default)]
    pub startup_probe: Option<Probe>,
    #[serde(default)]
    pub security_context: Option<SecurityContext>,
}

impl Container {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            image_pull_policy: ImagePullPolicy::default(),
            command: Vec::new(),
            args: Vec::new(),
            ports: Vec::new(),
            env: Vec::new(),
            resources: None,
            volume_mounts: Vec::new(),
            liveness_probe: None,
            readiness_probe: None,
            startup_probe: None,
            security_context: None,
        }
    }

    pub fn has_limits(&self) -> bool {
        self.resources.as_ref().is_some_and(|r| r.has_limits())
    }

    pub fn has_requests(&self) -> bool {
        self.resources.as_ref().is_some_and(|r| r.has_requests())
    }

    /// True when the image has no tag, or is tagged `latest`
    ///
    /// Images pinned by digest count as tagged.
    pub fn uses_unpinned_image(&self) -> bool {
        if self.image.contains('@') {
            return false;
        }
        // Registry ports (`host:5000/app`) live before the last slash
        let last_segment = self.image.rsplit('/').next().unwrap_or(self.image.as_str());
        match last_segment.rsplit_once(':') {
            Some((_, tag)) => tag.is_empty() || tag == "latest",
            None => true,
        }
    }

    pub fn is_privileged(&self) -> bool {
        self.security_context
            .as_ref()
            .and_then(|sc| sc.privileged)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyDirSource {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub size_limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyToPath {
    pub key: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    pub name: String,
    #[serde(default)]
    pub items: Vec<KeyToPath>,
    #[serde(default)]
    pub default_mode: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    pub secret_name: String,
    #[serde(default)]
    pub items: Vec<KeyToPath>,
    #[serde(default)]
    pub default_mode: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimVolumeSource {
    pub claim_name: String,
    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostPathSource {
    pub path: String,
    #[serde(rename = "type", default)]
    pub path_type: Option<String>,
}

/// Volume source selected by the `type` discriminator
///
/// The discriminator must be accompanied by its matching sibling field
/// (`emptyDir` may be omitted).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum VolumeSource {
    EmptyDir {
        #[serde(rename = "emptyDir", default)]
        empty_dir: Option<EmptyDirSource>,
    },
    ConfigMap {
        #[serde(rename = "configMap")]
        config_map: ConfigMapVolumeSource,
    },
    Secret {
        secret: SecretVolumeSource,
    },
    PersistentVolumeClaim {
        #[serde(rename = "persistentVolumeClaim")]
        persistent_volume_claim: ClaimVolumeSource,
    },
    HostPath {
        #[serde(rename = "hostPath")]
        host_path: HostPathSource,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Volume {
    pub name: String,
    #[serde(flatten)]
    pub source: VolumeSource,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub toleration_seconds: Option<i64>,
}

/// Pod template fields, flattened into every workload payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecInput {
    pub containers: Vec<Container>,
    #[serde(default)]
    pub init_containers: Vec<Container>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub service_account_name: Option<String>,
    #[serde(default)]
    pub node_selector: StringMap,
    #[serde(default)]
    pub tolerations: Vec<Toleration>,
    #[serde(default)]
    pub image_pull_secrets: Vec<String>,
    #[serde(default)]
    pub security_context: Option<PodSecurityContext>,
}

impl PodSpecInput {
    /// Init containers followed by app containers
    pub fn all_containers(&self) -> impl Iterator<Item = &Container> {
        self.init_containers.iter().chain(self.containers.iter())
    }

    /// ConfigMap names referenced by env vars or volumes, in first-seen order
    pub fn referenced_config_maps(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for env in self.all_containers().flat_map(|c| c.env.iter()) {
            if let Some(sel) = env.value_from.as_ref().and_then(|v| v.config_map_key_ref.as_ref()) {
                push_unique(&mut names, sel.name.as_str());
            }
        }
        for volume in &self.volumes {
            if let VolumeSource::ConfigMap { config_map } = &volume.source {
                push_unique(&mut names, config_map.name.as_str());
            }
        }
        names
    }

    /// Secret names referenced by env vars, volumes or image pull secrets
    pub fn referenced_secrets(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for env in self.all_containers().flat_map(|c| c.env.iter()) {
            if let Some(sel) = env.value_from.as_ref().and_then(|v| v.secret_key_ref.as_ref()) {
                push_unique(&mut names, sel.name.as_str());
            }
        }
        for volume in &self.volumes {
            if let VolumeSource::Secret { secret } = &volume.source {
                push_unique(&mut names, secret.secret_name.as_str());
            }
        }
        for name in &self.image_pull_secrets {
            push_unique(&mut names, name.as_str());
        }
        names
    }

    /// PersistentVolumeClaim names mounted as volumes
    pub fn referenced_claims(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for volume in &self.volumes {
            if let VolumeSource::PersistentVolumeClaim {
                persistent_volume_claim,
            } = &volume.source
            {
                push_unique(&mut names, persistent_volume_claim.claim_name.as_str());
            }
        }
        names
    }
}

fn push_unique<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if !names.contains(&name) {
        names.push(name);
    }
}
