use indexmap::IndexMap;
use serde::Deserialize;

/// String map that keeps the caller's key order
pub type StringMap = IndexMap<String, String>;

/// Namespace assumed when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Object metadata for namespaced kinds
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub labels: StringMap,
    #[serde(default)]
    pub annotations: StringMap,
}

impl Metadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Namespace the object lands in, `default` when unset or blank
    pub fn resolved_namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Labels used for selectors and pod templates
    ///
    /// Falls back to `app: <name>` when no labels were given.
    pub fn selector_labels(&self) -> StringMap {
        if self.labels.is_empty() {
            let mut labels = StringMap::new();
            labels.insert("app".to_string(), self.name.clone());
            labels
        } else {
            self.labels.clone()
        }
    }
}

/// Metadata for cluster-scoped kinds (no namespace)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetadata {
    pub name: String,
    #[serde(default)]
    pub labels: StringMap,
    #[serde(default)]
    pub annotations: StringMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_namespace_resolves_to_default() {
        let meta = Metadata::new("api").with_namespace("");
        assert_eq!(meta.resolved_namespace(), "default");
        assert_eq!(Metadata::new("api").resolved_namespace(), "default");
        assert_eq!(
            Metadata::new("api").with_namespace("prod").resolved_namespace(),
            "prod"
        );
    }

    #[test]
    fn test_selector_labels_fall_back_to_app_name() {
        let labels = Metadata::new("api").selector_labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels["app"], "api");

        let labels = Metadata::new("api").with_label("tier", "web").selector_labels();
        assert_eq!(labels.get("app"), None);
        assert_eq!(labels["tier"], "web");
    }

    #[test]
    fn test_labels_keep_input_order() {
        let meta: Metadata = serde_json::from_str(
            r#"{"name":"api","labels":{"zeta":"1","alpha":"2","mid":"3"}}"#,
        )
        .unwrap();
        let keys: Vec<_> = meta.labels.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }
}
