//! Observability infrastructure for the manifest generator
//!
//! Provides:
//! - Prometheus metrics (generation latency, documents per kind, validation failures, warnings)
//! - Structured JSON logging with tracing

use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::models::ResourceKind;

/// Histogram buckets for generation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<GeneratorMetricsInner> = OnceLock::new();

struct GeneratorMetricsInner {
    generation_latency_seconds: Histogram,
    documents_generated: IntCounterVec,
    validation_failures: IntCounterVec,
    warnings_emitted: IntCounter,
}

impl GeneratorMetricsInner {
    fn new() -> Self {
        Self {
            generation_latency_seconds: register_histogram!(
                "manifest_generator_generation_latency_seconds",
                "Time spent building, cleaning and rendering manifests",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register generation_latency_seconds"),

            documents_generated: register_int_counter_vec!(
                "manifest_generator_documents_generated_total",
                "Number of YAML documents generated, by requested resource kind",
                &["kind"]
            )
            .expect("Failed to register documents_generated_total"),

            validation_failures: register_int_counter_vec!(
                "manifest_generator_validation_failures_total",
                "Number of inputs rejected by validation, by resource kind",
                &["kind"]
            )
            .expect("Failed to register validation_failures_total"),

            warnings_emitted: register_int_counter!(
                "manifest_generator_warnings_emitted_total",
                "Number of best-practice warnings returned to callers"
            )
            .expect("Failed to register warnings_emitted_total"),
        }
    }
}

/// Generator metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct GeneratorMetrics {
    _private: (),
}

impl Default for GeneratorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(GeneratorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &GeneratorMetricsInner {
        GLOBAL_METRICS.get_or_init(GeneratorMetricsInner::new)
    }

    pub fn observe_generation_latency(&self, duration_secs: f64) {
        self.inner().generation_latency_seconds.observe(duration_secs);
    }

    /// Count the documents produced for one request
    pub fn add_documents(&self, kind: ResourceKind, documents: usize) {
        self.inner()
            .documents_generated
            .with_label_values(&[kind.as_str()])
            .inc_by(documents as u64);
    }

    pub fn inc_validation_failures(&self, kind: ResourceKind) {
        self.inner()
            .validation_failures
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn add_warnings(&self, count: usize) {
        self.inner().warnings_emitted.inc_by(count as u64);
    }
}

/// Structured logger for generator events
///
/// Every event carries the `service` field so log lines from the HTTP
/// service and the CLI can be told apart.
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, bind_address: &str) {
        info!(
            event = "service_started",
            service = %self.service,
            version = %version,
            bind_address = %bind_address,
            "Manifest generator started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Manifest generator shutting down"
        );
    }

    /// Log a completed generation
    pub fn log_generation(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
        documents: usize,
        warnings: usize,
    ) {
        info!(
            event = "manifest_generated",
            service = %self.service,
            kind = %kind,
            name = %name,
            namespace = %namespace,
            documents = documents,
            warnings = warnings,
            "Generated manifest"
        );
    }

    /// Log an input rejected by validation
    pub fn log_validation_failure(&self, kind: ResourceKind, name: &str, errors: &[String]) {
        warn!(
            event = "validation_failed",
            service = %self.service,
            kind = %kind,
            name = %name,
            error_count = errors.len(),
            errors = ?errors,
            "Resource input failed validation"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_metrics_recording() {
        let metrics = GeneratorMetrics::new();
        let before = metrics
            .inner()
            .documents_generated
            .with_label_values(&["Deployment"])
            .get();

        metrics.observe_generation_latency(0.0004);
        metrics.add_documents(ResourceKind::Deployment, 2);
        metrics.inc_validation_failures(ResourceKind::Service);
        metrics.add_warnings(3);

        let after = metrics
            .inner()
            .documents_generated
            .with_label_values(&["Deployment"])
            .get();
        assert!(after >= before + 2);
    }

    #[test]
    fn test_metrics_handles_share_registry() {
        let a = GeneratorMetrics::new();
        let b = a.clone();
        a.add_warnings(1);
        assert!(b.inner().warnings_emitted.get() >= 1);
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("manifest-api");
        assert_eq!(logger.service, "manifest-api");
        logger.log_generation(ResourceKind::ConfigMap, "settings", "default", 1, 0);
    }
}
