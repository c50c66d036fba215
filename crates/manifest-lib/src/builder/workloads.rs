//! Deployment, StatefulSet, DaemonSet, Job and CronJob builders

use serde_json::{json, Value};

use super::object_metadata;
use super::pod::{pod_template, set_pod_field};
use crate::models::{
    CronJobInput, DaemonSetInput, DeploymentInput, JobInput, JobRestartPolicy, JobTemplateInput,
    PodSpecInput, ResourceKind, StatefulSetInput, StringMap, VolumeClaimTemplate,
    DEFAULT_CRONJOB_TTL_SECONDS,
};

pub(super) fn deployment(d: &DeploymentInput) -> Value {
    let labels = d.metadata.selector_labels();
    json!({
        "apiVersion": ResourceKind::Deployment.api_version(),
        "kind": ResourceKind::Deployment,
        "metadata": object_metadata(&d.metadata),
        "spec": {
            "replicas": d.replicas,
            "selector": { "matchLabels": labels },
            "strategy": d.strategy.as_ref().map(|s| json!({
                "type": s.strategy_type,
                "rollingUpdate": s.rolling_update.as_ref().map(|ru| json!({
                    "maxSurge": ru.max_surge,
                    "maxUnavailable": ru.max_unavailable,
                })),
            })),
            "revisionHistoryLimit": d.revision_history_limit,
            "minReadySeconds": d.min_ready_seconds,
            "template": pod_template(&labels, &d.pod),
        }
    })
}

pub(super) fn stateful_set(s: &StatefulSetInput) -> Value {
    let labels = s.metadata.selector_labels();
    json!({
        "apiVersion": ResourceKind::StatefulSet.api_version(),
        "kind": ResourceKind::StatefulSet,
        "metadata": object_metadata(&s.metadata),
        "spec": {
            "serviceName": s.service_name,
            "replicas": s.replicas,
            "selector": { "matchLabels": labels },
            "podManagementPolicy": s.pod_management_policy,
            "updateStrategy": s.update_strategy.as_ref().map(|u| json!({
                "type": u.strategy_type,
                "rollingUpdate": u.rolling_update.as_ref().map(|ru| json!({
                    "partition": ru.partition,
                })),
            })),
            "template": pod_template(&labels, &s.pod),
            "volumeClaimTemplates": s
                .volume_claim_templates
                .iter()
                .map(volume_claim_template)
                .collect::<Vec<_>>(),
        }
    })
}

fn volume_claim_template(t: &VolumeClaimTemplate) -> Value {
    json!({
        "metadata": { "name": t.name },
        "spec": {
            "accessModes": t.access_modes,
            "storageClassName": t.storage_class_name,
            "resources": { "requests": { "storage": t.storage } },
        }
    })
}

pub(super) fn daemon_set(d: &DaemonSetInput) -> Value {
    let labels = d.metadata.selector_labels();
    let mut template = pod_template(&labels, &d.pod);
    set_pod_field(&mut template, "hostNetwork", json!(d.host_network));
    set_pod_field(&mut template, "hostPID", json!(d.host_pid));

    json!({
        "apiVersion": ResourceKind::DaemonSet.api_version(),
        "kind": ResourceKind::DaemonSet,
        "metadata": object_metadata(&d.metadata),
        "spec": {
            "selector": { "matchLabels": labels },
            "updateStrategy": d.update_strategy.as_ref().map(|u| json!({
                "type": u.strategy_type,
                "rollingUpdate": u.rolling_update.as_ref().map(|ru| json!({
                    "maxUnavailable": ru.max_unavailable,
                })),
            })),
            "template": template,
        }
    })
}

fn job_pod_template(labels: &StringMap, pod: &PodSpecInput, restart_policy: JobRestartPolicy) -> Value {
    let mut template = pod_template(labels, pod);
    set_pod_field(&mut template, "restartPolicy", json!(restart_policy));
    template
}

pub(super) fn job(j: &JobInput) -> Value {
    json!({
        "apiVersion": ResourceKind::Job.api_version(),
        "kind": ResourceKind::Job,
        "metadata": object_metadata(&j.metadata),
        "spec": {
            "completions": j.completions,
            "parallelism": j.parallelism,
            "backoffLimit": j.backoff_limit,
            "activeDeadlineSeconds": j.active_deadline_seconds,
            "ttlSecondsAfterFinished": j.ttl_seconds_after_finished,
            "template": job_pod_template(&j.metadata.labels, &j.pod, j.restart_policy),
        }
    })
}

fn job_template(c: &CronJobInput, t: &JobTemplateInput) -> Value {
    json!({
        "spec": {
            "completions": t.completions,
            "parallelism": t.parallelism,
            "backoffLimit": t.backoff_limit,
            "activeDeadlineSeconds": t.active_deadline_seconds,
            "ttlSecondsAfterFinished": t
                .ttl_seconds_after_finished
                .unwrap_or(DEFAULT_CRONJOB_TTL_SECONDS),
            "template": job_pod_template(&c.metadata.labels, &t.pod, t.restart_policy),
        }
    })
}

pub(super) fn cron_job(c: &CronJobInput) -> Value {
    json!({
        "apiVersion": ResourceKind::CronJob.api_version(),
        "kind": ResourceKind::CronJob,
        "metadata": object_metadata(&c.metadata),
        "spec": {
            "schedule": c.schedule,
            "timeZone": c.time_zone,
            "concurrencyPolicy": c.concurrency_policy,
            "suspend": c.suspend,
            "successfulJobsHistoryLimit": c.successful_jobs_history_limit,
            "failedJobsHistoryLimit": c.failed_jobs_history_limit,
            "startingDeadlineSeconds": c.starting_deadline_seconds,
            "jobTemplate": job_template(c, &c.job_template),
        }
    })
}
