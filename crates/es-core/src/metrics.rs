use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::environment::EnvironmentName;
use crate::storage::{read_json, write_json, KeyValueStore, METRICS_KEY};

/// Number of samples retained by default.
pub const DEFAULT_MAX_SAMPLES: usize = 100;

// ---------------------------------------------------------------------------
// PerformanceMetrics
// ---------------------------------------------------------------------------

/// One periodic performance sample.
///
/// Counter fields are cumulative since the sampler started. Fields missing
/// from stored samples decode as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub environment: EnvironmentName,
    #[serde(default)]
    pub page_load_time: f64,
    #[serde(default)]
    pub render_time: f64,
    #[serde(default)]
    pub memory_usage: u64,
    #[serde(default)]
    pub network_requests: u64,
    #[serde(default)]
    pub user_interactions: u64,
    #[serde(default)]
    pub errors: u64,
}

impl PerformanceMetrics {
    /// A zeroed sample with a fresh id and the current time.
    pub fn new(environment: EnvironmentName) -> Self {
        let now = Utc::now();
        Self {
            id: sample_id(now),
            timestamp: now,
            environment,
            page_load_time: 0.0,
            render_time: 0.0,
            memory_usage: 0,
            network_requests: 0,
            user_interactions: 0,
            errors: 0,
        }
    }
}

/// `metrics-<unix millis>-<9 hex chars>`.
fn sample_id(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("metrics-{}-{}", at.timestamp_millis(), &suffix[..9])
}

// ---------------------------------------------------------------------------
// MetricsSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_entries: usize,
    pub avg_page_load_time: f64,
    pub avg_render_time: f64,
    pub avg_memory_usage: f64,
    pub total_network_requests: u64,
    pub total_user_interactions: u64,
    pub total_errors: u64,
    /// Environment name, or `"all"` for an unfiltered summary.
    pub environment: String,
}

impl MetricsSummary {
    pub fn from_samples(samples: &[PerformanceMetrics], environment: Option<EnvironmentName>) -> Self {
        let label = environment
            .map(|e| e.as_str().to_string())
            .unwrap_or_else(|| "all".to_string());
        if samples.is_empty() {
            return Self {
                total_entries: 0,
                avg_page_load_time: 0.0,
                avg_render_time: 0.0,
                avg_memory_usage: 0.0,
                total_network_requests: 0,
                total_user_interactions: 0,
                total_errors: 0,
                environment: label,
            };
        }

        let n = samples.len() as f64;
        Self {
            total_entries: samples.len(),
            avg_page_load_time: samples.iter().map(|m| m.page_load_time).sum::<f64>() / n,
            avg_render_time: samples.iter().map(|m| m.render_time).sum::<f64>() / n,
            avg_memory_usage: samples.iter().map(|m| m.memory_usage as f64).sum::<f64>() / n,
            total_network_requests: samples.iter().map(|m| m.network_requests).sum(),
            total_user_interactions: samples.iter().map(|m| m.user_interactions).sum(),
            total_errors: samples.iter().map(|m| m.errors).sum(),
            environment: label,
        }
    }
}

// ---------------------------------------------------------------------------
// MetricsStore
// ---------------------------------------------------------------------------

/// Bounded, newest-first sample log. Failures are logged and swallowed.
pub struct MetricsStore<S> {
    store: S,
    max_samples: usize,
}

impl<S: KeyValueStore> MetricsStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_MAX_SAMPLES)
    }

    pub fn with_capacity(store: S, max_samples: usize) -> Self {
        Self {
            store,
            max_samples: max_samples.max(1),
        }
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Prepend `sample`, evicting the oldest samples beyond capacity.
    pub fn record(&self, sample: PerformanceMetrics) {
        let mut samples = self.all_metrics();
        samples.truncate(self.max_samples - 1);
        samples.insert(0, sample);
        if let Err(e) = write_json(&self.store, METRICS_KEY, &samples) {
            warn!(error = %e, "failed to save metrics");
        }
    }

    pub fn all_metrics(&self) -> Vec<PerformanceMetrics> {
        match read_json::<Vec<PerformanceMetrics>, _>(&self.store, METRICS_KEY) {
            Ok(samples) => samples.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "failed to load metrics");
                Vec::new()
            }
        }
    }

    pub fn metrics_by_environment(&self, environment: EnvironmentName) -> Vec<PerformanceMetrics> {
        self.all_metrics()
            .into_iter()
            .filter(|m| m.environment == environment)
            .collect()
    }

    pub fn summary(&self, environment: Option<EnvironmentName>) -> MetricsSummary {
        let samples = match environment {
            Some(env) => self.metrics_by_environment(env),
            None => self.all_metrics(),
        };
        MetricsSummary::from_samples(&samples, environment)
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(METRICS_KEY) {
            warn!(error = %e, "failed to clear metrics");
        }
    }
}
