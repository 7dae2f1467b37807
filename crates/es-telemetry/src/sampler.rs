use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use es_core::environment::EnvironmentName;
use es_core::metrics::{MetricsStore, PerformanceMetrics};
use es_core::storage::KeyValueStore;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// SampleCounters
// ---------------------------------------------------------------------------

/// Live counters fed by instrumentation and read by the sampler.
///
/// Request, interaction and error counts are cumulative. Timings and memory
/// usage hold the last observed value. Floats are stored as their bit
/// pattern so every field is a plain atomic.
#[derive(Debug, Default)]
pub struct SampleCounters {
    page_load_time: AtomicU64,
    render_time: AtomicU64,
    memory_usage: AtomicU64,
    network_requests: AtomicU64,
    user_interactions: AtomicU64,
    errors: AtomicU64,
}

impl SampleCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_network_request(&self) {
        self.network_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_interaction(&self) {
        self.user_interactions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Milliseconds.
    pub fn set_page_load_time(&self, ms: f64) {
        self.page_load_time.store(ms.to_bits(), Ordering::Relaxed);
    }

    /// Milliseconds.
    pub fn set_render_time(&self, ms: f64) {
        self.render_time.store(ms.to_bits(), Ordering::Relaxed);
    }

    /// Bytes.
    pub fn set_memory_usage(&self, bytes: u64) {
        self.memory_usage.store(bytes, Ordering::Relaxed);
    }

    /// A fresh sample carrying the current counter values.
    pub fn snapshot(&self, environment: EnvironmentName) -> PerformanceMetrics {
        let mut sample = PerformanceMetrics::new(environment);
        sample.page_load_time = f64::from_bits(self.page_load_time.load(Ordering::Relaxed));
        sample.render_time = f64::from_bits(self.render_time.load(Ordering::Relaxed));
        sample.memory_usage = self.memory_usage.load(Ordering::Relaxed);
        sample.network_requests = self.network_requests.load(Ordering::Relaxed);
        sample.user_interactions = self.user_interactions.load(Ordering::Relaxed);
        sample.errors = self.errors.load(Ordering::Relaxed);
        sample
    }
}

// ---------------------------------------------------------------------------
// MetricsSampler
// ---------------------------------------------------------------------------

/// Periodically records a snapshot of [`SampleCounters`] into a
/// [`MetricsStore`].
pub struct MetricsSampler;

impl MetricsSampler {
    /// Spawn the sampling task on the current tokio runtime.
    ///
    /// The first sample is taken one full `period` after start. The task
    /// runs until the returned handle is stopped or dropped.
    pub fn start<S>(
        store: Arc<MetricsStore<S>>,
        counters: Arc<SampleCounters>,
        environment: EnvironmentName,
        period: Duration,
    ) -> SamplerHandle
    where
        S: KeyValueStore + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(store, counters, environment, period, shutdown_rx));
        info!(env = %environment, period_secs = period.as_secs(), "metrics sampler started");
        SamplerHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

async fn run<S>(
    store: Arc<MetricsStore<S>>,
    counters: Arc<SampleCounters>,
    environment: EnvironmentName,
    period: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) where
    S: KeyValueStore,
{
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                store.record(counters.snapshot(environment));
                debug!(env = %environment, "metrics sample recorded");
            }
            _ = &mut shutdown_rx => {
                store.record(counters.snapshot(environment));
                info!(env = %environment, "metrics sampler stopped after final flush");
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SamplerHandle
// ---------------------------------------------------------------------------

/// Owner of a running sampler task.
///
/// [`stop`](Self::stop) flushes one final sample and waits for the task to
/// end. Dropping the handle aborts the task without flushing.
#[must_use = "dropping the handle stops the sampler immediately"]
pub struct SamplerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// Whether the sampling task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Record a final sample and wait for the task to end.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "metrics sampler task failed");
            }
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("metrics sampler aborted without flush");
        }
    }
}
