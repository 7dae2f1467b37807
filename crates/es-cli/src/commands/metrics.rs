use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use es_core::environment::EnvironmentName;
use es_core::metrics::PerformanceMetrics;
use es_core::services::{local_url, DEV_SERVER_PORT};
use es_telemetry::sampler::{MetricsSampler, SampleCounters};
use tracing::{debug, warn};

use super::{print_json, Context};

/// Values for a manually recorded sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleArgs {
    pub page_load_time: f64,
    pub render_time: f64,
    pub memory_usage: u64,
    pub network_requests: u64,
    pub user_interactions: u64,
    pub errors: u64,
}

pub fn record(ctx: &Context, args: SampleArgs) -> anyhow::Result<()> {
    let mut sample = PerformanceMetrics::new(ctx.environment);
    sample.page_load_time = args.page_load_time;
    sample.render_time = args.render_time;
    sample.memory_usage = args.memory_usage;
    sample.network_requests = args.network_requests;
    sample.user_interactions = args.user_interactions;
    sample.errors = args.errors;

    let id = sample.id.clone();
    ctx.metrics().record(sample);
    println!("Recorded {id}");
    Ok(())
}

pub fn list(
    ctx: &Context,
    environment: Option<EnvironmentName>,
    json_output: bool,
) -> anyhow::Result<()> {
    let store = ctx.metrics();
    let samples = match environment {
        Some(env) => store.metrics_by_environment(env),
        None => store.all_metrics(),
    };
    if json_output {
        return print_json(&samples);
    }
    if samples.is_empty() {
        println!("No metrics recorded.");
        return Ok(());
    }
    println!(
        "{:<19}  {:<5}  {:>9}  {:>8}  {:>10}  {:>5}  {:>5}  {:>4}",
        "timestamp", "env", "load ms", "render", "memory", "reqs", "ui", "errs"
    );
    for m in samples {
        println!(
            "{:<19}  {:<5}  {:>9.1}  {:>8.1}  {:>10}  {:>5}  {:>5}  {:>4}",
            m.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            m.environment,
            m.page_load_time,
            m.render_time,
            m.memory_usage,
            m.network_requests,
            m.user_interactions,
            m.errors
        );
    }
    Ok(())
}

pub fn summary(
    ctx: &Context,
    environment: Option<EnvironmentName>,
    json_output: bool,
) -> anyhow::Result<()> {
    let summary = ctx.metrics().summary(environment);
    if json_output {
        return print_json(&summary);
    }
    println!("metrics summary ({})", summary.environment);
    println!("{}", "-".repeat(40));
    println!("Samples:              {}", summary.total_entries);
    println!("Avg page load:        {:.1} ms", summary.avg_page_load_time);
    println!("Avg render:           {:.1} ms", summary.avg_render_time);
    println!("Avg memory:           {:.0} bytes", summary.avg_memory_usage);
    println!("Network requests:     {}", summary.total_network_requests);
    println!("User interactions:    {}", summary.total_user_interactions);
    println!("Errors:               {}", summary.total_errors);
    Ok(())
}

pub fn clear(ctx: &Context) {
    ctx.metrics().clear();
    println!("All metrics deleted.");
}

/// Time one GET of `url` and feed the result into `counters`.
async fn probe(client: &reqwest::Client, url: &str, counters: &SampleCounters) {
    let started = Instant::now();
    counters.record_network_request();
    match client.get(url).send().await {
        Ok(resp) => {
            let elapsed = started.elapsed().as_secs_f64() * 1000.0;
            counters.set_page_load_time(elapsed);
            if !resp.status().is_success() {
                counters.record_error();
            }
            debug!(url, status = resp.status().as_u16(), elapsed_ms = elapsed, "probe finished");
        }
        Err(e) => {
            counters.record_error();
            debug!(url, error = %e, "probe failed");
        }
    }
}

/// Samples in `samples` whose id is not in `seen`. The log is capped, so a
/// length difference undercounts once it is full.
fn count_new(seen: &HashSet<String>, samples: &[PerformanceMetrics]) -> usize {
    samples.iter().filter(|m| !seen.contains(&m.id)).count()
}

/// Run the sampler for `seconds` (or until ctrl-c), probing `url` once per
/// sampling interval, then flush a final sample.
pub async fn watch(ctx: &Context, seconds: u64, url: Option<&str>) -> anyhow::Result<()> {
    let period = Duration::from_secs(ctx.config.metrics.sample_interval_secs);
    let url = url
        .map(str::to_string)
        .unwrap_or_else(|| local_url(DEV_SERVER_PORT));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(ctx.config.services.probe_timeout_ms))
        .build()?;

    let store = Arc::new(ctx.metrics());
    let counters = Arc::new(SampleCounters::new());
    let seen: HashSet<String> = store.all_metrics().into_iter().map(|m| m.id).collect();
    let handle = MetricsSampler::start(store.clone(), counters.clone(), ctx.environment, period);

    println!(
        "Sampling every {}s for {seconds}s against {url} (ctrl-c to stop early)",
        period.as_secs()
    );

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);
    let mut ticker = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted.");
                break;
            }
            _ = ticker.tick() => probe(&client, &url, &counters).await,
        }
    }

    handle.stop().await;

    let recorded = count_new(&seen, &store.all_metrics());
    if recorded == 0 {
        warn!("no samples recorded");
    }
    println!("Recorded {recorded} new sample(s).");
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{routing::get, Router};

    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn record_list_summary_clear() {
        let (ctx, _dir) = context(EnvironmentName::Test);
        record(
            &ctx,
            SampleArgs {
                page_load_time: 120.0,
                errors: 2,
                ..Default::default()
            },
        )
        .unwrap();

        let all = ctx.metrics().all_metrics();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].environment, EnvironmentName::Test);
        assert_eq!(all[0].errors, 2);

        assert!(list(&ctx, None, false).is_ok());
        assert!(list(&ctx, Some(EnvironmentName::Prod), true).is_ok());
        assert!(summary(&ctx, Some(EnvironmentName::Test), false).is_ok());

        clear(&ctx);
        assert!(ctx.metrics().all_metrics().is_empty());
    }

    #[test]
    fn store_capacity_comes_from_config() {
        let (mut ctx, _dir) = context(EnvironmentName::Local);
        ctx.config.metrics.max_samples = 2;
        for _ in 0..4 {
            record(&ctx, SampleArgs::default()).unwrap();
        }
        assert_eq!(ctx.metrics().all_metrics().len(), 2);
    }

    #[test]
    fn new_samples_counted_when_log_is_full() {
        let (mut ctx, _dir) = context(EnvironmentName::Local);
        ctx.config.metrics.max_samples = 2;
        for _ in 0..2 {
            record(&ctx, SampleArgs::default()).unwrap();
        }
        let seen: HashSet<String> = ctx.metrics().all_metrics().into_iter().map(|m| m.id).collect();

        record(&ctx, SampleArgs::default()).unwrap();

        let after = ctx.metrics().all_metrics();
        assert_eq!(after.len(), 2);
        assert_eq!(count_new(&seen, &after), 1);
    }

    #[tokio::test]
    async fn probe_times_responding_server() {
        let app = Router::new().route("/", get(|| async { "ok" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let counters = SampleCounters::new();
        let client = reqwest::Client::new();
        probe(&client, &format!("http://{addr}/"), &counters).await;

        let s = counters.snapshot(EnvironmentName::Local);
        assert_eq!(s.network_requests, 1);
        assert_eq!(s.errors, 0);
        assert!(s.page_load_time > 0.0);
    }

    #[tokio::test]
    async fn probe_counts_failures_as_errors() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let counters = SampleCounters::new();
        let client = reqwest::Client::new();
        probe(&client, &format!("http://{addr}/"), &counters).await;

        let s = counters.snapshot(EnvironmentName::Local);
        assert_eq!(s.network_requests, 1);
        assert_eq!(s.errors, 1);
    }

    #[tokio::test]
    async fn watch_flushes_on_exit() {
        let (ctx, _dir) = context(EnvironmentName::Dev);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        watch(&ctx, 0, Some(&format!("http://{addr}/"))).await.unwrap();

        // Interval is 30s, so only the final flush lands.
        let samples = ctx.metrics().all_metrics();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].environment, EnvironmentName::Dev);
    }
}
