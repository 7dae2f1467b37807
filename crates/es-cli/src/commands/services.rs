use std::time::Duration;

use es_core::environment::EnvironmentName;
use es_core::services::{
    feature_services, lists_stopped_dev_server, service_url, ServiceState, ServiceStatus,
    DEV_SERVER_PORT,
};
use tracing::debug;

use super::{print_json, Context};

/// Any HTTP answer counts as running; only transport failures do not.
async fn is_responding(client: &reqwest::Client, host: &str, port: u16) -> bool {
    match client.head(service_url(host, port)).send().await {
        Ok(resp) => {
            debug!(port, status = resp.status().as_u16(), "port responded");
            true
        }
        Err(e) => {
            debug!(port, error = %e, "port not responding");
            false
        }
    }
}

/// Probe the dev server and `ports` on `host`.
///
/// The dev server is always listed in `local`, stopped or not. Other ports
/// are listed only when they answer.
async fn discover(
    client: &reqwest::Client,
    host: &str,
    dev_port: u16,
    ports: &[u16],
    environment: EnvironmentName,
) -> Vec<ServiceStatus> {
    let mut services = Vec::new();

    let dev_running = is_responding(client, host, dev_port).await;
    if dev_running || lists_stopped_dev_server(environment) {
        let mut dev = ServiceStatus::dev_server(dev_running, environment);
        dev.port = Some(dev_port);
        dev.url = dev_running.then(|| service_url(host, dev_port));
        services.push(dev);
    }

    for &port in ports.iter().filter(|&&p| p != dev_port) {
        if is_responding(client, host, port).await {
            let mut service = ServiceStatus::on_port(port, environment);
            service.url = Some(service_url(host, port));
            services.push(service);
        }
    }
    services
}

/// Run the `services` subcommand: probe local ports and list feature
/// services implied by the active flags.
pub async fn run(ctx: &Context, json_output: bool) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(ctx.config.services.probe_timeout_ms))
        .build()?;

    let mut services = discover(
        &client,
        "localhost",
        DEV_SERVER_PORT,
        &ctx.config.services.probe_ports,
        ctx.environment,
    )
    .await;
    services.extend(feature_services(&ctx.flags(), ctx.environment));

    if json_output {
        return print_json(&services);
    }

    println!("running services ({})", ctx.environment);
    println!("{}", "-".repeat(40));
    for s in &services {
        let state = match s.status {
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
        };
        let location = s.url.as_deref().unwrap_or("-");
        println!("{:<28} {:<8} {}", s.name, state, location);
        println!("    {}", s.description);
    }
    let running = services
        .iter()
        .filter(|s| s.status == ServiceState::Running)
        .count();
    println!("{running} of {} running", services.len());
    Ok(())
}
