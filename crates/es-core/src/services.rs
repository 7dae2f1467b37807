use serde::Serialize;

use crate::environment::{EnvironmentName, FeatureFlags};

/// Port of the front-end dev server.
pub const DEV_SERVER_PORT: u16 = 5173;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Development,
    External,
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub status: ServiceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub environment: EnvironmentName,
}

impl ServiceStatus {
    /// The dev server entry; a stopped server carries no URL.
    pub fn dev_server(running: bool, environment: EnvironmentName) -> Self {
        Self {
            id: "vite-dev".into(),
            name: "Vite Development Server".into(),
            kind: ServiceKind::Development,
            status: if running {
                ServiceState::Running
            } else {
                ServiceState::Stopped
            },
            port: Some(DEV_SERVER_PORT),
            url: running.then(|| local_url(DEV_SERVER_PORT)),
            description: "Main development server for the application".into(),
            environment,
        }
    }

    /// An unidentified service answering on `port`.
    pub fn on_port(port: u16, environment: EnvironmentName) -> Self {
        Self {
            id: format!("service-{port}"),
            name: format!("Service on port {port}"),
            kind: ServiceKind::External,
            status: ServiceState::Running,
            port: Some(port),
            url: Some(local_url(port)),
            description: format!("External service running on port {port}"),
            environment,
        }
    }

    fn feature(
        id: &str,
        name: &str,
        kind: ServiceKind,
        description: &str,
        environment: EnvironmentName,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            status: ServiceState::Running,
            port: None,
            url: None,
            description: description.into(),
            environment,
        }
    }
}

pub fn local_url(port: u16) -> String {
    service_url("localhost", port)
}

pub fn service_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}/")
}

/// Whether a stopped dev server should still be listed.
pub fn lists_stopped_dev_server(environment: EnvironmentName) -> bool {
    environment == EnvironmentName::Local
}

/// Services implied by the feature flags alone.
pub fn feature_services(flags: &FeatureFlags, environment: EnvironmentName) -> Vec<ServiceStatus> {
    let mut services = Vec::new();
    if flags.analytics {
        services.push(ServiceStatus::feature(
            "analytics",
            "Analytics Service",
            ServiceKind::Feature,
            "User analytics and tracking service",
            environment,
        ));
    }
    if flags.supabase {
        services.push(ServiceStatus::feature(
            "supabase",
            "Supabase Database",
            ServiceKind::External,
            "Database and authentication service",
            environment,
        ));
    }
    if flags.performance_metrics {
        services.push(ServiceStatus::feature(
            "metrics",
            "Performance Metrics",
            ServiceKind::Feature,
            "Application performance monitoring",
            environment,
        ));
    }
    if flags.debug_panel {
        services.push(ServiceStatus::feature(
            "debug",
            "Debug Panel",
            ServiceKind::Feature,
            "Development debugging tools",
            environment,
        ));
    }
    services
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::config_for;

    fn ids(services: &[ServiceStatus]) -> Vec<&str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn prod_lists_analytics_and_database() {
        let env = EnvironmentName::Prod;
        let services = feature_services(&config_for(env).features, env);
        assert_eq!(ids(&services), vec!["analytics", "supabase", "metrics"]);
        assert!(services.iter().all(|s| s.status == ServiceState::Running));
    }

    #[test]
    fn local_lists_debug_panel() {
        let env = EnvironmentName::Local;
        let services = feature_services(&config_for(env).features, env);
        assert_eq!(ids(&services), vec!["metrics", "debug"]);
    }

    #[test]
    fn stopped_dev_server_has_no_url() {
        let s = ServiceStatus::dev_server(false, EnvironmentName::Local);
        assert_eq!(s.status, ServiceState::Stopped);
        assert!(s.url.is_none());
        assert_eq!(s.port, Some(5173));
        assert!(lists_stopped_dev_server(EnvironmentName::Local));
        assert!(!lists_stopped_dev_server(EnvironmentName::Dev));
    }
}
