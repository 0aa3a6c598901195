//! Environment-driven configuration.
//!
//! Every setting has a default so the service starts with no environment at all.

use std::env;

/// Default maximum number of integrations returned per page.
pub const DEFAULT_PAGE_LIMIT: usize = 1000;

/// Default number of databases returned per discovery page.
pub const DEFAULT_RDS_PAGE_SIZE: usize = 50;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8090;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name of the running service.
    pub service_name: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Page size cap for listing integrations.
    pub page_limit: usize,
    /// Page size for AWS database discovery.
    pub rds_page_size: usize,
    /// Optional JSON file with the RDS catalog.
    pub rds_catalog_path: Option<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "integration-service".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            page_limit: DEFAULT_PAGE_LIMIT,
            rds_page_size: DEFAULT_RDS_PAGE_SIZE,
            rds_catalog_path: None,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment for the named service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unparseable or zero numeric values fall back to their defaults.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            host: lookup("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(lookup("SERVER_PORT"), defaults.port),
            page_limit: parse_non_zero(lookup("INTEGRATIONS_PAGE_LIMIT"), defaults.page_limit),
            rds_page_size: parse_non_zero(lookup("RDS_PAGE_SIZE"), defaults.rds_page_size),
            rds_catalog_path: lookup("RDS_CATALOG_PATH").filter(|p| !p.is_empty()),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }

    /// Socket address string to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_non_zero(value: Option<String>, default: usize) -> usize {
    match parse_or(value, default) {
        0 => default,
        n => n,
    }
}
