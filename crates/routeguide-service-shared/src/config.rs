//! Service configuration from environment variables.
//!
//! - `ROUTEGUIDE_DATA_PATH`: JSON feature dataset (default: `route_guide_db.json`)
//! - `SERVICE_HOST`: bind address (default: `0.0.0.0`)
//! - `SERVICE_PORT`: HTTP port (default: `50051`)

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default dataset file name, resolved against the working directory.
pub const DEFAULT_DATA_PATH: &str = "route_guide_db.json";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 50051;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: '{}'", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

/// Where to find the dataset and where to listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones fail.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("ROUTEGUIDE_DATA_PATH").filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(host) = lookup("SERVICE_HOST") {
            config.host = host.trim().parse().map_err(|_| ConfigError {
                variable: "SERVICE_HOST",
                value: host,
            })?;
        }

        if let Some(port) = lookup("SERVICE_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError {
                variable: "SERVICE_PORT",
                value: port,
            })?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:50051");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("ROUTEGUIDE_DATA_PATH", "/data/db.json"),
            ("SERVICE_HOST", "127.0.0.1"),
            ("SERVICE_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/data/db.json"));
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("SERVICE_PORT", "fifty")]))
            .unwrap_err();
        assert_eq!(err.variable, "SERVICE_PORT");
        assert!(err.to_string().contains("fifty"));
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("SERVICE_HOST", "not-an-ip")]))
            .unwrap_err();
        assert_eq!(err.variable, "SERVICE_HOST");
    }
}
