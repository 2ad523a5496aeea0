//! Server configuration loaded from environment variables.
//!
//! Every setting has a default so the board starts with zero configuration.
//! `RUST_LOG` is read by tracing-subscriber directly and is not stored here.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Result, anyhow};
use chatboard_store::IdScheme;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Env: `CHATBOARD_HOST` + `CHATBOARD_PORT`
    /// Default: `0.0.0.0:4001`
    pub http_addr: SocketAddr,

    /// Prefix for the message routes. `/` or empty mounts them at the root.
    /// Env: `CHATBOARD_BASE_PATH`
    /// Default: `/api/v1`
    pub base_path: String,

    /// How long in-flight requests may run after a shutdown signal.
    /// Env: `CHATBOARD_SHUTDOWN_GRACE_SECS`
    /// Default: 5 seconds
    pub shutdown_grace: Duration,

    /// Env: `CHATBOARD_ID_SCHEME` (`counter` or `length`)
    /// Default: `counter`
    pub id_scheme: IdScheme,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 4001).into(),
            base_path: "/api/v1".to_string(),
            shutdown_grace: Duration::from_secs(5),
            id_scheme: IdScheme::Counter,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key -> value source, falling back to defaults
    /// for unset keys. Set but unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let host = lookup("CHATBOARD_HOST").unwrap_or_else(|| config.http_addr.ip().to_string());
        let port: u16 = match lookup("CHATBOARD_PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow!("Invalid CHATBOARD_PORT '{}': {}", port, e))?,
            None => config.http_addr.port(),
        };
        config.http_addr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| anyhow!("Invalid CHATBOARD_HOST '{}': {}", host, e))?;

        if let Some(base_path) = lookup("CHATBOARD_BASE_PATH") {
            config.base_path = base_path;
        }

        if let Some(secs) = lookup("CHATBOARD_SHUTDOWN_GRACE_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow!("Invalid CHATBOARD_SHUTDOWN_GRACE_SECS '{}': {}", secs, e))?;
            config.shutdown_grace = Duration::from_secs(secs);
        }

        if let Some(scheme) = lookup("CHATBOARD_ID_SCHEME") {
            config.id_scheme = scheme
                .parse()
                .map_err(|e| anyhow!("Invalid CHATBOARD_ID_SCHEME: {}", e))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.http_addr, ([0, 0, 0, 0], 4001).into());
        assert_eq!(config.base_path, "/api/v1");
        assert_eq!(config.shutdown_grace, Duration::from_secs(5));
        assert_eq!(config.id_scheme, IdScheme::Counter);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CHATBOARD_HOST", "127.0.0.1"),
            ("CHATBOARD_PORT", "8080"),
            ("CHATBOARD_BASE_PATH", "/"),
            ("CHATBOARD_SHUTDOWN_GRACE_SECS", "10"),
            ("CHATBOARD_ID_SCHEME", "length"),
        ])
        .unwrap();
        assert_eq!(config.http_addr, ([127, 0, 0, 1], 8080).into());
        assert_eq!(config.base_path, "/");
        assert_eq!(config.shutdown_grace, Duration::from_secs(10));
        assert_eq!(config.id_scheme, IdScheme::Length);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = config_from(&[("CHATBOARD_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("CHATBOARD_PORT"));

        assert!(config_from(&[("CHATBOARD_HOST", "no host here")]).is_err());
        assert!(config_from(&[("CHATBOARD_SHUTDOWN_GRACE_SECS", "-1")]).is_err());
        assert!(config_from(&[("CHATBOARD_ID_SCHEME", "uuid")]).is_err());
    }
}
