//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use taqsym_infra::EndpointConfig;

/// How the gateway reaches a backend. Exactly one per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Grpc,
    Http,
}

impl FromStr for Transport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grpc" => Ok(Transport::Grpc),
            "http" => Ok(Transport::Http),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Grpc => f.write_str("grpc"),
            Transport::Http => f.write_str("http"),
        }
    }
}

/// One backend: its transport and endpoint.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub transport: Transport,
    pub endpoint: EndpointConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}, expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub identity: BackendConfig,
    pub work_items: BackendConfig,
    pub shutdown_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let call_timeout = Duration::from_millis(parse(&lookup, "BACKEND_TIMEOUT_MS", 5000, "milliseconds")?);
        let connect_timeout =
            Duration::from_millis(parse(&lookup, "BACKEND_CONNECT_TIMEOUT_MS", 2000, "milliseconds")?);

        let backend = |url_var: &'static str,
                       default_url: &str,
                       transport_var: &'static str|
         -> Result<BackendConfig, ConfigError> {
            let url = lookup(url_var).unwrap_or_else(|| default_url.to_string());
            Ok(BackendConfig {
                transport: parse(&lookup, transport_var, Transport::Grpc, "grpc or http")?,
                endpoint: EndpointConfig::new(url)
                    .with_call_timeout(call_timeout)
                    .with_connect_timeout(connect_timeout),
            })
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse(&lookup, "PORT", 8080, "a port number")?,
            identity: backend(
                "IDENTITY_BACKEND_URL",
                "http://user-service:50051",
                "IDENTITY_BACKEND_TRANSPORT",
            )?,
            work_items: backend(
                "WORK_ITEM_BACKEND_URL",
                "http://task-service:50051",
                "WORK_ITEM_BACKEND_TRANSPORT",
            )?,
            shutdown_timeout_secs: parse(&lookup, "SHUTDOWN_TIMEOUT_SECS", 5, "seconds")?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.identity.transport, Transport::Grpc);
        assert_eq!(config.identity.endpoint.url, "http://user-service:50051");
        assert_eq!(config.work_items.endpoint.url, "http://task-service:50051");
        assert_eq!(config.identity.endpoint.call_timeout, Duration::from_secs(5));
        assert_eq!(config.shutdown_timeout_secs, 5);
    }

    #[test]
    fn test_transport_per_backend() {
        let config = load(&[
            ("WORK_ITEM_BACKEND_TRANSPORT", "HTTP"),
            ("WORK_ITEM_BACKEND_URL", "http://tasks.internal"),
            ("BACKEND_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.identity.transport, Transport::Grpc);
        assert_eq!(config.work_items.transport, Transport::Http);
        assert_eq!(config.work_items.endpoint.url, "http://tasks.internal");
        assert_eq!(config.work_items.endpoint.call_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = load(&[("IDENTITY_BACKEND_TRANSPORT", "soap")]).unwrap_err();
        assert!(err.to_string().contains("IDENTITY_BACKEND_TRANSPORT"));

        assert!(load(&[("PORT", "http")]).is_err());
    }
}
