//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Serialized classifier artifact
    pub model_path: PathBuf,

    /// Append-only prediction log (JSONL)
    pub logs_output_path: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Diagnostic log format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("data/news_classifier.json"),
            logs_output_path: PathBuf::from("data/logs.out"),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_format: LogFormat::Text,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            logs_output_path: lookup("LOGS_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.logs_output_path),

            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Socket address to bind the HTTP listener to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.model_path, PathBuf::from("data/news_classifier.json"));
        assert_eq!(config.logs_output_path, PathBuf::from("data/logs.out"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MODEL_PATH", "/models/clf.json"),
            ("LOGS_OUTPUT_PATH", "/var/log/predictions.jsonl"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
        ]));

        assert_eq!(config.model_path, PathBuf::from("/models/clf.json"));
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "not-a-port"), ("HOST", "???")]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
