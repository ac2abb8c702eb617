use std::{env, fmt, net::SocketAddr, time::Duration};

use thiserror::Error;

pub const DEFAULT_UPSTREAM_URL: &str = "https://rest.db.ripe.net/search.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub upstream_url: String,
    pub upstream_credential: String,
    pub request_timeout_seconds: u64,
    pub bind_addr: String,
    pub bind_port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RIPE_UPSTREAM_CREDENTIAL is required and must not be empty")]
    MissingCredential,
    #[error("RIPE_UPSTREAM_URL must be an absolute http(s) URL")]
    InvalidUpstreamUrl,
    #[error("RIPE_REQUEST_TIMEOUT_SECONDS must be a positive integer")]
    InvalidTimeout,
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("upstream_url", &self.upstream_url)
            .field("upstream_credential", &"<redacted>")
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("bind_addr", &self.bind_addr)
            .field("bind_port", &self.bind_port)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let upstream_credential =
            read("RIPE_UPSTREAM_CREDENTIAL").ok_or(ConfigError::MissingCredential)?;

        let upstream_url =
            read("RIPE_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        if !(upstream_url.starts_with("https://") || upstream_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUpstreamUrl);
        }

        let request_timeout_seconds = read("RIPE_REQUEST_TIMEOUT_SECONDS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|seconds| *seconds > 0)
                    .ok_or(ConfigError::InvalidTimeout)
            })
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS);

        let bind_addr = read("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let bind_port = read("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8000);

        let config = Self {
            upstream_url,
            upstream_credential,
            request_timeout_seconds,
            bind_addr,
            bind_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config =
            load(&[("RIPE_UPSTREAM_CREDENTIAL", "Basic abc")]).expect("config should parse");
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream_credential, "Basic abc");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.bind_port, 8000);
    }

    #[test]
    fn missing_credential_fails() {
        let err = load(&[]).expect_err("expected missing credential error");
        assert!(matches!(err, ConfigError::MissingCredential));

        let err = load(&[("RIPE_UPSTREAM_CREDENTIAL", "   ")])
            .expect_err("blank credential must be rejected");
        assert!(matches!(err, ConfigError::MissingCredential));
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("RIPE_UPSTREAM_CREDENTIAL", "Basic abc"),
            ("RIPE_UPSTREAM_URL", "http://127.0.0.1:9999/search.json"),
            ("RIPE_REQUEST_TIMEOUT_SECONDS", "5"),
            ("BIND_ADDR", "0.0.0.0"),
            ("BIND_PORT", "9000"),
        ])
        .expect("config should parse");

        assert_eq!(config.upstream_url, "http://127.0.0.1:9999/search.json");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "0.0.0.0:9000".parse().expect("socket literal")
        );
    }

    #[test]
    fn zero_timeout_fails() {
        let err = load(&[
            ("RIPE_UPSTREAM_CREDENTIAL", "Basic abc"),
            ("RIPE_REQUEST_TIMEOUT_SECONDS", "0"),
        ])
        .expect_err("expected invalid timeout");
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn invalid_port_fails() {
        let err = load(&[("RIPE_UPSTREAM_CREDENTIAL", "Basic abc"), ("BIND_PORT", "70000")])
            .expect_err("expected invalid port");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn non_http_upstream_url_fails() {
        let err = load(&[
            ("RIPE_UPSTREAM_CREDENTIAL", "Basic abc"),
            ("RIPE_UPSTREAM_URL", "ftp://rest.db.ripe.net"),
        ])
        .expect_err("expected invalid upstream url");
        assert!(matches!(err, ConfigError::InvalidUpstreamUrl));
    }

    #[test]
    fn debug_output_hides_credential() {
        let config = load(&[("RIPE_UPSTREAM_CREDENTIAL", "Basic super-secret")])
            .expect("config should parse");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
