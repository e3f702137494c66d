//! Client configuration.
//!
//! Defaults point at the public TLS endpoints. `ClientConfig::from_env`
//! layers `OPENLIBRARY_`-prefixed environment variables over the defaults,
//! e.g. `OPENLIBRARY_BASE_URL=http://127.0.0.1:3000`.

use std::time::Duration;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cover::DEFAULT_COVERS_URL;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and host of the API, without a trailing path.
    pub base_url: String,
    /// Scheme and host serving cover images.
    pub covers_url: String,
    /// Deadline applied to every request unless overridden per call.
    /// Must be non-zero.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Config pointing both hosts at `base_url`, as a mock server does.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            covers_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Env::prefixed("OPENLIBRARY_"))
    }

    /// Load from the environment. A zero timeout is rejected.
    pub fn from_env() -> Result<Self, ApiError> {
        let config: Self = Self::figment().extract()?;
        if config.timeout_secs == 0 {
            return Err(ApiError::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_use_tls() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://openlibrary.org");
        assert_eq!(config.covers_url, "https://covers.openlibrary.org");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENLIBRARY_BASE_URL", "http://127.0.0.1:3000");
            jail.set_env("OPENLIBRARY_TIMEOUT_SECS", "5");
            let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.base_url, "http://127.0.0.1:3000");
            assert_eq!(config.covers_url, "https://covers.openlibrary.org");
            assert_eq!(config.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn bad_env_value_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENLIBRARY_TIMEOUT_SECS", "soon");
            let err = ClientConfig::from_env().unwrap_err();
            assert!(matches!(err, ApiError::Config(_)), "{err:?}");
            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("OPENLIBRARY_TIMEOUT_SECS", "0");
            let err = ClientConfig::from_env().unwrap_err();
            assert!(matches!(err, ApiError::Config(ref msg) if msg.contains("timeout_secs")), "{err:?}");
            Ok(())
        });
    }
}
