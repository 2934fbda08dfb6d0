use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tvhook_rewrite::ClientOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rewrite: RewriteConfig,
    pub logging: LoggingConfig,
}

/// When the resolver calls the rewrite webhook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewritePolicy {
    /// Every item goes through the webhook; its own path is only the fallback
    #[default]
    Always,
    /// Items that already carry a path keep it without a webhook call
    WhenPathEmpty,
}

/// Rewrite resolver settings
///
/// Loaded once at startup and handed to the resolver; read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Webhook URL; empty means no rewriting happens
    pub rewrite_endpoint_url: String,
    pub policy: RewritePolicy,
    pub request_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// How long successful rewrites are reused (0 disables caching)
    pub cache_minutes: u64,
    pub cache_max_capacity: u64,
    pub enable_debug_logging: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            rewrite_endpoint_url: String::new(),
            policy: RewritePolicy::Always,
            request_timeout_seconds: 30,
            connect_timeout_seconds: 10,
            cache_minutes: 0,
            cache_max_capacity: 10_000,
            enable_debug_logging: false,
        }
    }
}

impl RewriteConfig {
    /// Create a config pointing at `endpoint` with all other settings defaulted
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            rewrite_endpoint_url: endpoint.into(),
            ..Self::default()
        }
    }

    /// Configured webhook URL, `None` when unset or blank
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        let endpoint = self.rewrite_endpoint_url.trim();
        (!endpoint.is_empty()).then_some(endpoint)
    }

    #[must_use]
    pub const fn client_options(&self) -> ClientOptions {
        ClientOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }

    /// Cache TTL, `None` when caching is disabled.
    ///
    /// Saturates at `Duration::MAX`; the resolver rejects anything above
    /// [`crate::cache::MAX_CACHE_TTL`].
    #[must_use]
    pub const fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_minutes == 0 {
            return None;
        }
        match self.cache_minutes.checked_mul(60) {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::MAX),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (TVHOOK_REWRITE__REWRITE_ENDPOINT_URL, etc.)
        builder = builder.add_source(
            Environment::with_prefix("TVHOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.rewrite.endpoint().is_none());
        assert_eq!(config.rewrite.policy, RewritePolicy::Always);
        assert_eq!(config.rewrite.request_timeout_seconds, 30);
        assert!(config.rewrite.cache_ttl().is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_blank_endpoint_is_unset() {
        let config = RewriteConfig::with_endpoint("   ");
        assert!(config.endpoint().is_none());

        let config = RewriteConfig::with_endpoint(" http://hook.local/rewrite ");
        assert_eq!(config.endpoint(), Some("http://hook.local/rewrite"));
    }

    #[test]
    fn test_client_options_and_cache_ttl() {
        let config = RewriteConfig {
            request_timeout_seconds: 5,
            connect_timeout_seconds: 2,
            cache_minutes: 60,
            ..RewriteConfig::default()
        };

        let options = config.client_options();
        assert_eq!(options.request_timeout, Duration::from_secs(5));
        assert_eq!(options.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_huge_cache_minutes_saturates() {
        let config = RewriteConfig {
            cache_minutes: u64::MAX / 2,
            ..RewriteConfig::default()
        };
        assert_eq!(config.cache_ttl(), Some(Duration::MAX));

        let config = RewriteConfig {
            cache_minutes: u64::MAX / 60,
            ..RewriteConfig::default()
        };
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(u64::MAX / 60 * 60)));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "rewrite:\n  rewrite_endpoint_url: http://hook.local/rewrite\n  policy: when_path_empty\n  cache_minutes: 15\nlogging:\n  format: json"
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.rewrite.endpoint(), Some("http://hook.local/rewrite"));
        assert_eq!(config.rewrite.policy, RewritePolicy::WhenPathEmpty);
        assert_eq!(config.rewrite.cache_minutes, 15);
        assert_eq!(config.rewrite.request_timeout_seconds, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load(Some("/nonexistent/tvhook.yaml")).unwrap();
        assert_eq!(config.rewrite.connect_timeout_seconds, 10);
    }
}
