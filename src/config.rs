//! Configuration types for comment-expander

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of IDs accepted by a single `api/info` request
pub const MAX_API_INFO_AMOUNT: usize = 100;

/// Maximum number of IDs accepted by a single `api/morechildren` request
pub const MAX_API_MORECHILDREN_AMOUNT: usize = 20;

/// Per-request capacity limits of the two expansion endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionLimits {
    /// Max IDs per bulk lookup (`api/info`) call (default: 100)
    #[serde(default = "default_bulk_lookup")]
    pub bulk_lookup: usize,

    /// Max IDs per deep expansion (`api/morechildren`) call (default: 20)
    #[serde(default = "default_more_children")]
    pub more_children: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            bulk_lookup: default_bulk_lookup(),
            more_children: default_more_children(),
        }
    }
}

/// HTTP client configuration
///
/// Every field has a default, so an empty JSON object is a valid config:
///
/// ```
/// use comment_expander::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.limits.more_children, 20);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (default: "https://oauth.reddit.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Endpoint capacity limits
    #[serde(default)]
    pub limits: ExpansionLimits,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            limits: ExpansionLimits::default(),
        }
    }
}

impl ClientConfig {
    /// Check that the configuration is usable.
    ///
    /// A zero capacity limit would make every expansion loop without progress,
    /// so it is rejected here rather than at request time.
    pub fn validate(&self) -> Result<()> {
        if self.limits.bulk_lookup == 0 {
            return Err(Error::Config {
                message: "bulk lookup limit must be at least 1".to_string(),
                key: Some("limits.bulk_lookup".to_string()),
            });
        }
        if self.limits.more_children == 0 {
            return Err(Error::Config {
                message: "more children limit must be at least 1".to_string(),
                key: Some("limits.more_children".to_string()),
            });
        }
        url::Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {}", self.base_url, e),
            key: Some("base_url".to_string()),
        })?;
        Ok(())
    }
}

fn default_bulk_lookup() -> usize {
    MAX_API_INFO_AMOUNT
}

fn default_more_children() -> usize {
    MAX_API_MORECHILDREN_AMOUNT
}

fn default_base_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_user_agent() -> String {
    concat!("comment-expander/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_all_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").expect("deserialize failed");

        assert_eq!(config.base_url, "https://oauth.reddit.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.limits.bulk_lookup, MAX_API_INFO_AMOUNT);
        assert_eq!(config.limits.more_children, MAX_API_MORECHILDREN_AMOUNT);
        assert!(config.user_agent.starts_with("comment-expander/"));
    }

    #[test]
    fn timeout_is_serialized_as_seconds() {
        let config = ClientConfig {
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };

        let value = serde_json::to_value(&config).expect("serialize failed");
        assert_eq!(value["timeout"], 5);

        let back: ClientConfig = serde_json::from_value(value).expect("deserialize failed");
        assert_eq!(back.timeout, Duration::from_secs(5));
    }

    #[test]
    fn partial_limits_keep_remaining_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"limits": {"more_children": 2}}"#).expect("deserialize");

        assert_eq!(config.limits.more_children, 2);
        assert_eq!(config.limits.bulk_lookup, MAX_API_INFO_AMOUNT);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let config = ClientConfig {
            limits: ExpansionLimits {
                bulk_lookup: 100,
                more_children: 0,
            },
            ..ClientConfig::default()
        };

        match config.validate() {
            Err(Error::Config { key, .. }) => {
                assert_eq!(key.as_deref(), Some("limits.more_children"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unparseable_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };

        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("base_url")),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
