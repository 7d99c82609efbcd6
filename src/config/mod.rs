//! Configuration loaded from the environment (and a `.env` file when present).

use std::fmt;
use std::time::Duration;

use crate::error::{Result, SupportError};

/// Environment variables that must be set for the router to start.
pub const REQUIRED_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "AVIATION_API_KEY", "MONGODB_URI"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AVIATION_BASE_URL: &str = "https://api.aviationstack.com/v1";
pub const DEFAULT_AVIATION_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DATABASE: &str = "airline_customer_service";
pub const DEFAULT_COLLECTION: &str = "conversations";

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct SupportConfig {
    pub gemini_api_key: String,
    pub aviation_api_key: String,
    pub mongodb_uri: String,
    pub model: String,
    pub gemini_base_url: String,
    pub aviation_base_url: String,
    pub aviation_timeout: Duration,
    pub mongodb_database: String,
    pub mongodb_collection: String,
}

impl fmt::Debug for SupportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("aviation_api_key", &"<redacted>")
            .field("mongodb_uri", &"<redacted>")
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("aviation_base_url", &self.aviation_base_url)
            .field("aviation_timeout", &self.aviation_timeout)
            .field("mongodb_database", &self.mongodb_database)
            .field("mongodb_collection", &self.mongodb_collection)
            .finish()
    }
}

impl SupportConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Required keys that are missing or blank produce
    /// [`SupportError::MissingEnv`] naming the first absent variable, in the
    /// order of [`REQUIRED_ENV_VARS`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        for key in REQUIRED_ENV_VARS {
            if get(key).is_none() {
                return Err(SupportError::MissingEnv(key.to_string()));
            }
        }
        let required = |key: &str| get(key).ok_or_else(|| SupportError::MissingEnv(key.to_string()));

        let aviation_timeout = match get("AVIATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        SupportError::Configuration(format!(
                            "AVIATION_TIMEOUT_SECS must be a positive whole number of seconds, got '{raw}'"
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_AVIATION_TIMEOUT,
        };

        Ok(Self {
            gemini_api_key: required("GEMINI_API_KEY")?,
            aviation_api_key: required("AVIATION_API_KEY")?,
            mongodb_uri: required("MONGODB_URI")?,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            aviation_base_url: get("AVIATION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_AVIATION_BASE_URL.to_string()),
            aviation_timeout,
            mongodb_database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mongodb_collection: get("MONGODB_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        })
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

    const REQUIRED: [(&str, &str); 3] = [
        ("GEMINI_API_KEY", "gem-key"),
        ("AVIATION_API_KEY", "av-key"),
        ("MONGODB_URI", "mongodb://localhost:27017"),
    ];

    #[test]
    fn defaults_apply_when_only_required_keys_set() {
        let config = SupportConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.aviation_base_url, DEFAULT_AVIATION_BASE_URL);
        assert_eq!(config.aviation_timeout, Duration::from_secs(10));
        assert_eq!(config.mongodb_database, "airline_customer_service");
        assert_eq!(config.mongodb_collection, "conversations");
    }

    #[test]
    fn missing_required_key_is_named() {
        let config = SupportConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "gem-key"),
            ("MONGODB_URI", "mongodb://localhost"),
        ]));

        let err = config.unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: AVIATION_API_KEY");
    }

    #[test]
    fn blank_required_key_counts_as_missing() {
        let config = SupportConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "  "),
            ("AVIATION_API_KEY", "av-key"),
            ("MONGODB_URI", "mongodb://localhost"),
        ]));

        assert!(matches!(config, Err(SupportError::MissingEnv(key)) if key == "GEMINI_API_KEY"));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GEMINI_MODEL", "gemini-2.0-flash"));
        pairs.push(("AVIATION_TIMEOUT_SECS", "3"));
        pairs.push(("MONGODB_DATABASE", "support_test"));

        let config = SupportConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.aviation_timeout, Duration::from_secs(3));
        assert_eq!(config.mongodb_database, "support_test");
    }

    #[test]
    fn bad_timeout_is_a_configuration_error() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AVIATION_TIMEOUT_SECS", "soon"));

        let err = SupportConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, SupportError::Configuration(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AVIATION_TIMEOUT_SECS", "0"));

        let err = SupportConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, SupportError::Configuration(ref msg) if msg.contains("'0'")));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = SupportConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("gem-key"));
        assert!(!rendered.contains("av-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
