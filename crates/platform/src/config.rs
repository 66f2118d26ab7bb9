//! Construction-time configuration recognized by the platform layer.

use crate::{PlatformError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Pure transform applied to the reported page URL.
pub type UrlTransformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Token selecting session-scoped storage, compared case-insensitively.
const SESSION_STORAGE_TOKEN: &str = "SESSIONSTORAGE";

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformConfig {
    /// `"SESSIONSTORAGE"` selects session storage; anything else is durable.
    pub persistence_scope: Option<String>,
    /// Older SDK option that doubled as the scope token. Often a map of flag
    /// values instead, in which case it says nothing about storage.
    #[serde(rename = "bootstrap")]
    pub legacy_bootstrap: Option<Value>,
    /// Request the body-bearing verb for the per-user stream.
    pub use_report: bool,
    #[serde(skip)]
    pub event_url_transformer: Option<UrlTransformer>,
}

impl PlatformConfig {
    /// Parse the serializable part of the configuration from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| PlatformError::Config(e.to_string()))
    }

    pub fn with_persistence_scope(mut self, scope: impl Into<String>) -> Self {
        self.persistence_scope = Some(scope.into());
        self
    }

    pub fn with_use_report(mut self, use_report: bool) -> Self {
        self.use_report = use_report;
        self
    }

    pub fn with_event_url_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.event_url_transformer = Some(Arc::new(transformer));
        self
    }

    /// `persistenceScope` wins; a string `bootstrap` is the fallback.
    pub fn persistence(&self) -> PersistenceScope {
        let legacy = match &self.legacy_bootstrap {
            Some(Value::String(token)) => Some(token.as_str()),
            _ => None,
        };
        PersistenceScope::from_option(self.persistence_scope.as_deref().or(legacy))
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("persistence_scope", &self.persistence_scope)
            .field("legacy_bootstrap", &self.legacy_bootstrap)
            .field("use_report", &self.use_report)
            .field("event_url_transformer", &self.event_url_transformer.is_some())
            .finish()
    }
}

/// Which storage area backs the persisted flag cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceScope {
    Session,
    #[default]
    Durable,
}

impl PersistenceScope {
    pub fn from_str(value: &str) -> Self {
        if value.eq_ignore_ascii_case(SESSION_STORAGE_TOKEN) {
            Self::Session
        } else {
            Self::Durable
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::from_str).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::Durable => "durable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_is_case_insensitive() {
        assert_eq!(PersistenceScope::from_str("SESSIONSTORAGE"), PersistenceScope::Session);
        assert_eq!(PersistenceScope::from_str("sessionStorage"), PersistenceScope::Session);
        assert_eq!(PersistenceScope::from_str("localstorage"), PersistenceScope::Durable);
        assert_eq!(PersistenceScope::from_str(""), PersistenceScope::Durable);
        assert_eq!(PersistenceScope::from_option(None), PersistenceScope::Durable);
    }

    #[test]
    fn parses_camel_case_json() {
        let config =
            PlatformConfig::from_json(r#"{"persistenceScope":"sessionstorage","useReport":true}"#)
                .unwrap();
        assert_eq!(config.persistence(), PersistenceScope::Session);
        assert!(config.use_report);
        assert!(config.event_url_transformer.is_none());
    }

    #[test]
    fn accepts_legacy_bootstrap_key() {
        let config = PlatformConfig::from_json(r#"{"bootstrap":"SESSIONSTORAGE"}"#).unwrap();
        assert_eq!(config.persistence(), PersistenceScope::Session);
        assert!(!config.use_report);
    }

    #[test]
    fn flag_map_bootstrap_keeps_other_options() {
        let config =
            PlatformConfig::from_json(r#"{"bootstrap":{"my-flag":true},"useReport":true}"#)
                .unwrap();
        assert!(config.use_report);
        assert_eq!(config.persistence(), PersistenceScope::Durable);
    }

    #[test]
    fn persistence_scope_wins_over_bootstrap() {
        let config = PlatformConfig::from_json(
            r#"{"bootstrap":"localstorage","persistenceScope":"SESSIONSTORAGE"}"#,
        )
        .unwrap();
        assert_eq!(config.persistence(), PersistenceScope::Session);

        let config = PlatformConfig::from_json(
            r#"{"bootstrap":"SESSIONSTORAGE","persistenceScope":"localstorage"}"#,
        )
        .unwrap();
        assert_eq!(config.persistence(), PersistenceScope::Durable);
    }

    #[test]
    fn non_string_bootstrap_falls_back_to_durable() {
        for raw in [r#"{"bootstrap":null}"#, r#"{"bootstrap":1}"#, r#"{"bootstrap":["x"]}"#] {
            let config = PlatformConfig::from_json(raw).unwrap();
            assert_eq!(config.persistence(), PersistenceScope::Durable, "{raw}");
        }
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = PlatformConfig::from_json("{}").unwrap();
        assert_eq!(config.persistence(), PersistenceScope::Durable);
        assert!(!config.use_report);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PlatformConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }
}
