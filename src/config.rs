//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Default prefix for client-to-server destinations.
pub const DEFAULT_APP_PREFIX: &str = "/app";

/// Default prefix for server-to-client destinations.
pub const DEFAULT_TOPIC_PREFIX: &str = "/topic";

/// Document `info` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: "WebSocket API Documentation".to_string(),
            version: "1.0.0".to_string(),
            description: "WebSocket API specification".to_string(),
        }
    }
}

/// Options for document generation.
///
/// Deserializes with defaults for every missing field, so a manifest may
/// carry any subset of these settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// When false, generation fails with `GenerateError::FeatureDisabled`.
    pub enabled: bool,
    /// `title`, `version` and `description`, written at the same level as
    /// the other settings.
    #[serde(flatten)]
    pub info: InfoConfig,
    /// Prepended to inbound route addresses to form channel keys.
    pub app_prefix: String,
    /// Prepended to response addresses to form channel keys.
    pub topic_prefix: String,
    /// WebSocket endpoint shown to readers of the document. Not used by generation.
    pub server_url: String,
    /// Skip inbound routes that declare no reply.
    pub require_reply: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            info: InfoConfig::default(),
            app_prefix: DEFAULT_APP_PREFIX.to_string(),
            topic_prefix: DEFAULT_TOPIC_PREFIX.to_string(),
            server_url: String::new(),
            require_reply: false,
        }
    }
}

impl DocsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = title.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = description.into();
        self
    }

    pub fn app_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.app_prefix = prefix.into();
        self
    }

    pub fn topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn require_reply(mut self, require: bool) -> Self {
        self.require_reply = require;
        self
    }

    /// Channel key for an inbound route address.
    pub fn inbound_key(&self, address: &str) -> String {
        format!("{}{}", self.app_prefix, address)
    }

    /// Channel key for a response address.
    pub fn outbound_key(&self, address: &str) -> String {
        format!("{}{}", self.topic_prefix, address)
    }
}
