//! Configuration types for chatrelay.
//!
//! `AppConfig` is the top-level `config.toml`. Every field has a default so
//! an empty or missing file yields a working local setup. Secrets are never
//! stored here -- only the names of the environment variables holding them.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Relay HTTP server bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Completion API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// Sent as the `X-Title` header so the upstream can attribute traffic.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Environment variable holding the completion API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_upstream_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_app_title() -> String {
    "AI Chatbot App".to_string()
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            app_title: default_app_title(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Managed GraphQL data service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// GraphQL HTTP endpoint. Required by commands that touch chats.
    #[serde(default)]
    pub graphql_url: Option<String>,
    /// Environment variable holding the access token issued by the auth provider.
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    /// Signed-in user id (chat owner).
    #[serde(default)]
    pub user_id: Option<String>,
}

fn default_access_token_env() -> String {
    "CHATRELAY_ACCESS_TOKEN".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            graphql_url: None,
            access_token_env: default_access_token_env(),
            user_id: None,
        }
    }
}

/// Client-side send orchestration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    /// Pause before the bot message is saved (pacing only).
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Message list re-fetch interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_relay_url() -> String {
    "http://127.0.0.1:3000/api/chat".to_string()
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_poll_interval_ms() -> u64 {
    3_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            reply_delay_ms: default_reply_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.upstream.api_key_env, "OPENROUTER_API_KEY");
        assert!(config.data.graphql_url.is_none());
        assert_eq!(config.client.reply_delay_ms, 500);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[data]
graphql_url = "https://example.graphql.eu-central-1.nhost.run/v1"
user_id = "u-1"

[client]
poll_interval_ms = 1000
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.user_id.as_deref(), Some("u-1"));
        assert_eq!(config.data.access_token_env, "CHATRELAY_ACCESS_TOKEN");
        assert_eq!(config.client.poll_interval_ms, 1000);
        assert_eq!(config.client.reply_delay_ms, 500);
    }
}
