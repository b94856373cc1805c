//! Configuration loader for chatrelay.
//!
//! Reads `config.toml` from the data directory (`~/.chatrelay/` by default)
//! into [`AppConfig`], then applies environment overrides. Falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use chatrelay_types::config::AppConfig;

/// Environment variable that relocates the data directory.
pub const HOME_ENV: &str = "CHATRELAY_HOME";
pub const GRAPHQL_URL_ENV: &str = "CHATRELAY_GRAPHQL_URL";
pub const USER_ID_ENV: &str = "CHATRELAY_USER_ID";
pub const RELAY_URL_ENV: &str = "CHATRELAY_RELAY_URL";

pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory.
///
/// Priority:
/// 1. `CHATRELAY_HOME` environment variable
/// 2. `~/.chatrelay`
/// 3. `./.chatrelay` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatrelay");
    }

    PathBuf::from(".chatrelay")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Overlay `CHATRELAY_GRAPHQL_URL`, `CHATRELAY_USER_ID` and
/// `CHATRELAY_RELAY_URL` onto `config`. Blank values are ignored.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(GRAPHQL_URL_ENV) {
        config.data.graphql_url = Some(url);
    }
    if let Some(user_id) = get(USER_ID_ENV) {
        config.data.user_id = Some(user_id);
    }
    if let Some(url) = get(RELAY_URL_ENV) {
        config.client.relay_url = url;
    }
}

/// [`load_config`] followed by [`apply_env_overrides`] from the process environment.
pub async fn load_effective_config(data_dir: &Path) -> AppConfig {
    let mut config = load_config(data_dir).await;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
port = 8080

[data]
graphql_url = "https://example.hasura.app/v1/graphql"
user_id = "u1"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.data.graphql_url.as_deref(),
            Some("https://example.hasura.app/v1/graphql")
        );
        assert_eq!(config.data.user_id.as_deref(), Some("u1"));
        assert_eq!(config.upstream.api_key_env, "OPENROUTER_API_KEY");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (GRAPHQL_URL_ENV, "http://localhost:8080/v1/graphql"),
            (USER_ID_ENV, "u2"),
            (RELAY_URL_ENV, "http://relay.local/api/chat"),
        ]);
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.data.graphql_url.as_deref(),
            Some("http://localhost:8080/v1/graphql")
        );
        assert_eq!(config.data.user_id.as_deref(), Some("u2"));
        assert_eq!(config.client.relay_url, "http://relay.local/api/chat");
    }

    #[test]
    fn blank_env_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.data.user_id = Some("u1".to_string());
        apply_env_overrides(&mut config, |name| {
            (name == USER_ID_ENV).then(|| "  ".to_string())
        });
        assert_eq!(config.data.user_id.as_deref(), Some("u1"));
        assert_eq!(config.client.relay_url, "http://127.0.0.1:3000/api/chat");
    }

    #[test]
    fn resolve_data_dir_honors_env() {
        // SAFETY: only this test touches CHATRELAY_HOME.
        unsafe { std::env::set_var(HOME_ENV, "/tmp/test-chatrelay") };
        assert_eq!(resolve_data_dir(), PathBuf::from("/tmp/test-chatrelay"));
        // SAFETY: set above.
        unsafe { std::env::remove_var(HOME_ENV) };
    }
}
