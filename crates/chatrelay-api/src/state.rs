//! Application state wiring the services together.
//!
//! The relay and the chat services are generic over their ports; AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use chatrelay_core::chat::service::ChatService;
use chatrelay_core::relay::service::CompletionRelay;
use chatrelay_infra::config::{CONFIG_FILE, load_effective_config, resolve_data_dir};
use chatrelay_infra::graphql::GraphqlClient;
use chatrelay_infra::graphql::chat::GraphqlChatRepository;
use chatrelay_infra::llm::openrouter::OpenRouterProvider;
use chatrelay_infra::secret::EnvSecretProvider;
use chatrelay_types::config::AppConfig;

pub type ConcreteRelay = CompletionRelay<OpenRouterProvider>;
pub type ConcreteChatService = ChatService<GraphqlChatRepository>;

/// Configuration plus factories for the concrete services.
///
/// Nothing here touches the network until a service is used.
pub struct AppState {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    secrets: EnvSecretProvider,
}

impl AppState {
    /// Resolve the data directory and load the effective configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_effective_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), "Configuration loaded");

        Ok(Self {
            config,
            data_dir,
            secrets: EnvSecretProvider::new(),
        })
    }

    /// The config file under the data directory; it may not exist.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Completion relay with the API key from the configured env variable.
    pub fn relay(&self) -> ConcreteRelay {
        let upstream = &self.config.upstream;
        let provider =
            OpenRouterProvider::new(upstream.app_title.clone()).with_base_url(upstream.base_url.clone());
        CompletionRelay::new(provider, self.secrets.get(&upstream.api_key_env))
    }

    /// Repository for the configured data service.
    pub fn chat_repo(&self) -> anyhow::Result<Arc<GraphqlChatRepository>> {
        let url = self.config.data.graphql_url.clone().context(
            "no data service configured: set [data].graphql_url in config.toml or CHATRELAY_GRAPHQL_URL",
        )?;
        let token = self.secrets.get(&self.config.data.access_token_env);
        if token.is_none() {
            tracing::debug!(
                env = %self.config.data.access_token_env,
                "No access token set, sending unauthenticated requests"
            );
        }
        Ok(Arc::new(GraphqlChatRepository::new(GraphqlClient::new(url, token))))
    }

    pub fn chat_service(&self) -> anyhow::Result<ConcreteChatService> {
        Ok(ChatService::new(self.chat_repo()?))
    }

    /// Signed-in user id, if configured.
    pub fn user_id(&self) -> Option<&str> {
        self.config.data.user_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.config.client.reply_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.client.poll_interval_ms.max(100))
    }
}
