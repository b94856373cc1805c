//! Chat service for the conversation list.
//!
//! Wraps the `ChatRepository` with the list-level rules: only a signed-in
//! user can create chats, new chats get a time-stamped default title, and
//! blank renames become "Untitled Chat".

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use chatrelay_types::chat::{Chat, Message, UNTITLED_CHAT_TITLE};
use chatrelay_types::error::{ChatServiceError, RepositoryError};

use crate::chat::repository::ChatRepository;

/// Orchestrates chat list operations over a shared repository.
pub struct ChatService<R: ChatRepository> {
    repo: Arc<R>,
}

impl<R: ChatRepository> ChatService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    /// Default title for a freshly created chat, e.g. "New Chat 3:04:05 PM".
    pub fn default_title() -> String {
        format!("New Chat {}", Local::now().format("%-I:%M:%S %p"))
    }

    /// Normalize a user-entered title.
    pub fn normalize_title(title: &str) -> String {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            UNTITLED_CHAT_TITLE.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub async fn list_chats(&self, user_id: Option<&str>) -> Result<Vec<Chat>, RepositoryError> {
        self.repo.list_chats(user_id).await
    }

    /// Create a chat owned by `user_id`.
    pub async fn create_chat(&self, user_id: Option<&str>) -> Result<Chat, ChatServiceError> {
        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            return Err(ChatServiceError::NotSignedIn);
        };
        let chat = self
            .repo
            .create_chat(&Self::default_title(), Some(user_id))
            .await?;
        info!(chat_id = %chat.id, "Chat created");
        Ok(chat)
    }

    pub async fn rename_chat(&self, chat_id: &str, title: &str) -> Result<Chat, RepositoryError> {
        let chat = self
            .repo
            .rename_chat(chat_id, &Self::normalize_title(title))
            .await?;
        info!(chat_id = %chat_id, "Chat renamed");
        Ok(chat)
    }

    /// Delete a chat and, through the data service, all of its messages.
    pub async fn delete_chat(&self, chat_id: &str) -> Result<(), RepositoryError> {
        self.repo.delete_chat(chat_id).await?;
        info!(chat_id = %chat_id, "Chat deleted");
        Ok(())
    }

    pub async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, RepositoryError> {
        self.repo.list_messages(chat_id).await
    }
}
