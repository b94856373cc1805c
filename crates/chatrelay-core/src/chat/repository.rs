//! ChatRepository trait definition.
//!
//! The operations the managed data service must provide. Storage,
//! authorization and cascading deletes all happen on the service side.

use chatrelay_types::chat::{Chat, Message, Sender};
use chatrelay_types::error::RepositoryError;

/// Repository trait for chat and message persistence.
///
/// Implementations live in chatrelay-infra (e.g., `GraphqlChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// List chats owned by `user_id`, most recently updated first.
    fn list_chats(
        &self,
        user_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Create a chat with the given title.
    fn create_chat(
        &self,
        title: &str,
        user_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Change a chat's title and bump its `updated_at`.
    fn rename_chat(
        &self,
        chat_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Delete a chat. The service removes its messages with it.
    fn delete_chat(
        &self,
        chat_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Messages of a chat ordered by `created_at` ASC.
    fn list_messages(
        &self,
        chat_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Store one message.
    fn insert_message(
        &self,
        chat_id: &str,
        sender: Sender,
        content: &str,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;
}
