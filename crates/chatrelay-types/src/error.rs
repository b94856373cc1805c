use thiserror::Error;

use crate::chat::Message;

/// Errors from the chat data service (used by the repository port in chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("data service unreachable: {0}")]
    Transport(String),

    #[error("graphql error: {0}")]
    GraphQl(String),

    #[error("not authorized by the data service")]
    Unauthorized,

    #[error("entity not found")]
    NotFound,

    #[error("could not decode data service response: {0}")]
    Decode(String),
}

/// Errors from chat list operations.
#[derive(Debug, Error)]
pub enum ChatServiceError {
    #[error("you must be signed in to create a chat")]
    NotSignedIn,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the client-side send sequence.
///
/// A failed relay call is never an error here: it produces a fallback bot
/// message instead. Only persistence failures surface.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("nothing to send")]
    EmptyInput,

    /// The user's message was not saved; nothing else happened.
    /// `restored_input` holds the text for resubmission.
    #[error("failed to save your message: {source}")]
    UserMessageFailed {
        restored_input: String,
        #[source]
        source: RepositoryError,
    },

    /// The user's message is saved but the bot reply could not be stored.
    #[error("failed to save the bot reply: {source}")]
    BotMessageFailed {
        user_message: Box<Message>,
        #[source]
        source: RepositoryError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::GraphQl("field 'chats' not found".to_string());
        assert_eq!(err.to_string(), "graphql error: field 'chats' not found");
    }

    #[test]
    fn test_chat_service_error_wraps_repository() {
        let err: ChatServiceError = RepositoryError::NotFound.into();
        assert_eq!(err.to_string(), "entity not found");
    }

    #[test]
    fn test_send_error_keeps_input() {
        let err = SendError::UserMessageFailed {
            restored_input: "test".to_string(),
            source: RepositoryError::Unauthorized,
        };
        assert!(err.to_string().starts_with("failed to save your message"));
        match err {
            SendError::UserMessageFailed { restored_input, .. } => assert_eq!(restored_input, "test"),
            _ => unreachable!(),
        }
    }
}
