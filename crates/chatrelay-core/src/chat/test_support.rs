//! In-memory `ChatRepository` shared by core unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use chatrelay_types::chat::{Chat, Message, Sender};
use chatrelay_types::error::RepositoryError;

use crate::chat::repository::ChatRepository;

#[derive(Default)]
struct Store {
    chats: Vec<Chat>,
    messages: Vec<Message>,
}

#[derive(Default)]
pub(crate) struct InMemoryChatRepository {
    store: Mutex<Store>,
    pub fail_user_inserts: AtomicBool,
    pub fail_bot_inserts: AtomicBool,
    pub fail_lists: AtomicBool,
    pub list_calls: AtomicUsize,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(self, id: &str, title: &str) -> Self {
        self.store.lock().unwrap().chats.push(Chat {
            id: id.to_string(),
            title: title.to_string(),
            user_id: Some("u1".to_string()),
            created_at: Utc::now(),
            updated_at: None,
        });
        self
    }

    pub fn messages(&self, chat_id: &str) -> Vec<Message> {
        self.store
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn chat(&self, chat_id: &str) -> Option<Chat> {
        self.store
            .lock()
            .unwrap()
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .cloned()
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn list_chats(&self, user_id: Option<&str>) -> Result<Vec<Chat>, RepositoryError> {
        let store = self.store.lock().unwrap();
        let mut chats: Vec<Chat> = store
            .chats
            .iter()
            .filter(|c| user_id.is_none() || c.user_id.as_deref() == user_id)
            .cloned()
            .collect();
        chats.sort_by_key(|c| std::cmp::Reverse(c.last_activity()));
        Ok(chats)
    }

    async fn create_chat(&self, title: &str, user_id: Option<&str>) -> Result<Chat, RepositoryError> {
        let now = Utc::now();
        let chat = Chat {
            id: Uuid::now_v7().to_string(),
            title: title.to_string(),
            user_id: user_id.map(str::to_string),
            created_at: now,
            updated_at: Some(now),
        };
        self.store.lock().unwrap().chats.push(chat.clone());
        Ok(chat)
    }

    async fn rename_chat(&self, chat_id: &str, title: &str) -> Result<Chat, RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let chat = store
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or(RepositoryError::NotFound)?;
        chat.title = title.to_string();
        chat.updated_at = Some(Utc::now());
        Ok(chat.clone())
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().unwrap();
        let before = store.chats.len();
        store.chats.retain(|c| c.id != chat_id);
        if store.chats.len() == before {
            return Err(RepositoryError::NotFound);
        }
        store.messages.retain(|m| m.chat_id != chat_id);
        Ok(())
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, RepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport("offline".to_string()));
        }
        Ok(self.messages(chat_id))
    }

    async fn insert_message(
        &self,
        chat_id: &str,
        sender: Sender,
        content: &str,
    ) -> Result<Message, RepositoryError> {
        let failing = match sender {
            Sender::User => &self.fail_user_inserts,
            Sender::Bot => &self.fail_bot_inserts,
        };
        if failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::GraphQl("insert rejected".to_string()));
        }
        let message = Message {
            id: Uuid::now_v7().to_string(),
            chat_id: chat_id.to_string(),
            sender,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.store.lock().unwrap().messages.push(message.clone());
        Ok(message)
    }
}
