//! GraphqlChatRepository -- [`ChatRepository`] over the managed GraphQL
//! data service.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use chatrelay_core::chat::repository::ChatRepository;
use chatrelay_types::chat::{Chat, Message, Sender};
use chatrelay_types::error::RepositoryError;

use super::GraphqlClient;
use super::documents::{
    CREATE_CHAT, DELETE_CHAT, GET_CHATS, GET_MESSAGES, INSERT_MESSAGE, UPDATE_CHAT_TITLE,
};

/// Accepts RFC 3339 and zone-less `timestamp` values (read as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

fn optional_timestamp<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}

#[derive(Debug, Deserialize)]
struct ChatRow {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(deserialize_with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ChatRow> for Chat {
    fn from(row: ChatRow) -> Self {
        Chat {
            id: row.id,
            title: row.title.unwrap_or_default(),
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageRow {
    id: String,
    #[serde(default)]
    chat_id: Option<String>,
    content: String,
    is_bot: bool,
    #[serde(deserialize_with = "timestamp")]
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self, chat_id: &str) -> Message {
        Message {
            id: self.id,
            chat_id: self.chat_id.unwrap_or_else(|| chat_id.to_string()),
            sender: Sender::from_is_bot(self.is_bot),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatsData {
    chats: Vec<ChatRow>,
}

#[derive(Debug, Deserialize)]
struct InsertChatData {
    insert_chats_one: Option<ChatRow>,
}

#[derive(Debug, Deserialize)]
struct UpdateChatData {
    update_chats_by_pk: Option<ChatRow>,
}

#[derive(Debug, Deserialize)]
struct DeleteChatData {
    delete_chats_by_pk: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct MessagesData {
    messages: Vec<MessageRow>,
}

#[derive(Debug, Deserialize)]
struct InsertMessageData {
    insert_messages_one: Option<MessageRow>,
}

/// Chat persistence backed by the GraphQL data service.
pub struct GraphqlChatRepository {
    client: GraphqlClient,
}

impl GraphqlChatRepository {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

impl ChatRepository for GraphqlChatRepository {
    async fn list_chats(&self, user_id: Option<&str>) -> Result<Vec<Chat>, RepositoryError> {
        let filter = match user_id {
            Some(id) => json!({ "user_id": { "_eq": id } }),
            None => json!({}),
        };
        let data: ChatsData = self
            .client
            .execute(&GET_CHATS, json!({ "where": filter }))
            .await?;
        Ok(data.chats.into_iter().map(Chat::from).collect())
    }

    async fn create_chat(&self, title: &str, user_id: Option<&str>) -> Result<Chat, RepositoryError> {
        let mut object = json!({ "title": title });
        if let Some(id) = user_id {
            object["user_id"] = json!(id);
        }
        let data: InsertChatData = self
            .client
            .execute(&CREATE_CHAT, json!({ "object": object }))
            .await?;
        data.insert_chats_one
            .map(Chat::from)
            .ok_or_else(|| RepositoryError::Decode("insert_chats_one returned null".to_string()))
    }

    async fn rename_chat(&self, chat_id: &str, title: &str) -> Result<Chat, RepositoryError> {
        let data: UpdateChatData = self
            .client
            .execute(&UPDATE_CHAT_TITLE, json!({ "id": chat_id, "title": title }))
            .await?;
        data.update_chats_by_pk
            .map(Chat::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<(), RepositoryError> {
        let data: DeleteChatData = self
            .client
            .execute(&DELETE_CHAT, json!({ "id": chat_id }))
            .await?;
        match data.delete_chats_by_pk {
            Some(Value::Null) | None => Err(RepositoryError::NotFound),
            Some(_) => Ok(()),
        }
    }

    async fn list_messages(&self, chat_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let data: MessagesData = self
            .client
            .execute(&GET_MESSAGES, json!({ "chatId": chat_id }))
            .await?;
        Ok(data
            .messages
            .into_iter()
            .map(|row| row.into_message(chat_id))
            .collect())
    }

    async fn insert_message(
        &self,
        chat_id: &str,
        sender: Sender,
        content: &str,
    ) -> Result<Message, RepositoryError> {
        let variables = json!({
            "chatId": chat_id,
            "content": content,
            "isBot": sender.is_bot(),
        });
        let data: InsertMessageData = self.client.execute(&INSERT_MESSAGE, variables).await?;
        data.insert_messages_one
            .map(|row| row.into_message(chat_id))
            .ok_or_else(|| RepositoryError::Decode("insert_messages_one returned null".to_string()))
    }
}
