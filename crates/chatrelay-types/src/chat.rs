//! Chat and message types for chatrelay.
//!
//! The managed data service owns storage for both entities; these types
//! are the in-process view of its rows. Identifiers are opaque strings
//! assigned by the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Title shown (and stored on rename) when a chat has no usable title.
pub const UNTITLED_CHAT_TITLE: &str = "Untitled Chat";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// The data service stores the sender as an `is_bot` flag.
    pub fn from_is_bot(is_bot: bool) -> Self {
        if is_bot { Sender::Bot } else { Sender::User }
    }

    pub fn is_bot(self) -> bool {
        matches!(self, Sender::Bot)
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A conversation thread owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    /// Owner, set at creation. Absent when the service does not return it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Chat {
    /// Title for display; blank titles render as [`UNTITLED_CHAT_TITLE`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_CHAT_TITLE
        } else {
            &self.title
        }
    }

    /// Most recent activity timestamp (falls back to creation time).
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// A single message within a chat.
///
/// Messages are never edited; a chat's messages read in `created_at` order
/// reconstruct the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Sender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
