//! SendOrchestrator -- the three-step send sequence.
//!
//! 1. persist the user's message
//! 2. call the completion relay
//! 3. persist the bot's message (reply, relay error text, or a fixed
//!    connectivity apology)
//!
//! Steps run strictly in order. Concurrent `send` calls are not
//! coordinated; their bot messages may land out of request order.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use chatrelay_types::chat::{Message, Sender};
use chatrelay_types::error::SendError;
use chatrelay_types::relay::{RelayOutcome, RelayRequest};

use crate::chat::repository::ChatRepository;
use crate::send::bus::SendEventBus;
use crate::send::client::RelayClient;
use crate::send::state::{SendEvent, SendState};

/// Bot message persisted when the relay could not be reached at all.
pub const CONNECTIVITY_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Where the bot message content came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplySource {
    /// Generated reply; `model` is the relay's label.
    Relay { model: String },
    /// The relay answered with a classified error; its message was stored.
    RelayError { status: u16 },
    /// The relay call itself failed; [`CONNECTIVITY_APOLOGY`] was stored.
    Fallback,
}

/// Result of a completed send.
#[derive(Debug, Clone)]
pub struct SendReport {
    pub user_message: Message,
    pub bot_message: Message,
    pub source: ReplySource,
}

/// Drives one send at a time per call; holds no per-send state itself.
pub struct SendOrchestrator<R: ChatRepository, C: RelayClient> {
    repo: Arc<R>,
    relay: C,
    bus: SendEventBus,
    reply_delay: Duration,
}

impl<R: ChatRepository, C: RelayClient> SendOrchestrator<R, C> {
    pub fn new(repo: Arc<R>, relay: C, bus: SendEventBus) -> Self {
        Self {
            repo,
            relay,
            bus,
            reply_delay: Duration::ZERO,
        }
    }

    /// Pause inserted before the bot message is saved (pacing only).
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn bus(&self) -> &SendEventBus {
        &self.bus
    }

    pub fn relay(&self) -> &C {
        &self.relay
    }

    /// Move `current` to `state` and publish it.
    fn enter(&self, chat_id: &str, current: &mut SendState, state: SendState) {
        debug_assert!(
            current.can_transition_to(state),
            "illegal send transition {current} -> {state}"
        );
        *current = state;
        debug!(chat_id = %chat_id, state = %state, "Send state");
        self.bus.publish(SendEvent::StateChanged {
            chat_id: chat_id.to_string(),
            state,
        });
    }

    fn refresh(&self, chat_id: &str) {
        self.bus.publish(SendEvent::Refresh {
            chat_id: chat_id.to_string(),
        });
    }

    /// Run the send sequence for `text` in `chat_id`.
    pub async fn send(&self, chat_id: &str, text: &str) -> Result<SendReport, SendError> {
        let content = text.trim();
        if content.is_empty() || chat_id.trim().is_empty() {
            return Err(SendError::EmptyInput);
        }
        let mut current = SendState::Idle;

        self.enter(chat_id, &mut current, SendState::SendingUser);
        let user_message = match self.repo.insert_message(chat_id, Sender::User, content).await {
            Ok(message) => message,
            Err(source) => {
                warn!(chat_id = %chat_id, error = %source, "Failed to save user message");
                self.enter(chat_id, &mut current, SendState::Failed);
                return Err(SendError::UserMessageFailed {
                    restored_input: content.to_string(),
                    source,
                });
            }
        };
        self.refresh(chat_id);

        self.enter(chat_id, &mut current, SendState::AwaitingReply);
        let request = RelayRequest {
            message: content.to_string(),
            chat_id: chat_id.to_string(),
        };
        let (reply, source) = match self.relay.send(&request).await {
            Ok(RelayOutcome::Reply { response, model }) => (response, ReplySource::Relay { model }),
            Ok(RelayOutcome::Rejected { status, error }) => {
                warn!(chat_id = %chat_id, status, "Relay returned an error");
                (error, ReplySource::RelayError { status })
            }
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Relay unreachable, storing fallback reply");
                (CONNECTIVITY_APOLOGY.to_string(), ReplySource::Fallback)
            }
        };

        self.enter(chat_id, &mut current, SendState::SendingBot);
        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }
        let bot_message = match self.repo.insert_message(chat_id, Sender::Bot, &reply).await {
            Ok(message) => message,
            Err(source) => {
                warn!(chat_id = %chat_id, error = %source, "Failed to save bot message");
                self.enter(chat_id, &mut current, SendState::Failed);
                return Err(SendError::BotMessageFailed {
                    user_message: Box::new(user_message),
                    source,
                });
            }
        };
        self.refresh(chat_id);
        self.enter(chat_id, &mut current, SendState::Done);

        info!(chat_id = %chat_id, source = ?source, "Message exchange complete");
        Ok(SendReport {
            user_message,
            bot_message,
            source,
        })
    }
}
