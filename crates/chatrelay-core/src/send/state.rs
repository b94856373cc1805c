//! Send sequence states and the events published while a send runs.
//!
//! ```text
//! Idle -> SendingUser -> AwaitingReply -> SendingBot -> Done
//!              |                              |
//!              +-----------> Failed <---------+
//! ```

use std::fmt;

/// Observable stage of one send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    /// Persisting the user's message.
    SendingUser,
    /// Waiting on the completion relay.
    AwaitingReply,
    /// Persisting the bot's message.
    SendingBot,
    Done,
    Failed,
}

impl SendState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SendState::Done | SendState::Failed)
    }

    /// Whether the input should be disabled while in this state.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            SendState::SendingUser | SendState::AwaitingReply | SendState::SendingBot
        )
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: SendState) -> bool {
        use SendState::*;
        matches!(
            (self, next),
            (Idle, SendingUser)
                | (SendingUser, AwaitingReply)
                | (SendingUser, Failed)
                | (AwaitingReply, SendingBot)
                | (SendingBot, Done)
                | (SendingBot, Failed)
        )
    }
}

impl fmt::Display for SendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendState::Idle => write!(f, "idle"),
            SendState::SendingUser => write!(f, "sending_user"),
            SendState::AwaitingReply => write!(f, "awaiting_reply"),
            SendState::SendingBot => write!(f, "sending_bot"),
            SendState::Done => write!(f, "done"),
            SendState::Failed => write!(f, "failed"),
        }
    }
}

/// Event published on the [`super::bus::SendEventBus`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendEvent {
    StateChanged { chat_id: String, state: SendState },
    /// A message was persisted; views of `chat_id` should re-fetch.
    Refresh { chat_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            SendState::Idle,
            SendState::SendingUser,
            SendState::AwaitingReply,
            SendState::SendingBot,
            SendState::Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_awaiting_reply_cannot_fail() {
        assert!(!SendState::AwaitingReply.can_transition_to(SendState::Failed));
        assert!(!SendState::Done.can_transition_to(SendState::SendingUser));
    }

    #[test]
    fn test_busy_and_terminal() {
        assert!(SendState::AwaitingReply.is_busy());
        assert!(!SendState::Idle.is_busy());
        assert!(SendState::Failed.is_terminal());
        assert!(!SendState::SendingBot.is_terminal());
    }
}
