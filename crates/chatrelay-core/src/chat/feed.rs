//! Polling message feed for one conversation.
//!
//! Freshness comes from periodic re-fetch plus explicit refresh requests
//! (the send orchestration asks for one after each persisted message).
//! Subscribers watch a `tokio::sync::watch` channel that only changes when
//! the fetched list differs from the previous snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use chatrelay_types::chat::Message;

use crate::chat::repository::ChatRepository;
use crate::send::bus::SendEventBus;
use crate::send::state::SendEvent;

/// `None` until the first successful fetch.
pub type MessageSnapshot = Option<Vec<Message>>;

/// Handle to a running feed task.
pub struct MessageFeed {
    chat_id: String,
    receiver: watch::Receiver<MessageSnapshot>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MessageFeed {
    /// Start polling `chat_id` every `interval`. The first fetch happens
    /// immediately.
    pub fn spawn<R>(repo: Arc<R>, chat_id: impl Into<String>, interval: Duration) -> Self
    where
        R: ChatRepository + 'static,
    {
        let chat_id = chat_id.into();
        let (sender, receiver) = watch::channel(None);
        let refresh = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(poll_loop(
            repo,
            chat_id.clone(),
            interval,
            sender,
            refresh.clone(),
            cancel.clone(),
        ));

        Self {
            chat_id,
            receiver,
            refresh,
            cancel,
            task: Some(task),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// A new receiver for the message list.
    pub fn subscribe(&self) -> watch::Receiver<MessageSnapshot> {
        self.receiver.clone()
    }

    /// Latest snapshot without waiting.
    pub fn current(&self) -> MessageSnapshot {
        self.receiver.borrow().clone()
    }

    /// Re-fetch now instead of waiting for the next tick.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }

    /// Re-fetch whenever `bus` carries a [`SendEvent::Refresh`] for this
    /// chat. The forwarder stops with the feed.
    pub fn follow_bus(&self, bus: &SendEventBus) {
        let mut events = bus.subscribe();
        let refresh = self.refresh.clone();
        let cancel = self.cancel.clone();
        let chat_id = self.chat_id.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(SendEvent::Refresh { chat_id: id }) if id == chat_id => refresh.notify_one(),
                        Ok(_) => {}
                        // Missed events may include a refresh for this chat.
                        Err(RecvError::Lagged(_)) => refresh.notify_one(),
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        });
    }

    /// Stop polling and wait for the task to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MessageFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop<R: ChatRepository>(
    repo: Arc<R>,
    chat_id: String,
    interval: Duration,
    sender: watch::Sender<MessageSnapshot>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
            _ = refresh.notified() => {}
        }

        match repo.list_messages(&chat_id).await {
            Ok(fresh) => {
                let changed = sender.send_if_modified(|current| {
                    if current.as_ref() == Some(&fresh) {
                        false
                    } else {
                        *current = Some(fresh);
                        true
                    }
                });
                if changed {
                    debug!(chat_id = %chat_id, "Message list updated");
                }
            }
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Failed to refresh messages, keeping last snapshot");
            }
        }
    }

    debug!(chat_id = %chat_id, "Message feed stopped");
}
