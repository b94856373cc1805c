//! Client-side send orchestration.
//!
//! One user action: save the user's message, ask the relay for a reply,
//! save the bot's message. Progress is published as [`state::SendEvent`]s
//! on a [`bus::SendEventBus`] so a view can show pending states and
//! refresh its message list.

pub mod bus;
pub mod client;
pub mod orchestrator;
pub mod state;
