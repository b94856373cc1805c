//! Shared domain types for chatrelay.
//!
//! Chats, messages, completion-API shapes, relay endpoint wire types,
//! configuration, and the error enums shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod relay;
