//! Chat list and message persistence abstractions.
//!
//! Defines the `ChatRepository` port the GraphQL adapter implements, the
//! `ChatService` used by chat list commands, and the polling
//! `MessageFeed` that keeps a conversation view fresh.

pub mod feed;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
