//! Business logic and port definitions for chatrelay.
//!
//! This crate defines the "ports" (provider, repository and relay-client
//! traits) that the infrastructure layer implements. It depends only on
//! `chatrelay-types` -- never on `chatrelay-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod relay;
pub mod send;
