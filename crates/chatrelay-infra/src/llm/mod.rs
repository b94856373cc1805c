//! Completion provider implementations.

pub mod openrouter;
