//! Infrastructure layer for chatrelay.
//!
//! Implementations of the ports defined in `chatrelay-core`: the OpenRouter
//! completion provider, the GraphQL chat repository, and the HTTP relay
//! client. Also environment secrets and `config.toml` loading.

pub mod config;
pub mod graphql;
pub mod llm;
pub mod relay_client;
pub mod secret;

#[cfg(test)]
pub(crate) mod test_server;
