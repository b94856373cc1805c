//! Credential lookup.
//!
//! Credentials are only ever read from the environment and are handed out
//! wrapped in [`secrecy::SecretString`].

pub mod env;

pub use env::EnvSecretProvider;
