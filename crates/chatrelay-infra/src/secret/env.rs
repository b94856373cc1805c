//! Environment variable secret provider.
//!
//! Resolves the completion API key and the data service access token by
//! environment variable name (e.g. `OPENROUTER_API_KEY`).

use secrecy::SecretString;

/// Read-only secret provider backed by the process environment.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }

    /// Value of `name`, if set.
    ///
    /// Blank values and values that are not valid Unicode count as unset.
    pub fn get(&self, name: &str) -> Option<SecretString> {
        match std::env::var(name) {
            Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
