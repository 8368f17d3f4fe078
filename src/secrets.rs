//! API key storage using the OS keyring.
//!
//! Keys are stored per project host so one machine can hold keys for
//! several projects. An unavailable keyring is treated as an empty one.

use crate::error::{RunnerError, Result};
use keyring::Entry;
use tracing::{debug, warn};

const SERVICE_NAME: &str = "run-sql";

/// Keyring-backed store for endpoint API keys.
#[derive(Debug, Clone, Default)]
pub struct SecretStore;

impl SecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Generates the keyring entry name for a project host.
    pub fn api_key_entry(host: &str) -> String {
        format!("apikey:{}", host)
    }

    /// Looks up the API key stored for `host`.
    ///
    /// Returns `None` when nothing is stored or the keyring cannot be used.
    pub fn retrieve_api_key(&self, host: &str) -> Option<String> {
        let entry = match Entry::new(SERVICE_NAME, &Self::api_key_entry(host)) {
            Ok(e) => e,
            Err(e) => {
                debug!("Keyring unavailable: {e}");
                return None;
            }
        };

        match entry.get_password() {
            Ok(secret) => Some(secret),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!("Failed to read API key from keyring: {e}");
                None
            }
        }
    }

    /// Stores the API key for `host`, replacing any previous value.
    pub fn store_api_key(&self, host: &str, api_key: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, &Self::api_key_entry(host))
            .map_err(|e| RunnerError::secrets(format!("Failed to create keyring entry: {e}")))?;

        entry
            .set_password(api_key)
            .map_err(|e| RunnerError::secrets(format!("Failed to store API key: {e}")))
    }
}

/// Masks a secret for display, showing only the last 4 characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        "*".repeat(chars.len())
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****...{tail}")
    }
}
