//! Wallet account identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wallet address of a connected account.
///
/// Wallet tooling reports the same address in mixed checksum casings, so the
/// value is lowercased once at construction and every later comparison is
/// exact. The address is otherwise opaque to the client; the gateway owns its
/// lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Account(String);

impl Account {
    pub fn new(address: impl AsRef<str>) -> Self {
        Account(address.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Account {
    fn from(address: String) -> Self {
        Account::new(address)
    }
}

impl From<&str> for Account {
    fn from(address: &str) -> Self {
        Account::new(address)
    }
}
