//! Client configuration.
//!
//! One configuration object, loaded once at startup and passed down
//! explicitly. In particular the admin authority list lives here and nowhere
//! else: admin status is decided against this single set plus the contract's
//! own check, never against page-local address lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::role::Role;

/// Router paths, one per screen the client knows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePaths {
    /// Registration entry point; every denial redirects here.
    pub register: String,
    pub patient: String,
    pub doctor: String,
    pub nurse: String,
    pub pharmacy: String,
    pub admin: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        RoutePaths {
            register: "/register".to_string(),
            patient: "/patient".to_string(),
            doctor: "/doctor".to_string(),
            nurse: "/nurse".to_string(),
            pharmacy: "/pharmacy".to_string(),
            admin: "/admin".to_string(),
        }
    }
}

impl RoutePaths {
    /// The dashboard an account should land on once its role resolves.
    /// Unregistered and pending accounts have none.
    pub fn dashboard_for(&self, role: Role) -> Option<&str> {
        match role {
            Role::Patient => Some(&self.patient),
            Role::Doctor => Some(&self.doctor),
            Role::Nurse => Some(&self.nurse),
            Role::Pharmacist => Some(&self.pharmacy),
            Role::Admin => Some(&self.admin),
            Role::Pending | Role::Unregistered => None,
        }
    }
}

/// The admin authority list.
///
/// Addresses are normalized on the way in (see [`Account`]), so membership
/// checks are exact regardless of the casing configuration was written in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminRegistry {
    addresses: HashSet<Account>,
}

impl AdminRegistry {
    pub fn new(addresses: impl IntoIterator<Item = Account>) -> Self {
        AdminRegistry {
            addresses: addresses.into_iter().collect(),
        }
    }

    pub fn contains(&self, account: &Account) -> bool {
        self.addresses.contains(account)
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Everything the client core is parameterized on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Address of the deployed records contract.
    pub contract_address: String,
    /// Accounts granted admin regardless of contract record state.
    pub admins: AdminRegistry,
    /// Access-code validity window, in seconds.
    pub access_code_ttl_secs: u64,
    /// Bounded wait for write calls, in seconds.
    pub tx_timeout_secs: u64,
    pub routes: RoutePaths,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            contract_address: String::new(),
            admins: AdminRegistry::default(),
            // Access codes are valid for 30 minutes.
            access_code_ttl_secs: 30 * 60,
            tx_timeout_secs: 120,
            routes: RoutePaths::default(),
        }
    }
}
