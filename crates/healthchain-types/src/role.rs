//! The closed role enumeration.
//!
//! The contract stores roles as free-form strings and the pages historically
//! compared them with inconsistent casing. All role strings are parsed into
//! this enum once, at the gateway boundary; everything downstream compares
//! enum values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single access-control category attributed to an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Doctor,
    Nurse,
    Pharmacist,
    Admin,
    /// Registered but awaiting approval.
    Pending,
    /// No admin status and no contract record; the account must register.
    Unregistered,
}

/// Roles a staff record can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Doctor,
    Nurse,
    Pharmacist,
}

impl Role {
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Doctor | Role::Nurse | Role::Pharmacist)
    }

    /// Whether the account holds any recognized position at all. Pending
    /// accounts do not: they are routed back to registration until approved.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Role::Pending | Role::Unregistered)
    }
}

impl From<StaffRole> for Role {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Doctor => Role::Doctor,
            StaffRole::Nurse => Role::Nurse,
            StaffRole::Pharmacist => Role::Pharmacist,
        }
    }
}

/// Error returned when a role string from the contract cannot be mapped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown role string: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "pharmacist" => Ok(Role::Pharmacist),
            "admin" => Ok(Role::Admin),
            "pending" => Ok(Role::Pending),
            "none" => Ok(Role::Unregistered),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl FromStr for StaffRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(StaffRole::Doctor),
            "nurse" => Ok(StaffRole::Nurse),
            "pharmacist" => Ok(StaffRole::Pharmacist),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "Patient"),
            Role::Doctor => write!(f, "Doctor"),
            Role::Nurse => write!(f, "Nurse"),
            Role::Pharmacist => write!(f, "Pharmacist"),
            Role::Admin => write!(f, "Admin"),
            Role::Pending => write!(f, "pending"),
            Role::Unregistered => write!(f, "none"),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Doctor => write!(f, "Doctor"),
            StaffRole::Nurse => write!(f, "Nurse"),
            StaffRole::Pharmacist => write!(f, "Pharmacist"),
        }
    }
}
