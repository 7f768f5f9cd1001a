//! HealthChain Client Shared Types
//!
//! Common vocabulary for the client core:
//! - Accounts (wallet addresses, case-insensitively comparable)
//! - The closed role enumeration and its normalization
//! - Contract record shapes (patients, staff, prescriptions)
//! - The gateway error taxonomy
//! - Client configuration, including the admin authority list

pub mod account;
pub mod config;
pub mod error;
pub mod records;
pub mod role;

pub use account::Account;
pub use config::{AdminRegistry, ClientConfig, RoutePaths};
pub use error::GatewayError;
pub use records::{PatientRecord, Prescription, RecordUpdate, StaffRecord, TxReceipt};
pub use role::{Role, RoleParseError, StaffRole};
