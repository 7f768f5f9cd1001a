//! Record shapes as the contract stores them.
//!
//! The contract is the source of truth for every field here; the client never
//! persists these beyond the session cache.

use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::role::StaffRole;

/// A patient's on-chain record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub account: Account,
    pub name: String,
    /// 6-digit student identifier; patient lookup is keyed on it.
    pub matric_number: u32,
    /// Enrolment date as a unix timestamp (seconds).
    pub reg_date: i64,
    pub hostel_room: String,
    /// Free-text clinical notes, updated by doctors.
    pub health_record: String,
    /// Active access code; `0` means no active code.
    pub access_code: u64,
    pub is_admitted: bool,
}

impl PatientRecord {
    pub fn has_active_code(&self) -> bool {
        self.access_code != 0
    }
}

/// A staff member's on-chain record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub account: Account,
    pub name: String,
    pub role: StaffRole,
}

/// A prescription routed to a nurse or pharmacist by the issuing doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub patient_name: String,
    pub matric_number: u32,
    pub text: String,
    pub prescribed_by: Account,
    /// Issue time as a unix timestamp (seconds).
    pub issued_at: i64,
}

/// Input for a doctor's record update plus prescription routing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub matric_number: u32,
    pub health_record: String,
    pub prescription: String,
    /// The access code the patient handed to the doctor; the contract rejects
    /// the update when it no longer matches.
    pub access_code: u64,
    /// Whether the patient is being admitted; decides who receives the
    /// prescription.
    pub admit: bool,
    pub recipient: Account,
}

/// Receipt for a settled write call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}
