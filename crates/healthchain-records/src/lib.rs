//! Dashboard Operations
//!
//! The typed calls behind the registration forms and the patient, doctor,
//! and pharmacy screens. Each operation validates its input locally before
//! submitting — nothing reaches the contract on a form error — and surfaces
//! write failures verbatim. Access-code checks come back as typed denials,
//! not transport errors.

use healthchain_gateway::Gateway;
use healthchain_types::{
    Account, GatewayError, PatientRecord, Prescription, RecordUpdate, StaffRecord, StaffRole,
    TxReceipt,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a dashboard operation did not go through.
#[derive(Debug, Error)]
pub enum OpError {
    /// Input failed local validation; nothing was submitted.
    #[error("{0}")]
    Validation(String),
    /// The presented access code does not open the requested record.
    #[error("access denied: {0}")]
    Denied(String),
    /// The gateway call itself failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Patient self-registration input, as typed into the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterPatient {
    pub name: String,
    /// Matric number as typed; must be exactly six digits.
    pub matric_number: String,
    /// Enrolment date as a unix timestamp (seconds).
    pub reg_date: i64,
    pub hostel_room: String,
}

/// Parses a matric number: exactly six ASCII digits.
pub fn parse_matric_number(raw: &str) -> Result<u32, OpError> {
    let raw = raw.trim();
    let six_digits = raw.len() == 6 && raw.chars().all(|c| c.is_ascii_digit());
    if !six_digits {
        return Err(OpError::Validation(
            "matric number must be exactly 6 digits".to_string(),
        ));
    }
    raw.parse::<u32>()
        .map_err(|_| OpError::Validation("matric number must be exactly 6 digits".to_string()))
}

/// Registers the calling account as a patient.
pub async fn register_patient<G: Gateway>(
    gateway: &G,
    caller: &Account,
    input: &RegisterPatient,
) -> Result<TxReceipt, OpError> {
    if input.name.trim().is_empty() {
        return Err(OpError::Validation("name is required".to_string()));
    }
    let matric_number = parse_matric_number(&input.matric_number)?;
    if input.reg_date <= 0 {
        return Err(OpError::Validation(
            "registration date must be a valid unix timestamp".to_string(),
        ));
    }
    if input.hostel_room.trim().is_empty() {
        return Err(OpError::Validation("hostel room is required".to_string()));
    }

    debug!(%caller, matric_number, "submitting patient registration");
    Ok(gateway
        .register_patient(
            caller,
            input.name.trim(),
            matric_number,
            input.reg_date,
            input.hostel_room.trim(),
        )
        .await?)
}

/// Registers `account` as staff with the declared role.
pub async fn register_staff<G: Gateway>(
    gateway: &G,
    account: &Account,
    name: &str,
    role: StaffRole,
) -> Result<TxReceipt, OpError> {
    if name.trim().is_empty() {
        return Err(OpError::Validation("name is required".to_string()));
    }
    debug!(%account, %role, "submitting staff registration");
    Ok(gateway.register_staff(account, name.trim(), role).await?)
}

/// Doctor lookup: resolves a matric number through the patient directory and
/// verifies the presented access code against the live record.
pub async fn lookup_patient<G: Gateway>(
    gateway: &G,
    matric_number: &str,
    presented_code: u64,
) -> Result<PatientRecord, OpError> {
    let matric_number = parse_matric_number(matric_number)?;
    if presented_code == 0 {
        return Err(OpError::Validation("access code is required".to_string()));
    }

    let directory = gateway.all_patients().await?;
    let account = directory
        .iter()
        .find(|record| record.matric_number == matric_number)
        .map(|record| record.account.clone())
        .ok_or_else(|| {
            OpError::Denied(format!("no patient found for matric number {matric_number}"))
        })?;

    let record = gateway.patient(&account).await?.ok_or_else(|| {
        OpError::Denied(format!("no patient found for matric number {matric_number}"))
    })?;

    // A zero code means nothing is active; anything else must match exactly.
    if record.access_code == 0 || record.access_code != presented_code {
        warn!(matric_number, "access code mismatch on patient lookup");
        return Err(OpError::Denied(
            "invalid or expired access code".to_string(),
        ));
    }
    Ok(record)
}

/// Staff role a prescription is routed to: admitted patients are handed to a
/// nurse, everyone else to a pharmacist.
pub fn routing_role(admitted: bool) -> StaffRole {
    if admitted {
        StaffRole::Nurse
    } else {
        StaffRole::Pharmacist
    }
}

/// Staff members eligible to receive the prescription, given the admission
/// flag.
pub fn eligible_recipients(staff: &[StaffRecord], admitted: bool) -> Vec<&StaffRecord> {
    let role = routing_role(admitted);
    staff.iter().filter(|member| member.role == role).collect()
}

/// Submits a doctor's record update plus routed prescription.
pub async fn update_patient_record<G: Gateway>(
    gateway: &G,
    doctor: &Account,
    update: &RecordUpdate,
) -> Result<TxReceipt, OpError> {
    if update.health_record.trim().is_empty() {
        return Err(OpError::Validation(
            "health record cannot be empty".to_string(),
        ));
    }
    if update.prescription.trim().is_empty() {
        return Err(OpError::Validation(
            "prescription cannot be empty".to_string(),
        ));
    }
    if update.access_code == 0 {
        return Err(OpError::Denied(
            "an active access code is required".to_string(),
        ));
    }

    // The recipient must hold the role the admission flag routes to.
    let staff = gateway.all_staff().await?;
    let required = routing_role(update.admit);
    let recipient_ok = staff
        .iter()
        .any(|member| member.account == update.recipient && member.role == required);
    if !recipient_ok {
        return Err(OpError::Validation(format!(
            "recipient must be a registered {required}"
        )));
    }

    debug!(%doctor, matric_number = update.matric_number, "submitting record update");
    Ok(gateway.update_patient_record(doctor, update).await?)
}

/// Prescriptions routed to `account` (nurse/pharmacist inbox).
pub async fn prescriptions_for<G: Gateway>(
    gateway: &G,
    account: &Account,
) -> Result<Vec<Prescription>, GatewayError> {
    gateway.prescriptions_for(account).await
}

/// Patient action: generate a fresh access code, then re-read the record so
/// the caller can restart its countdown from the new value.
pub async fn generate_access_code<G: Gateway>(
    gateway: &G,
    patient: &Account,
) -> Result<PatientRecord, OpError> {
    gateway.generate_access_code(patient).await?;
    refreshed_record(gateway, patient).await
}

/// Patient action: cancel the active access code and re-read the record.
pub async fn cancel_access_code<G: Gateway>(
    gateway: &G,
    patient: &Account,
) -> Result<PatientRecord, OpError> {
    gateway.cancel_access_code(patient).await?;
    refreshed_record(gateway, patient).await
}

async fn refreshed_record<G: Gateway>(
    gateway: &G,
    patient: &Account,
) -> Result<PatientRecord, OpError> {
    gateway
        .patient(patient)
        .await?
        .ok_or_else(|| OpError::Denied("no patient record for this account".to_string()))
}
