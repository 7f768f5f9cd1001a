//! Wallet/Contract Gateway
//!
//! The boundary between the client core and the deployed records contract.
//! This crate defines the typed call surface everything else consumes, plus a
//! scripted in-memory implementation for tests. Concrete wallet bindings
//! (browser provider discovery, signer management, ABI plumbing) live with
//! the host application; the core never sees them.
//!
//! Reads return `Ok(None)` for missing records. Transport failures come back
//! as [`GatewayError`] values and are degraded by callers — a failed read
//! never escalates past "record absent". Writes settle when the transaction
//! is mined or reverted, and carry the revert reason verbatim.

use healthchain_types::{
    Account, GatewayError, PatientRecord, Prescription, RecordUpdate, StaffRecord, StaffRole,
    TxReceipt,
};

#[cfg(any(test, feature = "testutils"))]
pub mod mock;

/// Outcome of a gateway read.
pub type QueryResult<T> = Result<T, GatewayError>;

/// Outcome of a gateway write.
pub type TxResult = Result<TxReceipt, GatewayError>;

/// Typed remote-call surface of the deployed records contract.
///
/// The gateway holds no session state: the calling account is always passed
/// explicitly, so a stale in-flight call can be recognized and discarded by
/// the session layer.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Patient record for `account`, if one exists.
    async fn patient(&self, account: &Account) -> QueryResult<Option<PatientRecord>>;

    /// Staff record for `account`, if one exists.
    async fn staff(&self, account: &Account) -> QueryResult<Option<StaffRecord>>;

    /// Whether the contract itself reports `account` as an admin. The
    /// configuration-supplied authority list is checked separately.
    async fn is_admin(&self, account: &Account) -> QueryResult<bool>;

    /// Full patient directory; matric-number lookup scans this.
    async fn all_patients(&self) -> QueryResult<Vec<PatientRecord>>;

    /// Full staff directory; prescription routing filters this.
    async fn all_staff(&self) -> QueryResult<Vec<StaffRecord>>;

    /// Prescriptions routed to `account` (nurse/pharmacist inbox).
    async fn prescriptions_for(&self, account: &Account) -> QueryResult<Vec<Prescription>>;

    /// Registers `caller` as a patient.
    async fn register_patient(
        &self,
        caller: &Account,
        name: &str,
        matric_number: u32,
        reg_date: i64,
        hostel_room: &str,
    ) -> TxResult;

    /// Registers `account` as staff with the declared role.
    async fn register_staff(&self, account: &Account, name: &str, role: StaffRole) -> TxResult;

    /// Issues a fresh access code for the calling patient.
    async fn generate_access_code(&self, caller: &Account) -> TxResult;

    /// Clears the calling patient's active access code.
    async fn cancel_access_code(&self, caller: &Account) -> TxResult;

    /// Applies a doctor's record update and routes the prescription.
    async fn update_patient_record(&self, caller: &Account, update: &RecordUpdate) -> TxResult;
}
