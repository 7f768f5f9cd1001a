//! Scripted in-memory gateway.
//!
//! Stands in for the deployed contract in tests: records live in hash maps,
//! writes settle immediately, and individual read paths can be made to fail
//! to exercise degradation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use healthchain_types::{
    Account, GatewayError, PatientRecord, Prescription, RecordUpdate, StaffRecord, StaffRole,
    TxReceipt,
};

use crate::{Gateway, QueryResult, TxResult};

/// Which calls should fail, to exercise degradation paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailureFlags {
    /// Every call errors with `ConnectionUnavailable`.
    pub connection_down: bool,
    /// Patient reads error with `QueryFailed`.
    pub patient_reads: bool,
    /// Staff reads error with `QueryFailed`.
    pub staff_reads: bool,
    /// Contract-side admin checks error with `QueryFailed`.
    pub admin_checks: bool,
}

#[derive(Default)]
struct MockState {
    patients: HashMap<Account, PatientRecord>,
    staff: HashMap<Account, StaffRecord>,
    contract_admins: HashSet<Account>,
    inboxes: HashMap<Account, Vec<Prescription>>,
    failures: FailureFlags,
    next_code: u64,
    tx_counter: u64,
    now_secs: i64,
}

/// In-memory stand-in for the deployed records contract.
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl Default for MockGateway {
    fn default() -> Self {
        MockGateway::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        MockGateway {
            state: Mutex::new(MockState {
                now_secs: 1_700_000_000,
                ..MockState::default()
            }),
        }
    }

    pub fn insert_patient(&self, record: PatientRecord) {
        let mut state = self.lock();
        state.patients.insert(record.account.clone(), record);
    }

    pub fn insert_staff(&self, record: StaffRecord) {
        let mut state = self.lock();
        state.staff.insert(record.account.clone(), record);
    }

    /// Marks `account` as admin on the contract side (distinct from the
    /// configuration-supplied authority list).
    pub fn grant_contract_admin(&self, account: Account) {
        self.lock().contract_admins.insert(account);
    }

    pub fn set_failures(&self, failures: FailureFlags) {
        self.lock().failures = failures;
    }

    /// Current stored record for `account`, bypassing failure injection.
    pub fn patient_snapshot(&self, account: &Account) -> Option<PatientRecord> {
        self.lock().patients.get(account).cloned()
    }

    /// Prescriptions delivered to `account` so far, bypassing failure
    /// injection.
    pub fn inbox_snapshot(&self, account: &Account) -> Vec<Prescription> {
        self.lock().inboxes.get(account).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock gateway state poisoned")
    }

    fn receipt(state: &mut MockState) -> TxReceipt {
        state.tx_counter += 1;
        state.now_secs += 1;
        TxReceipt {
            tx_hash: format!("0xmock{:08x}", state.tx_counter),
        }
    }
}

impl Gateway for MockGateway {
    async fn patient(&self, account: &Account) -> QueryResult<Option<PatientRecord>> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.failures.patient_reads {
            return Err(GatewayError::QueryFailed("patient read reverted".to_string()));
        }
        Ok(state.patients.get(account).cloned())
    }

    async fn staff(&self, account: &Account) -> QueryResult<Option<StaffRecord>> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.failures.staff_reads {
            return Err(GatewayError::QueryFailed("staff read reverted".to_string()));
        }
        Ok(state.staff.get(account).cloned())
    }

    async fn is_admin(&self, account: &Account) -> QueryResult<bool> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.failures.admin_checks {
            return Err(GatewayError::QueryFailed("admin check reverted".to_string()));
        }
        Ok(state.contract_admins.contains(account))
    }

    async fn all_patients(&self) -> QueryResult<Vec<PatientRecord>> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.failures.patient_reads {
            return Err(GatewayError::QueryFailed("patient read reverted".to_string()));
        }
        Ok(state.patients.values().cloned().collect())
    }

    async fn all_staff(&self) -> QueryResult<Vec<StaffRecord>> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.failures.staff_reads {
            return Err(GatewayError::QueryFailed("staff read reverted".to_string()));
        }
        Ok(state.staff.values().cloned().collect())
    }

    async fn prescriptions_for(&self, account: &Account) -> QueryResult<Vec<Prescription>> {
        let state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        Ok(state.inboxes.get(account).cloned().unwrap_or_default())
    }

    async fn register_patient(
        &self,
        caller: &Account,
        name: &str,
        matric_number: u32,
        reg_date: i64,
        hostel_room: &str,
    ) -> TxResult {
        let mut state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.patients.contains_key(caller) {
            return Err(GatewayError::TransactionFailed(
                "account already registered as patient".to_string(),
            ));
        }
        if state
            .patients
            .values()
            .any(|record| record.matric_number == matric_number)
        {
            return Err(GatewayError::TransactionFailed(
                "matric number already registered".to_string(),
            ));
        }
        state.patients.insert(
            caller.clone(),
            PatientRecord {
                account: caller.clone(),
                name: name.to_string(),
                matric_number,
                reg_date,
                hostel_room: hostel_room.to_string(),
                health_record: String::new(),
                access_code: 0,
                is_admitted: false,
            },
        );
        Ok(Self::receipt(&mut state))
    }

    async fn register_staff(&self, account: &Account, name: &str, role: StaffRole) -> TxResult {
        let mut state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        if state.staff.contains_key(account) {
            return Err(GatewayError::TransactionFailed(
                "account already registered as staff".to_string(),
            ));
        }
        state.staff.insert(
            account.clone(),
            StaffRecord {
                account: account.clone(),
                name: name.to_string(),
                role,
            },
        );
        Ok(Self::receipt(&mut state))
    }

    async fn generate_access_code(&self, caller: &Account) -> TxResult {
        let mut state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        state.next_code += 1;
        let code = 100_000 + (state.next_code * 7919) % 900_000;
        match state.patients.get_mut(caller) {
            Some(record) => {
                record.access_code = code;
            }
            None => {
                return Err(GatewayError::TransactionFailed(
                    "no patient record for caller".to_string(),
                ))
            }
        }
        Ok(Self::receipt(&mut state))
    }

    async fn cancel_access_code(&self, caller: &Account) -> TxResult {
        let mut state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }
        match state.patients.get_mut(caller) {
            Some(record) => {
                record.access_code = 0;
            }
            None => {
                return Err(GatewayError::TransactionFailed(
                    "no patient record for caller".to_string(),
                ))
            }
        }
        Ok(Self::receipt(&mut state))
    }

    async fn update_patient_record(&self, caller: &Account, update: &RecordUpdate) -> TxResult {
        let mut state = self.lock();
        if state.failures.connection_down {
            return Err(GatewayError::ConnectionUnavailable);
        }

        let patient = state
            .patients
            .values_mut()
            .find(|record| record.matric_number == update.matric_number);
        let (patient_name, matric_number) = match patient {
            Some(record) => {
                // The contract enforces the live code, not the client.
                if record.access_code == 0 || record.access_code != update.access_code {
                    return Err(GatewayError::TransactionFailed(
                        "access code mismatch".to_string(),
                    ));
                }
                record.health_record = update.health_record.clone();
                record.is_admitted = update.admit;
                (record.name.clone(), record.matric_number)
            }
            None => {
                return Err(GatewayError::TransactionFailed(
                    "unknown matric number".to_string(),
                ))
            }
        };

        let issued_at = state.now_secs;
        state
            .inboxes
            .entry(update.recipient.clone())
            .or_default()
            .push(Prescription {
                patient_name,
                matric_number,
                text: update.prescription.clone(),
                prescribed_by: caller.clone(),
                issued_at,
            });
        Ok(Self::receipt(&mut state))
    }
}
