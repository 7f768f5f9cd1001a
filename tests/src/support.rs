//! Shared fixtures for the suite.

use healthchain_gateway::mock::MockGateway;
use healthchain_types::{Account, PatientRecord, StaffRecord, StaffRole};

pub fn patient(account: &str, matric_number: u32, access_code: u64) -> PatientRecord {
    PatientRecord {
        account: Account::new(account),
        name: "Ada Obi".to_string(),
        matric_number,
        reg_date: 1_690_000_000,
        hostel_room: "B-14".to_string(),
        health_record: "no known conditions".to_string(),
        access_code,
        is_admitted: false,
    }
}

pub fn staff(account: &str, name: &str, role: StaffRole) -> StaffRecord {
    StaffRecord {
        account: Account::new(account),
        name: name.to_string(),
        role,
    }
}

/// A clinic with one patient, one doctor, one nurse, and one pharmacist.
pub fn small_clinic() -> MockGateway {
    let gateway = MockGateway::new();
    gateway.insert_patient(patient("0xada", 123_456, 0));
    gateway.insert_staff(staff("0xdoc", "E. Danjuma", StaffRole::Doctor));
    gateway.insert_staff(staff("0xnurse", "F. Adeyemi", StaffRole::Nurse));
    gateway.insert_staff(staff("0xpharm", "K. Bello", StaffRole::Pharmacist));
    gateway
}
