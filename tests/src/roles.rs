//! Role resolution scenarios.

#[cfg(test)]
mod resolution_order {
    use healthchain_gateway::mock::{FailureFlags, MockGateway};
    use healthchain_session::resolve_role;
    use healthchain_types::{Account, AdminRegistry, Role, StaffRole};

    use crate::support::{patient, staff};

    fn admins(addresses: &[&str]) -> AdminRegistry {
        AdminRegistry::new(addresses.iter().map(|a| Account::new(a)))
    }

    /// Scenario: an address on the authority list is admin no matter what
    /// records the contract holds for it.
    #[tokio::test]
    async fn allow_listed_account_is_admin_regardless_of_records() {
        let gateway = MockGateway::new();
        gateway.insert_patient(patient("0xboth", 222_222, 0));
        gateway.insert_staff(staff("0xboth", "E. Danjuma", StaffRole::Doctor));

        let role = resolve_role(&gateway, &admins(&["0xBOTH"]), &Account::new("0xboth")).await;
        assert_eq!(role, Role::Admin);
    }

    /// Scenario: a plain patient resolves to Patient.
    #[tokio::test]
    async fn patient_record_wins_when_not_admin() {
        let gateway = MockGateway::new();
        gateway.insert_patient(patient("0xada", 123_456, 0));

        let role = resolve_role(&gateway, &admins(&[]), &Account::new("0xada")).await;
        assert_eq!(role, Role::Patient);
    }

    /// Scenario: staff roles come from the staff record's declaration.
    #[tokio::test]
    async fn staff_record_declares_the_role() {
        let gateway = MockGateway::new();
        gateway.insert_staff(staff("0xnurse", "F. Adeyemi", StaffRole::Nurse));

        let role = resolve_role(&gateway, &admins(&[]), &Account::new("0xnurse")).await;
        assert_eq!(role, Role::Nurse);
    }

    /// Scenario: an unknown wallet has no role and must register.
    #[tokio::test]
    async fn unknown_account_is_unregistered() {
        let gateway = MockGateway::new();
        let role = resolve_role(&gateway, &admins(&[]), &Account::new("0xnew")).await;
        assert_eq!(role, Role::Unregistered);
    }

    /// Scenario: the patient read fails but the staff read answers; the
    /// partial failure must not block resolution from the other source.
    #[tokio::test]
    async fn partial_failure_still_resolves_from_the_other_source() {
        let gateway = MockGateway::new();
        gateway.insert_staff(staff("0xpharm", "K. Bello", StaffRole::Pharmacist));
        gateway.set_failures(FailureFlags {
            patient_reads: true,
            ..FailureFlags::default()
        });

        let role = resolve_role(&gateway, &admins(&[]), &Account::new("0xpharm")).await;
        assert_eq!(role, Role::Pharmacist);
    }

    /// Scenario: a failed admin check is a failed check, not a grant.
    #[tokio::test]
    async fn failed_admin_check_fails_closed() {
        let gateway = MockGateway::new();
        gateway.grant_contract_admin(Account::new("0xadmin"));
        gateway.set_failures(FailureFlags {
            admin_checks: true,
            ..FailureFlags::default()
        });

        let role = resolve_role(&gateway, &admins(&[]), &Account::new("0xadmin")).await;
        assert_eq!(role, Role::Unregistered);
    }
}

#[cfg(test)]
mod normalization {
    use healthchain_types::{Account, Role};

    /// Role strings from the contract arrive in whatever casing the form
    /// submitted; parsing maps them all to the same variant.
    #[test]
    fn role_strings_normalize_case_insensitively() {
        for raw in ["Doctor", "doctor", "DOCTOR"] {
            assert_eq!(raw.parse::<Role>().unwrap(), Role::Doctor);
        }
        assert!("registrar".parse::<Role>().is_err());
    }

    /// Checksummed and lowercased forms of one address are one account.
    #[test]
    fn wallet_addresses_compare_case_insensitively() {
        let a = Account::new("0x7132dA13b7Df1484dc2a68784f03Bb8DD25f96bB");
        let b = Account::new("0x7132da13b7df1484dc2a68784f03bb8dd25f96bb");
        assert_eq!(a, b);
    }
}
