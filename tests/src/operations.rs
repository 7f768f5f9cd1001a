//! Dashboard operation scenarios against the scripted contract.

#[cfg(test)]
mod registration {
    use healthchain_gateway::mock::MockGateway;
    use healthchain_records::{register_patient, register_staff, OpError, RegisterPatient};
    use healthchain_session::resolve_role;
    use healthchain_types::{Account, AdminRegistry, Role, StaffRole};

    fn valid_input() -> RegisterPatient {
        RegisterPatient {
            name: "Ada Obi".to_string(),
            matric_number: "123456".to_string(),
            reg_date: 1_690_000_000,
            hostel_room: "B-14".to_string(),
        }
    }

    /// Scenario: a new wallet registers as a patient and from then on
    /// resolves to Patient.
    #[tokio::test]
    async fn registration_changes_the_resolved_role() -> anyhow::Result<()> {
        let gateway = MockGateway::new();
        let caller = Account::new("0xnew");

        let before = resolve_role(&gateway, &AdminRegistry::default(), &caller).await;
        assert_eq!(before, Role::Unregistered);

        register_patient(&gateway, &caller, &valid_input()).await?;

        let after = resolve_role(&gateway, &AdminRegistry::default(), &caller).await;
        assert_eq!(after, Role::Patient);
        Ok(())
    }

    /// Scenario: form validation rejects bad input before anything is
    /// submitted.
    #[tokio::test]
    async fn invalid_forms_never_reach_the_contract() {
        let gateway = MockGateway::new();
        let caller = Account::new("0xnew");

        for (field, input) in [
            ("name", RegisterPatient { name: "  ".to_string(), ..valid_input() }),
            ("matric", RegisterPatient { matric_number: "12ab56".to_string(), ..valid_input() }),
            ("matric", RegisterPatient { matric_number: "1234567".to_string(), ..valid_input() }),
            ("reg date", RegisterPatient { reg_date: 0, ..valid_input() }),
            ("hostel", RegisterPatient { hostel_room: String::new(), ..valid_input() }),
        ] {
            let err = register_patient(&gateway, &caller, &input).await.unwrap_err();
            assert!(
                matches!(err, OpError::Validation(_)),
                "{field} should fail validation"
            );
        }
        assert!(gateway.patient_snapshot(&caller).is_none());
    }

    /// Scenario: staff registration declares the role that later resolves.
    #[tokio::test]
    async fn staff_registration_declares_the_role() -> anyhow::Result<()> {
        let gateway = MockGateway::new();
        let wallet = Account::new("0xpharm");

        register_staff(&gateway, &wallet, "K. Bello", StaffRole::Pharmacist).await?;

        let role = resolve_role(&gateway, &AdminRegistry::default(), &wallet).await;
        assert_eq!(role, Role::Pharmacist);
        Ok(())
    }

    /// Scenario: a duplicate registration reverts and the revert reason
    /// reaches the form verbatim.
    #[tokio::test]
    async fn duplicate_registration_surfaces_the_revert_reason() {
        let gateway = MockGateway::new();
        let caller = Account::new("0xnew");
        register_patient(&gateway, &caller, &valid_input()).await.unwrap();

        let err = register_patient(&gateway, &caller, &valid_input())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "transaction failed: account already registered as patient"
        );
    }
}

#[cfg(test)]
mod doctor_flow {
    use healthchain_gateway::Gateway;
    use healthchain_records::{
        eligible_recipients, generate_access_code, lookup_patient, routing_role,
        update_patient_record, OpError,
    };
    use healthchain_types::{Account, RecordUpdate, StaffRole};

    use crate::support::small_clinic;

    /// Scenario: the full consult: patient generates a code, doctor looks the
    /// record up with it, updates it, and the prescription lands with the
    /// pharmacist.
    #[tokio::test]
    async fn consult_roundtrip_reaches_the_pharmacist() -> anyhow::Result<()> {
        let gateway = small_clinic();
        let ada = Account::new("0xada");
        let doctor = Account::new("0xdoc");

        let record = generate_access_code(&gateway, &ada).await?;
        let code = record.access_code;
        assert_ne!(code, 0);

        let found = lookup_patient(&gateway, "123456", code).await?;
        assert_eq!(found.name, "Ada Obi");

        let staff = gateway.all_staff().await?;
        let recipients = eligible_recipients(&staff, false);
        assert_eq!(recipients.len(), 1);
        let pharmacist = recipients[0].account.clone();

        update_patient_record(
            &gateway,
            &doctor,
            &RecordUpdate {
                matric_number: 123_456,
                health_record: "malaria, treated".to_string(),
                prescription: "artemether 80mg, twice daily".to_string(),
                access_code: code,
                admit: false,
                recipient: pharmacist.clone(),
            },
        )
        .await?;

        let inbox = gateway.prescriptions_for(&pharmacist).await?;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].prescribed_by, doctor);
        Ok(())
    }

    /// Scenario: admission flips the routing target from pharmacist to
    /// nurse.
    #[test]
    fn admission_routes_to_the_nurse() {
        assert_eq!(routing_role(true), StaffRole::Nurse);
        assert_eq!(routing_role(false), StaffRole::Pharmacist);
    }

    /// Scenario: a wrong or stale code denies the lookup without reaching
    /// the record.
    #[tokio::test]
    async fn lookup_with_wrong_code_is_denied() {
        let gateway = small_clinic();
        let ada = Account::new("0xada");
        generate_access_code(&gateway, &ada).await.unwrap();

        let err = lookup_patient(&gateway, "123456", 1).await.unwrap_err();
        assert!(matches!(err, OpError::Denied(_)));

        let err = lookup_patient(&gateway, "999999", 1).await.unwrap_err();
        assert!(matches!(err, OpError::Denied(_)));
    }

    /// Scenario: an admitted patient's prescription cannot be routed to a
    /// pharmacist.
    #[tokio::test]
    async fn admitted_update_rejects_pharmacist_recipient() {
        let gateway = small_clinic();
        let ada = Account::new("0xada");
        let record = generate_access_code(&gateway, &ada).await.unwrap();

        let err = update_patient_record(
            &gateway,
            &Account::new("0xdoc"),
            &RecordUpdate {
                matric_number: 123_456,
                health_record: "observation overnight".to_string(),
                prescription: "iv fluids".to_string(),
                access_code: record.access_code,
                admit: true,
                recipient: Account::new("0xpharm"),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OpError::Validation(_)));
    }
}

#[cfg(test)]
mod error_surface {
    use healthchain_gateway::mock::{FailureFlags, MockGateway};
    use healthchain_records::{prescriptions_for, OpError};
    use healthchain_types::{Account, GatewayError};

    /// Scenario: with the provider gone, reads surface the connection error
    /// for the guard to display.
    #[tokio::test]
    async fn connection_loss_is_a_typed_error() {
        let gateway = MockGateway::new();
        gateway.set_failures(FailureFlags {
            connection_down: true,
            ..FailureFlags::default()
        });

        let err = prescriptions_for(&gateway, &Account::new("0xpharm"))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::ConnectionUnavailable);
    }

    /// Scenario: timeouts read as transaction failures at the form boundary.
    #[test]
    fn timeout_reads_as_transaction_failure() {
        let err = OpError::Gateway(GatewayError::Timeout(120));
        assert!(matches!(err, OpError::Gateway(ref inner) if inner.user_message().starts_with("transaction failed")));
    }
}
