//! Configuration scenarios.

#[cfg(test)]
mod loading {
    use healthchain_session::resolve_role;
    use healthchain_types::{Account, ClientConfig, Role};

    use crate::support::small_clinic;

    /// Scenario: the admin allow-list is loaded once from configuration and
    /// that same set drives resolution — no page-local address lists.
    #[tokio::test]
    async fn configured_admin_set_drives_resolution() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "contract_address": "0xF66FE545a8128476493A18ADE6D560BC3922dB1E",
                "admins": ["0x7132dA13b7Df1484dc2a68784f03Bb8DD25f96bB"]
            }"#,
        )
        .unwrap();

        let gateway = small_clinic();
        let admin_wallet = Account::new("0x7132DA13B7DF1484DC2A68784F03BB8DD25F96BB");

        let role = resolve_role(&gateway, &config.admins, &admin_wallet).await;
        assert_eq!(role, Role::Admin);

        let role = resolve_role(&gateway, &config.admins, &Account::new("0xada")).await;
        assert_eq!(role, Role::Patient);
    }

    /// Scenario: omitted fields fall back to the documented defaults.
    #[test]
    fn defaults_cover_omitted_fields() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.access_code_ttl_secs, 1800);
        assert_eq!(config.routes.register, "/register");
        assert!(config.admins.is_empty());
    }
}
