//! Role resolution against the contract.

use healthchain_gateway::Gateway;
use healthchain_types::{Account, AdminRegistry, Role};
use tracing::{debug, warn};

/// Resolves the single role `account` holds.
///
/// The order is fixed: the admin authority list outranks contract records, a
/// patient record outranks a staff record, and anything unresolvable is
/// `Unregistered`. Every failed read degrades to "record absent" — a failed
/// admin check in particular must never grant admin.
pub async fn resolve_role<G: Gateway>(
    gateway: &G,
    admins: &AdminRegistry,
    account: &Account,
) -> Role {
    if admins.contains(account) {
        debug!(%account, "account is on the admin authority list");
        return Role::Admin;
    }
    match gateway.is_admin(account).await {
        Ok(true) => return Role::Admin,
        Ok(false) => {}
        Err(err) => {
            warn!(%account, error = %err, "admin check failed, treating account as non-admin");
        }
    }

    // Patient and staff lookups are independent reads; issue both and decide
    // only after both settle.
    let (patient, staff) = futures::join!(gateway.patient(account), gateway.staff(account));

    let patient = patient.unwrap_or_else(|err| {
        warn!(%account, error = %err, "patient query failed, treating record as absent");
        None
    });
    let staff = staff.unwrap_or_else(|err| {
        warn!(%account, error = %err, "staff query failed, treating record as absent");
        None
    });

    if patient.is_some() {
        return Role::Patient;
    }
    if let Some(record) = staff {
        return record.role.into();
    }

    debug!(%account, "no records found, account is unregistered");
    Role::Unregistered
}
