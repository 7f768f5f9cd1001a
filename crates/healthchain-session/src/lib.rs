//! Session Context
//!
//! The per-connection role cache and its single writer. A [`Session`] holds
//! the last-resolved role and profile for exactly one account; every account
//! change bumps an internal epoch and invalidates whatever the previous
//! account left behind. A resolution carries the epoch it was requested
//! under, so a result that lands after the user switched wallets is
//! discarded instead of overwriting the newer account's state.

pub mod guard;
pub mod resolver;

pub use guard::{guard, RequiredRole, RouteDecision, RouteRequirement};
pub use resolver::resolve_role;

use std::sync::Mutex;

use healthchain_gateway::Gateway;
use healthchain_types::{Account, AdminRegistry, GatewayError, PatientRecord, Role, StaffRecord};
use tracing::{debug, info};

/// Where the session stands with respect to role resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionState {
    /// No wallet connected.
    Disconnected,
    /// Resolution for the connected account is in flight.
    Pending,
    /// Resolution finished.
    Resolved(Role),
    /// The gateway reported a connection-level failure.
    Failed(String),
}

/// Profile data fetched for the resolved role.
#[derive(Clone, Debug, PartialEq)]
pub enum Profile {
    Patient(PatientRecord),
    Staff(StaffRecord),
    /// Admins have no contract record; their authority comes from
    /// configuration.
    Admin,
}

/// Outcome of committing a finished resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// The result was applied to the session.
    Applied,
    /// The account changed while the resolution was in flight; the stale
    /// result was discarded.
    Superseded,
}

#[derive(Debug)]
struct SessionState {
    epoch: u64,
    account: Option<Account>,
    resolution: ResolutionState,
    profile: Option<Profile>,
}

/// Per-connection session cache.
pub struct Session<G> {
    gateway: G,
    admins: AdminRegistry,
    state: Mutex<SessionState>,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G, admins: AdminRegistry) -> Self {
        Session {
            gateway,
            admins,
            state: Mutex::new(SessionState {
                epoch: 0,
                account: None,
                resolution: ResolutionState::Disconnected,
                profile: None,
            }),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Connects `account`, invalidating whatever the previous account left
    /// behind, and returns the pending resolution to drive.
    pub fn connect(&self, account: Account) -> PendingResolution<'_, G> {
        let mut state = self.lock();
        state.epoch += 1;
        state.account = Some(account.clone());
        state.resolution = ResolutionState::Pending;
        state.profile = None;
        debug!(%account, epoch = state.epoch, "account connected, role resolution pending");
        PendingResolution {
            session: self,
            epoch: state.epoch,
            account,
        }
    }

    /// Connects and resolves in one step.
    pub async fn resolve(&self, account: Account) -> (Role, Commit) {
        self.connect(account).run().await
    }

    /// Disconnects the wallet and clears all cached state.
    pub fn disconnect(&self) {
        let mut state = self.lock();
        state.epoch += 1;
        state.account = None;
        state.resolution = ResolutionState::Disconnected;
        state.profile = None;
        debug!("wallet disconnected, session cleared");
    }

    /// Records a connection-level failure (no provider, wrong network). The
    /// guard surfaces this to the user instead of redirecting.
    pub fn fail_connection(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.epoch += 1;
        state.resolution = ResolutionState::Failed(message.into());
        state.profile = None;
    }

    pub fn account(&self) -> Option<Account> {
        self.lock().account.clone()
    }

    pub fn resolution(&self) -> ResolutionState {
        self.lock().resolution.clone()
    }

    /// The committed role, if resolution has finished.
    pub fn role(&self) -> Option<Role> {
        match self.lock().resolution {
            ResolutionState::Resolved(role) => Some(role),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<Profile> {
        self.lock().profile.clone()
    }

    /// Fetches the profile matching the committed role and caches it. A fetch
    /// failure surfaces as an error without clearing the committed role.
    pub async fn fetch_profile(&self) -> Result<Option<Profile>, GatewayError> {
        let (account, role) = {
            let state = self.lock();
            match (&state.account, &state.resolution) {
                (Some(account), ResolutionState::Resolved(role)) => (account.clone(), *role),
                _ => return Ok(None),
            }
        };

        let profile = match role {
            Role::Patient => self.gateway.patient(&account).await?.map(Profile::Patient),
            Role::Doctor | Role::Nurse | Role::Pharmacist => {
                self.gateway.staff(&account).await?.map(Profile::Staff)
            }
            Role::Admin => Some(Profile::Admin),
            Role::Pending | Role::Unregistered => None,
        };

        let mut state = self.lock();
        // The account may have switched while the fetch was in flight.
        if state.account.as_ref() == Some(&account) {
            state.profile = profile.clone();
        }
        Ok(profile)
    }

    fn commit(&self, epoch: u64, account: &Account, role: Role) -> Commit {
        let mut state = self.lock();
        if state.epoch != epoch {
            info!(
                %account,
                stale_epoch = epoch,
                current_epoch = state.epoch,
                "discarding superseded role resolution"
            );
            return Commit::Superseded;
        }
        state.resolution = ResolutionState::Resolved(role);
        debug!(%account, %role, "role resolved");
        Commit::Applied
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state poisoned")
    }
}

/// A resolution tied to the epoch it was requested under.
pub struct PendingResolution<'a, G> {
    session: &'a Session<G>,
    epoch: u64,
    account: Account,
}

impl<G: Gateway> PendingResolution<'_, G> {
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Runs the queries and commits the result — unless the session moved to
    /// a newer account or disconnected while they were in flight.
    pub async fn run(self) -> (Role, Commit) {
        let role = resolve_role(&self.session.gateway, &self.session.admins, &self.account).await;
        let commit = self.session.commit(self.epoch, &self.account, role);
        (role, commit)
    }
}
