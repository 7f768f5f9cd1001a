//! Page-level access decisions.

use healthchain_types::{Role, RoutePaths};
use tracing::debug;

use crate::ResolutionState;

/// Role a page demands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any connected, registered account.
    Any,
    Exactly(Role),
}

/// A page's access requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteRequirement {
    pub role: RequiredRole,
    /// Admin-only pages admit `Role::Admin` and nobody else, whatever `role`
    /// says.
    pub admin_only: bool,
}

impl RouteRequirement {
    pub fn any() -> Self {
        RouteRequirement {
            role: RequiredRole::Any,
            admin_only: false,
        }
    }

    pub fn role(role: Role) -> Self {
        RouteRequirement {
            role: RequiredRole::Exactly(role),
            admin_only: false,
        }
    }

    pub fn admin() -> Self {
        RouteRequirement {
            role: RequiredRole::Exactly(Role::Admin),
            admin_only: true,
        }
    }
}

/// What the router should do with a page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Send the account to this path (the registration entry point).
    Redirect(String),
    /// Resolution still in flight; render a loading indicator instead of
    /// denying prematurely.
    Wait,
    /// Connection-level failure; surface it instead of silently redirecting.
    Error(String),
}

/// Decides whether the resolved role may enter a page.
pub fn guard(
    requirement: RouteRequirement,
    resolution: &ResolutionState,
    routes: &RoutePaths,
) -> RouteDecision {
    let role = match resolution {
        ResolutionState::Pending => return RouteDecision::Wait,
        ResolutionState::Failed(message) => return RouteDecision::Error(message.clone()),
        ResolutionState::Disconnected => {
            return RouteDecision::Redirect(routes.register.clone());
        }
        ResolutionState::Resolved(role) => *role,
    };

    // Unregistered and not-yet-approved accounts always land on registration.
    if !role.is_registered() {
        debug!(%role, "guard redirecting unregistered account");
        return RouteDecision::Redirect(routes.register.clone());
    }

    if requirement.admin_only {
        return if role == Role::Admin {
            RouteDecision::Allow
        } else {
            debug!(%role, "guard denying admin-only page");
            RouteDecision::Redirect(routes.register.clone())
        };
    }

    match requirement.role {
        RequiredRole::Any => RouteDecision::Allow,
        RequiredRole::Exactly(required) if required == role => RouteDecision::Allow,
        RequiredRole::Exactly(required) => {
            debug!(%role, %required, "guard redirecting role mismatch");
            RouteDecision::Redirect(routes.register.clone())
        }
    }
}
