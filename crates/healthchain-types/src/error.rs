//! Gateway error taxonomy.

use thiserror::Error;

/// Failures surfaced by the wallet/contract gateway.
///
/// Read failures degrade to "record absent" wherever a role or record is
/// being resolved; write failures carry the underlying revert reason verbatim
/// to the initiating form. Nothing here is fatal to the process — every
/// failure is recoverable by retrying the user action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No wallet/provider is available.
    #[error("wallet provider unavailable")]
    ConnectionUnavailable,

    /// A read call failed. Callers treat the record as absent.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A write call reverted.
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// A write call exceeded its bounded wait.
    #[error("transaction timed out after {0}s")]
    Timeout(u64),
}

impl GatewayError {
    /// Collapses the taxonomy to what the initiating form displays: timeouts
    /// surface as transaction failures.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Timeout(secs) => {
                format!("transaction failed: timed out after {secs}s")
            }
            other => other.to_string(),
        }
    }

    /// Whether the failure came from a read call and should degrade rather
    /// than propagate.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            GatewayError::QueryFailed(_) | GatewayError::ConnectionUnavailable
        )
    }
}
