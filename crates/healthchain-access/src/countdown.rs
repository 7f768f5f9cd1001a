//! Drives a [`CodeTracker`] against the live contract record.

use healthchain_gateway::Gateway;
use healthchain_types::Account;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::ticker::Ticker;
use crate::tracker::{CodeTracker, Tick};

/// Why a countdown run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEnd {
    /// The window closed and the re-fetched record confirmed no fresh code.
    Expired,
    /// The tracked code was cleared (cancelled, or fetched as zero) before
    /// the window closed.
    Cleared,
    /// The ticker was stopped from outside.
    Stopped,
}

/// Ticks `tracker` once per `ticker` beat until the code expires, is cleared,
/// or the ticker stops. `on_tick` sees every step for display.
///
/// On client-side expiry the authoritative record is re-fetched exactly once.
/// A new nonzero code restarts the window — the contract outranks the local
/// timer — while a zero code, the same stale code, or a failed read ends the
/// countdown as expired.
pub async fn run<G, C, T>(
    gateway: &G,
    account: &Account,
    tracker: &mut CodeTracker,
    clock: &C,
    ticker: &mut T,
    mut on_tick: impl FnMut(&Tick),
) -> CountdownEnd
where
    G: Gateway,
    C: Clock,
    T: Ticker,
{
    loop {
        if !ticker.next_tick().await {
            return CountdownEnd::Stopped;
        }

        let step = tracker.tick(clock.now());
        on_tick(&step);

        match step {
            Tick::Idle => return CountdownEnd::Cleared,
            Tick::Running { .. } => {}
            Tick::Expired { refresh } => {
                if refresh {
                    debug!(%account, "access code window closed, confirming with contract");
                    let fetched = match gateway.patient(account).await {
                        Ok(record) => record.map(|r| r.access_code).unwrap_or(0),
                        Err(err) => {
                            warn!(%account, error = %err, "confirming re-fetch failed, treating code as expired");
                            0
                        }
                    };
                    if tracker.observe(fetched, clock.now()) {
                        // A fresh code appeared server-side; keep counting.
                        continue;
                    }
                }
                return CountdownEnd::Expired;
            }
        }
    }
}
