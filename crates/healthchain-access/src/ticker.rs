//! One-second cadence with an explicit stop handle.
//!
//! The countdown is never driven by an ambient interval tied to a view's
//! lifetime. Hosts wrap their platform timer in a tick stream (a browser
//! interval on wasm, a runtime interval elsewhere) and keep the handle; the
//! handle stops the cadence without reaching into the timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::{Stream, StreamExt};

/// Cadence source for a countdown.
#[allow(async_fn_in_trait)]
pub trait Ticker {
    /// Waits for the next beat. Returns `false` once the ticker has been
    /// stopped or its underlying source is exhausted.
    async fn next_tick(&mut self) -> bool;
}

/// Stop handle for a [`StreamTicker`].
#[derive(Clone, Debug, Default)]
pub struct TickerHandle {
    stopped: Arc<AtomicBool>,
}

impl TickerHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Ticker over any unit stream.
pub struct StreamTicker<S> {
    ticks: S,
    handle: TickerHandle,
}

impl<S> StreamTicker<S>
where
    S: Stream<Item = ()> + Unpin,
{
    pub fn new(ticks: S) -> (Self, TickerHandle) {
        let handle = TickerHandle::default();
        let ticker = StreamTicker {
            ticks,
            handle: handle.clone(),
        };
        (ticker, handle)
    }
}

impl<S> Ticker for StreamTicker<S>
where
    S: Stream<Item = ()> + Unpin,
{
    async fn next_tick(&mut self) -> bool {
        if self.handle.is_stopped() {
            return false;
        }
        match self.ticks.next().await {
            // The handle may have been stopped while we were waiting.
            Some(()) => !self.handle.is_stopped(),
            None => false,
        }
    }
}
