//! Periodic keep-alive driver for a long-running session.

use crate::error::SessionError;
use crate::session::{Outcome, ProxySession};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cooperative stop flag shared between the driver loop and a signal
/// handler.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Keeps a session alive until cancelled: every `interval`, ask the gateway
/// to extend the session, and fall back to a full login when the gateway
/// reports the session gone. A transport failure on one tick is logged and
/// the next tick simply tries again.
///
/// The interval is slept in one-second slices so cancellation takes effect
/// promptly. `sleep` is injected so tests drive the loop without real time.
pub fn run(
    session: &mut ProxySession,
    interval: Duration,
    cancel: &CancellationToken,
    sleep: impl Fn(Duration),
) {
    while !cancel.is_cancelled() {
        let mut remaining = interval;
        while !remaining.is_zero() {
            if cancel.is_cancelled() {
                return;
            }
            let slice = remaining.min(Duration::from_secs(1));
            sleep(slice);
            remaining -= slice;
        }
        // A cancel that arrived during the last slice must not cost the
        // gateway another round trip.
        if cancel.is_cancelled() {
            return;
        }

        match tick(session) {
            Ok(outcome) => info!("Refreshing... {}", outcome),
            Err(e) => warn!("Refreshing... {}", e),
        }
    }
}

/// One keep-alive round: refresh, then re-login if the session is gone.
fn tick(session: &mut ProxySession) -> Result<Outcome, SessionError> {
    let outcome = session.refresh()?;
    match outcome {
        Outcome::SessionExpired | Outcome::NotLoggedIn | Outcome::NotConnected => {
            info!("Session lost ({}), logging in again", outcome);
            session.login()
        }
        _ => Ok(outcome),
    }
}
