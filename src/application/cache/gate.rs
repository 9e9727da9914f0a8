//! Single-flight gate for feed refreshes.
//!
//! One caller owns the gate while a refresh runs; everyone else parks on a
//! one-shot channel and is woken, all at once, when the owner releases.

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;

#[derive(Debug, Default)]
struct GateState {
    held: bool,
    waiters: Vec<oneshot::Sender<()>>,
}

/// Advisory lock with a broadcast wake-up on release.
///
/// The flag and the waiter queue share one mutex, so observing `held` and
/// enqueueing (or taking ownership) is a single atomic step.
#[derive(Debug, Default)]
pub struct LockGate {
    state: Mutex<GateState>,
}

/// Outcome of [`LockGate::enter`].
#[derive(Debug)]
pub enum Turn<'a> {
    /// The caller now owns the gate and must run the refresh.
    Owner(GateGuard<'a>),
    /// Someone else is refreshing; wait for them.
    Wait(Waiter),
}

/// Ownership of a [`LockGate`]. Releases the gate when dropped.
#[derive(Debug)]
#[must_use = "dropping the guard releases the gate immediately"]
pub struct GateGuard<'a> {
    gate: &'a LockGate,
}

impl GateGuard<'_> {
    /// Release the gate and wake every waiter.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

/// A parked caller. Resolves once the current owner releases.
#[derive(Debug)]
pub struct Waiter {
    rx: oneshot::Receiver<()>,
}

impl Waiter {
    pub async fn wait(self) {
        // A dropped sender means the gate itself went away; either way the
        // refresh this waiter was parked on is over.
        let _ = self.rx.await;
    }
}

impl LockGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh currently owns the gate.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.state.lock().held
    }

    /// Number of parked callers.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.state.lock().waiters.len()
    }

    /// Return immediately if the gate is free, otherwise park until release.
    pub async fn await_turn(&self) {
        let waiter = {
            let mut state = self.state.lock();
            if !state.held {
                return;
            }
            Self::park(&mut state)
        };
        waiter.wait().await;
    }

    /// Mark the gate as held.
    ///
    /// Returns `false` without changing anything if it already was; callers
    /// are expected to have observed a free gate first.
    pub fn acquire(&self) -> bool {
        let mut state = self.state.lock();
        if state.held {
            return false;
        }
        state.held = true;
        true
    }

    /// Clear the flag and wake every parked caller exactly once.
    pub fn release(&self) {
        let waiters = {
            let mut state = self.state.lock();
            state.held = false;
            std::mem::take(&mut state.waiters)
        };
        trace!(waiters = waiters.len(), "Gate released");
        for tx in waiters {
            let _ = tx.send(());
        }
    }

    /// Take ownership if free, otherwise enqueue as a waiter.
    pub fn enter(&self) -> Turn<'_> {
        let mut state = self.state.lock();
        if state.held {
            return Turn::Wait(Self::park(&mut state));
        }
        state.held = true;
        Turn::Owner(GateGuard { gate: self })
    }

    fn park(state: &mut GateState) -> Waiter {
        let (tx, rx) = oneshot::channel();
        state.waiters.push(tx);
        Waiter { rx }
    }
}
