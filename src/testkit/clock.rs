//! Settable clock for staleness and TTL tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;

use crate::application::clock::Clock;

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A clock that answers each read with the next scripted instant.
///
/// Once the script runs out it keeps returning the last instant it handed
/// out. Useful for steering a caller down a particular branch when it reads
/// the time more than once.
#[derive(Debug, Default)]
pub struct SequenceClock {
    script: Mutex<VecDeque<i64>>,
    last: AtomicI64,
}

impl SequenceClock {
    pub fn new(instants: impl IntoIterator<Item = i64>) -> Self {
        Self {
            script: Mutex::new(instants.into_iter().collect()),
            last: AtomicI64::new(0),
        }
    }

    /// Instants not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl Clock for SequenceClock {
    fn now_millis(&self) -> i64 {
        match self.script.lock().pop_front() {
            Some(now) => {
                self.last.store(now, Ordering::SeqCst);
                now
            }
            None => self.last.load(Ordering::SeqCst),
        }
    }
}
