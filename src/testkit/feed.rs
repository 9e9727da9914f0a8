//! Mock [`VehicleFeed`] for testing.
//!
//! [`ScriptedFeed`] replays queued responses, counts calls, records the
//! arguments it was called with and can hold a fetch in flight until the
//! test lets it go.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::TransportError;
use crate::port::outbound::{PositionMode, RawBatch, VehicleFeed};

/// Handle that releases a held [`ScriptedFeed`] fetch.
#[derive(Debug, Clone)]
pub struct FeedHold {
    notify: Arc<Notify>,
}

impl FeedHold {
    /// Let the next (or currently parked) fetch complete.
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

/// A feed with pre-loaded responses.
///
/// Each call pops the next response; once the script is exhausted every call
/// fails with [`TransportError::Request`].
#[derive(Debug, Default)]
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Result<RawBatch, TransportError>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(PositionMode, i64)>>,
    hold: Option<Arc<Notify>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(self, responses: Vec<Result<RawBatch, TransportError>>) -> Self {
        *self.responses.lock() = responses.into();
        self
    }

    /// Make every fetch wait for [`FeedHold::release`] before answering.
    pub fn held(mut self) -> (Self, FeedHold) {
        let notify = Arc::new(Notify::new());
        self.hold = Some(Arc::clone(&notify));
        (self, FeedHold { notify })
    }

    /// Append a response to the script.
    pub fn push(&self, response: Result<RawBatch, TransportError>) {
        self.responses.lock().push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(mode, since)` for every call so far, in order.
    pub fn requests(&self) -> Vec<(PositionMode, i64)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl VehicleFeed for ScriptedFeed {
    async fn fetch_batch(&self, mode: PositionMode, since: i64) -> Result<RawBatch, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((mode, since));

        if let Some(hold) = &self.hold {
            hold.notified().await;
        }

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("script exhausted".into())))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
