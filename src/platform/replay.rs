//! Replay provider fed from a recorded location trace
//!
//! Drives the same provider seam as the mock, but from a fixed JSON
//! recording instead of scripted state. Useful for demos and for
//! reproducing a walk that showed a bug.

use crate::core::types::LocationSample;
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::events::{EventSender, PlatformEvent};
use crate::platform::location::{LocationProvider, LocationUpdateConfig, SubscriptionHandle};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Errors raised while loading a trace recording
#[derive(Debug, Clone, PartialEq)]
pub enum TraceError {
    /// Trace file could not be read
    Io { path: String, details: String },
    /// Trace contents are not a valid recording
    Parse { details: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io { path, details } => {
                write!(f, "Failed to read trace {}: {}", path, details)
            }
            TraceError::Parse { details } => {
                write!(f, "Invalid trace recording: {}", details)
            }
        }
    }
}

impl std::error::Error for TraceError {}

#[derive(Debug, Deserialize)]
struct TraceFile {
    samples: Vec<LocationSample>,
}

struct ReplayInner {
    samples: Vec<LocationSample>,
    cursor: usize,
    batch_size: usize,
    cached: Option<LocationSample>,
    active: HashSet<u64>,
    next_handle: u64,
    events: EventSender,
}

/// Location provider replaying a recorded trace
#[derive(Clone)]
pub struct ReplayLocationProvider {
    inner: Arc<Mutex<ReplayInner>>,
}

impl ReplayLocationProvider {
    /// Build a provider over an in-memory sample sequence
    /// Batch size is clamped to at least one sample per delivery
    pub fn from_samples(
        samples: Vec<LocationSample>,
        batch_size: usize,
        events: EventSender,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ReplayInner {
                samples,
                cursor: 0,
                batch_size: batch_size.max(1),
                cached: None,
                active: HashSet::new(),
                next_handle: 0,
                events,
            })),
        }
    }

    /// Parse a JSON trace recording
    pub fn from_json(json: &str, batch_size: usize, events: EventSender) -> Result<Self, TraceError> {
        let trace: TraceFile = serde_json::from_str(json).map_err(|e| TraceError::Parse {
            details: e.to_string(),
        })?;
        Ok(Self::from_samples(trace.samples, batch_size, events))
    }

    /// Load a JSON trace recording from disk
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        batch_size: usize,
        events: EventSender,
    ) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| TraceError::Io {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_json(&json, batch_size, events)
    }

    /// Deliver the next batch of the recording through the event channel
    /// Returns false when no subscription is active or the recording is
    /// exhausted; nothing is sent in either case
    pub fn replay_next(&self) -> bool {
        let (batch, events) = {
            let mut inner = self.guard();
            if inner.active.is_empty() {
                return false;
            }
            let batch = Self::take_batch(&mut inner);
            if batch.is_empty() {
                return false;
            }
            inner.cached = batch.last().copied();
            (batch, inner.events.clone())
        };
        events
            .send(PlatformEvent::LocationUpdate { samples: batch })
            .is_ok()
    }

    /// Samples not yet replayed
    pub fn remaining(&self) -> usize {
        let inner = self.guard();
        inner.samples.len() - inner.cursor
    }

    fn take_batch(inner: &mut ReplayInner) -> Vec<LocationSample> {
        let end = (inner.cursor + inner.batch_size).min(inner.samples.len());
        let batch = inner.samples[inner.cursor..end].to_vec();
        inner.cursor = end;
        batch
    }

    fn guard(&self) -> MutexGuard<'_, ReplayInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocationProvider for ReplayLocationProvider {
    fn last_known_fix(&mut self) -> PlatformResult<Option<LocationSample>> {
        Ok(self.guard().cached)
    }

    fn subscribe(&mut self, _config: &LocationUpdateConfig) -> PlatformResult<SubscriptionHandle> {
        let mut inner = self.guard();
        inner.next_handle += 1;
        let handle = inner.next_handle;
        inner.active.insert(handle);
        Ok(SubscriptionHandle::new(handle))
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> PlatformResult<()> {
        let mut inner = self.guard();
        if inner.active.remove(&handle.id()) {
            Ok(())
        } else {
            Err(PlatformError::InvalidSubscription {
                handle: handle.id(),
            })
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}
