//! Platform event channel
//!
//! Every asynchronous callback of the host platform (lifecycle changes,
//! permission dialog outcomes, location deliveries, map readiness) is
//! funneled through one mpsc channel and drained by a single control
//! loop, so handlers never race each other.

use crate::core::types::{LifecycleState, LocationSample};
use crate::platform::map::MapHandle;
use crate::platform::permissions::PermissionResponse;
use std::fmt;
use std::sync::mpsc;

/// Sending endpoint handed to platform collaborators
pub type EventSender = mpsc::Sender<PlatformEvent>;

/// Receiving endpoint drained by the screen's control loop
pub type EventReceiver = mpsc::Receiver<PlatformEvent>;

/// Create the event channel connecting collaborators to the control loop
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel()
}

/// Asynchronous notifications produced by the platform collaborators
pub enum PlatformEvent {
    /// Screen visibility changed
    LifecycleChanged { state: LifecycleState },
    /// Outcome of a previously issued permission request
    PermissionResult { response: PermissionResponse },
    /// Batch of samples from the active update subscription
    LocationUpdate { samples: Vec<LocationSample> },
    /// Map widget finished loading and handed over its control surface
    MapReady { map: Box<dyn MapHandle> },
    /// Host is tearing the screen down; the control loop exits after
    /// processing this
    Shutdown,
}

impl fmt::Debug for PlatformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformEvent::LifecycleChanged { state } => f
                .debug_struct("LifecycleChanged")
                .field("state", state)
                .finish(),
            PlatformEvent::PermissionResult { response } => f
                .debug_struct("PermissionResult")
                .field("response", response)
                .finish(),
            PlatformEvent::LocationUpdate { samples } => f
                .debug_struct("LocationUpdate")
                .field("samples", samples)
                .finish(),
            PlatformEvent::MapReady { .. } => f.debug_struct("MapReady").finish_non_exhaustive(),
            PlatformEvent::Shutdown => f.debug_struct("Shutdown").finish(),
        }
    }
}
