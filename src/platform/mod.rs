//! Platform abstraction layer for the host OS collaborators
//!
//! This module models the three services the map screen consumes but does
//! not own: the permission service, the fused location provider, and the
//! map widget. Their asynchronous callbacks all arrive through one event
//! channel.

pub mod events;
pub mod permissions;
pub mod location;
pub mod map;
pub mod mock;
pub mod replay;
pub mod error;

pub use events::{event_channel, EventReceiver, EventSender, PlatformEvent};
pub use permissions::{LocationCapability, PermissionResponse, PermissionService};
pub use location::{LocationProvider, LocationUpdateConfig, Priority, SubscriptionHandle};
pub use map::MapHandle;
pub use mock::{AutoRespond, MockLocationProvider, MockMapHandle, MockPermissionService};
pub use replay::{ReplayLocationProvider, TraceError};
pub use error::{PlatformError, PlatformResult};
