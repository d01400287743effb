//! Campus Map Location Session
//!
//! A single-screen campus map workflow: runtime permission gating,
//! recurring fused-location updates tied to screen visibility, and a
//! map widget seeded with the last known fix and campus landmark pins.
//! Platform collaborators sit behind traits and report back through one
//! event channel drained by the screen's control loop.

pub mod core;
pub mod formatting;
pub mod platform;
pub mod screen;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    LatLng, LifecycleState, LocationSample, PermissionState, DEFAULT_CAMERA_ZOOM,
    FASTEST_UPDATE_INTERVAL_MS, LOCATION_PERMISSION_REQUEST_CODE, UPDATE_INTERVAL_MS,
};
pub use formatting::{CsvFormatter, FixFormatter, JsonFormatter, TextFormatter};
pub use platform::{
    event_channel, AutoRespond, EventReceiver, EventSender, LocationCapability, LocationProvider,
    LocationUpdateConfig, MapHandle, MockLocationProvider, MockMapHandle, MockPermissionService,
    PermissionResponse, PermissionService, PlatformError, PlatformEvent, PlatformResult, Priority,
    ReplayLocationProvider, SubscriptionHandle, TraceError,
};
pub use screen::{campus_center, campus_landmarks, LandmarkPin, MapScreen};
pub use session::{GateAction, LocationSessionController, PermissionGate, SessionState};
pub use utils::{AppConfig, ConfigError};
