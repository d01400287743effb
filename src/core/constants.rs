//! Fixed parameters of the location workflow

/// Desired interval between recurring location updates (ms)
pub const UPDATE_INTERVAL_MS: u64 = 3000;

/// Fastest delivery interval the session will accept (ms)
pub const FASTEST_UPDATE_INTERVAL_MS: u64 = 1500;

/// Camera zoom applied when seeding the map from the last known fix
pub const DEFAULT_CAMERA_ZOOM: u8 = 19;

/// Request code attached to the location permission request
pub const LOCATION_PERMISSION_REQUEST_CODE: u32 = 1;
