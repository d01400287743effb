//! Core data types for the campus map screen

use serde::{Deserialize, Serialize};

/// Geodetic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Single fix delivered by the location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Position of the fix
    pub position: LatLng,
    /// Acquisition time (milliseconds since epoch)
    pub timestamp_ms: u64,
}

impl LocationSample {
    pub fn new(position: LatLng, timestamp_ms: u64) -> Self {
        Self { position, timestamp_ms }
    }
}

/// Location permission as last observed by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// No check has run yet
    Unknown,
    /// Checked and not granted
    Denied,
    /// Granted; never leaves this state
    Granted,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// Screen visibility as reported by the host lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Screen in the foreground, updates may run
    Visible,
    /// Screen backgrounded, updates must stop
    Hidden,
}
