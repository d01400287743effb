//! Platform error types and handling

use crate::platform::permissions::LocationCapability;
use std::fmt;

/// Error types surfaced by the platform collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Operation rejected because the capability is not granted
    PermissionDenied { capability: LocationCapability },
    /// Location provider cannot serve requests right now
    ProviderUnavailable { reason: String },
    /// Subscription handle does not match an active subscription
    InvalidSubscription { handle: u64 },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::PermissionDenied { capability } => {
                write!(f, "Location permission not granted for {} access", capability)
            }
            PlatformError::ProviderUnavailable { reason } => {
                write!(f, "Location provider unavailable: {}", reason)
            }
            PlatformError::InvalidSubscription { handle } => {
                write!(f, "No active location subscription with handle {}", handle)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

impl PlatformError {
    /// Check whether this is the permission-enforcement case,
    /// which the session layer suppresses without a warning
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, PlatformError::PermissionDenied { .. })
    }
}
