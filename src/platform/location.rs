//! Location provider interface and update-subscription vocabulary

use crate::core::types::LocationSample;
use crate::core::constants::{FASTEST_UPDATE_INTERVAL_MS, UPDATE_INTERVAL_MS};
use crate::platform::error::PlatformResult;
use serde::{Deserialize, Serialize};

/// Handle identifying an active update subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(id: u64) -> Self {
        SubscriptionHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Accuracy/power trade-off requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Most precise fixes, highest power draw
    HighAccuracy,
    /// Block-level accuracy at reduced power
    BalancedPower,
    /// City-level accuracy, minimal power
    LowPower,
    /// No active positioning, piggyback on other clients
    Passive,
}

/// Parameters for a recurring update subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdateConfig {
    /// Desired interval between updates (milliseconds)
    pub interval_ms: u64,
    /// Fastest delivery interval the client will accept (milliseconds)
    pub fastest_interval_ms: u64,
    /// Requested accuracy/power trade-off
    pub priority: Priority,
}

impl Default for LocationUpdateConfig {
    fn default() -> Self {
        Self {
            interval_ms: UPDATE_INTERVAL_MS,
            fastest_interval_ms: FASTEST_UPDATE_INTERVAL_MS,
            priority: Priority::HighAccuracy,
        }
    }
}

impl LocationUpdateConfig {
    pub fn new(interval_ms: u64, fastest_interval_ms: u64, priority: Priority) -> Self {
        Self {
            interval_ms,
            fastest_interval_ms,
            priority,
        }
    }
}

/// Fused location provider abstraction
pub trait LocationProvider {
    /// Query the provider's cached most-recent fix
    /// Returns Ok(Some(sample)) if a cached fix exists
    /// Returns Ok(None) if the provider has nothing cached yet
    /// Returns Err(error) if the provider is unavailable or enforces a missing permission
    fn last_known_fix(&mut self) -> PlatformResult<Option<LocationSample>>;

    /// Open a recurring update subscription with the given parameters
    /// Samples are delivered as location-update events, never as return values
    fn subscribe(&mut self, config: &LocationUpdateConfig) -> PlatformResult<SubscriptionHandle>;

    /// Close an active subscription; the provider emits nothing for it afterwards
    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> PlatformResult<()>;

    /// Check whether the provider can currently serve requests
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_update_config() {
        let config = LocationUpdateConfig::default();
        assert_eq!(config.interval_ms, 3000);
        assert_eq!(config.fastest_interval_ms, 1500);
        assert_eq!(config.priority, Priority::HighAccuracy);
    }

    #[test]
    fn test_subscription_handle_id() {
        let handle = SubscriptionHandle::new(7);
        assert_eq!(handle.id(), 7);
    }
}
