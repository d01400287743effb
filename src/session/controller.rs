//! Location update session tied to screen visibility
//!
//! The controller owns the provider subscription and nothing else: it
//! starts updates when the screen is visible and permission allows,
//! stops them when the screen hides, and serves the one-shot cached-fix
//! query used to seed the map camera. Every failure degrades to "no
//! location" instead of propagating.

use crate::core::types::LocationSample;
use crate::platform::location::{LocationProvider, LocationUpdateConfig, SubscriptionHandle};
use crate::session::gate::PermissionGate;

/// Subscription state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No update subscription is active
    Idle,
    /// A recurring update subscription is active
    Subscribed,
}

/// Controller for the recurring location-update session
pub struct LocationSessionController {
    provider: Box<dyn LocationProvider>,
    config: LocationUpdateConfig,
    subscription: Option<SubscriptionHandle>,
}

impl LocationSessionController {
    /// Create an idle session; the configuration is fixed for the
    /// controller's lifetime
    pub fn new(provider: Box<dyn LocationProvider>, config: LocationUpdateConfig) -> Self {
        Self {
            provider,
            config,
            subscription: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.subscription.is_some() {
            SessionState::Subscribed
        } else {
            SessionState::Idle
        }
    }

    /// The subscription parameters this session always uses
    pub fn config(&self) -> LocationUpdateConfig {
        self.config
    }

    /// Open the update subscription if permission allows
    /// Calling again while subscribed changes nothing; a provider
    /// failure leaves the session idle
    pub fn start_updates(&mut self, gate: &PermissionGate) {
        if self.subscription.is_some() {
            log::debug!("location updates already running");
            return;
        }

        if !gate.has_location_permission() {
            log::info!("location permission missing, not starting updates");
            return;
        }

        match self.provider.subscribe(&self.config) {
            Ok(handle) => {
                log::info!(
                    "location updates started (interval {} ms, fastest {} ms)",
                    self.config.interval_ms,
                    self.config.fastest_interval_ms
                );
                self.subscription = Some(handle);
            }
            Err(e) if e.is_permission_denied() => {
                log::info!("provider rejected subscription: {}", e);
            }
            Err(e) => {
                log::warn!("failed to start location updates: {}", e);
            }
        }
    }

    /// Close the update subscription; safe to call when idle
    pub fn stop_updates(&mut self) {
        match self.subscription.take() {
            Some(handle) => match self.provider.unsubscribe(handle) {
                Ok(()) => log::info!("location updates stopped"),
                Err(e) => log::warn!("failed to stop location updates: {}", e),
            },
            None => log::debug!("no active location subscription to stop"),
        }
    }

    /// Best-effort query of the provider's cached fix
    /// Absent permission, an unavailable provider, and an empty cache
    /// all yield None; a subscription is never opened
    pub fn fetch_last_known(&mut self, gate: &PermissionGate) -> Option<LocationSample> {
        if !gate.has_location_permission() {
            log::debug!("skipping last known fix, permission missing");
            return None;
        }

        match self.provider.last_known_fix() {
            Ok(Some(sample)) => Some(sample),
            Ok(None) => {
                log::debug!("no cached fix available");
                None
            }
            Err(e) if e.is_permission_denied() => {
                log::debug!("provider rejected cached fix query: {}", e);
                None
            }
            Err(e) => {
                log::warn!("last known fix unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LatLng, LocationSample};
    use crate::platform::events::event_channel;
    use crate::platform::location::Priority;
    use crate::platform::mock::{MockLocationProvider, MockPermissionService};
    use crate::platform::permissions::LocationCapability;

    fn fixture(granted: bool) -> (LocationSessionController, MockLocationProvider, PermissionGate) {
        let (tx, _rx) = event_channel();
        let provider = MockLocationProvider::new(tx.clone());
        let service = MockPermissionService::new(tx);
        service.set_granted(LocationCapability::Fine, granted);
        let gate = PermissionGate::new(Box::new(service));
        let controller = LocationSessionController::new(
            Box::new(provider.clone()),
            LocationUpdateConfig::default(),
        );
        (controller, provider, gate)
    }

    fn fix() -> LocationSample {
        LocationSample::new(LatLng::new(36.31959, 127.3660), 5000)
    }

    #[test]
    fn test_start_requires_permission() {
        let (mut controller, provider, gate) = fixture(false);

        controller.start_updates(&gate);
        assert_eq!(controller.state(), SessionState::Idle);
        assert!(provider.subscribe_log().is_empty());
    }

    #[test]
    fn test_start_subscribes_when_permitted() {
        let (mut controller, provider, gate) = fixture(true);

        controller.start_updates(&gate);
        assert_eq!(controller.state(), SessionState::Subscribed);
        assert_eq!(provider.active_subscription_count(), 1);
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut controller, provider, gate) = fixture(true);

        controller.start_updates(&gate);
        controller.start_updates(&gate);
        assert_eq!(provider.subscribe_log().len(), 1);
        assert_eq!(provider.active_subscription_count(), 1);
    }

    #[test]
    fn test_stop_when_idle_is_harmless() {
        let (mut controller, provider, _gate) = fixture(true);

        controller.stop_updates();
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(provider.active_subscription_count(), 0);
    }

    #[test]
    fn test_stop_closes_subscription() {
        let (mut controller, provider, gate) = fixture(true);

        controller.start_updates(&gate);
        controller.stop_updates();
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(provider.active_subscription_count(), 0);

        // a fresh start opens a new subscription
        controller.start_updates(&gate);
        assert_eq!(provider.subscribe_log().len(), 2);
    }

    #[test]
    fn test_config_reused_for_every_subscription() {
        let (tx, _rx) = event_channel();
        let provider = MockLocationProvider::new(tx.clone());
        let service = MockPermissionService::new(tx);
        service.set_granted(LocationCapability::Fine, true);
        let gate = PermissionGate::new(Box::new(service));

        let config = LocationUpdateConfig::new(3000, 1500, Priority::HighAccuracy);
        let mut controller = LocationSessionController::new(Box::new(provider.clone()), config);
        assert_eq!(controller.config(), config);

        controller.start_updates(&gate);
        controller.stop_updates();
        controller.start_updates(&gate);

        assert_eq!(provider.subscribe_log(), vec![config, config]);
    }

    #[test]
    fn test_fetch_never_subscribes() {
        let (mut controller, provider, gate) = fixture(true);
        provider.set_last_known(Some(fix()));

        let result = controller.fetch_last_known(&gate);
        assert_eq!(result, Some(fix()));
        assert!(provider.subscribe_log().is_empty());
        assert_eq!(provider.active_subscription_count(), 0);
    }

    #[test]
    fn test_fetch_without_permission_skips_provider() {
        let (mut controller, provider, gate) = fixture(false);
        provider.set_last_known(Some(fix()));

        assert_eq!(controller.fetch_last_known(&gate), None);
        assert_eq!(provider.last_known_calls(), 0);
    }

    #[test]
    fn test_fetch_with_empty_cache() {
        let (mut controller, _provider, gate) = fixture(true);
        assert_eq!(controller.fetch_last_known(&gate), None);
    }

    #[test]
    fn test_fetch_maps_outage_to_none() {
        let (mut controller, provider, gate) = fixture(true);
        provider.set_last_known(Some(fix()));
        provider.set_available(false);

        assert_eq!(controller.fetch_last_known(&gate), None);
    }

    #[test]
    fn test_subscribe_failure_leaves_session_idle() {
        let (mut controller, provider, gate) = fixture(true);
        provider.set_available(false);

        controller.start_updates(&gate);
        assert_eq!(controller.state(), SessionState::Idle);

        // recovery works once the provider is back
        provider.set_available(true);
        controller.start_updates(&gate);
        assert_eq!(controller.state(), SessionState::Subscribed);
    }

    #[test]
    fn test_provider_side_permission_rejection() {
        let (mut controller, provider, gate) = fixture(true);
        provider.set_permission_granted(false);

        controller.start_updates(&gate);
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(controller.fetch_last_known(&gate), None);
    }
}
