//! Mock platform collaborators for testing and development
//!
//! Each mock is a cloneable handle over shared interior state: the gate,
//! session, or screen owns one clone as a boxed trait object while the
//! test (or the demo's simulator thread) keeps another to script the OS
//! side and inspect what was called.

use crate::core::types::{LatLng, LocationSample};
use crate::platform::error::{PlatformError, PlatformResult};
use crate::platform::events::{EventSender, PlatformEvent};
use crate::platform::location::{LocationProvider, LocationUpdateConfig, SubscriptionHandle};
use crate::platform::map::MapHandle;
use crate::platform::permissions::{LocationCapability, PermissionResponse, PermissionService};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Shared<T> = Arc<Mutex<T>>;

fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

fn guard<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// How the mock permission service reacts to a grant request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRespond {
    /// Queue nothing; the test scripts the response itself
    Disabled,
    /// Immediately deliver a grant result
    Grant,
    /// Immediately deliver a denial result
    Deny,
    /// Immediately deliver an empty result (dialog dismissed)
    Dismiss,
}

struct PermissionInner {
    fine_granted: bool,
    coarse_granted: bool,
    show_rationale: bool,
    auto_respond: AutoRespond,
    request_log: Vec<(u32, Vec<LocationCapability>)>,
    events: EventSender,
}

/// Mock OS permission service
#[derive(Clone)]
pub struct MockPermissionService {
    inner: Shared<PermissionInner>,
}

impl MockPermissionService {
    /// Create a mock service with nothing granted
    pub fn new(events: EventSender) -> Self {
        Self {
            inner: shared(PermissionInner {
                fine_granted: false,
                coarse_granted: false,
                show_rationale: false,
                auto_respond: AutoRespond::Disabled,
                request_log: Vec::new(),
                events,
            }),
        }
    }

    /// Script the current grant state of a capability
    pub fn set_granted(&self, capability: LocationCapability, granted: bool) {
        let mut inner = guard(&self.inner);
        match capability {
            LocationCapability::Fine => inner.fine_granted = granted,
            LocationCapability::Coarse => inner.coarse_granted = granted,
        }
    }

    /// Script whether the OS recommends a rationale before requesting
    pub fn set_rationale(&self, show: bool) {
        guard(&self.inner).show_rationale = show;
    }

    /// Configure the immediate reaction to grant requests
    pub fn set_auto_respond(&self, mode: AutoRespond) {
        guard(&self.inner).auto_respond = mode;
    }

    /// Requests issued so far, oldest first
    pub fn request_log(&self) -> Vec<(u32, Vec<LocationCapability>)> {
        guard(&self.inner).request_log.clone()
    }

    /// Number of grant requests issued so far
    pub fn request_count(&self) -> usize {
        guard(&self.inner).request_log.len()
    }

    /// Deliver the outcome of the most recent request
    /// A grant also flips the requested capabilities to granted, the way
    /// a real approval would. Returns false if no request was issued or
    /// the event channel is closed.
    pub fn respond(&self, granted: bool) -> bool {
        let response = {
            let mut inner = guard(&self.inner);
            let (request_code, capabilities) = match inner.request_log.last() {
                Some(entry) => entry.clone(),
                None => return false,
            };
            if granted {
                for capability in &capabilities {
                    match capability {
                        LocationCapability::Fine => inner.fine_granted = true,
                        LocationCapability::Coarse => inner.coarse_granted = true,
                    }
                }
            }
            let grant_results = vec![granted; capabilities.len()];
            PermissionResponse::new(request_code, capabilities, grant_results)
        };
        self.deliver(response)
    }

    /// Deliver an empty result for the most recent request, as when the
    /// user backs out of the dialog without choosing
    pub fn dismiss(&self) -> bool {
        let response = {
            let inner = guard(&self.inner);
            let (request_code, capabilities) = match inner.request_log.last() {
                Some(entry) => entry.clone(),
                None => return false,
            };
            PermissionResponse::new(request_code, capabilities, Vec::new())
        };
        self.deliver(response)
    }

    fn deliver(&self, response: PermissionResponse) -> bool {
        let events = guard(&self.inner).events.clone();
        events
            .send(PlatformEvent::PermissionResult { response })
            .is_ok()
    }
}

impl PermissionService for MockPermissionService {
    fn check_granted(&self, capability: LocationCapability) -> bool {
        let inner = guard(&self.inner);
        match capability {
            LocationCapability::Fine => inner.fine_granted,
            LocationCapability::Coarse => inner.coarse_granted,
        }
    }

    fn should_show_rationale(&self, capability: LocationCapability) -> bool {
        let inner = guard(&self.inner);
        match capability {
            LocationCapability::Fine | LocationCapability::Coarse => inner.show_rationale,
        }
    }

    fn request_grant(
        &mut self,
        request_code: u32,
        capabilities: &[LocationCapability],
    ) -> PlatformResult<()> {
        let mode = {
            let mut inner = guard(&self.inner);
            inner.request_log.push((request_code, capabilities.to_vec()));
            inner.auto_respond
        };
        match mode {
            AutoRespond::Disabled => {}
            AutoRespond::Grant => {
                self.respond(true);
            }
            AutoRespond::Deny => {
                self.respond(false);
            }
            AutoRespond::Dismiss => {
                self.dismiss();
            }
        }
        Ok(())
    }
}

struct ProviderInner {
    available: bool,
    permission_granted: bool,
    last_known: Option<LocationSample>,
    last_known_calls: u32,
    subscribe_log: Vec<LocationUpdateConfig>,
    active: HashSet<u64>,
    next_handle: u64,
    simulate_outages: bool,
    outage_probability: f32,
    events: EventSender,
}

/// Mock fused location provider
#[derive(Clone)]
pub struct MockLocationProvider {
    inner: Shared<ProviderInner>,
}

impl MockLocationProvider {
    /// Create an available provider with permission enforcement satisfied
    /// and no cached fix
    pub fn new(events: EventSender) -> Self {
        Self {
            inner: shared(ProviderInner {
                available: true,
                permission_granted: true,
                last_known: None,
                last_known_calls: 0,
                subscribe_log: Vec::new(),
                active: HashSet::new(),
                next_handle: 0,
                simulate_outages: false,
                outage_probability: 0.0,
                events,
            }),
        }
    }

    /// Script the cached most-recent fix
    pub fn set_last_known(&self, sample: Option<LocationSample>) {
        guard(&self.inner).last_known = sample;
    }

    /// Script provider availability (location services toggle)
    pub fn set_available(&self, available: bool) {
        guard(&self.inner).available = available;
    }

    /// Script the OS-side permission enforcement
    /// When false, every operation fails the way a real provider rejects
    /// an unpermitted caller
    pub fn set_permission_granted(&self, granted: bool) {
        guard(&self.inner).permission_granted = granted;
    }

    /// Enable outage simulation with given probability (0.0 to 1.0)
    pub fn simulate_outages(&self, enable: bool, probability: f32) {
        let mut inner = guard(&self.inner);
        inner.simulate_outages = enable;
        inner.outage_probability = probability.clamp(0.0, 1.0);
    }

    /// Deliver a batch of samples through the event channel
    /// Returns false when no subscription is active or the channel is
    /// closed; nothing is sent in either case
    pub fn emit_batch(&self, samples: &[LocationSample]) -> bool {
        let events = {
            let inner = guard(&self.inner);
            if inner.active.is_empty() {
                return false;
            }
            inner.events.clone()
        };
        events
            .send(PlatformEvent::LocationUpdate {
                samples: samples.to_vec(),
            })
            .is_ok()
    }

    /// Configurations passed to subscribe, oldest first
    pub fn subscribe_log(&self) -> Vec<LocationUpdateConfig> {
        guard(&self.inner).subscribe_log.clone()
    }

    /// Number of currently active subscriptions
    pub fn active_subscription_count(&self) -> usize {
        guard(&self.inner).active.len()
    }

    /// Number of cached-fix queries served or rejected so far
    pub fn last_known_calls(&self) -> u32 {
        guard(&self.inner).last_known_calls
    }

    fn check_serviceable(inner: &ProviderInner) -> PlatformResult<()> {
        if !inner.permission_granted {
            return Err(PlatformError::PermissionDenied {
                capability: LocationCapability::Fine,
            });
        }
        if !inner.available {
            return Err(PlatformError::ProviderUnavailable {
                reason: "location services disabled".to_string(),
            });
        }
        if Self::should_simulate_outage(inner) {
            return Err(PlatformError::ProviderUnavailable {
                reason: "simulated outage".to_string(),
            });
        }
        Ok(())
    }

    fn should_simulate_outage(inner: &ProviderInner) -> bool {
        if !inner.simulate_outages {
            return false;
        }

        use rand::Rng;
        let mut rng = rand::thread_rng();
        rng.gen::<f32>() < inner.outage_probability
    }
}

impl LocationProvider for MockLocationProvider {
    fn last_known_fix(&mut self) -> PlatformResult<Option<LocationSample>> {
        let mut inner = guard(&self.inner);
        inner.last_known_calls += 1;
        Self::check_serviceable(&inner)?;
        Ok(inner.last_known)
    }

    fn subscribe(&mut self, config: &LocationUpdateConfig) -> PlatformResult<SubscriptionHandle> {
        let mut inner = guard(&self.inner);
        Self::check_serviceable(&inner)?;

        inner.next_handle += 1;
        let handle = inner.next_handle;
        inner.active.insert(handle);
        inner.subscribe_log.push(*config);
        Ok(SubscriptionHandle::new(handle))
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) -> PlatformResult<()> {
        let mut inner = guard(&self.inner);
        if inner.active.remove(&handle.id()) {
            Ok(())
        } else {
            Err(PlatformError::InvalidSubscription {
                handle: handle.id(),
            })
        }
    }

    fn is_available(&self) -> bool {
        guard(&self.inner).available
    }
}

struct MapInner {
    user_location_layer: bool,
    camera_moves: Vec<(LatLng, u8)>,
    markers: Vec<(LatLng, String)>,
}

/// Mock map widget handle
#[derive(Clone)]
pub struct MockMapHandle {
    inner: Shared<MapInner>,
}

impl MockMapHandle {
    pub fn new() -> Self {
        Self {
            inner: shared(MapInner {
                user_location_layer: false,
                camera_moves: Vec::new(),
                markers: Vec::new(),
            }),
        }
    }

    /// Whether the user-location layer is currently enabled
    pub fn user_location_layer(&self) -> bool {
        guard(&self.inner).user_location_layer
    }

    /// Camera moves performed so far, oldest first
    pub fn camera_moves(&self) -> Vec<(LatLng, u8)> {
        guard(&self.inner).camera_moves.clone()
    }

    /// The most recent camera target, if any move happened
    pub fn camera(&self) -> Option<(LatLng, u8)> {
        guard(&self.inner).camera_moves.last().copied()
    }

    /// Markers placed so far, in placement order
    pub fn markers(&self) -> Vec<(LatLng, String)> {
        guard(&self.inner).markers.clone()
    }
}

impl Default for MockMapHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl MapHandle for MockMapHandle {
    fn set_user_location_layer(&mut self, enabled: bool) -> PlatformResult<()> {
        guard(&self.inner).user_location_layer = enabled;
        Ok(())
    }

    fn move_camera(&mut self, center: LatLng, zoom: u8) -> PlatformResult<()> {
        guard(&self.inner).camera_moves.push((center, zoom));
        Ok(())
    }

    fn add_marker(&mut self, position: LatLng, title: &str) -> PlatformResult<()> {
        guard(&self.inner).markers.push((position, title.to_string()));
        Ok(())
    }
}
