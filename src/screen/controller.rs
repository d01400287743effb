//! Map screen controller and event loop
//!
//! Composes the permission gate, the location session, and the map
//! widget handle into the single-screen workflow: request permission at
//! startup, seed the camera from the last known fix once the map is
//! ready, overlay the landmark pins, and tie recurring updates to
//! screen visibility. All platform callbacks arrive as events drained
//! by `run`.

use crate::core::constants::DEFAULT_CAMERA_ZOOM;
use crate::core::types::{LatLng, LifecycleState, LocationSample, PermissionState};
use crate::formatting::{FixFormatter, TextFormatter};
use crate::platform::events::{EventReceiver, PlatformEvent};
use crate::platform::map::MapHandle;
use crate::platform::permissions::PermissionResponse;
use crate::screen::landmarks::{campus_landmarks, LandmarkPin};
use crate::session::controller::{LocationSessionController, SessionState};
use crate::session::gate::{GateAction, PermissionGate};

/// Single-screen campus map controller
pub struct MapScreen {
    gate: PermissionGate,
    session: LocationSessionController,
    map: Option<Box<dyn MapHandle>>,
    landmarks: Vec<LandmarkPin>,
    camera_zoom: u8,
    user_location_layer: bool,
    log_each_fix: bool,
    lifecycle: LifecycleState,
    camera_seeded: bool,
    initial_fix: Option<LocationSample>,
    samples_seen: u64,
}

impl MapScreen {
    /// Create the screen with the default campus landmark set
    pub fn new(gate: PermissionGate, session: LocationSessionController) -> Self {
        Self {
            gate,
            session,
            map: None,
            landmarks: campus_landmarks(),
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            user_location_layer: true,
            log_each_fix: true,
            lifecycle: LifecycleState::Hidden,
            camera_seeded: false,
            initial_fix: None,
            samples_seen: 0,
        }
    }

    /// Override the zoom applied when seeding the camera
    pub fn with_camera_zoom(mut self, zoom: u8) -> Self {
        self.camera_zoom = zoom;
        self
    }

    /// Toggle the map's user-location layer
    pub fn with_user_location_layer(mut self, enabled: bool) -> Self {
        self.user_location_layer = enabled;
        self
    }

    /// Toggle per-sample logging of recurring updates
    pub fn with_fix_logging(mut self, enabled: bool) -> Self {
        self.log_each_fix = enabled;
        self
    }

    /// Startup entry point: check permission and either run the held
    /// startup fetch or ask the OS for a grant
    pub fn start(&mut self) {
        log::info!("map screen starting");
        if self.gate.request_permission_if_needed() == GateAction::RunPendingFetch {
            self.run_startup_fetch();
        }
    }

    /// Dispatch one platform event
    pub fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::LifecycleChanged { state } => self.on_lifecycle(state),
            PlatformEvent::PermissionResult { response } => self.on_permission_result(response),
            PlatformEvent::LocationUpdate { samples } => self.on_location_update(samples),
            PlatformEvent::MapReady { map } => self.on_map_ready(map),
            PlatformEvent::Shutdown => {
                log::info!("shutdown requested");
                self.session.stop_updates();
            }
        }
    }

    /// Drain the event channel until a shutdown event arrives or every
    /// sender is gone
    pub fn run(&mut self, events: EventReceiver) {
        while let Ok(event) = events.recv() {
            let done = matches!(event, PlatformEvent::Shutdown);
            self.handle_event(event);
            if done {
                break;
            }
        }
        log::info!("map screen event loop finished");
        self.session.stop_updates();
    }

    pub fn permission_state(&self) -> PermissionState {
        self.gate.state()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Whether the map widget has delivered its handle
    pub fn map_ready(&self) -> bool {
        self.map.is_some()
    }

    /// Whether the camera was centered on a fix
    pub fn camera_seeded(&self) -> bool {
        self.camera_seeded
    }

    /// Total recurring samples consumed so far
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    fn on_lifecycle(&mut self, state: LifecycleState) {
        self.lifecycle = state;
        match state {
            LifecycleState::Visible => {
                log::debug!("screen visible");
                self.session.start_updates(&self.gate);
            }
            LifecycleState::Hidden => {
                log::debug!("screen hidden");
                self.session.stop_updates();
            }
        }
    }

    fn on_permission_result(&mut self, response: PermissionResponse) {
        if self.gate.on_permission_result(response) == GateAction::RunPendingFetch {
            self.run_startup_fetch();
        }
    }

    fn on_location_update(&mut self, samples: Vec<LocationSample>) {
        for sample in samples {
            self.samples_seen += 1;
            if self.log_each_fix {
                log::debug!("location update: {}", TextFormatter.format(&sample));
            }
        }
    }

    fn on_map_ready(&mut self, map: Box<dyn MapHandle>) {
        if self.map.is_some() {
            log::warn!("duplicate map-ready delivery ignored");
            return;
        }
        log::info!("map ready, preparing overlays");
        self.map = Some(map);

        let granted = self.gate.has_location_permission();
        if self.user_location_layer && granted {
            if let Some(map) = self.map.as_mut() {
                if let Err(e) = map.set_user_location_layer(true) {
                    log::warn!("failed to enable user location layer: {}", e);
                }
            }
        } else {
            log::debug!("user location layer stays off");
        }

        if let Some(sample) = self.initial_fix {
            self.seed_camera(sample.position);
        }

        self.place_landmarks();
    }

    // The startup one-shot: fetch the cached fix and remember it for
    // camera seeding, which may happen now or when the map arrives
    fn run_startup_fetch(&mut self) {
        match self.session.fetch_last_known(&self.gate) {
            Some(sample) => {
                log::info!("startup fix: {}", TextFormatter.format(&sample));
                self.initial_fix = Some(sample);
                self.seed_camera(sample.position);
            }
            None => {
                log::info!("no startup fix available, leaving camera at default");
            }
        }
    }

    fn seed_camera(&mut self, position: LatLng) {
        if self.camera_seeded {
            return;
        }
        let zoom = self.camera_zoom;
        let map = match self.map.as_mut() {
            Some(map) => map,
            None => return,
        };
        match map.move_camera(position, zoom) {
            Ok(()) => {
                self.camera_seeded = true;
                log::info!(
                    "camera centered at {:.5}, {:.5} (zoom {})",
                    position.latitude,
                    position.longitude,
                    zoom
                );
            }
            Err(e) => log::warn!("failed to move camera: {}", e),
        }
    }

    fn place_landmarks(&mut self) {
        let map = match self.map.as_mut() {
            Some(map) => map,
            None => return,
        };
        let mut placed = 0;
        for pin in &self.landmarks {
            match map.add_marker(pin.position, &pin.label) {
                Ok(()) => placed += 1,
                Err(e) => log::warn!("failed to place marker {}: {}", pin.label, e),
            }
        }
        log::info!("placed {} of {} landmark markers", placed, self.landmarks.len());
    }
}
