//! Permission gate for the location workflow
//!
//! Owns the observed permission state and the startup one-shot fetch
//! that must wait until the OS grants location access. The gate never
//! performs location work itself; it hands directives back to the
//! caller so the screen decides what to run.

use crate::core::constants::LOCATION_PERMISSION_REQUEST_CODE;
use crate::core::types::PermissionState;
use crate::platform::permissions::{LocationCapability, PermissionResponse, PermissionService};

/// Directive returned by gate operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Nothing for the caller to do
    None,
    /// Permission is available and the held one-shot fetch is released;
    /// the caller should run it now
    RunPendingFetch,
}

/// Gatekeeper between the screen and the OS permission service
pub struct PermissionGate {
    service: Box<dyn PermissionService>,
    state: PermissionState,
    pending_fetch: bool,
    outstanding_request: Option<u32>,
}

impl PermissionGate {
    /// Create a gate holding the startup one-shot fetch
    pub fn new(service: Box<dyn PermissionService>) -> Self {
        Self {
            service,
            state: PermissionState::Unknown,
            pending_fetch: true,
            outstanding_request: None,
        }
    }

    /// Live permission query against the OS service
    /// Either tier satisfies the location workflow
    pub fn has_location_permission(&self) -> bool {
        self.service.check_granted(LocationCapability::Fine)
            || self.service.check_granted(LocationCapability::Coarse)
    }

    /// Permission state as last observed by a gate operation
    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Whether the startup one-shot fetch is still held back
    pub fn has_pending_fetch(&self) -> bool {
        self.pending_fetch
    }

    /// Check permission and, if absent, ask the OS for a fine-location
    /// grant. When permission is already present the held one-shot fetch
    /// is released instead.
    pub fn request_permission_if_needed(&mut self) -> GateAction {
        if self.has_location_permission() {
            self.observe_granted();
            return self.release_pending_fetch();
        }

        self.observe_denied();

        if self.outstanding_request.is_some() {
            log::debug!("permission request already outstanding, not asking again");
            return GateAction::None;
        }

        if self.service.should_show_rationale(LocationCapability::Fine) {
            log::info!("permission rationale recommended, requesting grant anyway");
        }

        match self.service.request_grant(
            LOCATION_PERMISSION_REQUEST_CODE,
            &[LocationCapability::Fine],
        ) {
            Ok(()) => {
                self.outstanding_request = Some(LOCATION_PERMISSION_REQUEST_CODE);
                log::debug!(
                    "issued location permission request with code {}",
                    LOCATION_PERMISSION_REQUEST_CODE
                );
            }
            Err(e) => {
                log::warn!("permission request failed: {}", e);
            }
        }

        GateAction::None
    }

    /// Feed back the asynchronous outcome of a permission request
    /// Responses that do not match the outstanding request code are
    /// ignored. A grant releases the held one-shot fetch.
    pub fn on_permission_result(&mut self, response: PermissionResponse) -> GateAction {
        match self.outstanding_request {
            Some(code) if code == response.request_code => {}
            _ => {
                log::debug!(
                    "ignoring permission result with unexpected request code {}",
                    response.request_code
                );
                return GateAction::None;
            }
        }

        self.outstanding_request = None;

        if response.granted() {
            log::info!("location permission granted");
            self.observe_granted();
            self.release_pending_fetch()
        } else {
            log::info!("location permission denied, continuing without location");
            self.observe_denied();
            GateAction::None
        }
    }

    fn observe_granted(&mut self) {
        self.state = PermissionState::Granted;
    }

    // Granted is sticky; a spurious later denial does not downgrade it
    fn observe_denied(&mut self) {
        if self.state != PermissionState::Granted {
            self.state = PermissionState::Denied;
        }
    }

    fn release_pending_fetch(&mut self) -> GateAction {
        if self.pending_fetch {
            self.pending_fetch = false;
            GateAction::RunPendingFetch
        } else {
            GateAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::{PlatformError, PlatformResult};
    use crate::platform::events::event_channel;
    use crate::platform::mock::MockPermissionService;

    fn gate_with_service() -> (PermissionGate, MockPermissionService) {
        let (tx, _rx) = event_channel();
        let service = MockPermissionService::new(tx);
        let gate = PermissionGate::new(Box::new(service.clone()));
        (gate, service)
    }

    fn granted_response() -> PermissionResponse {
        PermissionResponse::new(
            LOCATION_PERMISSION_REQUEST_CODE,
            vec![LocationCapability::Fine],
            vec![true],
        )
    }

    fn denied_response() -> PermissionResponse {
        PermissionResponse::new(
            LOCATION_PERMISSION_REQUEST_CODE,
            vec![LocationCapability::Fine],
            vec![false],
        )
    }

    #[test]
    fn test_granted_releases_fetch_without_request() {
        let (mut gate, service) = gate_with_service();
        service.set_granted(LocationCapability::Fine, true);

        assert_eq!(gate.request_permission_if_needed(), GateAction::RunPendingFetch);
        assert_eq!(gate.state(), PermissionState::Granted);
        assert_eq!(service.request_count(), 0);
        assert!(!gate.has_pending_fetch());
    }

    #[test]
    fn test_fetch_released_only_once() {
        let (mut gate, service) = gate_with_service();
        service.set_granted(LocationCapability::Fine, true);

        assert_eq!(gate.request_permission_if_needed(), GateAction::RunPendingFetch);
        assert_eq!(gate.request_permission_if_needed(), GateAction::None);
    }

    #[test]
    fn test_coarse_grant_satisfies_query() {
        let (gate, service) = gate_with_service();
        service.set_granted(LocationCapability::Coarse, true);
        assert!(gate.has_location_permission());
    }

    #[test]
    fn test_missing_permission_issues_fine_request() {
        let (mut gate, service) = gate_with_service();

        assert_eq!(gate.request_permission_if_needed(), GateAction::None);
        assert_eq!(gate.state(), PermissionState::Denied);
        assert!(gate.has_pending_fetch());
        assert_eq!(
            service.request_log(),
            vec![(LOCATION_PERMISSION_REQUEST_CODE, vec![LocationCapability::Fine])]
        );
    }

    #[test]
    fn test_rationale_condition_still_requests() {
        let (mut gate, service) = gate_with_service();
        service.set_rationale(true);

        gate.request_permission_if_needed();
        assert_eq!(service.request_count(), 1);
    }

    #[test]
    fn test_outstanding_request_not_duplicated() {
        let (mut gate, service) = gate_with_service();

        gate.request_permission_if_needed();
        gate.request_permission_if_needed();
        assert_eq!(service.request_count(), 1);
    }

    #[test]
    fn test_grant_result_releases_fetch() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        let action = gate.on_permission_result(granted_response());

        assert_eq!(action, GateAction::RunPendingFetch);
        assert_eq!(gate.state(), PermissionState::Granted);
        assert!(!gate.has_pending_fetch());
    }

    #[test]
    fn test_denial_result_keeps_fetch_held() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        let action = gate.on_permission_result(denied_response());

        assert_eq!(action, GateAction::None);
        assert_eq!(gate.state(), PermissionState::Denied);
        assert!(gate.has_pending_fetch());
    }

    #[test]
    fn test_fetch_survives_denial_until_grant() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        gate.on_permission_result(denied_response());

        gate.request_permission_if_needed();
        let action = gate.on_permission_result(granted_response());
        assert_eq!(action, GateAction::RunPendingFetch);
    }

    #[test]
    fn test_empty_grant_results_treated_as_denial() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        let dismissed = PermissionResponse::new(
            LOCATION_PERMISSION_REQUEST_CODE,
            vec![LocationCapability::Fine],
            vec![],
        );
        let action = gate.on_permission_result(dismissed);

        assert_eq!(action, GateAction::None);
        assert_eq!(gate.state(), PermissionState::Denied);
    }

    #[test]
    fn test_mismatched_request_code_ignored() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        let stray = PermissionResponse::new(99, vec![LocationCapability::Fine], vec![true]);
        assert_eq!(gate.on_permission_result(stray), GateAction::None);
        assert_eq!(gate.state(), PermissionState::Denied);

        // the real outcome still matches afterwards
        assert_eq!(
            gate.on_permission_result(granted_response()),
            GateAction::RunPendingFetch
        );
    }

    #[test]
    fn test_result_without_outstanding_request_ignored() {
        let (mut gate, _service) = gate_with_service();
        assert_eq!(gate.on_permission_result(granted_response()), GateAction::None);
        assert_eq!(gate.state(), PermissionState::Unknown);
    }

    #[test]
    fn test_granted_state_is_sticky() {
        let (mut gate, _service) = gate_with_service();

        gate.request_permission_if_needed();
        gate.on_permission_result(granted_response());
        assert_eq!(gate.state(), PermissionState::Granted);

        // no request is outstanding, so a stray denial changes nothing
        gate.on_permission_result(denied_response());
        assert_eq!(gate.state(), PermissionState::Granted);
    }

    #[test]
    fn test_failed_request_leaves_gate_retryable() {
        struct RefusingService;

        impl PermissionService for RefusingService {
            fn check_granted(&self, _capability: LocationCapability) -> bool {
                false
            }

            fn should_show_rationale(&self, _capability: LocationCapability) -> bool {
                false
            }

            fn request_grant(
                &mut self,
                _request_code: u32,
                _capabilities: &[LocationCapability],
            ) -> PlatformResult<()> {
                Err(PlatformError::ProviderUnavailable {
                    reason: "permission UI unavailable".to_string(),
                })
            }
        }

        let mut gate = PermissionGate::new(Box::new(RefusingService));
        assert_eq!(gate.request_permission_if_needed(), GateAction::None);

        // a failed dispatch leaves no outstanding request, so the next
        // attempt asks again instead of being suppressed
        assert_eq!(gate.request_permission_if_needed(), GateAction::None);
        assert_eq!(gate.state(), PermissionState::Denied);
    }
}
