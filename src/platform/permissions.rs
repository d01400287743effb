//! Permission service interface and grant-result vocabulary

use crate::platform::error::PlatformResult;
use std::fmt;

/// Location permission tiers offered by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationCapability {
    /// Precise positioning (GPS-grade)
    Fine,
    /// Approximate positioning (network-grade)
    Coarse,
}

impl fmt::Display for LocationCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationCapability::Fine => write!(f, "fine"),
            LocationCapability::Coarse => write!(f, "coarse"),
        }
    }
}

/// Outcome of a permission request, delivered asynchronously
///
/// Mirrors the OS callback shape: the echoed request code, the
/// capabilities that were asked for, and one grant flag per capability.
/// An empty `grant_results` means the dialog was dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionResponse {
    pub request_code: u32,
    pub capabilities: Vec<LocationCapability>,
    pub grant_results: Vec<bool>,
}

impl PermissionResponse {
    pub fn new(
        request_code: u32,
        capabilities: Vec<LocationCapability>,
        grant_results: Vec<bool>,
    ) -> Self {
        Self {
            request_code,
            capabilities,
            grant_results,
        }
    }

    /// True when the response carries at least one result and the
    /// first requested capability was granted
    pub fn granted(&self) -> bool {
        !self.grant_results.is_empty() && self.grant_results[0]
    }
}

/// OS permission service abstraction
pub trait PermissionService {
    /// Check whether a capability is currently granted
    /// Pure query, no dialog is shown
    fn check_granted(&self, capability: LocationCapability) -> bool;

    /// Check whether the OS recommends explaining the request first
    /// (a previous request was denied but not permanently)
    fn should_show_rationale(&self, capability: LocationCapability) -> bool;

    /// Ask the OS to show the grant dialog for the given capabilities
    /// The outcome arrives later as a permission-result event carrying
    /// the same request code
    fn request_grant(
        &mut self,
        request_code: u32,
        capabilities: &[LocationCapability],
    ) -> PlatformResult<()>;
}
