//! Permission gating and location-session control
//!
//! The two pieces of workflow logic behind the map screen: the gate
//! decides whether location work may run, the session controller runs
//! it. The gate is consulted before every start and fetch.

pub mod gate;
pub mod controller;

pub use gate::{GateAction, PermissionGate};
pub use controller::{LocationSessionController, SessionState};
