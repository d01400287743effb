//! Single-screen campus map workflow
//!
//! The screen layer owns the control loop: it drains platform events,
//! routes them through the permission gate and the location session,
//! and drives the map widget.

pub mod controller;
pub mod landmarks;

pub use controller::MapScreen;
pub use landmarks::{campus_center, campus_landmarks, LandmarkPin};
