//! Core types and constants for the campus map screen

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
