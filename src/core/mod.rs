//! Core types and constants for geo-referenced scene placement

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
