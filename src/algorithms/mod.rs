//! Geometric algorithms for geo-to-scene placement

pub mod great_circle;
pub mod projection;
