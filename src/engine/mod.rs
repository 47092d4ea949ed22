//! The positioning control loop

pub mod positioning;

pub use positioning::{NodeId, PositioningEngine, SceneNode};
