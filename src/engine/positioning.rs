//! The positioning engine: per-cycle placement, confirmation, and scale policy
//!
//! One pass over the marker working set per tracking frame, strictly
//! sequential. Pose and geolocation samples are buffered as most-recent-known
//! values and read at the start of a cycle; staleness is expected, and a
//! missing input simply stalls the affected computation until the next frame.
//! Structural mutation of the working set happens only between cycles; the
//! exclusive borrow taken by [`PositioningEngine::run_cycle`] makes mutation
//! during a pass a compile error rather than a runtime rule.

use log::{debug, trace};
use nalgebra::Vector3;

use crate::algorithms::{great_circle, projection};
use crate::core::constants::{APPARENT_SIZE_REFERENCE_M, LOCATION_CONFIRMATION_DISTANCE_M};
use crate::core::types::{DevicePose, GeoCoordinate, NodeTransform};
use crate::nodes::annotation::AnnotationNode;
use crate::nodes::placement::{CoordinateSource, EstimateMode, PlacementNode};
use crate::processing::estimator::{LocationEstimator, SceneLocationEstimate};
use crate::utils::config::{EngineConfig, NodeDefaults};

/// Handle identifying a node in the engine's working set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// A marker in the working set: bare placement or content-bearing annotation
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Placement(PlacementNode),
    Annotation(AnnotationNode),
}

impl SceneNode {
    /// Placement state, uniform across both kinds
    pub fn placement(&self) -> &PlacementNode {
        match self {
            SceneNode::Placement(node) => node,
            SceneNode::Annotation(node) => &node.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut PlacementNode {
        match self {
            SceneNode::Placement(node) => node,
            SceneNode::Annotation(node) => &mut node.placement,
        }
    }

    pub fn as_annotation(&self) -> Option<&AnnotationNode> {
        match self {
            SceneNode::Annotation(node) => Some(node),
            SceneNode::Placement(_) => None,
        }
    }
}

/// The control loop fusing device pose and geolocation into node transforms
pub struct PositioningEngine {
    /// Working set in insertion order
    nodes: Vec<(NodeId, SceneNode)>,
    next_id: u32,
    /// Most recent pose from the tracker
    pose: Option<DevicePose>,
    estimator: LocationEstimator,
    config: EngineConfig,
}

impl Default for PositioningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PositioningEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let estimator = LocationEstimator::new(
            config.estimator.sample_capacity,
            config.estimator.max_sample_age_ms,
        );
        Self {
            nodes: Vec::new(),
            next_id: 0,
            pose: None,
            estimator,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Flag defaults for nodes built through the `from_defaults` constructors
    pub fn node_defaults(&self) -> &NodeDefaults {
        &self.config.node_defaults
    }

    /// Add a bare placement marker to the working set
    pub fn add_placement(&mut self, node: PlacementNode) -> NodeId {
        self.insert(SceneNode::Placement(node))
    }

    /// Add an annotation marker to the working set
    pub fn add_annotation(&mut self, node: AnnotationNode) -> NodeId {
        self.insert(SceneNode::Annotation(node))
    }

    /// Remove a marker; it is simply excluded from further cycles
    pub fn remove_node(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(index).1)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes
            .iter_mut()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    /// Iterate the working set in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// All markers carrying the given tag; collisions are permitted
    pub fn nodes_tagged<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (NodeId, &'a SceneNode)> {
        self.nodes()
            .filter(move |(_, node)| node.placement().tag.as_deref() == Some(tag))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Latest-value buffer for the tracker's pose stream
    pub fn submit_pose(&mut self, pose: DevicePose) {
        self.pose = Some(pose);
    }

    pub fn pose(&self) -> Option<&DevicePose> {
        self.pose.as_ref()
    }

    /// Record a geolocation fix, pairing it with the scene position the
    /// tracker is currently reporting. Sessions begin tracking at the scene
    /// origin, so a fix that arrives before the first pose is anchored there.
    pub fn submit_location(&mut self, sample: GeoCoordinate) {
        let scene_position = self
            .pose
            .as_ref()
            .map(|pose| pose.position)
            .unwrap_or_else(Vector3::zeros);
        self.estimator
            .push(SceneLocationEstimate::new(sample, scene_position));
    }

    /// Best geolocation estimate translated to the device's current scene
    /// position, if both streams have produced anything yet
    pub fn current_location(&self) -> Option<GeoCoordinate> {
        let pose = self.pose.as_ref()?;
        self.estimator.current_location(&pose.position)
    }

    /// Replace a node's coordinate. `reset_confirmation` reopens the
    /// confirmation gate for a materially different coordinate; the engine
    /// never resets it on its own.
    pub fn relocate_node(
        &mut self,
        id: NodeId,
        coordinate: GeoCoordinate,
        reset_confirmation: bool,
    ) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                let placement = node.placement_mut();
                placement.relocate(coordinate);
                if reset_confirmation {
                    placement.reset_confirmation();
                }
                true
            }
            None => false,
        }
    }

    /// Assign a not-yet-geolocated node the coordinate implied by the best
    /// location estimate, anchored at the node's committed scene position
    /// when it has one and at the device otherwise. The node confirms on the
    /// next cycle, since its coordinate derives purely from the estimate.
    pub fn place_at_current_position(&mut self, id: NodeId) -> bool {
        let Some(best) = self.estimator.best().cloned() else {
            return false;
        };
        let Some(node) = self.node(id) else {
            return false;
        };

        let anchor = node
            .placement()
            .transform()
            .map(|t| t.position)
            .or_else(|| self.pose.as_ref().map(|pose| pose.position))
            .unwrap_or(best.scene_position);
        let derived = best.translated(&anchor);

        if let Some(node) = self.node_mut(id) {
            node.placement_mut().set_coordinate_from_estimate(derived);
            true
        } else {
            false
        }
    }

    /// One pass over the working set. Skipped entirely when no pose has
    /// arrived yet; nodes the inputs cannot place this cycle are held as-is.
    pub fn run_cycle(&mut self) {
        let Some(pose) = self.pose.clone() else {
            trace!("no device pose yet; skipping cycle");
            return;
        };
        let estimate = self.estimator.current_location(&pose.position);

        for (id, node) in self.nodes.iter_mut() {
            Self::update_node(*id, node, &pose, estimate.as_ref());
        }
    }

    fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    /// Inclusive distance gate shared by the commit policy and the
    /// confirmation transition
    fn within_confirmation_range(distance: f64) -> bool {
        distance <= LOCATION_CONFIRMATION_DISTANCE_M
    }

    fn update_node(
        id: NodeId,
        node: &mut SceneNode,
        pose: &DevicePose,
        estimate: Option<&GeoCoordinate>,
    ) {
        let needs_first_placement = node.placement().transform().is_none();
        if !node.placement().continually_update_position_and_scale && !needs_first_placement {
            return;
        }

        let Some(estimate) = estimate else {
            trace!("node {}: no location estimate yet; holding", id.raw());
            return;
        };
        let Some(coordinate) = node.placement().coordinate().cloned() else {
            trace!("node {}: not yet geolocated; holding", id.raw());
            return;
        };

        let distance = great_circle::distance_m(estimate, &coordinate);
        let candidate = projection::project(estimate, &coordinate, &pose.position);

        let fixed_apparent_size = match node {
            SceneNode::Placement(_) => false,
            SceneNode::Annotation(annotation) => !annotation.scale_relative_to_distance,
        };

        let placement = node.placement_mut();

        // A confirmed node outside the adjustment range keeps its committed
        // position; only unconfirmed and never-placed nodes always move.
        let commit_position = !placement.location_confirmed()
            || (placement.continually_adjust_when_within_range
                && Self::within_confirmation_range(distance))
            || needs_first_placement;

        let position = if commit_position {
            candidate
        } else {
            placement
                .transform()
                .map(|t| t.position)
                .unwrap_or(candidate)
        };

        if !placement.location_confirmed() {
            let settled = match placement.estimate_mode {
                EstimateMode::RawGeolocation => true,
                EstimateMode::Fused => {
                    placement.coordinate_source() == CoordinateSource::DerivedFromEstimate
                        || Self::within_confirmation_range(distance)
                }
            };
            if settled {
                placement.confirm();
                debug!("node {} location confirmed at {:.1} m", id.raw(), distance);
            }
        }

        let scale = if fixed_apparent_size {
            (position - pose.position).norm() / APPARENT_SIZE_REFERENCE_M
        } else {
            1.0
        };

        placement.commit_transform(NodeTransform::new(position, scale));
    }
}
