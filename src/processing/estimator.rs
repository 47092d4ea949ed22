//! Best-location-estimate tracking
//!
//! Geolocation fixes arrive on their own cadence with meter-level error, while
//! the tracker reports a centimeter-level scene pose every frame. Each fix is
//! stored together with the scene position at capture time, so a stored fix
//! can be carried through whatever scene motion the tracker has measured
//! since. The best stored fix, translated to the current scene position, is
//! the engine's working answer to "where on Earth is the device right now".

use std::collections::VecDeque;

use nalgebra::Vector3;

use crate::algorithms::projection;
use crate::core::types::GeoCoordinate;

/// A geolocation fix paired with the scene position at capture time
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLocationEstimate {
    /// The geographic fix
    pub coordinate: GeoCoordinate,
    /// Device scene position when the fix was captured
    pub scene_position: Vector3<f64>,
}

impl SceneLocationEstimate {
    pub fn new(coordinate: GeoCoordinate, scene_position: Vector3<f64>) -> Self {
        Self {
            coordinate,
            scene_position,
        }
    }

    /// The fix carried through scene motion: the geographic coordinate this
    /// estimate implies for a device now at `current_scene_position`
    pub fn translated(&self, current_scene_position: &Vector3<f64>) -> GeoCoordinate {
        let displacement = current_scene_position - self.scene_position;
        projection::displace(&self.coordinate, &displacement)
    }
}

/// Retains recent estimates and selects the most trustworthy one.
///
/// "No sample yet" is a valid, indefinitely persisting state; the estimator
/// never blocks or errors on absence.
#[derive(Debug)]
pub struct LocationEstimator {
    estimates: VecDeque<SceneLocationEstimate>,
    /// Maximum retained samples
    capacity: usize,
    /// Samples older than this relative to the newest are dropped (milliseconds)
    max_sample_age_ms: u64,
}

impl LocationEstimator {
    pub fn new(capacity: usize, max_sample_age_ms: u64) -> Self {
        Self {
            estimates: VecDeque::with_capacity(capacity),
            capacity,
            max_sample_age_ms,
        }
    }

    /// Record a new estimate and drop samples that fell out of the window
    pub fn push(&mut self, estimate: SceneLocationEstimate) {
        self.estimates.push_back(estimate);
        self.prune();
    }

    /// Best stored estimate: lowest horizontal accuracy radius first, newest
    /// breaking ties. Samples without an accuracy rank behind all samples
    /// that have one.
    pub fn best(&self) -> Option<&SceneLocationEstimate> {
        self.estimates.iter().min_by(|a, b| {
            let accuracy_a = a.coordinate.horizontal_accuracy.unwrap_or(f64::INFINITY);
            let accuracy_b = b.coordinate.horizontal_accuracy.unwrap_or(f64::INFINITY);
            accuracy_a
                .partial_cmp(&accuracy_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.coordinate.timestamp_ms.cmp(&a.coordinate.timestamp_ms))
        })
    }

    /// Best estimate translated to the device's current scene position
    pub fn current_location(&self, current_scene_position: &Vector3<f64>) -> Option<GeoCoordinate> {
        self.best()
            .map(|estimate| estimate.translated(current_scene_position))
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Discard all stored estimates
    pub fn clear(&mut self) {
        self.estimates.clear();
    }

    fn prune(&mut self) {
        while self.estimates.len() > self.capacity {
            self.estimates.pop_front();
        }

        // Age is measured against the newest sample, not the wall clock, so
        // pruning stays deterministic under replay.
        if let Some(newest) = self
            .estimates
            .iter()
            .map(|e| e.coordinate.timestamp_ms)
            .max()
        {
            let max_age = self.max_sample_age_ms;
            self.estimates
                .retain(|e| newest.saturating_sub(e.coordinate.timestamp_ms) <= max_age);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::great_circle;

    fn estimate(accuracy: Option<f64>, timestamp_ms: u64) -> SceneLocationEstimate {
        let mut coordinate = GeoCoordinate::new(0.0, 0.0, timestamp_ms);
        coordinate.horizontal_accuracy = accuracy;
        SceneLocationEstimate::new(coordinate, Vector3::zeros())
    }

    #[test]
    fn test_empty_estimator_has_no_location() {
        let estimator = LocationEstimator::new(10, 60_000);
        assert!(estimator.best().is_none());
        assert!(estimator.current_location(&Vector3::zeros()).is_none());
    }

    #[test]
    fn test_best_prefers_lower_accuracy_radius() {
        let mut estimator = LocationEstimator::new(10, 60_000);
        estimator.push(estimate(Some(20.0), 1));
        estimator.push(estimate(Some(5.0), 2));
        estimator.push(estimate(Some(12.0), 3));

        assert_eq!(
            estimator.best().unwrap().coordinate.horizontal_accuracy,
            Some(5.0)
        );
    }

    #[test]
    fn test_best_breaks_accuracy_ties_by_recency() {
        let mut estimator = LocationEstimator::new(10, 60_000);
        estimator.push(estimate(Some(8.0), 100));
        estimator.push(estimate(Some(8.0), 200));

        assert_eq!(estimator.best().unwrap().coordinate.timestamp_ms, 200);
    }

    #[test]
    fn test_samples_without_accuracy_rank_last() {
        let mut estimator = LocationEstimator::new(10, 60_000);
        estimator.push(estimate(None, 300));
        estimator.push(estimate(Some(50.0), 100));

        assert_eq!(
            estimator.best().unwrap().coordinate.horizontal_accuracy,
            Some(50.0)
        );
    }

    #[test]
    fn test_capacity_bound_drops_oldest() {
        let mut estimator = LocationEstimator::new(3, 60_000);
        for t in 0..5 {
            estimator.push(estimate(Some(10.0), t));
        }
        assert_eq!(estimator.len(), 3);
    }

    #[test]
    fn test_age_pruning_is_relative_to_newest_sample() {
        let mut estimator = LocationEstimator::new(10, 1_000);
        estimator.push(estimate(Some(5.0), 0));
        estimator.push(estimate(Some(10.0), 2_000));

        // The accurate-but-stale sample is gone; only the fresh one remains
        assert_eq!(estimator.len(), 1);
        assert_eq!(estimator.best().unwrap().coordinate.timestamp_ms, 2_000);
    }

    #[test]
    fn test_translated_carries_fix_through_scene_motion() {
        let fix = GeoCoordinate::new(0.0, 0.0, 0).with_accuracy(5.0);
        let estimate = SceneLocationEstimate::new(fix.clone(), Vector3::zeros());

        // Device walked 50 m north in scene space since the fix
        let current = estimate.translated(&Vector3::new(0.0, 0.0, -50.0));
        let expected = great_circle::destination(&fix, 0.0, 50.0);

        assert!((current.latitude - expected.latitude).abs() < 1e-9);
        assert!((current.longitude - expected.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_translated_without_motion_is_the_fix_itself() {
        let fix = GeoCoordinate::new(35.6586, 139.7454, 9).with_accuracy(3.0);
        let scene_position = Vector3::new(1.0, 0.0, -2.0);
        let estimate = SceneLocationEstimate::new(fix.clone(), scene_position);

        let current = estimate.translated(&scene_position);
        assert!((current.latitude - fix.latitude).abs() < 1e-12);
        assert!((current.longitude - fix.longitude).abs() < 1e-12);
    }
}
