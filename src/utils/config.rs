//! Engine configuration
//!
//! JSON-backed defaults for newly created nodes and estimator tuning. The
//! confirmation distance and the pixel-to-scene-unit divisor are fixed
//! protocol constants in `core::constants`, not configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::nodes::placement::EstimateMode;

/// Flag defaults applied to nodes built through
/// [`PlacementNode::from_defaults`](crate::nodes::placement::PlacementNode::from_defaults)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefaults {
    /// Keep nudging confirmed nodes while within the confirmation distance
    pub continually_adjust_when_within_range: bool,
    /// Recompute position and scale every cycle
    pub continually_update_position_and_scale: bool,
    /// Let annotation surfaces shrink with perspective instead of holding a
    /// constant apparent size
    pub scale_relative_to_distance: bool,
    /// Estimation mode used for confirmation
    pub estimate_mode: EstimateMode,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            continually_adjust_when_within_range: true,
            continually_update_position_and_scale: true,
            scale_relative_to_distance: false,
            estimate_mode: EstimateMode::Fused,
        }
    }
}

/// Tuning for the location estimate window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Maximum retained location samples
    pub sample_capacity: usize,
    /// Samples older than this relative to the newest are dropped (milliseconds)
    pub max_sample_age_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_capacity: 30,
            max_sample_age_ms: 60_000, // 1 minute
        }
    }
}

/// Engine-wide configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Defaults for newly created nodes
    pub node_defaults: NodeDefaults,
    /// Location estimator tuning
    pub estimator: EstimatorConfig,
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: EngineConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimator.sample_capacity == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "estimator.sample_capacity".to_string(),
                value: self.estimator.sample_capacity.to_string(),
                reason: "At least one location sample must be retained".to_string(),
            });
        }

        if self.estimator.max_sample_age_ms < 1_000 {
            return Err(ConfigError::InvalidParameter {
                parameter: "estimator.max_sample_age_ms".to_string(),
                value: self.estimator.max_sample_age_ms.to_string(),
                reason: "A sample window shorter than one second starves the estimator between fixes"
                    .to_string(),
            });
        }

        Ok(())
    }
}
