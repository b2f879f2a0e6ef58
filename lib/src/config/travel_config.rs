//! Travel planner configuration.

use super::{ConfigError, ConfigResult};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deepest perturbation depth accepted by [`TravelConfig::validate`].
/// The perturbation step is `1 << depth` units.
pub const MAX_SUPPORTED_PERTURBATION_DEPTH: u32 = 30;

/// How the windings of the boundary polygons combine into one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Inside when the summed winding number is non-zero.
    /// Holes must run opposite to the contour that encloses them.
    #[default]
    NonZero,
    /// Inside when the point is enclosed by an odd number of polygons,
    /// regardless of orientation.
    EvenOdd,
}

/// Configuration for travel path planning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Rule used to combine boundary polygons for containment tests.
    pub fill_rule: FillRule,

    /// Maximum number of perturbation rounds when projecting a point
    /// into the boundary.
    pub max_perturbation_depth: u32,

    /// Deepest perturbation round whose projection is still trusted.
    /// Deeper results are reported as failures.
    pub reliable_depth: u32,

    /// Distance (scaled units) detour waypoints are kept off the boundary.
    pub waypoint_clearance: Coord,

    /// Refuse routes longer than this multiple of the direct distance.
    /// `None` accepts any detour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_detour_factor: Option<CoordF>,

    /// Skip boundary polygons whose bounding box misses the segment.
    pub use_bounding_box_pruning: bool,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            fill_rule: FillRule::NonZero,
            max_perturbation_depth: 10,
            reliable_depth: 8,
            waypoint_clearance: 1_000, // 1 micron
            max_detour_factor: None,
            use_bounding_box_pruning: true,
        }
    }
}

impl TravelConfig {
    /// Create a new travel config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the containment fill rule.
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Set the perturbation depth cap.
    pub fn with_max_perturbation_depth(mut self, depth: u32) -> Self {
        self.max_perturbation_depth = depth;
        self
    }

    /// Set the deepest trusted perturbation depth.
    pub fn with_reliable_depth(mut self, depth: u32) -> Self {
        self.reliable_depth = depth;
        self
    }

    /// Set the waypoint clearance.
    pub fn with_waypoint_clearance(mut self, clearance: Coord) -> Self {
        self.waypoint_clearance = clearance;
        self
    }

    /// Set the maximum detour factor.
    pub fn with_max_detour_factor(mut self, factor: CoordF) -> Self {
        self.max_detour_factor = Some(factor);
        self
    }

    /// Enable or disable bounding box pruning.
    pub fn with_bounding_box_pruning(mut self, enabled: bool) -> Self {
        self.use_bounding_box_pruning = enabled;
        self
    }

    /// Load a travel config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a travel config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the config.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_perturbation_depth > MAX_SUPPORTED_PERTURBATION_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "max_perturbation_depth must be at most {}",
                MAX_SUPPORTED_PERTURBATION_DEPTH
            )));
        }
        if self.reliable_depth > self.max_perturbation_depth {
            return Err(ConfigError::Invalid(
                "reliable_depth cannot exceed max_perturbation_depth".to_string(),
            ));
        }
        if self.waypoint_clearance < 0 {
            return Err(ConfigError::Invalid(
                "waypoint_clearance cannot be negative".to_string(),
            ));
        }
        if let Some(factor) = self.max_detour_factor {
            if !factor.is_finite() || factor < 1.0 {
                return Err(ConfigError::Invalid(
                    "max_detour_factor must be a finite value >= 1.0".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_config_default() {
        let config = TravelConfig::default();
        assert_eq!(config.fill_rule, FillRule::NonZero);
        assert_eq!(config.max_perturbation_depth, 10);
        assert_eq!(config.reliable_depth, 8);
        assert!(config.max_detour_factor.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_travel_config_builder() {
        let config = TravelConfig::new()
            .with_fill_rule(FillRule::EvenOdd)
            .with_waypoint_clearance(50)
            .with_max_detour_factor(3.0)
            .with_bounding_box_pruning(false);

        assert_eq!(config.fill_rule, FillRule::EvenOdd);
        assert_eq!(config.waypoint_clearance, 50);
        assert_eq!(config.max_detour_factor, Some(3.0));
        assert!(!config.use_bounding_box_pruning);
    }

    #[test]
    fn test_travel_config_from_json_partial() {
        let config = TravelConfig::from_json(r#"{ "fill_rule": "even_odd" }"#).unwrap();
        assert_eq!(config.fill_rule, FillRule::EvenOdd);
        assert_eq!(config.max_perturbation_depth, 10);
    }

    #[test]
    fn test_travel_config_json_round_trip() {
        let config = TravelConfig::new().with_max_detour_factor(2.5);
        let json = config.to_json().unwrap();
        assert_eq!(TravelConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_travel_config_rejects_bad_depths() {
        let err = TravelConfig::new()
            .with_reliable_depth(12)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let json = r#"{ "max_perturbation_depth": 64, "reliable_depth": 8 }"#;
        assert!(matches!(
            TravelConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_travel_config_rejects_bad_detour_factor() {
        assert!(TravelConfig::new()
            .with_max_detour_factor(0.5)
            .validate()
            .is_err());
        assert!(TravelConfig::new()
            .with_max_detour_factor(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_travel_config_malformed_json() {
        assert!(matches!(
            TravelConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
