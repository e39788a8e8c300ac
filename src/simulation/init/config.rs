use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult, Vec2};
use crate::spatial::BroadphaseKind;
use crate::systems::{ContactSettings, WorldBounds};

/// Construction-time world parameters. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Integration sub-steps per `step`.
    pub iterations: u32,
    pub gravity: Vec2,
    pub time_scale: f32,
    /// Longest stretch integrated in one pass; longer frame deltas are split into chunks.
    pub max_step_dt: f32,
    pub enable_sleeping: bool,
    /// Run the collision pipeline after every sub-step instead of once per step.
    pub resolve_per_substep: bool,
    pub broadphase: BroadphaseKind,
    pub contact: ContactSettings,
    pub bounds: WorldBounds,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            gravity: Vec2::new(0.0, 9.81),
            time_scale: 1.0,
            max_step_dt: 0.25,
            enable_sleeping: true,
            resolve_per_substep: false,
            broadphase: BroadphaseKind::default(),
            contact: ContactSettings::default(),
            bounds: WorldBounds::default(),
        }
    }
}

impl WorldConfig {
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        let config: WorldConfig = serde_json::from_str(json).map_err(|e| {
            warn!("rejected world config: {e}");
            PhysicsError::configuration(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        if self.iterations == 0 {
            return Err(PhysicsError::configuration("iterations must be >= 1"));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::configuration("gravity must be finite"));
        }
        check_positive("time_scale", self.time_scale)?;
        check_positive("max_step_dt", self.max_step_dt)?;
        if let BroadphaseKind::QuadTree { capacity, .. } = self.broadphase {
            if capacity == 0 {
                return Err(PhysicsError::configuration("quadtree capacity must be >= 1"));
            }
        }
        let ContactSettings { percent, slop } = self.contact;
        if !(0.0..=1.0).contains(&percent) {
            return Err(PhysicsError::configuration(format!(
                "correction percent must be in [0, 1], got {percent}"
            )));
        }
        if !(slop.is_finite() && slop >= 0.0) {
            return Err(PhysicsError::configuration(format!("slop must be >= 0, got {slop}")));
        }
        self.bounds.validate()
    }

    /// Largest sub-step any `step` can take under this configuration.
    pub fn worst_sub_dt(&self) -> f32 {
        self.max_step_dt * self.time_scale / self.iterations as f32
    }

    /// Drag beyond this would flip velocity signs in a worst-case sub-step.
    pub fn max_drag(&self) -> f32 {
        1.0 / self.worst_sub_dt()
    }
}

fn check_positive(name: &str, value: f32) -> PhysicsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::configuration(format!("{name} must be finite and > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.iterations, 3);
        assert!(config.bounds.is_unbounded());
    }

    #[test]
    fn zero_iterations_is_a_configuration_error() {
        let config = WorldConfig { iterations: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(PhysicsError::Configuration(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(
            r#"{"iterations":5,"broadphase":{"kind":"brute_force"},"bounds":{"left":0,"right":480}}"#,
        )
        .unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.broadphase, BroadphaseKind::BruteForce);
        assert_eq!(config.gravity, Vec2::new(0.0, 9.81));
        assert_eq!(config.bounds.right, 480.0);
        assert_eq!(config.bounds.bottom, f32::INFINITY);
    }

    #[test]
    fn bad_json_and_bad_values_are_rejected() {
        assert!(WorldConfig::from_json("{ nope").is_err());
        assert!(WorldConfig::from_json(r#"{"time_scale":0}"#).is_err());
        assert!(WorldConfig::from_json(r#"{"contact":{"percent":2}}"#).is_err());
        assert!(WorldConfig::from_json(r#"{"broadphase":{"kind":"quad_tree","capacity":0,"max_depth":3}}"#).is_err());
    }

    #[test]
    fn max_drag_tracks_worst_sub_step() {
        let config = WorldConfig { iterations: 1, max_step_dt: 0.5, ..Default::default() };
        assert_eq!(config.max_drag(), 2.0);
    }
}
