use log::{debug, info};

use crate::core::{PhysicsError, PhysicsResult, Vec2};
use crate::systems::WorldBounds;

use super::config::WorldConfig;
use super::PhysicsWorld;

pub(super) fn enable_perf_metrics(world: &mut PhysicsWorld, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn set_gravity(world: &mut PhysicsWorld, x: f32, y: f32) -> PhysicsResult<()> {
    let gravity = Vec2::new(x, y);
    if !gravity.is_finite() {
        return Err(PhysicsError::configuration(format!("gravity must be finite, got ({x}, {y})")));
    }
    world.config.gravity = gravity;
    Ok(())
}

/// Bounds are expected to be validated by the caller.
pub(super) fn set_bounds(world: &mut PhysicsWorld, bounds: WorldBounds) {
    debug!(
        "world bounds: left {} right {} top {} bottom {}",
        bounds.left, bounds.right, bounds.top, bounds.bottom
    );
    world.config.bounds = bounds;
}

pub(super) fn set_time_scale(world: &mut PhysicsWorld, scale: f32) -> PhysicsResult<()> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(PhysicsError::configuration(format!("time scale must be finite and > 0, got {scale}")));
    }
    let candidate = WorldConfig { time_scale: scale, ..world.config.clone() };
    check_drag_limit(world, &candidate)?;
    world.config.time_scale = scale;
    Ok(())
}

pub(super) fn set_iterations(world: &mut PhysicsWorld, iterations: u32) -> PhysicsResult<()> {
    if iterations == 0 {
        return Err(PhysicsError::configuration("iterations must be >= 1"));
    }
    let candidate = WorldConfig { iterations, ..world.config.clone() };
    check_drag_limit(world, &candidate)?;
    world.config.iterations = iterations;
    info!("physics sub-steps: {iterations}");
    Ok(())
}

pub(super) fn set_sleeping_enabled(world: &mut PhysicsWorld, enabled: bool) {
    world.config.enable_sleeping = enabled;
}

/// Every existing body must stay within the drag limit the candidate config implies.
fn check_drag_limit(world: &PhysicsWorld, candidate: &WorldConfig) -> PhysicsResult<()> {
    let limit = candidate.max_drag();
    match world.bodies.iter().find(|b| b.drag > limit) {
        Some(body) => Err(PhysicsError::configuration(format!(
            "body {} drag {} exceeds {limit} for a sub-step of {}s",
            body.id(),
            body.drag,
            candidate.worst_sub_dt()
        ))),
        None => Ok(()),
    }
}
