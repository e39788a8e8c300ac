use log::{debug, warn};

use crate::systems::Integration;

use super::collide;
use super::{PerfTimer, PhysicsWorld};

/// Number of equal chunks, each at most `max_dt` long, that cover `dt`.
pub(super) fn chunk_count(dt: f32, max_dt: f32) -> u32 {
    ((dt / max_dt).ceil() as u32).max(1)
}

pub(super) fn step(world: &mut PhysicsWorld, dt: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        warn!("step ignored: dt must be finite and > 0, got {dt}");
        return;
    }
    let chunks = chunk_count(dt, world.config.max_step_dt);
    if chunks > 1 {
        debug!("frame delta {dt}s split into {chunks} chunks");
    }
    let chunk_dt = dt / chunks as f32;

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = perf_on.then(PerfTimer::start);

    let iterations = world.config.iterations;
    let integration = Integration {
        gravity: world.config.gravity,
        sub_dt: chunk_dt * world.config.time_scale / iterations as f32,
        sleeping_enabled: world.config.enable_sleeping,
    };
    let per_substep = world.config.resolve_per_substep;

    world.contacts.clear();
    world.reported.clear();

    for _ in 0..chunks {
        for _ in 0..iterations {
            let t0 = perf_on.then(PerfTimer::start);
            integration.run(&mut world.bodies);
            world.index_dirty = true;
            if let Some(t) = t0 {
                world.perf_stats.integrate_ms += t.elapsed_ms();
            }

            if per_substep {
                collide::collide(world);
            }
        }

        // The index is rebuilt inside the collision pass, after bodies have moved.
        if !per_substep {
            collide::collide(world);
        }

        let t0 = perf_on.then(PerfTimer::start);
        let bounds = world.config.bounds;
        if bounds.apply(&mut world.bodies) > 0 {
            world.index_dirty = true;
        }
        if let Some(t) = t0 {
            world.perf_stats.bounds_ms += t.elapsed_ms();
        }
    }

    world.frame += 1;

    if let Some(t) = step_start {
        world.perf_stats.step_ms = t.elapsed_ms();
        world.perf_stats.body_count = world.bodies.len() as u32;
    }
}
