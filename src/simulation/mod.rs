//! PhysicsWorld - owns every body and runs the per-step pipeline
//!
//! One `step(dt)` does, synchronously:
//! integrate (N sub-steps) -> index rebuild -> broadphase pairs -> group filter
//! -> narrowphase -> contact resolution -> world bounds
//!
//! The world is the only owner of bodies, group indices and the spatial index.
//! Callers mutate through the methods below; `&mut self` on `step` rules out
//! re-entrant stepping at compile time.

use std::collections::{HashMap, HashSet};

use crate::core::{Aabb, PhysicsResult, Vec2};
use crate::domain::{Body, BodyDesc, BodyId, ResponseTag};
use crate::spatial::Broadphase;
use crate::systems::{CollisionFilter, WorldBounds};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "commands/queries.rs"]
mod queries;
#[path = "step/collide.rs"]
mod collide;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use collide::ContactEvent;
pub use config::WorldConfig;
pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// The simulation world
pub struct PhysicsWorld {
    config: WorldConfig,

    // Bodies are packed for cache-friendly iteration; `slots` maps id -> index.
    bodies: Vec<Body>,
    slots: HashMap<BodyId, usize>,
    next_id: u32,

    filter: CollisionFilter,
    broadphase: Broadphase,
    // Set when bodies moved or slots changed since the last index rebuild.
    index_dirty: bool,

    // Contacts of the last step, each pair at most once.
    contacts: Vec<ContactEvent>,
    reported: HashSet<(BodyId, BodyId)>,

    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl PhysicsWorld {
    /// World with default configuration: gravity (0, 9.81), 3 sub-steps, quadtree, unbounded.
    pub fn new() -> Self {
        init::create_world(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> PhysicsResult<Self> {
        config.validate()?;
        Ok(init::create_world(config))
    }

    pub fn from_config_json(json: &str) -> PhysicsResult<Self> {
        Self::with_config(WorldConfig::from_json(json)?)
    }

    pub fn config(&self) -> &WorldConfig { &self.config }

    pub fn frame(&self) -> u64 { self.frame }

    // === SETTINGS ===

    pub fn set_gravity(&mut self, x: f32, y: f32) -> PhysicsResult<()> {
        settings::set_gravity(self, x, y)
    }

    pub fn gravity(&self) -> Vec2 { self.config.gravity }

    /// Set the world rectangle; pass infinities for open edges.
    pub fn set_bounds(&mut self, left: f32, right: f32, top: f32, bottom: f32) -> PhysicsResult<()> {
        settings::set_bounds(self, WorldBounds::new(left, right, top, bottom)?);
        Ok(())
    }

    pub fn set_world_bounds(&mut self, bounds: WorldBounds) -> PhysicsResult<()> {
        bounds.validate()?;
        settings::set_bounds(self, bounds);
        Ok(())
    }

    pub fn bounds(&self) -> WorldBounds { self.config.bounds }

    pub fn set_time_scale(&mut self, scale: f32) -> PhysicsResult<()> {
        settings::set_time_scale(self, scale)
    }

    pub fn set_iterations(&mut self, iterations: u32) -> PhysicsResult<()> {
        settings::set_iterations(self, iterations)
    }

    pub fn set_sleeping_enabled(&mut self, enabled: bool) {
        settings::set_sleeping_enabled(self, enabled);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        self.perf_stats.clone()
    }

    // === COLLISION RULES ===

    /// Allow bodies in `group1` and `group2` to collide. Order of the groups is irrelevant.
    pub fn register_collision_rule(
        &mut self,
        group1: &str,
        group2: &str,
        tag: impl Into<ResponseTag>,
    ) -> Option<ResponseTag> {
        self.filter.register_rule(group1, group2, tag.into())
    }

    pub fn remove_collision_rule(&mut self, group1: &str, group2: &str) -> bool {
        self.filter.remove_rule(group1, group2)
    }

    // === BODY LIFECYCLE ===

    /// Insert a body under an explicit id. Fails without side effects on a duplicate id
    /// or an invalid description.
    pub fn add_body(&mut self, id: BodyId, desc: BodyDesc) -> PhysicsResult<()> {
        commands::add_body(self, id, desc)
    }

    /// Insert a body, using `desc.id` when present and allocating a fresh id otherwise.
    pub fn create_body(&mut self, desc: BodyDesc) -> PhysicsResult<BodyId> {
        commands::create_body(self, desc)
    }

    /// Remove a body. Absent ids are a no-op.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        commands::remove_body(self, id)
    }

    pub fn destroy_body(&mut self, id: BodyId) {
        commands::remove_body(self, id);
    }

    /// Replace a body's collision groups; an empty list means the default group.
    pub fn set_groups<S: AsRef<str>>(&mut self, id: BodyId, groups: &[S]) -> PhysicsResult<()> {
        commands::set_groups(self, id, groups)
    }

    // === BODY MUTATION ===

    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> PhysicsResult<()> {
        commands::set_position(self, id, position)
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> PhysicsResult<()> {
        commands::set_velocity(self, id, velocity)
    }

    /// Accumulate acceleration for the next sub-step (force per unit mass).
    pub fn add_force(&mut self, id: BodyId, force: Vec2) -> PhysicsResult<()> {
        commands::add_force(self, id, force)
    }

    /// Instant velocity change scaled by inverse mass.
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) -> PhysicsResult<()> {
        commands::apply_impulse(self, id, impulse)
    }

    pub fn set_solid(&mut self, id: BodyId, solid: bool) -> PhysicsResult<()> {
        commands::set_solid(self, id, solid)
    }

    pub fn set_sleeping(&mut self, id: BodyId, sleeping: bool) -> PhysicsResult<()> {
        commands::set_sleeping(self, id, sleeping)
    }

    pub fn set_bounce(&mut self, id: BodyId, bounce: f32) -> PhysicsResult<()> {
        commands::set_bounce(self, id, bounce)
    }

    pub fn set_drag(&mut self, id: BodyId, drag: f32) -> PhysicsResult<()> {
        commands::set_drag(self, id, drag)
    }

    pub fn set_gravity_scale(&mut self, id: BodyId, scale: f32) -> PhysicsResult<()> {
        commands::set_gravity_scale(self, id, scale)
    }

    pub fn set_angle(&mut self, id: BodyId, degrees: f32) -> PhysicsResult<()> {
        commands::set_angle(self, id, degrees)
    }

    /// Rotate the cosmetic heading; positive is clockwise on the canvas.
    pub fn turn(&mut self, id: BodyId, degrees: f32) -> PhysicsResult<()> {
        commands::turn(self, id, degrees)
    }

    /// Move along the current heading, ignoring velocity and collisions.
    pub fn move_steps(&mut self, id: BodyId, steps: f32) -> PhysicsResult<()> {
        commands::move_steps(self, id, steps)
    }

    // === READS ===

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        queries::body(self, id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(Body::position)
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.body(id).map(Body::velocity)
    }

    pub fn bounding_box(&self, id: BodyId) -> Option<Aabb> {
        self.body(id).map(Body::bounding_box)
    }

    pub fn groups_of(&self, id: BodyId) -> Option<Vec<String>> {
        queries::groups_of(self, id)
    }

    pub fn bodies_in_group(&self, label: &str) -> Vec<BodyId> {
        self.filter.members(label)
    }

    /// Solid bodies whose boxes overlap `region`, sorted by id.
    pub fn query_aabb(&self, region: &Aabb) -> Vec<BodyId> {
        queries::query_aabb(self, region)
    }

    /// Rebuild the spatial index if bodies changed since the last step, so that
    /// following `query_aabb` calls can use it.
    pub fn refresh_index(&mut self) {
        queries::refresh_index(self);
    }

    /// Whether two bodies currently overlap and are allowed to collide.
    pub fn is_touching(&self, a: BodyId, b: BodyId) -> PhysicsResult<bool> {
        queries::is_touching(self, a, b)
    }

    /// Contacts found during the last `step`.
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    // === STEP ===

    /// Advance the simulation by `dt` seconds. Frames longer than `max_step_dt` run as
    /// several equal chunks.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
