use std::collections::{HashMap, HashSet};

use log::info;

use crate::spatial::Broadphase;
use crate::systems::CollisionFilter;

use super::config::WorldConfig;
use super::perf_stats::PerfStats;
use super::PhysicsWorld;

pub(super) fn create_world(config: WorldConfig) -> PhysicsWorld {
    info!(
        "physics world: {} sub-steps, {:?}, gravity ({}, {})",
        config.iterations, config.broadphase, config.gravity.x, config.gravity.y
    );
    PhysicsWorld {
        broadphase: Broadphase::new(config.broadphase),
        index_dirty: true,
        config,
        bodies: Vec::new(),
        slots: HashMap::new(),
        next_id: 1,
        filter: CollisionFilter::new(),
        contacts: Vec::new(),
        reported: HashSet::new(),
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
