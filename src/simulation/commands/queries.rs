use crate::core::{Aabb, PhysicsError, PhysicsResult};
use crate::domain::{Body, BodyId};
use crate::systems::narrowphase;

use super::PhysicsWorld;

pub(super) fn body(world: &PhysicsWorld, id: BodyId) -> Option<&Body> {
    world.slots.get(&id).map(|&slot| &world.bodies[slot])
}

pub(super) fn groups_of(world: &PhysicsWorld, id: BodyId) -> Option<Vec<String>> {
    body(world, id).map(|b| world.filter.group_names(b.groups()))
}

pub(super) fn refresh_index(world: &mut PhysicsWorld) {
    if world.index_dirty {
        world.broadphase.rebuild(&world.bodies);
        world.index_dirty = false;
    }
}

/// Uses the index while it is fresh, otherwise scans every body. Both give the same answer.
pub(super) fn query_aabb(world: &PhysicsWorld, region: &Aabb) -> Vec<BodyId> {
    let slots: Vec<usize> = if world.index_dirty {
        (0..world.bodies.len()).collect()
    } else {
        world.broadphase.query(region)
    };
    let mut ids: Vec<BodyId> = slots
        .into_iter()
        .map(|slot| &world.bodies[slot])
        .filter(|b| b.is_solid() && b.bounding_box().overlaps(region))
        .map(Body::id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Both bodies solid, a collision rule between their groups, and an exact overlap.
pub(super) fn is_touching(world: &PhysicsWorld, a: BodyId, b: BodyId) -> PhysicsResult<bool> {
    let first = body(world, a).ok_or(PhysicsError::UnknownBody(a))?;
    let second = body(world, b).ok_or(PhysicsError::UnknownBody(b))?;
    if a == b || !first.is_solid() || !second.is_solid() {
        return Ok(false);
    }
    Ok(world.filter.can_collide(first, second) && narrowphase::overlaps(first, second))
}
