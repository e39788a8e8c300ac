use log::{debug, warn};

use crate::core::{PhysicsError, PhysicsResult, Vec2};
use crate::domain::{check_bounce, check_drag, Body, BodyDesc, BodyId};

use super::PhysicsWorld;

pub(super) fn add_body(world: &mut PhysicsWorld, id: BodyId, desc: BodyDesc) -> PhysicsResult<()> {
    if world.slots.contains_key(&id) {
        warn!("add_body rejected: {id} already exists");
        return Err(PhysicsError::DuplicateId(id));
    }
    desc.validate()?;
    check_drag_limit(world, desc.drag)?;

    let groups = world.filter.intern_groups(&desc.groups);
    world.filter.index_body(id, &groups);
    world.slots.insert(id, world.bodies.len());
    world.bodies.push(Body::from_desc(id, &desc, groups));
    world.index_dirty = true;
    debug!("added body {id} ({:?})", desc.shape);
    Ok(())
}

pub(super) fn create_body(world: &mut PhysicsWorld, desc: BodyDesc) -> PhysicsResult<BodyId> {
    let id = match desc.id {
        Some(id) => id,
        None => allocate_id(world),
    };
    add_body(world, id, desc)?;
    Ok(id)
}

fn allocate_id(world: &mut PhysicsWorld) -> BodyId {
    loop {
        let id = BodyId(world.next_id);
        world.next_id = world.next_id.wrapping_add(1).max(1);
        if !world.slots.contains_key(&id) {
            return id;
        }
    }
}

pub(super) fn remove_body(world: &mut PhysicsWorld, id: BodyId) -> Option<Body> {
    let slot = world.slots.remove(&id)?;
    let body = world.bodies.swap_remove(slot);
    if let Some(moved) = world.bodies.get(slot) {
        world.slots.insert(moved.id(), slot);
    }
    world.filter.unindex_body(id, body.groups());
    world.index_dirty = true;
    debug!("removed body {id}");
    Some(body)
}

pub(super) fn set_groups<S: AsRef<str>>(world: &mut PhysicsWorld, id: BodyId, labels: &[S]) -> PhysicsResult<()> {
    let slot = slot_of(world, id)?;
    let groups = world.filter.intern_groups(labels);
    let old = std::mem::replace(&mut world.bodies[slot].groups, groups);
    world.filter.unindex_body(id, &old);
    world.filter.index_body(id, &world.bodies[slot].groups);
    Ok(())
}

pub(super) fn set_position(world: &mut PhysicsWorld, id: BodyId, position: Vec2) -> PhysicsResult<()> {
    check_finite("position", position)?;
    body_mut(world, id)?.position = position;
    world.index_dirty = true;
    Ok(())
}

pub(super) fn set_velocity(world: &mut PhysicsWorld, id: BodyId, velocity: Vec2) -> PhysicsResult<()> {
    check_finite("velocity", velocity)?;
    body_mut(world, id)?.velocity = velocity;
    Ok(())
}

pub(super) fn add_force(world: &mut PhysicsWorld, id: BodyId, force: Vec2) -> PhysicsResult<()> {
    check_finite("force", force)?;
    body_mut(world, id)?.acceleration += force;
    Ok(())
}

pub(super) fn apply_impulse(world: &mut PhysicsWorld, id: BodyId, impulse: Vec2) -> PhysicsResult<()> {
    check_finite("impulse", impulse)?;
    let body = body_mut(world, id)?;
    let inv_mass = body.inv_mass();
    body.velocity += impulse * inv_mass;
    Ok(())
}

pub(super) fn set_solid(world: &mut PhysicsWorld, id: BodyId, solid: bool) -> PhysicsResult<()> {
    body_mut(world, id)?.solid = solid;
    world.index_dirty = true;
    Ok(())
}

pub(super) fn set_sleeping(world: &mut PhysicsWorld, id: BodyId, sleeping: bool) -> PhysicsResult<()> {
    body_mut(world, id)?.sleeping = sleeping;
    Ok(())
}

pub(super) fn set_bounce(world: &mut PhysicsWorld, id: BodyId, bounce: f32) -> PhysicsResult<()> {
    check_bounce(bounce)?;
    body_mut(world, id)?.bounce = bounce;
    Ok(())
}

pub(super) fn set_drag(world: &mut PhysicsWorld, id: BodyId, drag: f32) -> PhysicsResult<()> {
    check_drag(drag)?;
    check_drag_limit(world, drag)?;
    body_mut(world, id)?.drag = drag;
    Ok(())
}

pub(super) fn set_gravity_scale(world: &mut PhysicsWorld, id: BodyId, scale: f32) -> PhysicsResult<()> {
    if !scale.is_finite() {
        return Err(PhysicsError::invalid_body(format!("gravity scale must be finite, got {scale}")));
    }
    body_mut(world, id)?.gravity_scale = scale;
    Ok(())
}

pub(super) fn set_angle(world: &mut PhysicsWorld, id: BodyId, degrees: f32) -> PhysicsResult<()> {
    if !degrees.is_finite() {
        return Err(PhysicsError::invalid_body(format!("angle must be finite, got {degrees}")));
    }
    body_mut(world, id)?.angle = degrees % 360.0;
    Ok(())
}

pub(super) fn turn(world: &mut PhysicsWorld, id: BodyId, degrees: f32) -> PhysicsResult<()> {
    if !degrees.is_finite() {
        return Err(PhysicsError::invalid_body(format!("turn must be finite, got {degrees}")));
    }
    let body = body_mut(world, id)?;
    body.angle = (body.angle + degrees) % 360.0;
    Ok(())
}

pub(super) fn move_steps(world: &mut PhysicsWorld, id: BodyId, steps: f32) -> PhysicsResult<()> {
    if !steps.is_finite() {
        return Err(PhysicsError::invalid_body(format!("step count must be finite, got {steps}")));
    }
    let body = body_mut(world, id)?;
    body.position += Vec2::from_degrees(body.angle) * steps;
    world.index_dirty = true;
    Ok(())
}

fn slot_of(world: &PhysicsWorld, id: BodyId) -> PhysicsResult<usize> {
    world.slots.get(&id).copied().ok_or(PhysicsError::UnknownBody(id))
}

fn body_mut(world: &mut PhysicsWorld, id: BodyId) -> PhysicsResult<&mut Body> {
    let slot = slot_of(world, id)?;
    Ok(&mut world.bodies[slot])
}

fn check_finite(what: &str, v: Vec2) -> PhysicsResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::invalid_body(format!("{what} must be finite, got ({}, {})", v.x, v.y)))
    }
}

/// `1 - drag * sub_dt` must stay non-negative for the largest sub-step the world can take.
fn check_drag_limit(world: &PhysicsWorld, drag: f32) -> PhysicsResult<()> {
    let limit = world.config.max_drag();
    if drag > limit {
        return Err(PhysicsError::configuration(format!(
            "drag {drag} exceeds {limit} for a sub-step of {}s",
            world.config.worst_sub_dt()
        )));
    }
    Ok(())
}
