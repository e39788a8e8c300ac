//! Collision pass: index rebuild -> candidate pairs -> group filter -> narrowphase -> resolve.

use log::debug;
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Vec2;
use crate::domain::{Body, BodyId, ResponseTag};
use crate::spatial::CandidatePair;
use crate::systems::contact::{self, Contact, ContactOutcome};
use crate::systems::narrowphase;

use super::{PerfTimer, PhysicsWorld};

/// One confirmed contact between two eligible bodies, reported at most once per step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactEvent {
    /// Lower id of the pair.
    pub a: BodyId,
    pub b: BodyId,
    /// Tag of the collision rule that made the pair eligible.
    pub tag: ResponseTag,
    /// Unit vector from `a` toward `b`.
    pub normal: Vec2,
    pub penetration: f32,
    /// Zero when the pair was separating or both bodies are immovable.
    pub impulse: f32,
}

pub(super) fn collide(world: &mut PhysicsWorld) {
    let perf_on = world.perf_enabled;

    let t0 = perf_on.then(PerfTimer::start);
    world.broadphase.rebuild(&world.bodies);
    world.index_dirty = false;
    let candidates = world.broadphase.candidate_pairs(&world.bodies);
    if let Some(t) = t0 {
        world.perf_stats.broadphase_ms += t.elapsed_ms();
        world.perf_stats.candidate_pairs += candidates.len() as u32;
    }

    let t0 = perf_on.then(PerfTimer::start);
    let eligible = eligible_pairs(world, candidates);
    let eligible_count = eligible.len() as u32;
    let hits = narrowphase_hits(&world.bodies, eligible);
    if let Some(t) = t0 {
        world.perf_stats.narrowphase_ms += t.elapsed_ms();
        world.perf_stats.eligible_pairs += eligible_count;
    }

    let t0 = perf_on.then(PerfTimer::start);
    for (pair, tag) in hits {
        resolve_pair(world, pair, tag);
    }
    if let Some(t) = t0 {
        world.perf_stats.resolve_ms += t.elapsed_ms();
    }
}

fn eligible_pairs(world: &PhysicsWorld, candidates: Vec<CandidatePair>) -> Vec<(CandidatePair, ResponseTag)> {
    let skip_sleeping = world.config.enable_sleeping;
    let bodies = &world.bodies;
    candidates
        .into_iter()
        .filter(|p| !(skip_sleeping && (bodies[p.a].sleeping || bodies[p.b].sleeping)))
        .filter_map(|p| {
            world
                .filter
                .rule_for(&bodies[p.a], &bodies[p.b])
                .map(|tag| (p, tag.clone()))
        })
        .collect()
}

/// Exact tests run against the post-integration snapshot; order of the input is preserved.
fn narrowphase_hits(
    bodies: &[Body],
    eligible: Vec<(CandidatePair, ResponseTag)>,
) -> Vec<(CandidatePair, ResponseTag)> {
    #[cfg(feature = "parallel")]
    {
        eligible
            .into_par_iter()
            .filter(|(p, _)| narrowphase::overlaps(&bodies[p.a], &bodies[p.b]))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        eligible
            .into_iter()
            .filter(|(p, _)| narrowphase::overlaps(&bodies[p.a], &bodies[p.b]))
            .collect()
    }
}

fn resolve_pair(world: &mut PhysicsWorld, pair: CandidatePair, tag: ResponseTag) {
    let settings = world.config.contact;
    let perf_on = world.perf_enabled;
    let (a, b) = pair_mut(&mut world.bodies, pair.a, pair.b);
    let key = (a.id(), b.id());

    let contact = match Contact::between(a, b) {
        Ok(contact) => contact,
        Err(err) => {
            debug!("skipping {} / {}: {err}", key.0, key.1);
            if perf_on {
                world.perf_stats.degenerate_contacts += 1;
            }
            return;
        }
    };

    let impulse = match contact::resolve(a, b, &contact, &settings) {
        ContactOutcome::Resolved { impulse } => {
            // Positional correction may have moved the pair.
            world.index_dirty = true;
            if perf_on {
                world.perf_stats.impulses_applied += 1;
            }
            impulse
        }
        ContactOutcome::Separating | ContactOutcome::Static => 0.0,
    };

    if world.reported.insert(key) {
        if perf_on {
            world.perf_stats.contacts += 1;
        }
        world.contacts.push(ContactEvent {
            a: key.0,
            b: key.1,
            tag,
            normal: contact.normal,
            penetration: contact.penetration,
            impulse,
        });
    }
}

/// Two distinct bodies borrowed mutably, returned in `(a, b)` order.
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(a, b);
    if a < b {
        let (head, tail) = bodies.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
