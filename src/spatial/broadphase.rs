//! Broadphase: cheap, over-approximate candidate pair generation.

use serde::{Deserialize, Serialize};

use crate::core::Aabb;
use crate::domain::Body;

use super::quadtree::{QuadTree, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH};

/// Two body slots, ordered so that `bodies[a].id() < bodies[b].id()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
}

#[inline]
pub(crate) fn canonical_pair(bodies: &[Body], i: usize, j: usize) -> CandidatePair {
    if bodies[i].id() < bodies[j].id() {
        CandidatePair { a: i, b: j }
    } else {
        CandidatePair { a: j, b: i }
    }
}

/// Sort by id pair and drop duplicates so every strategy yields the same ordering.
pub(crate) fn finish_pairs(bodies: &[Body], mut pairs: Vec<CandidatePair>) -> Vec<CandidatePair> {
    pairs.sort_unstable_by_key(|p| (bodies[p.a].id(), bodies[p.b].id()));
    pairs.dedup();
    pairs
}

/// Broadphase strategy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BroadphaseKind {
    /// Every pair of solid bodies. Reference strategy for small populations.
    BruteForce,
    QuadTree { capacity: usize, max_depth: u32 },
}

impl Default for BroadphaseKind {
    fn default() -> Self {
        BroadphaseKind::QuadTree { capacity: DEFAULT_CAPACITY, max_depth: DEFAULT_MAX_DEPTH }
    }
}

#[derive(Clone, Debug)]
pub enum Broadphase {
    BruteForce { solid: Vec<usize> },
    QuadTree(QuadTree),
}

impl Broadphase {
    pub fn new(kind: BroadphaseKind) -> Self {
        match kind {
            BroadphaseKind::BruteForce => Broadphase::BruteForce { solid: Vec::new() },
            BroadphaseKind::QuadTree { capacity, max_depth } => {
                Broadphase::QuadTree(QuadTree::new(capacity, max_depth))
            }
        }
    }

    pub fn kind(&self) -> BroadphaseKind {
        match self {
            Broadphase::BruteForce { .. } => BroadphaseKind::BruteForce,
            Broadphase::QuadTree(tree) => BroadphaseKind::QuadTree {
                capacity: tree.capacity(),
                max_depth: tree.max_depth(),
            },
        }
    }

    /// Re-index after positions changed. Must run before `candidate_pairs`/`query`.
    pub fn rebuild(&mut self, bodies: &[Body]) {
        match self {
            Broadphase::BruteForce { solid } => {
                solid.clear();
                solid.extend(
                    bodies.iter().enumerate().filter(|(_, b)| b.is_solid()).map(|(i, _)| i),
                );
            }
            Broadphase::QuadTree(tree) => tree.rebuild(bodies),
        }
    }

    pub fn candidate_pairs(&self, bodies: &[Body]) -> Vec<CandidatePair> {
        match self {
            Broadphase::BruteForce { solid } => {
                let mut pairs = Vec::with_capacity(solid.len() * solid.len().saturating_sub(1) / 2);
                for (i, &a) in solid.iter().enumerate() {
                    for &b in &solid[i + 1..] {
                        pairs.push(canonical_pair(bodies, a, b));
                    }
                }
                finish_pairs(bodies, pairs)
            }
            Broadphase::QuadTree(tree) => tree.candidate_pairs(bodies),
        }
    }

    /// Slots of indexed bodies that may overlap `region`.
    pub fn query(&self, region: &Aabb) -> Vec<usize> {
        match self {
            Broadphase::BruteForce { solid } => solid.clone(),
            Broadphase::QuadTree(tree) => tree.query(region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyDesc, BodyId, GroupId};

    fn body(id: u32, x: f32, y: f32) -> Body {
        Body::from_desc(BodyId(id), &BodyDesc::circle(1.0).at(x, y), vec![GroupId(0)])
    }

    #[test]
    fn brute_force_emits_every_pair_once() {
        let bodies = vec![body(3, 0.0, 0.0), body(1, 50.0, 0.0), body(2, 100.0, 0.0)];
        let mut bp = Broadphase::new(BroadphaseKind::BruteForce);
        bp.rebuild(&bodies);
        let pairs = bp.candidate_pairs(&bodies);
        assert_eq!(pairs.len(), 3);
        for p in &pairs {
            assert!(bodies[p.a].id() < bodies[p.b].id());
        }
        // Sorted by id pair: (1,2), (1,3), (2,3).
        assert_eq!(bodies[pairs[0].a].id(), BodyId(1));
        assert_eq!(bodies[pairs[0].b].id(), BodyId(2));
        assert_eq!(bodies[pairs[2].a].id(), BodyId(2));
    }

    #[test]
    fn brute_force_skips_non_solid() {
        let ghost = Body::from_desc(BodyId(9), &BodyDesc::circle(1.0).non_solid(), vec![GroupId(0)]);
        let bodies = vec![body(1, 0.0, 0.0), ghost];
        let mut bp = Broadphase::new(BroadphaseKind::BruteForce);
        bp.rebuild(&bodies);
        assert!(bp.candidate_pairs(&bodies).is_empty());
    }

    #[test]
    fn kind_round_trips_through_config() {
        let kind: BroadphaseKind =
            serde_json::from_str(r#"{"kind":"quad_tree","capacity":4,"max_depth":3}"#).unwrap();
        assert_eq!(Broadphase::new(kind).kind(), kind);
        assert_eq!(BroadphaseKind::default(), BroadphaseKind::QuadTree { capacity: 10, max_depth: 5 });
    }
}
