//! Region quadtree over body bounding boxes.
//!
//! Nodes live in a flat arena. A body is stored in every leaf its box touches, so two
//! bodies are candidates exactly when they share at least one leaf.

use crate::core::Aabb;
use crate::domain::Body;

use super::broadphase::{canonical_pair, finish_pairs, CandidatePair};

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_MAX_DEPTH: u32 = 5;

#[derive(Clone, Copy, Debug)]
struct Entry {
    slot: usize,
    aabb: Aabb,
}

#[derive(Clone, Debug)]
struct Node {
    bounds: Aabb,
    depth: u32,
    /// Indices into `entries`. Empty once the node has children.
    items: Vec<usize>,
    children: Option<[usize; 4]>,
}

impl Node {
    fn leaf(bounds: Aabb, depth: u32) -> Self {
        Self { bounds, depth, items: Vec::new(), children: None }
    }
}

#[derive(Clone, Debug)]
pub struct QuadTree {
    capacity: usize,
    max_depth: u32,
    nodes: Vec<Node>,
    entries: Vec<Entry>,
}

impl QuadTree {
    pub fn new(capacity: usize, max_depth: u32) -> Self {
        Self {
            capacity: capacity.max(1),
            max_depth,
            nodes: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn max_depth(&self) -> u32 { self.max_depth }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.entries.clear();
    }

    /// Rebuild from scratch over every solid body.
    ///
    /// The root region is the union of all boxes, so nothing ever falls outside the tree
    /// no matter how far bodies wander.
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.clear();
        self.entries.extend(
            bodies
                .iter()
                .enumerate()
                .filter(|(_, b)| b.is_solid())
                .map(|(slot, b)| Entry { slot, aabb: b.bounding_box() }),
        );
        let Some(first) = self.entries.first() else {
            return;
        };
        let root = self.entries[1..]
            .iter()
            .fold(first.aabb, |acc, e| acc.union(&e.aabb));
        self.nodes.push(Node::leaf(root, 0));
        for e in 0..self.entries.len() {
            self.insert(0, e);
        }
    }

    fn insert(&mut self, start: usize, entry: usize) {
        let aabb = self.entries[entry].aabb;
        let mut stack = vec![start];
        while let Some(n) = stack.pop() {
            if let Some(children) = self.nodes[n].children {
                stack.extend(
                    children
                        .iter()
                        .copied()
                        .filter(|&c| self.nodes[c].bounds.overlaps(&aabb)),
                );
                continue;
            }
            self.nodes[n].items.push(entry);
            if self.should_split(n) {
                self.split(n);
            }
        }
    }

    fn should_split(&self, n: usize) -> bool {
        let node = &self.nodes[n];
        // A zero-area region cannot separate anything.
        node.items.len() > self.capacity
            && node.depth < self.max_depth
            && (node.bounds.width() > 0.0 || node.bounds.height() > 0.0)
    }

    fn split(&mut self, n: usize) {
        let depth = self.nodes[n].depth + 1;
        let quads = self.nodes[n].bounds.quadrants();
        let base = self.nodes.len();
        self.nodes.extend(quads.iter().map(|q| Node::leaf(*q, depth)));
        let children = [base, base + 1, base + 2, base + 3];
        self.nodes[n].children = Some(children);

        let items = std::mem::take(&mut self.nodes[n].items);
        for entry in items {
            self.insert(n, entry);
        }
    }

    /// Every unordered pair of bodies sharing a leaf, each pair once.
    pub fn candidate_pairs(&self, bodies: &[Body]) -> Vec<CandidatePair> {
        let mut pairs = Vec::new();
        for node in self.nodes.iter().filter(|n| n.children.is_none()) {
            for (i, &ea) in node.items.iter().enumerate() {
                for &eb in &node.items[i + 1..] {
                    let (a, b) = (self.entries[ea].slot, self.entries[eb].slot);
                    pairs.push(canonical_pair(bodies, a, b));
                }
            }
        }
        finish_pairs(bodies, pairs)
    }

    /// Slots of all bodies stored in leaves that `region` touches, deduplicated.
    pub fn query(&self, region: &Aabb) -> Vec<usize> {
        let mut found = Vec::new();
        if self.nodes.is_empty() {
            return found;
        }
        let mut stack = vec![0usize];
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            if !node.bounds.overlaps(region) {
                continue;
            }
            match node.children {
                Some(children) => stack.extend(children),
                None => found.extend(node.items.iter().map(|&e| self.entries[e].slot)),
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_none()).count()
    }

    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyDesc, BodyId, GroupId};

    fn grid_of_circles(n: u32, spacing: f32) -> Vec<Body> {
        let mut bodies = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let desc = BodyDesc::circle(1.0).at(i as f32 * spacing, j as f32 * spacing);
                bodies.push(Body::from_desc(BodyId(i * n + j), &desc, vec![GroupId(0)]));
            }
        }
        bodies
    }

    #[test]
    fn splits_when_over_capacity() {
        let bodies = grid_of_circles(6, 10.0);
        let mut tree = QuadTree::new(4, 5);
        tree.rebuild(&bodies);
        assert!(tree.node_count() > 1);
        // Every split turns one leaf into four.
        assert_eq!(tree.leaf_count(), 1 + 3 * (tree.node_count() - 1) / 4);
        assert!(tree.depth() >= 1);
        assert!(tree.depth() <= 5);
    }

    #[test]
    fn respects_max_depth() {
        let bodies = grid_of_circles(10, 3.0);
        let mut tree = QuadTree::new(1, 2);
        tree.rebuild(&bodies);
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn overlapping_neighbours_are_candidates() {
        // Spacing 1.5 with radius 1: each circle overlaps its grid neighbours.
        let bodies = grid_of_circles(8, 1.5);
        let mut tree = QuadTree::new(2, 5);
        tree.rebuild(&bodies);
        let pairs = tree.candidate_pairs(&bodies);
        let has = |a: u32, b: u32| {
            pairs
                .iter()
                .any(|p| bodies[p.a].id() == BodyId(a) && bodies[p.b].id() == BodyId(b))
        };
        assert!(has(0, 1));
        assert!(has(0, 8));
        assert!(has(27, 28));
    }

    #[test]
    fn query_returns_touching_bodies_once() {
        let bodies = grid_of_circles(5, 10.0);
        let mut tree = QuadTree::new(2, 4);
        tree.rebuild(&bodies);
        let hits = tree.query(&Aabb::new(-1.0, 1.0, -1.0, 1.0));
        assert!(hits.contains(&0));
        let mut sorted = hits.clone();
        sorted.dedup();
        assert_eq!(sorted, hits);
    }

    #[test]
    fn coincident_bodies_do_not_split_forever() {
        let desc = BodyDesc::circle(0.0).at(5.0, 5.0);
        let bodies: Vec<Body> = (0..20)
            .map(|i| Body::from_desc(BodyId(i), &desc, vec![GroupId(0)]))
            .collect();
        let mut tree = QuadTree::new(2, 5);
        tree.rebuild(&bodies);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.candidate_pairs(&bodies).len(), 20 * 19 / 2);
    }

    #[test]
    fn non_solid_bodies_are_not_indexed() {
        let desc = BodyDesc::circle(1.0).non_solid();
        let bodies = vec![
            Body::from_desc(BodyId(1), &desc, vec![GroupId(0)]),
            Body::from_desc(BodyId(2), &desc, vec![GroupId(0)]),
        ];
        let mut tree = QuadTree::default();
        tree.rebuild(&bodies);
        assert!(tree.candidate_pairs(&bodies).is_empty());
        assert!(tree.query(&Aabb::new(-5.0, 5.0, -5.0, 5.0)).is_empty());
    }
}
