//! Spatial indexing for the broadphase.

pub mod broadphase;
pub mod quadtree;

pub use broadphase::{Broadphase, BroadphaseKind, CandidatePair};
pub use quadtree::QuadTree;
