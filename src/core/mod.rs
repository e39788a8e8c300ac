//! Core building blocks shared by every system: math types and errors.

pub mod error;
pub mod math;

pub use error::{PhysicsError, PhysicsResult};
pub use math::{Aabb, Vec2};
