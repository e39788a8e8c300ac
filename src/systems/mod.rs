//! Per-step physics systems, leaf-first: integration, filtering, narrowphase,
//! contact resolution and world bounds.

pub mod boundary;
pub mod contact;
pub mod filter;
pub mod integrator;
pub mod narrowphase;

pub use boundary::WorldBounds;
pub use contact::{Contact, ContactOutcome, ContactSettings, DegenerateContact};
pub use filter::CollisionFilter;
pub use integrator::Integration;
