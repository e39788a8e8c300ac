//! Domain types: bodies, shapes and collision groups.

mod body;
mod groups;
mod shape;

pub use body::{Body, BodyDesc, BodyId};
pub(crate) use body::{check_bounce, check_drag};
pub use groups::{GroupId, GroupPair, GroupRegistry, ResponseTag, DEFAULT_GROUP};
pub use shape::Shape;
