mod aabb;
mod vec2;

pub use aabb::Aabb;
pub use vec2::Vec2;
