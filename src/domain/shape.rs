use serde::{Deserialize, Serialize};

use crate::core::{Aabb, PhysicsError, PhysicsResult, Vec2};

/// Collision shape, fixed when the body is created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { half_width: f32, half_height: f32 },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Shape::Rectangle { half_width, half_height }
    }

    /// Radius may be zero (a point); rectangle extents must be strictly positive.
    pub fn validate(&self) -> PhysicsResult<()> {
        match *self {
            Shape::Circle { radius } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(PhysicsError::invalid_shape(format!(
                        "circle radius must be finite and >= 0, got {radius}"
                    )));
                }
            }
            Shape::Rectangle { half_width, half_height } => {
                if !(half_width.is_finite() && half_height.is_finite())
                    || half_width <= 0.0
                    || half_height <= 0.0
                {
                    return Err(PhysicsError::invalid_shape(format!(
                        "rectangle extents must be finite and > 0, got {half_width}x{half_height}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::new(radius, radius),
            Shape::Rectangle { half_width, half_height } => Vec2::new(half_width, half_height),
        }
    }

    pub fn aabb_at(&self, center: Vec2) -> Aabb {
        let h = self.half_extents();
        Aabb::from_center(center, h.x, h.y)
    }

    /// Distance from the center to the shape's support point along a unit `normal`.
    ///
    /// For rectangles this is the projection of the box onto the normal, which is what
    /// the contact resolver uses as the rectangle's "radius".
    pub fn extent_along(&self, normal: Vec2) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rectangle { half_width, half_height } => {
                normal.x.abs() * half_width + normal.y.abs() * half_height
            }
        }
    }
}
