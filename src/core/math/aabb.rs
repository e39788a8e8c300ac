use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Axis-aligned bounding box in canvas coordinates (`top < bottom`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            left: center.x - half_width,
            right: center.x + half_width,
            top: center.y - half_height,
            bottom: center.y + half_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Inclusive overlap: boxes that share only an edge still overlap.
    ///
    /// The broadphase relies on this to never drop touching pairs.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Split into four quadrants: top-left, top-right, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [Aabb; 4] {
        let c = self.center();
        [
            Aabb::new(self.left, c.x, self.top, c.y),
            Aabb::new(c.x, self.right, self.top, c.y),
            Aabb::new(self.left, c.x, c.y, self.bottom),
            Aabb::new(c.x, self.right, c.y, self.bottom),
        ]
    }
}
