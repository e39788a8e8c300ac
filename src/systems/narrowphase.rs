//! Exact overlap predicates, dispatched on the shape pair.

use crate::core::{Aabb, Vec2};
use crate::domain::{Body, Shape};

/// Strict: centers exactly `ra + rb` apart do not collide.
#[inline]
pub fn circle_circle(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> bool {
    let d = cb - ca;
    d.length() < ra + rb
}

/// Closest point on the rectangle to the circle center, then a squared-distance test.
#[inline]
pub fn circle_rect(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.left, rect.right),
        center.y.clamp(rect.top, rect.bottom),
    );
    (center - closest).length_squared() < radius * radius
}

/// Separating-axis test on the four half-planes.
#[inline]
pub fn rect_rect(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Exact overlap of two bodies. Argument order never changes the answer.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.shape(), b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.position(), ra, b.position(), rb)
        }
        (Shape::Circle { radius }, Shape::Rectangle { .. }) => {
            circle_rect(a.position(), radius, &b.bounding_box())
        }
        (Shape::Rectangle { .. }, Shape::Circle { radius }) => {
            circle_rect(b.position(), radius, &a.bounding_box())
        }
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => {
            rect_rect(&a.bounding_box(), &b.bounding_box())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyDesc, BodyId, GroupId};

    fn body(desc: BodyDesc) -> Body {
        Body::from_desc(BodyId(0), &desc, vec![GroupId(0)])
    }

    #[test]
    fn unit_circles_overlap_below_two() {
        assert!(circle_circle(Vec2::ZERO, 1.0, Vec2::new(1.9, 0.0), 1.0));
        assert!(!circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.1, 0.0), 1.0));
        assert!(!circle_circle(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
    }

    #[test]
    fn circle_rect_uses_closest_point() {
        let rect = Aabb::new(0.0, 4.0, 0.0, 4.0);
        assert!(circle_rect(Vec2::new(-0.5, 2.0), 1.0, &rect));
        // Near a corner: closest point is (0,0), distance sqrt(0.98) < 1.
        assert!(circle_rect(Vec2::new(-0.7, -0.7), 1.0, &rect));
        assert!(!circle_rect(Vec2::new(-0.8, -0.8), 1.0, &rect));
        // Center inside the rectangle.
        assert!(circle_rect(Vec2::new(2.0, 2.0), 0.5, &rect));
    }

    #[test]
    fn dispatch_is_symmetric() {
        let c = body(BodyDesc::circle(1.0).at(0.0, 0.0));
        let r = body(BodyDesc::rect(1.0, 1.0).at(1.5, 0.0));
        assert!(overlaps(&c, &r));
        assert!(overlaps(&r, &c));

        let far = body(BodyDesc::rect(1.0, 1.0).at(2.5, 0.0));
        assert!(!overlaps(&c, &far));
        assert!(!overlaps(&far, &c));
    }

    #[test]
    fn rectangles_separate_on_any_axis() {
        let a = body(BodyDesc::rect(1.0, 1.0));
        assert!(overlaps(&a, &body(BodyDesc::rect(1.0, 1.0).at(1.5, 1.5))));
        assert!(!overlaps(&a, &body(BodyDesc::rect(1.0, 1.0).at(0.0, 2.5))));
        assert!(!overlaps(&a, &body(BodyDesc::rect(1.0, 1.0).at(-2.5, 0.0))));
    }
}
