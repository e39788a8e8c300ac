//! Semi-implicit Euler integration of awake, dynamic bodies.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::Vec2;
use crate::domain::Body;

/// Per-sub-step integration inputs.
#[derive(Clone, Copy, Debug)]
pub struct Integration {
    pub gravity: Vec2,
    pub sub_dt: f32,
    pub sleeping_enabled: bool,
}

impl Integration {
    #[inline]
    fn skips(&self, body: &Body) -> bool {
        !body.solid || body.is_immovable() || (self.sleeping_enabled && body.sleeping)
    }

    #[inline(always)]
    pub fn integrate_body(&self, body: &mut Body) {
        if self.skips(body) {
            // Forces on bodies that do not move are dropped, not banked.
            body.acceleration = Vec2::ZERO;
            return;
        }
        let dt = self.sub_dt;

        if body.gravity_scale != 0.0 {
            body.velocity += self.gravity * (body.gravity_scale * dt);
        }
        body.velocity += body.acceleration * dt;

        if body.drag > 0.0 {
            let damping = 1.0 - body.drag * dt;
            debug_assert!(damping >= 0.0, "drag guard let a sign-inverting step through");
            body.velocity *= damping;
        }

        body.position += body.velocity * dt;
        body.acceleration = Vec2::ZERO;
    }

    /// Advance every body by one sub-step.
    pub fn run(&self, bodies: &mut [Body]) {
        #[cfg(feature = "parallel")]
        {
            bodies.par_iter_mut().for_each(|b| self.integrate_body(b));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for b in bodies.iter_mut() {
                self.integrate_body(b);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BodyDesc, BodyId, GroupId};

    fn make(desc: BodyDesc) -> Body {
        Body::from_desc(BodyId(1), &desc, vec![GroupId(0)])
    }

    fn step(body: &mut Body, gravity: Vec2, dt: f32) {
        Integration { gravity, sub_dt: dt, sleeping_enabled: true }.integrate_body(body);
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut b = make(BodyDesc::circle(1.0));
        step(&mut b, Vec2::new(0.0, 10.0), 1.0);
        assert_eq!(b.velocity(), Vec2::new(0.0, 10.0));
        assert_eq!(b.position(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn gravity_scale_multiplies_world_gravity() {
        let mut b = make(BodyDesc::circle(1.0).with_gravity_scale(0.5));
        step(&mut b, Vec2::new(0.0, 10.0), 0.1);
        assert!((b.velocity().y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn acceleration_is_consumed() {
        let mut b = make(BodyDesc::circle(1.0).with_gravity_scale(0.0));
        b.acceleration = Vec2::new(4.0, 0.0);
        step(&mut b, Vec2::ZERO, 0.5);
        assert_eq!(b.velocity().x, 2.0);
        assert_eq!(b.acceleration(), Vec2::ZERO);
        step(&mut b, Vec2::ZERO, 0.5);
        assert_eq!(b.velocity().x, 2.0);
    }

    #[test]
    fn drag_damps_linearly_per_substep() {
        let mut b = make(BodyDesc::circle(1.0).with_gravity_scale(0.0).with_velocity(10.0, 0.0).with_drag(0.5));
        step(&mut b, Vec2::ZERO, 0.2);
        assert!((b.velocity().x - 9.0).abs() < 1e-5);
    }

    #[test]
    fn sleeping_non_solid_and_immovable_bodies_stay_put() {
        for desc in [
            BodyDesc::circle(1.0).asleep(),
            BodyDesc::circle(1.0).non_solid(),
            BodyDesc::circle(1.0).immovable(),
        ] {
            let mut b = make(desc.with_velocity(3.0, 3.0));
            step(&mut b, Vec2::new(0.0, 10.0), 1.0);
            assert_eq!(b.position(), Vec2::ZERO);
        }
    }

    #[test]
    fn sleeping_flag_ignored_when_disabled() {
        let mut b = make(BodyDesc::circle(1.0).asleep());
        Integration { gravity: Vec2::new(0.0, 1.0), sub_dt: 1.0, sleeping_enabled: false }
            .integrate_body(&mut b);
        assert_eq!(b.position().y, 1.0);
    }
}
