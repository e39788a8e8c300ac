use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Aabb, PhysicsError, PhysicsResult, Vec2};

use super::groups::GroupId;
use super::shape::Shape;

/// Stable identifier of a body, unique within one world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn default_mass() -> f32 { 1.0 }
fn default_gravity_scale() -> f32 { 1.0 }
fn default_true() -> bool { true }

/// Initial state of a body, as handed over by the sprite layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Explicit id; `create_body` allocates one when absent.
    #[serde(default)]
    pub id: Option<BodyId>,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    pub shape: Shape,
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Infinite mass: never moved by gravity, forces or contacts.
    #[serde(default)]
    pub immovable: bool,
    #[serde(default)]
    pub bounce: f32,
    #[serde(default)]
    pub drag: f32,
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,
    #[serde(default = "default_true")]
    pub solid: bool,
    #[serde(default)]
    pub sleeping: bool,
    /// Cosmetic heading in degrees.
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl BodyDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: None,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            shape,
            mass: 1.0,
            immovable: false,
            bounce: 0.0,
            drag: 0.0,
            gravity_scale: 1.0,
            solid: true,
            sleeping: false,
            angle: 0.0,
            groups: Vec::new(),
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::circle(radius))
    }

    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Self::new(Shape::rect(half_width, half_height))
    }

    pub fn with_id(mut self, id: BodyId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn non_solid(mut self) -> Self {
        self.solid = false;
        self
    }

    pub fn asleep(mut self) -> Self {
        self.sleeping = true;
        self
    }

    pub fn in_groups<S: Into<String>>(mut self, groups: impl IntoIterator<Item = S>) -> Self {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Reject shapes and parameters that would put NaN into the simulation.
    pub fn validate(&self) -> PhysicsResult<()> {
        self.shape.validate()?;
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(PhysicsError::invalid_body("position and velocity must be finite"));
        }
        if !self.immovable && !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PhysicsError::invalid_body(format!(
                "mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        check_bounce(self.bounce)?;
        check_drag(self.drag)?;
        if !self.gravity_scale.is_finite() || !self.angle.is_finite() {
            return Err(PhysicsError::invalid_body("gravity scale and angle must be finite"));
        }
        Ok(())
    }
}

pub(crate) fn check_bounce(bounce: f32) -> PhysicsResult<()> {
    if (0.0..=1.0).contains(&bounce) {
        Ok(())
    } else {
        Err(PhysicsError::invalid_body(format!("bounce must be in [0, 1], got {bounce}")))
    }
}

pub(crate) fn check_drag(drag: f32) -> PhysicsResult<()> {
    if (0.0..=1.0).contains(&drag) {
        Ok(())
    } else {
        Err(PhysicsError::invalid_body(format!("drag must be in [0, 1], got {drag}")))
    }
}

/// Physical state of one simulated entity. Owned by `PhysicsWorld`.
#[derive(Clone, Debug)]
pub struct Body {
    id: BodyId,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    /// Force accumulator, consumed by the next integration sub-step.
    pub(crate) acceleration: Vec2,
    pub(crate) angle: f32,
    shape: Shape,
    /// Zero for immovable bodies.
    inv_mass: f32,
    pub(crate) bounce: f32,
    pub(crate) drag: f32,
    pub(crate) gravity_scale: f32,
    pub(crate) solid: bool,
    pub(crate) sleeping: bool,
    /// Sorted, deduplicated, never empty.
    pub(crate) groups: Vec<GroupId>,
}

impl Body {
    /// Build from an already validated description and interned groups.
    pub(crate) fn from_desc(id: BodyId, desc: &BodyDesc, groups: Vec<GroupId>) -> Self {
        debug_assert!(!groups.is_empty());
        Self {
            id,
            position: desc.position,
            velocity: desc.velocity,
            acceleration: Vec2::ZERO,
            angle: desc.angle,
            shape: desc.shape,
            inv_mass: if desc.immovable { 0.0 } else { 1.0 / desc.mass },
            bounce: desc.bounce,
            drag: desc.drag,
            gravity_scale: desc.gravity_scale,
            solid: desc.solid,
            sleeping: desc.sleeping,
            groups,
        }
    }

    pub fn id(&self) -> BodyId { self.id }

    pub fn position(&self) -> Vec2 { self.position }

    pub fn velocity(&self) -> Vec2 { self.velocity }

    pub fn acceleration(&self) -> Vec2 { self.acceleration }

    pub fn angle(&self) -> f32 { self.angle }

    pub fn shape(&self) -> Shape { self.shape }

    pub fn inv_mass(&self) -> f32 { self.inv_mass }

    /// `f32::INFINITY` for immovable bodies.
    pub fn mass(&self) -> f32 {
        if self.inv_mass == 0.0 { f32::INFINITY } else { 1.0 / self.inv_mass }
    }

    pub fn is_immovable(&self) -> bool { self.inv_mass == 0.0 }

    pub fn bounce(&self) -> f32 { self.bounce }

    pub fn drag(&self) -> f32 { self.drag }

    pub fn gravity_scale(&self) -> f32 { self.gravity_scale }

    pub fn is_solid(&self) -> bool { self.solid }

    pub fn is_sleeping(&self) -> bool { self.sleeping }

    pub fn bounding_box(&self) -> Aabb {
        self.shape.aabb_at(self.position)
    }

    pub(crate) fn groups(&self) -> &[GroupId] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immovable_body_has_zero_inverse_mass() {
        let desc = BodyDesc::rect(1.0, 1.0).immovable();
        desc.validate().unwrap();
        let body = Body::from_desc(BodyId(1), &desc, vec![GroupId(0)]);
        assert!(body.is_immovable());
        assert_eq!(body.mass(), f32::INFINITY);
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        assert!(BodyDesc::circle(1.0).with_mass(0.0).validate().is_err());
        assert!(BodyDesc::circle(1.0).with_bounce(1.5).validate().is_err());
        assert!(BodyDesc::circle(1.0).with_drag(-0.1).validate().is_err());
        assert!(BodyDesc::circle(1.0).with_drag(1.5).validate().is_err());
        assert!(BodyDesc::circle(1.0).with_drag(1.0).validate().is_ok());
        assert!(BodyDesc::circle(1.0).at(f32::NAN, 0.0).validate().is_err());
        assert!(matches!(
            BodyDesc::circle(-2.0).validate(),
            Err(PhysicsError::InvalidShape(_))
        ));
        // Mass is irrelevant once the body is immovable.
        assert!(BodyDesc::circle(1.0).with_mass(0.0).immovable().validate().is_ok());
    }

    #[test]
    fn desc_json_defaults() {
        let desc: BodyDesc =
            serde_json::from_str(r#"{"shape":{"kind":"rectangle","half_width":2,"half_height":3}}"#)
                .unwrap();
        assert_eq!(desc.mass, 1.0);
        assert!(desc.solid);
        assert_eq!(desc.gravity_scale, 1.0);
        assert!(desc.groups.is_empty());
    }
}
