//! Impulse-based contact resolution with a positional-correction nudge.
//!
//! Every shape pair is treated as round: the normal runs center to center and each
//! body contributes its extent along that normal (the radius for circles, the box
//! projection for rectangles). Edge and corner contacts between rectangles are
//! therefore approximate; there is no clipped contact manifold.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Vec2;
use crate::domain::Body;

/// Positional-correction tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    /// Fraction of the excess penetration removed per resolution.
    pub percent: f32,
    /// Penetration tolerated without correction.
    pub slop: f32,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self { percent: 0.2, slop: 0.01 }
    }
}

/// Centers coincide, so there is no usable normal. The pair is skipped.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("degenerate contact: coincident centers")]
pub struct DegenerateContact;

/// Contact geometry from A toward B.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub distance: f32,
    /// Sum of extents along the normal minus the center distance; positive when overlapping.
    pub penetration: f32,
}

impl Contact {
    pub fn between(a: &Body, b: &Body) -> Result<Self, DegenerateContact> {
        let delta = b.position() - a.position();
        let normal = delta.try_normalize().ok_or(DegenerateContact)?;
        let distance = delta.length();
        let reach = a.shape().extent_along(normal) + b.shape().extent_along(normal);
        Ok(Self { normal, distance, penetration: reach - distance })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactOutcome {
    Resolved { impulse: f32 },
    /// Already moving apart along the normal: nothing applied.
    Separating,
    /// Both bodies immovable.
    Static,
}

/// Resolve one confirmed-overlapping pair in place.
pub fn resolve(
    a: &mut Body,
    b: &mut Body,
    contact: &Contact,
    settings: &ContactSettings,
) -> ContactOutcome {
    let (inv_a, inv_b) = (a.inv_mass(), b.inv_mass());
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return ContactOutcome::Static;
    }
    let n = contact.normal;

    // Velocity of B relative to A; negative along the normal means closing.
    let velocity_along_normal = (b.velocity - a.velocity).dot(n);
    if velocity_along_normal > 0.0 {
        return ContactOutcome::Separating;
    }

    let restitution = a.bounce.min(b.bounce);
    let j = -(1.0 + restitution) * velocity_along_normal / inv_sum;
    a.velocity -= n * (j * inv_a);
    b.velocity += n * (j * inv_b);

    let excess = contact.penetration - settings.slop;
    if excess > 0.0 {
        let correction = excess / inv_sum * settings.percent;
        a.position -= n * (correction * inv_a);
        b.position += n * (correction * inv_b);
    }

    ContactOutcome::Resolved { impulse: j }
}
