//! Rectangular world limits.

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult};
use crate::domain::Body;

/// World rectangle. Any edge may be infinite; the default is unbounded on all sides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundsRepr", into = "BoundsRepr")]
pub struct WorldBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// JSON form: a missing or null edge is unbounded.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct BoundsRepr {
    #[serde(default)]
    left: Option<f32>,
    #[serde(default)]
    right: Option<f32>,
    #[serde(default)]
    top: Option<f32>,
    #[serde(default)]
    bottom: Option<f32>,
}

impl From<BoundsRepr> for WorldBounds {
    fn from(r: BoundsRepr) -> Self {
        WorldBounds::from_options(r.left, r.right, r.top, r.bottom)
    }
}

impl From<WorldBounds> for BoundsRepr {
    fn from(b: WorldBounds) -> Self {
        let finite = |v: f32| v.is_finite().then_some(v);
        BoundsRepr {
            left: finite(b.left),
            right: finite(b.right),
            top: finite(b.top),
            bottom: finite(b.bottom),
        }
    }
}

impl WorldBounds {
    pub const UNBOUNDED: WorldBounds = WorldBounds {
        left: f32::NEG_INFINITY,
        right: f32::INFINITY,
        top: f32::NEG_INFINITY,
        bottom: f32::INFINITY,
    };

    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> PhysicsResult<Self> {
        let bounds = WorldBounds { left, right, top, bottom };
        bounds.validate()?;
        Ok(bounds)
    }

    /// `None` edges are unbounded.
    pub fn from_options(left: Option<f32>, right: Option<f32>, top: Option<f32>, bottom: Option<f32>) -> Self {
        WorldBounds {
            left: left.unwrap_or(f32::NEG_INFINITY),
            right: right.unwrap_or(f32::INFINITY),
            top: top.unwrap_or(f32::NEG_INFINITY),
            bottom: bottom.unwrap_or(f32::INFINITY),
        }
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        let edges = [self.left, self.right, self.top, self.bottom];
        if edges.iter().any(|e| e.is_nan()) {
            return Err(PhysicsError::configuration("world bounds must not be NaN"));
        }
        if self.left > self.right || self.top > self.bottom {
            return Err(PhysicsError::configuration(format!(
                "world bounds inverted: left {} right {} top {} bottom {}",
                self.left, self.right, self.top, self.bottom
            )));
        }
        Ok(())
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Keep `body` inside the rectangle. Returns true if any edge was hit.
    ///
    /// On a violated edge the body is placed flush against it and that velocity axis is
    /// reflected with the body's own bounce; there is no second body to combine with.
    pub fn confine(&self, body: &mut Body) -> bool {
        if !body.solid {
            return false;
        }
        let bb = body.bounding_box();
        let half = body.shape().half_extents();
        let mut hit = false;

        if bb.left < self.left {
            body.position.x = self.left + half.x;
            body.velocity.x *= -body.bounce;
            hit = true;
        } else if bb.right > self.right {
            body.position.x = self.right - half.x;
            body.velocity.x *= -body.bounce;
            hit = true;
        }

        if bb.top < self.top {
            body.position.y = self.top + half.y;
            body.velocity.y *= -body.bounce;
            hit = true;
        } else if bb.bottom > self.bottom {
            body.position.y = self.bottom - half.y;
            body.velocity.y *= -body.bounce;
            hit = true;
        }
        hit
    }

    /// Confine every body; returns how many touched an edge.
    pub fn apply(&self, bodies: &mut [Body]) -> u32 {
        if self.is_unbounded() {
            return 0;
        }
        bodies.iter_mut().map(|b| self.confine(b) as u32).sum()
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
