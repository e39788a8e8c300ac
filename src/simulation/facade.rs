//! JavaScript-facing wrapper around `PhysicsWorld`.
//!
//! Ids cross the boundary as plain `u32`; errors become `JsValue` strings.

use wasm_bindgen::prelude::*;

use crate::core::{PhysicsError, Vec2};
use crate::domain::{BodyDesc, BodyId};
use crate::systems::WorldBounds;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

fn js_err(e: PhysicsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: PhysicsWorld,
}

#[wasm_bindgen]
impl World {
    /// World with default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: PhysicsWorld::new() }
    }

    /// Build from a JSON `WorldConfig`; missing fields take their defaults.
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<World, JsValue> {
        let core = PhysicsWorld::from_config_json(json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_gravity(x, y).map_err(js_err)
    }

    /// `undefined` edges are open.
    pub fn set_bounds(
        &mut self,
        left: Option<f32>,
        right: Option<f32>,
        top: Option<f32>,
        bottom: Option<f32>,
    ) -> Result<(), JsValue> {
        let bounds = WorldBounds::from_options(left, right, top, bottom);
        self.core.set_world_bounds(bounds).map_err(js_err)
    }

    pub fn set_time_scale(&mut self, scale: f32) -> Result<(), JsValue> {
        self.core.set_time_scale(scale).map_err(js_err)
    }

    pub fn set_sleeping_enabled(&mut self, enabled: bool) {
        self.core.set_sleeping_enabled(enabled);
    }

    pub fn register_collision_rule(&mut self, group1: &str, group2: &str, tag: &str) {
        self.core.register_collision_rule(group1, group2, tag);
    }

    pub fn remove_collision_rule(&mut self, group1: &str, group2: &str) -> bool {
        self.core.remove_collision_rule(group1, group2)
    }

    /// Create a body from a JSON `BodyDesc`. Returns the body id.
    pub fn create_body(&mut self, json: &str) -> Result<u32, JsValue> {
        let desc: BodyDesc = serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.core.create_body(desc).map(|id| id.0).map_err(js_err)
    }

    pub fn create_circle(&mut self, x: f32, y: f32, radius: f32, mass: f32) -> Result<u32, JsValue> {
        let desc = BodyDesc::circle(radius).at(x, y).with_mass(mass);
        self.core.create_body(desc).map(|id| id.0).map_err(js_err)
    }

    pub fn create_rect(
        &mut self,
        x: f32,
        y: f32,
        half_width: f32,
        half_height: f32,
        mass: f32,
    ) -> Result<u32, JsValue> {
        let desc = BodyDesc::rect(half_width, half_height).at(x, y).with_mass(mass);
        self.core.create_body(desc).map(|id| id.0).map_err(js_err)
    }

    pub fn destroy_body(&mut self, id: u32) {
        self.core.destroy_body(BodyId(id));
    }

    pub fn set_groups(&mut self, id: u32, groups: Vec<String>) -> Result<(), JsValue> {
        self.core.set_groups(BodyId(id), &groups).map_err(js_err)
    }

    pub fn set_velocity(&mut self, id: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.set_velocity(BodyId(id), Vec2::new(x, y)).map_err(js_err)
    }

    pub fn add_force(&mut self, id: u32, x: f32, y: f32) -> Result<(), JsValue> {
        self.core.add_force(BodyId(id), Vec2::new(x, y)).map_err(js_err)
    }

    pub fn set_sleeping(&mut self, id: u32, sleeping: bool) -> Result<(), JsValue> {
        self.core.set_sleeping(BodyId(id), sleeping).map_err(js_err)
    }

    pub fn turn(&mut self, id: u32, degrees: f32) -> Result<(), JsValue> {
        self.core.turn(BodyId(id), degrees).map_err(js_err)
    }

    pub fn move_steps(&mut self, id: u32, steps: f32) -> Result<(), JsValue> {
        self.core.move_steps(BodyId(id), steps).map_err(js_err)
    }

    pub fn set_angle(&mut self, id: u32, degrees: f32) -> Result<(), JsValue> {
        self.core.set_angle(BodyId(id), degrees).map_err(js_err)
    }

    pub fn is_touching(&self, a: u32, b: u32) -> Result<bool, JsValue> {
        self.core.is_touching(BodyId(a), BodyId(b)).map_err(js_err)
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    /// `[x, y]`, or `undefined` for an unknown id.
    pub fn position(&self, id: u32) -> Option<Vec<f32>> {
        self.core.position(BodyId(id)).map(|p| vec![p.x, p.y])
    }

    pub fn velocity(&self, id: u32) -> Option<Vec<f32>> {
        self.core.velocity(BodyId(id)).map(|v| vec![v.x, v.y])
    }

    /// `[left, right, top, bottom]`
    pub fn bounding_box(&self, id: u32) -> Option<Vec<f32>> {
        self.core
            .bounding_box(BodyId(id))
            .map(|bb| vec![bb.left, bb.right, bb.top, bb.bottom])
    }

    /// Contacts of the last step as a JSON array.
    pub fn contacts_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.core.contacts()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
