//! Sprite Physics - 2D rigid-body core for the sprite engine, in WASM
//!
//! Architecture:
//! - core/       - Math types and errors
//! - domain/     - Bodies, shapes, collision groups
//! - spatial/    - Broadphase (brute force, quadtree)
//! - systems/    - Integrator, narrowphase, filter, contacts, world bounds
//! - simulation/ - PhysicsWorld orchestration and the JS facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

pub mod world {
    pub use crate::simulation::*;
}

use wasm_bindgen::prelude::*;

// Thread pool for the parallel integrator and narrowphase
#[cfg(feature = "parallel")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // Err on a repeated init(): the logger is already installed.
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);

    web_sys::console::log_1(&"Sprite physics WASM core initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{Aabb, PhysicsError, PhysicsResult, Vec2};
pub use domain::{Body, BodyDesc, BodyId, ResponseTag, Shape};
pub use simulation::{ContactEvent, PerfStats, PhysicsWorld, World, WorldConfig};
pub use spatial::BroadphaseKind;
pub use systems::{ContactSettings, WorldBounds};
