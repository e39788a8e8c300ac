use wasm_bindgen::prelude::*;

/// Per-step timings and counters. Times accumulate across sub-steps when the
/// collision pass runs per sub-step.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) broadphase_ms: f64,
    pub(super) narrowphase_ms: f64,
    pub(super) resolve_ms: f64,
    pub(super) bounds_ms: f64,
    pub(super) body_count: u32,
    pub(super) candidate_pairs: u32,
    pub(super) eligible_pairs: u32,
    pub(super) contacts: u32,
    pub(super) impulses_applied: u32,
    pub(super) degenerate_contacts: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn broadphase_ms(&self) -> f64 { self.broadphase_ms }
    #[wasm_bindgen(getter)]
    pub fn narrowphase_ms(&self) -> f64 { self.narrowphase_ms }
    #[wasm_bindgen(getter)]
    pub fn resolve_ms(&self) -> f64 { self.resolve_ms }
    #[wasm_bindgen(getter)]
    pub fn bounds_ms(&self) -> f64 { self.bounds_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    /// Broadphase output, before the group filter.
    #[wasm_bindgen(getter)]
    pub fn candidate_pairs(&self) -> u32 { self.candidate_pairs }
    /// Pairs that passed the group filter and sleep check.
    #[wasm_bindgen(getter)]
    pub fn eligible_pairs(&self) -> u32 { self.eligible_pairs }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn impulses_applied(&self) -> u32 { self.impulses_applied }
    #[wasm_bindgen(getter)]
    pub fn degenerate_contacts(&self) -> u32 { self.degenerate_contacts }
}
