//! Bindings for the browser front end.
//!
//! Configurations cross the boundary as their canonical keys (`re,im|re,im|...`) and structured results as JSON.

use wasm_bindgen::prelude::*;

use crate::analytic::AnalyticConfig;
use crate::configuration::{Configuration, Vertex};
use crate::goal::Goal;
use crate::moves::Letter;
use crate::search::SearchLimits;
use crate::Engine;

fn parse(key: &str) -> Result<Configuration, JsError> {
    Ok(key.parse::<Configuration>()?)
}

/// [`Engine`] as seen from JavaScript.
#[wasm_bindgen]
pub struct PentagonEngine {
    inner: Engine,
}

#[wasm_bindgen]
impl PentagonEngine {
    /// An engine with default analytic tolerances and no group table yet.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { inner: Engine::new(AnalyticConfig::default()) }
    }

    /// Fire a letter (`"A"` to `"D"`) at a vertex and return the new key.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&self, key: &str, vertex: usize, letter: &str) -> Result<String, JsError> {
        Ok(self.inner.apply_move(&parse(key)?, Vertex::new(vertex)?, Letter::from_symbol(letter)?).to_string())
    }

    /// Breadth-first search; `goal` is a JSON [`Goal`], the result a JSON search outcome.
    #[wasm_bindgen(js_name = findPath)]
    pub fn find_path(&self, start: &str, goal: &str, max_depth: usize, time_budget_ms: f64) -> Result<String, JsError> {
        let goal: Goal = serde_json::from_str(goal)?;
        let limits = SearchLimits::full_solution()
            .with_max_depth(max_depth)
            .with_time_budget_ms(time_budget_ms);
        Ok(serde_json::to_string(&self.inner.find_path(&parse(start)?, &goal, limits))?)
    }

    /// A quick hint towards all zeros with the default hint limits.
    pub fn hint(&self, start: &str) -> Result<String, JsError> {
        let outcome = self.inner.find_path(&parse(start)?, &Goal::AllZeros, SearchLimits::hint());
        Ok(serde_json::to_string(&outcome)?)
    }

    /// Build the group table. Cheap to call again.
    #[wasm_bindgen(js_name = initializeGroup)]
    pub fn initialize_group(&self) -> usize {
        self.inner.initialize_group().size()
    }

    /// Distance of a nice representative from the identity.
    #[wasm_bindgen(js_name = distanceFromIdentity)]
    pub fn distance_from_identity(&self, key: &str) -> Result<usize, JsError> {
        Ok(self.inner.distance_from_identity(&parse(key)?)?)
    }

    /// Shortest path to a nice representative, as a JSON list of moves such as `["A0","D3"]`.
    #[wasm_bindgen(js_name = pathFromIdentity)]
    pub fn path_from_identity(&self, key: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.path_from_identity(&parse(key)?)?)?)
    }

    /// The analytic solver's next move as JSON, `null` on a plateau.
    #[wasm_bindgen(js_name = suggestNextMove)]
    pub fn suggest_next_move(&self, current: &str, goal: &str) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.suggest_next_move(&parse(current)?, &parse(goal)?))?)
    }

    /// The nice representative with every reduction stage, as JSON.
    pub fn canonicalize(&self, key: &str, distinguished: usize) -> Result<String, JsError> {
        let canonicalization = self.inner.canonicalize(&parse(key)?, Vertex::new(distinguished)?);
        Ok(serde_json::to_string(&canonicalization)?)
    }
}

impl Default for PentagonEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Crate version, for the front end's about box.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
