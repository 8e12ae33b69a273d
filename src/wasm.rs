//! WebAssembly bindings for browser views.
//!
//! [`WasmRun`] wraps a [`RunState`] so a page can drive the engine from its
//! own timer and render the population and statistics. Times cross the
//! boundary as milliseconds since the Unix epoch (`Date.now()`).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use wasm_bindgen::prelude::*;

use crate::weasel::{RunState, WeaselConfig};

fn from_epoch_ms(ms: f64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(ms.max(0.0) as u64)
}

/// WebAssembly wrapper for one evolution run.
#[wasm_bindgen]
pub struct WasmRun {
    state: RunState,
}

#[wasm_bindgen]
impl WasmRun {
    /// Initialize a run for `target`.
    ///
    /// `config` is a `WeaselConfig` object; `undefined` or `null` uses the
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(target: &str, config: JsValue) -> Result<WasmRun, JsError> {
        let config: WeaselConfig = if config.is_undefined() || config.is_null() {
            WeaselConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {e}")))?
        };
        let state = RunState::initialize(target, config)?;
        Ok(WasmRun { state })
    }

    /// Advance one generation.
    #[wasm_bindgen]
    pub fn step(&mut self) {
        self.state.advance();
    }

    /// Whether the target has been matched exactly.
    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Best specimen of the current population.
    #[wasm_bindgen(js_name = bestSpecimen)]
    pub fn best_specimen(&self) -> String {
        self.state.best_specimen().0.to_string()
    }

    /// Fitness of the best specimen.
    #[wasm_bindgen(js_name = bestFitness)]
    pub fn best_fitness(&self) -> f64 {
        self.state.best_specimen().1
    }

    /// Current population as an array of strings.
    #[wasm_bindgen]
    pub fn population(&self) -> Vec<String> {
        self.state
            .population()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Run statistics as a plain object.
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(self.state.stats())
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Record the start time in epoch milliseconds.
    #[wasm_bindgen]
    pub fn start(&mut self, now_ms: f64) {
        self.state.mark_started(from_epoch_ms(now_ms));
    }

    /// Stop the run, recording the end time in epoch milliseconds.
    #[wasm_bindgen]
    pub fn finish(&mut self, now_ms: f64) {
        self.state.finish(from_epoch_ms(now_ms));
    }
}
