// WebAssembly bindings for the estimator
use crate::estimate;
use crate::session::EstimateList;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct EnvelopeWasm {
    estimates: EstimateList,
}

impl Default for EnvelopeWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EnvelopeWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            estimates: EstimateList::new(),
        }
    }

    /// Evaluate an expression without recording it
    /// Returns JSON string of the estimate
    #[wasm_bindgen]
    pub fn evaluate(&self, expression: &str, unit: &str, rate: &str) -> Result<String, JsValue> {
        let result = estimate::evaluate(expression, unit, rate)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize estimate: {}", e)))
    }

    /// Evaluate and append to the list
    /// Returns JSON string of the new entry
    #[wasm_bindgen]
    pub fn add(
        &mut self,
        expression: &str,
        label: Option<String>,
        unit: &str,
        rate: &str,
    ) -> Result<String, JsValue> {
        let result = estimate::evaluate(expression, unit, rate)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let entry = self.estimates.add(label.as_deref(), result);

        serde_json::to_string(entry)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize entry: {}", e)))
    }

    /// Remove the entry at a 0-based index
    #[wasm_bindgen]
    pub fn remove(&mut self, index: usize) -> Result<(), JsValue> {
        self.estimates
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| JsValue::from_str(&format!("Index {} out of range", index)))
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.estimates.clear();
    }

    /// Returns JSON string array of entries
    #[wasm_bindgen]
    pub fn estimates(&self) -> Result<String, JsValue> {
        let entries: Vec<_> = self.estimates.iter().collect();
        serde_json::to_string(&entries)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize estimates: {}", e)))
    }

    #[wasm_bindgen]
    pub fn summary(&self) -> String {
        self.estimates.summary()
    }
}
