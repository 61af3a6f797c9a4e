//! JavaScript bindings (feature `wasm`).

use crate::engine::{allocate as run_allocation, AllocationConfig};
use crate::model::AllocationInput;
use wasm_bindgen::prelude::*;

/// Runs an allocation on a JS roster object.
///
/// `config` may be `undefined` to use the defaults. Returns the result as
/// a plain JS object, or throws with the error message.
#[wasm_bindgen]
pub fn allocate(input: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let input: AllocationInput = serde_wasm_bindgen::from_value(input)?;
    let config: AllocationConfig = if config.is_undefined() || config.is_null() {
        AllocationConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let result =
        run_allocation(&input, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
