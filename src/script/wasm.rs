//! WASM bindings for the script compiler.
//!
//! Inputs and outputs cross the boundary as plain JS objects with the same
//! camelCase shape as the JSON contract.

use js_sys::Array;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use crate::error::MoviolaError;
use super::canonical::hash_input;
use super::compiler::{compile_master_script_with, CompilerConfig};
use super::model::{new_trace_id, CompilerInput, KNOWN_ENGINES};
use super::reveal::compile_visual_prompt;
use super::schema::master_script_schema;

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<MoviolaError> for JsValue {
    fn from(err: MoviolaError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

fn parse_input(input: JsValue) -> Result<CompilerInput, MoviolaError> {
    from_value(input).map_err(|e| MoviolaError::serialization(e.to_string()))
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: MoviolaError| JsValue::from(e))
    };
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Traceability hash of a compiler input.
///
/// # Example (JavaScript)
/// ```js
/// const hash = hashInput({ traceId: "t1", createdAt: Date.now(), narrativeText: "..." });
/// ```
#[wasm_bindgen(js_name = hashInput)]
pub fn hash_input_js(input: JsValue) -> Result<String, JsValue> {
    let input = js_result!(parse_input(input))?;
    Ok(hash_input(&input))
}

/// Compiles an `EditScriptMaster` with the default configuration.
#[wasm_bindgen(js_name = compileMasterScript)]
pub fn compile_master_script_js(input: JsValue) -> Result<JsValue, JsValue> {
    JsScriptCompiler::new().compile(input)
}

/// Builds the multi-line reveal prompt for an input.
#[wasm_bindgen(js_name = compileVisualPrompt)]
pub fn compile_visual_prompt_js(input: JsValue, has_reference_image: bool) -> Result<String, JsValue> {
    let input = js_result!(parse_input(input))?;
    Ok(compile_visual_prompt(&input, has_reference_image))
}

/// Generates a fresh trace id.
#[wasm_bindgen(js_name = newTraceId)]
pub fn new_trace_id_js() -> String {
    new_trace_id()
}

/// JSON Schema of the `EditScriptMaster` object.
#[wasm_bindgen(js_name = masterScriptSchema)]
pub fn master_script_schema_js() -> Result<JsValue, JsValue> {
    Ok(to_js_value(&master_script_schema())?)
}

/// Engine names offered by the picker.
#[wasm_bindgen(js_name = knownEngines)]
pub fn known_engines_js() -> Array {
    KNOWN_ENGINES.iter().map(|e| JsValue::from_str(e)).collect()
}

// =============================================================================
// CONFIGURED COMPILER
// =============================================================================

/// Compiler with a caller-chosen configuration.
///
/// # Example (JavaScript)
/// ```js
/// const compiler = new JsScriptCompiler();
/// compiler.setLanguage("en-US");
/// compiler.setClipBounds(2, 8);
/// const master = compiler.compile(input);
/// ```
#[wasm_bindgen]
pub struct JsScriptCompiler {
    config: CompilerConfig,
}

impl Default for JsScriptCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsScriptCompiler {
    /// Creates a compiler with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsScriptCompiler {
        JsScriptCompiler {
            config: CompilerConfig::default(),
        }
    }

    /// Sets the language tag written to the script rules.
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, language: &str) {
        self.config.language = language.to_string();
    }

    /// Sets the engine used when a request names none.
    #[wasm_bindgen(js_name = setDefaultEngine)]
    pub fn set_default_engine(&mut self, engine: &str) {
        self.config.default_engine = engine.to_string();
    }

    /// Appends a constraint statement to every script.
    #[wasm_bindgen(js_name = addConstraint)]
    pub fn add_constraint(&mut self, constraint: &str) {
        self.config.extra_constraints.push(constraint.to_string());
    }

    /// Sets the per-clip duration bounds in seconds.
    #[wasm_bindgen(js_name = setClipBounds)]
    pub fn set_clip_bounds(&mut self, min_sec: u32, max_sec: u32) {
        self.config.segmenter = self.config.segmenter.clone().with_clip_bounds(min_sec, max_sec);
    }

    /// Compiles an input object into an `EditScriptMaster` object.
    pub fn compile(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let input = js_result!(parse_input(input))?;
        let master = compile_master_script_with(&input, &self.config);
        Ok(to_js_value(&master)?)
    }
}
