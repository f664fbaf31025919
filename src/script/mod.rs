//! Master-script compiler module.
//!
//! Turns a reveal snapshot plus a narrative into a timed, engine-adapted
//! editing script.

pub mod canonical;
pub mod compiler;
pub mod engine;
pub mod model;
pub mod reveal;
pub mod schema;
pub mod segment;
pub mod settings;
pub mod timeline;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use canonical::{canonical_json, digest, hash_input, hash_input_with, hash_value, HashAlgorithm};
pub use compiler::{compile_master_script, compile_master_script_with, CompilerConfig};
pub use engine::{adapt_for_engine, EngineProfile, ENGINE_PROFILES};
pub use model::{
    new_trace_id, CameraMove, ClipAudio, ClipVisuals, CompatibilityNotes, CompilerInput,
    EditScriptMaster, EnginePacket, MoviolaRequest, OptimizedPrompt, PacketStatus, ScriptMeta,
    ScriptRules, ShotType, Timecode, TimelineClip, DEFAULT_ENGINE, KNOWN_ENGINES,
};
pub use reveal::compile_visual_prompt;
pub use schema::{compiler_input_schema, master_script_schema};
pub use segment::{segment_narrative, Segment, SegmenterConfig};
pub use settings::{
    AspectRatio, FidelityLock, FilmStyle, RevealSettings, UsageTemplate, WatermarkConfig,
    WatermarkPosition,
};
pub use timeline::build_timeline;

#[cfg(feature = "wasm")]
pub use wasm::JsScriptCompiler;
