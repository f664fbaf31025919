//! Moviola - master-script compiler for AI video engines.
//!
//! Takes a frozen reveal snapshot (scene analysis, narrative, cultural
//! elements, visual settings) and compiles it into an `EditScriptMaster`:
//! a timed clip timeline plus per-engine prompt packets.
//!
//! - **Pure**: the same input always yields the same script
//! - **Traceable**: every script carries a hash of the content it came from
//! - **Advisory**: compatibility checks are heuristics, never calls to an engine
//!
//! # Example
//!
//! ```rust
//! use moviola::{compile_master_script, CompilerInput, MoviolaRequest, RevealSettings, AspectRatio};
//!
//! let input = CompilerInput::new("trace-1", 1_700_000_000_000)
//!     .with_analysis_context("Covered market at dawn")
//!     .with_narrative("The market wakes to the smell of coffee. Women weave stories while they sell.")
//!     .with_reveal_settings(RevealSettings::new().with_aspect_ratio(AspectRatio::Ratio16x9))
//!     .with_moviola(MoviolaRequest::new("Veo", 9.0));
//!
//! let master = compile_master_script(&input);
//! assert!(!master.timeline.is_empty());
//! assert_eq!(master.engine_packets[0].engine, "Veo");
//! assert_eq!(master.meta.input_snapshot_hash, moviola::hash_input(&input));
//! ```

pub mod error;

// Script compiler module
pub mod script;

// Re-exports for convenience
pub use error::{MoviolaError, MoviolaResult};
pub use script::{
    adapt_for_engine, build_timeline, compile_master_script, compile_master_script_with,
    compile_visual_prompt, hash_input, master_script_schema, segment_narrative, AspectRatio, CompilerConfig,
    CompilerInput, EditScriptMaster, EnginePacket, MoviolaRequest, PacketStatus, RevealSettings,
    Segment, SegmenterConfig, TimelineClip,
};

#[cfg(feature = "wasm")]
pub use script::JsScriptCompiler;
