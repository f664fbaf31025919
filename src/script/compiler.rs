//! Master-script compilation entry points.
//!
//! `compile_master_script` is a pure function of its input: hash, segment,
//! build the timeline, then adapt it for every requested engine.

use tracing::debug;

use super::canonical::{hash_input_with, HashAlgorithm};
use super::engine::adapt_for_engine;
use super::model::{
    CompilerInput, EditScriptMaster, EnginePacket, ScriptMeta, ScriptRules, TimelineClip,
    DEFAULT_ENGINE,
};
use super::segment::{segment_narrative, SegmenterConfig};
use super::timeline::build_timeline;

/// Negative prompt used when the settings carry none.
pub const DEFAULT_NEGATIVES: &str = "blur, text artifacts, distortion, bad anatomy";

/// Constraint statements attached to every script.
pub const BASE_CONSTRAINTS: [&str; 4] = [
    "This script does not produce video directly; it is a technical guide for external engines.",
    "Maintain character consistency across clips.",
    "No abrupt cuts.",
    "Reference adherence and identity fidelity are best-effort hints for the downstream engine.",
];

/// Added only when the settings ask for a watermark.
pub const WATERMARK_CONSTRAINT: &str =
    "Watermark placement is a best-effort hint; the downstream engine may not render it.";

/// Run-time settings for the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerConfig {
    /// Language tag written to `rules.language`.
    pub language: String,
    /// Engine used when the request names none.
    pub default_engine: String,
    /// Appended after [`BASE_CONSTRAINTS`].
    pub extra_constraints: Vec<String>,
    pub hash_algorithm: HashAlgorithm,
    pub segmenter: SegmenterConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            language: "es-MX".to_string(),
            default_engine: DEFAULT_ENGINE.to_string(),
            extra_constraints: Vec::new(),
            hash_algorithm: HashAlgorithm::preferred(),
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set language tag.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder: Set default engine.
    pub fn with_default_engine(mut self, engine: impl Into<String>) -> Self {
        self.default_engine = engine.into();
        self
    }

    /// Builder: Add a constraint statement.
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.extra_constraints.push(constraint.into());
        self
    }

    /// Builder: Set hash algorithm.
    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Builder: Set segmenter configuration.
    pub fn with_segmenter(mut self, segmenter: SegmenterConfig) -> Self {
        self.segmenter = segmenter;
        self
    }
}

/// Compiles a master script with the default configuration.
pub fn compile_master_script(input: &CompilerInput) -> EditScriptMaster {
    compile_master_script_with(input, &CompilerConfig::default())
}

/// Compiles a master script.
pub fn compile_master_script_with(input: &CompilerInput, config: &CompilerConfig) -> EditScriptMaster {
    let hash = hash_input_with(input, config.hash_algorithm);
    let settings = &input.reveal_settings;

    let segments = segment_narrative(
        &input.narrative_text,
        input.moviola.duration_sec,
        &config.segmenter,
    );
    let timeline = build_timeline(&segments, input);
    let engine_packets = build_packets(&timeline, input, config);
    let total_duration_sec = timeline.iter().map(|c| c.timecode.duration_sec).sum();

    debug!(
        trace_id = %input.trace_id,
        hash = %hash,
        clips = timeline.len(),
        total_duration_sec,
        packets = engine_packets.len(),
        "compiled master script"
    );

    let negative = settings.negative_prompt.trim();
    let mut constraints: Vec<String> = BASE_CONSTRAINTS.iter().map(|s| s.to_string()).collect();
    if settings.watermark.instruction().is_some() {
        constraints.push(WATERMARK_CONSTRAINT.to_string());
    }
    constraints.extend(config.extra_constraints.iter().cloned());

    EditScriptMaster {
        meta: ScriptMeta {
            trace_id: input.trace_id.clone(),
            input_snapshot_hash: hash,
            created_at: input.created_at,
            format_ratio: settings.aspect_ratio,
            total_duration_sec,
            intent: input.moviola.intent.trim().to_string(),
        },
        rules: ScriptRules {
            language: config.language.clone(),
            negatives_global: if negative.is_empty() {
                DEFAULT_NEGATIVES.to_string()
            } else {
                negative.to_string()
            },
            constraints,
        },
        timeline,
        engine_packets,
    }
}

/// Primary engine first, then any additional engines; duplicates (case-insensitive) dropped.
fn requested_engines(input: &CompilerInput, config: &CompilerConfig) -> Vec<String> {
    let primary = match input.moviola.engine.trim() {
        "" => config.default_engine.trim(),
        name => name,
    };

    let mut engines: Vec<String> = Vec::new();
    let candidates = std::iter::once(primary).chain(input.moviola.also_engines.iter().map(|e| e.trim()));
    for name in candidates {
        if name.is_empty() || engines.iter().any(|e| e.eq_ignore_ascii_case(name)) {
            continue;
        }
        engines.push(name.to_string());
    }
    if engines.is_empty() {
        engines.push(DEFAULT_ENGINE.to_string());
    }
    engines
}

fn build_packets(
    timeline: &[TimelineClip],
    input: &CompilerInput,
    config: &CompilerConfig,
) -> Vec<EnginePacket> {
    let ratio = input.reveal_settings.aspect_ratio;
    requested_engines(input, config)
        .iter()
        .map(|engine| adapt_for_engine(timeline, engine, ratio))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
