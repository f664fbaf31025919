//! Data models for the script compiler.
//!
//! Field names serialize in camelCase; the JSON shape of [`CompilerInput`] and
//! [`EditScriptMaster`] is the contract the browser UI reads and exports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MoviolaResult;
use super::settings::{AspectRatio, RevealSettings};

/// Engine used when a request names none.
pub const DEFAULT_ENGINE: &str = "Veo";

/// Total duration used when a request carries no usable duration.
pub const DEFAULT_DURATION_SEC: f64 = 8.0;

/// Video engines offered by the UI picker.
pub const KNOWN_ENGINES: [&str; 5] = ["Veo", "Sora", "Wan", "Grok", "Otro"];

/// Generates a fresh trace id for a compilation request.
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// INPUT
// =============================================================================

/// Video-script request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviolaRequest {
    /// Target engine name; matched case-insensitively against the adaptation table.
    #[serde(default)]
    pub engine: String,

    /// Requested total duration in seconds.
    #[serde(default = "default_duration")]
    pub duration_sec: f64,

    /// Free-text creative intent.
    #[serde(default)]
    pub intent: String,

    /// Further engines that should receive their own packet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_engines: Vec<String>,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SEC
}

impl Default for MoviolaRequest {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            duration_sec: DEFAULT_DURATION_SEC,
            intent: "Technical script".to_string(),
            also_engines: Vec::new(),
        }
    }
}

impl MoviolaRequest {
    /// Creates a request for one engine.
    pub fn new(engine: impl Into<String>, duration_sec: f64) -> Self {
        Self {
            engine: engine.into(),
            duration_sec,
            ..Default::default()
        }
    }

    /// Builder: Set intent.
    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    /// Builder: Add another target engine.
    pub fn with_also_engine(mut self, engine: impl Into<String>) -> Self {
        self.also_engines.push(engine.into());
        self
    }
}

/// Everything the compiler needs, captured before compilation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompilerInput {
    pub trace_id: String,

    /// Request creation time (milliseconds since epoch).
    pub created_at: i64,

    #[serde(default)]
    pub analysis_context: String,

    #[serde(default)]
    pub narrative_text: String,

    #[serde(default)]
    pub cultural_elements: Vec<String>,

    /// English visual prompt assembled upstream (may contain newlines).
    #[serde(default)]
    pub compiled_visual_prompt: String,

    #[serde(default)]
    pub reveal_settings: RevealSettings,

    #[serde(default)]
    pub moviola: MoviolaRequest,
}

impl CompilerInput {
    /// Creates an input with default settings and empty text.
    pub fn new(trace_id: impl Into<String>, created_at: i64) -> Self {
        Self {
            trace_id: trace_id.into(),
            created_at,
            analysis_context: String::new(),
            narrative_text: String::new(),
            cultural_elements: Vec::new(),
            compiled_visual_prompt: String::new(),
            reveal_settings: RevealSettings::default(),
            moviola: MoviolaRequest::default(),
        }
    }

    /// Parses an input from its JSON form.
    pub fn from_json(json: &str) -> MoviolaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder: Set analysis context.
    pub fn with_analysis_context(mut self, context: impl Into<String>) -> Self {
        self.analysis_context = context.into();
        self
    }

    /// Builder: Set narrative text.
    pub fn with_narrative(mut self, text: impl Into<String>) -> Self {
        self.narrative_text = text.into();
        self
    }

    /// Builder: Add a cultural element.
    pub fn with_cultural_element(mut self, element: impl Into<String>) -> Self {
        self.cultural_elements.push(element.into());
        self
    }

    /// Builder: Set compiled visual prompt.
    pub fn with_compiled_visual_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.compiled_visual_prompt = prompt.into();
        self
    }

    /// Builder: Set reveal settings.
    pub fn with_reveal_settings(mut self, settings: RevealSettings) -> Self {
        self.reveal_settings = settings;
        self
    }

    /// Builder: Set the video request.
    pub fn with_moviola(mut self, moviola: MoviolaRequest) -> Self {
        self.moviola = moviola;
        self
    }
}

// =============================================================================
// TIMELINE
// =============================================================================

/// Shot framing, assigned by clip position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ShotType {
    #[serde(rename = "Wide Establishing Shot")]
    WideEstablishing,
    #[serde(rename = "Medium Shot")]
    Medium,
    #[serde(rename = "Close Up")]
    CloseUp,
    #[serde(rename = "Macro Detail")]
    MacroDetail,
}

impl ShotType {
    /// Wire label, as written to `visuals.shotType`.
    pub fn label(self) -> &'static str {
        match self {
            ShotType::WideEstablishing => "Wide Establishing Shot",
            ShotType::Medium => "Medium Shot",
            ShotType::CloseUp => "Close Up",
            ShotType::MacroDetail => "Macro Detail",
        }
    }
}

/// Camera movement, assigned by clip position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CameraMove {
    #[serde(rename = "Slow Pan")]
    SlowPan,
    #[serde(rename = "Tracking Shot")]
    Tracking,
    #[serde(rename = "Slow Push In")]
    SlowPushIn,
    #[serde(rename = "Static Hold")]
    StaticHold,
}

impl CameraMove {
    /// Wire label, as written to `visuals.cameraMove`.
    pub fn label(self) -> &'static str {
        match self {
            CameraMove::SlowPan => "Slow Pan",
            CameraMove::Tracking => "Tracking Shot",
            CameraMove::SlowPushIn => "Slow Push In",
            CameraMove::StaticHold => "Static Hold",
        }
    }
}

/// Position of a clip on the script timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timecode {
    /// `MM:SS`
    #[serde(rename = "in")]
    pub in_point: String,
    /// `MM:SS`
    #[serde(rename = "out")]
    pub out_point: String,
    pub duration_sec: u32,
}

/// Framing, movement and a short description of what the clip shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClipVisuals {
    pub shot_type: ShotType,
    pub camera_move: CameraMove,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// Audio hints for a clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipAudio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
}

/// One timed shot of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineClip {
    /// `clip_01`, `clip_02`, ...
    pub id: String,
    pub timecode: Timecode,
    pub visuals: ClipVisuals,
    pub audio: ClipAudio,
    /// Engine-agnostic generation prompt.
    pub gen_prompt_base: String,
}

// =============================================================================
// ENGINE PACKETS
// =============================================================================

/// Outcome of the compatibility heuristic for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PacketStatus {
    Ready,
    Warning,
    /// Reserved for engines known not to handle the request at all.
    Unsupported,
    /// The engine name was blank.
    Unknown,
}

/// Engine-ready prompt for one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPrompt {
    pub clip_id: String,
    pub prompt: String,
}

/// Advisory notes from the compatibility heuristic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityNotes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Prompts adapted for one target engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnginePacket {
    pub engine: String,
    pub status: PacketStatus,
    pub optimized_prompts: Vec<OptimizedPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility_notes: Option<CompatibilityNotes>,
}

// =============================================================================
// MASTER SCRIPT
// =============================================================================

/// Traceability header of a compiled script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMeta {
    pub trace_id: String,
    pub input_snapshot_hash: String,
    pub created_at: i64,
    pub format_ratio: AspectRatio,
    /// Sum of clip durations.
    pub total_duration_sec: u32,
    pub intent: String,
}

/// Rules shared by every clip of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRules {
    pub language: String,
    pub negatives_global: String,
    pub constraints: Vec<String>,
}

/// The compiled editing script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditScriptMaster {
    pub meta: ScriptMeta,
    pub rules: ScriptRules,
    pub timeline: Vec<TimelineClip>,
    pub engine_packets: Vec<EnginePacket>,
}

impl EditScriptMaster {
    /// Pretty JSON for display, clipboard or file export.
    pub fn to_json_pretty(&self) -> MoviolaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the number of clips.
    pub fn clip_count(&self) -> usize {
        self.timeline.len()
    }

    /// Finds a packet by engine name (case-insensitive).
    pub fn packet(&self, engine: &str) -> Option<&EnginePacket> {
        self.engine_packets
            .iter()
            .find(|p| p.engine.eq_ignore_ascii_case(engine.trim()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_builder() {
        let input = CompilerInput::new("trace-1", 1_700_000_000_000)
            .with_analysis_context("Mercado al amanecer")
            .with_narrative("El mercado despierta.")
            .with_cultural_element("rebozo")
            .with_cultural_element("café de olla")
            .with_moviola(MoviolaRequest::new("Sora", 12.0).with_intent("Teaser"));

        assert_eq!(input.trace_id, "trace-1");
        assert_eq!(input.cultural_elements, vec!["rebozo", "café de olla"]);
        assert_eq!(input.moviola.engine, "Sora");
        assert_eq!(input.moviola.intent, "Teaser");
    }

    #[test]
    fn test_input_from_json_defaults() {
        let input = CompilerInput::from_json(
            r#"{
                "traceId": "abc",
                "createdAt": 42,
                "narrativeText": "Hola",
                "revealSettings": {
                    "aspectRatio": "16:9",
                    "fidelity": "LOCK_A",
                    "lens": "85mm",
                    "lighting": "studio",
                    "filmStyle": "editorial",
                    "referenceWeight": 80
                },
                "moviola": { "engine": "Veo" }
            }"#,
        )
        .unwrap();

        assert_eq!(input.narrative_text, "Hola");
        assert!(input.cultural_elements.is_empty());
        assert_eq!(input.moviola.duration_sec, DEFAULT_DURATION_SEC);
        assert!(!input.reveal_settings.watermark.enabled);
    }

    #[test]
    fn test_input_from_json_rejects_bad_enum() {
        let result = CompilerInput::from_json(
            r#"{ "traceId": "abc", "createdAt": 1, "revealSettings": { "aspectRatio": "7:5" } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_timecode_wire_names() {
        let tc = Timecode {
            in_point: "00:00".to_string(),
            out_point: "00:04".to_string(),
            duration_sec: 4,
        };
        let json = serde_json::to_value(&tc).unwrap();
        assert_eq!(json["in"], "00:00");
        assert_eq!(json["out"], "00:04");
        assert_eq!(json["durationSec"], 4);
    }

    #[test]
    fn test_packet_status_wire_names() {
        assert_eq!(serde_json::to_string(&PacketStatus::Ready).unwrap(), "\"READY\"");
        assert_eq!(serde_json::to_string(&PacketStatus::Warning).unwrap(), "\"WARNING\"");
        assert_eq!(
            serde_json::to_string(&PacketStatus::Unsupported).unwrap(),
            "\"UNSUPPORTED\""
        );
    }

    #[test]
    fn test_new_trace_id_is_unique() {
        let a = new_trace_id();
        let b = new_trace_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
