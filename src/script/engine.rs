//! Per-engine prompt adaptation.
//!
//! Engines are matched by case-insensitive substring against a flat profile
//! table; the first match wins. Adding an engine means adding a row.
//!
//! The compatibility check is a heuristic only. It encodes known preferences
//! of the engines and is not negotiated with them.

use super::model::{
    CompatibilityNotes, EnginePacket, OptimizedPrompt, PacketStatus, TimelineClip,
};
use super::settings::AspectRatio;

/// Stylistic adaptation for one family of engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    /// Lowercase substring matched against the engine name.
    pub key: &'static str,
    pub suffix: &'static str,
    /// Native output is widescreen; vertical crops lose detail.
    pub prefers_widescreen: bool,
}

/// Known engine families, checked in order.
pub const ENGINE_PROFILES: &[EngineProfile] = &[
    EngineProfile {
        key: "veo",
        suffix: "cinematic camera movement, smooth motion, coherent scene, HDR, high fidelity, stable 24fps look",
        prefers_widescreen: true,
    },
    EngineProfile {
        key: "sora",
        suffix: "physics-consistent, detailed material behavior, natural dynamics, complex interactions, photorealistic",
        prefers_widescreen: false,
    },
    EngineProfile {
        key: "wan",
        suffix: "movement-forward, dynamic camera move emphasized, strong contrast, dramatic lighting",
        prefers_widescreen: false,
    },
];

/// Suffix for engines without a profile.
pub const GENERIC_SUFFIX: &str = "high quality video, 4k";

/// Looks up the profile for an engine name.
pub fn find_profile(engine: &str) -> Option<&'static EngineProfile> {
    let name = engine.trim().to_lowercase();
    ENGINE_PROFILES.iter().find(|p| name.contains(p.key))
}

/// Suffix appended to every clip prompt for this engine and ratio.
pub fn engine_suffix(engine: &str, ratio: AspectRatio) -> String {
    let mut suffix = find_profile(engine)
        .map(|p| p.suffix)
        .unwrap_or(GENERIC_SUFFIX)
        .to_string();
    if let Some(keywords) = ratio.composition_keywords() {
        suffix.push_str(", ");
        suffix.push_str(keywords);
    }
    suffix
}

/// Adapts every clip prompt for one engine. Output order and ids follow the timeline.
pub fn adapt_for_engine(timeline: &[TimelineClip], engine: &str, ratio: AspectRatio) -> EnginePacket {
    let suffix = engine_suffix(engine, ratio);
    let optimized_prompts = timeline
        .iter()
        .map(|clip| OptimizedPrompt {
            clip_id: clip.id.clone(),
            prompt: format!("{} {}", clip.gen_prompt_base.trim_end(), suffix),
        })
        .collect();

    let (status, notes) = assess_compatibility(engine, ratio);
    EnginePacket {
        engine: engine.trim().to_string(),
        status,
        optimized_prompts,
        compatibility_notes: Some(notes),
    }
}

fn assess_compatibility(engine: &str, ratio: AspectRatio) -> (PacketStatus, CompatibilityNotes) {
    if engine.trim().is_empty() {
        return (
            PacketStatus::Unknown,
            CompatibilityNotes {
                ratio_supported: None,
                notes: Some("No engine named; generic adaptation applied.".to_string()),
            },
        );
    }
    match find_profile(engine) {
        None => (
            PacketStatus::Ready,
            CompatibilityNotes {
                ratio_supported: None,
                notes: Some(format!(
                    "No adaptation profile for engine '{}'; generic adaptation applied.",
                    engine.trim()
                )),
            },
        ),
        Some(p) if p.prefers_widescreen && ratio.is_vertical() => (
            PacketStatus::Warning,
            CompatibilityNotes {
                ratio_supported: Some(false),
                notes: Some(format!(
                    "Heuristic: {} native models perform best in 16:9. A {} vertical crop may lose essential details.",
                    engine.trim(),
                    ratio
                )),
            },
        ),
        Some(_) => (
            PacketStatus::Ready,
            CompatibilityNotes {
                ratio_supported: Some(true),
                notes: Some("Optimal configuration.".to_string()),
            },
        ),
    }
}
