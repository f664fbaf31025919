//! Request file accepted by the CLI.
//!
//! Same camelCase shape as `CompilerInput`, except that `traceId` and
//! `createdAt` may be omitted; they are filled in at conversion time.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use moviola::script::new_trace_id;
use moviola::{CompilerInput, MoviolaRequest, RevealSettings};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRequest {
    pub trace_id: Option<String>,
    pub created_at: Option<i64>,

    #[serde(default)]
    pub analysis_context: String,
    #[serde(default)]
    pub narrative_text: String,
    #[serde(default)]
    pub cultural_elements: Vec<String>,
    #[serde(default)]
    pub compiled_visual_prompt: String,
    #[serde(default)]
    pub reveal_settings: RevealSettings,
    #[serde(default)]
    pub moviola: MoviolaRequest,
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl From<InputRequest> for CompilerInput {
    fn from(req: InputRequest) -> Self {
        let trace_id = req
            .trace_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_trace_id);

        CompilerInput {
            trace_id,
            created_at: req.created_at.unwrap_or_else(now_millis),
            analysis_context: req.analysis_context,
            narrative_text: req.narrative_text,
            cultural_elements: req.cultural_elements,
            compiled_visual_prompt: req.compiled_visual_prompt,
            reveal_settings: req.reveal_settings,
            moviola: req.moviola,
        }
    }
}
