//! Clip timeline construction.
//!
//! Shot type and camera move depend only on the clip index:
//!
//! | index       | shot type                                    |
//! |-------------|----------------------------------------------|
//! | 0           | Wide Establishing Shot                       |
//! | i >= 1      | Medium Shot, Close Up, Macro Detail, repeat  |
//!
//! Camera moves cycle Slow Pan, Tracking Shot, Slow Push In, Static Hold.
//!
//! `genPromptBase` sections, in order, each omitted when empty: `Scene:`,
//! `Cultural context:`, `Intent:`, `Shot:`, `Action:`, `Visual reference:`,
//! `Technical:`, `Exclude:`.

use super::model::{
    CameraMove, ClipAudio, ClipVisuals, CompilerInput, ShotType, Timecode, TimelineClip,
};
use super::segment::{normalize_whitespace, Segment};

/// Longest clip description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 150;

/// Longest scene summary taken from the analysis context, in characters.
pub const MAX_SCENE_CHARS: usize = 220;

const FOLLOW_SHOTS: [ShotType; 3] = [ShotType::Medium, ShotType::CloseUp, ShotType::MacroDetail];

const CAMERA_MOVES: [CameraMove; 4] = [
    CameraMove::SlowPan,
    CameraMove::Tracking,
    CameraMove::SlowPushIn,
    CameraMove::StaticHold,
];

const ESTABLISHING_BEAT: &str = "Establishing scene, slow reveal of the setting";

/// Shot type for the clip at `index` (0-based).
pub fn shot_type_for(index: usize) -> ShotType {
    match index {
        0 => ShotType::WideEstablishing,
        i => FOLLOW_SHOTS[(i - 1) % FOLLOW_SHOTS.len()],
    }
}

/// Camera move for the clip at `index` (0-based).
pub fn camera_move_for(index: usize) -> CameraMove {
    CAMERA_MOVES[index % CAMERA_MOVES.len()]
}

/// `MM:SS`. Minutes keep counting past 59.
pub fn format_timecode(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Truncates to `max_chars` characters, appending `…` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Builds one clip per segment, contiguous from `00:00`.
pub fn build_timeline(segments: &[Segment], input: &CompilerInput) -> Vec<TimelineClip> {
    let shared = SharedPromptParts::from_input(input);
    let focus = input.reveal_settings.fidelity.focus_note().to_string();

    let mut cursor = 0u32;
    segments
        .iter()
        .enumerate()
        .map(|(idx, seg)| {
            let shot_type = shot_type_for(idx);
            let camera_move = camera_move_for(idx);
            let beat = normalize_whitespace(&seg.text);

            let timecode = Timecode {
                in_point: format_timecode(cursor),
                out_point: format_timecode(cursor + seg.duration_sec),
                duration_sec: seg.duration_sec,
            };
            cursor += seg.duration_sec;

            let description = if beat.is_empty() {
                "Establishing scene".to_string()
            } else {
                truncate_chars(&beat, MAX_DESCRIPTION_CHARS)
            };

            TimelineClip {
                id: format!("clip_{:02}", idx + 1),
                timecode,
                visuals: ClipVisuals {
                    shot_type,
                    camera_move,
                    description,
                    focus: Some(focus.clone()),
                },
                audio: ClipAudio {
                    voiceover: (!beat.is_empty()).then(|| beat.clone()),
                    sfx: Some("Ambience match".to_string()),
                    music: Some("Subtle underscore".to_string()),
                },
                gen_prompt_base: shared.prompt_for(shot_type, camera_move, &beat),
            }
        })
        .collect()
}

/// Prompt sections that are identical for every clip.
struct SharedPromptParts {
    scene: Option<String>,
    culture: Option<String>,
    intent: Option<String>,
    visuals: Option<String>,
    technical: String,
    exclude: Option<String>,
}

impl SharedPromptParts {
    fn from_input(input: &CompilerInput) -> Self {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);

        let scene = non_empty(truncate_chars(
            &normalize_whitespace(&input.analysis_context),
            MAX_SCENE_CHARS,
        ))
        .map(|s| format!("Scene: {}.", s.trim_end_matches('.')));

        let elements: Vec<String> = input
            .cultural_elements
            .iter()
            .map(|e| normalize_whitespace(e))
            .filter(|e| !e.is_empty())
            .collect();
        let culture = (!elements.is_empty())
            .then(|| format!("Cultural context: {}.", elements.join(", ")));

        let intent = non_empty(normalize_whitespace(&input.moviola.intent))
            .map(|s| format!("Intent: {}.", s.trim_end_matches('.')));

        let visuals = non_empty(normalize_whitespace(&input.compiled_visual_prompt))
            .map(|s| format!("Visual reference: {}", s));

        let technical = format!("Technical: {}.", input.reveal_settings.technical_line());

        let exclude = non_empty(normalize_whitespace(&input.reveal_settings.negative_prompt))
            .map(|s| format!("Exclude: {}.", s.trim_end_matches('.')));

        Self {
            scene,
            culture,
            intent,
            visuals,
            technical,
            exclude,
        }
    }

    fn prompt_for(&self, shot: ShotType, camera: CameraMove, beat: &str) -> String {
        let shot_line = format!("Shot: {}, {}.", shot.label(), camera.label());
        let action = if beat.is_empty() {
            format!("Action: {}.", ESTABLISHING_BEAT)
        } else if beat.ends_with(['.', '!', '?', '…']) {
            format!("Action: {}", beat)
        } else {
            format!("Action: {}.", beat)
        };

        let parts = [
            self.scene.as_deref(),
            self.culture.as_deref(),
            self.intent.as_deref(),
            Some(shot_line.as_str()),
            Some(action.as_str()),
            self.visuals.as_deref(),
            Some(self.technical.as_str()),
            self.exclude.as_deref(),
        ];
        normalize_whitespace(&parts.into_iter().flatten().collect::<Vec<_>>().join(" "))
    }
}

// =============================================================================
// TESTS
// =============================================================================
