//! Reveal settings snapshot and the phrasing tables that turn it into prompt text.
//!
//! Every enumerated setting is a closed enum with an exhaustive mapping to its
//! natural-language clause, so adding a variant forces a review of its wording.
//! Lens and lighting stay free-form ids: known ids map through a table and
//! unknown ids get a generic phrase.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MoviolaError, MoviolaResult};

// =============================================================================
// ASPECT RATIO
// =============================================================================

/// Output frame ratio supported by the reveal step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Ratio1x1,
    #[serde(rename = "16:9")]
    Ratio16x9,
    #[serde(rename = "9:16")]
    Ratio9x16,
    #[serde(rename = "4:3")]
    Ratio4x3,
    #[serde(rename = "3:4")]
    Ratio3x4,
    #[serde(rename = "21:9")]
    Ratio21x9,
    #[serde(rename = "4:5")]
    Ratio4x5,
    #[serde(rename = "2:3")]
    Ratio2x3,
    #[serde(rename = "3:2")]
    Ratio3x2,
    #[serde(rename = "5:4")]
    Ratio5x4,
}

impl AspectRatio {
    /// All ratios in UI order.
    pub const ALL: [AspectRatio; 10] = [
        AspectRatio::Ratio1x1,
        AspectRatio::Ratio16x9,
        AspectRatio::Ratio9x16,
        AspectRatio::Ratio4x3,
        AspectRatio::Ratio3x4,
        AspectRatio::Ratio21x9,
        AspectRatio::Ratio4x5,
        AspectRatio::Ratio2x3,
        AspectRatio::Ratio3x2,
        AspectRatio::Ratio5x4,
    ];

    /// Wire string, e.g. `"16:9"`.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Ratio1x1 => "1:1",
            AspectRatio::Ratio16x9 => "16:9",
            AspectRatio::Ratio9x16 => "9:16",
            AspectRatio::Ratio4x3 => "4:3",
            AspectRatio::Ratio3x4 => "3:4",
            AspectRatio::Ratio21x9 => "21:9",
            AspectRatio::Ratio4x5 => "4:5",
            AspectRatio::Ratio2x3 => "2:3",
            AspectRatio::Ratio3x2 => "3:2",
            AspectRatio::Ratio5x4 => "5:4",
        }
    }

    /// Width and height units.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            AspectRatio::Ratio1x1 => (1, 1),
            AspectRatio::Ratio16x9 => (16, 9),
            AspectRatio::Ratio9x16 => (9, 16),
            AspectRatio::Ratio4x3 => (4, 3),
            AspectRatio::Ratio3x4 => (3, 4),
            AspectRatio::Ratio21x9 => (21, 9),
            AspectRatio::Ratio4x5 => (4, 5),
            AspectRatio::Ratio2x3 => (2, 3),
            AspectRatio::Ratio3x2 => (3, 2),
            AspectRatio::Ratio5x4 => (5, 4),
        }
    }

    /// Taller than wide.
    pub fn is_vertical(self) -> bool {
        let (w, h) = self.dimensions();
        w < h
    }

    /// Composition keywords for ratios that need explicit steering.
    pub fn composition_keywords(self) -> Option<&'static str> {
        match self {
            AspectRatio::Ratio21x9 => Some("ultrawide anamorphic format, movie bars"),
            AspectRatio::Ratio9x16 => Some("vertical video composition, social media frame"),
            AspectRatio::Ratio4x5 => Some("tall portrait framing, subject centered for feed crop"),
            AspectRatio::Ratio1x1 => Some("square composition, album cover style"),
            AspectRatio::Ratio16x9
            | AspectRatio::Ratio4x3
            | AspectRatio::Ratio3x4
            | AspectRatio::Ratio2x3
            | AspectRatio::Ratio3x2
            | AspectRatio::Ratio5x4 => None,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = MoviolaError;

    fn from_str(s: &str) -> MoviolaResult<Self> {
        let trimmed = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|r| r.as_str() == trimmed)
            .ok_or_else(|| MoviolaError::invalid_input(format!("unknown aspect ratio '{}'", s)))
    }
}

// =============================================================================
// FIDELITY LOCK
// =============================================================================

/// How strictly downstream generation must preserve the reference subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FidelityLock {
    /// Identity twin: preserve face/body identity.
    #[serde(rename = "LOCK_A")]
    LockA,
    /// Narrative: keep the character consistent with the story.
    #[default]
    #[serde(rename = "LOCK_B")]
    LockB,
    /// Atmosphere: mood and palette over identity.
    #[serde(rename = "LOCK_C")]
    LockC,
}

impl FidelityLock {
    /// Prompt clause describing how strictly identity is preserved.
    pub fn instruction(self) -> &'static str {
        match self {
            FidelityLock::LockA => {
                "identity lock: preserve face/body identity if present, minimal deviation"
            }
            FidelityLock::LockB => "narrative lock: keep character consistent and story-coherent",
            FidelityLock::LockC => {
                "atmosphere lock: match mood, palette, lighting, ignore strict identity"
            }
        }
    }

    /// Focus hint attached to every clip's visuals.
    pub fn focus_note(self) -> &'static str {
        match self {
            FidelityLock::LockA => "Sharp focus on subject",
            FidelityLock::LockB => "Subject-led focus, consistent character",
            FidelityLock::LockC => "Soft focus, atmosphere first",
        }
    }
}

// =============================================================================
// FILM STYLE
// =============================================================================

/// Look of the generated frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilmStyle {
    #[default]
    Raw,
    Documentary,
    Editorial,
    Cinematic,
    Studio,
    PortraitSkin,
    Hyperreal,
    Analog,
    Cyber,
    Oil,
    Sketch,
    Watercolor,
}

impl FilmStyle {
    /// Prompt phrase for the style.
    pub fn prompt(self) -> &'static str {
        match self {
            FilmStyle::Raw => {
                "photorealistic raw photo, detailed texture, natural skin texture, no beauty filter"
            }
            FilmStyle::Documentary => {
                "documentary realism, candid moment, honest imperfection, natural grain"
            }
            FilmStyle::Editorial => {
                "editorial photography, clean composition, premium detail, magazine look"
            }
            FilmStyle::Cinematic => {
                "cinematic frame, filmic contrast, subtle halation, narrative lighting"
            }
            FilmStyle::Studio => {
                "high-end studio photo, crisp detail, controlled highlights, clean background separation"
            }
            FilmStyle::PortraitSkin => {
                "portrait with natural skin texture, pores visible, realistic specular highlights"
            }
            FilmStyle::Hyperreal => {
                "hyperreal detail, micro-texture, realistic materials, high fidelity"
            }
            FilmStyle::Analog => {
                "analog film look, film grain, slight vignette, nostalgic color science"
            }
            FilmStyle::Cyber => {
                "cyber cinematic realism, neon accents, metallic textures, controlled glow"
            }
            FilmStyle::Oil => {
                "oil painting style, impasto brushstrokes, painterly texture, classical composition"
            }
            FilmStyle::Sketch => {
                "sketch illustration, pencil lines, cross-hatching, paper texture"
            }
            FilmStyle::Watercolor => {
                "watercolor illustration, soft washes, pigment bleed, paper texture"
            }
        }
    }
}

// =============================================================================
// WATERMARK
// =============================================================================

/// Corner or center where the watermark should sit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
    Center,
}

impl WatermarkPosition {
    /// Placement wording used in the composition note.
    pub fn phrase(self) -> &'static str {
        match self {
            WatermarkPosition::TopLeft => "top-left",
            WatermarkPosition::TopRight => "top-right",
            WatermarkPosition::BottomLeft => "bottom-left",
            WatermarkPosition::BottomRight => "bottom-right",
            WatermarkPosition::Center => "center",
        }
    }
}

/// Default watermark text used by the reveal panel.
pub const DEFAULT_WATERMARK_TEXT: &str = "Focus Guerrero";

/// Watermark request. Only ever emitted as a best-effort composition note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkConfig {
    pub enabled: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub position: WatermarkPosition,
    /// Percent, 0-100.
    #[serde(default)]
    pub opacity: f64,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            text: DEFAULT_WATERMARK_TEXT.to_string(),
            position: WatermarkPosition::BottomRight,
            opacity: 18.0,
        }
    }
}

impl WatermarkConfig {
    /// Creates an enabled watermark.
    pub fn new(text: impl Into<String>, position: WatermarkPosition, opacity: f64) -> Self {
        Self {
            enabled: true,
            text: text.into(),
            position,
            opacity,
        }
    }

    /// Creates a disabled watermark.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Composition note, or `None` when disabled or the text is blank.
    pub fn instruction(&self) -> Option<String> {
        let text = self.text.trim();
        if !self.enabled || text.is_empty() {
            return None;
        }
        Some(format!(
            "Composition note: include a subtle watermark text \"{}\" at {}, approx {}% opacity (best-effort)",
            text,
            self.position.phrase(),
            clamp_percent(self.opacity, 0, "watermark.opacity")
        ))
    }
}

// =============================================================================
// USAGE TEMPLATE
// =============================================================================

/// Destination the reveal is composed for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UsageTemplate {
    #[default]
    None,
    News,
    SocialOrganic,
    Poster,
    Thumbnail,
    Catalog,
    Archive,
    Cinema,
}

/// Settings a usage template applies in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplatePreset {
    pub aspect_ratio: AspectRatio,
    pub lens: &'static str,
    pub lighting: &'static str,
    pub film_style: FilmStyle,
    pub fidelity: FidelityLock,
    pub reference_weight: f64,
    pub watermark_enabled: bool,
    pub watermark_position: WatermarkPosition,
    pub watermark_opacity: f64,
}

impl UsageTemplate {
    /// Wire name, e.g. `social_organic`.
    pub fn as_str(self) -> &'static str {
        match self {
            UsageTemplate::None => "none",
            UsageTemplate::News => "news",
            UsageTemplate::SocialOrganic => "social_organic",
            UsageTemplate::Poster => "poster",
            UsageTemplate::Thumbnail => "thumbnail",
            UsageTemplate::Catalog => "catalog",
            UsageTemplate::Archive => "archive",
            UsageTemplate::Cinema => "cinema",
        }
    }

    /// Prompt note, `None` for [`UsageTemplate::None`].
    pub fn note(self) -> Option<String> {
        match self {
            UsageTemplate::None => None,
            other => Some(format!(
                "Usage template: {} (optimize composition for this destination)",
                other.as_str()
            )),
        }
    }

    /// Preset values for this template. `Cinema` has no preset and leaves settings as they are.
    pub fn preset(self) -> Option<TemplatePreset> {
        let preset = match self {
            UsageTemplate::None => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio1x1,
                lens: "35mm",
                lighting: "natural",
                film_style: FilmStyle::Raw,
                fidelity: FidelityLock::LockB,
                reference_weight: 50.0,
                watermark_enabled: false,
                watermark_position: WatermarkPosition::BottomRight,
                watermark_opacity: 20.0,
            },
            UsageTemplate::News => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio16x9,
                lens: "35mm",
                lighting: "overcast",
                film_style: FilmStyle::Documentary,
                fidelity: FidelityLock::LockB,
                reference_weight: 70.0,
                watermark_enabled: true,
                watermark_position: WatermarkPosition::BottomRight,
                watermark_opacity: 18.0,
            },
            UsageTemplate::SocialOrganic => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio9x16,
                lens: "35mm",
                lighting: "natural",
                film_style: FilmStyle::Cinematic,
                fidelity: FidelityLock::LockB,
                reference_weight: 55.0,
                watermark_enabled: true,
                watermark_position: WatermarkPosition::TopRight,
                watermark_opacity: 14.0,
            },
            UsageTemplate::Poster => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio3x4,
                lens: "24mm",
                lighting: "studio",
                film_style: FilmStyle::Editorial,
                fidelity: FidelityLock::LockC,
                reference_weight: 40.0,
                watermark_enabled: true,
                watermark_position: WatermarkPosition::BottomLeft,
                watermark_opacity: 16.0,
            },
            UsageTemplate::Thumbnail => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio16x9,
                lens: "24mm",
                lighting: "studio",
                film_style: FilmStyle::Hyperreal,
                fidelity: FidelityLock::LockC,
                reference_weight: 35.0,
                watermark_enabled: true,
                watermark_position: WatermarkPosition::TopLeft,
                watermark_opacity: 20.0,
            },
            UsageTemplate::Catalog => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio4x5,
                lens: "85mm",
                lighting: "studio",
                film_style: FilmStyle::Studio,
                fidelity: FidelityLock::LockA,
                reference_weight: 80.0,
                watermark_enabled: true,
                watermark_position: WatermarkPosition::BottomRight,
                watermark_opacity: 12.0,
            },
            UsageTemplate::Archive => TemplatePreset {
                aspect_ratio: AspectRatio::Ratio3x2,
                lens: "35mm",
                lighting: "natural",
                film_style: FilmStyle::Documentary,
                fidelity: FidelityLock::LockB,
                reference_weight: 75.0,
                watermark_enabled: false,
                watermark_position: WatermarkPosition::BottomRight,
                watermark_opacity: 15.0,
            },
            UsageTemplate::Cinema => return None,
        };
        Some(preset)
    }
}

// =============================================================================
// LENS / LIGHTING TABLES
// =============================================================================

const LENSES: &[(&str, &str)] = &[
    ("24mm", "shot on 24mm wide angle lens, environmental context, expansive background"),
    ("35mm", "shot on 35mm lens, natural perspective, documentary street photography"),
    ("85mm", "shot on 85mm portrait lens, shallow depth of field, creamy bokeh, subject isolation"),
];

const LIGHTING: &[(&str, &str)] = &[
    ("natural", "soft natural lighting, warm tones, realistic shadows"),
    ("studio", "controlled studio lighting, rim light, high contrast, clean highlights"),
    ("neon", "cinematic neon lighting, night atmosphere, colored practical lights, subtle haze"),
    ("overcast", "overcast diffuse lighting, soft shadows, misty atmosphere"),
];

/// Prompt phrase for a lens id; unknown ids become `shot on {id} lens`.
pub fn lens_prompt(lens: &str) -> String {
    let lens = lens.trim();
    LENSES
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(lens))
        .map(|(_, prompt)| prompt.to_string())
        .unwrap_or_else(|| format!("shot on {} lens", lens))
}

/// Prompt phrase for a lighting id; unknown ids become `lighting: {id}`.
pub fn lighting_prompt(lighting: &str) -> String {
    let lighting = lighting.trim();
    LIGHTING
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(lighting))
        .map(|(_, prompt)| prompt.to_string())
        .unwrap_or_else(|| format!("lighting: {}", lighting))
}

// =============================================================================
// REFERENCE WEIGHT
// =============================================================================

/// Reference-adherence clause: >= 80 very strong, <= 20 loose, otherwise balanced.
pub fn reference_weight_clause(weight: f64) -> &'static str {
    let n = clamp_percent(weight, 50, "referenceWeight");
    if n >= 80 {
        "Reference influence: very strong (minimal deviation)"
    } else if n <= 20 {
        "Reference influence: loose (inspiration only)"
    } else {
        "Reference influence: balanced"
    }
}

/// Rounds to a whole percent in `0..=100`; non-finite values take `fallback`.
pub(crate) fn clamp_percent(value: f64, fallback: u8, field: &str) -> u8 {
    if !value.is_finite() {
        warn!(field, "non-finite percentage, using {}", fallback);
        return fallback;
    }
    let rounded = value.round();
    if !(0.0..=100.0).contains(&rounded) {
        warn!(field, value, "percentage out of range, clamping");
    }
    rounded.clamp(0.0, 100.0) as u8
}

// =============================================================================
// REVEAL SETTINGS SNAPSHOT
// =============================================================================

/// Immutable snapshot of the reveal panel at the moment a script is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevealSettings {
    pub aspect_ratio: AspectRatio,
    pub fidelity: FidelityLock,
    pub lens: String,
    pub lighting: String,
    pub film_style: FilmStyle,
    #[serde(default)]
    pub template_preset: UsageTemplate,
    /// Percent, 0-100.
    pub reference_weight: f64,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default)]
    pub watermark: WatermarkConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_override: Option<String>,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Ratio1x1,
            fidelity: FidelityLock::LockB,
            lens: "35mm".to_string(),
            lighting: "natural".to_string(),
            film_style: FilmStyle::Raw,
            template_preset: UsageTemplate::None,
            reference_weight: 50.0,
            negative_prompt: String::new(),
            watermark: WatermarkConfig::default(),
            manual_override: None,
        }
    }
}

impl RevealSettings {
    /// Creates the panel's default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates settings from a usage template preset.
    pub fn from_template(template: UsageTemplate) -> Self {
        Self::default().apply_template(template)
    }

    /// Applies a template preset. The watermark text is kept unless it is blank.
    pub fn apply_template(mut self, template: UsageTemplate) -> Self {
        self.template_preset = template;
        if let Some(p) = template.preset() {
            self.aspect_ratio = p.aspect_ratio;
            self.lens = p.lens.to_string();
            self.lighting = p.lighting.to_string();
            self.film_style = p.film_style;
            self.fidelity = p.fidelity;
            self.reference_weight = p.reference_weight;
            self.watermark.enabled = p.watermark_enabled;
            self.watermark.position = p.watermark_position;
            self.watermark.opacity = p.watermark_opacity;
            if self.watermark.text.trim().is_empty() {
                self.watermark.text = DEFAULT_WATERMARK_TEXT.to_string();
            }
        }
        self
    }

    /// Builder: Set aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Builder: Set fidelity lock.
    pub fn with_fidelity(mut self, fidelity: FidelityLock) -> Self {
        self.fidelity = fidelity;
        self
    }

    /// Builder: Set lens id.
    pub fn with_lens(mut self, lens: impl Into<String>) -> Self {
        self.lens = lens.into();
        self
    }

    /// Builder: Set lighting id.
    pub fn with_lighting(mut self, lighting: impl Into<String>) -> Self {
        self.lighting = lighting.into();
        self
    }

    /// Builder: Set film style.
    pub fn with_film_style(mut self, style: FilmStyle) -> Self {
        self.film_style = style;
        self
    }

    /// Builder: Set reference weight.
    pub fn with_reference_weight(mut self, weight: f64) -> Self {
        self.reference_weight = weight;
        self
    }

    /// Builder: Set negative prompt.
    pub fn with_negative_prompt(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = negative.into();
        self
    }

    /// Builder: Set watermark.
    pub fn with_watermark(mut self, watermark: WatermarkConfig) -> Self {
        self.watermark = watermark;
        self
    }

    /// Builder: Set manual override.
    pub fn with_manual_override(mut self, text: impl Into<String>) -> Self {
        self.manual_override = Some(text.into());
        self
    }

    /// Manual override text, if present and not blank.
    pub fn manual_override_text(&self) -> Option<&str> {
        self.manual_override
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// One-line technical description of the settings, clauses separated by `; `.
    pub fn technical_line(&self) -> String {
        let mut parts = vec![
            lens_prompt(&self.lens),
            lighting_prompt(&self.lighting),
            self.film_style.prompt().to_string(),
            format!("target aspect ratio {}", self.aspect_ratio),
            self.fidelity.instruction().to_string(),
            reference_weight_clause(self.reference_weight).to_string(),
        ];
        if let Some(note) = self.template_preset.note() {
            parts.push(note);
        }
        if let Some(wm) = self.watermark.instruction() {
            parts.push(wm);
        }
        if let Some(manual) = self.manual_override_text() {
            parts.push(format!("Manual override (user): {}", manual));
        }
        parts.join("; ")
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_wire_strings() {
        for ratio in AspectRatio::ALL {
            let json = serde_json::to_string(&ratio).unwrap();
            assert_eq!(json, format!("\"{}\"", ratio.as_str()));
            assert_eq!(ratio.as_str().parse::<AspectRatio>().unwrap(), ratio);
        }
        assert!("7:3".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn test_vertical_ratios() {
        let vertical: Vec<_> = AspectRatio::ALL
            .into_iter()
            .filter(|r| r.is_vertical())
            .map(|r| r.as_str())
            .collect();
        assert_eq!(vertical, vec!["9:16", "3:4", "4:5", "2:3"]);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&FidelityLock::LockA).unwrap(), "\"LOCK_A\"");
        assert_eq!(
            serde_json::to_string(&FilmStyle::PortraitSkin).unwrap(),
            "\"portrait_skin\""
        );
        assert_eq!(
            serde_json::to_string(&WatermarkPosition::BottomRight).unwrap(),
            "\"bottom_right\""
        );
        assert_eq!(
            serde_json::to_string(&UsageTemplate::SocialOrganic).unwrap(),
            "\"social_organic\""
        );
    }

    #[test]
    fn test_reference_weight_clause() {
        assert!(reference_weight_clause(80.0).contains("very strong"));
        assert!(reference_weight_clause(100.0).contains("minimal deviation"));
        assert!(reference_weight_clause(20.0).contains("loose"));
        assert!(reference_weight_clause(0.0).contains("inspiration only"));
        assert!(reference_weight_clause(50.0).contains("balanced"));
        assert!(reference_weight_clause(79.4).contains("balanced"));
        assert!(reference_weight_clause(150.0).contains("very strong"));
        assert!(reference_weight_clause(f64::NAN).contains("balanced"));
    }

    #[test]
    fn test_watermark_instruction() {
        let wm = WatermarkConfig::new("Focus Guerrero", WatermarkPosition::BottomRight, 18.0);
        let text = wm.instruction().unwrap();
        assert!(text.contains("\"Focus Guerrero\""));
        assert!(text.contains("bottom-right"));
        assert!(text.contains("18% opacity"));

        assert!(WatermarkConfig::disabled().instruction().is_none());
        let blank = WatermarkConfig::new("   ", WatermarkPosition::Center, 50.0);
        assert!(blank.instruction().is_none());
    }

    #[test]
    fn test_lens_and_lighting_fallbacks() {
        assert!(lens_prompt("85mm").contains("creamy bokeh"));
        assert_eq!(lens_prompt("50mm"), "shot on 50mm lens");
        assert!(lighting_prompt("Neon").contains("night atmosphere"));
        assert_eq!(lighting_prompt("candle"), "lighting: candle");
    }

    #[test]
    fn test_template_presets() {
        let settings = RevealSettings::from_template(UsageTemplate::Catalog);
        assert_eq!(settings.aspect_ratio, AspectRatio::Ratio4x5);
        assert_eq!(settings.fidelity, FidelityLock::LockA);
        assert_eq!(settings.lens, "85mm");
        assert!(settings.watermark.enabled);
        assert_eq!(settings.watermark.text, DEFAULT_WATERMARK_TEXT);

        let custom = RevealSettings::new()
            .with_watermark(WatermarkConfig {
                enabled: false,
                text: "Mi marca".to_string(),
                ..WatermarkConfig::default()
            })
            .apply_template(UsageTemplate::News);
        assert!(custom.watermark.enabled);
        assert_eq!(custom.watermark.text, "Mi marca");
        assert_eq!(custom.template_preset, UsageTemplate::News);

        let cinema = RevealSettings::new()
            .with_lens("50mm")
            .apply_template(UsageTemplate::Cinema);
        assert_eq!(cinema.lens, "50mm");
        assert_eq!(cinema.template_preset, UsageTemplate::Cinema);
    }

    #[test]
    fn test_technical_line_omits_unset_parts() {
        let line = RevealSettings::new().technical_line();
        assert!(line.contains("target aspect ratio 1:1"));
        assert!(line.contains("narrative lock"));
        assert!(!line.contains("Usage template"));
        assert!(!line.contains("watermark"));
        assert!(!line.contains("Manual override"));

        let line = RevealSettings::from_template(UsageTemplate::Poster)
            .with_manual_override("  keep the rebozo visible ")
            .technical_line();
        assert!(line.contains("Usage template: poster"));
        assert!(line.contains("bottom-left"));
        assert!(line.contains("Manual override (user): keep the rebozo visible"));
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::json!({
            "aspectRatio": "9:16",
            "fidelity": "LOCK_C",
            "lens": "24mm",
            "lighting": "neon",
            "filmStyle": "cyber",
            "templatePreset": "social_organic",
            "referenceWeight": 55,
            "negativePrompt": "blur",
            "watermark": { "enabled": true, "text": "X", "position": "top_right", "opacity": 14 }
        });
        let settings: RevealSettings = serde_json::from_value(json).unwrap();
        assert_eq!(settings.aspect_ratio, AspectRatio::Ratio9x16);
        assert_eq!(settings.film_style, FilmStyle::Cyber);
        assert_eq!(settings.watermark.position, WatermarkPosition::TopRight);
        assert!(settings.manual_override.is_none());
    }
}
