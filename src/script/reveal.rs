//! English visual prompt for the reveal step.
//!
//! Produces the multi-line `compiledVisualPrompt` from the same snapshot the
//! script compiler reads, for callers that have no upstream prompt.

use super::model::CompilerInput;
use super::segment::normalize_whitespace;
use super::settings::{lens_prompt, lighting_prompt, reference_weight_clause};
use super::timeline::MAX_SCENE_CHARS;

/// Characters of narrative carried into the prompt.
pub const NARRATIVE_KERNEL_CHARS: usize = 220;

fn head(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Bracketed sections joined by newlines; empty sections are dropped.
pub fn compile_visual_prompt(input: &CompilerInput, has_reference_image: bool) -> String {
    let rs = &input.reveal_settings;
    let scene = head(&normalize_whitespace(&input.analysis_context), MAX_SCENE_CHARS);
    let kernel = head(&normalize_whitespace(&input.narrative_text), NARRATIVE_KERNEL_CHARS);

    let mut lines: Vec<String> = vec!["[SCENE]:".to_string()];
    if scene.is_empty() {
        lines.push("No scene context provided.".to_string());
    } else {
        lines.push(format!("{}.", scene.trim_end_matches('.')));
    }
    if !kernel.is_empty() {
        lines.push(format!("[NARRATIVE KERNEL]: {}...", kernel));
    }

    let elements: Vec<&str> = input
        .cultural_elements
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    if !elements.is_empty() {
        lines.push(format!("[CULTURE]: Cultural context: {}.", elements.join(", ")));
    }
    if let Some(note) = rs.template_preset.note() {
        lines.push(format!("[TEMPLATE]: {}.", note));
    }

    lines.push("[TECH SPECS]:".to_string());
    lines.push(format!(
        "{}; {}; Target aspect ratio: {}.",
        lens_prompt(&rs.lens),
        lighting_prompt(&rs.lighting),
        rs.aspect_ratio
    ));
    lines.push("[STYLE]:".to_string());
    lines.push(format!("{}.", rs.film_style.prompt()));
    lines.push("[FIDELITY]:".to_string());
    lines.push(format!("{}.", rs.fidelity.instruction()));
    lines.push("[REFERENCE WEIGHT]:".to_string());
    lines.push(format!("{}.", reference_weight_clause(rs.reference_weight)));

    if has_reference_image {
        lines.push(
            "[REFERENCE]: Use provided reference image as composition/background guide.".to_string(),
        );
    }
    if let Some(wm) = rs.watermark.instruction() {
        lines.push(format!("[WATERMARK]: {}.", wm));
    }
    if let Some(manual) = rs.manual_override_text() {
        lines.push(format!("[MANUAL]: Manual override (user): {}", manual));
    }
    let negative = rs.negative_prompt.trim();
    if !negative.is_empty() {
        lines.push(format!("[NEGATIVE]: Exclude: {}.", negative));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::settings::{RevealSettings, UsageTemplate};

    #[test]
    fn test_minimal_prompt() {
        let prompt = compile_visual_prompt(&CompilerInput::new("t", 0), false);
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines[0], "[SCENE]:");
        assert_eq!(lines[1], "No scene context provided.");
        assert!(prompt.contains("Target aspect ratio: 1:1."));
        assert!(prompt.contains("[REFERENCE WEIGHT]:\nReference influence: balanced."));
        assert!(!prompt.contains("[NARRATIVE KERNEL]"));
        assert!(!prompt.contains("[REFERENCE]:"));
        assert!(!prompt.contains("[WATERMARK]"));
        assert!(!prompt.contains("[NEGATIVE]"));
    }

    #[test]
    fn test_full_prompt() {
        let input = CompilerInput::new("t", 0)
            .with_analysis_context("Tejedoras en la plaza")
            .with_narrative("Las manos cuentan lo que la voz calla.")
            .with_cultural_element("telar de cintura")
            .with_reveal_settings(
                RevealSettings::from_template(UsageTemplate::News)
                    .with_negative_prompt("logos")
                    .with_manual_override("keep faces visible"),
            );
        let prompt = compile_visual_prompt(&input, true);

        assert!(prompt.contains("Tejedoras en la plaza."));
        assert!(prompt.contains("[NARRATIVE KERNEL]: Las manos cuentan lo que la voz calla...."));
        assert!(prompt.contains("[CULTURE]: Cultural context: telar de cintura."));
        assert!(prompt.contains("[TEMPLATE]: Usage template: news"));
        assert!(prompt.contains("overcast diffuse lighting"));
        assert!(prompt.contains("documentary realism"));
        assert!(prompt.contains("[REFERENCE]:"));
        assert!(prompt.contains("[WATERMARK]: Composition note"));
        assert!(prompt.contains("[MANUAL]: Manual override (user): keep faces visible"));
        assert!(prompt.contains("[NEGATIVE]: Exclude: logos."));
    }

    #[test]
    fn test_narrative_kernel_is_bounded() {
        let input = CompilerInput::new("t", 0).with_narrative("x".repeat(1000));
        let prompt = compile_visual_prompt(&input, false);
        let kernel_line = prompt
            .lines()
            .find(|l| l.starts_with("[NARRATIVE KERNEL]"))
            .unwrap();
        assert_eq!(kernel_line.matches('x').count(), NARRATIVE_KERNEL_CHARS);
    }
}
