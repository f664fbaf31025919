//! Walkthrough of the compiler on the market scenario.
//!
//! Run with: cargo run --example compile_demo

use moviola::script::{UsageTemplate, WatermarkConfig, WatermarkPosition};
use moviola::{
    compile_master_script, compile_visual_prompt, AspectRatio, CompilerInput, MoviolaRequest,
    RevealSettings,
};

fn main() {
    println!("========================================");
    println!(" Moviola Master-Script Compiler Demo");
    println!("========================================\n");

    let settings = RevealSettings::from_template(UsageTemplate::SocialOrganic)
        .with_aspect_ratio(AspectRatio::Ratio9x16)
        .with_watermark(WatermarkConfig::new(
            "Focus Guerrero",
            WatermarkPosition::BottomRight,
            18.0,
        ));

    let mut input = CompilerInput::new("demo-trace", 1_700_000_000_000)
        .with_analysis_context("Mercado techado de Chilpancingo al amanecer.")
        .with_narrative(
            "El mercado despierta con el olor a café. Las mujeres tejen historias mientras venden. \
             El sol cae sobre Chilpancingo.",
        )
        .with_cultural_element("rebozo")
        .with_reveal_settings(settings)
        .with_moviola(
            MoviolaRequest::new("Veo", 9.0)
                .with_intent("Teaser documental")
                .with_also_engine("Sora"),
        );

    // 1. Reveal prompt (normally produced upstream)
    let visual = compile_visual_prompt(&input, false);
    println!("Reveal prompt:\n{}\n", visual);
    input.compiled_visual_prompt = visual;

    // 2. Master script
    let master = compile_master_script(&input);
    println!("Hash:     {}", master.meta.input_snapshot_hash);
    println!("Clips:    {}", master.clip_count());
    println!("Duration: {}s\n", master.meta.total_duration_sec);

    for clip in &master.timeline {
        println!(
            "{} [{} -> {}] {} / {}",
            clip.id,
            clip.timecode.in_point,
            clip.timecode.out_point,
            clip.visuals.shot_type.label(),
            clip.visuals.camera_move.label()
        );
    }

    println!();
    for packet in &master.engine_packets {
        println!("{}: {:?}", packet.engine, packet.status);
        if let Some(notes) = packet.compatibility_notes.as_ref().and_then(|n| n.notes.as_deref()) {
            println!("  {}", notes);
        }
    }
}
