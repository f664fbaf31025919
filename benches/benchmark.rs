//! Benchmarks for the master-script compiler.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moviola::script::{hash_input_with, HashAlgorithm};
use moviola::{
    compile_master_script, segment_narrative, AspectRatio, CompilerInput, MoviolaRequest,
    RevealSettings, SegmenterConfig,
};

const SENTENCE: &str = "El mercado despierta con el olor a café mientras las mujeres tejen historias.";

fn narrative(sentences: usize) -> String {
    vec![SENTENCE; sentences].join(" ")
}

fn input(sentences: usize, duration_sec: f64) -> CompilerInput {
    CompilerInput::new("bench-trace", 1_700_000_000_000)
        .with_analysis_context("Mercado techado de Chilpancingo al amanecer, puestos de café y textiles.")
        .with_narrative(narrative(sentences))
        .with_cultural_element("rebozo")
        .with_cultural_element("café de olla")
        .with_compiled_visual_prompt("[SCENE]:\nMercado.\n[STYLE]:\ndocumentary realism.")
        .with_reveal_settings(RevealSettings::new().with_aspect_ratio(AspectRatio::Ratio16x9))
        .with_moviola(
            MoviolaRequest::new("Veo", duration_sec)
                .with_also_engine("Sora")
                .with_also_engine("Wan"),
        )
}

fn bench_hash_input(c: &mut Criterion) {
    let input = input(10, 30.0);
    let mut group = c.benchmark_group("hash_input");
    for alg in [HashAlgorithm::Sha256, HashAlgorithm::Fnv1aDual] {
        group.bench_with_input(BenchmarkId::new("algorithm", format!("{:?}", alg)), &alg, |b, alg| {
            b.iter(|| black_box(hash_input_with(&input, *alg)))
        });
    }
    group.finish();
}

fn bench_segment_narrative(c: &mut Criterion) {
    let config = SegmenterConfig::default();
    let mut group = c.benchmark_group("segment_narrative");

    for sentences in [1usize, 10, 100].iter() {
        let text = narrative(*sentences);
        group.bench_with_input(
            BenchmarkId::new("sentences", sentences),
            sentences,
            |b, _| b.iter(|| black_box(segment_narrative(&text, 60.0, &config))),
        );
    }
    group.finish();
}

fn bench_compile_master_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_master_script");

    for duration in [9.0f64, 60.0, 600.0].iter() {
        let input = input(200, *duration);
        group.bench_with_input(
            BenchmarkId::new("duration_sec", duration),
            duration,
            |b, _| b.iter(|| black_box(compile_master_script(&input))),
        );
    }
    group.finish();
}

fn bench_to_json(c: &mut Criterion) {
    let master = compile_master_script(&input(50, 60.0));
    c.bench_function("to_json_pretty", |b| {
        b.iter(|| black_box(master.to_json_pretty().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_hash_input,
    bench_segment_narrative,
    bench_compile_master_script,
    bench_to_json,
);
criterion_main!(benches);
