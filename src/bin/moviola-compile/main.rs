//! CLI tool to compile a request JSON into an EditScriptMaster.
//!
//! Usage:
//!   moviola-compile --input request.json [--output script.json] [--engine Sora]
//!                   [--duration 12] [--also-engine Wan] [--ratio 9:16] [--hash-only] [--stats]
//!   moviola-compile --schema

mod input;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use moviola::script::schema::master_script_schema_json;
use moviola::{compile_master_script_with, hash_input, AspectRatio, CompilerConfig, CompilerInput};
use input::InputRequest;

#[derive(Parser, Debug)]
#[command(
    name = "moviola-compile",
    about = "Compile a reveal snapshot into a timed, engine-adapted master script",
    version
)]
struct Args {
    /// Input JSON file path ("-" reads stdin)
    #[arg(short, long, required_unless_present = "schema")]
    input: Option<PathBuf>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the primary engine
    #[arg(short, long)]
    engine: Option<String>,

    /// Override the total duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Additional engine to produce a packet for (repeatable)
    #[arg(long = "also-engine")]
    also_engines: Vec<String>,

    /// Override the aspect ratio (e.g. 16:9, 9:16)
    #[arg(long)]
    ratio: Option<AspectRatio>,

    /// Language tag written to the script rules
    #[arg(long, env = "MOVIOLA_LANGUAGE", default_value = "es-MX")]
    language: String,

    /// Print the JSON Schema of the master script and exit
    #[arg(long, default_value = "false")]
    schema: bool,

    /// Print only the input hash
    #[arg(long, default_value = "false")]
    hash_only: bool,

    /// Print statistics about the compiled script to stderr
    #[arg(long, default_value = "false")]
    stats: bool,

    /// Enable debug logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "moviola=debug" } else { "moviola=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(level.parse().context("Invalid log directive")?);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();
    Ok(())
}

fn read_request(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    std::fs::read_to_string(path).context("Failed to read input file")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    if args.schema {
        println!("{}", master_script_schema_json().context("Failed to encode schema")?);
        return Ok(());
    }

    // 1. Read and parse request
    let input_path = args
        .input
        .as_deref()
        .context("--input is required unless --schema is given")?;
    let json_content = read_request(input_path)?;
    let request: InputRequest =
        serde_json::from_str(&json_content).context("Failed to parse request JSON")?;

    // 2. Fill identity and apply overrides
    let mut input: CompilerInput = request.into();
    if let Some(engine) = args.engine {
        input.moviola.engine = engine;
    }
    if let Some(duration) = args.duration {
        input.moviola.duration_sec = duration;
    }
    if let Some(ratio) = args.ratio {
        input.reveal_settings.aspect_ratio = ratio;
    }
    input.moviola.also_engines.extend(args.also_engines);

    if args.hash_only {
        println!("{}", hash_input(&input));
        return Ok(());
    }

    // 3. Compile
    let config = CompilerConfig::new().with_language(args.language);
    let master = compile_master_script_with(&input, &config);
    let json = master.to_json_pretty().context("Failed to encode script")?;

    // 4. Write output
    match &args.output {
        Some(path) => {
            std::fs::write(path, &json).context("Failed to write output file")?;
            info!(path = %path.display(), trace_id = %master.meta.trace_id, "wrote master script");
        }
        None => println!("{}", json),
    }

    // 5. Optional statistics
    if args.stats {
        eprintln!("Trace ID:        {}", master.meta.trace_id);
        eprintln!("Input hash:      {}", master.meta.input_snapshot_hash);
        eprintln!("Format ratio:    {}", master.meta.format_ratio);
        eprintln!("Clips:           {}", master.clip_count());
        eprintln!(
            "Total duration:  {}s (requested {})",
            master.meta.total_duration_sec, input.moviola.duration_sec
        );
        for packet in &master.engine_packets {
            let note = packet
                .compatibility_notes
                .as_ref()
                .and_then(|n| n.notes.as_deref())
                .unwrap_or("");
            eprintln!("Packet {:<10} {:?} {}", packet.engine, packet.status, note);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_needs_no_input() {
        let args = Args::try_parse_from(["moviola-compile", "--schema"]).unwrap();
        assert!(args.schema);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_input_required_without_schema() {
        assert!(Args::try_parse_from(["moviola-compile", "--stats"]).is_err());
    }

    #[test]
    fn test_ratio_and_engines_parse() {
        let args = Args::try_parse_from([
            "moviola-compile",
            "-i",
            "req.json",
            "--ratio",
            "9:16",
            "--also-engine",
            "Sora",
            "--also-engine",
            "Wan",
        ])
        .unwrap();
        assert_eq!(args.ratio, Some(AspectRatio::Ratio9x16));
        assert_eq!(args.also_engines, vec!["Sora", "Wan"]);
    }
}
