use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ost_engine::{ComputeType, Device, EngineOptions, TranslationSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Translate text with a CTranslate2 model directory.
///
/// Uses the same session as the native library: SentencePiece tokenization
/// when the directory ships `source.spm`/`target.spm` (or a shared
/// `spm.model`), whitespace tokenization otherwise.
#[derive(Parser, Debug)]
#[command(name = "ost-translate")]
#[command(about = "Translate text with a CTranslate2 model directory", long_about = None)]
struct Args {
    /// CTranslate2 model directory
    model_dir: PathBuf,

    /// Text to translate (reads stdin line by line when omitted)
    text: Vec<String>,

    /// Device to run on: cpu or cuda
    #[arg(long, default_value = "cpu")]
    device: Device,

    /// Compute type (default, auto, int8, int8_float16, float16, ...)
    #[arg(long, default_value = "default")]
    compute_type: ComputeType,

    /// Threads per translator replica (0 = engine default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Beam size
    #[arg(long, default_value_t = 2)]
    beam_size: usize,

    /// Maximum number of generated tokens per sentence
    #[arg(long, default_value_t = 256)]
    max_decoding_length: usize,

    /// Print per-sentence latency to stderr
    #[arg(long)]
    timing: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn translate_one(session: &TranslationSession, text: &str, timing: bool) -> Result<String> {
    let start = Instant::now();
    let output = session
        .translate(text)
        .with_context(|| format!("failed to translate {:?}", text))?;
    if timing {
        eprintln!("[{:.1} ms] {}", start.elapsed().as_secs_f64() * 1000.0, text);
    }
    Ok(output)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Default: info level, with --verbose: debug level
    let default_filter = if args.verbose {
        "ost_translate=debug,ost_engine=debug"
    } else {
        "ost_translate=info,ost_engine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let options = EngineOptions {
        device: args.device,
        compute_type: args.compute_type,
        num_threads: args.threads,
        beam_size: args.beam_size,
        max_decoding_length: args.max_decoding_length,
        ..Default::default()
    };

    let session = TranslationSession::open_with_options(&args.model_dir, &options)
        .with_context(|| format!("failed to open model directory {:?}", args.model_dir))?;
    tracing::info!(
        "Loaded {:?} (tokenization: {:?})",
        session.model_dir(),
        session.tokenization_mode()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.text.is_empty() {
        let text = args.text.join(" ");
        writeln!(out, "{}", translate_one(&session, &text, args.timing)?)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        writeln!(out, "{}", translate_one(&session, &line, args.timing)?)?;
    }
    Ok(())
}
