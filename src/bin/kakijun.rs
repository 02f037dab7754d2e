use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kakijun::GlyphSource as _;

#[derive(Parser, Debug)]
#[command(name = "kakijun", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized stroke set of a character as JSON.
    Inspect(InspectArgs),
    /// Play a word on a simulated clock and write one SVG per frame.
    Frames(FramesArgs),
    /// Write a self-animating (CSS keyframes) SVG of a character.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Directory of KanjiVG-style SVG files named by code point.
    #[arg(long)]
    glyphs: PathBuf,

    /// Character to inspect.
    #[arg(long = "char")]
    character: char,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Directory of KanjiVG-style SVG files named by code point.
    #[arg(long)]
    glyphs: PathBuf,

    /// Text to play; kana, whitespace, and punctuation are skipped.
    #[arg(long)]
    text: String,

    /// Output directory for `frame_NNNNN.svg` files.
    #[arg(long)]
    out: PathBuf,

    /// Frames per simulated second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Playback config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames even if the sequence is not complete.
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Directory of KanjiVG-style SVG files named by code point.
    #[arg(long)]
    glyphs: PathBuf,

    /// Character to export.
    #[arg(long = "char")]
    character: char,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw time of each stroke, in seconds.
    #[arg(long, default_value_t = 0.6)]
    stroke_duration: f64,

    /// Overlap between consecutive strokes, in seconds.
    #[arg(long, default_value_t = 0.15)]
    stroke_overlap: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn load_glyph(glyphs: &Path, character: char) -> anyhow::Result<kakijun::GlyphStrokeSet> {
    let source = kakijun::DirGlyphSource::new(glyphs);
    let raw = source
        .fetch_glyph(character)
        .with_context(|| format!("fetch '{character}' from '{}'", glyphs.display()))?;
    let glyph = kakijun::normalize(character, &raw)
        .with_context(|| format!("normalize '{character}'"))?;
    Ok(glyph)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let glyph = load_glyph(&args.glyphs, args.character)?;
    let json = serde_json::to_string_pretty(&glyph).context("serialize stroke set")?;
    println!("{json}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");

    let config = match &args.config {
        Some(path) => kakijun::PlaybackConfig::from_path(path)?,
        None => kakijun::PlaybackConfig::default(),
    };
    let palette = config.palette.clone();

    let source = kakijun::DirGlyphSource::new(&args.glyphs);
    let mut chainer = kakijun::SequenceChainer::new(&args.text, config, source)?;
    if let Some(speed) = args.speed {
        chainer.set_speed(speed)?;
    }
    chainer.play()?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut sink = kakijun::SvgSink::new(palette);
    let mut written = 0u64;
    for k in 0..args.max_frames {
        let now = frame_time(k, args.fps)?;
        chainer.tick(now);
        chainer.present(&mut sink)?;

        let path = args.out.join(format!("frame_{k:05}.svg"));
        std::fs::write(&path, sink.document())
            .with_context(|| format!("write frame '{}'", path.display()))?;
        written += 1;

        if chainer.status() == kakijun::SequenceStatus::Complete {
            break;
        }
    }

    let state = chainer.state();
    eprintln!(
        "wrote {written} frames to {} ({} characters, {:?})",
        args.out.display(),
        state.total_characters,
        state.status
    );
    Ok(())
}

/// Host time of frame `k`, exact to the nanosecond.
fn frame_time(k: u64, fps: u32) -> anyhow::Result<Duration> {
    anyhow::ensure!(fps > 0, "--fps must be > 0");
    let nanos = u64::try_from(u128::from(k) * 1_000_000_000 / u128::from(fps))
        .with_context(|| format!("frame {k} at {fps} fps is out of range"))?;
    Ok(Duration::from_nanos(nanos))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let glyph = load_glyph(&args.glyphs, args.character)?;
    let opts = kakijun::ExportOptions {
        stroke_duration_s: args.stroke_duration,
        stroke_overlap_s: args.stroke_overlap,
        ..kakijun::ExportOptions::default()
    };
    let svg = kakijun::animated_svg(&glyph, &opts);

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
