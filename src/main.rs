//! Motion Descriptor - Gesture Recording Pipeline
//!
//! Turns hand-tracking frame streams into recorded gesture sequences.

use anyhow::Context;
use motion_descriptor::app::cli::{Cli, Commands};
use motion_descriptor::app::config::Config;
use motion_descriptor::recording::sequence::MotionSequence;
use motion_descriptor::recording::store::recordings_in_dir;
use motion_descriptor::recording::session::AppendOutcome;
use motion_descriptor::hand::types::HandFrame;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Record {
            input,
            name,
            output,
        } => {
            run_record(&input, &name, output, &config)?;
        }
        Commands::Summary { input } => {
            run_summary(&input)?;
        }
        Commands::List { dir, detailed } => {
            run_list(dir, detailed, &config)?;
        }
        Commands::Validate { input } => {
            run_validate(&input)?;
        }
    }

    Ok(())
}

fn run_record(
    input: &Path,
    name: &str,
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    info!(input = %input.display(), gesture = name, "recording from frame stream");

    let mut builder = config.descriptor_builder();
    let mut recorder = config.sequence_recorder();

    builder.reset();
    recorder.start(name)?;

    let file = std::fs::File::open(input)
        .with_context(|| format!("failed to open frame stream {}", input.display()))?;
    let reader = std::io::BufReader::new(file);

    let mut auto_stopped = None;
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: HandFrame = serde_json::from_str(&line)
            .with_context(|| format!("malformed frame on line {}", line_num + 1))?;
        let descriptor = builder.build(&frame);
        match recorder.append(descriptor)? {
            AppendOutcome::Recorded => {}
            AppendOutcome::AutoStopped(sequence) => {
                auto_stopped = Some(sequence);
                break;
            }
        }
    }

    let sequence = match auto_stopped.or_else(|| recorder.stop()) {
        Some(sequence) => sequence,
        None => {
            warn!("no frames recorded; nothing to save");
            return Ok(());
        }
    };

    let dir = output.unwrap_or_else(|| config.recording.output_dir.clone());
    let path = sequence.save_to_dir(&dir)?;
    println!(
        "Saved {} frames ({:.2}s, {:.1} fps) to {}",
        sequence.metadata.total_frames,
        sequence.metadata.duration_seconds,
        sequence.metadata.average_fps,
        path.display()
    );
    Ok(())
}

fn run_summary(input: &Path) -> anyhow::Result<()> {
    let sequence = MotionSequence::load(input)?;
    let stats = sequence.statistics();

    println!("Motion summary: {}", sequence.metadata.gesture_name);
    println!("  Recorded:    {}", sequence.metadata.recorded_at);
    println!("  Duration:    {:.2} s", stats.duration_seconds);
    println!("  Frames:      {}", stats.total_frames);
    println!("  Average FPS: {:.1}", stats.average_fps);

    println!("  Primitives:");
    for (primitive, count) in &stats.primitive_counts {
        let share = *count as f64 / stats.total_frames.max(1) as f64 * 100.0;
        println!("    {:<12} {:>5} frames ({:.1}%)", primitive.to_string(), count, share);
    }

    println!(
        "  Velocity (units/s): mean {:.2}, max {:.2}, min {:.2}",
        stats.velocity.mean, stats.velocity.max, stats.velocity.min
    );

    let flagged = sequence.frames_where(|f| f.flags.any()).len();
    if flagged > 0 {
        println!("  Flagged frames: {}", flagged);
    }
    Ok(())
}

fn run_list(dir: Option<PathBuf>, detailed: bool, config: &Config) -> anyhow::Result<()> {
    let dir = dir.unwrap_or_else(|| config.recording.output_dir.clone());
    let paths = recordings_in_dir(&dir)?;
    if paths.is_empty() {
        println!("No recordings in {}", dir.display());
        return Ok(());
    }

    for path in paths {
        if detailed {
            match MotionSequence::load(&path) {
                Ok(sequence) => println!(
                    "{}  {} frames, {:.2}s, gesture '{}'",
                    path.display(),
                    sequence.metadata.total_frames,
                    sequence.metadata.duration_seconds,
                    sequence.metadata.gesture_name
                ),
                Err(e) => println!("{}  (unreadable: {})", path.display(), e),
            }
        } else {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn run_validate(input: &Path) -> anyhow::Result<()> {
    let sequence = MotionSequence::load(input)
        .with_context(|| format!("{} failed validation", input.display()))?;
    println!(
        "OK: {} ({} frames, format {})",
        input.display(),
        sequence.metadata.total_frames,
        sequence.metadata.format_version
    );
    Ok(())
}
