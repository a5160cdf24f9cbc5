use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};

use clapsync::{
    AdaptiveDetector, ClapDetector, SimpleConfig, SimpleDetector, consts, loudness,
};

/// Locates the last clap of a clap train in a raw PCM recording, for use as
/// a synchronization marker between independently recorded files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Raw signed 16-bit little-endian mono PCM file (ffmpeg -f s16le).
    input: PathBuf,

    /// Number of claps in the synchronization gesture.
    #[arg(long, default_value_t = 4)]
    claps: usize,

    /// Use the magnitude-delta detector instead of the adaptive one.
    #[arg(long)]
    simple: bool,

    /// Sample rate of the input file in Hz.
    #[arg(long, default_value_t = consts::SAMPLE_RATE)]
    sample_rate: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let bytes = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    info!("Read {} samples", samples.len());

    let multiplier = loudness::suggest_multiplier(&samples, consts::LOUDNESS_SCAN_LIMIT);
    if multiplier > 1.0 {
        info!("Quiet recording, a {multiplier:.2}x gain would help manual review");
    }

    let detector: Box<dyn ClapDetector> = if args.simple {
        debug!("Using the simple magnitude-delta detector");
        let config = SimpleConfig {
            sample_rate: args.sample_rate,
            ..SimpleConfig::default()
        };
        Box::new(SimpleDetector::new(config)?)
    } else {
        debug!("Using the adaptive detector");
        Box::new(AdaptiveDetector::with_defaults())
    };

    info!("Detecting claps...");
    let result = detector.detect(&samples, args.claps);

    let Some(position) = result.best_position else {
        bail!("no clap sequence found");
    };

    println!(
        "Best clap position: {} ({:.2} seconds)",
        position,
        position as f32 / args.sample_rate as f32
    );
    if let Some(jitter) = result.average_jitter {
        println!("Average jitter: {jitter} samples");
    }
    println!("Trim the other file by skipping {position} samples from its start");

    Ok(())
}
