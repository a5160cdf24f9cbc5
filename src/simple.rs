use log::debug;

use crate::config::{ConfigError, SimpleConfig};
use crate::detector::{ClapDetector, DetectionResult};
use crate::jitter;

/// Magnitude-delta detector.
///
/// Alternative strategy to [`crate::AdaptiveDetector`] with a different bias:
/// instead of modelling the ambient loudness it looks for a sharp rise
/// between adjacent samples, retrying over a widening slice of the recording
/// until a run of claps locks in with low enough jitter. More robust on
/// recordings whose background loudness is too unstable for a long-term
/// mean, at the price of a worst-case quadratic rescan over the widening
/// windows. Buffers here are minutes of 8 kHz mono, so that is acceptable.
pub struct SimpleDetector {
    config: SimpleConfig,
}

impl SimpleDetector {
    pub fn new(config: SimpleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: SimpleConfig::default(),
        }
    }
}

impl ClapDetector for SimpleDetector {
    fn detect(&self, samples: &[i16], clap_count: usize) -> DetectionResult {
        let config = &self.config;
        let rate = config.sample_rate;
        let lookback = config.lookback_secs * rate;
        let normalized = |idx: usize| f32::from(samples[idx]).abs() / f32::from(i16::MAX);

        let mut best = DetectionResult::none();
        let mut best_jitter = u64::MAX;

        // Widen the distance threshold one step at a time, so a clap train
        // near the start of the recording is found before the scan ever
        // reaches the main content.
        let mut threshold_secs = config.window_initial_secs;
        while threshold_secs < samples.len() / rate {
            let scan_end = threshold_secs * rate;
            let scan_start = (scan_end + 1).saturating_sub(lookback).max(1);

            let mut candidates = Vec::new();
            let mut i = scan_start;
            while i < scan_end && candidates.len() < config.max_candidates {
                let rise = normalized(i) - normalized(i - 1);
                if rise > config.magnitude_ratio {
                    debug!("possible clap at sample {i}, magnitude rise {rise:.2}");
                    candidates.push(i);
                    i += config.cooldown;
                }
                i += 1;
            }

            let result = jitter::select_best_run(&candidates, clap_count);
            if let Some(average) = result.average_jitter {
                if average < best_jitter {
                    best_jitter = average;
                    best = result;
                }
            }

            if best_jitter < config.good_enough_jitter {
                debug!("jitter {best_jitter} below cutoff, accepting lock");
                return best;
            }

            threshold_secs += config.window_advance_secs;
        }

        best
    }
}
