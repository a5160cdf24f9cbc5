use log::debug;

use crate::config::{AdaptiveConfig, ConfigError};
use crate::detector::{ClapDetector, DetectionResult};
use crate::jitter;

/// Exact arithmetic mean over a capped trailing window.
///
/// Grows until the window size is reached, after which the caller evicts the
/// sample falling off the back before pushing a new one. Keeping true sums
/// (rather than an exponential approximation) matters here: the short-term
/// mean has to react within a handful of samples while the long-term mean
/// tracks tens of thousands.
#[derive(Debug)]
struct RollingMean {
    window: usize,
    sum: i64,
    count: usize,
}

impl RollingMean {
    fn new(window: usize) -> Self {
        Self {
            window,
            sum: 0,
            count: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.count == self.window
    }

    fn count(&self) -> usize {
        self.count
    }

    fn push(&mut self, magnitude: i64) {
        self.sum += magnitude;
        self.count += 1;
    }

    /// Drops the sample falling off the back of a full window.
    fn evict(&mut self, magnitude: i64) {
        self.sum -= magnitude;
        self.count -= 1;
    }

    /// Retracts an arbitrary in-window sample, e.g. a detected clap's energy.
    /// A no-op on an empty window so the count can never go negative.
    fn remove(&mut self, magnitude: i64) {
        if self.count > 0 {
            self.sum -= magnitude;
            self.count -= 1;
        }
    }

    fn clear(&mut self) {
        self.sum = 0;
        self.count = 0;
    }

    /// Mean over the samples actually accumulated; zero while empty.
    /// Integer truncation is deliberate and affects which side of the
    /// threshold borderline samples land on.
    fn mean(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            self.sum / self.count as i64
        }
    }
}

/// Amplitude-to-clap-duration-ratio detector with an adaptive threshold.
///
/// Flags a clap when the short-term mean magnitude exceeds the long-term
/// (ambient) mean by a fixed constant for at most a few samples, then scores
/// the burst by how sharply it overshoots versus how long it lingers.
pub struct AdaptiveDetector {
    config: AdaptiveConfig,
}

impl AdaptiveDetector {
    pub fn new(config: AdaptiveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: AdaptiveConfig::default(),
        }
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// Scans the buffer and collects burst onsets, capped at
    /// `max_candidates`. Positions are strictly increasing.
    fn collect_candidates(&self, samples: &[i16]) -> Vec<usize> {
        let config = &self.config;
        let magnitude = |idx: usize| i64::from(samples[idx].unsigned_abs());

        let mut candidates = Vec::new();
        let mut long_term = RollingMean::new(config.long_term_window);
        let mut short_term = RollingMean::new(config.short_term_window);
        let mut max_excess = 0i64;
        let mut burst_len = 0usize;

        let mut i = 0;
        while i < samples.len() && candidates.len() < config.max_candidates {
            let current = magnitude(i);

            if long_term.is_full() {
                long_term.evict(magnitude(i - long_term.count()));
            }
            long_term.push(current);

            if short_term.is_full() {
                short_term.evict(magnitude(i - short_term.count()));
            }
            short_term.push(current);

            let threshold = config.threshold_constant + long_term.mean();
            let short_mean = short_term.mean();

            if short_mean > threshold {
                max_excess = max_excess.max(short_mean - threshold);
                burst_len += 1;

                if burst_len > config.max_clap_duration {
                    // Sustained loud sound, not a clap.
                    debug!("burst too long at sample {i}, rejecting");
                    max_excess = 0;
                    burst_len = 0;
                } else {
                    let likeliness = (max_excess * max_excess) / burst_len as i64;
                    if likeliness > config.decision_threshold {
                        // The short-term mean crosses the threshold about
                        // burst_len samples after the transient begins, so
                        // back off to the onset for the reported position.
                        let onset = i.saturating_sub(burst_len);
                        debug!("clap at sample {onset}, likeliness {likeliness}");
                        candidates.push(onset);

                        // Retract the clap's own energy from the ambient
                        // baseline so it cannot mask the following claps.
                        // The short-term window is dominated by the burst;
                        // restart it from scratch.
                        let burst_start = i.saturating_sub(burst_len + 2);
                        for j in burst_start..=i {
                            long_term.remove(magnitude(j));
                        }
                        short_term.clear();

                        // Skip the decay tail and room echo.
                        i += config.cooldown_advance;
                        max_excess = 0;
                        burst_len = 0;
                    }
                }
            } else {
                max_excess = 0;
                burst_len = 0;
            }

            i += 1;
        }

        candidates
    }
}

impl ClapDetector for AdaptiveDetector {
    fn detect(&self, samples: &[i16], clap_count: usize) -> DetectionResult {
        let candidates = self.collect_candidates(samples);
        debug!("{} candidate claps collected", candidates.len());

        if candidates.len() < clap_count {
            return DetectionResult::none();
        }

        jitter::select_best_run(&candidates, clap_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPIKE_WIDTH: usize = 3;

    /// A zeroed buffer with full-scale spikes of `SPIKE_WIDTH` samples.
    fn buffer_with_spikes(len: usize, spikes: &[usize]) -> Vec<i16> {
        let mut samples = vec![0i16; len];
        for &start in spikes {
            for sample in &mut samples[start..start + SPIKE_WIDTH] {
                *sample = i16::MAX;
            }
        }
        samples
    }

    #[test]
    fn silent_buffer_finds_nothing() {
        let samples = vec![0i16; 200_000];
        let detector = AdaptiveDetector::with_defaults();
        assert_eq!(detector.detect(&samples, 4), DetectionResult::none());
    }

    #[test]
    fn four_periodic_spikes_locate_the_last_one() {
        let samples = buffer_with_spikes(200_000, &[50_000, 65_000, 80_000, 95_000]);
        let detector = AdaptiveDetector::with_defaults();

        let result = detector.detect(&samples, 4);
        assert_eq!(result.best_position, Some(95_000));
        assert_eq!(result.average_jitter, Some(0));
    }

    #[test]
    fn three_spikes_cannot_satisfy_four_claps() {
        let samples = buffer_with_spikes(200_000, &[50_000, 65_000, 80_000]);
        let detector = AdaptiveDetector::with_defaults();
        assert_eq!(detector.detect(&samples, 4), DetectionResult::none());
    }

    #[test]
    fn reported_jitter_grows_with_injected_jitter() {
        let detector = AdaptiveDetector::with_defaults();
        let mut previous = 0u64;

        for j in [0usize, 40, 200] {
            let spikes = [50_000, 65_000 + j, 80_000 - j, 95_000 + j];
            let samples = buffer_with_spikes(200_000, &spikes);

            let result = detector.detect(&samples, 4);
            assert_eq!(result.best_position, Some(95_000 + j));

            let reported = result.average_jitter.unwrap();
            assert!(reported >= previous, "jitter must not shrink as spacing degrades");
            previous = reported;
        }
    }

    #[test]
    fn buffer_shorter_than_long_window_degrades_gracefully() {
        // 2.5 s of audio against a 20 s long-term window: the mean has to
        // divide by the accumulated count, not the configured window size.
        let samples = buffer_with_spikes(20_000, &[2_000, 6_000, 10_000, 14_000]);
        let detector = AdaptiveDetector::with_defaults();

        let result = detector.detect(&samples, 4);
        assert_eq!(result.best_position, Some(14_000));
        assert_eq!(result.average_jitter, Some(0));
    }

    #[test]
    fn candidate_cap_stops_the_scan_early() {
        let samples = buffer_with_spikes(200_000, &[50_000, 65_000, 80_000, 95_000]);
        let config = AdaptiveConfig {
            max_candidates: 2,
            ..AdaptiveConfig::default()
        };
        let detector = AdaptiveDetector::new(config).unwrap();

        let result = detector.detect(&samples, 2);
        assert_eq!(result.best_position, Some(65_000));
        assert_eq!(result.average_jitter, Some(0));

        assert_eq!(detector.detect(&samples, 3), DetectionResult::none());
    }

    #[test]
    fn degenerate_config_is_rejected() {
        let config = AdaptiveConfig {
            short_term_window: 5,
            long_term_window: 5,
            ..AdaptiveConfig::default()
        };
        assert!(AdaptiveDetector::new(config).is_err());
    }

    #[test]
    fn rolling_mean_tracks_a_sliding_window() {
        let values = [10i64, 20, 30, 40, 50];
        let mut mean = RollingMean::new(3);

        for (i, &value) in values.iter().enumerate() {
            if mean.is_full() {
                mean.evict(values[i - mean.count()]);
            }
            mean.push(value);
        }

        // Window now holds 30, 40, 50.
        assert_eq!(mean.count(), 3);
        assert_eq!(mean.mean(), 40);
    }

    #[test]
    fn rolling_mean_partial_fill_divides_by_actual_count() {
        let mut mean = RollingMean::new(100);
        mean.push(6);
        mean.push(10);
        assert_eq!(mean.count(), 2);
        assert_eq!(mean.mean(), 8);
    }

    #[test]
    fn rolling_mean_empty_is_zero() {
        assert_eq!(RollingMean::new(5).mean(), 0);
    }

    #[test]
    fn rolling_mean_removal_never_goes_negative() {
        let mut mean = RollingMean::new(5);
        mean.push(100);
        mean.remove(100);
        mean.remove(100);

        assert_eq!(mean.count(), 0);
        assert_eq!(mean.sum, 0);
        assert_eq!(mean.mean(), 0);
    }

    #[test]
    fn rolling_mean_removal_matches_recomputation() {
        // Push seven samples into a window of 5, retract two of the samples
        // still represented, and compare against a from-scratch sum.
        let values = [3i64, 7, 11, 13, 17, 19, 23];
        let mut mean = RollingMean::new(5);
        for (i, &value) in values.iter().enumerate() {
            if mean.is_full() {
                mean.evict(values[i - mean.count()]);
            }
            mean.push(value);
        }
        // Window holds 11, 13, 17, 19, 23.
        mean.remove(13);
        mean.remove(19);

        assert_eq!(mean.count(), 3);
        assert_eq!(mean.sum, 11 + 17 + 23);
    }
}
