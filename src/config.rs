use thiserror::Error;

use crate::consts;

/// Rejected detector configuration. Raised synchronously when a detector is
/// constructed, before any scanning happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("short-term window ({short}) must be smaller than long-term window ({long})")]
    WindowOrder { short: usize, long: usize },

    #[error("{name} must be positive")]
    NonPositive { name: &'static str },
}

/// Tuning parameters of the adaptive (ACDR) detector.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AdaptiveConfig {
    /// Fixed offset added to the long-term mean to form the decision
    /// threshold the short-term mean must exceed.
    pub threshold_constant: i64,

    /// Minimum clap likeliness score to accept a candidate. Empirically
    /// tuned; treat as a knob, not a derived quantity.
    pub decision_threshold: i64,

    /// Samples in the short-term rolling mean. Must be well below the
    /// long-term window so bursts stand out against the ambient baseline.
    pub short_term_window: usize,

    /// Samples in the long-term rolling mean representing ambient noise.
    pub long_term_window: usize,

    /// Longest burst (in above-threshold samples) still considered a clap.
    pub max_clap_duration: usize,

    /// Cap on collected candidates; bounds worst-case scan time.
    pub max_candidates: usize,

    /// Samples skipped after an accepted candidate, past the clap's tail.
    pub cooldown_advance: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            threshold_constant: consts::THRESHOLD_CONSTANT,
            decision_threshold: consts::DECISION_THRESHOLD,
            short_term_window: consts::SHORT_TERM_WINDOW,
            long_term_window: consts::LONG_TERM_WINDOW,
            max_clap_duration: consts::MAX_CLAP_DURATION,
            max_candidates: consts::MAX_CANDIDATES,
            cooldown_advance: consts::COOLDOWN_ADVANCE,
        }
    }
}

impl AdaptiveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("short_term_window", self.short_term_window),
            ("long_term_window", self.long_term_window),
            ("max_clap_duration", self.max_clap_duration),
            ("max_candidates", self.max_candidates),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { name });
            }
        }

        if self.short_term_window >= self.long_term_window {
            return Err(ConfigError::WindowOrder {
                short: self.short_term_window,
                long: self.long_term_window,
            });
        }

        Ok(())
    }
}

/// Tuning parameters of the simple magnitude-delta detector.
#[derive(Clone, PartialEq, Debug)]
pub struct SimpleConfig {
    /// Sample rate of the buffer, used to convert the second-based windows.
    pub sample_rate: usize,

    /// First distance threshold tried, in seconds from the buffer start.
    pub window_initial_secs: usize,

    /// Seconds the distance threshold grows per retry.
    pub window_advance_secs: usize,

    /// Trailing look-back window scanned at each distance threshold.
    pub lookback_secs: usize,

    /// Normalized magnitude rise between adjacent samples taken as a clap.
    pub magnitude_ratio: f32,

    /// Samples skipped after a candidate.
    pub cooldown: usize,

    /// Cap on collected candidates per scan.
    pub max_candidates: usize,

    /// Average jitter at which the search stops widening and accepts.
    pub good_enough_jitter: u64,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            sample_rate: consts::SAMPLE_RATE,
            window_initial_secs: consts::WINDOW_INITIAL_SECS,
            window_advance_secs: consts::WINDOW_ADVANCE_SECS,
            lookback_secs: consts::LOOKBACK_SECS,
            magnitude_ratio: consts::MAGNITUDE_RATIO,
            cooldown: consts::SIMPLE_COOLDOWN,
            max_candidates: consts::MAX_CANDIDATES,
            good_enough_jitter: consts::GOOD_ENOUGH_JITTER,
        }
    }
}

impl SimpleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sample_rate", self.sample_rate),
            ("window_initial_secs", self.window_initial_secs),
            ("window_advance_secs", self.window_advance_secs),
            ("lookback_secs", self.lookback_secs),
            ("max_candidates", self.max_candidates),
        ] {
            if value == 0 {
                return Err(ConfigError::NonPositive { name });
            }
        }

        Ok(())
    }
}
