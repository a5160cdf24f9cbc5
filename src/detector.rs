/// Outcome of a clap detection pass.
///
/// Finding fewer claps than requested is a normal outcome, not an error:
/// both fields are `None` and callers must check before using the position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DetectionResult {
    /// Sample index of the last clap of the most regular run found.
    pub best_position: Option<usize>,

    /// Average jitter of that run; zero means perfectly even spacing.
    /// Doubles as a confidence metric: the lower, the more certainly this
    /// was a deliberate clap train rather than noise.
    pub average_jitter: Option<u64>,
}

impl DetectionResult {
    /// The "no clap sequence found" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.best_position.is_some()
    }
}

/// Contract for a clap detection strategy.
///
/// Both implementations scan a borrowed, immutable PCM buffer and carry no
/// state across calls, so a detector can be shared freely between threads.
pub trait ClapDetector {
    /// Locates the last clap of a `clap_count`-long clap train in `samples`.
    fn detect(&self, samples: &[i16], clap_count: usize) -> DetectionResult;
}
