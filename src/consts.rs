/// Sample rate in Hz of the PCM buffer handed to the detectors.
/// The resampling step upstream converts everything to 8 kHz mono,
/// which is plenty of resolution for locating a clap transient.
pub const SAMPLE_RATE: usize = 8000;

/// Fixed offset added to the long-term mean to form the decision threshold.
/// Higher = only very loud bursts register (fewer false positives)
/// Lower = quieter claps register but background noise may too
pub const THRESHOLD_CONSTANT: i64 = (i16::MAX as f64 / 2.9) as i64;

/// Minimum clap likeliness score (max excess squared over burst length)
/// required to accept a candidate.
/// Higher = only sharp, intense bursts are accepted
/// Lower = milder bursts pass, at the risk of accepting noise
pub const DECISION_THRESHOLD: i64 = 10_000_000;

/// Length in samples of the short-term rolling mean window.
/// Small enough that the mean reacts within a handful of samples.
pub const SHORT_TERM_WINDOW: usize = 5;

/// Length in samples of the long-term rolling mean window (20 s at 8 kHz).
/// Represents the ambient loudness of the recording.
pub const LONG_TERM_WINDOW: usize = SAMPLE_RATE * 20;

/// Maximum number of consecutive above-threshold samples a burst may last.
/// Anything longer is sustained loud sound, not a clap.
pub const MAX_CLAP_DURATION: usize = 3;

/// Hard cap on collected candidates, bounding scan time and memory.
pub const MAX_CANDIDATES: usize = 128;

/// Samples to skip forward after accepting a candidate, so the decay tail
/// and room echo of a clap cannot trigger a second detection.
pub const COOLDOWN_ADVANCE: usize = SAMPLE_RATE / 6;

/// Initial distance threshold of the simple detector, in seconds.
pub const WINDOW_INITIAL_SECS: usize = 5;

/// Seconds added to the simple detector's distance threshold per retry.
pub const WINDOW_ADVANCE_SECS: usize = 1;

/// Trailing look-back window of the simple detector, in seconds.
pub const LOOKBACK_SECS: usize = WINDOW_INITIAL_SECS * 2;

/// Normalized magnitude rise (0.0 - 1.0) between adjacent samples that the
/// simple detector treats as a clap edge.
/// Higher = only hard transients register
/// Lower = more candidates, more spurious ones
pub const MAGNITUDE_RATIO: f32 = 0.2;

/// Cooldown of the simple detector after a candidate, in samples.
pub const SIMPLE_COOLDOWN: usize = 300;

/// Average jitter below which the simple detector stops widening its
/// window and accepts the result as a satisfactory lock.
pub const GOOD_ENOUGH_JITTER: u64 = 150;

/// How much leading audio the loudness advisor inspects (30 s at 8 kHz).
pub const LOUDNESS_SCAN_LIMIT: usize = SAMPLE_RATE * 30;

/// Fraction of full scale the loudness advisor aims the observed peak at.
pub const LOUDNESS_TARGET: f32 = 0.95;
