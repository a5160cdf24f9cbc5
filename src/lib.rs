//! Clap-train detection for media synchronization.
//!
//! Finds the last clap of a known-length clap train ("clap 4 times") inside
//! a mono 16-bit PCM buffer, so two independently recorded files can be
//! aligned on it. Decoding and resampling to the fixed rate happen upstream;
//! this crate only ever sees a finished sample buffer.

pub mod adaptive;
pub mod config;
pub mod consts;
pub mod detector;
pub mod jitter;
pub mod loudness;
pub mod simple;

pub use adaptive::AdaptiveDetector;
pub use config::{AdaptiveConfig, ConfigError, SimpleConfig};
pub use detector::{ClapDetector, DetectionResult};
pub use jitter::select_best_run;
pub use loudness::suggest_multiplier;
pub use simple::SimpleDetector;
