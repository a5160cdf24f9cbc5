use crate::consts;

/// Suggests a gain multiplier from the peak magnitude of the opening audio.
///
/// Scans at most `scan_limit` leading samples. A peak below half of full
/// scale suggests amplifying so the loudest observed sample lands at 95% of
/// full scale; anything louder gets no amplification, to avoid clipping.
/// A hint for display and playback only, the detectors are unaffected.
pub fn suggest_multiplier(samples: &[i16], scan_limit: usize) -> f32 {
    let mut peak = 0.0f32;
    for &sample in samples.iter().take(scan_limit) {
        let magnitude = f32::from(sample).abs() / f32::from(i16::MAX);
        peak = peak.max(magnitude);
    }

    if peak > 0.0 && peak < 0.5 {
        consts::LOUDNESS_TARGET / peak
    } else {
        1.0
    }
}
