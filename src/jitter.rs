use log::trace;

use crate::detector::DetectionResult;

/// Picks the most evenly spaced run of `run_length` consecutive candidates.
///
/// A human clapping at a steady rhythm produces near-identical gaps between
/// claps, so the run whose gaps vary the least is the most likely to be the
/// deliberate synchronization gesture. Jitter of a run is the sum of absolute
/// differences between consecutive inter-candidate gaps; zero means perfectly
/// periodic claps.
///
/// Candidates must be in increasing position order. Returns the none sentinel
/// when fewer than `run_length` candidates exist (or `run_length` is zero),
/// without scanning. Ties on jitter go to the earliest run.
pub fn select_best_run(candidates: &[usize], run_length: usize) -> DetectionResult {
    if run_length == 0 || candidates.len() < run_length {
        return DetectionResult::none();
    }

    let mut best_jitter = u64::MAX;
    let mut best_position = None;

    for run in candidates.windows(run_length) {
        let mut total_jitter = 0u64;
        let mut previous_gap: Option<usize> = None;
        for pair in run.windows(2) {
            let gap = pair[1] - pair[0];
            if let Some(previous) = previous_gap {
                total_jitter += gap.abs_diff(previous) as u64;
            }
            previous_gap = Some(gap);
        }

        trace!(
            "run ending at {}: total jitter {}",
            run[run_length - 1],
            total_jitter
        );

        if total_jitter < best_jitter {
            best_jitter = total_jitter;
            best_position = Some(run[run_length - 1]);
        }
    }

    DetectionResult {
        best_position,
        average_jitter: Some(best_jitter / run_length as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_candidates_have_zero_jitter() {
        let candidates = [50_000, 65_000, 80_000, 95_000];
        let result = select_best_run(&candidates, 4);
        assert_eq!(result.best_position, Some(95_000));
        assert_eq!(result.average_jitter, Some(0));
    }

    #[test]
    fn too_few_candidates_is_none() {
        let candidates = [50_000, 65_000, 80_000];
        assert_eq!(select_best_run(&candidates, 4), DetectionResult::none());
        assert_eq!(select_best_run(&[], 1), DetectionResult::none());
    }

    #[test]
    fn zero_run_length_is_none() {
        assert_eq!(select_best_run(&[1, 2, 3], 0), DetectionResult::none());
    }

    #[test]
    fn picks_the_most_regular_run() {
        // Two spurious leading candidates with wildly uneven gaps, then a
        // clean 4-clap train.
        let candidates = [100, 7_000, 50_000, 65_000, 80_000, 95_000];
        let result = select_best_run(&candidates, 4);
        assert_eq!(result.best_position, Some(95_000));
        assert_eq!(result.average_jitter, Some(0));
    }

    #[test]
    fn jitter_sums_gap_differences() {
        // Gaps: 10_000, 10_300, 9_900 -> |300| + |400| = 700, averaged over 4.
        let candidates = [0, 10_000, 20_300, 30_200];
        let result = select_best_run(&candidates, 4);
        assert_eq!(result.best_position, Some(30_200));
        assert_eq!(result.average_jitter, Some(700 / 4));
    }

    #[test]
    fn translation_invariance() {
        let candidates = [3_000, 18_500, 33_000, 48_200, 90_000];
        let shifted: Vec<usize> = candidates.iter().map(|p| p + 12_345).collect();

        let base = select_best_run(&candidates, 4);
        let moved = select_best_run(&shifted, 4);

        assert_eq!(moved.average_jitter, base.average_jitter);
        assert_eq!(
            moved.best_position,
            base.best_position.map(|p| p + 12_345)
        );
    }

    #[test]
    fn first_run_wins_ties() {
        // Both 4-candidate runs are perfectly periodic; the earlier ends at
        // 30_000 and must win.
        let candidates = [0, 10_000, 20_000, 30_000, 40_000];
        let result = select_best_run(&candidates, 4);
        assert_eq!(result.best_position, Some(30_000));
        assert_eq!(result.average_jitter, Some(0));
    }

    #[test]
    fn run_of_one_is_the_first_candidate() {
        let result = select_best_run(&[42, 99], 1);
        assert_eq!(result.best_position, Some(42));
        assert_eq!(result.average_jitter, Some(0));
    }
}
