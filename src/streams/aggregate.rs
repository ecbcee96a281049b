use super::run::ClosedRun;

/// Reduce the closed runs of a finished scan into the longest run length
/// and the rank-weighted cube-root length.
///
/// The list is sorted in place, descending by length. The sort is stable
/// so that equally long runs keep their discovery order; the weighting
/// below depends on rank.
pub(crate) fn reduce(runs: &mut [ClosedRun]) -> (usize, u32) {
    if runs.is_empty() {
        return (0, 0);
    }

    runs.sort_by(|a, b| b.length.cmp(&a.length));

    let longest = runs[0].length;
    let n = runs.len() as f64;

    let mut sum = 0.0;

    for (i, run) in runs.iter().enumerate() {
        let weight = 1.0 - i as f64 / n;
        sum += (run.length as f64).powi(3) * weight * 2.0 / n;
    }

    (longest, sum.cbrt().round() as u32)
}
