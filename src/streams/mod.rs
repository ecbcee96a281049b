mod aggregate;
mod detector;
mod run;
mod tempo;

pub use detector::{BpmCount, BpmFrequencies};
pub use run::ClosedRun;

pub(crate) use aggregate::reduce;
pub(crate) use detector::StreamDetector;
pub(crate) use tempo::Tempo;

/// Everything the stream scan produced for one beatmap.
///
/// Obtained through [`StreamAnalyzer::calculate`](crate::StreamAnalyzer::calculate).
#[derive(Clone, Debug, Default)]
pub struct StreamStats {
    /// Closed runs, sorted descending by length.
    pub runs: Vec<ClosedRun>,
    /// Object count of the longest run; 0 if the map has no streams.
    pub longest_run: usize,
    /// Rank-weighted cube-root length over all runs, as an object count.
    pub weighted_length: u32,
    /// Per-BPM counters over all gate-passing intervals.
    pub bpm_frequencies: BpmFrequencies,
}

impl StreamStats {
    /// Map the weighted length onto the 0..=5 stream rating scale.
    #[inline]
    pub fn rating(&self) -> u32 {
        crate::ratings::stream_rating(self.weighted_length)
    }
}
