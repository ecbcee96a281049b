use std::collections::HashSet;

use crate::parse::Beatmap;
use crate::streams::{reduce, StreamDetector, StreamStats, Tempo};

/// Anything that prevents a [`Beatmap`] from being analyzed.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The map contains no hit objects, so there is nothing to scan.
    #[error("beatmap contains no hit objects")]
    NoHitObjects,
    /// The map declares no tempo, so gaps cannot be rated against a beat.
    #[error("beatmap contains no timing points")]
    NoTimingPoints,
}

/// Stream calculator for parsed beatmaps.
///
/// Scans consecutive hit objects against the map's first timing point and
/// reduces the detected streams into [`StreamStats`].
///
/// # Example
///
/// ```
/// use osu_streams::{Beatmap, StreamAnalyzer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let map = Beatmap::default();
/// # let map = Beatmap {
/// #     timing_points: vec![osu_streams::TimingPoint { time: 0.0, beat_len: 500.0 }],
/// #     hit_objects: (0..4)
/// #         .map(|i| osu_streams::HitObject {
/// #             pos: osu_streams::Pos2::default(),
/// #             start_time: f64::from(i) * 100.0,
/// #         })
/// #         .collect(),
/// #     ..map
/// # };
/// let stats = StreamAnalyzer::new(&map)
///     .skip_bpm(270)
///     .calculate()?;
///
/// println!("longest: {} | rating: {}", stats.longest_run, stats.rating());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StreamAnalyzer<'map> {
    map: &'map Beatmap,
    circle_size: Option<f32>,
    skipped_bpms: HashSet<u32>,
}

impl<'map> StreamAnalyzer<'map> {
    /// Create a new analyzer for the given map.
    #[inline]
    pub fn new(map: &'map Beatmap) -> Self {
        Self {
            map,
            circle_size: None,
            skipped_bpms: HashSet::new(),
        }
    }

    /// Override the circle size used for the spacing normalizer.
    ///
    /// Defaults to the map's own circle size.
    #[inline]
    pub fn circle_size(mut self, circle_size: f32) -> Self {
        self.circle_size = Some(circle_size);

        self
    }

    /// Exclude a rounded BPM from stream membership.
    #[inline]
    pub fn skip_bpm(mut self, bpm: u32) -> Self {
        self.skipped_bpms.insert(bpm);

        self
    }

    /// Exclude multiple rounded BPMs from stream membership.
    #[inline]
    pub fn skip_bpms<I: IntoIterator<Item = u32>>(mut self, bpms: I) -> Self {
        self.skipped_bpms.extend(bpms);

        self
    }

    /// Run the scan and reduce it into [`StreamStats`].
    ///
    /// Fails up front if the map has no hit objects or no timing points;
    /// everything past that check is total.
    pub fn calculate(self) -> Result<StreamStats, AnalyzeError> {
        if self.map.hit_objects.is_empty() {
            return Err(AnalyzeError::NoHitObjects);
        }

        let tempo = self
            .map
            .timing_points
            .first()
            .map(Tempo::new)
            .ok_or(AnalyzeError::NoTimingPoints)?;

        let circle_size = self.circle_size.unwrap_or(self.map.cs);

        let mut detector = StreamDetector::new(tempo, circle_size, &self.skipped_bpms);

        for pair in self.map.hit_objects.windows(2) {
            detector.process(&pair[0], &pair[1]);
        }

        let (mut runs, bpm_frequencies) = detector.finish();
        let (mut longest_run, mut weighted_length) = reduce(&mut runs);

        // Run lengths count intervals; shift both statistics by one to
        // count hit objects instead.
        if longest_run > 0 {
            longest_run += 1;
            weighted_length += 1;
        }

        Ok(StreamStats {
            runs,
            longest_run,
            weighted_length,
            bpm_frequencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{HitObject, Pos2, TimingPoint};

    fn map(times: &[f64], beat_len: f64) -> Beatmap {
        Beatmap {
            timing_points: vec![TimingPoint {
                time: 0.0,
                beat_len,
            }],
            hit_objects: times
                .iter()
                .map(|&start_time| HitObject {
                    pos: Pos2::default(),
                    start_time,
                })
                .collect(),
            cs: Beatmap::DEFAULT_CS,
            ..Beatmap::default()
        }
    }

    #[test]
    fn empty_map_is_rejected_up_front() {
        let map = map(&[], 500.0);

        assert!(matches!(
            StreamAnalyzer::new(&map).calculate(),
            Err(AnalyzeError::NoHitObjects)
        ));
    }

    #[test]
    fn missing_tempo_is_rejected_up_front() {
        let mut map = map(&[0.0, 100.0], 500.0);
        map.timing_points.clear();

        assert!(matches!(
            StreamAnalyzer::new(&map).calculate(),
            Err(AnalyzeError::NoTimingPoints)
        ));
    }

    #[test]
    fn single_run_is_corrected_to_object_count() {
        // 120 BPM base, 100ms gaps: division 5, one run of 4 intervals
        let map = map(&[0.0, 100.0, 200.0, 300.0, 400.0], 500.0);

        let stats = StreamAnalyzer::new(&map).calculate().unwrap();

        assert_eq!(stats.runs.len(), 1);
        assert_eq!(stats.runs[0].length, 4);
        assert_eq!(stats.longest_run, 5);
        // round(cbrt(2 * 4^3)) + 1
        assert_eq!(stats.weighted_length, 6);
    }

    #[test]
    fn streamless_map_reports_zero_without_correction() {
        // Half-beat gaps: division 2, never a stream
        let map = map(&[0.0, 250.0, 500.0], 500.0);

        let stats = StreamAnalyzer::new(&map).calculate().unwrap();

        assert!(stats.runs.is_empty());
        assert_eq!(stats.longest_run, 0);
        assert_eq!(stats.weighted_length, 0);
        assert_eq!(stats.rating(), 0);
    }

    #[test]
    fn skipped_bpm_splits_runs() {
        // 100ms gaps produce BPM 150 throughout; skipping it leaves
        // nothing but non-stream occurrences
        let map = map(&[0.0, 100.0, 200.0, 300.0], 500.0);

        let stats = StreamAnalyzer::new(&map)
            .skip_bpm(150)
            .calculate()
            .unwrap();

        assert!(stats.runs.is_empty());
        assert_eq!(stats.longest_run, 0);
        assert_eq!(stats.bpm_frequencies.get(150).unwrap().non_streams, 3);
    }

    #[test]
    fn circle_size_override_changes_the_spacing_cap() {
        // 200ms gaps pass the division gate (2.5 rounds up to 3) but only
        // stay under the spacing cap for very small circle sizes
        let map = map(&[0.0, 200.0, 400.0, 600.0], 500.0);

        let default_cs = StreamAnalyzer::new(&map).calculate().unwrap();
        assert_eq!(default_cs.longest_run, 0);

        let tiny_cs = StreamAnalyzer::new(&map)
            .circle_size(0.0)
            .calculate()
            .unwrap();
        assert_eq!(tiny_cs.runs[0].length, 3);
        assert_eq!(tiny_cs.longest_run, 4);
    }
}
