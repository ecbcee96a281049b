use std::collections::{HashMap, HashSet};

use crate::parse::HitObject;

use super::run::{ClosedRun, Run};
use super::tempo::Tempo;

/// Streams require at least a 1/4-beat subdivision of the base tempo.
const MIN_DIVISION: f64 = 3.0;

/// Objects spaced further apart than this cannot be hit as a stream.
const MAX_SPACING: f64 = 4.0;

/// How often a rounded BPM occurred, split by whether the interval
/// qualified as part of a stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BpmCount {
    pub streams: u32,
    pub non_streams: u32,
}

/// Per-BPM counters over all gate-passing intervals of a scan.
#[derive(Clone, Debug, Default)]
pub struct BpmFrequencies {
    counts: HashMap<u32, BpmCount>,
}

impl BpmFrequencies {
    fn record(&mut self, bpm: u32, is_stream: bool) {
        let entry = self.counts.entry(bpm).or_default();

        if is_stream {
            entry.streams += 1;
        } else {
            entry.non_streams += 1;
        }
    }

    /// Counters for the given rounded BPM, if it was ever recorded.
    pub fn get(&self, bpm: u32) -> Option<BpmCount> {
        self.counts.get(&bpm).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, BpmCount)> + '_ {
        self.counts.iter().map(|(bpm, count)| (*bpm, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// State machine that walks consecutive hit object pairs and groups runs
/// of rhythmically consistent intervals into streams.
///
/// One instance per analysis; all recorded state is handed out by
/// [`finish`](Self::finish).
pub(crate) struct StreamDetector<'s> {
    tempo: Tempo,
    spacing_denom: f64,
    skipped_bpms: &'s HashSet<u32>,

    run: Run,
    runs: Vec<ClosedRun>,
    frequencies: BpmFrequencies,
}

impl<'s> StreamDetector<'s> {
    pub(crate) fn new(tempo: Tempo, circle_size: f32, skipped_bpms: &'s HashSet<u32>) -> Self {
        Self {
            tempo,
            spacing_denom: 54.4 - 4.48 * f64::from(circle_size),
            skipped_bpms,
            run: Run::default(),
            runs: Vec::new(),
            frequencies: BpmFrequencies::default(),
        }
    }

    /// Process one consecutive pair of hit objects.
    pub(crate) fn process(&mut self, prev: &HitObject, curr: &HitObject) {
        let delta = curr.start_time - prev.start_time;

        let Some(division) = self.tempo.division(delta) else {
            return;
        };

        if division < MIN_DIVISION {
            self.close_run();

            return;
        }

        let bpm = self.tempo.subdivision_bpm(division);

        let spacing = if self.spacing_denom == 0.0 {
            0.0
        } else {
            delta / self.spacing_denom
        };

        if self.skipped_bpms.contains(&bpm) || spacing > MAX_SPACING {
            self.frequencies.record(bpm, false);
            self.close_run();

            return;
        }

        // A diverging BPM first closes the run; the retried interval then
        // starts a fresh run, so this loops at most twice.
        loop {
            if self.run.accepts(bpm) {
                self.frequencies.record(bpm, true);
                self.run.extend(bpm, spacing);

                return;
            }

            self.close_run();
        }
    }

    /// Flush the active run and hand out everything the scan recorded.
    pub(crate) fn finish(mut self) -> (Vec<ClosedRun>, BpmFrequencies) {
        self.close_run();

        (self.runs, self.frequencies)
    }

    fn close_run(&mut self) {
        if let Some(closed) = self.run.take() {
            self.runs.push(closed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{Pos2, TimingPoint};

    // 160 BPM base tempo
    fn tempo() -> Tempo {
        Tempo::new(&TimingPoint {
            time: 0.0,
            beat_len: 375.0,
        })
    }

    fn hit(time: f64) -> HitObject {
        HitObject {
            pos: Pos2::default(),
            start_time: time,
        }
    }

    fn scan(times: &[f64], skipped: &HashSet<u32>) -> (Vec<ClosedRun>, BpmFrequencies) {
        let mut detector = StreamDetector::new(tempo(), 4.0, skipped);

        for pair in times.windows(2) {
            detector.process(&hit(pair[0]), &hit(pair[1]));
        }

        detector.finish()
    }

    #[test]
    fn sparse_gaps_stay_out_of_the_frequency_table() {
        // 300ms gaps: 200 BPM intervals, division 1
        let (runs, frequencies) = scan(&[0.0, 300.0, 600.0], &HashSet::new());

        assert!(runs.is_empty());
        assert!(frequencies.is_empty());
    }

    #[test]
    fn consistent_intervals_form_one_run() {
        // 75ms gaps: division 5, subdivision BPM 200
        let (runs, frequencies) = scan(&[0.0, 75.0, 150.0, 225.0], &HashSet::new());

        assert_eq!(
            runs.iter().map(|run| run.length).collect::<Vec<_>>(),
            vec![3]
        );
        assert_eq!(
            frequencies.get(200),
            Some(BpmCount {
                streams: 3,
                non_streams: 0,
            })
        );
    }

    #[test]
    fn tolerance_boundary_continues_the_run() {
        // 75ms gap: BPM 200, then 62.5ms gap: BPM 240 = 200 + 200 / 5
        let (runs, _) = scan(&[0.0, 75.0, 137.5], &HashSet::new());

        assert_eq!(
            runs.iter().map(|run| run.length).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn diverging_bpm_closes_and_retries_the_pair() {
        // BPM 200, then 53.571ms gap: BPM 280, outside 200 +- 40
        let (runs, frequencies) = scan(&[0.0, 75.0, 128.571_428], &HashSet::new());

        assert_eq!(
            runs.iter().map(|run| run.length).collect::<Vec<_>>(),
            vec![1, 1]
        );

        // The retried interval still counts as a stream occurrence
        assert_eq!(
            frequencies.get(280),
            Some(BpmCount {
                streams: 1,
                non_streams: 0,
            })
        );
    }

    #[test]
    fn skipped_bpm_records_non_stream_and_closes() {
        let skipped: HashSet<_> = [240].into_iter().collect();

        // Two BPM-200 intervals, then the boundary interval at BPM 240
        let (runs, frequencies) = scan(&[0.0, 75.0, 150.0, 212.5], &skipped);

        assert_eq!(
            runs.iter().map(|run| run.length).collect::<Vec<_>>(),
            vec![2]
        );
        assert_eq!(
            frequencies.get(240),
            Some(BpmCount {
                streams: 0,
                non_streams: 1,
            })
        );
    }

    #[test]
    fn excessive_spacing_rejects_the_pair() {
        // 150ms gaps pass the division gate (division 3) but exceed the
        // spacing cap at CS 4: 150 / 36.48 > 4
        let (runs, frequencies) = scan(&[0.0, 150.0, 300.0], &HashSet::new());

        assert!(runs.is_empty());
        assert_eq!(
            frequencies.get(120),
            Some(BpmCount {
                streams: 0,
                non_streams: 2,
            })
        );
    }

    #[test]
    fn non_positive_deltas_do_not_break_a_run() {
        let breaks = HashSet::new();
        let mut detector = StreamDetector::new(tempo(), 4.0, &breaks);

        detector.process(&hit(0.0), &hit(75.0));
        detector.process(&hit(75.0), &hit(75.0));
        detector.process(&hit(75.0), &hit(150.0));

        let (runs, _) = detector.finish();

        assert_eq!(
            runs.iter().map(|run| run.length).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn final_flush_closes_the_active_run() {
        let breaks = HashSet::new();
        let mut detector = StreamDetector::new(tempo(), 4.0, &breaks);
        detector.process(&hit(0.0), &hit(75.0));

        let (runs, _) = detector.finish();

        assert_eq!(
            runs,
            vec![ClosedRun {
                length: 1,
                spacing: 75.0 / (54.4 - 4.48 * 4.0),
            }]
        );
    }
}
