/// A finished stream as recorded by the detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosedRun {
    /// Amount of qualifying intervals, not hit objects; the final
    /// statistics add one to convert to an object count.
    pub length: usize,
    /// Accumulated normalized spacing over the whole run.
    pub spacing: f64,
}

/// The run currently in progress during a scan.
#[derive(Clone, Debug, Default)]
pub(crate) struct Run {
    length: usize,
    // 0 while the run is empty
    last_bpm: u32,
    spacing: f64,
}

impl Run {
    /// Whether `bpm` may continue this run: trivially so for an empty run,
    /// otherwise it must stay within 20% of the last accepted BPM
    /// (boundary inclusive).
    pub(crate) fn accepts(&self, bpm: u32) -> bool {
        self.last_bpm == 0
            || (f64::from(bpm) - f64::from(self.last_bpm)).abs() <= f64::from(self.last_bpm) / 5.0
    }

    pub(crate) fn extend(&mut self, bpm: u32, spacing: f64) {
        self.last_bpm = bpm;
        self.length += 1;
        self.spacing += spacing;
    }

    /// Close the run and reset it, returning it if it had any members.
    pub(crate) fn take(&mut self) -> Option<ClosedRun> {
        let closed = (self.length > 0).then(|| ClosedRun {
            length: self.length,
            spacing: self.spacing,
        });

        *self = Self::default();

        closed
    }
}
