use crate::parse::TimingPoint;

/// The prevailing tempo of a map, taken from its first timing point.
///
/// All conversions from time gaps to BPM figures go through this type;
/// it carries no state besides the rounded descriptor BPM.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tempo {
    bpm: f64,
}

impl Tempo {
    #[inline]
    pub(crate) fn new(point: &TimingPoint) -> Self {
        Self {
            bpm: point.bpm().round(),
        }
    }

    /// Nearest integer multiple of the base tempo that the gap between two
    /// hit objects represents.
    ///
    /// `None` for non-positive deltas and other degenerate gaps; such
    /// pairs are invisible to the detector, they neither extend nor close
    /// a run.
    pub(crate) fn division(&self, delta: f64) -> Option<f64> {
        if delta <= 0.0 {
            return None;
        }

        let interval_bpm = 60_000.0 / delta;
        let division = (interval_bpm / self.bpm).round();

        division.is_finite().then_some(division)
    }

    /// Effective BPM of hits at the given subdivision of the base tempo.
    #[inline]
    pub(crate) fn subdivision_bpm(&self, division: f64) -> u32 {
        (self.bpm * division / 4.0).round() as u32
    }
}
