use std::cmp::Ordering;

/// Tempo descriptor from the `[TimingPoints]` section.
///
/// Inherited points (negative beat length) declare no tempo of their own
/// and are never turned into a [`TimingPoint`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingPoint {
    /// Offset in milliseconds at which this tempo takes effect.
    pub time: f64,
    /// Milliseconds per beat; always finite and positive.
    pub beat_len: f64,
}

impl TimingPoint {
    /// Beats per minute declared by this descriptor.
    #[inline]
    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_len
    }
}

impl PartialOrd for TimingPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.time.partial_cmp(&other.time)
    }
}
