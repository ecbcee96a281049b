use std::cmp::Ordering;

use super::Pos2;

/// A single hit object created through parsing.
///
/// Only position and start time are kept; object kind flags, sliders, and
/// hitsounds play no role in stream detection or the coordinate ratings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos2,
    pub start_time: f64,
}

impl PartialOrd for HitObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}
