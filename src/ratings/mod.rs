//! Aggregate difficulty ratings on the 0..=5 scale.
//!
//! Besides the stream rating these are plain statistical folds over the
//! hit object coordinates; none of them involve the detector state.

use crate::parse::HitObject;

/// Gaps longer than this many milliseconds count as jumps rather than
/// parts of a stream.
pub const DEFAULT_JUMP_THRESHOLD: f64 = 150.0;

/// Map a weighted stream length onto the 0..=5 rating scale.
pub fn stream_rating(weighted_length: u32) -> u32 {
    match weighted_length {
        0..=5 => 0,
        6..=11 => 1,
        12..=17 => 2,
        18..=23 => 3,
        24..=29 => 4,
        _ => 5,
    }
}

/// Average distance of non-stream jumps, divided by 100 and capped at 5.
///
/// Pairs closer in time than `threshold` (default 150ms) are considered
/// stream material and ignored.
pub fn jump_rating(hit_objects: &[HitObject], threshold: Option<f64>) -> u32 {
    let threshold = threshold.unwrap_or(DEFAULT_JUMP_THRESHOLD);

    let mut total = 0.0;
    let mut count = 0_u32;

    for pair in hit_objects.windows(2) {
        let interval = pair[1].start_time - pair[0].start_time;

        if interval > threshold {
            total += f64::from(pair[0].pos.distance(pair[1].pos));
            count += 1;
        }
    }

    if count == 0 {
        return 0;
    }

    ((total / f64::from(count) / 100.0) as u32).min(5)
}

/// Mean direction change between consecutive movement vectors, mapped
/// linearly from 135° (rating 0) down to 45° (rating 5).
///
/// Triples containing a zero-length movement carry no angle and are
/// skipped.
pub fn finger_control_rating(hit_objects: &[HitObject]) -> u32 {
    let mut total = 0.0;
    let mut count = 0_u32;

    for triple in hit_objects.windows(3) {
        let v1 = triple[1].pos - triple[0].pos;
        let v2 = triple[2].pos - triple[1].pos;

        let len1 = v1.length();
        let len2 = v2.length();

        if len1 == 0.0 || len2 == 0.0 {
            continue;
        }

        let cos = (v1.dot(v2) / (len1 * len2)).clamp(-1.0, 1.0);
        total += f64::from(cos.acos().to_degrees());
        count += 1;
    }

    if count == 0 {
        return 0;
    }

    let avg_angle = total / f64::from(count);
    let rating = (135.0 - avg_angle) / 90.0 * 5.0;

    rating.clamp(0.0, 5.0).round() as u32
}

/// Average distance between consecutive objects, divided by 50 and capped
/// at 5.
pub fn aim_control_rating(hit_objects: &[HitObject]) -> u32 {
    if hit_objects.len() < 2 {
        return 0;
    }

    let total: f64 = hit_objects
        .windows(2)
        .map(|pair| f64::from(pair[0].pos.distance(pair[1].pos)))
        .sum();

    let avg = total / (hit_objects.len() - 1) as f64;

    ((avg / 50.0) as u32).min(5)
}
