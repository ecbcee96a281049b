mod control_point;
mod error;
mod hitobject;
mod pos2;

pub use control_point::TimingPoint;
pub use error::{ParseError, ParseResult};
pub use hitobject::HitObject;
pub use pos2::Pos2;

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

macro_rules! sort {
    ($slice:expr) => {
        $slice.sort_unstable_by(|p1, p2| p1.partial_cmp(&p2).unwrap_or(Ordering::Equal))
    };
}

pub(crate) const OSU_FILE_HEADER: &str = "osu file format v";

/// All beatmap data that is relevant for stream detection and the
/// coordinate ratings.
///
/// Difficulty values default to CS 4, HP 2, OD 8, AR 9 when the
/// `[Difficulty]` section does not provide them.
#[derive(Clone, Debug, Default)]
pub struct Beatmap {
    pub version: u8,

    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub ar: f32,

    pub hit_objects: Vec<HitObject>,
    pub timing_points: Vec<TimingPoint>,
}

impl Beatmap {
    pub const DEFAULT_CS: f32 = 4.0;
    pub const DEFAULT_HP: f32 = 2.0;
    pub const DEFAULT_OD: f32 = 8.0;
    pub const DEFAULT_AR: f32 = 9.0;

    /// Parse a [`Beatmap`] by providing a path to a `.osu` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path)?)
    }

    /// Parse a `.osu` file from any reader.
    ///
    /// Only the `[Difficulty]`, `[TimingPoints]`, and `[HitObjects]`
    /// sections are considered. Lines that fail to parse within a known
    /// section are logged and skipped.
    pub fn parse<R: Read>(input: R) -> ParseResult<Self> {
        let mut reader = BufReader::new(input);
        let mut buf = String::new();

        reader.read_line(&mut buf)?;

        let mut map = Self::default();

        map.version = match buf.find(OSU_FILE_HEADER) {
            Some(idx) => buf[idx + OSU_FILE_HEADER.len()..]
                .trim_end()
                .parse()
                .map_err(|_| ParseError::IncorrectFileHeader)?,
            None => return Err(ParseError::IncorrectFileHeader),
        };

        buf.clear();
        map.hit_objects.reserve(256);

        let mut cs = None;
        let mut hp = None;
        let mut od = None;
        let mut ar = None;

        let mut section = Section::None;
        let mut prev_point = 0.0;
        let mut prev_hit = 0.0;
        let mut unsorted_points = false;
        let mut unsorted_hits = false;

        let mut nmbr = 1;

        while reader.read_line(&mut buf)? != 0 {
            let mut line = buf.trim_end();
            nmbr += 1;

            if line.is_empty()
                || line.starts_with("//")
                || line.starts_with(' ')
                || line.starts_with('_')
            {
                buf.clear();
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = Section::from_str(&line[1..line.len() - 1]);
                buf.clear();
                continue;
            }

            if let Some(idx) = line.find("//") {
                line = &line[..idx];
            }

            match section {
                Section::Difficulty => {
                    if let Some((key, value)) = split_colon(line) {
                        let parsed = match value.parse::<f32>() {
                            Ok(value) if value.is_finite() => Some(value),
                            _ => {
                                debug!(line = nmbr, "skipping malformed difficulty value");
                                None
                            }
                        };

                        match key {
                            "CircleSize" => cs = parsed.or(cs),
                            "HPDrainRate" => hp = parsed.or(hp),
                            "OverallDifficulty" => od = parsed.or(od),
                            "ApproachRate" => ar = parsed.or(ar),
                            _ => {}
                        }
                    }
                }
                Section::TimingPoints => {
                    let mut split = line.split(',');

                    let time = split.next().map(|v| v.trim().parse::<f64>());
                    let beat_len = split.next().map(|v| v.trim().parse::<f64>());

                    let (time, beat_len) = match (time, beat_len) {
                        (Some(Ok(time)), Some(Ok(beat_len)))
                            if time.is_finite() && beat_len.is_finite() =>
                        {
                            (time, beat_len)
                        }
                        _ => {
                            debug!(line = nmbr, "skipping malformed timing point");
                            buf.clear();
                            continue;
                        }
                    };

                    // Inherited points carry a negative beat length and
                    // declare no tempo; they are not timing points here.
                    if beat_len <= 0.0 {
                        buf.clear();
                        continue;
                    }

                    map.timing_points.push(TimingPoint { time, beat_len });

                    if time < prev_point {
                        unsorted_points = true;
                    } else {
                        prev_point = time;
                    }
                }
                Section::HitObjects => {
                    let mut split = line.split(',');

                    let x = split.next().map(str::parse::<f32>);
                    let y = split.next().map(str::parse::<f32>);
                    let time = split.next().map(|v| v.trim().parse::<f64>());

                    let (x, y, time) = match (x, y, time) {
                        (Some(Ok(x)), Some(Ok(y)), Some(Ok(time))) if time.is_finite() => {
                            (x, y, time)
                        }
                        _ => {
                            debug!(line = nmbr, "skipping malformed hit object");
                            buf.clear();
                            continue;
                        }
                    };

                    if !map.hit_objects.is_empty() && time < prev_hit {
                        unsorted_hits = true;
                    } else {
                        prev_hit = time;
                    }

                    map.hit_objects.push(HitObject {
                        pos: Pos2 { x, y },
                        start_time: time,
                    });
                }
                Section::None => {}
            }

            buf.clear();
        }

        map.cs = cs.unwrap_or(Self::DEFAULT_CS);
        map.hp = hp.unwrap_or(Self::DEFAULT_HP);
        map.od = od.unwrap_or(Self::DEFAULT_OD);
        map.ar = ar.unwrap_or(Self::DEFAULT_AR);

        if unsorted_points {
            sort!(map.timing_points);
        }

        if unsorted_hits {
            sort!(map.hit_objects);
        }

        Ok(map)
    }
}

#[inline]
fn split_colon(line: &str) -> Option<(&str, &str)> {
    let mut split = line.split(':');

    Some((split.next()?, split.next()?.trim()))
}

#[derive(Copy, Clone, Debug)]
enum Section {
    None,
    Difficulty,
    TimingPoints,
    HitObjects,
}

impl Section {
    #[inline]
    fn from_str(s: &str) -> Self {
        match s {
            "Difficulty" => Self::Difficulty,
            "TimingPoints" => Self::TimingPoints,
            "HitObjects" => Self::HitObjects,
            _ => Self::None,
        }
    }
}
