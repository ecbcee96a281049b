//! Library to detect streams in osu! beatmaps and derive difficulty
//! ratings from them.
//!
//! ## Description
//!
//! The detector walks consecutive hit objects, converts their timing gaps
//! into BPM figures relative to the map's prevailing tempo, and groups
//! runs of rhythmically consistent gaps into streams. The resulting run
//! list is reduced into two statistics (longest run and a rank-weighted
//! cube-root length) which feed the 0..=5 stream rating. Three further
//! ratings (jump, finger control, aim control) are simple folds over the
//! hit object coordinates.
//!
//! ## Usage
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use osu_streams::{ratings, Beatmap, StreamAnalyzer};
//!
//! let content = "osu file format v14
//!
//! [TimingPoints]
//! 0,500,4,2,0,100,1,0
//!
//! [HitObjects]
//! 256,192,0,1,0
//! 256,192,100,1,0
//! 256,192,200,1,0
//! 256,192,300,1,0
//! ";
//!
//! // Decode the map; `Beatmap::from_path` reads from a file instead
//! let map = Beatmap::parse(content.as_bytes())?;
//!
//! // Scan it for streams
//! let stats = StreamAnalyzer::new(&map).calculate()?;
//!
//! assert_eq!(stats.longest_run, 4);
//! assert_eq!(stats.rating(), 0);
//!
//! // Coordinate-based ratings work on the hit objects directly
//! let jump = ratings::jump_rating(&map.hit_objects, None);
//! # let _ = jump;
//! # Ok(())
//! # }
//! ```
//!
//! Maps without hit objects or timing points are rejected before any
//! scanning; see [`AnalyzeError`]. Decoding failures surface as
//! [`ParseError`].

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

mod analyzer;

/// Beatmap decoding and the types it produces.
pub mod parse;

pub mod ratings;

/// Stream detection and its result types.
pub mod streams;

pub use self::analyzer::{AnalyzeError, StreamAnalyzer};
pub use self::parse::{Beatmap, HitObject, ParseError, ParseResult, Pos2, TimingPoint};
pub use self::streams::{BpmCount, BpmFrequencies, ClosedRun, StreamStats};
