use std::io::Error as IoError;

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
///
/// Individually malformed lines inside a section are skipped instead of
/// failing the whole map, so this only covers errors that make the file
/// unusable as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Some IO operation failed.
    #[error("IO error")]
    Io(#[from] IoError),
    /// The initial data of an `.osu` file was incorrect.
    #[error("expected `osu file format v` at file begin")]
    IncorrectFileHeader,
}
