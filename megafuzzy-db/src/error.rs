use std::path::PathBuf;

/// Anything that makes the draw history unusable. Fatal at load time.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("dataset contains no draws")]
    Empty,

    #[error("draw {draw_id}: expected {expected} numbers, found {found}")]
    WrongCount {
        draw_id: u32,
        expected: usize,
        found: usize,
    },

    #[error("draw {draw_id}: number {number} outside 1-60")]
    OutOfRange { draw_id: u32, number: u8 },

    #[error("draw {draw_id}: duplicate number {number}")]
    Duplicate { draw_id: u32, number: u8 },

    #[error("draw {draw_id}: invalid date '{raw}'")]
    InvalidDate { draw_id: u32, raw: String },

    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("cannot read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
