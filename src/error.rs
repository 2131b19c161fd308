// Error types shared by the binary and CSV codecs.

use crate::format::SampleEncoding;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("bad magic cookie: expected {expected:?}, got {found:?}")]
    BadCookie { expected: [u8; 2], found: [u8; 2] },

    #[error("unsupported file version bytes {0:?}")]
    UnsupportedVersion([u8; 2]),

    #[error("truncated input at byte {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("size mismatch at byte {offset}: declared {declared} bytes, expected {expected}")]
    SizeMismatch {
        offset: usize,
        declared: usize,
        expected: usize,
    },

    #[error("unsupported sample encoding: {0} bytes per point")]
    UnsupportedEncoding(u16),

    #[error("value {value} at sample {index} is outside the range of {encoding:?}")]
    OutOfRange {
        index: usize,
        value: f64,
        encoding: SampleEncoding,
    },

    #[error("malformed CSV header row: {0}")]
    MalformedHeader(String),

    #[error("CSV cell at row {row}, column {col} is not a number: {cell:?}")]
    NonNumericCell {
        row: usize,
        col: usize,
        cell: String,
    },

    #[error("CSV row {row} has {found} columns, expected {expected}")]
    InconsistentColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "non-uniform sample spacing in channel {channel} at row {row}: \
         step {found:e}, expected {expected:e}"
    )]
    NonUniformSampling {
        channel: usize,
        row: usize,
        expected: f64,
        found: f64,
    },

    #[error("invalid waveform model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;
