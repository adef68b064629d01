// One error type for the editor core and the window/loader around it.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A buffer handed to the core does not match the session's image size.
    /// This is a caller bug, so it is raised before anything is mutated.
    #[error("Dimension mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        actual_w: usize,
        actual_h: usize,
    },

    /// Raw RGBA bytes do not add up to width * height * 4.
    #[error("Buffer length error: {width}x{height} needs {expected} bytes, got {actual}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("File too large: {path:?} is {size} bytes (limit {limit})")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),
}

impl Error {
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::DimensionMismatch {
            expected_w: expected.0,
            expected_h: expected.1,
            actual_w: actual.0,
            actual_h: actual.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
