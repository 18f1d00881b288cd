use std::io;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes were available to read than requested.
    ///
    /// The `count` bytes already read are valid.
    #[error("end of data after {count} bytes")]
    EndOfData { count: usize },
    /// Fewer bytes fit than requested, or an offset lies past the capacity.
    ///
    /// `count` is 0 when an offset was rejected.
    #[error("insufficient capacity after {count} bytes")]
    InsufficientCapacity { count: usize },
    /// A resolved offset would be negative.
    #[error("seek before the start")]
    SeekBeforeStart,
    /// A resolved offset does not fit into an `isize`.
    #[error("offset does not fit into an isize")]
    OffsetOverflow,
}

impl Error {
    /// Bytes transferred before the operation stopped.
    #[must_use]
    pub fn count(&self) -> usize {
        match *self {
            Error::EndOfData { count } | Error::InsufficientCapacity { count } => count,
            Error::SeekBeforeStart | Error::OffsetOverflow => 0,
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::EndOfData { .. } => io::ErrorKind::UnexpectedEof,
            Error::InsufficientCapacity { .. } => io::ErrorKind::WriteZero,
            Error::SeekBeforeStart | Error::OffsetOverflow => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, e)
    }
}
