//! Parse error types

use std::num::ParseIntError;
use thiserror::Error;

/// The cause of a failed parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("invalid major version")]
    InvalidMajor,
    #[error("invalid minor version")]
    InvalidMinor,
    #[error("invalid patch version")]
    InvalidPatch,
    #[error("missing minor version")]
    MissingMinor,
    #[error("missing patch version")]
    MissingPatch,
    #[error("major version should be followed by a period")]
    MissingMajorSeparator,
    #[error("minor version should be followed by a period")]
    MissingMinorSeparator,
    #[error("invalid prerelease component")]
    InvalidPrerelease,
    #[error("invalid build metadata component")]
    InvalidBuild,
    #[error("junk data after version")]
    TrailingJunk,
    #[error("invalid numeric component: {0}")]
    InvalidNumber(#[source] ParseIntError),
}

/// Error returned when a version or range string cannot be parsed.
///
/// `offset` is the byte offset into the input where scanning stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    offset: usize,
    kind: ErrorKind,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: ErrorKind) -> Self {
        ParseError { offset, kind }
    }

    /// Byte offset of the failure
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// What went wrong
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}
