use std::alloc::Layout;
use std::fmt::{self, Display};

/// Container level errors.
/// Checked access misses are recoverable, the rest usually aren't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Checked element access past the constructed range.
    OutOfRange { index: usize, len: usize },
    /// Requested size or capacity exceeds what the allocator can report.
    LengthExceeded { requested: usize, max: usize },
    /// Allocator failed to provide storage.
    AllocFailed { bytes: usize },
    /// Checked lookup of a key that is not present.
    MissingKey,
}

impl Error {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    pub fn length_exceeded(requested: usize, max: usize) -> Self {
        Self::LengthExceeded { requested, max }
    }

    pub fn alloc_failed(layout: Layout) -> Self {
        Self::AllocFailed {
            bytes: layout.size(),
        }
    }

    pub fn missing_key() -> Self {
        Self::MissingKey
    }

    /// True for checked access misses, on index or key.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::MissingKey)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            Self::LengthExceeded { requested, max } => {
                write!(f, "Requested length {} exceeds maximum {}", requested, max)
            }
            Self::AllocFailed { bytes } => {
                write!(f, "Allocation of {} bytes failed", bytes)
            }
            Self::MissingKey => {
                write!(f, "Key not present")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = Error::out_of_range(7, 3);
        assert_eq!(error.to_string(), "Index 7 out of range for length 3");
        assert!(error.is_out_of_range());
        assert!(!Error::length_exceeded(10, 5).is_out_of_range());
    }
}
