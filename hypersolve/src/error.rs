use thiserror::Error;

/// Errors raised while building or manipulating linear systems and their solutions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two objects that must share a dimension do not
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A linear system was built from an empty list of rows
    #[error("a linear system needs at least one row to fix its dimension")]
    EmptySystem,

    /// A geometric operation was attempted in a dimension where it is not defined
    #[error("operation not supported in dimension {0}")]
    UnsupportedDimension(usize),

    /// An intermediate coefficient fell outside the range of a 96-bit decimal
    #[error("coefficient arithmetic overflowed the decimal range")]
    Overflow,

    /// A coefficient could not be parsed or represented as a decimal
    #[error("invalid coefficient: {0}")]
    InvalidCoefficient(#[from] rust_decimal::Error),
}

impl Error {
    /// Returns true for every error caused by disagreeing or missing dimensions
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Error::DimensionMismatch { .. } | Error::EmptySystem)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
