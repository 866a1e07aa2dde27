use std::os::raw::c_int;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid hex text: unexpected {found:?} at position {position}")]
    InvalidFormat { position: usize, found: Option<char> },
    #[error("division by zero")]
    DivisionByZero,
    #[error("output buffer too small: {needed} bytes needed, {capacity} available")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("cannot allocate a magnitude of {limbs} limbs")]
    AllocationFailure { limbs: usize },
    #[error("handle used after release")]
    UseAfterRelease,
    #[error("handle released twice")]
    DoubleRelease,
    #[error("handle was never issued")]
    InvalidHandle,
    #[error("value does not fit the requested integer type")]
    ValueOutOfRange,
}

impl Error {
    /// Status code reported through the C ABI. Always negative.
    pub fn code(&self) -> c_int {
        match self {
            Error::InvalidFormat { .. } => -1,
            Error::DivisionByZero => -2,
            Error::BufferTooSmall { .. } => -3,
            Error::AllocationFailure { .. } => -4,
            Error::UseAfterRelease => -5,
            Error::DoubleRelease => -6,
            Error::InvalidHandle => -7,
            Error::ValueOutOfRange => -8,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
