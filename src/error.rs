use std::array::TryFromSliceError;

use num_enum::TryFromPrimitiveError;
use thiserror::Error;

use crate::types::Command;

/// The primary error type for the `rctframe` library.
#[derive(Error, Debug)]
pub enum RctError {
    #[error("frame has not been fully received")]
    FrameNotComplete,

    #[error("CRC mismatch: received {received:#06x}, calculated {calculated:#06x} ({consumed} bytes consumed)")]
    CrcMismatch {
        received: u16,
        calculated: u16,
        consumed: usize,
    },

    #[error("unknown command code {0:#04x}")]
    UnknownCommand(u8),

    #[error("declared frame length {declared} is below the minimum of {minimum} for this frame type")]
    LengthOutOfRange { declared: usize, minimum: usize },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

impl From<TryFromPrimitiveError<Command>> for RctError {
    fn from(err: TryFromPrimitiveError<Command>) -> Self {
        RctError::UnknownCommand(err.number)
    }
}

impl From<TryFromSliceError> for RctError {
    fn from(_: TryFromSliceError) -> Self {
        RctError::InvalidFrame("failed to convert slice to array".to_string())
    }
}
