use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

use crate::constants::ADDRESS_SIZE;

/// Wire command codes understood by the device firmware.
///
/// The numeric values are fixed by the protocol. Conversion from a raw wire
/// byte is fallible; an unmapped value surfaces as
/// [`RctError::UnknownCommand`](crate::error::RctError::UnknownCommand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Command {
    /// Request the value of an object id
    Read = 0x01,
    /// Write a value to an object id
    Write = 0x02,
    /// Write with a 2-byte length field for large payloads
    LongWrite = 0x03,
    /// Answer to a read or write
    Response = 0x05,
    /// Answer with a 2-byte length field for large payloads
    LongResponse = 0x06,
    /// Ask the device to send the object periodically
    ReadPeriodically = 0x08,
    /// Vendor extension
    Extension = 0x3C,
    /// Sentinel used by the decoder before a command byte has been received
    #[default]
    #[strum(to_string = "none")]
    None = 0xFF,
}

impl Command {
    /// Commands that carry a 2-byte length field instead of a 1-byte one
    pub fn is_long(&self) -> bool {
        matches!(self, Command::LongWrite | Command::LongResponse)
    }

    /// Width decision on a raw command byte. Needed while the header is still
    /// being accumulated and the byte may not map to a known command yet.
    pub(crate) fn is_long_code(code: u8) -> bool {
        code == u8::from(Command::LongWrite) || code == u8::from(Command::LongResponse)
    }
}

/// Type of communication frame.
///
/// Standard frames address a single device. Plant frames carry an additional
/// 4-byte bus address for multi-inverter installations; their numeric tag is
/// folded into the transmitted length field. The frame type is not
/// self-describing on the wire and must be configured per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Default, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FrameType {
    #[default]
    Standard = 0x00,
    Plant = 0x08,
}

impl FrameType {
    /// Number of address bytes between the length field and the object id
    pub(crate) fn address_size(&self) -> usize {
        match self {
            FrameType::Standard => 0,
            FrameType::Plant => ADDRESS_SIZE,
        }
    }

    /// Additive tag this frame type folds into the wire length field
    pub(crate) fn length_tag(&self) -> usize {
        usize::from(u8::from(*self))
    }
}
