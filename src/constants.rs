// Protocol constants for the RCT framing layer

/// Token that starts a frame on the wire
pub const START_TOKEN: u8 = 0x2B;

/// Token that escapes the next byte on the wire
pub const ESCAPE_TOKEN: u8 = 0x2D;

/// De-stuffed buffer length at which the length field is fully known
/// (start token + command byte + 2 reserved length bytes)
pub const HEADER_WITH_LENGTH: usize = 4;

/// Size of the object id field (4 bytes)
pub const OBJECT_ID_SIZE: usize = 4;

/// Size of the address field in plant frames (4 bytes)
pub const ADDRESS_SIZE: usize = 4;

/// Size of the trailing CRC16 checksum (2 bytes)
pub const CRC_SIZE: usize = 2;
