use bytes::Bytes;
use tracing::trace;

use crate::checksum::crc16;
use crate::constants::{ADDRESS_SIZE, CRC_SIZE, ESCAPE_TOKEN, HEADER_WITH_LENGTH, OBJECT_ID_SIZE, START_TOKEN};
use crate::error::RctError;
use crate::types::{Command, FrameType};

/// Crafts the byte stream representing the input values. The result can be
/// sent as-is to the target device.
///
/// `payload` is ignored for [`Command::Read`] and `address` is ignored for
/// [`FrameType::Standard`] frames. `id` and `address` are transmitted as
/// 4-byte big-endian integers. Encoding never fails.
pub fn make_frame(command: Command, id: u32, payload: &[u8], address: u32, frame_type: FrameType) -> Bytes {
    let payload: &[u8] = if command == Command::Read { &[] } else { payload };
    let address = if frame_type == FrameType::Plant { address } else { 0 };

    let declared = frame_type.length_tag() + frame_type.address_size() + OBJECT_ID_SIZE + payload.len();

    let mut buf = Vec::with_capacity(HEADER_WITH_LENGTH + declared + CRC_SIZE);
    buf.push(command.into());
    if command.is_long() {
        buf.extend_from_slice(&(declared as u16).to_be_bytes());
    } else {
        buf.push(declared as u8);
    }
    if frame_type == FrameType::Plant {
        buf.extend_from_slice(&address.to_be_bytes());
    }
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(payload);

    let crc = crc16(&buf);
    buf.extend_from_slice(&crc.to_be_bytes());

    // byte stuffing; the start token itself is never escaped or checksummed
    let mut wire = Vec::with_capacity(buf.len() * 2 + 1);
    wire.push(START_TOKEN);
    for byte in buf {
        if byte == START_TOKEN || byte == ESCAPE_TOKEN {
            wire.push(ESCAPE_TOKEN);
        }
        wire.push(byte);
    }
    Bytes::from(wire)
}

/// A container for data to be transmitted to the target device.
///
/// Keeps the input values so they can be retrieved later; if that is not a
/// requirement it is easier to call [`make_frame`] directly, which this type
/// uses internally. The wire representation is generated once on construction
/// and returned by [`SendFrame::data`].
///
/// The stored payload and address are the effective values: empty for
/// [`Command::Read`] and zero for non-plant frames, regardless of input.
#[derive(Debug, Clone)]
pub struct SendFrame {
    command: Command,
    id: u32,
    address: u32,
    frame_type: FrameType,
    payload: Bytes,
    data: Bytes,
}

impl SendFrame {
    pub fn new(command: Command, id: u32, payload: &[u8], address: u32, frame_type: FrameType) -> Self {
        let payload = if command == Command::Read {
            Bytes::new()
        } else {
            Bytes::copy_from_slice(payload)
        };
        let address = if frame_type == FrameType::Plant { address } else { 0 };
        let data = make_frame(command, id, &payload, address, frame_type);
        Self {
            command,
            id,
            address,
            frame_type,
            payload,
            data,
        }
    }

    /// The encoded frame, ready to be sent over the transport
    pub fn data(&self) -> Bytes {
        self.data.clone()
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The plant address; 0 unless plant communication was requested
    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// The effective payload; empty for read commands regardless of input
    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }
}

/// Decoder state. The two terminal states keep "complete" and "valid"
/// distinct: a frame whose checksum failed is complete but must not be
/// trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Discarding noise until a start token appears
    SeekingStart,
    /// Accumulating up to the command byte and length field
    Header,
    /// Accumulating address/id/payload and the trailing checksum
    Body,
    CompleteValid,
    CompleteInvalid,
}

/// Incremental decoder for frames received from an RCT device.
///
/// Create one instance per expected frame and feed transport bytes to
/// [`ReceiveFrame::consume`] until the frame completes; chunks may be of any
/// size, down to a single byte at a time. Bytes preceding the start token are
/// discarded silently, so a fresh instance resynchronizes over line noise or
/// the tail of an aborted frame on its own. An instance must not be reused
/// once it reports completion.
///
/// The frame type is not self-describing on the wire: whether frames carry a
/// plant address has to be known up front, per connection.
#[derive(Debug)]
pub struct ReceiveFrame {
    state: DecodeState,
    escaping: bool,
    frame_type: FrameType,
    /// de-stuffed bytes, the recognized start token first
    buffer: Vec<u8>,
    /// expected buffer length up to, not including, the checksum
    frame_length: usize,
    command: Command,
    id: u32,
    address: u32,
    data: Bytes,
}

impl Default for ReceiveFrame {
    fn default() -> Self {
        Self::new(FrameType::Standard)
    }
}

impl ReceiveFrame {
    pub fn new(frame_type: FrameType) -> Self {
        Self {
            state: DecodeState::SeekingStart,
            escaping: false,
            frame_type,
            buffer: Vec::new(),
            frame_length: 0,
            command: Command::None,
            id: 0,
            address: 0,
            data: Bytes::new(),
        }
    }

    /// Whether the frame has been received in full. A complete frame may
    /// still have failed its checksum check; use [`ReceiveFrame::is_valid`]
    /// before trusting the decoded fields.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, DecodeState::CompleteValid | DecodeState::CompleteInvalid)
    }

    /// Whether the frame is complete, its checksum matched and the command
    /// was recognized. This is the query callers should rely on.
    pub fn is_valid(&self) -> bool {
        self.state == DecodeState::CompleteValid
    }

    /// The decoded command; [`Command::None`] until a valid frame completed
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    /// Returns the object id, or 0 if the frame completed with a bad checksum.
    pub fn id(&self) -> Result<u32, RctError> {
        if !self.is_complete() {
            return Err(RctError::FrameNotComplete);
        }
        Ok(self.id)
    }

    /// Returns the plant address, or 0 for standard frames and for frames
    /// that completed with a bad checksum.
    pub fn address(&self) -> Result<u32, RctError> {
        if !self.is_complete() {
            return Err(RctError::FrameNotComplete);
        }
        Ok(self.address)
    }

    /// Returns the payload, or an empty buffer if the frame completed with a
    /// bad checksum.
    pub fn data(&self) -> Result<Bytes, RctError> {
        if !self.is_complete() {
            return Err(RctError::FrameNotComplete);
        }
        Ok(self.data.clone())
    }

    /// Consumes bytes until the frame is complete. Returns the number of
    /// bytes consumed from `chunk`; once the frame completes, remaining bytes
    /// are left for a fresh instance to pick up. A decoder already in a
    /// terminal state consumes nothing.
    pub fn consume(&mut self, chunk: &[u8]) -> Result<usize, RctError> {
        let mut consumed = 0;
        for &byte in chunk {
            if self.is_complete() {
                break;
            }
            consumed += 1;

            if self.state == DecodeState::SeekingStart {
                if byte == START_TOKEN {
                    trace!("start token found");
                    self.buffer.push(byte);
                    self.state = DecodeState::Header;
                }
                continue;
            }

            if self.escaping {
                // the byte after an escape token is taken verbatim
                self.escaping = false;
            } else if byte == ESCAPE_TOKEN {
                self.escaping = true;
                continue;
            }
            self.buffer.push(byte);

            match self.state {
                DecodeState::Header if self.buffer.len() == HEADER_WITH_LENGTH => {
                    self.read_header()?;
                }
                DecodeState::Body if self.buffer.len() == self.frame_length + CRC_SIZE => {
                    self.decode().map_err(|err| match err {
                        RctError::CrcMismatch {
                            received, calculated, ..
                        } => RctError::CrcMismatch {
                            received,
                            calculated,
                            consumed,
                        },
                        other => other,
                    })?;
                    return Ok(consumed);
                }
                _ => {}
            }
        }
        Ok(consumed)
    }

    /// Decides the length-field width from the raw command byte and derives
    /// the total expected frame length. Called once the buffer holds the
    /// start token, the command byte and both reserved length bytes.
    fn read_header(&mut self) -> Result<(), RctError> {
        let code = self.buffer[1];
        let (declared, length_field_size) = if Command::is_long_code(code) {
            let declared = u16::from_be_bytes(self.buffer[2..4].try_into()?);
            (usize::from(declared), 2)
        } else {
            // the second reserved byte already belongs to the following field
            (usize::from(self.buffer[2]), 1)
        };

        // the declared length folds in the frame-type tag; reject values that
        // cannot hold the mandatory address/id fields before subtracting
        let minimum = self.frame_type.length_tag() + self.frame_type.address_size() + OBJECT_ID_SIZE;
        if declared < minimum {
            // terminal: the frame can never complete, stop accumulating
            self.state = DecodeState::CompleteInvalid;
            return Err(RctError::LengthOutOfRange { declared, minimum });
        }

        // start token + command byte + length field + address/id/payload
        self.frame_length = 2 + length_field_size + (declared - self.frame_type.length_tag());
        trace!(declared, frame_length = self.frame_length, "header complete");
        self.state = DecodeState::Body;
        Ok(())
    }

    /// Verifies the checksum and splits the buffer into its fields. Called by
    /// [`ReceiveFrame::consume`] once the buffer holds a full frame.
    fn decode(&mut self) -> Result<(), RctError> {
        let crc_offset = self.buffer.len() - CRC_SIZE;
        let received = u16::from_be_bytes(self.buffer[crc_offset..].try_into()?);
        let calculated = crc16(&self.buffer[1..crc_offset]);
        if received != calculated {
            self.state = DecodeState::CompleteInvalid;
            return Err(RctError::CrcMismatch {
                received,
                calculated,
                consumed: 0,
            });
        }

        let command = match Command::try_from(self.buffer[1]) {
            Ok(command) => command,
            Err(err) => {
                self.state = DecodeState::CompleteInvalid;
                return Err(err.into());
            }
        };
        self.command = command;

        let (declared, mut idx) = if command.is_long() {
            (usize::from(u16::from_be_bytes(self.buffer[2..4].try_into()?)), 4)
        } else {
            (usize::from(self.buffer[2]), 3)
        };

        // bounds were checked in read_header
        let mut remaining = declared - self.frame_type.length_tag();
        if self.frame_type == FrameType::Plant {
            self.address = u32::from_be_bytes(self.buffer[idx..idx + ADDRESS_SIZE].try_into()?);
            idx += ADDRESS_SIZE;
            remaining -= ADDRESS_SIZE;
        }
        self.id = u32::from_be_bytes(self.buffer[idx..idx + OBJECT_ID_SIZE].try_into()?);
        idx += OBJECT_ID_SIZE;
        remaining -= OBJECT_ID_SIZE;

        self.data = Bytes::copy_from_slice(&self.buffer[idx..idx + remaining]);
        self.state = DecodeState::CompleteValid;
        trace!(command = %command, id = self.id, len = remaining, "frame decoded");
        Ok(())
    }
}
