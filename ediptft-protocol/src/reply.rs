//! Parsing of bytes sent back by the display.
//!
//! In small protocol mode every packet the host sends is answered with a
//! single ACK (0x06) or NAK (0x15). Requests for buffer information or the
//! send buffer are additionally answered with a packet:
//! - START (1 byte): DC1 (send buffer data) or DC2 (buffer information)
//! - LENGTH (1 byte)
//! - DATA (LENGTH bytes)
//! - BCC (1 byte): byte sum of START, LENGTH and DATA, modulo 256

use heapless::Vec;

use crate::frame::{checksum, ACK, DC1, DC2, MAX_PAYLOAD_SIZE, NAK};

/// Errors while interpreting display replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyError {
    /// Packet checksum mismatch
    InvalidChecksum,
    /// A reply arrived that does not answer the request
    Unexpected,
    /// Packet data has the wrong shape for its kind
    InvalidPacket,
}

/// A packet received from the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// DC1 or DC2
    pub kind: u8,
    /// Packet data
    pub data: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// One complete reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ack,
    Nak,
    Packet(Packet),
}

/// Fill levels reported for a buffer information request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferInfo {
    /// Bytes waiting in the display's send buffer
    pub ready: u8,
    /// Free bytes in the display's receive buffer
    pub free: u8,
}

impl BufferInfo {
    /// Interpret a DC2 buffer information packet
    pub fn from_packet(packet: &Packet) -> Result<Self, ReplyError> {
        match (packet.kind, &packet.data[..]) {
            (DC2, [ready, free]) => Ok(Self {
                ready: *ready,
                free: *free,
            }),
            _ => Err(ReplyError::InvalidPacket),
        }
    }
}

/// State machine for parsing incoming replies
#[derive(Debug, Clone)]
pub struct ReplyParser {
    state: ParseState,
    kind: u8,
    expected_length: u8,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for ACK, NAK, DC1 or DC2
    WaitingForStart,
    /// Got a packet start, waiting for LENGTH
    WaitingForLength,
    /// Reading packet data
    ReadingData,
    /// Waiting for BCC
    WaitingForChecksum,
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyParser {
    /// Create a new reply parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            kind: 0,
            expected_length: 0,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.kind = 0;
        self.expected_length = 0;
        self.buffer.clear();
    }

    /// Returns true while a packet is partially received
    pub fn in_packet(&self) -> bool {
        self.state != ParseState::WaitingForStart
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(reply))` when a reply is complete, `Ok(None)` when
    /// more bytes are needed, or `Err` on a checksum mismatch.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Reply>, ReplyError> {
        match self.state {
            ParseState::WaitingForStart => match byte {
                ACK => Ok(Some(Reply::Ack)),
                NAK => Ok(Some(Reply::Nak)),
                DC1 | DC2 => {
                    self.kind = byte;
                    self.state = ParseState::WaitingForLength;
                    Ok(None)
                }
                // Line noise between replies
                _ => Ok(None),
            },
            ParseState::WaitingForLength => {
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingData
                };
                Ok(None)
            }
            ParseState::ReadingData => {
                // Cannot overflow: LENGTH is at most MAX_PAYLOAD_SIZE
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected = checksum(&[self.kind, self.expected_length])
                    .wrapping_add(checksum(&self.buffer));

                if byte != expected {
                    self.reset();
                    return Err(ReplyError::InvalidChecksum);
                }

                let packet = Packet {
                    kind: self.kind,
                    data: self.buffer.clone(),
                };

                self.reset();
                Ok(Some(Reply::Packet(packet)))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete reply found, if any.
    /// Remaining bytes after a complete reply are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Reply>, ReplyError> {
        for &byte in bytes {
            if let Some(reply) = self.feed(byte)? {
                return Ok(Some(reply));
            }
        }
        Ok(None)
    }
}
