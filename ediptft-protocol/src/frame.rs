//! Frame encoding for the eDIP command protocol.
//!
//! A [`Payload`] holds one command: `ESC`, the opcode and its parameters.
//! A [`FrameStrategy`] turns it into the bytes that go on the wire.
//!
//! Direct frame format:
//! - ESC (1 byte): 0x1B
//! - OPCODE (1-2 bytes): ASCII command letters
//! - PARAMETERS (0-n bytes): coordinates, numbers, NUL terminated text
//!
//! Small protocol packet format:
//! - DC1 (1 byte): 0x11 for command data, 0x12 (DC2) for link commands
//! - LENGTH (1 byte): data length (0-255)
//! - DATA (0-255 bytes)
//! - BCC (1 byte): sum of all preceding packet bytes, modulo 256

use core::ops::Deref;

use heapless::Vec;

use crate::coord::CoordinateWidth;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Command prefix
pub const ESC: u8 = 0x1B;
/// Positive acknowledge from the display
pub const ACK: u8 = 0x06;
/// Negative acknowledge from the display
pub const NAK: u8 = 0x15;
/// Small protocol data packet start
pub const DC1: u8 = 0x11;
/// Small protocol link command packet start
pub const DC2: u8 = 0x12;
/// Text terminator
pub const NUL: u8 = 0x00;

/// Maximum payload size in bytes (one small protocol packet)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Size of a select or deselect packet
pub const ADDRESS_PACKET_SIZE: usize = 6;

/// Maximum complete frame size (SELECT + DC1 + LENGTH + MAX_PAYLOAD + BCC + DESELECT)
pub const MAX_FRAME_SIZE: usize = ADDRESS_PACKET_SIZE + 3 + MAX_PAYLOAD_SIZE + ADDRESS_PACKET_SIZE;

/// Link command: select device
const LINK_SELECT: u8 = b'S';
/// Link command: deselect device
const LINK_DESELECT: u8 = b'D';
/// Link command: report send/receive buffer fill levels
const LINK_BUFFER_INFO: u8 = b'I';
/// Link command: return send buffer contents
const LINK_SEND_BUFFER: u8 = b'S';

/// Request for the buffer information packet
pub const BUFFER_INFO_REQUEST: [u8; 4] = request_packet(LINK_BUFFER_INFO);

/// Request for the send buffer contents
pub const SEND_BUFFER_REQUEST: [u8; 4] = request_packet(LINK_SEND_BUFFER);

/// Errors that can occur while building frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Small protocol block check: byte sum modulo 256
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

const fn request_packet(command: u8) -> [u8; 4] {
    let bcc = DC2.wrapping_add(1).wrapping_add(command);
    [DC2, 1, command, bcc]
}

const fn address_packet(command: u8, address: u8) -> [u8; ADDRESS_PACKET_SIZE] {
    let bcc = DC2
        .wrapping_add(3)
        .wrapping_add(b'A')
        .wrapping_add(command)
        .wrapping_add(address);
    [DC2, 3, b'A', command, address, bcc]
}

/// Packet that selects the display at `address` on a shared bus
pub const fn select_packet(address: u8) -> [u8; ADDRESS_PACKET_SIZE] {
    address_packet(LINK_SELECT, address)
}

/// Packet that releases the display at `address`
pub const fn deselect_packet(address: u8) -> [u8; ADDRESS_PACKET_SIZE] {
    address_packet(LINK_DESELECT, address)
}

/// The bytes of a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Payload {
    /// Start a command with `ESC` followed by `opcode`
    pub fn command(opcode: &[u8]) -> Result<Self, FrameError> {
        let mut payload = Self { bytes: Vec::new() };
        payload.byte(ESC)?.bytes(opcode)?;
        Ok(payload)
    }

    /// Append one parameter byte
    pub fn byte(&mut self, byte: u8) -> Result<&mut Self, FrameError> {
        self.bytes
            .push(byte)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(self)
    }

    /// Append raw parameter bytes
    pub fn bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, FrameError> {
        self.bytes
            .extend_from_slice(bytes)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(self)
    }

    /// Append a coordinate in the given width
    pub fn coord(&mut self, value: u16, width: CoordinateWidth) -> Result<&mut Self, FrameError> {
        self.bytes(&width.encode(value))
    }

    /// Append an `x, y` pair
    pub fn point(&mut self, x: u16, y: u16, width: CoordinateWidth) -> Result<&mut Self, FrameError> {
        self.coord(x, width)?.coord(y, width)
    }

    /// Append text verbatim followed by the NUL terminator
    ///
    /// Formatting sentinels (`|`, `~`, `@`, `\`) are interpreted by the
    /// display and are not touched here.
    pub fn text(&mut self, text: &[u8]) -> Result<&mut Self, FrameError> {
        self.bytes(text)?.byte(NUL)
    }

    /// Encoded command bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Bytes ready to be written to the transport
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl Frame {
    /// Wrap command data in a small protocol DC1 packet
    pub fn data_packet(data: &[u8]) -> Result<Self, FrameError> {
        let mut frame = Self::default();
        frame.push_packet(DC1, data)?;
        Ok(frame)
    }

    fn push_packet(&mut self, start: u8, data: &[u8]) -> Result<(), FrameError> {
        if data.len() > MAX_PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge);
        }
        let header = [start, data.len() as u8];
        let bcc = checksum(&header).wrapping_add(checksum(data));
        self.extend(&header)?;
        self.extend(data)?;
        self.extend(&[bcc])
    }

    fn extend(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        self.bytes
            .extend_from_slice(bytes)
            .map_err(|_| FrameError::BufferTooSmall)
    }

    /// Raw frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// How commands are put on the wire
///
/// Chosen once when a display handle is built and never switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameStrategy {
    /// Bare `ESC` commands for a single display on the line
    Direct,
    /// Length + checksum packets, acknowledged by the display
    ///
    /// With an address, every command is bracketed by select/deselect
    /// packets so only that display on a shared bus executes it.
    Small {
        /// Bus address of the display
        address: Option<u8>,
    },
}

impl Default for FrameStrategy {
    fn default() -> Self {
        FrameStrategy::Small { address: None }
    }
}

impl FrameStrategy {
    /// Render a command into the complete wire frame
    pub fn encode(&self, payload: &Payload) -> Result<Frame, FrameError> {
        let mut frame = Frame::default();
        match self {
            FrameStrategy::Direct => frame.extend(payload)?,
            FrameStrategy::Small { address } => {
                if let Some(address) = address {
                    frame.extend(&select_packet(*address))?;
                }
                frame.push_packet(DC1, payload)?;
                if let Some(address) = address {
                    frame.extend(&deselect_packet(*address))?;
                }
            }
        }
        Ok(frame)
    }

    /// Select packet sent before each command, if any
    pub fn select_packet(&self) -> Option<[u8; ADDRESS_PACKET_SIZE]> {
        match self {
            FrameStrategy::Small {
                address: Some(address),
            } => Some(select_packet(*address)),
            _ => None,
        }
    }

    /// Deselect packet sent after each command, if any
    pub fn deselect_packet(&self) -> Option<[u8; ADDRESS_PACKET_SIZE]> {
        match self {
            FrameStrategy::Small {
                address: Some(address),
            } => Some(deselect_packet(*address)),
            _ => None,
        }
    }

    /// Returns true if the display answers each packet with ACK or NAK
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, FrameStrategy::Small { .. })
    }
}
