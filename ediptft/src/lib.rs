//! Driver for Electronic Assembly eDIP TFT displays
//!
//! This crate provides:
//! - [`EdipTft`], a handle exposing every display command as a method
//! - [`Transport`], the byte-level serial adapter with reply timeouts
//! - [`DisplayConfig`] for protocol mode, baud rate and coordinate width
//!
//! # Architecture
//!
//! ```text
//! EdipTft::draw_text(..)
//!     │  Command::DrawText            (ediptft-protocol, catalog)
//!     ▼
//! Command::encode(width)  ──►  Payload: ESC 'Z' 'C' x y text NUL
//!     │
//!     ▼
//! FrameStrategy::encode   ──►  Direct: payload
//!     │                        Small:  [select] DC1 len payload bcc [deselect]
//!     ▼
//! Transport::write_bytes  ──►  ediptft_hal::Uart
//! ```
//!
//! Replies (ACK/NAK, buffer info, touch events) are read back through the
//! same transport with [`EdipTft::wait_and_read_byte`],
//! [`EdipTft::read_buffer`] or the request helpers such as
//! [`EdipTft::read_events`].

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod error;
pub mod transport;

#[cfg(test)]
mod mock;

// Re-export key types
pub use config::{DisplayConfig, DEFAULT_BAUD_RATE, DEFAULT_REPLY_TIMEOUT_MS};
pub use display::EdipTft;
pub use error::Error;
pub use transport::Transport;

pub use ediptft_protocol as protocol;
pub use ediptft_protocol::{
    BargraphDirection, BargraphStyle, BufferInfo, Color, Command, CoordinateWidth, DeviceEvent,
    DeviceModel, Events, Font, FrameStrategy, Justification, MenuDirection, PortAction, TextAngle,
    TouchMenuMode, Validation, ValidationError,
};
