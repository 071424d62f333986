//! eDIP TFT Wire Protocol
//!
//! This crate encodes commands for Electronic Assembly eDIP TFT display
//! modules and decodes what the modules send back. It is pure: nothing here
//! touches a serial port.
//!
//! # Protocol Overview
//!
//! Every command is an `ESC` prefixed opcode followed by fixed-width
//! parameters. Text parameters are NUL terminated:
//! ```text
//! ┌─────┬────────┬────────────────────────────┐
//! │ ESC │ OPCODE │ PARAMETERS                 │
//! │ 1B  │ 1-2B   │ coords 1B/2B, bytes, text  │
//! └─────┴────────┴────────────────────────────┘
//! ```
//!
//! In direct mode the command bytes go on the wire as they are. The small
//! protocol wraps them in a length and checksum packet that the display
//! acknowledges, optionally bracketed by select/deselect packets so several
//! displays can share one bus:
//! ```text
//! ┌─────────────────────┬───────────────────────┬─────────────────────┐
//! │ DC2 3 'A' 'S' a bcc │ DC1 len command… bcc  │ DC2 3 'A' 'D' a bcc │
//! └─────────────────────┴───────────────────────┴─────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod coord;
pub mod events;
pub mod frame;
pub mod reply;
pub mod types;
pub mod validate;

pub use command::Command;
pub use coord::{CoordinateWidth, DeviceModel};
pub use events::{DeviceEvent, EventError, Events};
pub use frame::{
    Frame, FrameError, FrameStrategy, Payload, ACK, DC1, DC2, ESC, MAX_FRAME_SIZE,
    MAX_PAYLOAD_SIZE, NAK, NUL,
};
pub use reply::{BufferInfo, Packet, Reply, ReplyError, ReplyParser};
pub use types::{
    BargraphDirection, BargraphStyle, Color, Font, Justification, MenuDirection, PortAction,
    TextAngle, TouchMenuMode,
};
pub use validate::{Validation, ValidationError};
