//! eDIP TFT Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits the eDIP TFT driver is
//! written against. Chip-specific HALs implement them directly, or any
//! `embedded-io` byte stream can be wrapped in [`io::IoUart`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ediptft (driver)                       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ediptft-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  embedded-io  │
//! │  UART         │       │  stream       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::UartConfigure`] - Line configuration (baud rate, framing)
//! - [`uart::Uart`] - Everything the display driver needs

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::{IoError, IoUart};
pub use uart::{DataBits, Parity, StopBits, Uart, UartConfig, UartConfigure, UartRx, UartTx};
