//! Display configuration
//!
//! Everything that has to match the physical module is fixed when an
//! [`EdipTft`](crate::EdipTft) is built: protocol mode, baud rate and the
//! coordinate width of the model. Configurations can be stored as
//! postcard-serialized bytes with the `serde` feature.

use ediptft_hal::UartConfig;
use ediptft_protocol::{CoordinateWidth, DeviceModel, FrameStrategy, Validation};

#[cfg(any(test, feature = "serde"))]
use serde::{Deserialize, Serialize};

/// Factory default baud rate of eDIP modules
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How long to wait for each reply byte
pub const DEFAULT_REPLY_TIMEOUT_MS: u32 = 100;

/// Display connection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(any(test, feature = "serde"), derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Direct or small protocol framing
    pub protocol: FrameStrategy,
    /// Serial line speed
    pub baud_rate: u32,
    /// Bytes per coordinate, must match the model
    pub coordinate_width: CoordinateWidth,
    /// Check parameter ranges before writing
    pub validation: Validation,
    /// Per-byte reply timeout in milliseconds
    pub reply_timeout_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::for_model(DeviceModel::default())
    }
}

impl DisplayConfig {
    /// Factory settings for a display model: small protocol without
    /// addressing, 115200 baud, no validation
    pub const fn for_model(model: DeviceModel) -> Self {
        Self {
            protocol: FrameStrategy::Small { address: None },
            baud_rate: DEFAULT_BAUD_RATE,
            coordinate_width: model.coordinate_width(),
            validation: Validation::Trusting,
            reply_timeout_ms: DEFAULT_REPLY_TIMEOUT_MS,
        }
    }

    /// Send bare `ESC` commands
    pub const fn direct(mut self) -> Self {
        self.protocol = FrameStrategy::Direct;
        self
    }

    /// Use the small protocol, optionally addressing one display on a bus
    pub const fn small(mut self, address: Option<u8>) -> Self {
        self.protocol = FrameStrategy::Small { address };
        self
    }

    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Override the model's coordinate width
    pub const fn with_coordinate_width(mut self, width: CoordinateWidth) -> Self {
        self.coordinate_width = width;
        self
    }

    pub const fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Shorthand for `with_validation(Validation::Strict)`
    pub const fn strict(self) -> Self {
        self.with_validation(Validation::Strict)
    }

    pub const fn with_reply_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.reply_timeout_ms = timeout_ms;
        self
    }

    /// Serial line settings for the configured baud rate
    pub const fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baud_rate)
    }
}
