//! Coordinate encoding and device models
//!
//! The protocol is not self-delimiting: every coordinate field has the
//! same fixed width, chosen by the display model. Small modules address
//! their pixels with one byte per coordinate, the 320x240 module needs two
//! (little-endian).

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bytes per coordinate component on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoordinateWidth {
    /// One byte, values 0-255
    #[default]
    One,
    /// Two bytes, low byte first
    Two,
}

impl CoordinateWidth {
    /// Number of bytes each coordinate occupies
    pub const fn bytes(self) -> usize {
        match self {
            CoordinateWidth::One => 1,
            CoordinateWidth::Two => 2,
        }
    }

    /// Largest coordinate that survives encoding unchanged
    pub const fn max_value(self) -> u16 {
        match self {
            CoordinateWidth::One => u8::MAX as u16,
            CoordinateWidth::Two => u16::MAX,
        }
    }

    /// Returns true if `value` can be encoded without truncation
    pub const fn fits(self, value: u16) -> bool {
        value <= self.max_value()
    }

    /// Encode a coordinate
    ///
    /// With a one byte width only the low byte is kept.
    pub fn encode(self, value: u16) -> Vec<u8, 2> {
        let bytes = value.to_le_bytes();
        Vec::from_slice(&bytes[..self.bytes()]).unwrap_or_default()
    }

    /// Decode a coordinate the way the display reads it
    ///
    /// Returns `None` if `bytes` is shorter than the width.
    pub fn decode(self, bytes: &[u8]) -> Option<u16> {
        match self {
            CoordinateWidth::One => bytes.first().map(|&b| b as u16),
            CoordinateWidth::Two => match bytes {
                [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
                _ => None,
            },
        }
    }
}

/// Supported eDIP TFT modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceModel {
    /// 128x64
    Edip128,
    /// 160x104
    Edip160,
    /// 240x128
    #[default]
    Edip240,
    /// 320x240
    Edip320,
}

impl DeviceModel {
    /// Coordinate width the module expects
    pub const fn coordinate_width(self) -> CoordinateWidth {
        match self {
            DeviceModel::Edip128 | DeviceModel::Edip160 | DeviceModel::Edip240 => {
                CoordinateWidth::One
            }
            DeviceModel::Edip320 => CoordinateWidth::Two,
        }
    }
}
