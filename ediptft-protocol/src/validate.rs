//! Parameter range checks
//!
//! The display is the final arbiter of parameter values and silently
//! misbehaves on out-of-range input. [`Validation::Strict`] catches the
//! documented ranges before anything is written.

use crate::coord::CoordinateWidth;
use crate::frame::NUL;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of bargraphs a display can hold
pub const MAX_BARGRAPHS: u8 = 32;

/// Largest line thickness per axis
pub const MAX_LINE_THICKNESS: u8 = 15;

/// Whether commands are checked before encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Validation {
    /// Pass every value through unchecked
    #[default]
    Trusting,
    /// Reject out-of-range values with a [`ValidationError`]
    Strict,
}

/// A parameter outside its documented range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Bargraph number not in 1-32
    BargraphNumber(u8),
    /// Touch return code 0 where a code is required
    TouchCode(u8),
    /// Line thickness not in 1-15
    LineThickness(u8),
    /// Cursor column or row 0 (positions are 1-based)
    CursorPosition,
    /// Coordinate does not fit the configured width
    CoordinateOutOfRange(u16),
    /// Text would be cut short by an embedded NUL
    TextContainsNul,
}

pub(crate) fn bargraph_number(no: u8) -> Result<(), ValidationError> {
    if (1..=MAX_BARGRAPHS).contains(&no) {
        Ok(())
    } else {
        Err(ValidationError::BargraphNumber(no))
    }
}

pub(crate) fn touch_code(code: u8) -> Result<(), ValidationError> {
    if code == 0 {
        Err(ValidationError::TouchCode(code))
    } else {
        Ok(())
    }
}

pub(crate) fn touch_codes(down: u8, up: u8) -> Result<(), ValidationError> {
    // 0 means "no code" for one edge, but a touch area needs at least one
    if down == 0 && up == 0 {
        Err(ValidationError::TouchCode(0))
    } else {
        Ok(())
    }
}

pub(crate) fn line_thickness(value: u8) -> Result<(), ValidationError> {
    if (1..=MAX_LINE_THICKNESS).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::LineThickness(value))
    }
}

pub(crate) fn cursor_position(col: u8, row: u8) -> Result<(), ValidationError> {
    if col == 0 || row == 0 {
        Err(ValidationError::CursorPosition)
    } else {
        Ok(())
    }
}

pub(crate) fn coords(values: &[u16], width: CoordinateWidth) -> Result<(), ValidationError> {
    match values.iter().find(|&&v| !width.fits(v)) {
        Some(&v) => Err(ValidationError::CoordinateOutOfRange(v)),
        None => Ok(()),
    }
}

pub(crate) fn text(bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes.contains(&NUL) {
        Err(ValidationError::TextContainsNul)
    } else {
        Ok(())
    }
}
