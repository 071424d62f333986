//! Driver error type

use ediptft_protocol::{FrameError, ReplyError, ValidationError};

/// Errors from display operations
///
/// `E` is the error type of the underlying UART.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The serial transport failed
    Transport(E),
    /// No reply byte within the configured bound
    ///
    /// Means "no reply yet", not that the display rejected anything.
    Timeout,
    /// The display rejected a packet
    Nak,
    /// Parameter out of range (strict validation only)
    Validation(ValidationError),
    /// Command does not fit a frame
    Frame(FrameError),
    /// Reply could not be interpreted
    Reply(ReplyError),
}

impl<E> From<FrameError> for Error<E> {
    fn from(e: FrameError) -> Self {
        Error::Frame(e)
    }
}

impl<E> From<ValidationError> for Error<E> {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl<E> From<ReplyError> for Error<E> {
    fn from(e: ReplyError) -> Self {
        Error::Reply(e)
    }
}

impl<E> Error<E> {
    /// Returns true for [`Error::Timeout`]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }
}
