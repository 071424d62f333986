//! Adapter from `embedded-io` byte streams to the UART traits
//!
//! Buffered UARTs from most embedded HALs, USB CDC serial ports and host
//! serial libraries implement `embedded_io::{Read, Write, ReadReady}`.
//! Wrapping one in [`IoUart`] makes it usable as a display transport.
//!
//! The stream is assumed to be configured by its owner, so
//! [`UartConfigure::configure`] only records the requested settings.

use embedded_io::{Read, ReadReady, Write};

use crate::uart::{UartConfig, UartConfigure, UartRx, UartTx};

/// Errors from an [`IoUart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError<E> {
    /// The underlying stream reported an error
    Io(E),
    /// The stream returned end-of-file while a byte was expected
    UnexpectedEof,
}

/// UART implementation over an `embedded-io` stream
pub struct IoUart<T> {
    inner: T,
    config: Option<UartConfig>,
}

impl<T> IoUart<T> {
    /// Wrap a byte stream
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            config: None,
        }
    }

    /// Configuration recorded by the last `configure` call
    pub fn config(&self) -> Option<&UartConfig> {
        self.config.as_ref()
    }

    /// Borrow the wrapped stream
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the wrapped stream
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped stream
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = IoError<T::Error>;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data).map_err(IoError::Io)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().map_err(IoError::Io)
    }
}

impl<T: Read + ReadReady + Write> UartRx for IoUart<T> {
    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        let ready = self.inner.read_ready().map_err(IoError::Io)?;
        Ok(usize::from(ready))
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.inner.read(&mut buf[filled..]).map_err(IoError::Io)?;
            if n == 0 {
                return Err(IoError::UnexpectedEof);
            }
            filled += n;
        }
        Ok(filled)
    }
}

impl<T: Write> UartConfigure for IoUart<T> {
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.config = Some(*config);
        Ok(())
    }
}
