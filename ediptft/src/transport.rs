//! Byte-level serial transport
//!
//! Wraps a UART and a delay source. Writes are synchronous and one call
//! writes one whole frame; reads are either non-blocking or bounded by a
//! timeout, since the display may never answer.

use embedded_hal::delay::DelayNs;

use ediptft_hal::{Uart, UartConfig};

use crate::error::Error;

/// Delay between polls while waiting for a reply byte
const POLL_INTERVAL_MS: u32 = 1;

/// Serial transport for one display line
pub struct Transport<U, D> {
    uart: U,
    delay: D,
}

impl<U: Uart, D: DelayNs> Transport<U, D> {
    pub fn new(uart: U, delay: D) -> Self {
        Self { uart, delay }
    }

    /// Configure the line 8N1 at `baud_rate` and enable it
    ///
    /// Calling this again reconfigures the UART; what that does to bytes
    /// in flight is up to the UART implementation.
    pub fn open(&mut self, baud_rate: u32) -> Result<(), Error<U::Error>> {
        self.uart
            .configure(&UartConfig::with_baudrate(baud_rate))
            .map_err(Error::Transport)
    }

    /// Returns true if at least one received byte is pending
    pub fn byte_available(&mut self) -> Result<bool, Error<U::Error>> {
        let pending = self.uart.bytes_available().map_err(Error::Transport)?;
        Ok(pending > 0)
    }

    /// Read one byte, blocking until it arrives
    ///
    /// Only call this when [`byte_available`](Self::byte_available) said a
    /// byte is pending; there is no timeout.
    pub fn read_byte(&mut self) -> Result<u8, Error<U::Error>> {
        self.uart.read_byte().map_err(Error::Transport)
    }

    /// Wait up to `timeout_ms` for one byte
    ///
    /// Returns [`Error::Timeout`] if nothing arrived in time.
    pub fn wait_and_read_byte(&mut self, timeout_ms: u32) -> Result<u8, Error<U::Error>> {
        let mut waited_ms = 0;
        loop {
            if self.byte_available()? {
                return self.read_byte();
            }
            if waited_ms >= timeout_ms {
                return Err(Error::Timeout);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            waited_ms += POLL_INTERVAL_MS;
        }
    }

    /// Drain pending bytes into `buf` without waiting for more
    ///
    /// Returns the number of bytes read, at most `buf.len()`.
    pub fn read_buffer(&mut self, buf: &mut [u8]) -> Result<usize, Error<U::Error>> {
        let mut count = 0;
        while count < buf.len() && self.byte_available()? {
            buf[count] = self.read_byte()?;
            count += 1;
        }
        Ok(count)
    }

    /// Write `data` in one piece and flush
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), Error<U::Error>> {
        self.uart.write_blocking(data).map_err(Error::Transport)?;
        self.uart.flush().map_err(Error::Transport)
    }

    /// Borrow the UART
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Mutably borrow the UART
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Give back the UART and delay
    pub fn release(self) -> (U, D) {
        (self.uart, self.delay)
    }
}
