//! Test doubles for the UART and delay

use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec};

use ediptft_hal::{UartConfig, UartConfigure, UartRx, UartTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    WriteFailed,
    RxEmpty,
}

/// UART that records writes and replays scripted replies
pub struct MockUart {
    tx: Vec<u8, 1024>,
    rx: Vec<u8, 256>,
    rx_pos: usize,
    replies: Deque<Vec<u8, 64>, 8>,
    /// Number of `write_blocking` calls
    pub writes: usize,
    pub flushes: usize,
    pub fail_writes: bool,
    pub config: Option<UartConfig>,
}

impl MockUart {
    pub fn new() -> Self {
        Self {
            tx: Vec::new(),
            rx: Vec::new(),
            rx_pos: 0,
            replies: Deque::new(),
            writes: 0,
            flushes: 0,
            fail_writes: false,
            config: None,
        }
    }

    /// Bytes the "display" will send
    pub fn queue_rx(&mut self, bytes: &[u8]) {
        self.rx.extend_from_slice(bytes).unwrap();
    }

    /// Bytes the "display" sends once the next unanswered write arrives
    pub fn reply_to_next_write(&mut self, bytes: &[u8]) {
        self.replies
            .push_back(Vec::from_slice(bytes).unwrap())
            .unwrap();
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn clear_written(&mut self) {
        self.tx.clear();
    }
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockError::WriteFailed);
        }
        self.writes += 1;
        self.tx.extend_from_slice(data).unwrap();
        if let Some(reply) = self.replies.pop_front() {
            self.rx.extend_from_slice(&reply).unwrap();
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

impl UartRx for MockUart {
    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        Ok(self.rx.len() - self.rx_pos)
    }

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        for slot in buf.iter_mut() {
            *slot = *self.rx.get(self.rx_pos).ok_or(MockError::RxEmpty)?;
            self.rx_pos += 1;
        }
        Ok(buf.len())
    }
}

impl UartConfigure for MockUart {
    fn configure(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.config = Some(*config);
        Ok(())
    }
}

/// Delay that only counts
pub struct MockDelay {
    elapsed_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { elapsed_ns: 0 }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
