//! Events reported by the display
//!
//! Touch input and touch-adjusted bargraphs are queued in the display's
//! send buffer as `ESC id len data…` records. [`Events`] walks such a
//! buffer.

use crate::frame::ESC;

/// One record from the display's send buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceEvent<'a> {
    /// Touch key or switch sent its down/up code
    TouchCode(u8),
    /// Bargraph adjusted by touch
    Bargraph { number: u8, value: u8 },
    /// Touch menu item chosen (1-based)
    MenuItem(u8),
    /// A touch menu wants to open; answer with `open_touch_menu`
    MenuOpenRequest,
    /// Record this crate does not interpret
    Other { id: u8, data: &'a [u8] },
}

// Record identifiers
const EVENT_TOUCH: u8 = b'A';
const EVENT_BARGRAPH: u8 = b'B';
const EVENT_MENU: u8 = b'N';
const EVENT_MENU_REQUEST: u8 = b'T';

impl<'a> DeviceEvent<'a> {
    /// Interpret a record from its identifier and data
    pub fn from_record(id: u8, data: &'a [u8]) -> Result<Self, EventError> {
        let invalid = EventError::InvalidLength {
            id,
            len: data.len() as u8,
        };
        match (id, data) {
            (EVENT_TOUCH, [code]) => Ok(DeviceEvent::TouchCode(*code)),
            (EVENT_BARGRAPH, [number, value]) => Ok(DeviceEvent::Bargraph {
                number: *number,
                value: *value,
            }),
            (EVENT_MENU, [item]) => Ok(DeviceEvent::MenuItem(*item)),
            (EVENT_MENU_REQUEST, _) => Ok(DeviceEvent::MenuOpenRequest),
            (EVENT_TOUCH | EVENT_BARGRAPH | EVENT_MENU, _) => Err(invalid),
            _ => Ok(DeviceEvent::Other { id, data }),
        }
    }

    /// Returns true for events caused by touching the panel
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            DeviceEvent::TouchCode(_)
                | DeviceEvent::Bargraph { .. }
                | DeviceEvent::MenuItem(_)
                | DeviceEvent::MenuOpenRequest
        )
    }
}

/// Malformed send buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// Record did not start with ESC
    MissingEscape(u8),
    /// Buffer ended inside a record
    Truncated,
    /// Known record with the wrong data length
    InvalidLength { id: u8, len: u8 },
}

/// Iterator over the records in a send buffer
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct Events<'a> {
    bytes: &'a [u8],
    failed: bool,
}

impl<'a> Events<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            failed: false,
        }
    }

    fn next_record(&mut self) -> Result<DeviceEvent<'a>, EventError> {
        let (id, len, rest) = match self.bytes {
            [ESC, id, len, rest @ ..] => (*id, *len as usize, rest),
            [ESC, ..] => return Err(EventError::Truncated),
            [other, ..] => return Err(EventError::MissingEscape(*other)),
            [] => return Err(EventError::Truncated),
        };
        if rest.len() < len {
            return Err(EventError::Truncated);
        }
        let (data, remaining) = rest.split_at(len);
        self.bytes = remaining;
        DeviceEvent::from_record(id, data)
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Result<DeviceEvent<'a>, EventError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.bytes.is_empty() {
            return None;
        }
        let result = self.next_record();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
