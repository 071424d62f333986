//! Parameter types for display commands
//!
//! Colors and fonts are transparent newtypes: the display accepts any
//! `u8`, the constants only name the built-in palette and font table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Palette color index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0);
    pub const BLACK: Color = Color(1);
    pub const BLUE: Color = Color(2);
    pub const RED: Color = Color(3);
    pub const GREEN: Color = Color(4);
    pub const PURPLE: Color = Color(5);
    pub const CYAN: Color = Color(6);
    pub const YELLOW: Color = Color(7);
    pub const WHITE: Color = Color(8);
    pub const DARK_GREY: Color = Color(9);
    pub const ORANGE: Color = Color(10);
    pub const LILAC: Color = Color(11);
    pub const DARK_PURPLE: Color = Color(12);
    pub const MINT: Color = Color(13);
    pub const GRASS_GREEN: Color = Color(14);
    pub const LIGHT_BLUE: Color = Color(15);
    pub const LIGHT_GREY: Color = Color(16);
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Color(value)
    }
}

/// Font table index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Font(pub u8);

impl Font {
    pub const FONT_8X8: Font = Font(0);
    pub const FONT_4X6: Font = Font(1);
    pub const FONT_6X8: Font = Font(2);
    pub const FONT_7X12: Font = Font(3);
    pub const GENEVA_10: Font = Font(4);
    pub const CHICAGO_14: Font = Font(5);
    pub const SWISS_30B: Font = Font(6);
    pub const BIG_ZIF_57: Font = Font(7);
}

impl From<u8> for Font {
    fn from(value: u8) -> Self {
        Font(value)
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justification {
    Left,
    Center,
    Right,
}

impl Justification {
    /// Opcode letter
    pub const fn to_byte(self) -> u8 {
        match self {
            Justification::Left => b'L',
            Justification::Center => b'C',
            Justification::Right => b'R',
        }
    }

    /// Parse from the opcode letter
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'L' => Some(Justification::Left),
            b'C' => Some(Justification::Center),
            b'R' => Some(Justification::Right),
            _ => None,
        }
    }
}

/// Direction a bargraph grows in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BargraphDirection {
    Left,
    Right,
    Up,
    Down,
}

impl BargraphDirection {
    pub const fn to_byte(self) -> u8 {
        match self {
            BargraphDirection::Left => b'L',
            BargraphDirection::Right => b'R',
            // 'O'ben / 'U'nten in the vendor's command set
            BargraphDirection::Up => b'O',
            BargraphDirection::Down => b'U',
        }
    }
}

/// Bargraph rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BargraphStyle {
    /// Solid bar filled with a pattern
    PatternBar { pattern: u8 },
    /// Pattern bar inside a rectangle
    PatternBarInRect { pattern: u8 },
    /// Single line at the current value
    Line { width: u8 },
    /// Line inside a rectangle
    LineInRect { width: u8 },
}

impl BargraphStyle {
    /// `(type, mst)` parameter pair
    pub const fn to_params(self) -> (u8, u8) {
        match self {
            BargraphStyle::PatternBar { pattern } => (0, pattern),
            BargraphStyle::PatternBarInRect { pattern } => (1, pattern),
            BargraphStyle::Line { width } => (2, width),
            BargraphStyle::LineInRect { width } => (3, width),
        }
    }
}

/// Text rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAngle {
    #[default]
    Deg0,
    Deg90,
}

impl TextAngle {
    pub const fn to_byte(self) -> u8 {
        match self {
            TextAngle::Deg0 => 0,
            TextAngle::Deg90 => 1,
        }
    }
}

/// Direction a touch menu opens towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MenuDirection {
    pub const fn to_byte(self) -> u8 {
        match self {
            MenuDirection::Left => b'L',
            MenuDirection::Right => b'R',
            MenuDirection::Up => b'O',
            MenuDirection::Down => b'U',
        }
    }
}

/// How a touch menu reacts to being touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchMenuMode {
    /// Menu opens by itself
    Automatic,
    /// Display sends an open request (`ESC T 0`) and waits
    Request,
    /// Open the requested menu now
    OpenNow,
}

impl TouchMenuMode {
    pub const fn to_byte(self) -> u8 {
        match self {
            TouchMenuMode::Automatic => 0,
            TouchMenuMode::Request => 1,
            TouchMenuMode::OpenNow => 2,
        }
    }
}

/// Operation on a single output port bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortAction {
    Reset,
    Set,
    Toggle,
}

impl PortAction {
    pub const fn to_byte(self) -> u8 {
        match self {
            PortAction::Reset => 0,
            PortAction::Set => 1,
            PortAction::Toggle => 2,
        }
    }
}
