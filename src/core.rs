//! Core types for the air data serial protocol

use bitfield::bitfield;

use crate::format::MARKER_BIT;

/// A single byte delivered by the byte-framing layer
///
/// Timestamps are opaque to the decoder: they are only carried through to
/// the decoded records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedByte<T> {
    /// Byte value
    pub value: u8,
    /// Time the byte started on the wire
    pub start: T,
    /// Time the byte ended on the wire
    pub end: T,
    /// Set when the framing layer saw a framing or parity error
    pub framing_error: bool,
}

impl<T: Copy> TimedByte<T> {
    /// Create a new byte record
    pub fn new(value: u8, start: T, end: T) -> Self {
        TimedByte {
            value,
            start,
            end,
            framing_error: false,
        }
    }

    /// Create a byte record flagged by the framing layer
    pub fn with_framing_error(value: u8, start: T, end: T) -> Self {
        TimedByte {
            value,
            start,
            end,
            framing_error: true,
        }
    }
}

/// Frame category, selected by the start-of-header (SOH) byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// SOH 0x01: primary air data
    Soh1,
    /// SOH 0x02: rates and heater data
    Soh2,
    /// SOH 0x03: raw sensor data
    Soh3,
    /// SOH 0x05: secondary air data
    Soh5,
}

impl Category {
    /// All categories, in code order
    pub const ALL: [Category; 4] = [
        Category::Soh1,
        Category::Soh2,
        Category::Soh3,
        Category::Soh5,
    ];

    /// Recognise a frame-start byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Category::Soh1),
            0x02 => Some(Category::Soh2),
            0x03 => Some(Category::Soh3),
            0x05 => Some(Category::Soh5),
            _ => None,
        }
    }

    /// The SOH byte of this category
    pub fn code(&self) -> u8 {
        match self {
            Category::Soh1 => 0x01,
            Category::Soh2 => 0x02,
            Category::Soh3 => 0x03,
            Category::Soh5 => 0x05,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SOH{}", self.code())
    }
}

/// Measurement qualifier carried in bits 6-4 of a data header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flag {
    /// Value is valid
    Valid,
    /// Value is above the measurement range
    Above,
    /// Value is below the measurement range
    Below,
    /// Invalid, positive
    InvalidPositive,
    /// Invalid, negative
    InvalidNegative,
    /// Invalid
    Invalid,
}

impl Flag {
    /// Decode the flag from the three flag bits (header bits 6-4)
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Flag::Valid),
            1 => Some(Flag::Above),
            2 => Some(Flag::Below),
            3 => Some(Flag::InvalidPositive),
            4 => Some(Flag::InvalidNegative),
            5 => Some(Flag::Invalid),
            _ => None,
        }
    }

    /// Flag bits in header position (`header & 0x70`)
    pub fn code(&self) -> u8 {
        let bits = match self {
            Flag::Valid => 0,
            Flag::Above => 1,
            Flag::Below => 2,
            Flag::InvalidPositive => 3,
            Flag::InvalidNegative => 4,
            Flag::Invalid => 5,
        };
        bits << 4
    }

    /// Protocol name of the flag
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Valid => "valid",
            Flag::Above => "above",
            Flag::Below => "below",
            Flag::InvalidPositive => "invalid +",
            Flag::InvalidNegative => "invalid -",
            Flag::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

bitfield! {
    /// Bit view of a frame header byte
    ///
    /// - Bit 7: marker bit
    /// - Bits 6-4: flag
    /// - Bits 3-0: label
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct HeaderByte(u8);
    impl Debug;
    pub marker, set_marker: 7;
    pub u8, flag_bits, set_flag_bits: 6, 4;
    pub u8, label, set_label: 3, 0;
}

impl HeaderByte {
    /// Build a header from its fields, marker bit set
    pub fn compose(flag: Flag, label: u8) -> Self {
        HeaderByte(MARKER_BIT | flag.code() | (label & 0x0F))
    }

    /// Raw header byte
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for HeaderByte {
    fn from(byte: u8) -> Self {
        HeaderByte(byte)
    }
}
