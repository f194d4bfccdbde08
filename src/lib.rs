//! # Air Data Protocol Parser
//!
//! A streaming decoder for the Swiss air data serial format sent by avionics
//! air data computers.
//!
//! The format is fixed-width ASCII over a UART link. Each packet starts with a
//! start-of-header (SOH) byte selecting a category, followed by one of:
//!
//! - a status frame: header `0x8F`, 4 hex characters, `\r`
//! - a data frame: header (marker bit, flag, label), 8 hex characters, `\r`
//!
//! This library provides:
//!
//! - Label tables for each category
//! - Status and data frame decoders
//! - A byte-at-a-time stream parser emitting decoded records with timestamps
//! - A frame encoder for building test streams
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```
//! use airdata_parser::{Decoded, Parser, TimedByte};
//!
//! let mut parser = Parser::new();
//! let records = parser.feed_all(
//!     b"\x01\x8F002A\r"
//!         .iter()
//!         .enumerate()
//!         .map(|(i, byte)| TimedByte::new(*byte, i as u64, i as u64 + 1)),
//! );
//!
//! assert_eq!(
//!     records,
//!     vec![Decoded::Status { value: 42, start_time: 0, stop_time: 7 }]
//! );
//! ```

pub mod core;
pub mod data;
pub mod encoding;
pub mod error;
pub mod labels;
pub mod packet;
pub mod parser;
pub mod stats;
pub mod status;

pub use core::{Category, Flag, HeaderByte, TimedByte};
pub use encoding::FrameEncoder;
pub use error::{ErrorKind, ParseError, Result};
pub use parser::{Decoded, Parser, ParserBuilder, ParserConfig};
pub use stats::StreamStats;

/// Wire format constants
pub mod format {
    /// Marker bit, set in every header byte
    pub const MARKER_BIT: u8 = 0x80;

    /// Frame terminator (carriage return)
    pub const TERMINATOR: u8 = b'\r';

    /// Label field reserved for status frames
    pub const STATUS_LABEL: u8 = 0x0F;

    /// Header byte of a status frame
    pub const STATUS_HEADER: u8 = STATUS_LABEL | MARKER_BIT;

    /// Hex characters in a status payload
    pub const STATUS_PAYLOAD_LEN: usize = 4;

    /// Hex characters in a data payload
    pub const DATA_PAYLOAD_LEN: usize = 8;

    /// Status frame length, header and terminator included
    pub const STATUS_FRAME_LEN: usize = STATUS_PAYLOAD_LEN + 2;

    /// Data frame length, header and terminator included
    pub const DATA_FRAME_LEN: usize = DATA_PAYLOAD_LEN + 2;
}
