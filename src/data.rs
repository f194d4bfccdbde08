//! Data frame decoding
//!
//! A data frame is 10 bytes: a header carrying the marker bit, flag and
//! label, eight hex characters holding a big-endian IEEE-754 float, and a
//! carriage return.

use crate::core::{Category, Flag, HeaderByte};
use crate::encoding::{FrameBuffer, FrameStep, HexDecoder};
use crate::error::ParseError;
use crate::format::DATA_PAYLOAD_LEN;
use crate::labels;

/// Incremental decoder for one data frame
#[derive(Debug, Clone)]
pub struct DataDecoder {
    category: Category,
    frame: FrameBuffer<DATA_PAYLOAD_LEN>,
    flag: Option<Flag>,
    label: Option<&'static str>,
    complete: bool,
    value: Option<f32>,
}

impl DataDecoder {
    /// Create a decoder for a frame of the given category
    pub fn new(category: Category) -> Self {
        DataDecoder {
            category,
            frame: FrameBuffer::new(),
            flag: None,
            label: None,
            complete: false,
            value: None,
        }
    }

    /// Validate the header byte and record its flag and label
    pub fn parse_header(&mut self, byte: u8) -> Option<ParseError> {
        let header = HeaderByte::from(byte);
        if !header.marker() {
            return Some(ParseError::MarkerBitMissing(byte));
        }

        let flag = Flag::from_bits(header.flag_bits());
        let label = labels::lookup(self.category, header.label());
        match (flag, label) {
            (Some(flag), Some(label)) => {
                self.flag = Some(flag);
                self.label = Some(label);
                None
            }
            _ => Some(ParseError::UnknownFieldOrFlag {
                header: byte,
                category: self.category.code(),
            }),
        }
    }

    /// Feed the next frame byte, header included
    pub fn feed(&mut self, byte: u8) -> Option<ParseError> {
        match self.frame.accept(byte) {
            Ok(FrameStep::Header) => self.parse_header(byte),
            Ok(FrameStep::Payload) => None,
            Ok(FrameStep::Terminated) => {
                self.complete = true;
                match HexDecoder::decode_f32(self.frame.payload()) {
                    Ok(value) => {
                        self.value = Some(value);
                        None
                    }
                    Err(err) => Some(err),
                }
            }
            Err(err) => Some(err),
        }
    }

    /// Category this frame was opened under
    pub fn category(&self) -> Category {
        self.category
    }

    /// Flag from the header, once parsed
    pub fn flag(&self) -> Option<Flag> {
        self.flag
    }

    /// Channel name from the header, once parsed
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// Whether the terminator has been received
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The decoded value, once complete
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Number of bytes fed so far
    pub fn received(&self) -> usize {
        self.frame.received()
    }
}
