//! Hex payload encoding and decoding for air data frames

use crate::core::{Category, Flag, HeaderByte};
use crate::error::{ParseError, Result};
use crate::format::{STATUS_HEADER, TERMINATOR};
use crate::labels;

/// Check a payload character against the upper-case hex alphabet
pub fn is_hex_digit(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'A'..=b'F')
}

/// Decoder for the ASCII hex payload of a frame
pub struct HexDecoder;

impl HexDecoder {
    /// Decode 4 hex characters into a big-endian 16-bit value
    pub fn decode_u16(payload: &[u8]) -> Result<u16> {
        let mut bytes = [0u8; 2];
        hex::decode_to_slice(payload, &mut bytes)
            .map_err(|err| ParseError::malformed_status(err.to_string()))?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Decode 8 hex characters into a big-endian IEEE-754 float
    ///
    /// NaN and infinities are returned as-is.
    pub fn decode_f32(payload: &[u8]) -> Result<f32> {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(payload, &mut bytes)
            .map_err(|err| ParseError::malformed_float(err.to_string()))?;
        Ok(f32::from_be_bytes(bytes))
    }
}

/// What a byte fed to a [`FrameBuffer`] turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Position 1
    Header,
    /// Positions 2 to N + 1, a valid hex character
    Payload,
    /// Position N + 2, carriage return
    Terminated,
}

/// Fixed-width frame accumulator: header, `N` hex characters, terminator
///
/// Positions are 1-based, the header byte is position 1.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
    payload: [u8; N],
    received: usize,
}

impl<const N: usize> FrameBuffer<N> {
    /// Total frame length, header and terminator included
    pub const FRAME_LEN: usize = N + 2;

    /// Create an empty buffer
    pub fn new() -> Self {
        FrameBuffer {
            payload: [0u8; N],
            received: 0,
        }
    }

    /// Number of bytes accepted so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// The payload characters accumulated so far
    pub fn payload(&self) -> &[u8] {
        let end = self.received.saturating_sub(1).min(N);
        &self.payload[..end]
    }

    /// Accept the byte at the next frame position
    pub fn accept(&mut self, byte: u8) -> Result<FrameStep> {
        self.received += 1;
        let position = self.received;

        if position == 1 {
            Ok(FrameStep::Header)
        } else if position <= N + 1 {
            if !is_hex_digit(byte) {
                return Err(ParseError::non_hex(byte, position));
            }
            self.payload[position - 2] = byte;
            Ok(FrameStep::Payload)
        } else if position == N + 2 && byte == TERMINATOR {
            Ok(FrameStep::Terminated)
        } else {
            Err(ParseError::wrong_length(byte, position))
        }
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoder producing complete wire frames
pub struct FrameEncoder;

impl FrameEncoder {
    /// Encode a status frame, SOH byte included
    ///
    /// Status frames always travel under SOH 0x01.
    pub fn status(value: u16) -> Vec<u8> {
        let mut frame = Vec::with_capacity(7);
        frame.push(Category::Soh1.code());
        frame.push(STATUS_HEADER);
        frame.extend(hex::encode_upper(value.to_be_bytes()).into_bytes());
        frame.push(TERMINATOR);
        frame
    }

    /// Encode a data frame, SOH byte included
    pub fn data(category: Category, flag: Flag, label: &str, value: f32) -> Result<Vec<u8>> {
        let field = labels::field_id(category, label).ok_or(ParseError::UnknownFieldOrFlag {
            header: flag.code(),
            category: category.code(),
        })?;

        let mut frame = Vec::with_capacity(11);
        frame.push(category.code());
        frame.push(HeaderByte::compose(flag, field).value());
        frame.extend(hex::encode_upper(value.to_be_bytes()).into_bytes());
        frame.push(TERMINATOR);
        Ok(frame)
    }
}
