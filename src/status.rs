//! Status frame decoding
//!
//! A status frame is 6 bytes: the fixed header 0x8F, four hex characters
//! holding a big-endian 16-bit word, and a carriage return.

use crate::core::Category;
use crate::encoding::{FrameBuffer, FrameStep, HexDecoder};
use crate::error::ParseError;
use crate::format::{STATUS_HEADER, STATUS_PAYLOAD_LEN};

/// Incremental decoder for one status frame
#[derive(Debug, Clone, Default)]
pub struct StatusDecoder {
    frame: FrameBuffer<STATUS_PAYLOAD_LEN>,
    complete: bool,
    value: Option<u16>,
}

impl StatusDecoder {
    /// Create a decoder waiting for the header byte
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a frame is a status frame
    ///
    /// The signature is fixed: SOH 0x01 followed by header 0x8F.
    pub fn recognize(category: Category, header: u8) -> bool {
        category == Category::Soh1 && header == STATUS_HEADER
    }

    /// Feed the next frame byte, header included
    pub fn feed(&mut self, byte: u8) -> Option<ParseError> {
        match self.frame.accept(byte) {
            Ok(FrameStep::Header) | Ok(FrameStep::Payload) => None,
            Ok(FrameStep::Terminated) => {
                self.complete = true;
                match HexDecoder::decode_u16(self.frame.payload()) {
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

    /// Whether the terminator has been received
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The decoded status word, once complete
    pub fn value(&self) -> Option<u16> {
        self.value
    }

    /// Number of bytes fed so far
    pub fn received(&self) -> usize {
        self.frame.received()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TERMINATOR;

    fn feed_all(decoder: &mut StatusDecoder, bytes: &[u8]) -> Option<ParseError> {
        bytes.iter().find_map(|byte| decoder.feed(*byte))
    }

    #[test]
    fn test_recognize() {
        assert!(StatusDecoder::recognize(Category::Soh1, 0x8F));
        assert!(!StatusDecoder::recognize(Category::Soh1, 0x0F));
        assert!(!StatusDecoder::recognize(Category::Soh1, 0x8E));
        assert!(!StatusDecoder::recognize(Category::Soh2, 0x8F));
        assert!(!StatusDecoder::recognize(Category::Soh5, 0x8F));
    }

    #[test]
    fn test_decode_status() {
        let mut decoder = StatusDecoder::new();
        assert_eq!(feed_all(&mut decoder, b"\x8F002A"), None);
        assert!(!decoder.is_complete());
        assert_eq!(decoder.feed(TERMINATOR), None);
        assert!(decoder.is_complete());
        assert_eq!(decoder.value(), Some(42));
    }

    #[test]
    fn test_non_hex_payload() {
        let mut decoder = StatusDecoder::new();
        let err = feed_all(&mut decoder, b"\x8F00x");
        assert_eq!(err, Some(ParseError::non_hex(b'x', 4)));
        assert!(!decoder.is_complete());
        assert_eq!(decoder.value(), None);
    }

    #[test]
    fn test_missing_terminator() {
        let mut decoder = StatusDecoder::new();
        let err = feed_all(&mut decoder, b"\x8FABCDE");
        assert_eq!(err, Some(ParseError::wrong_length(b'E', 6)));
        assert!(!decoder.is_complete());
    }

    #[test]
    fn test_feed_after_complete() {
        let mut decoder = StatusDecoder::new();
        assert_eq!(feed_all(&mut decoder, b"\x8FFFFF\r"), None);
        assert_eq!(decoder.value(), Some(0xFFFF));
        assert_eq!(decoder.feed(b'0'), Some(ParseError::wrong_length(b'0', 7)));
        assert_eq!(decoder.value(), Some(0xFFFF));
    }
}
