//! Packet assembly: one frame from its SOH byte to completion or error

use crate::core::Category;
use crate::data::DataDecoder;
use crate::error::ParseError;
use crate::status::StatusDecoder;

/// The sub-decoder chosen by the first byte after the SOH
#[derive(Debug, Clone)]
pub enum Content {
    /// Status word frame
    Status(StatusDecoder),
    /// Sensor value frame
    Data(DataDecoder),
}

impl Content {
    fn feed(&mut self, byte: u8) -> Option<ParseError> {
        match self {
            Content::Status(decoder) => decoder.feed(byte),
            Content::Data(decoder) => decoder.feed(byte),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Content::Status(decoder) => decoder.is_complete(),
            Content::Data(decoder) => decoder.is_complete(),
        }
    }

    fn received(&self) -> usize {
        match self {
            Content::Status(decoder) => decoder.received(),
            Content::Data(decoder) => decoder.received(),
        }
    }
}

/// A packet in progress
///
/// The packet is done once its stop time is set, either by the terminator
/// or by the first error.
#[derive(Debug, Clone)]
pub struct Packet<T> {
    start_time: T,
    stop_time: Option<T>,
    last_byte_end: Option<T>,
    category: Category,
    error: Option<ParseError>,
    content: Option<Content>,
}

impl<T: Copy> Packet<T> {
    /// Open a packet at the time its SOH byte started
    pub fn new(start_time: T, category: Category) -> Self {
        Packet {
            start_time,
            stop_time: None,
            last_byte_end: None,
            category,
            error: None,
            content: None,
        }
    }

    /// Feed one byte following the SOH
    ///
    /// Bytes fed to a finished packet are ignored.
    pub fn feed(&mut self, byte: u8, byte_end_time: T) {
        if self.is_done() {
            return;
        }
        self.last_byte_end = Some(byte_end_time);

        let category = self.category;
        let content = self.content.get_or_insert_with(|| {
            if StatusDecoder::recognize(category, byte) {
                Content::Status(StatusDecoder::new())
            } else {
                Content::Data(DataDecoder::new(category))
            }
        });

        if let Some(err) = content.feed(byte) {
            self.error = Some(err);
            self.stop_time = Some(byte_end_time);
        }

        if content.is_complete() && self.stop_time.is_none() {
            self.stop_time = Some(byte_end_time);
        }
    }

    /// Whether the packet reached completion or an error
    pub fn is_done(&self) -> bool {
        self.stop_time.is_some()
    }

    /// Time the SOH byte started
    pub fn start_time(&self) -> T {
        self.start_time
    }

    /// Time the last byte ended, once done
    pub fn stop_time(&self) -> Option<T> {
        self.stop_time
    }

    /// End time of the last byte accepted after the SOH
    pub fn last_byte_end(&self) -> Option<T> {
        self.last_byte_end
    }

    /// Category selected by the SOH byte
    pub fn category(&self) -> Category {
        self.category
    }

    /// The error that ended the packet, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// The active sub-decoder, once the header has been seen
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Bytes received after the SOH
    pub fn received(&self) -> usize {
        self.content.as_ref().map_or(0, Content::received)
    }
}
