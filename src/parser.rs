//! Stream-level parser for the air data protocol

use tracing::{debug, trace};

use crate::core::{Category, Flag, TimedByte};
use crate::error::{ErrorKind, ParseError};
use crate::packet::{Content, Packet};
use crate::stats::StreamStats;

/// A decoded record, emitted when a packet finishes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decoded<T> {
    /// The packet ended with an error
    Error {
        kind: ErrorKind,
        message: String,
        start_time: T,
        stop_time: T,
    },
    /// A status word
    Status {
        value: u16,
        start_time: T,
        stop_time: T,
    },
    /// A sensor value; NaN and infinities are passed through untouched
    Data {
        category: Category,
        label: String,
        flag: Flag,
        value: f32,
        start_time: T,
        stop_time: T,
    },
}

impl<T: Copy> Decoded<T> {
    fn error(err: &ParseError, start_time: T, stop_time: T) -> Self {
        Decoded::Error {
            kind: err.kind(),
            message: err.to_string(),
            start_time,
            stop_time,
        }
    }

    /// Build the record for a finished packet
    fn from_packet(packet: &Packet<T>) -> Option<Self> {
        let start_time = packet.start_time();
        let stop_time = packet.stop_time()?;

        if let Some(err) = packet.error() {
            return Some(Decoded::error(err, start_time, stop_time));
        }

        match packet.content()? {
            Content::Status(status) => Some(Decoded::Status {
                value: status.value()?,
                start_time,
                stop_time,
            }),
            Content::Data(data) => Some(Decoded::Data {
                category: data.category(),
                label: data.label()?.to_string(),
                flag: data.flag()?,
                value: data.value()?,
                start_time,
                stop_time,
            }),
        }
    }

    /// Time the packet's SOH byte started
    pub fn start_time(&self) -> T {
        match self {
            Decoded::Error { start_time, .. }
            | Decoded::Status { start_time, .. }
            | Decoded::Data { start_time, .. } => *start_time,
        }
    }

    /// Time the packet's last byte ended
    pub fn stop_time(&self) -> T {
        match self {
            Decoded::Error { stop_time, .. }
            | Decoded::Status { stop_time, .. }
            | Decoded::Data { stop_time, .. } => *stop_time,
        }
    }

    /// Whether this record reports an error
    pub fn is_error(&self) -> bool {
        matches!(self, Decoded::Error { .. })
    }
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Emit a `PacketAbandoned` error when a new SOH cuts a packet short
    ///
    /// The record spans from the old SOH to the end of its last byte, or to
    /// the new SOH when nothing followed the old one.
    pub report_abandoned: bool,
    /// Ignore bytes the framing layer flagged as errored
    pub skip_framing_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            report_abandoned: false,
            skip_framing_errors: true,
        }
    }
}

/// Air data stream parser
///
/// Feed bytes in arrival order; at most one record comes back per byte.
/// Exactly one packet is open at a time, and any SOH byte opens a new one.
#[derive(Debug, Clone)]
pub struct Parser<T> {
    config: ParserConfig,
    current: Option<Packet<T>>,
    stats: StreamStats,
}

impl<T: Copy> Parser<T> {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with the given configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Parser {
            config,
            current: None,
            stats: StreamStats::default(),
        }
    }

    /// Process one byte, returning a record if a packet finished
    pub fn feed(&mut self, byte: TimedByte<T>) -> Option<Decoded<T>> {
        if byte.framing_error && self.config.skip_framing_errors {
            trace!(byte = byte.value, "skipping byte with framing error");
            self.stats.framing_errors_skipped += 1;
            return None;
        }

        if let Some(category) = Category::from_byte(byte.value) {
            return self.start_packet(category, byte.start);
        }

        let Some(packet) = self.current.as_mut() else {
            trace!(byte = byte.value, "no open packet, dropping byte");
            self.stats.idle_bytes_dropped += 1;
            return None;
        };

        packet.feed(byte.value, byte.end);
        if !packet.is_done() {
            return None;
        }

        let packet = self.current.take()?;
        let record = Decoded::from_packet(&packet)?;
        match &record {
            Decoded::Error { kind, message, .. } => {
                debug!(category = %packet.category(), ?kind, "{message}");
                self.stats.record_error(*kind);
            }
            Decoded::Status { value, .. } => {
                trace!(value, "status frame");
                self.stats.status_decoded += 1;
            }
            Decoded::Data { label, value, .. } => {
                trace!(%label, value, "data frame");
                self.stats.data_decoded += 1;
            }
        }
        Some(record)
    }

    /// Process a sequence of bytes, collecting every record produced
    pub fn feed_all<I>(&mut self, bytes: I) -> Vec<Decoded<T>>
    where
        I: IntoIterator<Item = TimedByte<T>>,
    {
        bytes.into_iter().filter_map(|byte| self.feed(byte)).collect()
    }

    fn start_packet(&mut self, category: Category, start_time: T) -> Option<Decoded<T>> {
        trace!(%category, "frame start");
        self.stats.frames_started += 1;

        let abandoned = self.current.replace(Packet::new(start_time, category))?;
        let received = abandoned.received();
        debug!(category = %abandoned.category(), received, "packet abandoned by new frame start");
        self.stats.abandoned += 1;

        if !self.config.report_abandoned {
            return None;
        }
        let err = ParseError::PacketAbandoned { received };
        self.stats.record_error(err.kind());
        let stop_time = abandoned.last_byte_end().unwrap_or(start_time);
        Some(Decoded::error(&err, abandoned.start_time(), stop_time))
    }

    /// Drop any open packet
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Whether no packet is open
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Counters gathered so far
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl<T: Copy> Default for Parser<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Parser`]
pub struct ParserBuilder {
    config: ParserConfig,
}

impl ParserBuilder {
    /// Create a new parser builder
    pub fn new() -> Self {
        ParserBuilder {
            config: ParserConfig::default(),
        }
    }

    /// Report packets cut short by a new frame start
    pub fn report_abandoned(mut self, report: bool) -> Self {
        self.config.report_abandoned = report;
        self
    }

    /// Skip bytes flagged by the framing layer
    pub fn skip_framing_errors(mut self, skip: bool) -> Self {
        self.config.skip_framing_errors = skip;
        self
    }

    /// Build the parser
    pub fn build<T: Copy>(self) -> Parser<T> {
        Parser::with_config(self.config)
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::FrameEncoder;

    /// Timestamp each byte 10 ticks apart, starting at `t0`
    fn timed(bytes: &[u8], t0: u64) -> Vec<TimedByte<u64>> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, byte)| {
                let start = t0 + 10 * i as u64;
                TimedByte::new(*byte, start, start + 8)
            })
            .collect()
    }

    #[test]
    fn test_status_record() {
        let mut parser = Parser::new();
        let records = parser.feed_all(timed(b"\x01\x8F002A\r", 0));

        assert_eq!(
            records,
            vec![Decoded::Status {
                value: 42,
                start_time: 0,
                stop_time: 68,
            }]
        );
        assert!(parser.is_idle());
        assert_eq!(parser.stats().status_decoded, 1);
    }

    #[test]
    fn test_data_record() {
        let mut parser = Parser::new();
        let records = parser.feed_all(timed(b"\x03\x940000803F\r", 1000));

        // 0x0000803F is the little-endian image of 1.0; on the wire it
        // decodes as a tiny denormal
        assert_eq!(records.len(), 1);
        match &records[0] {
            Decoded::Data {
                category,
                label,
                flag,
                value,
                start_time,
                stop_time,
            } => {
                assert_eq!(*category, Category::Soh3);
                assert_eq!(label, "dPaos");
                assert_eq!(*flag, Flag::Above);
                assert_eq!(*value, f32::from_be_bytes([0x00, 0x00, 0x80, 0x3F]));
                assert_eq!(*start_time, 1000);
                assert_eq!(*stop_time, 1108);
            }
            other => panic!("expected data record, got {other:?}"),
        }
    }

    #[test]
    fn test_error_record() {
        let mut parser = Parser::new();
        let records = parser.feed_all(timed(b"\x01\x81\x7F", 0));

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert!(record.is_error());
        assert_eq!(record.start_time(), 0);
        assert_eq!(record.stop_time(), 28);
        match record {
            Decoded::Error { kind, message, .. } => {
                assert_eq!(*kind, ErrorKind::NonHexPayloadByte);
                assert!(message.starts_with("Non hexadecimal value detected"));
            }
            other => panic!("expected error record, got {other:?}"),
        }
        assert_eq!(parser.stats().errors, 1);
    }

    #[test]
    fn test_marker_bit_missing_ends_at_header() {
        let mut parser = Parser::new();
        let records = parser.feed_all(timed(b"\x02\x41", 0));
        assert_eq!(records.len(), 1);
        assert!(matches!(
            records[0],
            Decoded::Error {
                kind: ErrorKind::MarkerBitMissing,
                stop_time: 18,
                ..
            }
        ));
    }

    #[test]
    fn test_idle_bytes_dropped() {
        let mut parser = Parser::<u64>::new();
        assert!(parser.feed_all(timed(b"0123\r\x8F", 0)).is_empty());
        assert_eq!(parser.stats().idle_bytes_dropped, 6);
        assert_eq!(parser.stats().frames_started, 0);
    }

    #[test]
    fn test_new_soh_abandons_silently() {
        let mut parser = Parser::new();
        let mut bytes = b"\x01\x8500".to_vec();
        bytes.extend(FrameEncoder::status(7));
        let records = parser.feed_all(timed(&bytes, 0));

        assert_eq!(
            records,
            vec![Decoded::Status {
                value: 7,
                start_time: 40,
                stop_time: 108,
            }]
        );
        assert_eq!(parser.stats().abandoned, 1);
        assert_eq!(parser.stats().errors, 0);
    }

    #[test]
    fn test_new_soh_abandon_reported() {
        let mut parser = ParserBuilder::new().report_abandoned(true).build();
        let records = parser.feed_all(timed(b"\x05\x81AB\x02", 0));

        assert_eq!(records.len(), 1);
        assert!(matches!(
            records[0],
            Decoded::Error {
                kind: ErrorKind::PacketAbandoned,
                start_time: 0,
                stop_time: 38,
                ..
            }
        ));
        assert!(!parser.is_idle());
    }

    #[test]
    fn test_abandoned_bare_soh_spans_to_next_soh() {
        let mut parser = ParserBuilder::new().report_abandoned(true).build();
        let records = parser.feed_all(timed(b"\x01\x02", 0));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_time(), 0);
        assert_eq!(records[0].stop_time(), 10);
    }

    #[test]
    fn test_soh_without_packet_is_not_abandon() {
        let mut parser = ParserBuilder::new().report_abandoned(true).build::<u64>();
        assert!(parser.feed_all(timed(b"\x01", 0)).is_empty());
        assert_eq!(parser.stats().abandoned, 0);
    }

    #[test]
    fn test_framing_errors() {
        let byte = TimedByte::with_framing_error(0x01, 0u64, 8);

        let mut parser = Parser::new();
        assert_eq!(parser.feed(byte), None);
        assert!(parser.is_idle());
        assert_eq!(parser.stats().framing_errors_skipped, 1);

        let mut parser = ParserBuilder::new().skip_framing_errors(false).build();
        assert_eq!(parser.feed(byte), None);
        assert!(!parser.is_idle());
    }

    #[test]
    fn test_reset() {
        let mut parser = Parser::new();
        parser.feed_all(timed(b"\x01\x8F00", 0));
        assert!(!parser.is_idle());

        parser.reset();
        assert!(parser.is_idle());
        assert!(parser.feed_all(timed(b"2A\r", 100)).is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let parser = ParserBuilder::default().build::<u64>();
        assert_eq!(parser.config(), &ParserConfig::default());
        assert!(!parser.config().report_abandoned);
        assert!(parser.config().skip_framing_errors);
    }
}
