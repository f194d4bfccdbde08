//! Per-stream decoding statistics

use crate::error::ErrorKind;

/// Counters kept by a [`Parser`](crate::Parser) over its lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamStats {
    /// SOH bytes seen
    pub frames_started: u64,
    /// Status frames decoded
    pub status_decoded: u64,
    /// Data frames decoded
    pub data_decoded: u64,
    /// Packets that ended with an error
    pub errors: u64,
    /// Of which: non-hex payload characters
    pub non_hex_errors: u64,
    /// Of which: length or terminator errors
    pub length_errors: u64,
    /// Of which: bad header bytes
    pub header_errors: u64,
    /// Packets replaced by a new SOH before finishing
    pub abandoned: u64,
    /// Bytes dropped while no packet was open
    pub idle_bytes_dropped: u64,
    /// Bytes skipped because of a framing-layer error
    pub framing_errors_skipped: u64,
}

impl StreamStats {
    /// Record a packet that finished with an error
    pub fn record_error(&mut self, kind: ErrorKind) {
        self.errors += 1;
        match kind {
            ErrorKind::NonHexPayloadByte => self.non_hex_errors += 1,
            ErrorKind::WrongFrameLength => self.length_errors += 1,
            ErrorKind::MarkerBitMissing | ErrorKind::UnknownFieldOrFlag => {
                self.header_errors += 1
            }
            _ => {}
        }
    }

    /// Packets that reached an end, successful or not
    pub fn packets_finished(&self) -> u64 {
        self.status_decoded + self.data_decoded + self.errors
    }

    /// Share of finished packets that ended with an error (0.0 to 1.0)
    pub fn error_rate(&self) -> f32 {
        let finished = self.packets_finished();
        if finished > 0 {
            self.errors as f32 / finished as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error() {
        let mut stats = StreamStats::default();
        stats.record_error(ErrorKind::NonHexPayloadByte);
        stats.record_error(ErrorKind::MarkerBitMissing);
        stats.record_error(ErrorKind::UnknownFieldOrFlag);
        stats.record_error(ErrorKind::MalformedFloatValue);

        assert_eq!(stats.errors, 4);
        assert_eq!(stats.non_hex_errors, 1);
        assert_eq!(stats.header_errors, 2);
        assert_eq!(stats.length_errors, 0);
    }

    #[test]
    fn test_error_rate() {
        let mut stats = StreamStats::default();
        assert_eq!(stats.error_rate(), 0.0);

        stats.status_decoded = 2;
        stats.data_decoded = 1;
        stats.record_error(ErrorKind::WrongFrameLength);
        assert_eq!(stats.packets_finished(), 4);
        assert_eq!(stats.error_rate(), 0.25);
    }
}
