//! Error types for air data frame decoding

use thiserror::Error;

/// Result type for air data operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while decoding a single packet
///
/// Every error is local to the packet that triggered it. The stream parser
/// reports it and carries on with the next frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// A payload byte is outside `0-9A-F`
    #[error("Non hexadecimal value detected: {byte:#04x} at position {position}")]
    NonHexPayloadByte { byte: u8, position: usize },

    /// A byte arrived past the frame end, or the terminator is missing
    #[error("Wrong message length: byte {byte:#04x} at position {position}")]
    WrongFrameLength { byte: u8, position: usize },

    /// The status payload could not be turned into a 16-bit value
    #[error("Could not parse status msg: {0}")]
    MalformedStatusValue(String),

    /// The data payload could not be turned into a 32-bit float
    #[error("Could not convert hex value in float: {0}")]
    MalformedFloatValue(String),

    /// Data header without the marker bit
    #[error("Marker bit not set in header {0:#04x}")]
    MarkerBitMissing(u8),

    /// Flag or label bits unknown for the active category
    #[error("Data ID not valid: header {header:#04x} for SOH {category:#04x}")]
    UnknownFieldOrFlag { header: u8, category: u8 },

    /// An unfinished packet was replaced by a new frame start
    #[error("Packet abandoned after {received} bytes")]
    PacketAbandoned { received: usize },
}

/// Fieldless discriminant of [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    NonHexPayloadByte,
    WrongFrameLength,
    MalformedStatusValue,
    MalformedFloatValue,
    MarkerBitMissing,
    UnknownFieldOrFlag,
    PacketAbandoned,
}

impl ParseError {
    /// Create a new NonHexPayloadByte error
    pub fn non_hex(byte: u8, position: usize) -> Self {
        ParseError::NonHexPayloadByte { byte, position }
    }

    /// Create a new WrongFrameLength error
    pub fn wrong_length(byte: u8, position: usize) -> Self {
        ParseError::WrongFrameLength { byte, position }
    }

    /// Create a new MalformedStatusValue error
    pub fn malformed_status(msg: impl Into<String>) -> Self {
        ParseError::MalformedStatusValue(msg.into())
    }

    /// Create a new MalformedFloatValue error
    pub fn malformed_float(msg: impl Into<String>) -> Self {
        ParseError::MalformedFloatValue(msg.into())
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::NonHexPayloadByte { .. } => ErrorKind::NonHexPayloadByte,
            ParseError::WrongFrameLength { .. } => ErrorKind::WrongFrameLength,
            ParseError::MalformedStatusValue(_) => ErrorKind::MalformedStatusValue,
            ParseError::MalformedFloatValue(_) => ErrorKind::MalformedFloatValue,
            ParseError::MarkerBitMissing(_) => ErrorKind::MarkerBitMissing,
            ParseError::UnknownFieldOrFlag { .. } => ErrorKind::UnknownFieldOrFlag,
            ParseError::PacketAbandoned { .. } => ErrorKind::PacketAbandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::non_hex(b'G', 3);
        assert_eq!(
            err.to_string(),
            "Non hexadecimal value detected: 0x47 at position 3"
        );

        let err = ParseError::UnknownFieldOrFlag {
            header: 0x8E,
            category: 0x03,
        };
        assert!(err.to_string().starts_with("Data ID not valid"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ParseError::wrong_length(b'0', 7).kind(),
            ErrorKind::WrongFrameLength
        );
        assert_eq!(
            ParseError::malformed_float("odd").kind(),
            ErrorKind::MalformedFloatValue
        );
        assert_eq!(
            ParseError::MarkerBitMissing(0x01).kind(),
            ErrorKind::MarkerBitMissing
        );
    }
}
