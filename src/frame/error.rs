//! HTTP/2 frame errors.

use std::fmt;

/// HTTP/2 error codes (RFC 7540 Section 7).
///
/// GOAWAY carries the raw 32-bit value; this registry only gives names to
/// the codes defined by the RFC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    /// Graceful shutdown.
    NoError = 0x0,
    /// Protocol error detected.
    ProtocolError = 0x1,
    /// Implementation fault.
    InternalError = 0x2,
    /// Flow control limits exceeded.
    FlowControlError = 0x3,
    /// Settings not acknowledged in time.
    SettingsTimeout = 0x4,
    /// Frame received for closed stream.
    StreamClosed = 0x5,
    /// Frame size incorrect.
    FrameSizeError = 0x6,
    /// Stream not processed.
    RefusedStream = 0x7,
    /// Stream cancelled.
    Cancel = 0x8,
    /// Compression state not updated.
    CompressionError = 0x9,
    /// TCP connection error.
    ConnectError = 0xa,
    /// Processing capacity exceeded.
    EnhanceYourCalm = 0xb,
    /// Negotiated TLS requirements not met.
    InadequateSecurity = 0xc,
    /// HTTP/1.1 required.
    Http11Required = 0xd,
}

impl ErrorCode {
    pub fn from_u32(code: u32) -> Self {
        match code {
            0x0 => ErrorCode::NoError,
            0x1 => ErrorCode::ProtocolError,
            0x2 => ErrorCode::InternalError,
            0x3 => ErrorCode::FlowControlError,
            0x4 => ErrorCode::SettingsTimeout,
            0x5 => ErrorCode::StreamClosed,
            0x6 => ErrorCode::FrameSizeError,
            0x7 => ErrorCode::RefusedStream,
            0x8 => ErrorCode::Cancel,
            0x9 => ErrorCode::CompressionError,
            0xa => ErrorCode::ConnectError,
            0xb => ErrorCode::EnhanceYourCalm,
            0xc => ErrorCode::InadequateSecurity,
            0xd => ErrorCode::Http11Required,
            // Unknown error codes are treated as INTERNAL_ERROR
            _ => ErrorCode::InternalError,
        }
    }

    pub fn to_u32(self) -> u32 {
        self as u32
    }

    /// Check whether a raw code is one of the registered values.
    pub fn is_registered(code: u32) -> bool {
        code <= ErrorCode::Http11Required as u32
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> u32 {
        code.to_u32()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NoError => write!(f, "NO_ERROR"),
            ErrorCode::ProtocolError => write!(f, "PROTOCOL_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
            ErrorCode::FlowControlError => write!(f, "FLOW_CONTROL_ERROR"),
            ErrorCode::SettingsTimeout => write!(f, "SETTINGS_TIMEOUT"),
            ErrorCode::StreamClosed => write!(f, "STREAM_CLOSED"),
            ErrorCode::FrameSizeError => write!(f, "FRAME_SIZE_ERROR"),
            ErrorCode::RefusedStream => write!(f, "REFUSED_STREAM"),
            ErrorCode::Cancel => write!(f, "CANCEL"),
            ErrorCode::CompressionError => write!(f, "COMPRESSION_ERROR"),
            ErrorCode::ConnectError => write!(f, "CONNECT_ERROR"),
            ErrorCode::EnhanceYourCalm => write!(f, "ENHANCE_YOUR_CALM"),
            ErrorCode::InadequateSecurity => write!(f, "INADEQUATE_SECURITY"),
            ErrorCode::Http11Required => write!(f, "HTTP_1_1_REQUIRED"),
        }
    }
}

/// Frame parsing/encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The 9-byte header is truncated or inconsistent with the body.
    #[error("malformed frame header: {0}")]
    MalformedHeader(HeaderError),
    /// The body is too short for the type's mandatory fields.
    #[error("invalid body for frame type 0x{frame_type:02x}: {reason}")]
    InvalidBody { frame_type: u8, reason: BodyError },
    /// A flag name that the frame type does not declare.
    #[error("unknown flag {name:?}")]
    UnknownFlag { name: String },
    /// The body does not fit in a single frame.
    #[error("frame body of {size} bytes exceeds maximum {max}")]
    SerializationLimit { size: usize, max: u32 },
}

impl FrameError {
    /// The error code a peer would report for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            FrameError::MalformedHeader(HeaderError::Truncated { .. })
            | FrameError::MalformedHeader(HeaderError::LengthMismatch { .. })
            | FrameError::MalformedHeader(HeaderError::TooLarge { .. })
            | FrameError::InvalidBody {
                reason: BodyError::TooShort { .. },
                ..
            }
            | FrameError::SerializationLimit { .. } => ErrorCode::FrameSizeError,
            FrameError::InvalidBody { .. } => ErrorCode::ProtocolError,
            FrameError::MalformedHeader(_) => ErrorCode::ProtocolError,
            FrameError::UnknownFlag { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<HeaderError> for FrameError {
    fn from(err: HeaderError) -> Self {
        FrameError::MalformedHeader(err)
    }
}

/// Reasons a frame header is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("need 9 header bytes, got {available}")]
    Truncated { available: usize },
    #[error("declared length {declared} but {actual} body bytes supplied")]
    LengthMismatch { declared: u32, actual: usize },
    #[error("frame size {size} exceeds maximum {max}")]
    TooLarge { size: u32, max: u32 },
    #[error("frame type 0x{frame_type:02x} invalid on stream {stream_id}")]
    StreamIdForbidden { frame_type: u8, stream_id: u32 },
    #[error("frame type 0x{frame_type:02x} requires non-zero stream ID")]
    StreamIdRequired { frame_type: u8 },
    #[error("expected frame type 0x{expected:02x}, got 0x{actual:02x}")]
    UnexpectedType { expected: u8, actual: u8 },
}

/// Reasons a frame body is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BodyError {
    #[error("expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("PADDED flag set but pad length byte missing")]
    MissingPadLength,
    #[error("padding length {pad_length} exceeds remaining {available} bytes")]
    PaddingOverflow { pad_length: u8, available: usize },
}
