//! HTTP/2 frame type definitions.

use bytes::{BufMut, Bytes, BytesMut};

use super::error::{FrameError, HeaderError};
use super::flags::{Flag, Flags};
use super::goaway::GoAwayFrame;
use super::{FRAME_HEADER_SIZE, MAX_FRAME_SIZE};

/// HTTP/2 frame types (RFC 7540 Section 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameType {
    Data = 0x0,
    Headers = 0x1,
    Priority = 0x2,
    RstStream = 0x3,
    Settings = 0x4,
    PushPromise = 0x5,
    Ping = 0x6,
    GoAway = 0x7,
    WindowUpdate = 0x8,
    Continuation = 0x9,
}

impl FrameType {
    /// Try to convert a byte to a frame type.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x0 => Some(FrameType::Data),
            0x1 => Some(FrameType::Headers),
            0x2 => Some(FrameType::Priority),
            0x3 => Some(FrameType::RstStream),
            0x4 => Some(FrameType::Settings),
            0x5 => Some(FrameType::PushPromise),
            0x6 => Some(FrameType::Ping),
            0x7 => Some(FrameType::GoAway),
            0x8 => Some(FrameType::WindowUpdate),
            0x9 => Some(FrameType::Continuation),
            _ => None,
        }
    }

    /// Which stream IDs this frame type may carry.
    pub const fn stream_association(self) -> StreamAssociation {
        match self {
            FrameType::Data
            | FrameType::Headers
            | FrameType::Priority
            | FrameType::RstStream
            | FrameType::PushPromise
            | FrameType::Continuation => StreamAssociation::HasStream,
            FrameType::Settings | FrameType::Ping | FrameType::GoAway => {
                StreamAssociation::NoStream
            }
            FrameType::WindowUpdate => StreamAssociation::Either,
        }
    }
}

/// Stream scoping rule of a frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAssociation {
    /// Connection-level only; stream ID must be 0.
    NoStream,
    /// Stream-level only; stream ID must be non-zero.
    HasStream,
    /// Either is allowed.
    Either,
}

impl StreamAssociation {
    /// Association for a raw type byte. Unregistered types are unconstrained.
    pub fn for_type(frame_type: u8) -> Self {
        FrameType::from_u8(frame_type)
            .map(FrameType::stream_association)
            .unwrap_or(StreamAssociation::Either)
    }

    pub fn check(self, frame_type: u8, stream_id: StreamId) -> Result<(), HeaderError> {
        match self {
            StreamAssociation::NoStream if !stream_id.is_connection_level() => {
                Err(HeaderError::StreamIdForbidden {
                    frame_type,
                    stream_id: stream_id.value(),
                })
            }
            StreamAssociation::HasStream if stream_id.is_connection_level() => {
                Err(HeaderError::StreamIdRequired { frame_type })
            }
            _ => Ok(()),
        }
    }
}

/// Stream identifier (31 bits, high bit reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StreamId(u32);

impl StreamId {
    /// Connection-level stream (stream 0).
    pub const CONNECTION: StreamId = StreamId(0);

    /// Largest representable stream ID.
    pub const MAX: StreamId = StreamId(0x7FFF_FFFF);

    /// Create a new stream ID, masking the reserved bit.
    #[inline]
    pub const fn new(id: u32) -> Self {
        StreamId(id & 0x7FFF_FFFF)
    }

    /// Get the raw stream ID value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check if this is the connection-level stream.
    #[inline]
    pub const fn is_connection_level(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for StreamId {
    fn from(id: u32) -> Self {
        StreamId::new(id)
    }
}

/// Raw frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Payload length (24 bits).
    pub length: u32,
    /// Frame type.
    pub frame_type: u8,
    /// Frame flags.
    pub flags: u8,
    /// Stream identifier.
    pub stream_id: StreamId,
}

impl FrameHeader {
    /// Create a new frame header.
    pub fn new(frame_type: u8, flags: u8, stream_id: StreamId, length: u32) -> Self {
        Self {
            length,
            frame_type,
            flags,
            stream_id,
        }
    }

    /// Get the frame type as an enum, if known.
    pub fn get_type(&self) -> Option<FrameType> {
        FrameType::from_u8(self.frame_type)
    }

    /// Check if a flag bit is set.
    #[inline]
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Interpret the flags byte with a frame type's declared flag set.
    pub fn flags<F: Flag>(&self) -> Flags<F> {
        Flags::from_byte(self.flags)
    }

    /// Encode the header (big-endian, reserved stream bit cleared).
    ///
    /// Fails if `length` does not fit in 24 bits.
    pub fn encode(&self) -> Result<[u8; FRAME_HEADER_SIZE], FrameError> {
        if self.length > MAX_FRAME_SIZE {
            return Err(FrameError::SerializationLimit {
                size: self.length as usize,
                max: MAX_FRAME_SIZE,
            });
        }

        let mut buf = [0u8; FRAME_HEADER_SIZE];
        let length = self.length.to_be_bytes();
        buf[0..3].copy_from_slice(&length[1..4]);
        buf[3] = self.frame_type;
        buf[4] = self.flags;
        buf[5..9].copy_from_slice(&(self.stream_id.value() & 0x7FFF_FFFF).to_be_bytes());
        Ok(buf)
    }

    /// Write the encoded header to a buffer.
    #[inline]
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) -> Result<(), FrameError> {
        buf.put_slice(&self.encode()?);
        Ok(())
    }

    /// Decode the 9 header bytes at the front of `buf`.
    ///
    /// Only the header itself is examined; the body may still be incomplete.
    /// The reserved stream ID bit is ignored.
    pub fn peek(buf: &[u8]) -> Result<Self, HeaderError> {
        if buf.len() < FRAME_HEADER_SIZE {
            return Err(HeaderError::Truncated {
                available: buf.len(),
            });
        }

        // Length is 24 bits (3 bytes), big-endian
        let length = ((buf[0] as u32) << 16) | ((buf[1] as u32) << 8) | (buf[2] as u32);

        let stream_id = StreamId::new(u32::from_be_bytes([buf[5], buf[6], buf[7], buf[8]]));

        Ok(Self {
            length,
            frame_type: buf[3],
            flags: buf[4],
            stream_id,
        })
    }

    /// Parse a complete frame's header and split off its body.
    ///
    /// `frame` must hold exactly one frame: the declared length has to match
    /// the bytes that follow the header. The stream ID is checked against
    /// the stream association of the frame type.
    pub fn parse(mut frame: Bytes) -> Result<(Self, Bytes), HeaderError> {
        let header = Self::peek(&frame)?;

        let body = frame.split_off(FRAME_HEADER_SIZE);
        if body.len() != header.length as usize {
            return Err(HeaderError::LengthMismatch {
                declared: header.length,
                actual: body.len(),
            });
        }

        header.validate_stream()?;

        Ok((header, body))
    }

    /// Check the stream ID against the frame type's stream association.
    pub fn validate_stream(&self) -> Result<(), HeaderError> {
        StreamAssociation::for_type(self.frame_type).check(self.frame_type, self.stream_id)
    }
}

/// A frame type with a fixed type code, declared flags and a typed body.
///
/// Implementors supply the body codec; header layout, size limits and the
/// stream association check are shared.
pub trait Frame: Sized {
    const TYPE: FrameType;

    const STREAM_ASSOCIATION: StreamAssociation = Self::TYPE.stream_association();

    /// Flags this frame type declares.
    type Flag: Flag;

    fn flags(&self) -> Flags<Self::Flag>;

    fn stream_id(&self) -> StreamId;

    /// Encoded body length, including any padding.
    fn body_len(&self) -> usize;

    /// Append the body bytes. Exactly `body_len()` bytes are written.
    fn encode_body(&self, buf: &mut BytesMut);

    /// Parse a body. `header` has already passed length and stream checks.
    ///
    /// Short input must fail rather than be zero-filled.
    fn decode_body(header: &FrameHeader, body: Bytes) -> Result<Self, FrameError>;

    /// Build the header this frame would be sent with.
    fn header(&self) -> Result<FrameHeader, FrameError> {
        let size = self.body_len();
        if size > MAX_FRAME_SIZE as usize {
            return Err(FrameError::SerializationLimit {
                size,
                max: MAX_FRAME_SIZE,
            });
        }

        let stream_id = self.stream_id();
        Self::STREAM_ASSOCIATION.check(Self::TYPE as u8, stream_id)?;

        Ok(FrameHeader::new(
            Self::TYPE as u8,
            self.flags().to_byte(),
            stream_id,
            size as u32,
        ))
    }

    /// Append the full frame, rejecting bodies larger than `max_frame_size`.
    fn encode(&self, buf: &mut BytesMut, max_frame_size: u32) -> Result<(), FrameError> {
        let header = self.header()?;
        if header.length > max_frame_size {
            return Err(FrameError::SerializationLimit {
                size: header.length as usize,
                max: max_frame_size,
            });
        }

        buf.reserve(FRAME_HEADER_SIZE + header.length as usize);
        header.encode_into(buf)?;

        let start = buf.len();
        self.encode_body(buf);
        debug_assert_eq!(buf.len() - start, header.length as usize);

        Ok(())
    }

    /// Serialize to a standalone buffer using the protocol maximum size.
    fn serialize(&self) -> Result<Bytes, FrameError> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf, MAX_FRAME_SIZE)?;
        Ok(buf.freeze())
    }

    /// Parse exactly one frame of this type.
    fn decode(frame: Bytes) -> Result<Self, FrameError> {
        let (header, body) = FrameHeader::parse(frame)?;

        if header.frame_type != Self::TYPE as u8 {
            return Err(HeaderError::UnexpectedType {
                expected: Self::TYPE as u8,
                actual: header.frame_type,
            }
            .into());
        }

        Self::decode_body(&header, body)
    }
}

/// A frame whose body this crate does not interpret.
///
/// The flags byte and payload are kept verbatim so the frame re-encodes
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub frame_type: u8,
    pub flags: u8,
    pub stream_id: StreamId,
    pub payload: Bytes,
}

impl RawFrame {
    pub fn from_parts(header: &FrameHeader, payload: Bytes) -> Self {
        Self {
            frame_type: header.frame_type,
            flags: header.flags,
            stream_id: header.stream_id,
            payload,
        }
    }

    pub fn header(&self) -> Result<FrameHeader, FrameError> {
        let size = self.payload.len();
        if size > MAX_FRAME_SIZE as usize {
            return Err(FrameError::SerializationLimit {
                size,
                max: MAX_FRAME_SIZE,
            });
        }

        let header = FrameHeader::new(self.frame_type, self.flags, self.stream_id, size as u32);
        header.validate_stream()?;
        Ok(header)
    }
}

/// Any decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyFrame {
    GoAway(GoAwayFrame),
    /// Registered or unregistered type without a body codec here.
    Raw(RawFrame),
}

impl AnyFrame {
    /// Get the stream ID for this frame.
    pub fn stream_id(&self) -> StreamId {
        match self {
            AnyFrame::GoAway(_) => StreamId::CONNECTION,
            AnyFrame::Raw(f) => f.stream_id,
        }
    }

    /// Get the raw type code.
    pub fn frame_type(&self) -> u8 {
        match self {
            AnyFrame::GoAway(_) => FrameType::GoAway as u8,
            AnyFrame::Raw(f) => f.frame_type,
        }
    }
}

impl From<GoAwayFrame> for AnyFrame {
    fn from(frame: GoAwayFrame) -> Self {
        AnyFrame::GoAway(frame)
    }
}

impl From<RawFrame> for AnyFrame {
    fn from(frame: RawFrame) -> Self {
        AnyFrame::Raw(frame)
    }
}
