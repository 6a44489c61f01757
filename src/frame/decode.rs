//! HTTP/2 frame decoding.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use super::error::{FrameError, HeaderError};
use super::goaway::GoAwayFrame;
use super::types::*;
use super::{DEFAULT_MAX_FRAME_SIZE, FRAME_HEADER_SIZE};
use crate::config::CodecConfig;

/// Decode exactly one complete frame.
///
/// The header is validated first (length and stream association), then the
/// body goes to the concrete parser for its type. Types without a body codec
/// come back as [`AnyFrame::Raw`].
pub fn decode_frame(frame: Bytes) -> Result<AnyFrame, FrameError> {
    let (header, body) = FrameHeader::parse(frame)?;
    parse_body(&header, body)
}

fn parse_body(header: &FrameHeader, body: Bytes) -> Result<AnyFrame, FrameError> {
    match header.get_type() {
        Some(FrameType::GoAway) => GoAwayFrame::decode_body(header, body).map(AnyFrame::GoAway),
        _ => Ok(AnyFrame::Raw(RawFrame::from_parts(header, body))),
    }
}

/// Frame decoder that parses HTTP/2 frames from a byte buffer.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    max_frame_size: u32,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a new frame decoder with default settings.
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            max_frame_size: config.max_frame_size(),
        }
    }

    /// Set the maximum frame size.
    pub fn set_max_frame_size(&mut self, size: u32) {
        self.max_frame_size = size;
    }

    /// Get the maximum frame size.
    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Try to decode a frame from the buffer.
    ///
    /// Returns `Ok(Some(frame))` if a complete frame was decoded,
    /// `Ok(None)` if more data is needed, or `Err` on protocol error.
    ///
    /// On success, the consumed bytes are removed from the buffer. A frame
    /// that fails body validation is removed as well; an oversized header is
    /// rejected before anything is consumed.
    pub fn decode(&self, buf: &mut BytesMut) -> Result<Option<AnyFrame>, FrameError> {
        // Need at least the header
        if buf.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        let header = FrameHeader::peek(buf)?;

        // Check frame size limit
        if header.length > self.max_frame_size {
            debug!(
                frame_type = header.frame_type,
                length = header.length,
                max = self.max_frame_size,
                "rejecting oversized frame"
            );
            return Err(HeaderError::TooLarge {
                size: header.length,
                max: self.max_frame_size,
            }
            .into());
        }

        // Check if we have the full frame
        let total_len = FRAME_HEADER_SIZE + header.length as usize;
        if buf.len() < total_len {
            return Ok(None);
        }

        let frame = buf.split_to(total_len).freeze();

        trace!(
            frame_type = header.frame_type,
            flags = header.flags,
            stream_id = header.stream_id.value(),
            length = header.length,
            "decoded frame header"
        );

        decode_frame(frame).map(Some).inspect_err(|e| {
            debug!(
                frame_type = header.frame_type,
                stream_id = header.stream_id.value(),
                error = %e,
                "rejecting frame"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::BodyError;

    #[test]
    fn test_decoder_default() {
        let decoder = FrameDecoder::default();
        assert_eq!(decoder.max_frame_size(), DEFAULT_MAX_FRAME_SIZE);

        let mut buf = BytesMut::new();
        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decoder_set_max_frame_size() {
        let mut decoder = FrameDecoder::new();
        decoder.set_max_frame_size(32768);

        // Frame exceeds default but fits in 32768
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x50, 0x00, // Length: 20480
            0x00, // Type: DATA
            0x00, // Flags: none
            0x00, 0x00, 0x00, 0x01, // Stream ID: 1
        ]);
        buf.extend_from_slice(&vec![0u8; 20480]);

        let frame = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.frame_type(), 0x00);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_frame_too_large() {
        let decoder = FrameDecoder::new(); // Default max is 16384

        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x50, 0x00, // Length: 20480 (exceeds 16384)
            0x00, // Type: DATA
            0x00, // Flags: none
            0x00, 0x00, 0x00, 0x01, // Stream ID: 1
        ]);

        let err = decoder.decode(&mut buf).unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedHeader(HeaderError::TooLarge {
                size: 20480,
                max: 16384
            })
        );
        assert_eq!(buf.len(), FRAME_HEADER_SIZE);
    }

    #[test]
    fn test_decode_incomplete_header() {
        let decoder = FrameDecoder::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x00, 0x00]); // Only 2 bytes, need 9

        let result = decoder.decode(&mut buf).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_decode_incomplete_body() {
        let decoder = FrameDecoder::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x00, 0x08, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, // header
            0x00, 0x00, 0x00, 0x01, // half the body
        ]);

        assert!(decoder.decode(&mut buf).unwrap().is_none());
        assert_eq!(buf.len(), 13);

        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        let frame = decoder.decode(&mut buf).unwrap().unwrap();
        match frame {
            AnyFrame::GoAway(goaway) => {
                assert_eq!(goaway.last_stream_id(), 1);
                assert_eq!(goaway.error_code(), 0);
            }
            _ => panic!("Expected GOAWAY frame"),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_goaway() {
        let mut buf = BytesMut::new();

        buf.extend_from_slice(&[
            0x00, 0x00, 0x08, // Length: 8
            0x07, // Type: GOAWAY
            0x00, // Flags: none
            0x00, 0x00, 0x00, 0x00, // Stream ID: 0
            0x00, 0x00, 0x00, 0x05, // Last stream ID: 5
            0x00, 0x00, 0x00, 0x02, // Error code: INTERNAL_ERROR
        ]);

        let decoder = FrameDecoder::new();
        let frame = decoder.decode(&mut buf).unwrap().unwrap();

        match frame {
            AnyFrame::GoAway(goaway) => {
                assert_eq!(goaway.last_stream_id(), 5);
                assert_eq!(goaway.error_code(), 2);
                assert!(goaway.additional_data().is_empty());
            }
            _ => panic!("Expected GOAWAY frame"),
        }
    }

    #[test]
    fn test_decode_goaway_too_short_consumes_frame() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x00, 0x04, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
        ]);

        let decoder = FrameDecoder::new();
        let err = decoder.decode(&mut buf).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidBody {
                frame_type: 0x07,
                reason: BodyError::TooShort {
                    expected: 8,
                    actual: 4
                }
            }
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_ping_on_non_zero_stream() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x00, 0x08, // Length: 8
            0x06, // Type: PING
            0x00, // Flags: none
            0x00, 0x00, 0x00, 0x01, // Stream ID: 1 (invalid)
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);

        let decoder = FrameDecoder::new();
        let err = decoder.decode(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::MalformedHeader(HeaderError::StreamIdForbidden {
                frame_type: 0x06,
                stream_id: 1
            })
        ));
    }

    #[test]
    fn test_decode_unknown_type_is_raw() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[
            0x00, 0x00, 0x03, // Length: 3
            0xfa, // Type: unregistered
            0x81, // Flags
            0x80, 0x00, 0x00, 0x07, // Stream ID: 7, reserved bit set
            b'a', b'b', b'c',
        ]);

        let decoder = FrameDecoder::new();
        let frame = decoder.decode(&mut buf).unwrap().unwrap();

        match frame {
            AnyFrame::Raw(raw) => {
                assert_eq!(raw.frame_type, 0xfa);
                assert_eq!(raw.flags, 0x81);
                assert_eq!(raw.stream_id.value(), 7);
                assert_eq!(&raw.payload[..], b"abc");
            }
            _ => panic!("Expected raw frame"),
        }
    }

    #[test]
    fn test_decode_multiple_frames() {
        let mut buf = BytesMut::new();
        // SETTINGS ACK
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00]);
        // GOAWAY
        buf.extend_from_slice(&[
            0x00, 0x00, 0x08, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00,
            0x00, 0x00, 0x00,
        ]);

        let decoder = FrameDecoder::new();
        let first = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(first.frame_type(), 0x04);
        assert!(first.stream_id().is_connection_level());

        let second = decoder.decode(&mut buf).unwrap().unwrap();
        assert!(matches!(second, AnyFrame::GoAway(ref g) if g.last_stream_id() == 3));

        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_frame_exact_bytes() {
        let frame = decode_frame(Bytes::from_static(&[
            0x00, 0x00, 0x09, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x00,
            0x00, 0x00, 0x02, 0x21,
        ]))
        .unwrap();

        match frame {
            AnyFrame::GoAway(goaway) => assert_eq!(&goaway.additional_data()[..], b"!"),
            _ => panic!("Expected GOAWAY frame"),
        }
    }

    #[test]
    fn test_decode_frame_truncated_header() {
        let err = decode_frame(Bytes::from_static(&[0x00, 0x00, 0x08, 0x07])).unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedHeader(HeaderError::Truncated { available: 4 })
        );
    }

    #[test]
    fn test_decoder_with_config() {
        let config = CodecConfig::new(65_536).unwrap();
        let decoder = FrameDecoder::with_config(&config);
        assert_eq!(decoder.max_frame_size(), 65_536);
    }
}
