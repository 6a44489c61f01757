//! GOAWAY frame (type=0x7).
//!
//! ```text
//! +-+-------------------------------------------------------------+
//! |R|                  Last-Stream-ID (31)                        |
//! +-+-------------------------------------------------------------+
//! |                      Error Code (32)                          |
//! +---------------------------------------------------------------+
//! |                  Additional Debug Data (*)                    |
//! +---------------------------------------------------------------+
//! ```
//!
//! Always sent on stream 0 and declares no flags.

use bytes::{BufMut, Bytes, BytesMut};

use super::error::{BodyError, ErrorCode, FrameError};
use super::flags::{Flags, NoFlags};
use super::types::{Frame, FrameHeader, FrameType, StreamId};

/// Size of the fixed GOAWAY fields.
const GOAWAY_FIXED_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoAwayFrame {
    last_stream_id: u32,
    error_code: u32,
    additional_data: Bytes,
}

impl GoAwayFrame {
    pub fn new(last_stream_id: u32, error_code: u32) -> Self {
        Self {
            last_stream_id: last_stream_id & 0x7FFF_FFFF,
            error_code,
            additional_data: Bytes::new(),
        }
    }

    /// Highest stream ID the sender may have processed. Never has the
    /// reserved bit set.
    pub fn last_stream_id(&self) -> u32 {
        self.last_stream_id
    }

    /// The reserved bit is cleared.
    pub fn set_last_stream_id(&mut self, last_stream_id: u32) {
        self.last_stream_id = last_stream_id & 0x7FFF_FFFF;
    }

    pub fn error_code(&self) -> u32 {
        self.error_code
    }

    pub fn set_error_code(&mut self, error_code: u32) {
        self.error_code = error_code;
    }

    /// Registry name for the error code. Unregistered codes read as
    /// `INTERNAL_ERROR`.
    pub fn error(&self) -> ErrorCode {
        ErrorCode::from_u32(self.error_code)
    }

    /// Opaque debug data; empty unless the sender attached some.
    pub fn additional_data(&self) -> &Bytes {
        &self.additional_data
    }

    pub fn set_additional_data(&mut self, data: impl Into<Bytes>) {
        self.additional_data = data.into();
    }
}

impl Frame for GoAwayFrame {
    const TYPE: FrameType = FrameType::GoAway;

    type Flag = NoFlags;

    fn flags(&self) -> Flags<NoFlags> {
        Flags::empty()
    }

    fn stream_id(&self) -> StreamId {
        StreamId::CONNECTION
    }

    fn body_len(&self) -> usize {
        GOAWAY_FIXED_LEN + self.additional_data.len()
    }

    fn encode_body(&self, buf: &mut BytesMut) {
        buf.put_u32(self.last_stream_id & 0x7FFF_FFFF);
        buf.put_u32(self.error_code);
        buf.extend_from_slice(&self.additional_data);
    }

    fn decode_body(header: &FrameHeader, mut body: Bytes) -> Result<Self, FrameError> {
        if body.len() < GOAWAY_FIXED_LEN {
            return Err(FrameError::InvalidBody {
                frame_type: header.frame_type,
                reason: BodyError::TooShort {
                    expected: GOAWAY_FIXED_LEN,
                    actual: body.len(),
                },
            });
        }

        let additional_data = body.split_off(GOAWAY_FIXED_LEN);
        let last_stream_id = u32::from_be_bytes([body[0], body[1], body[2], body[3]]) & 0x7FFF_FFFF;
        let error_code = u32::from_be_bytes([body[4], body[5], body[6], body[7]]);

        Ok(Self {
            last_stream_id,
            error_code,
            additional_data,
        })
    }
}
