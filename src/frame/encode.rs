//! HTTP/2 frame encoding.

use bytes::{Bytes, BytesMut};
use tracing::trace;

use super::error::FrameError;
use super::goaway::GoAwayFrame;
use super::types::*;
use super::{DEFAULT_MAX_FRAME_SIZE, FRAME_HEADER_SIZE};
use crate::config::CodecConfig;

/// Frame encoder that writes HTTP/2 frames to a byte buffer.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    max_frame_size: u32,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder {
    /// Create a new frame encoder with default settings.
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

    /// Encode a frame to the buffer.
    ///
    /// Nothing is written if the frame is rejected.
    pub fn encode(&self, frame: &AnyFrame, buf: &mut BytesMut) -> Result<(), FrameError> {
        match frame {
            AnyFrame::GoAway(f) => self.encode_frame(f, buf),
            AnyFrame::Raw(f) => self.encode_raw(f, buf),
        }
    }

    /// Encode any typed frame to the buffer.
    pub fn encode_frame<F: Frame>(&self, frame: &F, buf: &mut BytesMut) -> Result<(), FrameError> {
        frame.encode(buf, self.max_frame_size)?;

        trace!(
            frame_type = F::TYPE as u8,
            flags = frame.flags().to_byte(),
            stream_id = frame.stream_id().value(),
            length = frame.body_len(),
            "encoded frame"
        );

        Ok(())
    }

    /// Encode an uninterpreted frame, keeping its flags byte verbatim.
    fn encode_raw(&self, frame: &RawFrame, buf: &mut BytesMut) -> Result<(), FrameError> {
        let header = frame.header()?;
        if header.length > self.max_frame_size {
            return Err(FrameError::SerializationLimit {
                size: header.length as usize,
                max: self.max_frame_size,
            });
        }

        buf.reserve(FRAME_HEADER_SIZE + header.length as usize);
        header.encode_into(buf)?;
        buf.extend_from_slice(&frame.payload);

        trace!(
            frame_type = header.frame_type,
            flags = header.flags,
            stream_id = header.stream_id.value(),
            length = header.length,
            "encoded frame"
        );

        Ok(())
    }
}

/// Helper functions for encoding specific frames directly.
impl FrameEncoder {
    /// Encode a GOAWAY frame directly.
    pub fn write_goaway(
        &self,
        last_stream_id: u32,
        error_code: u32,
        debug_data: &[u8],
        buf: &mut BytesMut,
    ) -> Result<(), FrameError> {
        let mut frame = GoAwayFrame::new(last_stream_id, error_code);
        frame.set_additional_data(Bytes::copy_from_slice(debug_data));
        self.encode_frame(&frame, buf)
    }
}
