//! h2frame - HTTP/2 frame codec.
//!
//! This crate provides the framing layer of HTTP/2 (RFC 7540 Section 4):
//! the 9-byte frame header, per-type flag sets, the padding prefix shared by
//! padded frame types, and the GOAWAY frame. It does no I/O and keeps no
//! connection state.
//!
//! # Architecture
//!
//! - `frame`: header layout, the [`Frame`] trait, flags, padding, GOAWAY,
//!   and the streaming [`FrameEncoder`] / [`FrameDecoder`]
//! - `config`: TOML-loadable codec settings
//!
//! Frame types without a body codec here are passed through as
//! [`RawFrame`] so a connection layer can handle or ignore them.

pub mod config;
pub mod frame;

// Re-export commonly used types
pub use config::{CodecConfig, ConfigError};
pub use frame::{
    AnyFrame, BodyError, DEFAULT_MAX_FRAME_SIZE, ErrorCode, FRAME_HEADER_SIZE, Flag, Flags, Frame,
    FrameDecoder, FrameEncoder, FrameError, FrameHeader, FrameType, GoAwayFrame, HeaderError,
    MAX_FRAME_SIZE, NoFlags, PadOnly, PadState, Padding, PaddingFlag, RawFrame, StreamAssociation,
    StreamId, decode_frame,
};
