//! HTTP/2 frame types and parsing.
//!
//! HTTP/2 frames have a common 9-byte header:
//! ```text
//! +-----------------------------------------------+
//! |                 Length (24)                   |
//! +---------------+---------------+---------------+
//! |   Type (8)    |   Flags (8)   |
//! +-+-------------+---------------+-------------------------------+
//! |R|                 Stream Identifier (31)                      |
//! +=+=============================================================+
//! |                   Frame Payload (0...)                      ...
//! +---------------------------------------------------------------+
//! ```

mod decode;
mod encode;
mod error;
pub mod flags;
mod goaway;
pub mod padding;
mod types;

pub use decode::{FrameDecoder, decode_frame};
pub use encode::FrameEncoder;
pub use error::{BodyError, ErrorCode, FrameError, HeaderError};
pub use flags::{Flag, Flags, NoFlags, PadOnly};
pub use goaway::GoAwayFrame;
pub use padding::{PadState, Padding, PaddingFlag, strip_padding, write_padding};
pub use types::*;

/// Maximum frame size allowed by RFC 7540 (2^24 - 1).
pub const MAX_FRAME_SIZE: u32 = 16_777_215;

/// Default maximum frame size (16 KB).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16_384;

/// Smallest value a peer may advertise for SETTINGS_MAX_FRAME_SIZE.
pub const MIN_MAX_FRAME_SIZE: u32 = 16_384;

/// Frame header size in bytes.
pub const FRAME_HEADER_SIZE: usize = 9;
