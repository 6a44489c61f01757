//! Pad-length prefix shared by padded frame types.
//!
//! DATA, HEADERS and PUSH_PROMISE bodies may start with a one byte pad
//! length when the `PADDED` flag is set:
//!
//! ```text
//! +---------------+
//! |Pad Length? (8)|
//! +---------------+-----------------------------------------------+
//! |                  Type-specific fields (*)                   ...
//! +---------------------------------------------------------------+
//! |                           Padding (*)                       ...
//! +---------------------------------------------------------------+
//! ```
//!
//! [`Padding`] owns only the prefix. Where the pad bytes sit depends on the
//! owning frame's other fields, so the owner writes them with
//! [`write_padding`] and removes them with [`strip_padding`].

use bytes::{BufMut, Bytes};

use super::error::{BodyError, FrameError};
use super::flags::{Flag, Flags, PadOnly};

/// A flag set that declares `PADDED`.
pub trait PaddingFlag: Flag {
    const PADDED: Self;
}

impl PaddingFlag for PadOnly {
    const PADDED: Self = PadOnly::Padded;
}

/// Outcome of [`Padding::parse_prefix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadState {
    Padded,
    NotPadded,
}

/// Pad length carried by a padded frame.
///
/// The length is only meaningful while the owner's `PADDED` flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    length: u8,
}

impl Padding {
    pub const fn new(length: u8) -> Self {
        Self { length }
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn set_length(&mut self, length: u8) {
        self.length = length;
    }

    /// Bytes the prefix occupies for the given flags (0 or 1).
    #[inline]
    pub fn prefix_len<F: PaddingFlag>(&self, flags: Flags<F>) -> usize {
        usize::from(flags.has(F::PADDED))
    }

    /// Bytes the prefix and trailing padding occupy together.
    pub fn overhead<F: PaddingFlag>(&self, flags: Flags<F>) -> usize {
        if flags.has(F::PADDED) {
            1 + self.length as usize
        } else {
            0
        }
    }

    /// Write the pad-length byte if `PADDED` is set.
    ///
    /// Returns the number of bytes written. A nonzero length with `PADDED`
    /// unset writes nothing.
    pub fn serialize_prefix<F: PaddingFlag, B: BufMut>(
        &self,
        flags: Flags<F>,
        buf: &mut B,
    ) -> usize {
        if flags.has(F::PADDED) {
            buf.put_u8(self.length);
            1
        } else {
            0
        }
    }

    /// Read the pad-length byte if `PADDED` is set.
    ///
    /// With `PADDED` unset the body is returned untouched and the stored
    /// length is left as it was. On error the stored length is unchanged.
    pub fn parse_prefix<F: PaddingFlag>(
        &mut self,
        frame_type: u8,
        flags: Flags<F>,
        mut body: Bytes,
    ) -> Result<(PadState, Bytes), FrameError> {
        if !flags.has(F::PADDED) {
            return Ok((PadState::NotPadded, body));
        }

        if body.is_empty() {
            return Err(FrameError::InvalidBody {
                frame_type,
                reason: BodyError::MissingPadLength,
            });
        }

        self.length = body[0];
        let rest = body.split_off(1);
        Ok((PadState::Padded, rest))
    }
}

/// Append `padding.length()` zero bytes when the frame is padded.
pub fn write_padding<F: PaddingFlag, B: BufMut>(padding: &Padding, flags: Flags<F>, buf: &mut B) {
    if flags.has(F::PADDED) {
        buf.put_bytes(0, padding.length() as usize);
    }
}

/// Remove trailing pad bytes from the remainder of a padded body.
///
/// Pad content is not checked. Fails if the padding is longer than what is
/// left of the body.
pub fn strip_padding(
    frame_type: u8,
    state: PadState,
    padding: &Padding,
    body: Bytes,
) -> Result<Bytes, FrameError> {
    if state == PadState::NotPadded {
        return Ok(body);
    }

    let pad_length = padding.length();
    if pad_length as usize > body.len() {
        return Err(FrameError::InvalidBody {
            frame_type,
            reason: BodyError::PaddingOverflow {
                pad_length,
                available: body.len(),
            },
        });
    }

    let data_len = body.len() - pad_length as usize;
    Ok(body.slice(..data_len))
}
