//! Per-frame-type flag sets.
//!
//! Each frame type declares the flags it understands as a closed enum
//! implementing [`Flag`]. A [`Flags`] value only ever holds bits from that
//! enum, so asking a GOAWAY frame for `PADDED` does not compile. The
//! name-based accessors exist for callers that only have a string, and those
//! fail with [`FrameError::UnknownFlag`].

use std::fmt;
use std::marker::PhantomData;

use super::error::FrameError;

/// Bit value of the `PADDED` flag on every frame type that declares it.
pub const PADDED: u8 = 0x8;

/// A flag declared by some frame type.
pub trait Flag: Copy + Eq + fmt::Debug + 'static {
    /// Every flag the frame type declares.
    const ALL: &'static [Self];

    /// Bit value in the header flags byte.
    fn bit(self) -> u8;

    /// Wire name, e.g. `PADDED`.
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|flag| flag.name() == name)
    }

    /// Union of all declared bits.
    fn declared_mask() -> u8 {
        Self::ALL.iter().fold(0, |mask, flag| mask | flag.bit())
    }
}

/// Flag set for frame types that declare no flags (e.g. GOAWAY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFlags {}

impl Flag for NoFlags {
    const ALL: &'static [Self] = &[];

    fn bit(self) -> u8 {
        match self {}
    }

    fn name(self) -> &'static str {
        match self {}
    }
}

/// Flag set for frame types that declare only `PADDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadOnly {
    Padded,
}

impl Flag for PadOnly {
    const ALL: &'static [Self] = &[PadOnly::Padded];

    fn bit(self) -> u8 {
        match self {
            PadOnly::Padded => PADDED,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PadOnly::Padded => "PADDED",
        }
    }
}

/// The bitmask carried in a frame header, restricted to the flags `F`
/// declares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags<F> {
    bits: u8,
    _flag: PhantomData<F>,
}

impl<F: Flag> Flags<F> {
    /// An empty flag set.
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _flag: PhantomData,
        }
    }

    /// Build a flag set from a wire byte.
    ///
    /// Bits that `F` does not declare are dropped.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            bits: byte & F::declared_mask(),
            _flag: PhantomData,
        }
    }

    /// The wire byte for the currently set flags.
    #[inline]
    pub fn to_byte(self) -> u8 {
        self.bits
    }

    #[inline]
    pub fn has(self, flag: F) -> bool {
        self.bits & flag.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, flag: F) {
        self.bits |= flag.bit();
    }

    #[inline]
    pub fn clear(&mut self, flag: F) {
        self.bits &= !flag.bit();
    }

    /// Set or clear a flag.
    pub fn toggle(&mut self, flag: F, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Builder-style [`Flags::set`].
    pub fn with(mut self, flag: F) -> Self {
        self.set(flag);
        self
    }

    /// Set a flag by its wire name.
    pub fn set_named(&mut self, name: &str) -> Result<(), FrameError> {
        let flag = lookup::<F>(name)?;
        self.set(flag);
        Ok(())
    }

    /// Test a flag by its wire name.
    pub fn has_named(&self, name: &str) -> Result<bool, FrameError> {
        lookup::<F>(name).map(|flag| self.has(flag))
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterate over the set flags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = F> {
        F::ALL.iter().copied().filter(move |flag| self.has(*flag))
    }
}

fn lookup<F: Flag>(name: &str) -> Result<F, FrameError> {
    F::from_name(name).ok_or_else(|| FrameError::UnknownFlag {
        name: name.to_string(),
    })
}

impl<F: Flag> Default for Flags<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Flag> fmt::Debug for Flags<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|flag| flag.name()))
            .finish()
    }
}
