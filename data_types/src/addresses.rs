use crate::cstd::fmt;
use core::ops::{Add, Sub};

/// An address as seen by the PowerPC core once the image is loaded.
/// 32 bit wide, counting bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EffectiveAddress(u32);
impl EffectiveAddress {
    pub const fn from_const(value: u32) -> Self {
        EffectiveAddress(value)
    }

    /// only use this function for specifying consts
    pub const fn to_const(self) -> u32 {
        self.0
    }

    /// Instructions live on word boundaries, so does every branch target.
    pub const fn is_word_aligned(&self) -> bool {
        self.0 & 3 == 0
    }

    /// Signed distance in bytes from `origin` to `self`.
    pub const fn offset_from(&self, origin: EffectiveAddress) -> i64 {
        self.0 as i64 - origin.0 as i64
    }

    pub const ZERO: EffectiveAddress = EffectiveAddress::from_const(0);
    pub const MIN: EffectiveAddress = EffectiveAddress::ZERO;
    pub const MAX: EffectiveAddress = EffectiveAddress::from_const(u32::MAX);
}
impl fmt::Display for EffectiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:08x}", self.0)
    }
}
impl fmt::Debug for EffectiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:08x}", self.0)
    }
}
impl From<u32> for EffectiveAddress {
    fn from(value: u32) -> Self {
        EffectiveAddress::from_const(value)
    }
}
impl From<EffectiveAddress> for u32 {
    fn from(value: EffectiveAddress) -> Self {
        value.0
    }
}
impl Add<u32> for EffectiveAddress {
    type Output = Self;

    #[track_caller]
    fn add(self, other: u32) -> Self {
        EffectiveAddress::from_const(self.0 + other)
    }
}
impl Sub<u32> for EffectiveAddress {
    type Output = Self;

    #[track_caller]
    fn sub(self, other: u32) -> Self {
        EffectiveAddress::from_const(self.0 - other)
    }
}
impl From<&EffectiveAddress> for EffectiveAddress {
    fn from(value: &EffectiveAddress) -> Self {
        *value
    }
}

/// A byte offset into the raw image buffer. Starting at 0 counting up by 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ImageOffset(usize);
impl ImageOffset {
    pub const fn from_const(value: usize) -> Self {
        ImageOffset(value)
    }

    pub const ZERO: ImageOffset = ImageOffset::from_const(0);
    pub const MIN: ImageOffset = ImageOffset::ZERO;
}
impl fmt::Display for ImageOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{:06x}", self.0)
    }
}
impl fmt::Debug for ImageOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{:06x}", self.0)
    }
}
impl From<usize> for ImageOffset {
    fn from(value: usize) -> Self {
        ImageOffset::from_const(value)
    }
}
impl From<ImageOffset> for usize {
    fn from(value: ImageOffset) -> Self {
        value.0
    }
}
impl Add<usize> for ImageOffset {
    type Output = Self;

    #[track_caller]
    fn add(self, other: usize) -> Self {
        ImageOffset::from_const(self.0 + other)
    }
}
impl Sub<usize> for ImageOffset {
    type Output = Self;

    #[track_caller]
    fn sub(self, other: usize) -> Self {
        ImageOffset::from_const(self.0 - other)
    }
}
impl From<&ImageOffset> for ImageOffset {
    fn from(value: &ImageOffset) -> Self {
        *value
    }
}

/// A contiguous part of the image that gets loaded at a fixed address.
///
/// Patches are located by [`ImageOffset`], branches are computed between
/// [`EffectiveAddress`]es. A section translates between the two:
/// ```plain
///  image:   [ .... | offset ............ offset+size | .... ]
///  memory:         | address ........... address+size |
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub offset: ImageOffset,
    pub address: EffectiveAddress,
    pub size: usize,
}

impl Section {
    pub const fn new(offset: ImageOffset, address: EffectiveAddress, size: usize) -> Self {
        Section {
            offset,
            address,
            size,
        }
    }

    pub fn contains_offset(&self, offset: ImageOffset) -> bool {
        offset >= self.offset && offset.0 - self.offset.0 < self.size
    }

    pub fn contains_address(&self, address: EffectiveAddress) -> bool {
        address >= self.address && ((address.0 - self.address.0) as usize) < self.size
    }

    /// Load address of the byte at `offset`, if this section covers it.
    pub fn address_of(&self, offset: ImageOffset) -> Option<EffectiveAddress> {
        if !self.contains_offset(offset) {
            return None;
        }
        let delta = u32::try_from(offset.0 - self.offset.0).ok()?;
        Some(self.address + delta)
    }

    /// Image offset of the byte loaded at `address`, if this section covers it.
    pub fn offset_of(&self, address: EffectiveAddress) -> Option<ImageOffset> {
        if !self.contains_address(address) {
            return None;
        }
        Some(self.offset + (address.0 - self.address.0) as usize)
    }
}
