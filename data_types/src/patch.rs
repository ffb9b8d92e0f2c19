//! Types for representing byte patches on an image
//!
//! This module provides the data side of patching:
//! - Patches (a named byte replacement, optionally pinned to an offset)
//! - Patch sets (ordered, named groups of patches)
//! - Helpers to build replacement payloads of the right length
//!
//! Applying and verifying patches lives in the `patch_engine` crate.

use crate::addresses::ImageOffset;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A single byte replacement on an image.
///
/// `before` and `after` must have the same length, so applying a patch never moves
/// any other byte of the image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch {
    /// Optional name, only used when reporting
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    /// Where `before` is expected. Without an offset every occurrence of `before`
    /// in the image is replaced.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub offset: Option<ImageOffset>,
    /// The bytes present in the original image
    #[cfg_attr(feature = "serde", serde(with = "hex_bytes"))]
    pub before: Vec<u8>,
    /// The bytes to write instead
    #[cfg_attr(feature = "serde", serde(with = "hex_bytes"))]
    pub after: Vec<u8>,
}

impl Patch {
    /// A patch expecting `before` exactly at `offset`
    pub fn at<O: Into<ImageOffset>, B: Into<Vec<u8>>, A: Into<Vec<u8>>>(
        offset: O,
        before: B,
        after: A,
    ) -> Self {
        Patch {
            name: None,
            offset: Some(offset.into()),
            before: before.into(),
            after: after.into(),
        }
    }

    /// A patch replacing every occurrence of `before`.
    ///
    /// There is no way to tell whether a match is the intended one, so `before`
    /// should be distinctive enough to only occur where it is meant to.
    pub fn everywhere<B: Into<Vec<u8>>, A: Into<Vec<u8>>>(before: B, after: A) -> Self {
        Patch {
            name: None,
            offset: None,
            before: before.into(),
            after: after.into(),
        }
    }

    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of bytes this patch covers
    pub fn len(&self) -> usize {
        self.before.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
    }

    /// `before` and `after` have the same length
    pub fn is_consistent(&self) -> bool {
        self.before.len() == self.after.len()
    }

    /// Name for reports. Unnamed patches are labeled by their position in the set.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => alloc::format!("#{index}"),
        }
    }
}

/// An ordered group of patches that belong together.
///
/// Order matters only in that patches are applied and reported in sequence. Patches
/// never change the image length, so offsets of later patches stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchSet {
    pub name: String,
    pub patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        PatchSet {
            name: name.into(),
            patches: Vec::new(),
        }
    }

    pub fn push(&mut self, patch: Patch) -> &mut Self {
        self.patches.push(patch);
        self
    }

    pub fn with(mut self, patch: Patch) -> Self {
        self.patches.push(patch);
        self
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Patch> {
        self.patches.iter()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = &'a Patch;
    type IntoIter = core::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.iter()
    }
}

/// `length` zero bytes, e.g. free space expected before inserting code.
pub fn zeroes(length: usize) -> Vec<u8> {
    vec![0u8; length]
}

/// Replaces `from` by `to` within `text` and pads the result with NUL bytes to the
/// original length, so it can stand in for `text` inside an image.
///
/// Returns `None` if the replacement is longer than the original.
pub fn padded_replace(text: &str, from: &str, to: &str) -> Option<Vec<u8>> {
    let replaced = text.replace(from, to);
    if replaced.len() > text.len() {
        return None;
    }

    let mut bytes = replaced.into_bytes();
    bytes.resize(text.len(), 0);
    Some(bytes)
}

#[cfg(feature = "serde")]
mod hex_bytes {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::fmt::Write;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(v: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let mut text = String::with_capacity(v.len() * 2);
            for byte in v {
                write!(text, "{byte:02x}").map_err(serde::ser::Error::custom)?;
            }
            serializer.serialize_str(&text)
        } else {
            serde::Serialize::serialize(v, serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            let digits: Vec<u8> = text
                .trim()
                .trim_start_matches("0x")
                .bytes()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            if digits.len() % 2 != 0 {
                return Err(serde::de::Error::custom("odd number of hex digits"));
            }
            digits
                .chunks(2)
                .map(|pair| {
                    let pair = core::str::from_utf8(pair).map_err(serde::de::Error::custom)?;
                    u8::from_str_radix(pair, 16).map_err(serde::de::Error::custom)
                })
                .collect()
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}
