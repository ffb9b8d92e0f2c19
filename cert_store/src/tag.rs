use crate::{StoreError, StoreResult};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Size of the id and length fields in front of every payload
pub const TAG_HEADER_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum TagId {
    CaCertificate = 0x02,
    UserCertificate = 0x03,
    UserPassword = 0x04,
    CertificateType = 0x20,
    CertificateName = 0x21,
    CertificateSubject = 0x22,
    CertificateContents = 0x23,
}

impl TagId {
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl From<TagId> for u8 {
    fn from(value: TagId) -> Self {
        value.id()
    }
}

/// A decoded tag borrowing its payload from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag<'a> {
    /// Raw id, unknown ids are kept as they are
    pub id: u8,
    pub payload: &'a [u8],
}

impl<'a> Tag<'a> {
    pub fn kind(&self) -> Option<TagId> {
        TagId::from_u8(self.id)
    }

    /// Size of the tag including id and length
    pub fn encoded_len(&self) -> usize {
        TAG_HEADER_LEN + self.payload.len()
    }

    /// Fails unless this is a tag of kind `expected`
    pub fn expect(self, expected: TagId) -> StoreResult<Tag<'a>> {
        if self.id == expected.id() {
            Ok(self)
        } else {
            Err(StoreError::UnexpectedTag {
                expected,
                found: self.id,
            })
        }
    }
}

/// `[id] ++ be_u32(len(payload)) ++ payload`
pub fn encode_tag<I: Into<u8>>(id: I, payload: &[u8]) -> StoreResult<Vec<u8>> {
    let mut out = Vec::with_capacity(TAG_HEADER_LEN + payload.len());
    write_tag(&mut out, id, payload)?;
    Ok(out)
}

/// Appends an encoded tag to `out`
pub fn write_tag<I: Into<u8>>(out: &mut Vec<u8>, id: I, payload: &[u8]) -> StoreResult<()> {
    let len =
        u32::try_from(payload.len()).map_err(|_| StoreError::PayloadTooLarge(payload.len()))?;
    out.push(id.into());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(())
}

/// Splits the first tag off `bytes`, returning it and whatever follows.
///
/// The length field is trusted exactly: the payload is never read past it and a
/// length reaching beyond the input is an error.
pub fn decode_tag(bytes: &[u8]) -> StoreResult<(Tag<'_>, &[u8])> {
    let header = take(bytes, TAG_HEADER_LEN)?;
    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
    let rest = &bytes[TAG_HEADER_LEN..];
    let payload = take(rest, len)?;
    Ok((
        Tag {
            id: header[0],
            payload,
        },
        &rest[len..],
    ))
}

pub(crate) fn take(bytes: &[u8], needed: usize) -> StoreResult<&[u8]> {
    bytes.get(..needed).ok_or(StoreError::Truncated {
        needed,
        available: bytes.len(),
    })
}

/// Iterates over consecutive tags. Stops after the first error.
#[derive(Debug, Clone)]
pub struct TagReader<'a> {
    rest: &'a [u8],
}

impl<'a> TagReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        TagReader { rest: bytes }
    }

    /// Bytes not read yet
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }

    /// Reads the next tag, failing if there is none or it is not of kind `expected`.
    pub fn expect(&mut self, expected: TagId) -> StoreResult<Tag<'a>> {
        match self.next() {
            Some(tag) => tag?.expect(expected),
            None => Err(StoreError::Truncated {
                needed: TAG_HEADER_LEN,
                available: 0,
            }),
        }
    }
}

impl<'a> Iterator for TagReader<'a> {
    type Item = StoreResult<Tag<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match decode_tag(self.rest) {
            Ok((tag, rest)) => {
                self.rest = rest;
                Some(Ok(tag))
            }
            Err(err) => {
                self.rest = &[];
                Some(Err(err))
            }
        }
    }
}
