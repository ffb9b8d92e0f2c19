//! Certificate store container
//!
//! The container is a fixed header followed by tags. A tag is a 1 byte id, a 4 byte
//! big-endian length and the payload. Tags nest by concatenating child tags into the
//! payload of their parent.
//! ```plain
//! +--------------+---------------------------------------------------------------+
//! | header (12)  | 02 len | 20 len type | 21 len name | 22 len subject | 23 ... |
//! +--------------+---------------------------------------------------------------+
//! ```

use thiserror_no_std::Error;

pub mod store;
pub mod tag;

pub use store::{Certificate, CertificateStore};
pub use tag::{decode_tag, encode_tag, Tag, TagId, TagReader};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreError {
    #[error("needed {needed} bytes but only {available} are left")]
    Truncated { needed: usize, available: usize },
    #[error("expected tag {expected:?}, found {found:#04x}")]
    UnexpectedTag { expected: TagId, found: u8 },
    #[error("unsupported header {0:02x?}")]
    UnsupportedHeader(Vec<u8>),
    #[error("unsupported certificate type {0:02x?}")]
    UnsupportedType(Vec<u8>),
    #[error("certificate name is not valid UTF-8")]
    InvalidName,
    #[error("payload of {0} bytes does not fit the length field")]
    PayloadTooLarge(usize),
    #[error("certificate of {len} bytes exceeds the {max} bytes available")]
    CertificateTooLarge { len: usize, max: usize },
}
