//! Applies and verifies byte patches on an in-memory image.
//!
//! The image is always a caller-owned `&mut [u8]`. Patches never change its length.
//! A patch is checked completely before the first byte is written, so a failing patch
//! leaves the image untouched. A failing patch set stops at the failing patch and keeps
//! the patches before it.

use data_types::addresses::ImageOffset;
use itertools::Itertools;
use thiserror_no_std::Error;

mod apply;
mod replace;
mod set;

pub use apply::{apply_patch, check_patch, verify_patch};
pub use replace::{find_all, find_first};
pub use set::{
    apply_patch_set, check_patch_set, verify_patch_set, AppliedPatch, PatchSetError,
    PatchSetReport,
};

pub type PatchResult<T> = Result<T, PatchError>;

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatchError {
    #[error("before has {before} bytes but after has {after}")]
    InconsistentPatch { before: usize, after: usize },
    #[error("{len} bytes at {offset} exceed the image of {image_len} bytes")]
    PatchOutOfRange {
        offset: ImageOffset,
        len: usize,
        image_len: usize,
    },
    #[error("expected {} at {offset}, found {}", hex(.expected), hex(.found))]
    PatchMismatch {
        offset: ImageOffset,
        expected: Vec<u8>,
        found: Vec<u8>,
    },
    /// The offset-less form found nothing to replace
    #[error("{} does not occur in the image", hex(.pattern))]
    PatternNotFound { pattern: Vec<u8> },
    #[error("an empty pattern can not be replaced")]
    EmptyPattern,
    #[error("expected {} at {offset} once patched, found {}", hex(.expected), hex(.found))]
    NotApplied {
        offset: ImageOffset,
        expected: Vec<u8>,
        found: Vec<u8>,
    },
    #[error("{} still occurs at {offset}", hex(.pattern))]
    PatternStillPresent {
        offset: ImageOffset,
        pattern: Vec<u8>,
    },
}

impl PatchError {
    /// The image is not the one the patch was written for, or it was already patched
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            PatchError::PatchMismatch { .. } | PatchError::PatternNotFound { .. }
        )
    }
}

/// Lowercase hex without separators, e.g. `4e800020`
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().format_with("", |byte, f| f(&format_args!("{byte:02x}"))).to_string()
}
