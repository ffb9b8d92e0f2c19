//! Glue between files on disk and the patching crates.
//!
//! Whole images are patched on a copy: either every selected patch set applies and
//! the copy is returned, or the error is returned and the caller still holds the
//! untouched original.

use cert_store::{Certificate, CertificateStore, StoreError};
use data_types::addresses::ImageOffset;
use data_types::patch::PatchSet;
use log::info;
use patch_engine::{apply_patch_set, verify_patch_set, PatchSetError, PatchSetReport};
use ppc_compiler::{EncodeError, Instruction};
use thiserror_no_std::Error;

pub mod branch;
pub mod catalog;

pub type PatcherResult<T> = Result<T, PatcherError>;

#[derive(Error, Debug)]
pub enum PatcherError {
    #[error("{0} is not covered by the section")]
    OutsideSection(ImageOffset),
    #[error("{0} is not an unconditional branch")]
    NotABranch(Instruction),
    #[error("no patch set named {0:?}")]
    UnknownSet(String),
    #[error("{0}")]
    Encode(#[from] EncodeError),
    #[error("{0}")]
    Patch(#[from] PatchSetError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Applies `sets` in order to a copy of `image` and returns the patched copy.
pub fn apply_sets(
    image: &[u8],
    sets: &[&PatchSet],
) -> PatcherResult<(Vec<u8>, Vec<PatchSetReport>)> {
    let mut patched = image.to_vec();
    let reports = sets
        .iter()
        .map(|set| apply_patch_set(&mut patched, set))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((patched, reports))
}

/// Checks that `sets` apply in order without returning the patched copy.
///
/// Each set is checked against the image as left by the sets before it, the same
/// way `apply_sets` runs them.
pub fn check_sets(image: &[u8], sets: &[&PatchSet]) -> PatcherResult<Vec<PatchSetReport>> {
    apply_sets(image, sets).map(|(_, reports)| reports)
}

/// Checks that every patch of `sets` is in place
pub fn verify_sets(image: &[u8], sets: &[&PatchSet]) -> PatcherResult<()> {
    for set in sets {
        verify_patch_set(image, set)?;
    }
    Ok(())
}

/// Serializes the store for `certificate`, refusing certificates that do not fit
/// into the image.
pub fn build_cert_store(certificate: Certificate) -> PatcherResult<Vec<u8>> {
    certificate.check_embeddable()?;
    let bytes = CertificateStore::new(certificate).to_bytes()?;
    info!("Certificate store is {} bytes", bytes.len());
    Ok(bytes)
}
