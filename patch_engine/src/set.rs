use crate::apply::{apply_patch, verify_patch};
use crate::PatchError;
use data_types::addresses::ImageOffset;
use data_types::patch::{Patch, PatchSet};
use log::{error, info, log, Level};
use thiserror_no_std::Error;

/// A patch of a set failed. Patches before it have been applied.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("patch {patch} of {set} failed: {source}")]
pub struct PatchSetError {
    pub set: String,
    /// Name of the failing patch, or `#index` if it has none
    pub patch: String,
    pub index: usize,
    pub source: PatchError,
}

impl PatchSetError {
    fn new(set: &PatchSet, index: usize, patch: &Patch, source: PatchError) -> Self {
        PatchSetError {
            set: set.name.clone(),
            patch: patch.label(index),
            index,
            source,
        }
    }
}

/// One applied patch of a set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppliedPatch {
    pub label: String,
    pub offsets: Vec<ImageOffset>,
}

/// What applying a patch set changed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PatchSetReport {
    pub set: String,
    pub patches: Vec<AppliedPatch>,
}

impl PatchSetReport {
    /// Number of places written across all patches
    pub fn writes(&self) -> usize {
        self.patches.iter().map(|patch| patch.offsets.len()).sum()
    }
}

/// Applies every patch of `set` in order.
///
/// Stops at the first failing patch. Earlier patches stay applied; callers that must
/// not end up with a partially patched image run [`check_patch_set`] first or work on
/// a copy.
pub fn apply_patch_set(
    image: &mut [u8],
    set: &PatchSet,
) -> Result<PatchSetReport, PatchSetError> {
    info!("Applying {} ({} patches)", set.name, set.len());
    let report = apply_each(image, set, Level::Info).inspect_err(|err| error!("{}", err))?;
    info!("Applied {}, {} writes", set.name, report.writes());
    Ok(report)
}

/// Checks that every patch of `set` would apply, in order, without changing `image`.
///
/// Later patches are checked against the result of earlier ones, so this works on a
/// scratch copy of the image.
pub fn check_patch_set(image: &[u8], set: &PatchSet) -> Result<PatchSetReport, PatchSetError> {
    let mut scratch = image.to_vec();
    apply_each(&mut scratch, set, Level::Debug)
}

/// Checks that every patch of `set` has been applied to `image`, reporting the first one
/// that has not.
pub fn verify_patch_set(image: &[u8], set: &PatchSet) -> Result<(), PatchSetError> {
    for (index, patch) in set.iter().enumerate() {
        verify_patch(image, patch).map_err(|err| PatchSetError::new(set, index, patch, err))?;
    }
    info!("Verified {}", set.name);
    Ok(())
}

fn apply_each(
    image: &mut [u8],
    set: &PatchSet,
    level: Level,
) -> Result<PatchSetReport, PatchSetError> {
    let mut report = PatchSetReport {
        set: set.name.clone(),
        patches: Vec::with_capacity(set.len()),
    };

    for (index, patch) in set.iter().enumerate() {
        let label = patch.label(index);
        let offsets =
            apply_patch(image, patch).map_err(|err| PatchSetError::new(set, index, patch, err))?;
        log!(level, "  {}: {:?}", label, offsets);
        report.patches.push(AppliedPatch { label, offsets });
    }

    Ok(report)
}
