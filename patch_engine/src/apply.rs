use crate::replace::{find_all, find_first};
use crate::{hex, PatchError, PatchResult};
use core::ops::Range;
use data_types::addresses::ImageOffset;
use data_types::patch::Patch;
use log::{debug, warn};

/// Checks that `patch` applies to `image` and returns the offsets it would write to.
///
/// Nothing is written. Errors are the same ones [`apply_patch`] would return.
pub fn check_patch(image: &[u8], patch: &Patch) -> PatchResult<Vec<ImageOffset>> {
    ensure_consistent(patch)?;

    match patch.offset {
        Some(offset) => {
            let found = &image[range_of(image, offset, patch.len())?];
            if found != patch.before.as_slice() {
                return Err(PatchError::PatchMismatch {
                    offset,
                    expected: patch.before.clone(),
                    found: found.to_vec(),
                });
            }
            Ok(vec![offset])
        }
        None => {
            if patch.is_empty() {
                return Err(PatchError::EmptyPattern);
            }
            let positions = find_all(image, &patch.before);
            if positions.is_empty() {
                return Err(PatchError::PatternNotFound {
                    pattern: patch.before.clone(),
                });
            }
            Ok(positions.into_iter().map(ImageOffset::from_const).collect())
        }
    }
}

/// Applies a single patch and returns the offsets written.
///
/// With an offset, `before` has to be found exactly there. Without one, every
/// non-overlapping occurrence of `before` is replaced; matches are collected on the
/// unpatched image, so `after` can never be matched again within the same call.
///
/// On error the image is unchanged.
pub fn apply_patch(image: &mut [u8], patch: &Patch) -> PatchResult<Vec<ImageOffset>> {
    let offsets = check_patch(image, patch)?;

    if patch.offset.is_none() {
        warn!(
            "Replacing {} without an offset, {} occurrence(s)",
            hex(&patch.before),
            offsets.len()
        );
    }

    for offset in &offsets {
        let start = usize::from(*offset);
        image[start..start + patch.len()].copy_from_slice(&patch.after);
        debug!(
            "{}: {} -> {}",
            offset,
            hex(&patch.before),
            hex(&patch.after)
        );
    }

    Ok(offsets)
}

/// Checks that `patch` has been applied to `image`.
///
/// With an offset the `after` bytes have to be in place. Without one no occurrence
/// of `before` may be left. If `after` itself contains `before` that can not be told
/// apart, so `after` has to occur instead.
pub fn verify_patch(image: &[u8], patch: &Patch) -> PatchResult<()> {
    ensure_consistent(patch)?;

    match patch.offset {
        Some(offset) => {
            let found = &image[range_of(image, offset, patch.len())?];
            if found != patch.after.as_slice() {
                return Err(PatchError::NotApplied {
                    offset,
                    expected: patch.after.clone(),
                    found: found.to_vec(),
                });
            }
            Ok(())
        }
        None => {
            if patch.is_empty() {
                return Err(PatchError::EmptyPattern);
            }
            if find_first(&patch.after, &patch.before).is_some() {
                return match find_first(image, &patch.after) {
                    Some(_) => Ok(()),
                    None => Err(PatchError::PatternNotFound {
                        pattern: patch.after.clone(),
                    }),
                };
            }
            match find_first(image, &patch.before) {
                Some(position) => Err(PatchError::PatternStillPresent {
                    offset: ImageOffset::from_const(position),
                    pattern: patch.before.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}

fn ensure_consistent(patch: &Patch) -> PatchResult<()> {
    if patch.is_consistent() {
        Ok(())
    } else {
        Err(PatchError::InconsistentPatch {
            before: patch.before.len(),
            after: patch.after.len(),
        })
    }
}

fn range_of(image: &[u8], offset: ImageOffset, len: usize) -> PatchResult<Range<usize>> {
    let out_of_range = || PatchError::PatchOutOfRange {
        offset,
        len,
        image_len: image.len(),
    };

    let start = usize::from(offset);
    let end = start.checked_add(len).ok_or_else(out_of_range)?;
    if end > image.len() {
        return Err(out_of_range());
    }
    Ok(start..end)
}
