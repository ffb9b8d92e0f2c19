//! Branch patches computed from image offsets

use crate::{PatcherError, PatcherResult};
use data_types::addresses::{EffectiveAddress, ImageOffset, Section};
use data_types::patch::Patch;
use ppc_compiler::Instruction;

/// Load address of the instruction at `offset`
pub fn address_of(section: &Section, offset: ImageOffset) -> PatcherResult<EffectiveAddress> {
    section
        .address_of(offset)
        .ok_or(PatcherError::OutsideSection(offset))
}

/// A patch turning `original`, found at `offset`, into a branch to `target`.
///
/// `original` has to be an unconditional branch (`b` or `bl`); the link bit is kept,
/// so calls stay calls.
pub fn redirect_branch(
    section: &Section,
    offset: ImageOffset,
    original: Instruction,
    target: EffectiveAddress,
) -> PatcherResult<Patch> {
    let fields = original
        .decode_i_form()
        .filter(|fields| !fields.absolute)
        .ok_or(PatcherError::NotABranch(original))?;

    let current = address_of(section, offset)?;
    let replacement = Instruction::B(current, target)?.with_link(fields.link);
    Ok(Patch::at(offset, original.bytes(), replacement.bytes()))
}

/// A patch placing `bl target` at `offset` instead of `original`
pub fn insert_call(
    section: &Section,
    offset: ImageOffset,
    original: Instruction,
    target: EffectiveAddress,
) -> PatcherResult<Patch> {
    let call = Instruction::BL(address_of(section, offset)?, target)?;
    Ok(Patch::at(offset, original.bytes(), call.bytes()))
}
