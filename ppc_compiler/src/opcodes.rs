//! Primary opcodes
//!
//! Only the primary opcodes (the upper 6 bits of every instruction word) that the
//! encoder knows how to build are listed. Extended opcodes of the X/XL/XFX forms are
//! not modelled, words of those forms are kept as literals.

use core::fmt::{Display, Formatter};
use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    FromPrimitive,
    Serialize,
    Deserialize,
)]
#[allow(clippy::upper_case_acronyms)] // these are the mnemonics
#[repr(u8)]
pub enum Opcode {
    /// cmpi, used as cmpwi
    CMPI = 11,
    ADDI = 14,
    ADDIS = 15,
    BC = 16,
    B = 18,
    /// bclr, crxor, ...
    XL = 19,
    ORI = 24,
    ORIS = 25,
    /// mfspr, mtspr, sync, eieio, ...
    X = 31,
    LWZ = 32,
    LBZ = 34,
    STW = 36,
    STWU = 37,
    STB = 38,
    STH = 44,
}

impl Opcode {
    /// Raw value as stored in the upper 6 bits
    pub const fn value(self) -> u32 {
        self as u32
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}
