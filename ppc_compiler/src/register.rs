//! General purpose registers
//!
//! Registers only name one of the 32 GPRs. Using the enum keeps every register operand
//! within 0..=31, so the named instruction constructors cannot fail on them.

use crate::{EncodeError, EncodeResult, Field};
use core::fmt::{Display, Formatter};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
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
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    R16,
    R17,
    R18,
    R19,
    R20,
    R21,
    R22,
    R23,
    R24,
    R25,
    R26,
    R27,
    R28,
    R29,
    R30,
    R31,
}

impl Register {
    /// Stack pointer by ABI convention
    pub const SP: Register = Register::R1;

    /// Register number as encoded in the 5 bit register fields
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Looks up a register by its number, failing for anything outside 0..=31.
    pub fn from_number(number: u32) -> EncodeResult<Register> {
        Register::from_u32(number).ok_or(EncodeError::OutOfRange {
            field: Field::Register,
            value: i64::from(number),
        })
    }
}

impl TryFrom<u8> for Register {
    type Error = EncodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Register::from_number(u32::from(value))
    }
}

impl From<Register> for u32 {
    fn from(value: Register) -> Self {
        u32::from(value.number())
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "r{}", self.number())
    }
}
