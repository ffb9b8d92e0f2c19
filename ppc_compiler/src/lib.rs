//! PowerPC instruction encoding
//!
//! Builds 32 bit PowerPC instruction words for the small subset of the ISA needed to
//! write patches: D-form loads, stores and immediates, I-form branches and a table of
//! hand-assembled words for everything else.

use core::fmt::{Display, Formatter};
use thiserror_no_std::Error;

pub mod bits;
pub mod instruction;
pub mod literal;
pub mod opcodes;
pub mod register;

pub use instruction::{Displacement, Instruction, Instructions};
pub use register::Register;

/// The instruction fields an operand can be placed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Opcode,
    TargetRegister,
    SourceRegister,
    Register,
    Immediate,
    Displacement,
}

impl Field {
    /// Width of the field in bits
    pub const fn bits(self) -> u32 {
        match self {
            Field::Opcode => 6,
            Field::TargetRegister | Field::SourceRegister | Field::Register => 5,
            Field::Immediate => 16,
            Field::Displacement => 24,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Field::Opcode => "opcode",
            Field::TargetRegister => "target register",
            Field::SourceRegister => "source register",
            Field::Register => "register",
            Field::Immediate => "immediate",
            Field::Displacement => "branch displacement",
        };
        write!(f, "{} ({} bit)", name, self.bits())
    }
}

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while encoding an instruction
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EncodeError {
    /// An operand does not fit into its field
    #[error("{field} cannot hold the value {value}")]
    OutOfRange { field: Field, value: i64 },
    /// Branch targets are word aligned, so the distance must be a multiple of 4
    #[error("branch displacement {0} is not a multiple of 4")]
    MisalignedBranch(i64),
}

impl EncodeError {
    /// The field that overflowed, if any
    pub const fn field(&self) -> Option<Field> {
        match self {
            EncodeError::OutOfRange { field, .. } => Some(*field),
            EncodeError::MisalignedBranch(_) => None,
        }
    }

    pub(crate) fn out_of_range(field: Field, err: bits::RangeError) -> Self {
        EncodeError::OutOfRange {
            field,
            value: i64::from(err.value),
        }
    }
}
