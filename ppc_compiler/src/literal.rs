//! Fixed instruction words
//!
//! Words of forms the encoder does not build (XL, X, XFX) are kept here as
//! pre-assembled constants. They are data: nothing in this table is used to derive
//! further encodings.

use crate::instruction::Instruction;

/// A pre-assembled instruction word with its assembler spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub name: &'static str,
    pub instruction: Instruction,
}

impl Literal {
    const fn new(name: &'static str, word: u32) -> Literal {
        Literal {
            name,
            instruction: Instruction::from_word(word),
        }
    }
}

pub const BLR: Instruction = Instruction::from_word(0x4e80_0020);
pub const NOP: Instruction = Instruction::from_word(0x6000_0000);
pub const SYNC: Instruction = Instruction::from_word(0x7c00_04ac);
pub const EIEIO: Instruction = Instruction::from_word(0x7c00_06ac);
pub const MFLR_R0: Instruction = Instruction::from_word(0x7c08_02a6);
pub const MTLR_R0: Instruction = Instruction::from_word(0x7c08_03a6);
/// `crxor 6, 6, 6`, clears cr1 before calling a variadic function
pub const CRCLR_6: Instruction = Instruction::from_word(0x4cc6_3182);
pub const PADDING: Instruction = Instruction::from_word(0);

pub const LITERALS: &[Literal] = &[
    Literal::new("blr", BLR.word()),
    Literal::new("nop", NOP.word()),
    Literal::new("sync", SYNC.word()),
    Literal::new("eieio", EIEIO.word()),
    Literal::new("mflr r0", MFLR_R0.word()),
    Literal::new("mtlr r0", MTLR_R0.word()),
    Literal::new("crxor 6, 6, 6", CRCLR_6.word()),
    Literal::new("padding", PADDING.word()),
];

/// Looks up a literal by its assembler spelling
pub fn by_name(name: &str) -> Option<Instruction> {
    LITERALS
        .iter()
        .find(|literal| literal.name == name)
        .map(|literal| literal.instruction)
}

/// The spelling of `instruction` if it is one of the fixed words
pub fn name_of(instruction: Instruction) -> Option<&'static str> {
    LITERALS
        .iter()
        .find(|literal| literal.instruction == instruction)
        .map(|literal| literal.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register;

    #[test]
    fn test_literal_bytes() {
        assert_eq!(BLR.bytes(), [0x4e, 0x80, 0x00, 0x20]);
        assert_eq!(SYNC.bytes(), [0x7c, 0x00, 0x04, 0xac]);
        assert_eq!(CRCLR_6.bytes(), [0x4c, 0xc6, 0x31, 0x82]);
    }

    #[test]
    fn test_nop_is_ori() {
        assert_eq!(
            NOP,
            Instruction::ORI(Register::R0, Register::R0, 0),
            "nop is ori r0, r0, 0"
        );
    }

    #[test]
    fn test_lookup() {
        assert_eq!(by_name("mtlr r0"), Some(MTLR_R0));
        assert_eq!(by_name("bctr"), None);
        assert_eq!(name_of(EIEIO), Some("eieio"));
        assert_eq!(name_of(Instruction::from_word(0x3860_0001)), None);
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in LITERALS.iter().enumerate() {
            for b in &LITERALS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.instruction, b.instruction);
            }
        }
    }
}
