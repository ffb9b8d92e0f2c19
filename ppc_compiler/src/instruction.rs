//! PowerPC Instruction Module
//!
//! This module encodes single instruction words and sequences of them. Two layouts are
//! built algorithmically, D-form and I-form. Everything else is taken from
//! [`crate::literal`].

use crate::bits;
use crate::literal;
use crate::opcodes::Opcode;
use crate::register::Register;
use crate::{EncodeError, EncodeResult, Field};
use bitfield::bitfield;
use core::fmt::Display;
use data_types::addresses::EffectiveAddress;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

bitfield! {
    /// A D-form instruction word.
    /// ```plain
    ///  31      26 25   21 20   16 15                0  Index
    /// +----------+-------+-------+------------------+
    /// |  opcode  |  rT   |  rA   |    immediate     |
    /// +----------+-------+-------+------------------+
    ///       6        5       5           16           Width
    /// ```
    /// Loads, stores, immediate arithmetic and compares share this layout. The meaning
    /// of `rT` and `rA` depends on the opcode: for `ori` the first register field is
    /// the source and the second the destination.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct DForm(u32);
    impl Debug;
    pub opcode, set_opcode: 31, 26;
    pub rt, set_rt: 25, 21;
    pub ra, set_ra: 20, 16;
    pub immediate, set_immediate: 15, 0;
}

bitfield! {
    /// An I-form (unconditional branch) instruction word.
    /// ```plain
    ///  31      26 25                            2  1    0  Index
    /// +----------+-------------------------------+----+----+
    /// |  opcode  |              LI               | AA | LK |
    /// +----------+-------------------------------+----+----+
    ///       6                   24                  1    1   Width
    /// ```
    /// - `LI`: word displacement, two's complement
    /// - `AA`: `LI` is an absolute address instead of relative to the branch
    /// - `LK`: store the address of the next instruction in the link register
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct IForm(u32);
    impl Debug;
    pub opcode, set_opcode: 31, 26;
    pub li, set_li: 25, 2;
    pub absolute, set_absolute: 1;
    pub link, set_link: 0;
}

/// Signed byte distance of a relative branch.
///
/// Always a multiple of 4 and small enough for the 24 bit `LI` field, i.e. within
/// -32 MiB..32 MiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Displacement(i32);

impl Displacement {
    /// Width of the encoded field
    pub const BITS: u32 = 24;

    /// Validates a distance in bytes.
    pub fn new(delta: i64) -> EncodeResult<Displacement> {
        if delta % 4 != 0 {
            return Err(EncodeError::MisalignedBranch(delta));
        }
        if !bits::fits_signed(delta >> 2, Self::BITS) {
            return Err(EncodeError::OutOfRange {
                field: Field::Displacement,
                value: delta,
            });
        }
        Ok(Displacement(delta as i32))
    }

    /// Distance of a branch placed at `current` jumping to `target`.
    pub fn between(current: EffectiveAddress, target: EffectiveAddress) -> EncodeResult<Self> {
        Self::new(target.offset_from(current))
    }

    /// Recovers the displacement from an encoded `LI` field
    pub const fn from_field(field: u32) -> Displacement {
        Displacement(bits::sign_extend(field & bits::low_mask(Self::BITS), Self::BITS) << 2)
    }

    /// The distance in bytes
    pub const fn bytes(self) -> i32 {
        self.0
    }

    /// The value of the `LI` field, a 24 bit two's complement word count
    pub const fn field(self) -> u32 {
        ((self.0 >> 2) as u32) & bits::low_mask(Self::BITS)
    }
}

/// The fields of a D-form word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DFormFields {
    pub opcode: u8,
    pub rt: u8,
    pub ra: u8,
    pub immediate: u16,
}

impl DFormFields {
    /// The immediate read as a signed value (`addi`, `lwz`, `cmpwi`, ...)
    pub const fn signed_immediate(&self) -> i16 {
        self.immediate as i16
    }
}

/// The fields of an I-form word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IFormFields {
    pub opcode: u8,
    pub displacement: Displacement,
    pub absolute: bool,
    pub link: bool,
}

/// A single PowerPC instruction, stored as its 4 big-endian bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Instruction {
    bytes: [u8; 4],
}

impl Instruction {
    /// `blr`
    pub const BLR: Instruction = literal::BLR;
    /// `ori r0, r0, 0`
    pub const NOP: Instruction = literal::NOP;
    /// Four zero bytes, not an instruction but found between functions
    pub const PADDING: Instruction = literal::PADDING;

    /// Wraps 4 raw bytes, e.g. a hand-assembled word of a form the encoder does not know
    pub const fn from_bytes(bytes: [u8; 4]) -> Instruction {
        Instruction { bytes }
    }

    pub const fn from_word(word: u32) -> Instruction {
        Instruction {
            bytes: word.to_be_bytes(),
        }
    }

    pub const fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    pub const fn word(&self) -> u32 {
        u32::from_be_bytes(self.bytes)
    }

    /// The raw primary opcode, the upper 6 bits of the first byte
    pub fn primary_opcode(&self) -> u8 {
        bits::extract(self.bytes[0], 7, 2)
    }

    /// The primary opcode, if it is one the encoder knows about
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.primary_opcode())
    }

    /// Builds a D-form word from untyped field values, checking each against its width.
    ///
    /// The immediate may be given in signed (`-0x8000..0`) or unsigned (`..=0xffff`)
    /// notation; both end up as the same 16 bits.
    pub fn encode_d_form(opcode: u32, rt: u32, ra: u32, immediate: i32) -> EncodeResult<Self> {
        let opcode = bits::check_width(opcode, Field::Opcode.bits())
            .map_err(|err| EncodeError::out_of_range(Field::Opcode, err))?;
        let rt = bits::check_width(rt, Field::TargetRegister.bits())
            .map_err(|err| EncodeError::out_of_range(Field::TargetRegister, err))?;
        let ra = bits::check_width(ra, Field::SourceRegister.bits())
            .map_err(|err| EncodeError::out_of_range(Field::SourceRegister, err))?;
        if !(-0x8000..=0xffff).contains(&immediate) {
            return Err(EncodeError::OutOfRange {
                field: Field::Immediate,
                value: i64::from(immediate),
            });
        }

        Ok(Self::d_form_raw(opcode, rt, ra, immediate as u16))
    }

    /// Builds an unconditional branch word from a displacement in bytes.
    pub fn encode_branch(displacement: i64, absolute: bool, link: bool) -> EncodeResult<Self> {
        let displacement = Displacement::new(displacement)?;
        Ok(Self::i_form(displacement, absolute, link))
    }

    fn d_form_raw(opcode: u32, rt: u32, ra: u32, immediate: u16) -> Instruction {
        let mut word = DForm(0);
        word.set_opcode(opcode);
        word.set_rt(rt);
        word.set_ra(ra);
        word.set_immediate(u32::from(immediate));
        Instruction::from_word(word.0)
    }

    fn d_form(opcode: Opcode, rt: u32, ra: u32, immediate: u16) -> Instruction {
        Self::d_form_raw(opcode.value(), rt, ra, immediate)
    }

    fn i_form(displacement: Displacement, absolute: bool, link: bool) -> Instruction {
        let mut word = IForm(0);
        word.set_opcode(Opcode::B.value());
        word.set_li(displacement.field());
        word.set_absolute(absolute);
        word.set_link(link);
        Instruction::from_word(word.0)
    }

    /// Reads the word with the D-form layout. Every word can be split this way, whether
    /// the fields mean anything depends on the opcode.
    pub fn decode_d_form(&self) -> DFormFields {
        let word = DForm(self.word());
        DFormFields {
            opcode: word.opcode() as u8,
            rt: word.rt() as u8,
            ra: word.ra() as u8,
            immediate: word.immediate() as u16,
        }
    }

    /// Reads the word with the I-form layout, if it is an unconditional branch
    pub fn decode_i_form(&self) -> Option<IFormFields> {
        let word = IForm(self.word());
        if word.opcode() != Opcode::B.value() {
            return None;
        }

        Some(IFormFields {
            opcode: word.opcode() as u8,
            displacement: Displacement::from_field(word.li()),
            absolute: word.absolute(),
            link: word.link(),
        })
    }

    /// The same word with the link bit, the lowest bit of a branch, set to `link`
    pub fn with_link(self, link: bool) -> Instruction {
        let mut bytes = self.bytes;
        // a bool always fits a single bit
        bytes[3] = bits::insert(bytes[3], 0, 0, u8::from(link)).unwrap_or(bytes[3]);
        Instruction { bytes }
    }

    /// Where this instruction branches to when placed at `current`
    pub fn branch_target(&self, current: EffectiveAddress) -> Option<EffectiveAddress> {
        let fields = self.decode_i_form()?;
        let displacement = fields.displacement.bytes();
        let base = if fields.absolute { 0 } else { current.to_const() };
        Some(EffectiveAddress::from_const(
            base.wrapping_add_signed(displacement),
        ))
    }
}

/// Named constructors, one per mnemonic. Operands follow assembler order, so
/// `lwz r0, 0x14(r1)` becomes `LWZ(R0, 0x14, R1)`.
#[allow(non_snake_case)] // these are the mnemonics
impl Instruction {
    /// `lwz rT, d(rA)`
    pub fn LWZ(rt: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::LWZ, rt.into(), ra.into(), displacement)
    }

    /// `lbz rT, d(rA)`
    pub fn LBZ(rt: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::LBZ, rt.into(), ra.into(), displacement)
    }

    /// `stw rS, d(rA)`
    pub fn STW(rs: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::STW, rs.into(), ra.into(), displacement)
    }

    /// `stwu rS, d(rA)`, stores and writes the effective address back to `rA`
    pub fn STWU(rs: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::STWU, rs.into(), ra.into(), displacement)
    }

    /// `stb rS, d(rA)`
    pub fn STB(rs: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::STB, rs.into(), ra.into(), displacement)
    }

    /// `sth rS, d(rA)`
    pub fn STH(rs: Register, displacement: u16, ra: Register) -> Instruction {
        Self::d_form(Opcode::STH, rs.into(), ra.into(), displacement)
    }

    /// `addi rT, rA, SIMM`. With `rA = r0` the immediate itself is used.
    pub fn ADDI(rt: Register, ra: Register, immediate: u16) -> Instruction {
        Self::d_form(Opcode::ADDI, rt.into(), ra.into(), immediate)
    }

    /// `addis rT, rA, SIMM`, adds `immediate << 16`
    pub fn ADDIS(rt: Register, ra: Register, immediate: u16) -> Instruction {
        Self::d_form(Opcode::ADDIS, rt.into(), ra.into(), immediate)
    }

    /// `li rT, SIMM`, i.e. `addi rT, 0, SIMM`
    pub fn LI(rt: Register, immediate: u16) -> Instruction {
        Self::ADDI(rt, Register::R0, immediate)
    }

    /// `lis rT, SIMM`, i.e. `addis rT, 0, SIMM`
    pub fn LIS(rt: Register, immediate: u16) -> Instruction {
        Self::ADDIS(rt, Register::R0, immediate)
    }

    /// `ori rA, rS, UIMM`. The source sits in the first register field.
    pub fn ORI(ra: Register, rs: Register, immediate: u16) -> Instruction {
        Self::d_form(Opcode::ORI, rs.into(), ra.into(), immediate)
    }

    /// `oris rA, rS, UIMM`
    pub fn ORIS(ra: Register, rs: Register, immediate: u16) -> Instruction {
        Self::d_form(Opcode::ORIS, rs.into(), ra.into(), immediate)
    }

    /// `cmpwi rA, SIMM`, compares into cr0
    pub fn CMPWI(ra: Register, immediate: u16) -> Instruction {
        // crfD = 0, L = 0
        Self::d_form(Opcode::CMPI, 0, ra.into(), immediate)
    }

    /// `b target`, placed at `current`
    pub fn B(current: EffectiveAddress, target: EffectiveAddress) -> EncodeResult<Instruction> {
        Ok(Self::i_form(
            Displacement::between(current, target)?,
            false,
            false,
        ))
    }

    /// `bl target`, placed at `current`
    pub fn BL(current: EffectiveAddress, target: EffectiveAddress) -> EncodeResult<Instruction> {
        Ok(Self::i_form(
            Displacement::between(current, target)?,
            false,
            true,
        ))
    }

    /// `ba target`. Only reaches the lowest and highest 32 MiB of the address space.
    pub fn BA(target: EffectiveAddress) -> EncodeResult<Instruction> {
        let target = i64::from(target.to_const() as i32);
        Ok(Self::i_form(Displacement::new(target)?, true, false))
    }

    /// `bla target`
    pub fn BLA(target: EffectiveAddress) -> EncodeResult<Instruction> {
        let target = i64::from(target.to_const() as i32);
        Ok(Self::i_form(Displacement::new(target)?, true, true))
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(name) = literal::name_of(*self) {
            return write!(f, "{}", name);
        }
        match self.opcode() {
            Some(opcode) => write!(f, "{} {:08x}", opcode, self.word()),
            None => write!(f, "{:08x}", self.word()),
        }
    }
}

impl From<u32> for Instruction {
    fn from(word: u32) -> Self {
        Instruction::from_word(word)
    }
}

impl From<[u8; 4]> for Instruction {
    fn from(bytes: [u8; 4]) -> Self {
        Instruction::from_bytes(bytes)
    }
}

/// A sequence of instructions, laid out back to back
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instructions(Vec<Instruction>);

impl Instructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.0.push(instruction);
        self
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Size of the flattened sequence
    pub fn byte_len(&self) -> usize {
        self.0.len() * 4
    }

    /// The instructions concatenated in order
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(Instruction::bytes).collect()
    }
}

impl FromIterator<Instruction> for Instructions {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Instructions(iter.into_iter().collect())
    }
}

impl Extend<Instruction> for Instructions {
    fn extend<T: IntoIterator<Item = Instruction>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl From<Vec<Instruction>> for Instructions {
    fn from(value: Vec<Instruction>) -> Self {
        Instructions(value)
    }
}

impl<const N: usize> From<[Instruction; N]> for Instructions {
    fn from(value: [Instruction; N]) -> Self {
        Instructions(value.to_vec())
    }
}

impl From<Instructions> for Vec<u8> {
    fn from(value: Instructions) -> Self {
        value.to_bytes()
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = &'a Instruction;
    type IntoIter = core::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register::*;

    fn ea(address: u32) -> EffectiveAddress {
        EffectiveAddress::from_const(address)
    }

    #[track_caller]
    fn check(instruction: Instruction, expected: u32) {
        assert_eq!(
            instruction.word(),
            expected,
            "{} encoded as {:08x}, expected {:08x}",
            instruction,
            instruction.word(),
            expected
        );
    }

    #[test]
    fn test_d_form_mnemonics() {
        check(Instruction::LI(R3, 1), 0x3860_0001);
        check(Instruction::LI(R3, 0xfc14), 0x3860_fc14);
        check(Instruction::LIS(R4, 0x802e), 0x3c80_802e);
        check(Instruction::ORI(R4, R4, 0x97b8), 0x6084_97b8);
        check(Instruction::LWZ(R0, 0x14, R1), 0x8001_0014);
        check(Instruction::LWZ(R4, 0xc0, R28), 0x809c_00c0);
        check(Instruction::STW(R10, 0, R9), 0x9149_0000);
        check(Instruction::STH(R10, 0, R9), 0xb149_0000);
        check(Instruction::STWU(R1, 0xffe0, R1), 0x9421_ffe0);
        check(Instruction::ADDI(R1, R1, 0x10), 0x3821_0010);
        check(Instruction::CMPWI(R3, 0), 0x2c03_0000);
        check(Instruction::CMPWI(R9, 0xcafe), 0x2c09_cafe);
        check(Instruction::STB(R0, 8, R31), 0x981f_0008);
        check(Instruction::LBZ(R0, 8, R31), 0x881f_0008);
    }

    #[test]
    fn test_ori_register_order() {
        // ori r3, r4, 1: rS = r4 is in the first field
        check(Instruction::ORI(R3, R4, 1), 0x6083_0001);
        check(Instruction::ORI(R0, R0, 0), Instruction::NOP.word());
    }

    #[test]
    fn test_d_form_roundtrip() {
        let fields = Instruction::LWZ(R5, 0xc4, R28).decode_d_form();
        assert_eq!(
            fields,
            DFormFields {
                opcode: 32,
                rt: 5,
                ra: 28,
                immediate: 0xc4
            }
        );
        assert_eq!(Instruction::LI(R3, 0xfc14).decode_d_form().signed_immediate(), -1004);
    }

    #[test]
    fn test_encode_d_form_checks_fields() {
        assert_eq!(
            Instruction::encode_d_form(14, 3, 0, -1004),
            Ok(Instruction::LI(R3, 0xfc14))
        );
        assert_eq!(
            Instruction::encode_d_form(64, 0, 0, 0).unwrap_err().field(),
            Some(Field::Opcode)
        );
        assert_eq!(
            Instruction::encode_d_form(14, 32, 0, 0).unwrap_err().field(),
            Some(Field::TargetRegister)
        );
        assert_eq!(
            Instruction::encode_d_form(14, 0, 40, 0).unwrap_err().field(),
            Some(Field::SourceRegister)
        );
        assert_eq!(
            Instruction::encode_d_form(14, 0, 0, 0x1_0000),
            Err(EncodeError::OutOfRange {
                field: Field::Immediate,
                value: 0x1_0000
            })
        );
        assert!(Instruction::encode_d_form(14, 0, 0, -0x8001).is_err());
    }

    #[test]
    fn test_d_form_injective() {
        let mut seen = std::collections::BTreeSet::new();
        for opcode in [14u32, 15, 24, 32, 36] {
            for rt in 0..32 {
                for ra in [0u32, 1, 9, 31] {
                    for immediate in [0i32, 1, 0x7fff, 0xffff] {
                        let instruction =
                            Instruction::encode_d_form(opcode, rt, ra, immediate).unwrap();
                        assert!(seen.insert(instruction), "{} encoded twice", instruction);
                        let fields = instruction.decode_d_form();
                        assert_eq!(u32::from(fields.opcode), opcode);
                        assert_eq!(u32::from(fields.rt), rt);
                        assert_eq!(u32::from(fields.ra), ra);
                        assert_eq!(i32::from(fields.immediate), immediate);
                    }
                }
            }
        }
    }

    #[test]
    fn test_branches() {
        check(Instruction::BL(ea(0x800a_cae4), ea(0x800c_242c)).unwrap(), 0x4801_5949);
        check(Instruction::B(ea(0x800a_caf4), ea(0x800a_cbb0)).unwrap(), 0x4800_00bc);
        // backwards, bl overwriteIOSMemory
        check(Instruction::BL(ea(0x8025_9328), ea(0x8001_4428)).unwrap(), 0x4bdb_b101);
        // b .
        check(Instruction::B(ea(0x1000), ea(0x1000)).unwrap(), 0x4800_0000);
        check(Instruction::B(ea(0x1000), ea(0x0ffc)).unwrap(), 0x4bff_fffc);
    }

    #[test]
    fn test_branch_displacement_roundtrip() {
        let from = ea(0x8000_4000);
        let forward = Instruction::B(from, from + 8).unwrap();
        let fields = forward.decode_i_form().expect("is a branch");
        assert_eq!(fields.displacement.bytes(), 8);
        assert!(!fields.link);
        assert!(!fields.absolute);
        assert_eq!(forward.branch_target(from), Some(from + 8));

        let backward = Instruction::BL(from, from - 4).unwrap();
        let fields = backward.decode_i_form().expect("is a branch");
        assert_eq!(fields.displacement.bytes(), -4);
        assert!(fields.link);
        assert_eq!(backward.branch_target(from), Some(from - 4));
    }

    #[test]
    fn test_branch_misaligned() {
        let from = ea(0x8000_4000);
        assert_eq!(
            Instruction::B(from, from + 6),
            Err(EncodeError::MisalignedBranch(6))
        );
        assert_eq!(
            Instruction::BL(from, from - 2),
            Err(EncodeError::MisalignedBranch(-2))
        );
    }

    #[test]
    fn test_branch_out_of_range() {
        let from = ea(0x8000_0000);
        // 32 MiB is one word too far
        assert_eq!(
            Instruction::B(from, from + 0x200_0000),
            Err(EncodeError::OutOfRange {
                field: Field::Displacement,
                value: 0x200_0000
            })
        );
        assert!(Instruction::B(from, from + 0x1ff_fffc).is_ok());
        assert!(Instruction::B(from, from - 0x200_0000).is_ok());
        assert!(Instruction::B(from, from - 0x200_0004).is_err());
    }

    #[test]
    fn test_absolute_branch() {
        check(Instruction::BA(ea(0x100)).unwrap(), 0x4800_0102);
        check(Instruction::BLA(ea(0xffff_fff0)).unwrap(), 0x4bff_fff3);
        assert!(Instruction::BA(ea(0x8000_0000)).is_err());
        assert_eq!(
            Instruction::BA(ea(0x100)).unwrap().branch_target(ea(0x8000_0000)),
            Some(ea(0x100))
        );
    }

    #[test]
    fn test_with_link() {
        let current = ea(0x8000_1000);
        let target = ea(0x8000_0ff0);
        let call = Instruction::B(current, target).unwrap().with_link(true);
        assert_eq!(call, Instruction::BL(current, target).unwrap());
        assert_eq!(call.with_link(false), Instruction::B(current, target).unwrap());
        assert_eq!(call.with_link(true), call);
        assert_eq!(Instruction::BLR.with_link(true).word(), 0x4e80_0021);
    }

    #[test]
    fn test_displacement_field() {
        let displacement = Displacement::new(-4).unwrap();
        assert_eq!(displacement.field(), 0xff_ffff);
        assert_eq!(Displacement::from_field(0xff_ffff), displacement);
        assert_eq!(
            bits::be_u24(Displacement::new(0x15948).unwrap().field()),
            Ok([0x00, 0x56, 0x52])
        );
    }

    #[test]
    fn test_decode_i_form_rejects_other_opcodes() {
        assert_eq!(Instruction::BLR.decode_i_form(), None);
        assert_eq!(Instruction::LI(R3, 1).decode_i_form(), None);
    }

    #[test]
    fn test_opcode() {
        assert_eq!(Instruction::LWZ(R0, 0, R1).opcode(), Some(Opcode::LWZ));
        assert_eq!(Instruction::BLR.opcode(), Some(Opcode::XL));
        assert_eq!(Instruction::from_word(0xfc00_0000).opcode(), None);
        assert_eq!(Instruction::from_word(0xfc00_0000).primary_opcode(), 63);
    }

    #[test]
    fn test_sequence_bytes() {
        let sequence = Instructions::from([
            Instruction::LI(R3, 1),
            Instruction::BLR,
            Instruction::PADDING,
        ]);
        assert_eq!(sequence.byte_len(), 12);
        assert_eq!(
            sequence.to_bytes(),
            vec![0x38, 0x60, 0x00, 0x01, 0x4e, 0x80, 0x00, 0x20, 0, 0, 0, 0]
        );

        let collected: EncodeResult<Instructions> = [
            Ok(Instruction::LWZ(R3, 0xac, R28)),
            Instruction::BL(ea(0x800a_cae4), ea(0x800c_242c)),
        ]
        .into_iter()
        .collect();
        assert_eq!(Vec::<u8>::from(collected.unwrap()).len(), 8);
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::BLR.to_string(), "blr");
        assert_eq!(Instruction::LI(R3, 1).to_string(), "ADDI 38600001");
        assert_eq!(Instruction::from_word(0xfc00_0000).to_string(), "fc000000");
    }
}
