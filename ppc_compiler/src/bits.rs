//! Bit-field codec
//!
//! Small helpers to move values in and out of bit ranges. Bit numbering follows
//! the usual LSB-first convention: bit 7 is the most significant bit of a byte.
//! The instruction layouts in [`crate::instruction`] are built on top of these.

use thiserror_no_std::Error;

/// A value did not fit into the bits reserved for it.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("value {value:#x} does not fit into {bits} bits")]
pub struct RangeError {
    pub value: u32,
    pub bits: u32,
}

/// Result type for bit range operations
pub type RangeResult<T> = Result<T, RangeError>;

/// Mask covering the lowest `bits` bits.
pub const fn low_mask(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Checks that `value` is representable with `bits` bits.
pub const fn check_width(value: u32, bits: u32) -> RangeResult<u32> {
    if (value & !low_mask(bits)) != 0 {
        Err(RangeError { value, bits })
    } else {
        Ok(value)
    }
}

/// Reads bits `msb..=lsb` of `byte`, shifted down to bit 0.
///
/// # Panics
///
/// Panics if the range does not lie within a byte or `lsb > msb`.
#[track_caller]
pub fn extract(byte: u8, msb: u8, lsb: u8) -> u8 {
    assert!(msb < 8 && lsb <= msb, "invalid bit range {msb}..={lsb}");
    (byte >> lsb) & low_mask(u32::from(msb - lsb + 1)) as u8
}

/// Writes `value` into bits `msb..=lsb` of `byte`, leaving all other bits untouched.
///
/// # Panics
///
/// Panics if the range does not lie within a byte or `lsb > msb`.
#[track_caller]
pub fn insert(byte: u8, msb: u8, lsb: u8, value: u8) -> RangeResult<u8> {
    assert!(msb < 8 && lsb <= msb, "invalid bit range {msb}..={lsb}");
    let width = u32::from(msb - lsb + 1);
    check_width(u32::from(value), width)?;

    let mask = (low_mask(width) as u8) << lsb;
    Ok((byte & !mask) | (value << lsb))
}

/// Big-endian representation of a 16 bit value
pub const fn be_u16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Big-endian representation of a 24 bit value.
///
/// The branch displacement field is exactly 24 bits wide, anything larger is an error.
pub const fn be_u24(value: u32) -> RangeResult<[u8; 3]> {
    match check_width(value, 24) {
        Ok(value) => {
            let [_, high, mid, low] = value.to_be_bytes();
            Ok([high, mid, low])
        }
        Err(err) => Err(err),
    }
}

/// Inverse of [`be_u24`]
pub const fn from_be_u24(bytes: [u8; 3]) -> u32 {
    u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]])
}

/// Interprets the lowest `bits` bits of `value` as a two's complement number.
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Checks that `value` is representable as a two's complement number with `bits` bits.
pub const fn fits_signed(value: i64, bits: u32) -> bool {
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract() {
        assert_eq!(extract(0b1011_0110, 7, 2), 0b10_1101);
        assert_eq!(extract(0b1011_0110, 1, 0), 0b10);
        assert_eq!(extract(0xff, 4, 4), 1);
        assert_eq!(extract(0x4e, 7, 2), 19);
    }

    #[test]
    fn test_insert_keeps_other_bits() {
        assert_eq!(insert(0b0000_0011, 7, 2, 0b10_0100), Ok(0b1001_0011));
        assert_eq!(insert(0xff, 5, 3, 0), Ok(0b1100_0111));
        assert_eq!(insert(0, 0, 0, 1), Ok(1));
    }

    #[test]
    fn test_insert_rejects_wide_value() {
        assert_eq!(
            insert(0, 2, 0, 0b1000),
            Err(RangeError {
                value: 0b1000,
                bits: 3
            })
        );
    }

    #[test]
    #[should_panic]
    fn test_extract_invalid_range() {
        extract(0, 8, 0);
    }

    #[test]
    fn test_be_u16() {
        assert_eq!(be_u16(0xfc14), [0xfc, 0x14]);
        assert_eq!(be_u16(0x0001), [0x00, 0x01]);
    }

    #[test]
    fn test_be_u24() {
        assert_eq!(be_u24(0x00ab_cdef), Ok([0xab, 0xcd, 0xef]));
        assert_eq!(be_u24(0x00ff_ffff), Ok([0xff, 0xff, 0xff]));
        assert_eq!(
            be_u24(0x0100_0000),
            Err(RangeError {
                value: 0x0100_0000,
                bits: 24
            })
        );
        assert_eq!(from_be_u24([0x12, 0x34, 0x56]), 0x12_3456);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xff_ffff, 24), -1);
        assert_eq!(sign_extend(0x7f_ffff, 24), 0x7f_ffff);
        assert_eq!(sign_extend(0x80_0000, 24), -0x80_0000);
        assert_eq!(sign_extend(0xfc14, 16), -1004);
    }

    #[test]
    fn test_fits_signed() {
        assert!(fits_signed(-0x80_0000, 24));
        assert!(fits_signed(0x7f_ffff, 24));
        assert!(!fits_signed(0x80_0000, 24));
        assert!(!fits_signed(-0x80_0001, 24));
    }
}
