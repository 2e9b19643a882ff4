//! MLS variable-length integers.
//!
//! Length prefixes of opaque vectors and lists use the variable-length integer
//! of RFC 9420 section 2.1.2. The two most significant bits of the first byte
//! select the width:
//!
//! | Prefix | Width | Usable bits | Range |
//! |---|---|---|---|
//! | `00` | 1 byte | 6 | 0..=63 |
//! | `01` | 2 bytes | 14 | 0..=16383 |
//! | `10` | 4 bytes | 30 | 0..=2^30-1 |
//! | `11` | reserved | | rejected |
//!
//! A value must use the shortest width that holds it. Accepting longer forms
//! would give one length several encodings, and two parties hashing the "same"
//! structure would disagree.

use bytes::BufMut;

use super::Reader;
use crate::errors::{CodecError, Result};

/// Largest value a variable-length integer can carry.
pub const MAX_VARINT: usize = (1 << 30) - 1;

const ONE_BYTE_LIMIT: usize = 1 << 6;
const TWO_BYTE_LIMIT: usize = 1 << 14;

/// Number of bytes the encoding of `value` occupies.
pub fn varint_len(value: usize) -> usize {
    if value < ONE_BYTE_LIMIT {
        1
    } else if value < TWO_BYTE_LIMIT {
        2
    } else {
        4
    }
}

/// Write `value` in its minimal width.
pub fn write_varint(dst: &mut impl BufMut, field: &'static str, value: usize) -> Result<()> {
    if value < ONE_BYTE_LIMIT {
        dst.put_u8(value as u8);
    } else if value < TWO_BYTE_LIMIT {
        dst.put_u16(0x4000 | value as u16);
    } else if value <= MAX_VARINT {
        dst.put_u32(0x8000_0000 | value as u32);
    } else {
        return Err(CodecError::LengthOverflow { field, len: value });
    }

    Ok(())
}

/// Read a variable-length integer, rejecting reserved and non-minimal forms.
pub fn read_varint(reader: &mut Reader<'_>, field: &'static str) -> Result<usize> {
    let first = reader.peek_u8(field)?;

    match first >> 6 {
        0b00 => Ok(usize::from(reader.read_u8(field)?)),
        0b01 => {
            let value = usize::from(reader.read_u16(field)? & 0x3FFF);
            if value < ONE_BYTE_LIMIT {
                return Err(CodecError::InvalidLength { field, reason: "non-minimal varint" });
            }
            Ok(value)
        },
        0b10 => {
            let value = (reader.read_u32(field)? & 0x3FFF_FFFF) as usize;
            if value < TWO_BYTE_LIMIT {
                return Err(CodecError::InvalidLength { field, reason: "non-minimal varint" });
            }
            Ok(value)
        },
        _ => Err(CodecError::InvalidLength { field, reason: "reserved varint prefix" }),
    }
}
