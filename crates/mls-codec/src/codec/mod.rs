//! Binary stream substrate.
//!
//! MLS structures use the TLS presentation language as profiled by RFC 9420:
//! big-endian fixed-width integers, `opaque<V>` byte strings and `T list<V>`
//! sequences prefixed by a variable-length integer, and `optional<T>` values
//! carried behind a one-byte presence flag. Nothing on the wire is
//! self-describing, so encoder and decoder must walk the same structure in the
//! same order.
//!
//! Structures implement [`Encode`] and either [`Decode`] or, when their shape
//! depends on a discriminant held by an enclosing structure, [`DecodeWith`].

mod reader;
pub mod varint;

use bytes::BufMut;
pub use reader::Reader;
pub use varint::MAX_VARINT;

use crate::errors::Result;

/// Serialize a value onto a buffer.
pub trait Encode {
    /// Append the wire encoding of `self` to `dst`.
    ///
    /// Fails only when a byte string or list is too long for its length
    /// prefix. Every other invariant is checked when the value is built.
    fn encode(&self, dst: &mut impl BufMut) -> Result<()>;
}

/// Deserialize a value whose shape is fully determined by its own bytes.
pub trait Decode: Sized {
    /// Read one value from `reader`, advancing past it.
    fn decode(reader: &mut Reader<'_>) -> Result<Self>;
}

/// Deserialize a value whose shape depends on a discriminant owned by an
/// enclosing structure.
///
/// The discriminant is never re-read from the stream at this point; the
/// caller already knows it and passes it in.
pub trait DecodeWith<Ctx>: Sized {
    /// Read one value from `reader` using `ctx` to select its shape.
    fn decode_with(reader: &mut Reader<'_>, ctx: Ctx) -> Result<Self>;
}

/// Encode a value into a fresh vector.
pub fn encode_to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    value.encode(&mut buf)?;
    Ok(buf)
}

/// Decode a value from the front of `bytes`, returning it with the number of
/// bytes consumed.
pub fn decode_prefix<T: Decode>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut reader = Reader::new(bytes);
    let value = T::decode(&mut reader)?;
    Ok((value, reader.position()))
}

/// Decode a value that must occupy all of `bytes`.
pub fn decode_exact<T: Decode>(bytes: &[u8], field: &'static str) -> Result<T> {
    let mut reader = Reader::new(bytes);
    let value = T::decode(&mut reader)?;
    reader.finish(field)?;
    Ok(value)
}

/// Write an `opaque<V>`.
pub fn write_opaque(dst: &mut impl BufMut, field: &'static str, bytes: &[u8]) -> Result<()> {
    varint::write_varint(dst, field, bytes.len())?;
    dst.put_slice(bytes);
    Ok(())
}

/// Write a `T list<V>`.
///
/// The length prefix counts body bytes, so the body is encoded first.
pub fn write_list<T: Encode>(dst: &mut impl BufMut, field: &'static str, items: &[T]) -> Result<()> {
    write_opaque(dst, field, &encode_elements(items)?)
}

/// Concatenated encodings of `items`, without a length prefix.
pub fn encode_elements<T: Encode>(items: &[T]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    for item in items {
        item.encode(&mut body)?;
    }
    Ok(body)
}

/// Write an `optional<T>`.
pub fn write_optional<T: Encode>(dst: &mut impl BufMut, value: Option<&T>) -> Result<()> {
    match value {
        Some(inner) => {
            dst.put_u8(1);
            inner.encode(dst)
        },
        None => {
            dst.put_u8(0);
            Ok(())
        },
    }
}

macro_rules! impl_uint {
    ($ty:ty, $put:ident, $read:ident, $name:literal) => {
        impl Encode for $ty {
            fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
                dst.$put(*self);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                reader.$read($name)
            }
        }
    };
}

impl_uint!(u8, put_u8, read_u8, "uint8");
impl_uint!(u16, put_u16, read_u16, "uint16");
impl_uint!(u32, put_u32, read_u32, "uint32");
impl_uint!(u64, put_u64, read_u64, "uint64");
