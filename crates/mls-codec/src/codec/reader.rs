//! Bounds-checked cursor over an input buffer.

use super::{Decode, varint};
use crate::errors::{CodecError, Result};

/// Cursor over a borrowed byte slice.
///
/// This is the only place buffer bounds are checked. Every higher-level
/// decoder pulls bytes through these methods, so a declared length that runs
/// past the end of the input is caught here before anything is allocated.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with [`CodecError::TrailingBytes`] unless every byte was consumed.
    pub fn finish(&self, field: &'static str) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes { field, remaining }),
        }
    }

    /// Borrow the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::Truncated { field, needed: len, available });
        }

        let start = self.offset;
        self.offset += len;
        Ok(&self.bytes[start..self.offset])
    }

    /// Read a fixed-size byte array (`opaque[N]`).
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, field)?);
        Ok(out)
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self, field: &'static str) -> Result<u8> {
        self.bytes
            .get(self.offset)
            .copied()
            .ok_or(CodecError::Truncated { field, needed: 1, available: 0 })
    }

    /// Read a `uint8`.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(u8::from_be_bytes(self.read_array(field)?))
    }

    /// Read a big-endian `uint16`.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array(field)?))
    }

    /// Read a big-endian `uint32`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array(field)?))
    }

    /// Read a big-endian `uint64`.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array(field)?))
    }

    /// Read an `opaque<V>`: varint length followed by that many bytes.
    pub fn read_opaque(&mut self, field: &'static str) -> Result<Vec<u8>> {
        let len = varint::read_varint(self, field)?;
        Ok(self.read_bytes(len, field)?.to_vec())
    }

    /// Read a `T list<V>`.
    ///
    /// The prefix counts encoded body bytes, not elements. Elements are parsed
    /// from a sub-reader bounded to exactly that body, so an element that
    /// would run past the body is an inconsistent length rather than a read
    /// into the next field.
    pub fn read_list<T: Decode>(&mut self, field: &'static str) -> Result<Vec<T>> {
        let len = varint::read_varint(self, field)?;
        Self::new(self.read_bytes(len, field)?).read_elements(field)
    }

    /// Read elements until the input is exhausted.
    ///
    /// Used for list bodies whose length prefix has already been consumed.
    pub fn read_elements<T: Decode>(&mut self, field: &'static str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while !self.is_empty() {
            let item = T::decode(self).map_err(|err| match err {
                CodecError::Truncated { .. } => {
                    CodecError::InvalidLength { field, reason: "element overruns list body" }
                },
                other => other,
            })?;
            items.push(item);
        }

        Ok(items)
    }

    /// Read an `optional<T>`: presence byte, then `T` when present.
    pub fn read_optional<T: Decode>(&mut self, field: &'static str) -> Result<Option<T>> {
        match self.read_u8(field)? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(self)?)),
            value => Err(CodecError::InvalidPresence { field, value }),
        }
    }
}
