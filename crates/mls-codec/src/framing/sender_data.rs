use bytes::BufMut;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    codec::{Decode, Encode, Reader},
    errors::{CodecError, Result},
};

/// Plaintext of a private message's encrypted sender data.
///
/// Fixed 12-byte layout: leaf index, generation, reuse guard. Every bit
/// pattern is valid, so the struct is cast directly from the input.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct SenderData {
    leaf_index: [u8; 4],
    generation: [u8; 4],
    reuse_guard: [u8; 4],
}

impl SenderData {
    /// Encoded size
    pub const SIZE: usize = 12;

    /// Build sender data from its fields.
    pub const fn new(leaf_index: u32, generation: u32, reuse_guard: [u8; 4]) -> Self {
        Self {
            leaf_index: leaf_index.to_be_bytes(),
            generation: generation.to_be_bytes(),
            reuse_guard,
        }
    }

    /// View `bytes` as sender data without copying.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Truncated`] if `bytes` is shorter than [`Self::SIZE`].
    /// - [`CodecError::TrailingBytes`] if it is longer.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        Self::ref_from_bytes(bytes).map_err(|_| match bytes.len() {
            available if available < Self::SIZE => {
                CodecError::Truncated { field: "SenderData", needed: Self::SIZE, available }
            },
            len => CodecError::TrailingBytes { field: "SenderData", remaining: len - Self::SIZE },
        })
    }

    /// Sender's leaf index
    pub const fn leaf_index(&self) -> u32 {
        u32::from_be_bytes(self.leaf_index)
    }

    /// Ratchet generation the content key was taken from
    pub const fn generation(&self) -> u32 {
        u32::from_be_bytes(self.generation)
    }

    /// Random bytes XORed into the first bytes of the content nonce
    pub const fn reuse_guard(&self) -> [u8; 4] {
        self.reuse_guard
    }
}

impl Encode for SenderData {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        dst.put_slice(self.as_bytes());
        Ok(())
    }
}

impl Decode for SenderData {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Self::from_bytes(reader.read_bytes(Self::SIZE, "SenderData")?).copied()
    }
}
