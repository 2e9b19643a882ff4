//! Leaf nodes: a member's public identity and key record.
//!
//! The field after the source tag depends on the tag: a key package leaf
//! carries its lifetime, a commit leaf carries the parent hash, and an update
//! leaf carries nothing. [`LeafNodeSourceData`] holds exactly one of the three
//! so a leaf with both a lifetime and a parent hash cannot be built.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, write_list, write_opaque},
    enums::LeafNodeSource,
    errors::{CodecError, Result},
    primitives::{Capabilities, Credential, Extension, Lifetime},
};

/// Source-dependent part of a leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafNodeSourceData {
    /// Leaf published in a key package
    KeyPackage(Lifetime),
    /// Leaf sent in an Update proposal
    Update,
    /// Leaf sent in a Commit's update path
    Commit {
        /// Hash binding the leaf to its new parent nodes
        parent_hash: Vec<u8>,
    },
}

impl LeafNodeSourceData {
    /// Wire discriminant
    pub const fn source(&self) -> LeafNodeSource {
        match self {
            Self::KeyPackage(_) => LeafNodeSource::KeyPackage,
            Self::Update => LeafNodeSource::Update,
            Self::Commit { .. } => LeafNodeSource::Commit,
        }
    }
}

impl Encode for LeafNodeSourceData {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.source().encode(dst)?;
        match self {
            Self::KeyPackage(lifetime) => lifetime.encode(dst),
            Self::Update => Ok(()),
            Self::Commit { parent_hash } => {
                write_opaque(dst, "LeafNode.parent_hash", parent_hash)
            },
        }
    }
}

impl Decode for LeafNodeSourceData {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match LeafNodeSource::read(reader, "LeafNode.leaf_node_source")? {
            LeafNodeSource::KeyPackage => Ok(Self::KeyPackage(Lifetime::decode(reader)?)),
            LeafNodeSource::Update => Ok(Self::Update),
            LeafNodeSource::Commit => {
                Ok(Self::Commit { parent_hash: reader.read_opaque("LeafNode.parent_hash")? })
            },
        }
    }
}

/// A member's leaf in the ratchet tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// HPKE public key
    pub encryption_key: Vec<u8>,
    /// Signature public key
    pub signature_key: Vec<u8>,
    /// Identity binding
    pub credential: Credential,
    /// Supported features
    pub capabilities: Capabilities,
    /// Source tag and its dependent field
    pub source: LeafNodeSourceData,
    /// Leaf extensions
    pub extensions: Vec<Extension>,
    /// Signature over [`LeafNodeTbs`]
    pub signature: Vec<u8>,
}

impl LeafNode {
    /// Source tag of this leaf
    pub const fn leaf_node_source(&self) -> LeafNodeSource {
        self.source.source()
    }

    /// Fields covered by the signature, in wire order.
    fn encode_content(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "LeafNode.encryption_key", &self.encryption_key)?;
        write_opaque(dst, "LeafNode.signature_key", &self.signature_key)?;
        self.credential.encode(dst)?;
        self.capabilities.encode(dst)?;
        self.source.encode(dst)?;
        write_list(dst, "LeafNode.extensions", &self.extensions)
    }
}

impl Encode for LeafNode {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.encode_content(dst)?;
        write_opaque(dst, "LeafNode.signature", &self.signature)
    }
}

impl Decode for LeafNode {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            encryption_key: reader.read_opaque("LeafNode.encryption_key")?,
            signature_key: reader.read_opaque("LeafNode.signature_key")?,
            credential: Credential::decode(reader)?,
            capabilities: Capabilities::decode(reader)?,
            source: LeafNodeSourceData::decode(reader)?,
            extensions: reader.read_list("LeafNode.extensions")?,
            signature: reader.read_opaque("LeafNode.signature")?,
        })
    }
}

/// Group position a leaf signature is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafNodeGroupBinding<'a> {
    /// Group the leaf belongs to
    pub group_id: &'a [u8],
    /// Leaf position in the tree
    pub leaf_index: u32,
}

/// Signature input of a leaf node.
///
/// Every leaf field except the signature itself, followed, for update and
/// commit leaves, by the group ID and leaf index the leaf is bound to. A key
/// package leaf is not yet in any group and carries no binding.
///
/// # Invariants
///
/// - The binding is present iff the source is update or commit. Enforced by
///   [`LeafNodeTbs::new`].
#[derive(Debug, Clone, Copy)]
pub struct LeafNodeTbs<'a> {
    leaf_node: &'a LeafNode,
    binding: Option<LeafNodeGroupBinding<'a>>,
}

impl<'a> LeafNodeTbs<'a> {
    /// Build the signature input for `leaf_node`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::MissingField`] if an update or commit leaf has no
    ///   binding.
    /// - [`CodecError::UnexpectedField`] if a key package leaf has one.
    pub fn new(leaf_node: &'a LeafNode, binding: Option<LeafNodeGroupBinding<'a>>) -> Result<Self> {
        match (leaf_node.leaf_node_source(), binding.is_some()) {
            (LeafNodeSource::KeyPackage, true) => {
                Err(CodecError::UnexpectedField { field: "LeafNodeTbs.group_id" })
            },
            (LeafNodeSource::Update | LeafNodeSource::Commit, false) => {
                Err(CodecError::MissingField { field: "LeafNodeTbs.group_id" })
            },
            _ => Ok(Self { leaf_node, binding }),
        }
    }
}

impl Encode for LeafNodeTbs<'_> {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.leaf_node.encode_content(dst)?;
        if let Some(binding) = &self.binding {
            write_opaque(dst, "LeafNodeTbs.group_id", binding.group_id)?;
            dst.put_u32(binding.leaf_index);
        }
        Ok(())
    }
}
