//! Commits and the update path a committer sends with them.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, encode_elements, write_list, write_opaque, write_optional},
    enums::ProposalOrRefType,
    errors::Result,
    leaf_node::LeafNode,
    primitives::HpkeCiphertext,
    proposal::Proposal,
};

/// A proposal carried inline in a commit, or a reference to one sent earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOrRef {
    /// Inline proposal
    Proposal(Proposal),
    /// Hash reference to a proposal sent in an earlier message
    Reference(Vec<u8>),
}

impl ProposalOrRef {
    /// Wire discriminant
    pub const fn proposal_or_ref_type(&self) -> ProposalOrRefType {
        match self {
            Self::Proposal(_) => ProposalOrRefType::Proposal,
            Self::Reference(_) => ProposalOrRefType::Reference,
        }
    }
}

impl Encode for ProposalOrRef {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.proposal_or_ref_type().encode(dst)?;
        match self {
            Self::Proposal(proposal) => proposal.encode(dst),
            Self::Reference(reference) => write_opaque(dst, "ProposalOrRef.reference", reference),
        }
    }
}

impl Decode for ProposalOrRef {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match ProposalOrRefType::read(reader, "ProposalOrRef.type")? {
            ProposalOrRefType::Proposal => Ok(Self::Proposal(Proposal::decode(reader)?)),
            ProposalOrRefType::Reference => {
                Ok(Self::Reference(reader.read_opaque("ProposalOrRef.reference")?))
            },
        }
    }
}

/// One copath node's share of an update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePathNode {
    /// New HPKE public key for the node
    pub encryption_key: Vec<u8>,
    /// Path secret sealed to each member of the node's resolution
    pub encrypted_path_secret: Vec<HpkeCiphertext>,
}

impl Encode for UpdatePathNode {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "UpdatePathNode.encryption_key", &self.encryption_key)?;
        write_list(dst, "UpdatePathNode.encrypted_path_secret", &self.encrypted_path_secret)
    }
}

impl Decode for UpdatePathNode {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            encryption_key: reader.read_opaque("UpdatePathNode.encryption_key")?,
            encrypted_path_secret: reader.read_list("UpdatePathNode.encrypted_path_secret")?,
        })
    }
}

/// Fresh keys for the committer's direct path.
///
/// The number of nodes is fixed by the tree shape, which this crate does not
/// see. Any count decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePath {
    /// Committer's new leaf, with source commit
    pub leaf_node: LeafNode,
    /// One entry per filtered direct-path node, leaf to root
    pub nodes: Vec<UpdatePathNode>,
}

impl Encode for UpdatePath {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.leaf_node.encode(dst)?;
        write_list(dst, "UpdatePath.nodes", &self.nodes)
    }
}

impl Decode for UpdatePath {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { leaf_node: LeafNode::decode(reader)?, nodes: reader.read_list("UpdatePath.nodes")? })
    }
}

/// Applies a set of proposals and advances the epoch.
///
/// Proposals are held as a typed list. Some peers treat the list as an opaque
/// pre-serialized blob instead; [`Commit::proposals_blob`] and
/// [`Commit::from_proposals_blob`] convert to and from that view, and both put
/// the same bytes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Proposals applied by this commit, in order
    pub proposals: Vec<ProposalOrRef>,
    /// Present when the commit refreshes the committer's path
    pub path: Option<UpdatePath>,
}

impl Commit {
    /// Encoded proposal list body, without its length prefix.
    pub fn proposals_blob(&self) -> Result<Vec<u8>> {
        encode_elements(&self.proposals)
    }

    /// Build a commit from a pre-serialized proposal list body.
    ///
    /// # Errors
    ///
    /// Fails if `blob` is not a whole number of well-formed `ProposalOrRef`
    /// values.
    pub fn from_proposals_blob(blob: &[u8], path: Option<UpdatePath>) -> Result<Self> {
        let proposals = Reader::new(blob).read_elements("Commit.proposals")?;
        Ok(Self { proposals, path })
    }
}

impl Encode for Commit {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_list(dst, "Commit.proposals", &self.proposals)?;
        write_optional(dst, self.path.as_ref())
    }
}

impl Decode for Commit {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            proposals: reader.read_list("Commit.proposals")?,
            path: reader.read_optional("Commit.path")?,
        })
    }
}
