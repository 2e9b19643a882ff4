//! Proposals: staged changes to a group, applied by a later Commit.
//!
//! A proposal is a `uint16` [`ProposalType`] followed by exactly one payload.
//! Decoding resolves the type before touching any payload byte and parses only
//! the matching payload.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, write_list, write_opaque},
    enums::{CipherSuite, ProposalType, ProtocolVersion, PskType, ResumptionPskUsage},
    errors::Result,
    key_package::KeyPackage,
    leaf_node::LeafNode,
    primitives::Extension,
};

/// Where a pre-shared key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Psk {
    /// Key provisioned outside MLS
    External {
        /// Identifier agreed with the provisioner
        psk_id: Vec<u8>,
    },
    /// Resumption secret of an earlier epoch
    Resumption {
        /// Why the secret is being resumed
        usage: ResumptionPskUsage,
        /// Group the secret belongs to
        psk_group_id: Vec<u8>,
        /// Epoch the secret belongs to
        psk_epoch: u64,
    },
}

impl Psk {
    /// Wire discriminant
    pub const fn psk_type(&self) -> PskType {
        match self {
            Self::External { .. } => PskType::External,
            Self::Resumption { .. } => PskType::Resumption,
        }
    }
}

/// Identifies a pre-shared key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreSharedKeyId {
    /// Key source
    pub psk: Psk,
    /// Fresh nonce mixed into the key schedule
    pub psk_nonce: Vec<u8>,
}

impl Encode for PreSharedKeyId {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.psk.psk_type().encode(dst)?;
        match &self.psk {
            Psk::External { psk_id } => write_opaque(dst, "PreSharedKeyId.psk_id", psk_id)?,
            Psk::Resumption { usage, psk_group_id, psk_epoch } => {
                usage.encode(dst)?;
                write_opaque(dst, "PreSharedKeyId.psk_group_id", psk_group_id)?;
                dst.put_u64(*psk_epoch);
            },
        }
        write_opaque(dst, "PreSharedKeyId.psk_nonce", &self.psk_nonce)
    }
}

impl Decode for PreSharedKeyId {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let psk = match PskType::read(reader, "PreSharedKeyId.psktype")? {
            PskType::External => Psk::External { psk_id: reader.read_opaque("PreSharedKeyId.psk_id")? },
            PskType::Resumption => Psk::Resumption {
                usage: ResumptionPskUsage::read(reader, "PreSharedKeyId.usage")?,
                psk_group_id: reader.read_opaque("PreSharedKeyId.psk_group_id")?,
                psk_epoch: reader.read_u64("PreSharedKeyId.psk_epoch")?,
            },
        };

        Ok(Self { psk, psk_nonce: reader.read_opaque("PreSharedKeyId.psk_nonce")? })
    }
}

/// Add a member using its key package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Add {
    /// Joiner's key package
    pub key_package: KeyPackage,
}

/// Replace the sender's leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// New leaf, with source update
    pub leaf_node: LeafNode,
}

/// Remove the member at a leaf index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remove {
    /// Leaf index of the removed member
    pub removed: u32,
}

/// Inject a pre-shared key into the next epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreSharedKey {
    /// Key identifier
    pub psk: PreSharedKeyId,
}

/// Close the group and restart it with new parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReInit {
    /// ID of the new group
    pub group_id: Vec<u8>,
    /// Version of the new group
    pub version: ProtocolVersion,
    /// Suite of the new group
    pub cipher_suite: CipherSuite,
    /// Group context extensions of the new group
    pub extensions: Vec<Extension>,
}

/// Join by external commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalInit {
    /// KEM output against the group's external public key
    pub kem_output: Vec<u8>,
}

/// Replace the group context extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupContextExtensions {
    /// New extension set
    pub extensions: Vec<Extension>,
}

/// A proposed change to the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// Add a member
    Add(Add),
    /// Update the sender's leaf
    Update(Update),
    /// Remove a member
    Remove(Remove),
    /// Inject a PSK
    PreSharedKey(PreSharedKey),
    /// Reinitialize the group
    ReInit(ReInit),
    /// External join
    ExternalInit(ExternalInit),
    /// Replace group context extensions
    GroupContextExtensions(GroupContextExtensions),
}

impl Proposal {
    /// Wire discriminant
    pub const fn proposal_type(&self) -> ProposalType {
        match self {
            Self::Add(_) => ProposalType::Add,
            Self::Update(_) => ProposalType::Update,
            Self::Remove(_) => ProposalType::Remove,
            Self::PreSharedKey(_) => ProposalType::Psk,
            Self::ReInit(_) => ProposalType::ReInit,
            Self::ExternalInit(_) => ProposalType::ExternalInit,
            Self::GroupContextExtensions(_) => ProposalType::GroupContextExtensions,
        }
    }
}

impl Encode for Proposal {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.proposal_type().encode(dst)?;
        match self {
            Self::Add(add) => add.key_package.encode(dst),
            Self::Update(update) => update.leaf_node.encode(dst),
            Self::Remove(remove) => {
                dst.put_u32(remove.removed);
                Ok(())
            },
            Self::PreSharedKey(psk) => psk.psk.encode(dst),
            Self::ReInit(reinit) => {
                write_opaque(dst, "ReInit.group_id", &reinit.group_id)?;
                reinit.version.encode(dst)?;
                reinit.cipher_suite.encode(dst)?;
                write_list(dst, "ReInit.extensions", &reinit.extensions)
            },
            Self::ExternalInit(init) => write_opaque(dst, "ExternalInit.kem_output", &init.kem_output),
            Self::GroupContextExtensions(gce) => {
                write_list(dst, "GroupContextExtensions.extensions", &gce.extensions)
            },
        }
    }
}

impl Decode for Proposal {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let proposal = match ProposalType::read(reader, "Proposal.proposal_type")? {
            ProposalType::Add => Self::Add(Add { key_package: KeyPackage::decode(reader)? }),
            ProposalType::Update => Self::Update(Update { leaf_node: LeafNode::decode(reader)? }),
            ProposalType::Remove => Self::Remove(Remove { removed: reader.read_u32("Remove.removed")? }),
            ProposalType::Psk => Self::PreSharedKey(PreSharedKey { psk: PreSharedKeyId::decode(reader)? }),
            ProposalType::ReInit => Self::ReInit(ReInit {
                group_id: reader.read_opaque("ReInit.group_id")?,
                version: ProtocolVersion::read(reader, "ReInit.version")?,
                cipher_suite: CipherSuite::decode(reader)?,
                extensions: reader.read_list("ReInit.extensions")?,
            }),
            ProposalType::ExternalInit => Self::ExternalInit(ExternalInit {
                kem_output: reader.read_opaque("ExternalInit.kem_output")?,
            }),
            ProposalType::GroupContextExtensions => {
                Self::GroupContextExtensions(GroupContextExtensions {
                    extensions: reader.read_list("GroupContextExtensions.extensions")?,
                })
            },
        };

        Ok(proposal)
    }
}
