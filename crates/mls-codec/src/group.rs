//! Group state summaries and the Welcome that hands them to new members.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, write_list, write_opaque, write_optional},
    enums::{CipherSuite, ProtocolVersion},
    errors::Result,
    primitives::{Extension, HpkeCiphertext, PathSecret},
    proposal::PreSharedKeyId,
};

/// Shared view of the group at one epoch.
///
/// Every member holds an identical copy. Member and new-member-commit
/// signatures cover it, which binds a message to its group and epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupContext {
    /// Protocol version
    pub version: ProtocolVersion,
    /// Group cipher suite
    pub cipher_suite: CipherSuite,
    /// Group identifier
    pub group_id: Vec<u8>,
    /// Current epoch
    pub epoch: u64,
    /// Root hash of the ratchet tree
    pub tree_hash: Vec<u8>,
    /// Transcript hash through the last commit
    pub confirmed_transcript_hash: Vec<u8>,
    /// Group context extensions
    pub extensions: Vec<Extension>,
}

impl Encode for GroupContext {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.version.encode(dst)?;
        self.cipher_suite.encode(dst)?;
        write_opaque(dst, "GroupContext.group_id", &self.group_id)?;
        dst.put_u64(self.epoch);
        write_opaque(dst, "GroupContext.tree_hash", &self.tree_hash)?;
        write_opaque(dst, "GroupContext.confirmed_transcript_hash", &self.confirmed_transcript_hash)?;
        write_list(dst, "GroupContext.extensions", &self.extensions)
    }
}

impl Decode for GroupContext {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            version: ProtocolVersion::read(reader, "GroupContext.version")?,
            cipher_suite: CipherSuite::decode(reader)?,
            group_id: reader.read_opaque("GroupContext.group_id")?,
            epoch: reader.read_u64("GroupContext.epoch")?,
            tree_hash: reader.read_opaque("GroupContext.tree_hash")?,
            confirmed_transcript_hash: reader.read_opaque("GroupContext.confirmed_transcript_hash")?,
            extensions: reader.read_list("GroupContext.extensions")?,
        })
    }
}

/// Signed summary of a group, used to join by Welcome or external commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    /// Context at the epoch being joined
    pub group_context: GroupContext,
    /// GroupInfo extensions (ratchet tree, external public key)
    pub extensions: Vec<Extension>,
    /// Confirmation tag of the epoch
    pub confirmation_tag: Vec<u8>,
    /// Leaf index of the signer
    pub signer: u32,
    /// Signature over [`GroupInfoTbs`]
    pub signature: Vec<u8>,
}

impl GroupInfo {
    /// Signature input of this group info.
    pub const fn to_be_signed(&self) -> GroupInfoTbs<'_> {
        GroupInfoTbs(self)
    }

    fn encode_content(&self, dst: &mut impl BufMut) -> Result<()> {
        self.group_context.encode(dst)?;
        write_list(dst, "GroupInfo.extensions", &self.extensions)?;
        write_opaque(dst, "GroupInfo.confirmation_tag", &self.confirmation_tag)?;
        dst.put_u32(self.signer);
        Ok(())
    }
}

impl Encode for GroupInfo {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.encode_content(dst)?;
        write_opaque(dst, "GroupInfo.signature", &self.signature)
    }
}

impl Decode for GroupInfo {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            group_context: GroupContext::decode(reader)?,
            extensions: reader.read_list("GroupInfo.extensions")?,
            confirmation_tag: reader.read_opaque("GroupInfo.confirmation_tag")?,
            signer: reader.read_u32("GroupInfo.signer")?,
            signature: reader.read_opaque("GroupInfo.signature")?,
        })
    }
}

/// Every group info field except the signature.
#[derive(Debug, Clone, Copy)]
pub struct GroupInfoTbs<'a>(&'a GroupInfo);

impl Encode for GroupInfoTbs<'_> {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.0.encode_content(dst)
    }
}

/// Group secrets sealed to one joiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedGroupSecrets {
    /// Reference to the joiner's key package
    pub new_member: Vec<u8>,
    /// HPKE-sealed [`GroupSecrets`]
    pub encrypted_group_secrets: HpkeCiphertext,
}

impl Encode for EncryptedGroupSecrets {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "EncryptedGroupSecrets.new_member", &self.new_member)?;
        self.encrypted_group_secrets.encode(dst)
    }
}

impl Decode for EncryptedGroupSecrets {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            new_member: reader.read_opaque("EncryptedGroupSecrets.new_member")?,
            encrypted_group_secrets: HpkeCiphertext::decode(reader)?,
        })
    }
}

/// Invitation for one or more new members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    /// Suite used to seal the secrets and the group info
    pub cipher_suite: CipherSuite,
    /// One entry per joiner
    pub secrets: Vec<EncryptedGroupSecrets>,
    /// [`GroupInfo`] sealed under the welcome key
    pub encrypted_group_info: Vec<u8>,
}

impl Welcome {
    /// Entry addressed to the key package with reference `key_package_ref`.
    pub fn secrets_for(&self, key_package_ref: &[u8]) -> Option<&EncryptedGroupSecrets> {
        self.secrets.iter().find(|entry| entry.new_member == key_package_ref)
    }
}

impl Encode for Welcome {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.cipher_suite.encode(dst)?;
        write_list(dst, "Welcome.secrets", &self.secrets)?;
        write_opaque(dst, "Welcome.encrypted_group_info", &self.encrypted_group_info)
    }
}

impl Decode for Welcome {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            cipher_suite: CipherSuite::decode(reader)?,
            secrets: reader.read_list("Welcome.secrets")?,
            encrypted_group_info: reader.read_opaque("Welcome.encrypted_group_info")?,
        })
    }
}

/// Plaintext of [`EncryptedGroupSecrets::encrypted_group_secrets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSecrets {
    /// Secret the joiner feeds into the key schedule
    pub joiner_secret: Vec<u8>,
    /// Secret for the joiner's lowest common ancestor with the committer
    pub path_secret: Option<PathSecret>,
    /// PSKs the commit injected
    pub psks: Vec<PreSharedKeyId>,
}

impl Encode for GroupSecrets {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "GroupSecrets.joiner_secret", &self.joiner_secret)?;
        write_optional(dst, self.path_secret.as_ref())?;
        write_list(dst, "GroupSecrets.psks", &self.psks)
    }
}

impl Decode for GroupSecrets {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            joiner_secret: reader.read_opaque("GroupSecrets.joiner_secret")?,
            path_secret: reader.read_optional("GroupSecrets.path_secret")?,
            psks: reader.read_list("GroupSecrets.psks")?,
        })
    }
}
