//! Message framing and the canonical inputs to signatures and MACs.
//!
//! # Canonical inputs
//!
//! Signatures and MACs are computed over byte strings assembled from message
//! parts, not over the message as sent. Which parts appear depends on
//! discriminants elsewhere in the message:
//!
//! - [`FramedContentTbs`] carries the [`GroupContext`] iff the sender is a
//!   member or a new-member committer.
//! - [`FramedContentAuthData`] carries a confirmation tag iff the content is a
//!   commit.
//!
//! Both rules are checked when the value is built and the same predicate
//! drives encoding and decoding, so a signer and a verifier cannot disagree
//! about which bytes were signed.

mod private;
mod public;
mod sender_data;

use bytes::BufMut;
pub use private::{PrivateContentAad, PrivateMessage, PrivateMessageContent, SenderDataAad};
pub use public::PublicMessage;
pub use sender_data::SenderData;

use crate::{
    codec::{Decode, DecodeWith, Encode, Reader, decode_exact, encode_to_vec, write_opaque},
    commit::Commit,
    enums::{ContentType, ProtocolVersion, SenderType, WireFormat},
    errors::{CodecError, Result},
    group::GroupContext,
    proposal::Proposal,
};

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Current member, by leaf index
    Member(u32),
    /// Preconfigured external sender, by index into the external senders
    /// extension
    External(u32),
    /// Prospective member proposing its own addition
    NewMemberProposal,
    /// Prospective member joining by external commit
    NewMemberCommit,
}

impl Sender {
    /// Wire discriminant
    pub const fn sender_type(self) -> SenderType {
        match self {
            Self::Member(_) => SenderType::Member,
            Self::External(_) => SenderType::External,
            Self::NewMemberProposal => SenderType::NewMemberProposal,
            Self::NewMemberCommit => SenderType::NewMemberCommit,
        }
    }
}

impl Encode for Sender {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.sender_type().encode(dst)?;
        match self {
            Self::Member(leaf_index) => dst.put_u32(*leaf_index),
            Self::External(sender_index) => dst.put_u32(*sender_index),
            Self::NewMemberProposal | Self::NewMemberCommit => {},
        }
        Ok(())
    }
}

impl Decode for Sender {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match SenderType::read(reader, "Sender.sender_type")? {
            SenderType::Member => Ok(Self::Member(reader.read_u32("Sender.leaf_index")?)),
            SenderType::External => Ok(Self::External(reader.read_u32("Sender.sender_index")?)),
            SenderType::NewMemberProposal => Ok(Self::NewMemberProposal),
            SenderType::NewMemberCommit => Ok(Self::NewMemberCommit),
        }
    }
}

/// Payload of a framed message, selected by its content type.
///
/// The content type tag is written by the enclosing structure, so the body
/// alone is not self-describing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramedContentBody {
    /// Application data
    Application(Vec<u8>),
    /// Handshake proposal
    Proposal(Proposal),
    /// Handshake commit
    Commit(Commit),
}

impl FramedContentBody {
    /// Content type that selects this body
    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::Application(_) => ContentType::Application,
            Self::Proposal(_) => ContentType::Proposal,
            Self::Commit(_) => ContentType::Commit,
        }
    }
}

impl Encode for FramedContentBody {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::Application(data) => write_opaque(dst, "FramedContent.application_data", data),
            Self::Proposal(proposal) => proposal.encode(dst),
            Self::Commit(commit) => commit.encode(dst),
        }
    }
}

impl DecodeWith<ContentType> for FramedContentBody {
    fn decode_with(reader: &mut Reader<'_>, content_type: ContentType) -> Result<Self> {
        match content_type {
            ContentType::Application => {
                Ok(Self::Application(reader.read_opaque("FramedContent.application_data")?))
            },
            ContentType::Proposal => Ok(Self::Proposal(Proposal::decode(reader)?)),
            ContentType::Commit => Ok(Self::Commit(Commit::decode(reader)?)),
        }
    }
}

/// Content of a handshake or application message before protection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedContent {
    /// Group the message belongs to
    pub group_id: Vec<u8>,
    /// Epoch the message was sent in
    pub epoch: u64,
    /// Message sender
    pub sender: Sender,
    /// Application-supplied data authenticated with the message
    pub authenticated_data: Vec<u8>,
    /// Payload
    pub body: FramedContentBody,
}

impl FramedContent {
    /// Content type of the body
    pub const fn content_type(&self) -> ContentType {
        self.body.content_type()
    }
}

impl Encode for FramedContent {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "FramedContent.group_id", &self.group_id)?;
        dst.put_u64(self.epoch);
        self.sender.encode(dst)?;
        write_opaque(dst, "FramedContent.authenticated_data", &self.authenticated_data)?;
        self.content_type().encode(dst)?;
        self.body.encode(dst)
    }
}

impl Decode for FramedContent {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let group_id = reader.read_opaque("FramedContent.group_id")?;
        let epoch = reader.read_u64("FramedContent.epoch")?;
        let sender = Sender::decode(reader)?;
        let authenticated_data = reader.read_opaque("FramedContent.authenticated_data")?;
        let content_type = ContentType::read(reader, "FramedContent.content_type")?;
        let body = FramedContentBody::decode_with(reader, content_type)?;

        Ok(Self { group_id, epoch, sender, authenticated_data, body })
    }
}

/// Signature and, for commits, confirmation tag over a [`FramedContent`].
///
/// # Invariants
///
/// - `confirmation_tag` is present iff `content_type` is commit. An empty tag
///   on a commit is still present and still encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedContentAuthData {
    content_type: ContentType,
    signature: Vec<u8>,
    confirmation_tag: Option<Vec<u8>>,
}

impl FramedContentAuthData {
    /// Build auth data for content of type `content_type`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::MissingField`] if `content_type` is commit and there is
    ///   no confirmation tag.
    /// - [`CodecError::UnexpectedField`] if `content_type` is not commit and a
    ///   tag is given.
    pub fn new(
        content_type: ContentType,
        signature: Vec<u8>,
        confirmation_tag: Option<Vec<u8>>,
    ) -> Result<Self> {
        match (content_type, &confirmation_tag) {
            (ContentType::Commit, None) => {
                Err(CodecError::MissingField { field: "FramedContentAuthData.confirmation_tag" })
            },
            (ContentType::Application | ContentType::Proposal, Some(_)) => {
                Err(CodecError::UnexpectedField { field: "FramedContentAuthData.confirmation_tag" })
            },
            _ => Ok(Self { content_type, signature, confirmation_tag }),
        }
    }

    /// Content type this auth data was built for
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Signature over the [`FramedContentTbs`]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Confirmation tag, present only for commits
    pub fn confirmation_tag(&self) -> Option<&[u8]> {
        self.confirmation_tag.as_deref()
    }
}

impl Encode for FramedContentAuthData {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "FramedContentAuthData.signature", &self.signature)?;
        if let Some(tag) = &self.confirmation_tag {
            write_opaque(dst, "FramedContentAuthData.confirmation_tag", tag)?;
        }
        Ok(())
    }
}

impl DecodeWith<ContentType> for FramedContentAuthData {
    fn decode_with(reader: &mut Reader<'_>, content_type: ContentType) -> Result<Self> {
        let signature = reader.read_opaque("FramedContentAuthData.signature")?;
        let confirmation_tag = match content_type {
            ContentType::Commit => {
                Some(reader.read_opaque("FramedContentAuthData.confirmation_tag")?)
            },
            ContentType::Application | ContentType::Proposal => None,
        };

        Ok(Self { content_type, signature, confirmation_tag })
    }
}

/// Signature input of a framed message.
///
/// # Invariants
///
/// - `context` is present iff the sender is a member or a new-member
///   committer. Enforced by [`FramedContentTbs::new`] and by decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedContentTbs {
    version: ProtocolVersion,
    wire_format: WireFormat,
    content: FramedContent,
    context: Option<GroupContext>,
}

impl FramedContentTbs {
    /// Build the signature input for `content` sent as `wire_format`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::MissingField`] if the sender binds the group context
    ///   and none is given.
    /// - [`CodecError::UnexpectedField`] if the sender does not bind it and
    ///   one is given.
    pub fn new(
        wire_format: WireFormat,
        content: FramedContent,
        context: Option<GroupContext>,
    ) -> Result<Self> {
        match (content.sender.sender_type().binds_group_context(), context.is_some()) {
            (true, false) => Err(CodecError::MissingField { field: "FramedContentTbs.context" }),
            (false, true) => Err(CodecError::UnexpectedField { field: "FramedContentTbs.context" }),
            _ => Ok(Self { version: ProtocolVersion::Mls10, wire_format, content, context }),
        }
    }

    /// Build the signature input from an already encoded group context.
    ///
    /// `context` is parsed only when the sender binds the group context, so
    /// callers can pass the current epoch's context for any sender.
    ///
    /// # Errors
    ///
    /// Any decode error of `context`, including trailing bytes.
    pub fn with_encoded_context(
        wire_format: WireFormat,
        content: FramedContent,
        context: &[u8],
    ) -> Result<Self> {
        let context = if content.sender.sender_type().binds_group_context() {
            Some(decode_exact::<GroupContext>(context, "FramedContentTbs.context")?)
        } else {
            None
        };
        Self::new(wire_format, content, context)
    }

    /// Protocol version
    pub const fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Wire format the content is sent as
    pub const fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// Signed content
    pub const fn content(&self) -> &FramedContent {
        &self.content
    }

    /// Group context, present for member and new-member-commit senders
    pub const fn context(&self) -> Option<&GroupContext> {
        self.context.as_ref()
    }
}

impl Encode for FramedContentTbs {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.version.encode(dst)?;
        self.wire_format.encode(dst)?;
        self.content.encode(dst)?;
        if let Some(context) = &self.context {
            context.encode(dst)?;
        }
        Ok(())
    }
}

impl Decode for FramedContentTbs {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let version = ProtocolVersion::read(reader, "FramedContentTbs.version")?;
        let wire_format = WireFormat::read(reader, "FramedContentTbs.wire_format")?;
        let content = FramedContent::decode(reader)?;
        let context = if content.sender.sender_type().binds_group_context() {
            Some(GroupContext::decode(reader)?)
        } else {
            None
        };

        Ok(Self { version, wire_format, content, context })
    }
}

/// Framed content together with its authentication data.
///
/// # Invariants
///
/// - The auth data is typed by the content's own content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContent {
    wire_format: WireFormat,
    content: FramedContent,
    auth: FramedContentAuthData,
}

impl AuthenticatedContent {
    /// Attach a signature, and for commits a confirmation tag, to `content`.
    ///
    /// # Errors
    ///
    /// Same as [`FramedContentAuthData::new`] for the content's type.
    pub fn new(
        wire_format: WireFormat,
        content: FramedContent,
        signature: Vec<u8>,
        confirmation_tag: Option<Vec<u8>>,
    ) -> Result<Self> {
        let auth = FramedContentAuthData::new(content.content_type(), signature, confirmation_tag)?;
        Ok(Self { wire_format, content, auth })
    }

    /// Wire format the content is sent as
    pub const fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// Authenticated content
    pub const fn content(&self) -> &FramedContent {
        &self.content
    }

    /// Signature and confirmation tag
    pub const fn auth(&self) -> &FramedContentAuthData {
        &self.auth
    }

    /// Signature input for this content.
    pub fn to_be_signed(&self, context: Option<GroupContext>) -> Result<FramedContentTbs> {
        FramedContentTbs::new(self.wire_format, self.content.clone(), context)
    }

    /// Input to the confirmed transcript hash:
    /// `wire_format || content || signature<V>`.
    pub fn confirmed_transcript_hash_input(&self) -> Result<Vec<u8>> {
        let mut out = encode_to_vec(&self.wire_format)?;
        self.content.encode(&mut out)?;
        write_opaque(&mut out, "FramedContentAuthData.signature", &self.auth.signature)?;
        Ok(out)
    }
}

impl Encode for AuthenticatedContent {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.wire_format.encode(dst)?;
        self.content.encode(dst)?;
        self.auth.encode(dst)
    }
}

impl Decode for AuthenticatedContent {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let wire_format = WireFormat::read(reader, "AuthenticatedContent.wire_format")?;
        let content = FramedContent::decode(reader)?;
        let auth = FramedContentAuthData::decode_with(reader, content.content_type())?;

        Ok(Self { wire_format, content, auth })
    }
}

/// Membership tag MAC input: the signature input followed by the auth data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContentTbm {
    tbs: FramedContentTbs,
    auth: FramedContentAuthData,
}

impl AuthenticatedContentTbm {
    /// Pair a signature input with the auth data computed over it.
    ///
    /// # Errors
    ///
    /// [`CodecError::ContextMismatch`] if `auth` was built for a different
    /// content type than the one `tbs` carries.
    pub fn new(tbs: FramedContentTbs, auth: FramedContentAuthData) -> Result<Self> {
        if tbs.content.content_type() != auth.content_type {
            return Err(CodecError::ContextMismatch { field: "AuthenticatedContentTbm.auth" });
        }

        Ok(Self { tbs, auth })
    }

    /// Signature input part
    pub const fn tbs(&self) -> &FramedContentTbs {
        &self.tbs
    }

    /// Auth data part
    pub const fn auth(&self) -> &FramedContentAuthData {
        &self.auth
    }
}

impl Encode for AuthenticatedContentTbm {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.tbs.encode(dst)?;
        self.auth.encode(dst)
    }
}

impl Decode for AuthenticatedContentTbm {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let tbs = FramedContentTbs::decode(reader)?;
        let auth = FramedContentAuthData::decode_with(reader, tbs.content.content_type())?;

        Ok(Self { tbs, auth })
    }
}
