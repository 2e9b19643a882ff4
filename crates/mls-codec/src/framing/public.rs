use bytes::BufMut;

use super::{AuthenticatedContentTbm, FramedContent, FramedContentAuthData, FramedContentTbs};
use crate::{
    codec::{Decode, DecodeWith, Encode, Reader, write_opaque},
    enums::{SenderType, WireFormat},
    errors::{CodecError, Result},
    group::GroupContext,
};

/// Signed, unencrypted message.
///
/// # Invariants
///
/// - The auth data is typed by the content's own content type.
/// - `membership_tag` is present iff the sender is a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicMessage {
    content: FramedContent,
    auth: FramedContentAuthData,
    membership_tag: Option<Vec<u8>>,
}

impl PublicMessage {
    /// Assemble a public message.
    ///
    /// # Errors
    ///
    /// - [`CodecError::ContextMismatch`] if `auth` was built for another
    ///   content type.
    /// - [`CodecError::MissingField`] if a member sender has no membership
    ///   tag.
    /// - [`CodecError::UnexpectedField`] if a non-member sender has one.
    pub fn new(
        content: FramedContent,
        auth: FramedContentAuthData,
        membership_tag: Option<Vec<u8>>,
    ) -> Result<Self> {
        if auth.content_type() != content.content_type() {
            return Err(CodecError::ContextMismatch { field: "PublicMessage.auth" });
        }

        match (content.sender.sender_type(), membership_tag.is_some()) {
            (SenderType::Member, false) => {
                Err(CodecError::MissingField { field: "PublicMessage.membership_tag" })
            },
            (
                SenderType::External | SenderType::NewMemberProposal | SenderType::NewMemberCommit,
                true,
            ) => Err(CodecError::UnexpectedField { field: "PublicMessage.membership_tag" }),
            _ => Ok(Self { content, auth, membership_tag }),
        }
    }

    /// Framed content
    pub const fn content(&self) -> &FramedContent {
        &self.content
    }

    /// Signature and confirmation tag
    pub const fn auth(&self) -> &FramedContentAuthData {
        &self.auth
    }

    /// Membership tag, present for member senders
    pub fn membership_tag(&self) -> Option<&[u8]> {
        self.membership_tag.as_deref()
    }

    /// Signature input for this message.
    pub fn to_be_signed(&self, context: Option<GroupContext>) -> Result<FramedContentTbs> {
        FramedContentTbs::new(WireFormat::PublicMessage, self.content.clone(), context)
    }

    /// Membership tag MAC input for this message.
    pub fn to_be_maced(&self, context: GroupContext) -> Result<AuthenticatedContentTbm> {
        AuthenticatedContentTbm::new(self.to_be_signed(Some(context))?, self.auth.clone())
    }
}

impl Encode for PublicMessage {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.content.encode(dst)?;
        self.auth.encode(dst)?;
        if let Some(tag) = &self.membership_tag {
            write_opaque(dst, "PublicMessage.membership_tag", tag)?;
        }
        Ok(())
    }
}

impl Decode for PublicMessage {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let content = FramedContent::decode(reader)?;
        let auth = FramedContentAuthData::decode_with(reader, content.content_type())?;
        let membership_tag = match content.sender.sender_type() {
            SenderType::Member => Some(reader.read_opaque("PublicMessage.membership_tag")?),
            SenderType::External | SenderType::NewMemberProposal | SenderType::NewMemberCommit => {
                None
            },
        };

        Ok(Self { content, auth, membership_tag })
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        codec::{decode_exact, encode_to_vec},
        enums::ContentType,
        framing::Sender,
        test_utils::{application_content, minimal_group_context},
    };

    fn application_auth() -> FramedContentAuthData {
        FramedContentAuthData::new(ContentType::Application, vec![0x51], None).expect("valid")
    }

    #[test]
    fn member_message_carries_membership_tag() {
        let content = application_content(Sender::Member(0), b"hi");
        let message = PublicMessage::new(content.clone(), application_auth(), Some(vec![0x3A]))
            .expect("valid");
        let wire = encode_to_vec(&message).expect("encodes");

        let expected = [encode_to_vec(&content).expect("encodes"), hex!("01 51 01 3a").to_vec()].concat();
        assert_eq!(wire, expected);
        assert_eq!(decode_exact::<PublicMessage>(&wire, "PublicMessage"), Ok(message));
    }

    #[test]
    fn external_message_has_no_membership_tag() {
        let content = application_content(Sender::External(1), b"hi");
        let message = PublicMessage::new(content.clone(), application_auth(), None).expect("valid");
        let wire = encode_to_vec(&message).expect("encodes");
        assert!(wire.ends_with(&hex!("01 51")));

        // A trailing tag on an external message is left over, not consumed
        let mut with_tag = wire.clone();
        with_tag.extend_from_slice(&hex!("01 3a"));
        assert_eq!(
            decode_exact::<PublicMessage>(&with_tag, "PublicMessage"),
            Err(CodecError::TrailingBytes { field: "PublicMessage", remaining: 2 })
        );
    }

    #[test]
    fn membership_tag_rules() {
        assert_eq!(
            PublicMessage::new(application_content(Sender::Member(0), b""), application_auth(), None),
            Err(CodecError::MissingField { field: "PublicMessage.membership_tag" })
        );
        assert_eq!(
            PublicMessage::new(
                application_content(Sender::NewMemberProposal, b""),
                application_auth(),
                Some(Vec::new())
            ),
            Err(CodecError::UnexpectedField { field: "PublicMessage.membership_tag" })
        );
    }

    #[test]
    fn auth_must_match_content_type() {
        let commit_auth =
            FramedContentAuthData::new(ContentType::Commit, Vec::new(), Some(Vec::new())).expect("valid");
        assert_eq!(
            PublicMessage::new(application_content(Sender::External(0), b""), commit_auth, None),
            Err(CodecError::ContextMismatch { field: "PublicMessage.auth" })
        );
    }

    #[test]
    fn tbm_binds_context() {
        let content = application_content(Sender::Member(4), b"hi");
        let message = PublicMessage::new(content, application_auth(), Some(vec![0x3A])).expect("valid");
        let context = minimal_group_context(b"g", 2);

        let tbm = encode_to_vec(&message.to_be_maced(context.clone()).expect("valid")).expect("encodes");
        let tbs = encode_to_vec(&message.to_be_signed(Some(context)).expect("valid")).expect("encodes");
        assert_eq!(tbm, [tbs, hex!("01 51").to_vec()].concat());
    }

    proptest! {
        #[test]
        fn public_message_round_trip(message in any::<PublicMessage>()) {
            let wire = encode_to_vec(&message).expect("encodes");
            prop_assert_eq!(decode_exact::<PublicMessage>(&wire, "PublicMessage"), Ok(message));
        }
    }
}
