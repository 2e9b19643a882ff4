//! Fixtures and proptest strategies shared by the unit tests.
//!
//! Strategies only produce values that satisfy the construction-time
//! invariants, so every generated value must round-trip.

use proptest::{collection::vec, option, prelude::*};

use crate::{
    commit::{Commit, ProposalOrRef, UpdatePath, UpdatePathNode},
    enums::{CipherSuite, ContentType, ExtensionType, ProtocolVersion, ResumptionPskUsage, WireFormat},
    framing::{
        AuthenticatedContent, FramedContent, FramedContentAuthData, FramedContentBody,
        FramedContentTbs, PrivateMessage, PrivateMessageContent, PublicMessage, Sender,
    },
    group::{EncryptedGroupSecrets, GroupContext, GroupInfo, GroupSecrets, Welcome},
    key_package::KeyPackage,
    leaf_node::{LeafNode, LeafNodeSourceData},
    message::{MlsMessage, MlsMessageBody},
    primitives::{Capabilities, Certificate, Credential, Extension, HpkeCiphertext, Lifetime, PathSecret},
    proposal::{
        Add, ExternalInit, GroupContextExtensions, PreSharedKey, PreSharedKeyId, Proposal, Psk,
        ReInit, Remove, Update,
    },
};

/// Leaf with one-byte keys, signature and identity, and no extensions.
pub fn minimal_leaf_node(source: LeafNodeSourceData) -> LeafNode {
    LeafNode {
        encryption_key: vec![0xE1],
        signature_key: vec![0x51],
        credential: Credential::Basic { identity: vec![0x49] },
        capabilities: Capabilities::default(),
        source,
        extensions: Vec::new(),
        signature: vec![0x5E],
    }
}

/// MLS 1.0 key package for `cipher_suite` around [`minimal_leaf_node`].
pub fn minimal_key_package(cipher_suite: CipherSuite) -> KeyPackage {
    KeyPackage {
        version: ProtocolVersion::Mls10,
        cipher_suite,
        init_key: vec![0x1C],
        leaf_node: minimal_leaf_node(LeafNodeSourceData::KeyPackage(Lifetime {
            not_before: 0,
            not_after: u64::MAX,
        })),
        extensions: Vec::new(),
        signature: vec![0x5E],
    }
}

/// Context with suite 1, empty hashes and no extensions.
pub fn minimal_group_context(group_id: &[u8], epoch: u64) -> GroupContext {
    GroupContext {
        version: ProtocolVersion::Mls10,
        cipher_suite: CipherSuite(1),
        group_id: group_id.to_vec(),
        epoch,
        tree_hash: Vec::new(),
        confirmed_transcript_hash: Vec::new(),
        extensions: Vec::new(),
    }
}

/// Application message in group `g`, epoch 2, with no authenticated data.
pub fn application_content(sender: Sender, data: &[u8]) -> FramedContent {
    FramedContent {
        group_id: b"g".to_vec(),
        epoch: 2,
        sender,
        authenticated_data: Vec::new(),
        body: FramedContentBody::Application(data.to_vec()),
    }
}

/// Short byte strings, occasionally long enough for a two-byte length prefix.
fn bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        4 => vec(any::<u8>(), 0..4),
        1 => vec(any::<u8>(), 62..68),
    ]
}

fn codes() -> impl Strategy<Value = Vec<u16>> {
    vec(any::<u16>(), 0..4)
}

fn auth_data(content_type: ContentType, signature: Vec<u8>, tag: Vec<u8>) -> FramedContentAuthData {
    let tag = (content_type == ContentType::Commit).then_some(tag);
    FramedContentAuthData::new(content_type, signature, tag).expect("tag matches content type")
}

macro_rules! arbitrary_enum {
    ($ty:ty: $($variant:expr),+ $(,)?) => {
        impl Arbitrary for $ty {
            type Parameters = ();
            type Strategy = BoxedStrategy<Self>;

            fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
                prop_oneof![$(Just($variant)),+].boxed()
            }
        }
    };
}

arbitrary_enum!(WireFormat:
    WireFormat::PublicMessage,
    WireFormat::PrivateMessage,
    WireFormat::Welcome,
    WireFormat::GroupInfo,
    WireFormat::KeyPackage,
);
arbitrary_enum!(ContentType: ContentType::Application, ContentType::Proposal, ContentType::Commit);
arbitrary_enum!(ExtensionType:
    ExtensionType::ApplicationId,
    ExtensionType::RatchetTree,
    ExtensionType::RequiredCapabilities,
    ExtensionType::ExternalPub,
    ExtensionType::ExternalSenders,
);
arbitrary_enum!(ResumptionPskUsage:
    ResumptionPskUsage::Application,
    ResumptionPskUsage::ReInit,
    ResumptionPskUsage::Branch,
);

impl Arbitrary for CipherSuite {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        any::<u16>().prop_map(Self).boxed()
    }
}

impl Arbitrary for Extension {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<ExtensionType>(), bytes())
            .prop_map(|(extension_type, extension_data)| Self { extension_type, extension_data })
            .boxed()
    }
}

impl Arbitrary for Credential {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            bytes().prop_map(|identity| Self::Basic { identity }),
            vec(bytes().prop_map(|cert_data| Certificate { cert_data }), 0..3)
                .prop_map(|certificates| Self::X509 { certificates }),
        ]
        .boxed()
    }
}

impl Arbitrary for Capabilities {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (codes(), codes(), codes(), codes(), codes())
            .prop_map(|(versions, cipher_suites, extensions, proposals, credentials)| Self {
                versions,
                cipher_suites,
                extensions,
                proposals,
                credentials,
            })
            .boxed()
    }
}

impl Arbitrary for HpkeCiphertext {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (bytes(), bytes())
            .prop_map(|(kem_output, ciphertext)| Self { kem_output, ciphertext })
            .boxed()
    }
}

impl Arbitrary for LeafNode {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let source = prop_oneof![
            (any::<u64>(), any::<u64>()).prop_map(|(not_before, not_after)| {
                LeafNodeSourceData::KeyPackage(Lifetime { not_before, not_after })
            }),
            Just(LeafNodeSourceData::Update),
            bytes().prop_map(|parent_hash| LeafNodeSourceData::Commit { parent_hash }),
        ];

        (
            bytes(),
            bytes(),
            any::<Credential>(),
            any::<Capabilities>(),
            source,
            vec(any::<Extension>(), 0..3),
            bytes(),
        )
            .prop_map(
                |(encryption_key, signature_key, credential, capabilities, source, extensions, signature)| {
                    Self {
                        encryption_key,
                        signature_key,
                        credential,
                        capabilities,
                        source,
                        extensions,
                        signature,
                    }
                },
            )
            .boxed()
    }
}

impl Arbitrary for KeyPackage {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<CipherSuite>(), bytes(), any::<LeafNode>(), vec(any::<Extension>(), 0..3), bytes())
            .prop_map(|(cipher_suite, init_key, leaf_node, extensions, signature)| Self {
                version: ProtocolVersion::Mls10,
                cipher_suite,
                init_key,
                leaf_node,
                extensions,
                signature,
            })
            .boxed()
    }
}

impl Arbitrary for PreSharedKeyId {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let psk = prop_oneof![
            bytes().prop_map(|psk_id| Psk::External { psk_id }),
            (any::<ResumptionPskUsage>(), bytes(), any::<u64>()).prop_map(
                |(usage, psk_group_id, psk_epoch)| Psk::Resumption { usage, psk_group_id, psk_epoch }
            ),
        ];

        (psk, bytes()).prop_map(|(psk, psk_nonce)| Self { psk, psk_nonce }).boxed()
    }
}

impl Arbitrary for Proposal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any::<KeyPackage>().prop_map(|key_package| Self::Add(Add { key_package })),
            any::<LeafNode>().prop_map(|leaf_node| Self::Update(Update { leaf_node })),
            any::<u32>().prop_map(|removed| Self::Remove(Remove { removed })),
            any::<PreSharedKeyId>().prop_map(|psk| Self::PreSharedKey(PreSharedKey { psk })),
            (bytes(), any::<CipherSuite>(), vec(any::<Extension>(), 0..3)).prop_map(
                |(group_id, cipher_suite, extensions)| Self::ReInit(ReInit {
                    group_id,
                    version: ProtocolVersion::Mls10,
                    cipher_suite,
                    extensions,
                })
            ),
            bytes().prop_map(|kem_output| Self::ExternalInit(ExternalInit { kem_output })),
            vec(any::<Extension>(), 0..3).prop_map(|extensions| {
                Self::GroupContextExtensions(GroupContextExtensions { extensions })
            }),
        ]
        .boxed()
    }
}

impl Arbitrary for Commit {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let proposal_or_ref = prop_oneof![
            any::<Proposal>().prop_map(ProposalOrRef::Proposal),
            bytes().prop_map(ProposalOrRef::Reference),
        ];
        let node = (bytes(), vec(any::<HpkeCiphertext>(), 0..3)).prop_map(
            |(encryption_key, encrypted_path_secret)| UpdatePathNode {
                encryption_key,
                encrypted_path_secret,
            },
        );
        let path = (any::<LeafNode>(), vec(node, 0..3))
            .prop_map(|(leaf_node, nodes)| UpdatePath { leaf_node, nodes });

        (vec(proposal_or_ref, 0..3), option::of(path))
            .prop_map(|(proposals, path)| Self { proposals, path })
            .boxed()
    }
}

impl Arbitrary for GroupContext {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<CipherSuite>(), bytes(), any::<u64>(), bytes(), bytes(), vec(any::<Extension>(), 0..3))
            .prop_map(
                |(cipher_suite, group_id, epoch, tree_hash, confirmed_transcript_hash, extensions)| Self {
                    version: ProtocolVersion::Mls10,
                    cipher_suite,
                    group_id,
                    epoch,
                    tree_hash,
                    confirmed_transcript_hash,
                    extensions,
                },
            )
            .boxed()
    }
}

impl Arbitrary for GroupInfo {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<GroupContext>(), vec(any::<Extension>(), 0..3), bytes(), any::<u32>(), bytes())
            .prop_map(|(group_context, extensions, confirmation_tag, signer, signature)| Self {
                group_context,
                extensions,
                confirmation_tag,
                signer,
                signature,
            })
            .boxed()
    }
}

impl Arbitrary for Welcome {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let entry = (bytes(), any::<HpkeCiphertext>()).prop_map(
            |(new_member, encrypted_group_secrets)| EncryptedGroupSecrets {
                new_member,
                encrypted_group_secrets,
            },
        );

        (any::<CipherSuite>(), vec(entry, 0..3), bytes())
            .prop_map(|(cipher_suite, secrets, encrypted_group_info)| Self {
                cipher_suite,
                secrets,
                encrypted_group_info,
            })
            .boxed()
    }
}

impl Arbitrary for GroupSecrets {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let path_secret = option::of(bytes().prop_map(|path_secret| PathSecret { path_secret }));

        (bytes(), path_secret, vec(any::<PreSharedKeyId>(), 0..3))
            .prop_map(|(joiner_secret, path_secret, psks)| Self { joiner_secret, path_secret, psks })
            .boxed()
    }
}

impl Arbitrary for Sender {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any::<u32>().prop_map(Self::Member),
            any::<u32>().prop_map(Self::External),
            Just(Self::NewMemberProposal),
            Just(Self::NewMemberCommit),
        ]
        .boxed()
    }
}

impl Arbitrary for FramedContentBody {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            bytes().prop_map(Self::Application),
            any::<Proposal>().prop_map(Self::Proposal),
            any::<Commit>().prop_map(Self::Commit),
        ]
        .boxed()
    }
}

impl Arbitrary for FramedContent {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (bytes(), any::<u64>(), any::<Sender>(), bytes(), any::<FramedContentBody>())
            .prop_map(|(group_id, epoch, sender, authenticated_data, body)| Self {
                group_id,
                epoch,
                sender,
                authenticated_data,
                body,
            })
            .boxed()
    }
}

impl Arbitrary for AuthenticatedContent {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<WireFormat>(), any::<FramedContent>(), bytes(), bytes())
            .prop_map(|(wire_format, content, signature, tag)| {
                let tag = (content.content_type() == ContentType::Commit).then_some(tag);
                Self::new(wire_format, content, signature, tag).expect("tag matches content type")
            })
            .boxed()
    }
}

impl Arbitrary for FramedContentTbs {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<WireFormat>(), any::<FramedContent>(), any::<GroupContext>())
            .prop_map(|(wire_format, content, context)| {
                let context = content.sender.sender_type().binds_group_context().then_some(context);
                Self::new(wire_format, content, context).expect("context matches sender")
            })
            .boxed()
    }
}

impl Arbitrary for PublicMessage {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<FramedContent>(), bytes(), bytes(), bytes())
            .prop_map(|(content, signature, tag, membership_tag)| {
                let auth = auth_data(content.content_type(), signature, tag);
                let membership_tag = matches!(content.sender, Sender::Member(_)).then_some(membership_tag);
                Self::new(content, auth, membership_tag).expect("consistent message")
            })
            .boxed()
    }
}

impl Arbitrary for PrivateMessage {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (bytes(), any::<u64>(), any::<ContentType>(), bytes(), bytes(), bytes())
            .prop_map(
                |(group_id, epoch, content_type, authenticated_data, encrypted_sender_data, ciphertext)| {
                    Self {
                        group_id,
                        epoch,
                        content_type,
                        authenticated_data,
                        encrypted_sender_data,
                        ciphertext,
                    }
                },
            )
            .boxed()
    }
}

impl Arbitrary for PrivateMessageContent {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<FramedContentBody>(), bytes(), bytes(), bytes())
            .prop_map(|(body, signature, tag, padding)| {
                let auth = auth_data(body.content_type(), signature, tag);
                Self::new(body, auth, padding).expect("auth matches body")
            })
            .boxed()
    }
}

impl Arbitrary for MlsMessage {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any::<PublicMessage>().prop_map(MlsMessageBody::PublicMessage),
            any::<PrivateMessage>().prop_map(MlsMessageBody::PrivateMessage),
            any::<Welcome>().prop_map(MlsMessageBody::Welcome),
            any::<GroupInfo>().prop_map(MlsMessageBody::GroupInfo),
            any::<KeyPackage>().prop_map(MlsMessageBody::KeyPackage),
        ]
        .prop_map(Self::new)
        .boxed()
    }
}
