//! Snapshot tests for wire format stability.
//!
//! Each test pins the exact bytes of one envelope. A change here is a change
//! to what goes on the wire and breaks interoperability with other MLS
//! implementations.

use insta::assert_snapshot;
use mls_codec::{
    Capabilities, CipherSuite, Commit, ContentType, Credential, EncryptedGroupSecrets,
    FramedContent, FramedContentAuthData, FramedContentBody, GroupContext, GroupInfo,
    HpkeCiphertext, KeyPackage, LeafNode, LeafNodeSourceData, Lifetime, MlsMessage, MlsMessageBody,
    PrivateMessage, Proposal, ProposalOrRef, ProtocolVersion, PublicMessage, Remove, Sender,
    Welcome,
};

fn message_to_hex(message: &MlsMessage) -> String {
    hex::encode(message.to_bytes().expect("encoding should succeed"))
}

fn key_package() -> KeyPackage {
    KeyPackage {
        version: ProtocolVersion::Mls10,
        cipher_suite: CipherSuite::MLS_128_DHKEMX25519_AES128GCM_SHA256_ED25519,
        init_key: vec![0x1C],
        leaf_node: LeafNode {
            encryption_key: vec![0xE1],
            signature_key: vec![0x51],
            credential: Credential::Basic { identity: vec![0x49] },
            capabilities: Capabilities::default(),
            source: LeafNodeSourceData::KeyPackage(Lifetime { not_before: 0, not_after: u64::MAX }),
            extensions: Vec::new(),
            signature: vec![0x5E],
        },
        extensions: Vec::new(),
        signature: vec![0x5E],
    }
}

#[test]
fn snapshot_key_package_message() {
    let message = MlsMessage::new(MlsMessageBody::KeyPackage(key_package()));

    assert_snapshot!(
        message_to_hex(&message),
        @"0001000500010001011c01e10151000101490000000000010000000000000000ffffffffffffffff00015e00015e"
    );
}

#[test]
fn snapshot_public_commit_message() {
    let content = FramedContent {
        group_id: b"g".to_vec(),
        epoch: 1,
        sender: Sender::Member(0),
        authenticated_data: Vec::new(),
        body: FramedContentBody::Commit(Commit {
            proposals: vec![ProposalOrRef::Proposal(Proposal::Remove(Remove { removed: 1 }))],
            path: None,
        }),
    };
    let auth = FramedContentAuthData::new(ContentType::Commit, vec![0xAA, 0xBB], Some(vec![0xCC]))
        .expect("commit carries a confirmation tag");
    let public = PublicMessage::new(content, auth, Some(vec![0xDD]))
        .expect("member sender carries a membership tag");
    let message = MlsMessage::new(MlsMessageBody::PublicMessage(public));

    assert_snapshot!(
        message_to_hex(&message),
        @"00010001016700000000000000010100000000000307010003000000010002aabb01cc01dd"
    );
}

#[test]
fn snapshot_private_message() {
    let message = MlsMessage::new(MlsMessageBody::PrivateMessage(PrivateMessage {
        group_id: b"g".to_vec(),
        epoch: 7,
        content_type: ContentType::Application,
        authenticated_data: Vec::new(),
        encrypted_sender_data: vec![0x11; 3],
        ciphertext: vec![0x22; 2],
    }));

    assert_snapshot!(message_to_hex(&message), @"0001000201670000000000000007010003111111022222");
}

#[test]
fn snapshot_welcome_message() {
    let message = MlsMessage::new(MlsMessageBody::Welcome(Welcome {
        cipher_suite: CipherSuite(1),
        secrets: vec![EncryptedGroupSecrets {
            new_member: vec![0xAB],
            encrypted_group_secrets: HpkeCiphertext { kem_output: vec![0x01], ciphertext: vec![0x02] },
        }],
        encrypted_group_info: vec![0xEE],
    }));

    assert_snapshot!(message_to_hex(&message), @"0001000300010601ab0101010201ee");
}

#[test]
fn snapshot_group_info_message() {
    let message = MlsMessage::new(MlsMessageBody::GroupInfo(GroupInfo {
        group_context: GroupContext {
            version: ProtocolVersion::Mls10,
            cipher_suite: CipherSuite(1),
            group_id: b"g".to_vec(),
            epoch: 3,
            tree_hash: vec![0x7A],
            confirmed_transcript_hash: Vec::new(),
            extensions: Vec::new(),
        },
        extensions: Vec::new(),
        confirmation_tag: vec![0xC7],
        signer: 1,
        signature: vec![0x5E],
    }));

    assert_snapshot!(
        message_to_hex(&message),
        @"000100040001000101670000000000000003017a00000001c700000001015e"
    );
}
