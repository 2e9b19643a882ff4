//! Human-readable rendering of a decoded message.

use std::io::{self, Write};

use mls_codec::{
    Credential, FramedContentBody, LeafNodeSourceData, MlsMessage, MlsMessageBody, ProposalOrRef,
};

/// Write one `key: value` line per field of `message`.
///
/// Envelope fields come first; a field that does not apply to the wire format
/// is omitted rather than printed empty.
pub fn write_summary(out: &mut impl Write, message: &MlsMessage) -> io::Result<()> {
    writeln!(out, "version: {:?}", message.version)?;
    writeln!(out, "wire_format: {:?}", message.wire_format())?;
    if let Some(content_type) = message.content_type() {
        writeln!(out, "content_type: {content_type:?}")?;
    }
    if let Some(epoch) = message.epoch() {
        writeln!(out, "epoch: {epoch}")?;
    }
    if let Some(cipher_suite) = message.cipher_suite() {
        writeln!(out, "cipher_suite: {:#06x}", cipher_suite.0)?;
    }
    if let Some(group_id) = message.group_id() {
        writeln!(out, "group_id: {}", hex::encode(group_id))?;
    }

    match &message.body {
        MlsMessageBody::PublicMessage(public) => {
            let content = public.content();
            writeln!(out, "sender: {:?}", content.sender)?;
            writeln!(out, "authenticated_data: {} bytes", content.authenticated_data.len())?;
            match &content.body {
                FramedContentBody::Application(data) => {
                    writeln!(out, "application_data: {} bytes", data.len())?;
                },
                FramedContentBody::Proposal(proposal) => {
                    writeln!(out, "proposal: {:?}", proposal.proposal_type())?;
                },
                FramedContentBody::Commit(commit) => {
                    for entry in &commit.proposals {
                        match entry {
                            ProposalOrRef::Proposal(proposal) => {
                                writeln!(out, "commit.proposal: {:?}", proposal.proposal_type())?;
                            },
                            ProposalOrRef::Reference(reference) => {
                                writeln!(out, "commit.reference: {}", hex::encode(reference))?;
                            },
                        }
                    }
                    writeln!(out, "commit.path: {}", commit.path.is_some())?;
                },
            }
            writeln!(out, "signature: {}", hex::encode(public.auth().signature()))?;
            if let Some(tag) = public.auth().confirmation_tag() {
                writeln!(out, "confirmation_tag: {}", hex::encode(tag))?;
            }
            if let Some(tag) = public.membership_tag() {
                writeln!(out, "membership_tag: {}", hex::encode(tag))?;
            }
        },
        MlsMessageBody::PrivateMessage(private) => {
            writeln!(out, "authenticated_data: {} bytes", private.authenticated_data.len())?;
            writeln!(out, "encrypted_sender_data: {} bytes", private.encrypted_sender_data.len())?;
            writeln!(out, "ciphertext: {} bytes", private.ciphertext.len())?;
        },
        MlsMessageBody::Welcome(welcome) => {
            for entry in &welcome.secrets {
                writeln!(out, "new_member: {}", hex::encode(&entry.new_member))?;
            }
            writeln!(out, "encrypted_group_info: {} bytes", welcome.encrypted_group_info.len())?;
        },
        MlsMessageBody::GroupInfo(info) => {
            writeln!(out, "signer: {}", info.signer)?;
            writeln!(out, "extensions: {}", info.extensions.len())?;
            writeln!(out, "confirmation_tag: {}", hex::encode(&info.confirmation_tag))?;
        },
        MlsMessageBody::KeyPackage(package) => {
            let leaf = &package.leaf_node;
            writeln!(out, "init_key: {}", hex::encode(&package.init_key))?;
            writeln!(out, "signature_key: {}", hex::encode(&leaf.signature_key))?;
            match &leaf.credential {
                Credential::Basic { identity } => {
                    writeln!(out, "credential: basic {}", hex::encode(identity))?;
                },
                Credential::X509 { certificates } => {
                    writeln!(out, "credential: x509, {} certificates", certificates.len())?;
                },
            }
            if let LeafNodeSourceData::KeyPackage(lifetime) = &leaf.source {
                writeln!(out, "lifetime: {}..{}", lifetime.not_before, lifetime.not_after)?;
            }
        },
    }

    Ok(())
}
