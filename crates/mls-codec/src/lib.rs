//! Wire encoding for Messaging Layer Security (RFC 9420).
//!
//! Every structure MLS clients exchange, plus the byte strings their
//! signatures and MACs are computed over, is encoded here with the TLS
//! presentation language as RFC 9420 profiles it. The encoding is
//! deterministic: one value has exactly one byte representation, and
//! decoding accepts only that representation.
//!
//! Untrusted input enters through [`MlsMessage::from_bytes`]. No cryptography
//! happens in this crate; keys, signatures, tags and ciphertexts are opaque
//! byte strings.
//!
//! # Security
//!
//! A signer and a verifier that disagree about a single byte either fail to
//! interoperate or, worse, verify different content than was signed. We
//! therefore reject rather than repair:
//!
//! - Non-minimal and reserved-prefix varints are rejected.
//! - Discriminants outside their closed table, including the reserved 0, are
//!   rejected. Nothing is looked up by index.
//! - Presence flags other than 0 and 1 are rejected.
//! - A list element that runs past its list body is rejected.
//! - Bytes left after a complete message are rejected.
//!
//! Fields whose presence depends on another field's value (the group context
//! in [`FramedContentTbs`], the confirmation tag in [`FramedContentAuthData`],
//! the membership tag in [`PublicMessage`]) are checked when the value is
//! built, and decoding follows the same rule.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod commit;
pub mod enums;
pub mod errors;
pub mod framing;
pub mod group;
pub mod key_package;
pub mod leaf_node;
pub mod limits;
pub mod message;
pub mod primitives;
pub mod proposal;

#[cfg(test)]
mod test_utils;

pub use codec::{Decode, DecodeWith, Encode, Reader, decode_exact, decode_prefix, encode_to_vec};
pub use commit::{Commit, ProposalOrRef, UpdatePath, UpdatePathNode};
pub use enums::{
    CipherSuite, ContentType, CredentialType, ExtensionType, LeafNodeSource, ProposalOrRefType,
    ProposalType, ProtocolVersion, PskType, ResumptionPskUsage, SenderType, WireFormat,
};
pub use errors::{CodecError, Result};
pub use framing::{
    AuthenticatedContent, AuthenticatedContentTbm, FramedContent, FramedContentAuthData,
    FramedContentBody, FramedContentTbs, PrivateContentAad, PrivateMessage, PrivateMessageContent,
    PublicMessage, Sender, SenderData, SenderDataAad,
};
pub use group::{EncryptedGroupSecrets, GroupContext, GroupInfo, GroupInfoTbs, GroupSecrets, Welcome};
pub use key_package::{KeyPackage, KeyPackageTbs};
pub use leaf_node::{LeafNode, LeafNodeGroupBinding, LeafNodeSourceData, LeafNodeTbs};
pub use limits::{DEFAULT_MAX_MESSAGE_SIZE, Limits};
pub use message::{MlsMessage, MlsMessageBody};
pub use primitives::{Capabilities, Certificate, Credential, Extension, HpkeCiphertext, Lifetime, PathSecret};
pub use proposal::{
    Add, ExternalInit, GroupContextExtensions, PreSharedKey, PreSharedKeyId, Proposal, Psk, ReInit,
    Remove, Update,
};
