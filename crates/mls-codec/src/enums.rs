//! Discriminant enumerations.
//!
//! Each enumeration is a closed, explicitly numbered set of wire codes. Value
//! 0 is reserved in every table and is never a valid discriminant, so it has
//! no Rust variant.
//!
//! # Security
//!
//! - **No Table Indexing**: `from_code` is an exhaustive `match` returning
//!   `None` for codes outside the table. A flipped bit on the wire cannot index
//!   out of range or silently coerce to the reserved entry.
//!
//! - **Explicit Rejection**: decoding an unknown code fails with
//!   [`CodecError::UnknownDiscriminant`]. There is no default variant.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader},
    errors::{CodecError, Result},
};

macro_rules! wire_enum {
    ($ty:ident, $put:ident, $read:ident) => {
        impl $ty {
            /// Read the code and map it onto the closed table, naming `field` on failure.
            pub fn read(reader: &mut Reader<'_>, field: &'static str) -> Result<Self> {
                let value = reader.$read(field)?;
                Self::from_code(value)
                    .ok_or(CodecError::UnknownDiscriminant { field, value: u64::from(value) })
            }
        }

        impl Encode for $ty {
            fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
                dst.$put(self.code());
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                Self::read(reader, stringify!($ty))
            }
        }
    };
}

/// MLS protocol version (`uint16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ProtocolVersion {
    /// MLS 1.0
    Mls10 = 1,
}

impl ProtocolVersion {
    /// Raw wire code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Mls10),
            _ => None,
        }
    }
}

wire_enum!(ProtocolVersion, put_u16, read_u16);

/// Wire format of an `MLSMessage` (`uint16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum WireFormat {
    /// Signed, unencrypted handshake message
    PublicMessage = 1,
    /// Encrypted handshake or application message
    PrivateMessage = 2,
    /// Welcome for new members
    Welcome = 3,
    /// Signed group information
    GroupInfo = 4,
    /// Published key package
    KeyPackage = 5,
}

impl WireFormat {
    /// Raw wire code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::PublicMessage),
            2 => Some(Self::PrivateMessage),
            3 => Some(Self::Welcome),
            4 => Some(Self::GroupInfo),
            5 => Some(Self::KeyPackage),
            _ => None,
        }
    }
}

wire_enum!(WireFormat, put_u16, read_u16);

/// Kind of framed content (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    /// Application data
    Application = 1,
    /// A single proposal
    Proposal = 2,
    /// A commit
    Commit = 3,
}

impl ContentType {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Application),
            2 => Some(Self::Proposal),
            3 => Some(Self::Commit),
            _ => None,
        }
    }
}

wire_enum!(ContentType, put_u8, read_u8);

/// Proposal kind (`uint16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ProposalType {
    /// Add a member
    Add = 1,
    /// Replace the sender's own leaf
    Update = 2,
    /// Remove a member
    Remove = 3,
    /// Inject a pre-shared key
    Psk = 4,
    /// Reinitialize the group
    ReInit = 5,
    /// External join
    ExternalInit = 6,
    /// Replace group context extensions
    GroupContextExtensions = 7,
}

impl ProposalType {
    /// Raw wire code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Add),
            2 => Some(Self::Update),
            3 => Some(Self::Remove),
            4 => Some(Self::Psk),
            5 => Some(Self::ReInit),
            6 => Some(Self::ExternalInit),
            7 => Some(Self::GroupContextExtensions),
            _ => None,
        }
    }
}

wire_enum!(ProposalType, put_u16, read_u16);

/// Extension kind (`uint16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExtensionType {
    /// Application-defined identifier
    ApplicationId = 1,
    /// Full ratchet tree
    RatchetTree = 2,
    /// Capabilities every member must support
    RequiredCapabilities = 3,
    /// Public key for external commits
    ExternalPub = 4,
    /// Senders allowed to send external proposals
    ExternalSenders = 5,
}

impl ExtensionType {
    /// Raw wire code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::ApplicationId),
            2 => Some(Self::RatchetTree),
            3 => Some(Self::RequiredCapabilities),
            4 => Some(Self::ExternalPub),
            5 => Some(Self::ExternalSenders),
            _ => None,
        }
    }
}

wire_enum!(ExtensionType, put_u16, read_u16);

/// Credential kind (`uint16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CredentialType {
    /// Raw identity bytes
    Basic = 1,
    /// X.509 certificate chain
    X509 = 2,
}

impl CredentialType {
    /// Raw wire code
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Basic),
            2 => Some(Self::X509),
            _ => None,
        }
    }
}

wire_enum!(CredentialType, put_u16, read_u16);

/// How a leaf node came to be (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LeafNodeSource {
    /// Published inside a key package
    KeyPackage = 1,
    /// Sent in an Update proposal
    Update = 2,
    /// Sent in a Commit's update path
    Commit = 3,
}

impl LeafNodeSource {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::KeyPackage),
            2 => Some(Self::Update),
            3 => Some(Self::Commit),
            _ => None,
        }
    }
}

wire_enum!(LeafNodeSource, put_u8, read_u8);

/// Whether a commit entry carries a proposal inline or by reference (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProposalOrRefType {
    /// Inline proposal
    Proposal = 1,
    /// Hash reference to a previously sent proposal
    Reference = 2,
}

impl ProposalOrRefType {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Proposal),
            2 => Some(Self::Reference),
            _ => None,
        }
    }
}

wire_enum!(ProposalOrRefType, put_u8, read_u8);

/// Who sent a piece of framed content (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SenderType {
    /// Current group member
    Member = 1,
    /// Pre-configured external sender
    External = 2,
    /// Prospective member proposing its own addition
    NewMemberProposal = 3,
    /// Prospective member joining by external commit
    NewMemberCommit = 4,
}

impl SenderType {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Member),
            2 => Some(Self::External),
            3 => Some(Self::NewMemberProposal),
            4 => Some(Self::NewMemberCommit),
            _ => None,
        }
    }

    /// Whether content from this sender is signed together with the group
    /// context.
    ///
    /// Members and external committers know the group context; external
    /// senders and new-member proposers do not.
    pub const fn binds_group_context(self) -> bool {
        matches!(self, Self::Member | Self::NewMemberCommit)
    }
}

wire_enum!(SenderType, put_u8, read_u8);

/// Pre-shared key kind (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PskType {
    /// Externally provisioned key
    External = 1,
    /// Resumption secret of an earlier epoch
    Resumption = 2,
}

impl PskType {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::External),
            2 => Some(Self::Resumption),
            _ => None,
        }
    }
}

wire_enum!(PskType, put_u8, read_u8);

/// Purpose of a resumption PSK (`uint8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResumptionPskUsage {
    /// Application-driven resumption
    Application = 1,
    /// Reinitialization of the group
    ReInit = 2,
    /// Branching a subgroup
    Branch = 3,
}

impl ResumptionPskUsage {
    /// Raw wire code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code onto the table, `None` if unknown.
    pub const fn from_code(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Application),
            2 => Some(Self::ReInit),
            3 => Some(Self::Branch),
            _ => None,
        }
    }
}

wire_enum!(ResumptionPskUsage, put_u8, read_u8);

/// Cipher suite identifier (`uint16`).
///
/// The suite is owned by the cryptographic layer. The codec carries it
/// through unchanged and accepts any value, including private-use codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CipherSuite(pub u16);

impl CipherSuite {
    /// `MLS_128_DHKEMX25519_AES128GCM_SHA256_Ed25519`
    pub const MLS_128_DHKEMX25519_AES128GCM_SHA256_ED25519: Self = Self(0x0001);
    /// `MLS_128_DHKEMP256_AES128GCM_SHA256_P256`
    pub const MLS_128_DHKEMP256_AES128GCM_SHA256_P256: Self = Self(0x0002);
    /// `MLS_128_DHKEMX25519_CHACHA20POLY1305_SHA256_Ed25519`
    pub const MLS_128_DHKEMX25519_CHACHA20POLY1305_SHA256_ED25519: Self = Self(0x0003);
    /// `MLS_256_DHKEMX448_AES256GCM_SHA512_Ed448`
    pub const MLS_256_DHKEMX448_AES256GCM_SHA512_ED448: Self = Self(0x0004);
    /// `MLS_256_DHKEMP521_AES256GCM_SHA512_P521`
    pub const MLS_256_DHKEMP521_AES256GCM_SHA512_P521: Self = Self(0x0005);
    /// `MLS_256_DHKEMX448_CHACHA20POLY1305_SHA512_Ed448`
    pub const MLS_256_DHKEMX448_CHACHA20POLY1305_SHA512_ED448: Self = Self(0x0006);
    /// `MLS_256_DHKEMP384_AES256GCM_SHA384_P384`
    pub const MLS_256_DHKEMP384_AES256GCM_SHA384_P384: Self = Self(0x0007);
}

impl Encode for CipherSuite {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        dst.put_u16(self.0);
        Ok(())
    }
}

impl Decode for CipherSuite {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_u16("CipherSuite").map(Self)
    }
}
