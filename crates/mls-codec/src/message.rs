//! Top-level `MLSMessage` envelope.
//!
//! Every byte string exchanged between clients is one envelope: a protocol
//! version, a wire format tag, and the payload that tag selects. This is the
//! entry point for untrusted input.

use bytes::BufMut;
use tracing::{debug, trace};

use crate::{
    codec::{Decode, DecodeWith, Encode, Reader, encode_to_vec},
    enums::{CipherSuite, ContentType, ProtocolVersion, WireFormat},
    errors::{CodecError, Result},
    framing::{PrivateMessage, PublicMessage},
    group::{GroupInfo, Welcome},
    key_package::KeyPackage,
    limits::Limits,
};

/// Payload of an envelope, selected by its wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MlsMessageBody {
    /// Signed handshake message
    PublicMessage(PublicMessage),
    /// Encrypted message
    PrivateMessage(PrivateMessage),
    /// Invitation for new members
    Welcome(Welcome),
    /// Signed group summary
    GroupInfo(GroupInfo),
    /// Published key package
    KeyPackage(KeyPackage),
}

impl MlsMessageBody {
    /// Wire format that selects this body
    pub const fn wire_format(&self) -> WireFormat {
        match self {
            Self::PublicMessage(_) => WireFormat::PublicMessage,
            Self::PrivateMessage(_) => WireFormat::PrivateMessage,
            Self::Welcome(_) => WireFormat::Welcome,
            Self::GroupInfo(_) => WireFormat::GroupInfo,
            Self::KeyPackage(_) => WireFormat::KeyPackage,
        }
    }
}

impl Encode for MlsMessageBody {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::PublicMessage(message) => message.encode(dst),
            Self::PrivateMessage(message) => message.encode(dst),
            Self::Welcome(welcome) => welcome.encode(dst),
            Self::GroupInfo(info) => info.encode(dst),
            Self::KeyPackage(package) => package.encode(dst),
        }
    }
}

impl DecodeWith<WireFormat> for MlsMessageBody {
    fn decode_with(reader: &mut Reader<'_>, wire_format: WireFormat) -> Result<Self> {
        match wire_format {
            WireFormat::PublicMessage => Ok(Self::PublicMessage(PublicMessage::decode(reader)?)),
            WireFormat::PrivateMessage => Ok(Self::PrivateMessage(PrivateMessage::decode(reader)?)),
            WireFormat::Welcome => Ok(Self::Welcome(Welcome::decode(reader)?)),
            WireFormat::GroupInfo => Ok(Self::GroupInfo(GroupInfo::decode(reader)?)),
            WireFormat::KeyPackage => Ok(Self::KeyPackage(KeyPackage::decode(reader)?)),
        }
    }
}

/// An MLS message as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlsMessage {
    /// Protocol version
    pub version: ProtocolVersion,
    /// Payload
    pub body: MlsMessageBody,
}

impl MlsMessage {
    /// Wrap `body` in an MLS 1.0 envelope.
    pub const fn new(body: MlsMessageBody) -> Self {
        Self { version: ProtocolVersion::Mls10, body }
    }

    /// Decode one complete envelope under the default [`Limits`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, Limits::default())
    }

    /// Decode one complete envelope.
    ///
    /// # Errors
    ///
    /// - [`CodecError::MessageTooLarge`] if `bytes` exceeds
    ///   `limits.max_message_size`. Nothing is parsed in that case.
    /// - [`CodecError::TrailingBytes`] if bytes remain after the envelope.
    /// - Any decode error of the payload.
    pub fn from_bytes_with(bytes: &[u8], limits: Limits) -> Result<Self> {
        let result = Self::decode_checked(bytes, limits);
        match &result {
            Ok(message) => {
                trace!(wire_format = ?message.wire_format(), size = bytes.len(), "decoded MLS message");
            },
            Err(error) => debug!(%error, size = bytes.len(), "rejected MLS message"),
        }
        result
    }

    fn decode_checked(bytes: &[u8], limits: Limits) -> Result<Self> {
        if bytes.len() > limits.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: bytes.len(),
                max: limits.max_message_size,
            });
        }

        let mut reader = Reader::new(bytes);
        let message = Self::decode(&mut reader)?;
        reader.finish("MLSMessage")?;
        Ok(message)
    }

    /// Encode the envelope.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_to_vec(self)
    }

    /// Wire format of the payload.
    pub const fn wire_format(&self) -> WireFormat {
        self.body.wire_format()
    }

    /// Content type, for public and private messages.
    pub const fn content_type(&self) -> Option<ContentType> {
        match &self.body {
            MlsMessageBody::PublicMessage(message) => Some(message.content().content_type()),
            MlsMessageBody::PrivateMessage(message) => Some(message.content_type),
            MlsMessageBody::Welcome(_) | MlsMessageBody::GroupInfo(_) | MlsMessageBody::KeyPackage(_) => {
                None
            },
        }
    }

    /// Cipher suite, for welcomes and key packages.
    ///
    /// Framed messages and group infos do not carry a suite of their own at
    /// envelope level.
    pub const fn cipher_suite(&self) -> Option<CipherSuite> {
        match &self.body {
            MlsMessageBody::Welcome(welcome) => Some(welcome.cipher_suite),
            MlsMessageBody::KeyPackage(package) => Some(package.cipher_suite),
            MlsMessageBody::PublicMessage(_)
            | MlsMessageBody::PrivateMessage(_)
            | MlsMessageBody::GroupInfo(_) => None,
        }
    }

    /// Epoch, for public and private messages.
    pub const fn epoch(&self) -> Option<u64> {
        match &self.body {
            MlsMessageBody::PublicMessage(message) => Some(message.content().epoch),
            MlsMessageBody::PrivateMessage(message) => Some(message.epoch),
            MlsMessageBody::Welcome(_) | MlsMessageBody::GroupInfo(_) | MlsMessageBody::KeyPackage(_) => {
                None
            },
        }
    }

    /// Group ID, for payloads that name their group.
    pub fn group_id(&self) -> Option<&[u8]> {
        match &self.body {
            MlsMessageBody::PublicMessage(message) => Some(&message.content().group_id),
            MlsMessageBody::PrivateMessage(message) => Some(&message.group_id),
            MlsMessageBody::GroupInfo(info) => Some(&info.group_context.group_id),
            MlsMessageBody::Welcome(_) | MlsMessageBody::KeyPackage(_) => None,
        }
    }
}

impl Encode for MlsMessage {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.version.encode(dst)?;
        self.wire_format().encode(dst)?;
        self.body.encode(dst)
    }
}

impl Decode for MlsMessage {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let version = ProtocolVersion::read(reader, "MLSMessage.version")?;
        let wire_format = WireFormat::read(reader, "MLSMessage.wire_format")?;
        let body = MlsMessageBody::decode_with(reader, wire_format)?;

        Ok(Self { version, body })
    }
}
