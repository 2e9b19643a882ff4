use bytes::BufMut;

use super::{FramedContentAuthData, FramedContentBody};
use crate::{
    codec::{Decode, DecodeWith, Encode, Reader, write_opaque},
    enums::ContentType,
    errors::{CodecError, Result},
};

/// Additional authenticated data for sealing [`super::SenderData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderDataAad {
    /// Group the message belongs to
    pub group_id: Vec<u8>,
    /// Epoch the message was sent in
    pub epoch: u64,
    /// Content type of the message
    pub content_type: ContentType,
}

impl Encode for SenderDataAad {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "SenderDataAad.group_id", &self.group_id)?;
        dst.put_u64(self.epoch);
        self.content_type.encode(dst)
    }
}

impl Decode for SenderDataAad {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            group_id: reader.read_opaque("SenderDataAad.group_id")?,
            epoch: reader.read_u64("SenderDataAad.epoch")?,
            content_type: ContentType::read(reader, "SenderDataAad.content_type")?,
        })
    }
}

/// Additional authenticated data for sealing [`PrivateMessageContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateContentAad {
    /// Group the message belongs to
    pub group_id: Vec<u8>,
    /// Epoch the message was sent in
    pub epoch: u64,
    /// Content type of the message
    pub content_type: ContentType,
    /// Application-supplied authenticated data
    pub authenticated_data: Vec<u8>,
}

impl Encode for PrivateContentAad {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "PrivateContentAad.group_id", &self.group_id)?;
        dst.put_u64(self.epoch);
        self.content_type.encode(dst)?;
        write_opaque(dst, "PrivateContentAad.authenticated_data", &self.authenticated_data)
    }
}

impl Decode for PrivateContentAad {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            group_id: reader.read_opaque("PrivateContentAad.group_id")?,
            epoch: reader.read_u64("PrivateContentAad.epoch")?,
            content_type: ContentType::read(reader, "PrivateContentAad.content_type")?,
            authenticated_data: reader.read_opaque("PrivateContentAad.authenticated_data")?,
        })
    }
}

/// Plaintext of a private message's ciphertext.
///
/// The content type is not carried in these bytes. It travels in the
/// enclosing [`PrivateMessage`] and is passed to the decoder.
///
/// # Invariants
///
/// - The auth data is typed by the body's content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessageContent {
    body: FramedContentBody,
    auth: FramedContentAuthData,
    padding: Vec<u8>,
}

impl PrivateMessageContent {
    /// Assemble the plaintext.
    ///
    /// `padding` is carried as a length-prefixed byte string and its value is
    /// never read back.
    ///
    /// # Errors
    ///
    /// [`CodecError::ContextMismatch`] if `auth` was built for another content
    /// type than `body`.
    pub fn new(body: FramedContentBody, auth: FramedContentAuthData, padding: Vec<u8>) -> Result<Self> {
        if auth.content_type() != body.content_type() {
            return Err(CodecError::ContextMismatch { field: "PrivateMessageContent.auth" });
        }

        Ok(Self { body, auth, padding })
    }

    /// Content type of the body
    pub const fn content_type(&self) -> ContentType {
        self.body.content_type()
    }

    /// Application data, proposal or commit
    pub const fn body(&self) -> &FramedContentBody {
        &self.body
    }

    /// Signature and confirmation tag
    pub const fn auth(&self) -> &FramedContentAuthData {
        &self.auth
    }

    /// Padding bytes
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }
}

impl Encode for PrivateMessageContent {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.body.encode(dst)?;
        self.auth.encode(dst)?;
        write_opaque(dst, "PrivateMessageContent.padding", &self.padding)
    }
}

impl DecodeWith<ContentType> for PrivateMessageContent {
    fn decode_with(reader: &mut Reader<'_>, content_type: ContentType) -> Result<Self> {
        Ok(Self {
            body: FramedContentBody::decode_with(reader, content_type)?,
            auth: FramedContentAuthData::decode_with(reader, content_type)?,
            padding: reader.read_opaque("PrivateMessageContent.padding")?,
        })
    }
}

/// Encrypted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessage {
    /// Group the message belongs to
    pub group_id: Vec<u8>,
    /// Epoch the message was sent in
    pub epoch: u64,
    /// Content type of the sealed content
    pub content_type: ContentType,
    /// Application-supplied authenticated data
    pub authenticated_data: Vec<u8>,
    /// Sealed [`super::SenderData`]
    pub encrypted_sender_data: Vec<u8>,
    /// Sealed [`PrivateMessageContent`]
    pub ciphertext: Vec<u8>,
}

impl PrivateMessage {
    /// AAD for opening `encrypted_sender_data`.
    pub fn sender_data_aad(&self) -> SenderDataAad {
        SenderDataAad {
            group_id: self.group_id.clone(),
            epoch: self.epoch,
            content_type: self.content_type,
        }
    }

    /// AAD for opening `ciphertext`.
    pub fn content_aad(&self) -> PrivateContentAad {
        PrivateContentAad {
            group_id: self.group_id.clone(),
            epoch: self.epoch,
            content_type: self.content_type,
            authenticated_data: self.authenticated_data.clone(),
        }
    }
}

impl Encode for PrivateMessage {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "PrivateMessage.group_id", &self.group_id)?;
        dst.put_u64(self.epoch);
        self.content_type.encode(dst)?;
        write_opaque(dst, "PrivateMessage.authenticated_data", &self.authenticated_data)?;
        write_opaque(dst, "PrivateMessage.encrypted_sender_data", &self.encrypted_sender_data)?;
        write_opaque(dst, "PrivateMessage.ciphertext", &self.ciphertext)
    }
}

impl Decode for PrivateMessage {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            group_id: reader.read_opaque("PrivateMessage.group_id")?,
            epoch: reader.read_u64("PrivateMessage.epoch")?,
            content_type: ContentType::read(reader, "PrivateMessage.content_type")?,
            authenticated_data: reader.read_opaque("PrivateMessage.authenticated_data")?,
            encrypted_sender_data: reader.read_opaque("PrivateMessage.encrypted_sender_data")?,
            ciphertext: reader.read_opaque("PrivateMessage.ciphertext")?,
        })
    }
}
