//! Leaf value types.
//!
//! Self-contained records with at most one level of discriminant branching.
//! Key material and secrets are carried as opaque bytes; their meaning belongs
//! to the cryptographic layer.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, write_list, write_opaque},
    enums::{CredentialType, ExtensionType},
    errors::Result,
};

/// Typed extension blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension kind
    pub extension_type: ExtensionType,
    /// Extension body, interpreted by whoever understands `extension_type`
    pub extension_data: Vec<u8>,
}

impl Encode for Extension {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.extension_type.encode(dst)?;
        write_opaque(dst, "Extension.extension_data", &self.extension_data)
    }
}

impl Decode for Extension {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            extension_type: ExtensionType::read(reader, "Extension.extension_type")?,
            extension_data: reader.read_opaque("Extension.extension_data")?,
        })
    }
}

/// DER-encoded certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// Certificate bytes
    pub cert_data: Vec<u8>,
}

impl Encode for Certificate {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "Certificate.cert_data", &self.cert_data)
    }
}

impl Decode for Certificate {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { cert_data: reader.read_opaque("Certificate.cert_data")? })
    }
}

/// Binding between a member and its signature key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Application-defined identity bytes
    Basic {
        /// Identity
        identity: Vec<u8>,
    },
    /// Certificate chain, leaf first
    X509 {
        /// Chain
        certificates: Vec<Certificate>,
    },
}

impl Credential {
    /// Wire discriminant of this credential
    pub const fn credential_type(&self) -> CredentialType {
        match self {
            Self::Basic { .. } => CredentialType::Basic,
            Self::X509 { .. } => CredentialType::X509,
        }
    }
}

impl Encode for Credential {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.credential_type().encode(dst)?;
        match self {
            Self::Basic { identity } => write_opaque(dst, "Credential.identity", identity),
            Self::X509 { certificates } => write_list(dst, "Credential.certificates", certificates),
        }
    }
}

impl Decode for Credential {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match CredentialType::read(reader, "Credential.credential_type")? {
            CredentialType::Basic => {
                Ok(Self::Basic { identity: reader.read_opaque("Credential.identity")? })
            },
            CredentialType::X509 => {
                Ok(Self::X509 { certificates: reader.read_list("Credential.certificates")? })
            },
        }
    }
}

/// What a client supports.
///
/// Codes are kept raw: a client may legitimately advertise versions, suites or
/// extensions this codec has no variant for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Protocol versions
    pub versions: Vec<u16>,
    /// Cipher suites
    pub cipher_suites: Vec<u16>,
    /// Extension types
    pub extensions: Vec<u16>,
    /// Proposal types
    pub proposals: Vec<u16>,
    /// Credential types
    pub credentials: Vec<u16>,
}

impl Encode for Capabilities {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_list(dst, "Capabilities.versions", &self.versions)?;
        write_list(dst, "Capabilities.cipher_suites", &self.cipher_suites)?;
        write_list(dst, "Capabilities.extensions", &self.extensions)?;
        write_list(dst, "Capabilities.proposals", &self.proposals)?;
        write_list(dst, "Capabilities.credentials", &self.credentials)
    }
}

impl Decode for Capabilities {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            versions: reader.read_list("Capabilities.versions")?,
            cipher_suites: reader.read_list("Capabilities.cipher_suites")?,
            extensions: reader.read_list("Capabilities.extensions")?,
            proposals: reader.read_list("Capabilities.proposals")?,
            credentials: reader.read_list("Capabilities.credentials")?,
        })
    }
}

/// Validity window of a key package leaf, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
    /// Start of validity
    pub not_before: u64,
    /// End of validity
    pub not_after: u64,
}

impl Encode for Lifetime {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        dst.put_u64(self.not_before);
        dst.put_u64(self.not_after);
        Ok(())
    }
}

impl Decode for Lifetime {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            not_before: reader.read_u64("Lifetime.not_before")?,
            not_after: reader.read_u64("Lifetime.not_after")?,
        })
    }
}

/// HPKE-sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpkeCiphertext {
    /// Encapsulated key
    pub kem_output: Vec<u8>,
    /// Sealed bytes
    pub ciphertext: Vec<u8>,
}

impl Encode for HpkeCiphertext {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "HpkeCiphertext.kem_output", &self.kem_output)?;
        write_opaque(dst, "HpkeCiphertext.ciphertext", &self.ciphertext)
    }
}

impl Decode for HpkeCiphertext {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            kem_output: reader.read_opaque("HpkeCiphertext.kem_output")?,
            ciphertext: reader.read_opaque("HpkeCiphertext.ciphertext")?,
        })
    }
}

/// Path secret handed to a joiner in `GroupSecrets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSecret {
    /// Secret bytes
    pub path_secret: Vec<u8>,
}

impl Encode for PathSecret {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        write_opaque(dst, "PathSecret.path_secret", &self.path_secret)
    }
}

impl Decode for PathSecret {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self { path_secret: reader.read_opaque("PathSecret.path_secret")? })
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        codec::{decode_exact, encode_to_vec},
        errors::CodecError,
    };

    #[test]
    fn basic_credential_wire() {
        let credential = Credential::Basic { identity: b"alice".to_vec() };
        let wire = encode_to_vec(&credential).expect("encodes");
        assert_eq!(wire, hex!("0001 05 616c696365"));
    }

    #[test]
    fn x509_credential_wire() {
        let credential = Credential::X509 {
            certificates: vec![
                Certificate { cert_data: vec![0xAA] },
                Certificate { cert_data: vec![0xBB, 0xCC] },
            ],
        };
        let wire = encode_to_vec(&credential).expect("encodes");
        assert_eq!(wire, hex!("0002 05 01aa 02bbcc"));
        assert_eq!(decode_exact::<Credential>(&wire, "Credential"), Ok(credential));
    }

    #[test]
    fn unknown_credential_type() {
        assert_eq!(
            decode_exact::<Credential>(&hex!("0003 00"), "Credential"),
            Err(CodecError::UnknownDiscriminant { field: "Credential.credential_type", value: 3 })
        );
    }

    #[test]
    fn empty_capabilities_are_five_empty_lists() {
        let wire = encode_to_vec(&Capabilities::default()).expect("encodes");
        assert_eq!(wire, [0, 0, 0, 0, 0]);
    }

    #[test]
    fn unknown_extension_type() {
        assert!(matches!(
            decode_exact::<Extension>(&hex!("0006 00"), "Extension"),
            Err(CodecError::UnknownDiscriminant { field: "Extension.extension_type", value: 6 })
        ));
    }

    proptest! {
        #[test]
        fn extension_round_trip(extension in any::<Extension>()) {
            let wire = encode_to_vec(&extension).expect("encodes");
            prop_assert_eq!(decode_exact::<Extension>(&wire, "Extension"), Ok(extension));
        }

        #[test]
        fn credential_round_trip(credential in any::<Credential>()) {
            let wire = encode_to_vec(&credential).expect("encodes");
            prop_assert_eq!(decode_exact::<Credential>(&wire, "Credential"), Ok(credential));
        }

        #[test]
        fn capabilities_round_trip(capabilities in any::<Capabilities>()) {
            let wire = encode_to_vec(&capabilities).expect("encodes");
            prop_assert_eq!(decode_exact::<Capabilities>(&wire, "Capabilities"), Ok(capabilities));
        }

        #[test]
        fn hpke_ciphertext_round_trip(ct in any::<HpkeCiphertext>()) {
            let wire = encode_to_vec(&ct).expect("encodes");
            prop_assert_eq!(decode_exact::<HpkeCiphertext>(&wire, "HpkeCiphertext"), Ok(ct));
        }
    }
}
