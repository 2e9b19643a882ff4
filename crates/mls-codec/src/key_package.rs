//! Key packages: signed bundles a prospective member publishes so others can
//! add it to a group.

use bytes::BufMut;

use crate::{
    codec::{Decode, Encode, Reader, write_list, write_opaque},
    enums::{CipherSuite, ProtocolVersion},
    errors::Result,
    leaf_node::LeafNode,
    primitives::Extension,
};

/// Published key package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPackage {
    /// Protocol version
    pub version: ProtocolVersion,
    /// Cipher suite the package was built for
    pub cipher_suite: CipherSuite,
    /// HPKE key the Welcome is sealed to
    pub init_key: Vec<u8>,
    /// The joiner's leaf, with source key_package
    pub leaf_node: LeafNode,
    /// Package extensions
    pub extensions: Vec<Extension>,
    /// Signature over [`KeyPackageTbs`]
    pub signature: Vec<u8>,
}

impl KeyPackage {
    /// Signature input of this package.
    pub const fn to_be_signed(&self) -> KeyPackageTbs<'_> {
        KeyPackageTbs(self)
    }

    fn encode_content(&self, dst: &mut impl BufMut) -> Result<()> {
        self.version.encode(dst)?;
        self.cipher_suite.encode(dst)?;
        write_opaque(dst, "KeyPackage.init_key", &self.init_key)?;
        self.leaf_node.encode(dst)?;
        write_list(dst, "KeyPackage.extensions", &self.extensions)
    }
}

impl Encode for KeyPackage {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.encode_content(dst)?;
        write_opaque(dst, "KeyPackage.signature", &self.signature)
    }
}

impl Decode for KeyPackage {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            version: ProtocolVersion::read(reader, "KeyPackage.version")?,
            cipher_suite: CipherSuite::decode(reader)?,
            init_key: reader.read_opaque("KeyPackage.init_key")?,
            leaf_node: LeafNode::decode(reader)?,
            extensions: reader.read_list("KeyPackage.extensions")?,
            signature: reader.read_opaque("KeyPackage.signature")?,
        })
    }
}

/// Every key package field except the signature.
#[derive(Debug, Clone, Copy)]
pub struct KeyPackageTbs<'a>(&'a KeyPackage);

impl Encode for KeyPackageTbs<'_> {
    fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        self.0.encode_content(dst)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        codec::{decode_exact, encode_to_vec},
        test_utils::minimal_key_package,
    };

    #[test]
    fn tbs_is_package_without_signature() {
        let package = minimal_key_package(CipherSuite::MLS_128_DHKEMX25519_AES128GCM_SHA256_ED25519);
        let full = encode_to_vec(&package).expect("encodes");
        let tbs = encode_to_vec(&package.to_be_signed()).expect("encodes");

        let mut signature = Vec::new();
        write_opaque(&mut signature, "test", &package.signature).expect("encodes");
        assert_eq!([tbs, signature].concat(), full);
    }

    #[test]
    fn header_layout() {
        let package = minimal_key_package(CipherSuite(0x0003));
        let wire = encode_to_vec(&package).expect("encodes");
        assert_eq!(wire[..4], [0x00, 0x01, 0x00, 0x03]);
    }

    proptest! {
        #[test]
        fn key_package_round_trip(package in any::<KeyPackage>()) {
            let wire = encode_to_vec(&package).expect("encodes");
            prop_assert_eq!(decode_exact::<KeyPackage>(&wire, "KeyPackage"), Ok(package));
        }
    }
}
