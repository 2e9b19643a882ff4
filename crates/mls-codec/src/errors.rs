//! Error types for MLS wire encoding and decoding.
//!
//! Every decode failure names the structure and field it was processing in the
//! form `Structure.field`, so a rejected message can be diagnosed without
//! re-parsing it.

use thiserror::Error;

/// Errors raised while encoding or decoding MLS structures.
///
/// Decoding never returns a partially populated structure: the first error
/// aborts the whole decode call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    // Stream errors
    /// Input ended before a declared length was satisfied
    #[error("{field}: truncated input, needed {needed} bytes but only {available} remain")]
    Truncated {
        /// Field being decoded
        field: &'static str,
        /// Bytes the field required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// A length prefix is malformed or inconsistent with the data it frames
    #[error("{field}: invalid length prefix ({reason})")]
    InvalidLength {
        /// Field being decoded
        field: &'static str,
        /// What was wrong with the prefix
        reason: &'static str,
    },

    /// Optional presence byte other than 0 or 1
    #[error("{field}: invalid presence flag {value:#04x}")]
    InvalidPresence {
        /// Field being decoded
        field: &'static str,
        /// The offending byte
        value: u8,
    },

    /// Bytes remained after a structure that must fill its buffer exactly
    #[error("{field}: {remaining} trailing bytes after complete structure")]
    TrailingBytes {
        /// Structure that was decoded
        field: &'static str,
        /// Unconsumed byte count
        remaining: usize,
    },

    // Validation errors
    /// Enumeration code outside its closed table
    #[error("{field}: unknown discriminant {value}")]
    UnknownDiscriminant {
        /// Field being decoded
        field: &'static str,
        /// Raw code read from the wire
        value: u64,
    },

    /// A field the surrounding context requires is absent
    #[error("{field}: required by context but absent")]
    MissingField {
        /// Field that is missing
        field: &'static str,
    },

    /// A field is populated that the surrounding context forbids
    #[error("{field}: present but forbidden by context")]
    UnexpectedField {
        /// Field that must not be present
        field: &'static str,
    },

    /// Two structures that must agree on a discriminant disagree
    #[error("{field}: does not match the enclosing structure")]
    ContextMismatch {
        /// Field whose discriminant disagrees
        field: &'static str,
    },

    // Size errors
    /// Opaque or list body too long for a variable-length integer prefix
    #[error("{field}: length {len} exceeds the variable-length integer range")]
    LengthOverflow {
        /// Field being encoded
        field: &'static str,
        /// Body length in bytes
        len: usize,
    },

    /// Encoded message exceeds the configured limit
    #[error("message too large: {size} bytes exceeds maximum {max}")]
    MessageTooLarge {
        /// Message size in bytes
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl CodecError {
    /// Field the error refers to, if it refers to one.
    pub fn field(&self) -> Option<&'static str> {
        match *self {
            Self::Truncated { field, .. }
            | Self::InvalidLength { field, .. }
            | Self::InvalidPresence { field, .. }
            | Self::TrailingBytes { field, .. }
            | Self::UnknownDiscriminant { field, .. }
            | Self::MissingField { field }
            | Self::UnexpectedField { field }
            | Self::ContextMismatch { field }
            | Self::LengthOverflow { field, .. } => Some(field),
            Self::MessageTooLarge { .. } => None,
        }
    }
}

/// Convenient Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
