//! Resource limits applied when decoding untrusted input.

/// Default cap on an encoded `MLSMessage` (16 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Bounds checked before any structure is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted envelope, in bytes
    pub max_message_size: usize,
}

impl Limits {
    /// Limits with every bound at its default.
    pub const fn new() -> Self {
        Self { max_message_size: DEFAULT_MAX_MESSAGE_SIZE }
    }

    /// Replace the envelope size cap.
    #[must_use]
    pub const fn with_max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
