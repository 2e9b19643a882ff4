//! Arbitrary bytes through the untrusted entry point.
//!
//! Decoding must never panic, and anything it accepts must re-encode to the
//! exact input: the wire form of a value is unique.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mls_codec::{Limits, MlsMessage};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::new().with_max_message_size(64 * 1024);
    let Ok(message) = MlsMessage::from_bytes_with(data, limits) else {
        return;
    };

    let encoded = message.to_bytes().expect("decoded message must re-encode");
    assert_eq!(encoded, data, "accepted a non-canonical encoding");

    // Accessors never panic on any accepted message
    let _ = (message.wire_format(), message.content_type(), message.epoch());
    let _ = (message.cipher_suite(), message.group_id());
});
