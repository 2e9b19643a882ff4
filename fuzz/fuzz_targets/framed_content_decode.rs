//! Framed content and its signed-over forms.
//!
//! The input is parsed both as a bare `FramedContent` prefix and as a whole
//! `AuthenticatedContent`. Accepted values must re-encode byte for byte.
//! The signature input demands a group context from exactly the senders that
//! bind one.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mls_codec::{AuthenticatedContent, FramedContent, SenderType, decode_exact, decode_prefix, encode_to_vec};

fuzz_target!(|data: &[u8]| {
    if let Ok((content, used)) = decode_prefix::<FramedContent>(data) {
        let encoded = encode_to_vec(&content).expect("decoded content must re-encode");
        assert_eq!(encoded, data[..used]);
    }

    let Ok(authenticated) = decode_exact::<AuthenticatedContent>(data, "AuthenticatedContent") else {
        return;
    };
    assert_eq!(encode_to_vec(&authenticated).expect("re-encode"), data);

    let _ = authenticated.confirmed_transcript_hash_input().expect("transcript input");

    // Without a group context the TBS is rejected exactly for the senders
    // that must bind one
    let binds_context = matches!(
        authenticated.content().sender.sender_type(),
        SenderType::Member | SenderType::NewMemberCommit
    );
    assert_eq!(authenticated.to_be_signed(None).is_err(), binds_context);
});
