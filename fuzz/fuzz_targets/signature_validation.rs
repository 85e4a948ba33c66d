#![no_main]

//! Fuzz target for webhook signature validation.
//!
//! Splits the input into a header value, a secret and a body, then checks
//! that verification never panics and that a freshly computed signature is
//! always accepted.

use http::{HeaderMap, HeaderValue};
use libfuzzer_sys::fuzz_target;
use pickup_api::crypto::{
    compute_signature_base64, verify_signature, verify_webhook, SignatureCheck, SIGNATURE_HEADER,
};

fuzz_target!(|data: &[u8]| {
    let (head, body) = data.split_at(data.len().min(64));
    let (signature, secret) = head.split_at(head.len() / 2);
    let secret = String::from_utf8_lossy(secret);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_bytes(signature) {
        headers.insert(SIGNATURE_HEADER, value);
    }
    let _ = verify_webhook(&headers, body, &secret);
    let _ = verify_signature(body, &String::from_utf8_lossy(signature), &secret);

    if secret.is_empty() {
        return;
    }
    if let Ok(expected) = compute_signature_base64(body, &secret) {
        assert!(verify_signature(body, &expected, &secret));
        if let Ok(value) = HeaderValue::from_str(&expected) {
            let mut signed = HeaderMap::new();
            signed.insert(SIGNATURE_HEADER, value);
            assert_eq!(verify_webhook(&signed, body, &secret), SignatureCheck::Valid);
        }
    }
});
