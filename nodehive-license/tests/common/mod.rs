//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signer, SigningKey};

/// Returns a deterministic Ed25519 key pair from a fixed seed, with the
/// public key in the hex form the config carries.
pub fn test_keypair() -> (SigningKey, String) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let public_key_hex = hex::encode(signing_key.verifying_key().to_bytes());
    (signing_key, public_key_hex)
}

/// Signs `message` and returns the base64 signature the envelopes carry.
pub fn sign_b64(signing_key: &SigningKey, message: &str) -> String {
    BASE64.encode(signing_key.sign(message.as_bytes()).to_bytes())
}

/// A subscription payload JSON string with the given status.
pub fn subscription_json(status: &str, name: &str, start_date: i64, end_date: i64) -> String {
    format!(
        r#"{{"status":"{status}","name":"{name}","start_date":{start_date},"end_date":{end_date},"nodes_limit":5}}"#
    )
}

/// An acknowledgment response body whose signature covers the exact
/// `subscription_json` bytes.
pub fn ack_body(signing_key: &SigningKey, subscription_json: &str) -> String {
    let sig = sign_b64(signing_key, subscription_json);
    format!(r#"{{"data":{{"signature":"{sig}","subscription":{subscription_json}}}}}"#)
}

/// A current-timestamp response body signed over the `time` sub-object.
pub fn time_body(signing_key: &SigningKey, current_time: i64) -> String {
    let time_json = format!(r#"{{"current_time":{current_time}}}"#);
    let sig = sign_b64(signing_key, &time_json);
    format!(r#"{{"data":{{"signature":"{sig}","time":{time_json}}}}}"#)
}
