mod common;

use common::test_keypair;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::EncodePublicKey;
use ed25519_dalek::Signer;
use nodehive_license::{decode_verifying_key, verify, SignatureError};

// ── Key decoding ─────────────────────────────────────────────────

#[test]
fn decode_hex_key() {
    let (sk, pk_hex) = test_keypair();
    let decoded = decode_verifying_key(&pk_hex).unwrap();
    assert_eq!(decoded, sk.verifying_key());
}

#[test]
fn decode_hex_key_with_whitespace() {
    let (_, pk_hex) = test_keypair();
    let padded = format!("  {pk_hex}\n");
    assert!(decode_verifying_key(&padded).is_ok());
}

#[test]
fn decode_pem_key() {
    let (sk, _) = test_keypair();
    let pem = sk
        .verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    let decoded = decode_verifying_key(&pem).unwrap();
    assert_eq!(decoded, sk.verifying_key());
}

#[test]
fn decode_invalid_hex() {
    let result = decode_verifying_key("zz not hex zz");
    assert!(matches!(result, Err(SignatureError::KeyDecode(_))));
}

#[test]
fn decode_wrong_length_hex() {
    // 16 bytes, not 32
    let result = decode_verifying_key("00112233445566778899aabbccddeeff");
    assert!(matches!(result, Err(SignatureError::KeyDecode(_))));
}

#[test]
fn decode_garbage_pem() {
    let result = decode_verifying_key("-----BEGIN PUBLIC KEY-----\nnot a key\n-----END PUBLIC KEY-----");
    assert!(matches!(result, Err(SignatureError::KeyDecode(_))));
}

#[test]
fn decode_empty_string() {
    assert!(decode_verifying_key("").is_err());
}

// ── Verification ─────────────────────────────────────────────────

#[test]
fn verify_valid_signature() {
    let (sk, _) = test_keypair();
    let message = b"signed payload";
    let sig = sk.sign(message).to_bytes();
    let result = verify(message, &sig, &sk.verifying_key()).unwrap();
    assert!(result);
}

#[test]
fn verify_bit_flipped_signature_is_false_not_error() {
    let (sk, _) = test_keypair();
    let message = b"signed payload";
    let mut sig = sk.sign(message).to_bytes();
    sig[0] ^= 0x01;
    // Still 64 bytes: a legitimate "not authenticated" outcome.
    let result = verify(message, &sig, &sk.verifying_key()).unwrap();
    assert!(!result);
}

#[test]
fn verify_wrong_message_is_false() {
    let (sk, _) = test_keypair();
    let sig = sk.sign(b"original").to_bytes();
    let result = verify(b"tampered", &sig, &sk.verifying_key()).unwrap();
    assert!(!result);
}

#[test]
fn verify_wrong_key_is_false() {
    let (sk, _) = test_keypair();
    let other = other_verifying_key();
    let message = b"signed payload";
    let sig = sk.sign(message).to_bytes();
    let result = verify(message, &sig, &other).unwrap();
    assert!(!result);
}

#[test]
fn verify_truncated_signature_is_error() {
    let (sk, _) = test_keypair();
    let message = b"signed payload";
    let sig = sk.sign(message).to_bytes();
    let result = verify(message, &sig[..63], &sk.verifying_key());
    assert!(matches!(result, Err(SignatureError::Malformed(_))));
}

#[test]
fn verify_empty_signature_is_error() {
    let (sk, _) = test_keypair();
    assert!(verify(b"x", &[], &sk.verifying_key()).is_err());
}

/// Second deterministic key, distinct from the shared test keypair.
fn other_verifying_key() -> ed25519_dalek::VerifyingKey {
    let seed = [42u8; 32];
    ed25519_dalek::SigningKey::from_bytes(&seed).verifying_key()
}
