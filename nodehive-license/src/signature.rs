//! Ed25519 signature primitives.
//!
//! Stateless helpers for decoding the trusted public key and verifying
//! a byte payload against a detached signature. The message passed to
//! [`verify`] must be the exact bytes the signature was produced over —
//! for wire envelopes that means the byte span carried in the response,
//! never a re-serialized copy of it.

use crate::error::SignatureError;
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::{Signature, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH};

/// Decodes a verifying key from its configured string form.
///
/// Accepts either a PEM `PUBLIC KEY` block or a hex string of the raw
/// 32-byte key.
///
/// # Errors
///
/// Returns [`SignatureError::KeyDecode`] if the string is neither.
pub fn decode_verifying_key(encoded: &str) -> Result<VerifyingKey, SignatureError> {
    let encoded = encoded.trim();

    if encoded.starts_with("-----BEGIN") {
        return VerifyingKey::from_public_key_pem(encoded)
            .map_err(|e| SignatureError::KeyDecode(format!("invalid PEM public key: {e}")));
    }

    let bytes = hex::decode(encoded)
        .map_err(|e| SignatureError::KeyDecode(format!("invalid hex public key: {e}")))?;
    let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes
        .try_into()
        .map_err(|_| SignatureError::KeyDecode("public key must be 32 bytes".to_string()))?;

    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| SignatureError::KeyDecode(format!("invalid public key bytes: {e}")))
}

/// Verifies `signature` over `message` with `key`.
///
/// A well-formed signature that does not authenticate yields `Ok(false)`.
///
/// # Errors
///
/// Returns [`SignatureError::Malformed`] only for structurally invalid
/// signature bytes (wrong length).
pub fn verify(
    message: &[u8],
    signature: &[u8],
    key: &VerifyingKey,
) -> Result<bool, SignatureError> {
    let signature = Signature::from_slice(signature)
        .map_err(|_| SignatureError::Malformed("signature must be 64 bytes".to_string()))?;

    Ok(key.verify(message, &signature).is_ok())
}
