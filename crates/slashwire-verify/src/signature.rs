//! Ed25519 verification over timestamp-prefixed payloads.

use ed25519_dalek::{Signature, Verifier, VerifyingKey, SIGNATURE_LENGTH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature does not verify")]
    InvalidSignature,
}

/// Verifies detached Ed25519 signatures against one fixed public key.
///
/// The signed message is `timestamp` followed immediately by `body`: the
/// timestamp header's raw ASCII bytes, then the body bytes exactly as
/// received. The timestamp is never parsed, only concatenated, so a
/// stale-but-correctly-signed request still verifies. Freshness policy stays
/// out of this layer.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: VerifyingKey,
}

impl SignatureVerifier {
    /// Builds a verifier from the application's hex-encoded public key, as
    /// shown in the developer portal.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, VerifyError> {
        let bytes = hex::decode(public_key_hex)
            .map_err(|err| VerifyError::InvalidPublicKey(err.to_string()))?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            VerifyError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        let public_key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| VerifyError::InvalidPublicKey("not a valid curve point".into()))?;
        Ok(Self { public_key })
    }

    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, VerifyError> {
        let public_key = VerifyingKey::from_bytes(bytes)
            .map_err(|_| VerifyError::InvalidPublicKey("not a valid curve point".into()))?;
        Ok(Self { public_key })
    }

    /// Checks `signature_hex` against the timestamp-prefixed body. Binary
    /// outcome: either the payload was signed by the key holder or it was not.
    pub fn verify(
        &self,
        signature_hex: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<(), VerifyError> {
        let bytes = hex::decode(signature_hex)
            .map_err(|err| VerifyError::MalformedSignature(err.to_string()))?;
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            VerifyError::MalformedSignature(format!(
                "expected {SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.public_key
            .verify(&message, &signature)
            .map_err(|_| VerifyError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::RngCore;

    fn test_keypair() -> (SigningKey, SignatureVerifier) {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let signing_key = SigningKey::from_bytes(&seed);
        let verifier = SignatureVerifier::from_bytes(&signing_key.verifying_key().to_bytes())
            .expect("dalek always produces a valid key");
        (signing_key, verifier)
    }

    fn sign(signing_key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing_key.sign(&message).to_bytes())
    }

    #[test]
    fn test_valid_signature_verifies() {
        let (signing_key, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1700000000", body);

        assert!(verifier.verify(&signature, "1700000000", body).is_ok());
    }

    #[test]
    fn test_tampered_body_fails() {
        let (signing_key, verifier) = test_keypair();
        let signature = sign(&signing_key, "1700000000", br#"{"type":1}"#);

        let result = verifier.verify(&signature, "1700000000", br#"{"type":2}"#);
        assert!(matches!(result, Err(VerifyError::InvalidSignature)));
    }

    #[test]
    fn test_tampered_timestamp_fails() {
        let (signing_key, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1700000000", body);

        let result = verifier.verify(&signature, "1700000001", body);
        assert!(matches!(result, Err(VerifyError::InvalidSignature)));
    }

    #[test]
    fn test_flipped_signature_bit_fails() {
        let (signing_key, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1700000000", body);

        let mut bytes = hex::decode(&signature).unwrap();
        bytes[10] ^= 0x01;
        let flipped = hex::encode(bytes);

        let result = verifier.verify(&flipped, "1700000000", body);
        assert!(matches!(result, Err(VerifyError::InvalidSignature)));
    }

    #[test]
    fn test_scheme_authenticates_the_concatenation() {
        // The platform signs the plain concatenation, so shifting bytes
        // across the timestamp/body boundary leaves the same signed message.
        let (signing_key, verifier) = test_keypair();
        let signature = sign(&signing_key, "17000", b"00000body");

        assert!(verifier.verify(&signature, "17000", b"00000body").is_ok());
        assert!(verifier.verify(&signature, "170000", b"0000body").is_ok());
    }

    #[test]
    fn test_short_signature_is_malformed() {
        let (_, verifier) = test_keypair();

        let result = verifier.verify("deadbeef", "1700000000", b"{}");
        assert!(matches!(result, Err(VerifyError::MalformedSignature(_))));
    }

    #[test]
    fn test_non_hex_signature_is_malformed() {
        let (_, verifier) = test_keypair();

        let result = verifier.verify("zz", "1700000000", b"{}");
        assert!(matches!(result, Err(VerifyError::MalformedSignature(_))));
    }

    #[test]
    fn test_bad_public_key_hex_rejected() {
        assert!(matches!(
            SignatureVerifier::from_hex("not hex at all"),
            Err(VerifyError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            SignatureVerifier::from_hex("deadbeef"),
            Err(VerifyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_round_trips_through_hex_key() {
        let (signing_key, _) = test_keypair();
        let key_hex = hex::encode(signing_key.verifying_key().to_bytes());
        let verifier = SignatureVerifier::from_hex(&key_hex).unwrap();

        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1700000000", body);
        assert!(verifier.verify(&signature, "1700000000", body).is_ok());
    }
}
