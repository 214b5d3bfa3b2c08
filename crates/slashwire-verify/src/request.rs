//! Header-level authentication of inbound webhook requests.

use thiserror::Error;
use tracing::warn;

use crate::signature::{SignatureVerifier, VerifyError};

/// Header carrying the hex-encoded detached signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
/// Header carrying the timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing X-Signature-Ed25519 header")]
    MissingSignature,

    #[error("missing X-Signature-Timestamp header")]
    MissingTimestamp,

    #[error(transparent)]
    Verification(#[from] VerifyError),
}

/// Authenticates one request worth of credentials: the two signature headers
/// plus the raw body bytes.
///
/// Every failure class collapses to the same rejection at the HTTP surface.
/// The concrete cause is logged here and must never reach the remote caller,
/// so the verifier cannot be used as an oracle.
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    verifier: SignatureVerifier,
}

impl RequestAuthenticator {
    pub fn new(verifier: SignatureVerifier) -> Self {
        Self { verifier }
    }

    /// Builds an authenticator straight from the application's hex public key.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, VerifyError> {
        Ok(Self::new(SignatureVerifier::from_hex(public_key_hex)?))
    }

    /// Verifies the headers against `body`. The body must be the exact bytes
    /// received on the wire, captured before any JSON decoding; the same
    /// bytes must then be what gets decoded.
    ///
    /// A missing header fails authentication the same way a bad signature
    /// does. Callers should map every `Err` to one fixed 401 response.
    pub fn authenticate(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), AuthError> {
        let result = self.check(signature, timestamp, body);
        if let Err(err) = &result {
            warn!("[Auth] Rejected request: {}", err);
        }
        result
    }

    fn check(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), AuthError> {
        let signature = signature.ok_or(AuthError::MissingSignature)?;
        let timestamp = timestamp.ok_or(AuthError::MissingTimestamp)?;
        self.verifier.verify(signature, timestamp, body)?;
        Ok(())
    }
}
