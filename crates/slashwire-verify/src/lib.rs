//! Request authentication for slashwire.
//!
//! Discord signs every webhook delivery with Ed25519 over the concatenation
//! of the timestamp header and the raw request body, and carries the detached
//! signature in a second header. This crate checks that signature and nothing
//! else: no transport types, no JSON. Callers pass in the header values and
//! the exact body bytes they will later parse, so trust and content cannot
//! diverge.

pub mod request;
pub mod signature;

pub use request::{AuthError, RequestAuthenticator, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use signature::{SignatureVerifier, VerifyError};
