//! Keyed-hash digests for request body integrity.
//!
//! Clients sign the raw request body with a shared HMAC-SHA256 secret and
//! send the hex digest alongside the request. The server recomputes the
//! digest and compares in constant time, so a request that reaches a handler
//! is known to come from a holder of the secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the HMAC-SHA256 digest of `message`, hex-encoded.
///
/// This is what a legitimate client puts in the integrity header.
pub fn compute_digest(secret: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    encode_hex(mac.finalize().into_bytes())
}

/// Verify a raw (already hex-decoded) digest against `message`.
///
/// The comparison runs in constant time regardless of where the digests
/// first differ.
pub fn verify_digest(secret: &[u8], message: &[u8], digest: &[u8]) -> bool {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    mac.verify_slice(digest).is_ok()
}

/// Encode bytes as a lowercase hex string.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string into bytes. Returns `None` on odd length or
/// non-hex characters.
pub fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
