//! Partner code generation.
//!
//! # Invariants
//! - Codes are URL-safe base64 without padding.
//! - Each code carries [`PARTNER_CODE_BYTES`] bytes of OS randomness; the
//!   `users.partner_code` unique constraint rejects the improbable collision.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

pub const PARTNER_CODE_BYTES: usize = 8;

/// Returns a fresh partner code (11 characters for 8 random bytes).
pub fn generate_partner_code() -> String {
    let mut bytes = [0u8; PARTNER_CODE_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
