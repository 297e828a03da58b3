//! HMAC-SHA256 frame signatures.
//!
//! The signed message is the plain concatenation
//! `client_id + decimal(timestamp) + json_body`, keyed by the UTF-8 bytes of
//! the shared secret. Signatures travel as lowercase hex (64 chars).

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded signature.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Build the canonical message that gets signed.
pub fn signing_input(client_id: &str, timestamp: u64, json_body: &str) -> String {
    let mut msg = String::with_capacity(client_id.len() + 20 + json_body.len());
    msg.push_str(client_id);
    msg.push_str(&timestamp.to_string());
    msg.push_str(json_body);
    msg
}

fn mac_for(secret: &str, message: &str) -> HmacSha256 {
    // Variable-size keys never fail; the zero-key fallback only satisfies the type.
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| <HmacSha256 as KeyInit>::new(&Default::default()));
    mac.update(message.as_bytes());
    mac
}

/// Sign `message` with `secret`, returning lowercase hex.
pub fn sign(secret: &str, message: &str) -> String {
    hex::encode(mac_for(secret, message).finalize().into_bytes())
}

/// Verify a hex signature (case-insensitive, constant-time compare).
pub fn verify(secret: &str, message: &str, candidate_hex: &str) -> bool {
    if candidate_hex.len() != SIGNATURE_HEX_LEN {
        return false;
    }
    let Ok(candidate) = hex::decode(candidate_hex) else {
        return false;
    };
    mac_for(secret, message).verify_slice(&candidate).is_ok()
}
