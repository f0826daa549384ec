//! Session tokens
//!
//! Cookie value `"<session uuid>.<base64url(HMAC-SHA256(secret, uuid))>"`.

use platform::crypto::{from_base64url, hmac_sign, hmac_verify, to_base64url};
use uuid::Uuid;

pub fn issue(secret: &[u8], session_id: Uuid) -> String {
    let id = session_id.to_string();
    let tag = hmac_sign(secret, id.as_bytes());
    format!("{}.{}", id, to_base64url(&tag))
}

/// Session ID from a token whose signature checks out
pub fn verify(secret: &[u8], token: &str) -> Option<Uuid> {
    let (id, signature) = token.split_once('.')?;
    let tag = from_base64url(signature).ok()?;

    if !hmac_verify(secret, id.as_bytes(), &tag) {
        return None;
    }

    id.parse().ok()
}
