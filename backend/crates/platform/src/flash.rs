//! Flash notice encoding
//!
//! Pending notices travel between requests in a cookie as URL-safe base64
//! of their JSON list.

use kernel::notice::Notice;

use crate::crypto::{from_base64url, to_base64url};

/// Upper bound on notices kept in one cookie
pub const MAX_PENDING_NOTICES: usize = 16;

/// Upper bound on the token length; browsers drop cookies over 4096 bytes.
pub const MAX_TOKEN_BYTES: usize = 3800;

const TRUNCATION_MARK: char = '…';

/// Encode notices into a cookie-safe token.
///
/// Only the newest [`MAX_PENDING_NOTICES`] are kept, and older notices are
/// dropped until the token fits [`MAX_TOKEN_BYTES`]. A single notice too
/// long on its own has its text cut.
pub fn encode(notices: &[Notice]) -> String {
    let start = notices.len().saturating_sub(MAX_PENDING_NOTICES);
    let mut kept = &notices[start..];

    loop {
        let token = token_for(kept);
        if token.len() <= MAX_TOKEN_BYTES {
            return token;
        }
        match kept {
            [] => return token,
            [last] => return truncated_token(last),
            [_, rest @ ..] => kept = rest,
        }
    }
}

fn token_for(notices: &[Notice]) -> String {
    let json = serde_json::to_vec(notices).unwrap_or_else(|_| b"[]".to_vec());
    to_base64url(&json)
}

fn truncated_token(notice: &Notice) -> String {
    let mut chars: Vec<char> = notice.text.chars().collect();

    loop {
        let mut text: String = chars.iter().collect();
        text.push(TRUNCATION_MARK);
        let token = token_for(&[Notice::new(notice.level, text)]);
        if token.len() <= MAX_TOKEN_BYTES || chars.is_empty() {
            return token;
        }
        let excess = token.len() - MAX_TOKEN_BYTES;
        let drop = excess.div_ceil(8).clamp(1, chars.len());
        chars.truncate(chars.len() - drop);
    }
}

/// Decode a token produced by [`encode`].
///
/// Anything malformed decodes to no notices.
pub fn decode(token: &str) -> Vec<Notice> {
    from_base64url(token.trim())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::notice::NoticeLevel;

    #[test]
    fn test_encode_is_cookie_safe() {
        let token = encode(&[Notice::success("Offer 'Dev; ok=1' published!")]);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_decode_restores_order_and_levels() {
        let token = encode(&[Notice::warning("first"), Notice::info("second")]);
        let notices = decode(&token);
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[1].text, "second");
    }

    #[test]
    fn test_decode_garbage_is_empty() {
        assert!(decode("%%%").is_empty());
        assert!(decode(&to_base64url(b"{\"not\":\"a list\"}")).is_empty());
    }

    #[test]
    fn test_encode_caps_pending_notices() {
        let notices: Vec<Notice> = (0..40).map(|i| Notice::info(i.to_string())).collect();
        let decoded = decode(&encode(&notices));
        assert_eq!(decoded.len(), MAX_PENDING_NOTICES);
        assert_eq!(decoded.last().map(|n| n.text.as_str()), Some("39"));
    }

    #[test]
    fn test_encode_fits_cookie_with_long_multibyte_notices() {
        let title = "é".repeat(255);
        let notices: Vec<Notice> = (0..MAX_PENDING_NOTICES)
            .map(|i| Notice::success(format!("Offer '{title}' published! #{i}")))
            .collect();

        let token = encode(&notices);
        assert!(token.len() <= MAX_TOKEN_BYTES, "{}", token.len());

        let decoded = decode(&token);
        assert!(!decoded.is_empty());
        assert!(decoded.len() < MAX_PENDING_NOTICES);
        assert_eq!(decoded.last(), notices.last());
    }

    #[test]
    fn test_encode_truncates_single_oversized_notice() {
        let notice = Notice::error("日本".repeat(4000));

        let token = encode(std::slice::from_ref(&notice));
        assert!(token.len() <= MAX_TOKEN_BYTES, "{}", token.len());

        let decoded = decode(&token);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].level, NoticeLevel::Error);
        assert!(decoded[0].text.starts_with("日本日本"));
        assert!(decoded[0].text.ends_with(TRUNCATION_MARK));
    }
}
