use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Session-key signatures for the identity API.
///
/// The platform proves session possession by HMAC-SHA256 over an empty
/// message keyed with the session key, so [`Signer::sign_session_key`] is
/// what request code calls.
pub struct Signer;

impl Signer {
    /// Hex-encoded HMAC-SHA256 of `message` under `key`.
    pub fn sign(message: &str, key: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(message.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        debug!(message_len = message.len(), signature_len = signature.len(), "Signer::sign");
        signature
    }

    pub fn sign_session_key(session_key: &str) -> String {
        Self::sign("", session_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_is_deterministic() {
        let first = Signer::sign("", "sk-1");
        let second = Signer::sign("", "sk-1");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_distinct_keys_give_distinct_signatures() {
        assert_ne!(Signer::sign("", "sk-1"), Signer::sign("", "sk-2"));
    }

    // RFC 4231 test case 2
    #[test]
    fn test_matches_known_vector() {
        assert_eq!(
            Signer::sign("what do ya want for nothing?", "Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_session_key_signature_signs_empty_message() {
        assert_eq!(Signer::sign_session_key("sk-1"), Signer::sign("", "sk-1"));
    }
}
