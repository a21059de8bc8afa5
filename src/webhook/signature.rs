use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Checks `signature` (base64 HMAC-SHA256 of `body` keyed by the channel
/// secret). The comparison is constant-time.
pub fn validate_signature(body: &[u8], channel_secret: &str, signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Platform-side signer: the `x-line-signature` value LINE sends for
/// `body`. Used to build signed deliveries for local testing.
pub fn sign(body: &[u8], channel_secret: &str) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"destination":"U1","events":[]}"#;

    #[test]
    fn accepts_own_signature() {
        let signature = sign(BODY, "channel-secret").unwrap();
        assert!(validate_signature(BODY, "channel-secret", &signature));
    }

    #[test]
    fn rejects_wrong_secret_or_tampered_body() {
        let signature = sign(BODY, "channel-secret").unwrap();
        assert!(!validate_signature(BODY, "other-secret", &signature));
        assert!(!validate_signature(br#"{"events":[]}"#, "channel-secret", &signature));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!validate_signature(BODY, "channel-secret", ""));
        assert!(!validate_signature(BODY, "channel-secret", "not base64!!"));
    }
}
