// src/slack/signature.rs
// Slack request signature verification (HMAC-SHA256, v0 scheme)

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Requests stamped further than this from our clock are replays or junk
const MAX_TIMESTAMP_SKEW_SECS: i64 = 60 * 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("request timestamp is not a number")]
    MalformedTimestamp,
    #[error("request timestamp outside the allowed window")]
    StaleTimestamp,
    #[error("signature header is not a v0 hex signature")]
    MalformedSignature,
    #[error("signature does not match the request body")]
    Mismatch,
}

/// Check a request against Slack's signing scheme: hex HMAC-SHA256 of
/// `v0:{timestamp}:{body}` under the signing secret, compared in constant
/// time. `now` is the verifier's clock as a unix timestamp.
pub fn verify(
    signing_secret: &str,
    timestamp: &str,
    signature: &str,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let stamped: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::MalformedTimestamp)?;
    // The header is attacker-controlled; an extreme stamp must read as
    // stale, not overflow the subtraction.
    if now.saturating_sub(stamped).saturating_abs() > MAX_TIMESTAMP_SKEW_SECS {
        return Err(SignatureError::StaleTimestamp);
    }

    let presented = signature
        .strip_prefix("v0=")
        .ok_or(SignatureError::MalformedSignature)?;
    let presented = hex::decode(presented).map_err(|_| SignatureError::MalformedSignature)?;

    let expected = compute(signing_secret, timestamp, body);
    if expected.ct_eq(presented.as_slice()).into() {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Produce the signed header value for a body; the counterpart to `verify`
pub fn sign(signing_secret: &str, timestamp: &str, body: &[u8]) -> String {
    format!("v0={}", hex::encode(compute(signing_secret, timestamp, body)))
}

fn compute(signing_secret: &str, timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(format!("v0:{}:", timestamp).as_bytes());
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const BODY: &[u8] = b"{\"type\":\"event_callback\"}";

    #[test]
    fn test_signed_request_verifies() {
        let now = 1_700_000_000;
        let timestamp = now.to_string();
        let signature = sign(SECRET, &timestamp, BODY);
        assert_eq!(verify(SECRET, &timestamp, &signature, BODY, now), Ok(()));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let now = 1_700_000_000;
        let timestamp = now.to_string();
        let signature = sign("some-other-secret", &timestamp, BODY);
        assert_eq!(
            verify(SECRET, &timestamp, &signature, BODY, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let now = 1_700_000_000;
        let timestamp = now.to_string();
        let signature = sign(SECRET, &timestamp, BODY);
        assert_eq!(
            verify(SECRET, &timestamp, &signature, b"{\"type\":\"tampered\"}", now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_stale_timestamp_is_rejected_before_any_hmac_check() {
        let now = 1_700_000_000;
        let stamped = (now - 301).to_string();
        let signature = sign(SECRET, &stamped, BODY);
        assert_eq!(
            verify(SECRET, &stamped, &signature, BODY, now),
            Err(SignatureError::StaleTimestamp)
        );
    }

    #[test]
    fn test_future_timestamp_is_rejected() {
        let now = 1_700_000_000;
        let stamped = (now + 301).to_string();
        let signature = sign(SECRET, &stamped, BODY);
        assert_eq!(
            verify(SECRET, &stamped, &signature, BODY, now),
            Err(SignatureError::StaleTimestamp)
        );
    }

    #[test]
    fn test_skew_inside_the_window_is_accepted() {
        let now = 1_700_000_000;
        let stamped = (now - 299).to_string();
        let signature = sign(SECRET, &stamped, BODY);
        assert_eq!(verify(SECRET, &stamped, &signature, BODY, now), Ok(()));
    }

    #[test]
    fn test_extreme_timestamps_are_rejected_as_stale() {
        let now = 1_700_000_000;
        assert_eq!(
            verify(SECRET, &i64::MIN.to_string(), "v0=00", BODY, now),
            Err(SignatureError::StaleTimestamp)
        );
        assert_eq!(
            verify(SECRET, &i64::MAX.to_string(), "v0=00", BODY, now),
            Err(SignatureError::StaleTimestamp)
        );
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        let now = 1_700_000_000;
        let timestamp = now.to_string();
        assert_eq!(
            verify(SECRET, "not-a-number", "v0=abcd", BODY, now),
            Err(SignatureError::MalformedTimestamp)
        );
        assert_eq!(
            verify(SECRET, &timestamp, "missing-version-prefix", BODY, now),
            Err(SignatureError::MalformedSignature)
        );
        assert_eq!(
            verify(SECRET, &timestamp, "v0=not-hex-at-all", BODY, now),
            Err(SignatureError::MalformedSignature)
        );
    }
}
