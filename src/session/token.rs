//! Client-side JWT inspection
//!
//! Only structure and expiry are checked here. Signatures are never verified;
//! the server stays the authority on every protected call.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Claims read from the token payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch; NumericDate may be fractional
    #[serde(default)]
    pub exp: Option<f64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp.filter(|exp| exp.is_finite())?;
        let secs = exp.floor();
        let nanos = ((exp - secs) * 1e9) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }
}

/// Decode base64url (URL-safe base64 without padding), also accepting the
/// standard alphabet.
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    let standard_b64 = input
        .trim_end_matches('=')
        .replace('-', "+")
        .replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Decode the payload segment of a `header.payload.signature` token.
///
/// Returns `None` when the token is not three segments or the payload is not
/// base64-encoded JSON.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let bytes = match base64_decode_url(parts[1]) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("Token payload is not base64: {}", e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::debug!("Token payload is not JSON: {}", e);
            None
        }
    }
}

/// Check a token against `now` (seconds since epoch).
///
/// A token without an `exp` claim is treated as valid.
pub fn is_token_valid_at(token: &str, now: i64) -> bool {
    match decode_claims(token) {
        None => false,
        Some(TokenClaims { exp: Some(exp) }) => exp > now as f64,
        Some(_) => true,
    }
}

#[cfg(test)]
pub(crate) fn make_token(payload: &serde_json::Value) -> String {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}
