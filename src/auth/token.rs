//! Unverified token inspection
//!
//! Reads the `exp` claim out of a compact JWS without checking its signature.
//! Trust in the token rests with the service that issued it; this is only
//! used to decide when to fetch a new one.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Claims this crate cares about
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch
    #[serde(default)]
    pub exp: Option<f64>,
}

/// Return the expiry timestamp embedded in `token`
pub fn token_expiry(token: &str) -> Result<DateTime<Utc>> {
    let claims = decode_claims(token)?;
    let exp = claims
        .exp
        .ok_or_else(|| Error::token_parse("token missing 'exp' claim"))?;

    // Fractional seconds are dropped.
    let secs = exp as i64;
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| Error::token_parse(format!("'exp' claim {exp} is out of range")))
}

/// Whether the token's expiry is strictly before now
pub fn is_token_expired(token: &str) -> Result<bool> {
    let expires_at = token_expiry(token)?;
    Ok(expires_at < Utc::now())
}

/// Split a compact JWS and decode its claims.
///
/// Any `alg` is accepted, including `none`; the header only has to be a JSON
/// object naming one.
fn decode_claims(token: &str) -> Result<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments[..] else {
        return Err(Error::token_parse(format!(
            "token contains {} segments, expected 3",
            segments.len()
        )));
    };

    let header: Map<String, Value> = serde_json::from_slice(&decode_segment("header", header)?)
        .map_err(|e| Error::token_parse(format!("invalid header: {e}")))?;
    if !header.get("alg").is_some_and(Value::is_string) {
        return Err(Error::token_parse("header missing 'alg'"));
    }

    decode_segment("signature", signature)?;

    let claims: Map<String, Value> = serde_json::from_slice(&decode_segment("payload", payload)?)
        .map_err(|e| Error::token_parse(format!("invalid claims: {e}")))?;

    serde_json::from_value(Value::Object(claims))
        .map_err(|e| Error::token_parse(format!("invalid 'exp' claim: {e}")))
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| Error::token_parse(format!("invalid base64 in {name}: {e}")))
}
