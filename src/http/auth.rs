//! Credential checks: HTTP Basic auth for the web UI and API keys for
//! ingestion. Both are stateless and evaluated per request.

use crate::app::config::AuthConfig;
use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const BASIC_REALM: &str = r#"Basic realm="Restricted access""#;

type HmacSha256 = Hmac<Sha256>;

const UNKNOWN_USER_HASH: &str = concat!(
  "00000000000000000000000000000000:",
  "0000000000000000000000000000000000000000000000000000000000000000"
);

/// Username/password pair taken from an `Authorization: Basic` header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
  pub username: String,
  pub password: String,
}

impl BasicCredentials {
  /// Extract credentials. Anything malformed yields empty credentials.
  pub fn from_headers(headers: &HeaderMap) -> Self {
    headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(parse_basic)
      .unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.username.is_empty() || self.password.is_empty()
  }
}

fn parse_basic(value: &str) -> Option<BasicCredentials> {
  let encoded = value.strip_prefix("Basic ")?;
  let decoded = B64.decode(encoded.trim()).ok()?;
  let decoded = String::from_utf8(decoded).ok()?;
  let (username, password) = decoded.split_once(':')?;
  Some(BasicCredentials {
    username: username.trim().to_string(),
    password: password.trim().to_string(),
  })
}

/// Check the Basic credentials of a web request against the user map.
pub fn web_request_is_authorized(auth: &AuthConfig, headers: &HeaderMap) -> bool {
  let credentials = BasicCredentials::from_headers(headers);
  if credentials.is_empty() {
    return false;
  }
  credentials_are_valid(auth, &credentials.username, &credentials.password)
}

pub fn credentials_are_valid(auth: &AuthConfig, username: &str, password: &str) -> bool {
  match auth.users.get(username) {
    Some(hash) => verify_password(password, hash),
    None => {
      // unknown users still pay for one MAC
      let _ = verify_password(password, UNKNOWN_USER_HASH);
      false
    }
  }
}

/// Check the `X-API-Key` header of an API request.
pub fn api_request_is_authorized(auth: &AuthConfig, headers: &HeaderMap) -> bool {
  let key = headers
    .get(API_KEY_HEADER)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();
  if key.is_empty() {
    return false;
  }
  api_key_is_valid(auth, key)
}

pub fn api_key_is_valid(auth: &AuthConfig, key: &str) -> bool {
  auth.api_keys.iter().any(|k| k == key)
}

/// Hash a password as `<salt>:<hex hmac-sha256>` with a random salt. The
/// password is trimmed, as it is when read from a Basic header.
pub fn hash_password(password: &str) -> Result<String, InvalidLength> {
  let salt = Uuid::new_v4().simple().to_string();
  let mut mac = HmacSha256::new_from_slice(salt.as_bytes())?;
  mac.update(password.trim().as_bytes());
  Ok(format!("{salt}:{}", hex::encode(mac.finalize().into_bytes())))
}

/// Verify a password against a hash from [`hash_password`]. The digest
/// comparison is constant-time; malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
  let Some((salt, stored)) = hash.split_once(':') else {
    return false;
  };
  let Ok(stored) = hex::decode(stored) else {
    return false;
  };
  let Ok(mut mac) = HmacSha256::new_from_slice(salt.as_bytes()) else {
    return false;
  };
  mac.update(password.as_bytes());
  mac.verify_slice(&stored).is_ok()
}
