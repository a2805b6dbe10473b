//! Admin endpoint authentication.
//!
//! A static shared secret carried in the `X-Admin-Password` header stands in
//! for real authentication; the admin endpoint is semi-trusted.

use lambda_http::http::HeaderMap;
use subtle::ConstantTimeEq;

use crate::{Error, Result};

/// Header carrying the admin shared secret.
pub const PASSWORD_HEADER: &str = "x-admin-password";

/// Check the admin password header against the configured secret.
///
/// Header lookup is case-insensitive. The comparison is constant-time so the
/// response timing does not reveal how much of the secret matched.
pub fn authenticate(headers: &HeaderMap, expected: &str) -> Result<()> {
    let provided = headers
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(Error::Auth("Unauthorized - Invalid password".to_string()))
    }
}
