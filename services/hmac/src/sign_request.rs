use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::HeaderValue;
use log::debug;

use cerberus_sign_core::hash::hex_hmac_sha256;
use cerberus_sign_core::time::{format_unix_timestamp, now, DateTime};
use cerberus_sign_core::utils::Redact;
use cerberus_sign_core::Result;

use crate::constants::*;
use crate::Credential;

/// RequestSigner that implements Cerberus API HMAC authentication.
///
/// Every call to [`RequestSigner::sign`] takes a fresh timestamp and sets:
///
/// - `X-API-Key`: the api key
/// - `X-Timestamp`: seconds since the unix epoch
/// - `X-Signature`: `hex(HMAC-SHA256(api_secret, timestamp + api_key))`
///
/// Only the timestamp and the api key are signed. Method, path and body are
/// not covered by the signature; freshness of the timestamp is enforced by
/// the server.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The credential used by this signer.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign the request parts in place.
    ///
    /// `has_body` tells whether the request carries a non-empty body; only
    /// then is `Content-Type` defaulted to `application/json`. An existing
    /// `Content-Type` is never replaced.
    ///
    /// Fails with `RequestInvalid` only if the api key can't be used as an
    /// http header value.
    pub fn sign(&self, parts: &mut http::request::Parts, has_body: bool) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let timestamp = format_unix_timestamp(now);
        let signature = signature(&self.credential, &timestamp);

        debug!(
            "signing {} {} with api_key {:?} at {timestamp}",
            parts.method,
            parts.uri,
            Redact::from(&self.credential.api_key)
        );

        parts
            .headers
            .insert(X_API_KEY, HeaderValue::from_str(&self.credential.api_key)?);
        parts
            .headers
            .insert(X_TIMESTAMP, HeaderValue::from_str(&timestamp)?);
        parts.headers.insert(X_SIGNATURE, {
            let mut value: HeaderValue = signature.parse()?;
            value.set_sensitive(true);

            value
        });

        if has_body && !has_content_type(&parts.headers) {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        Ok(())
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Timestamp + ApiKey
/// ```
///
/// There is no separator between the two parts.
pub fn string_to_sign(timestamp: &str, api_key: &str) -> String {
    let mut s = String::with_capacity(timestamp.len() + api_key.len());
    s.push_str(timestamp);
    s.push_str(api_key);
    s
}

/// Calculate the lowercase hex signature for the given timestamp.
pub fn signature(cred: &Credential, timestamp: &str) -> String {
    let string_to_sign = string_to_sign(timestamp, &cred.api_key);
    hex_hmac_sha256(cred.api_secret.as_bytes(), string_to_sign.as_bytes())
}

/// A header with an empty value counts as unset.
fn has_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .is_some_and(|value| !value.is_empty())
}
