//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distributions::Alphanumeric, Rng};
use secrecy::ExposeSecret;
use sha1::Sha1;

use ephemeral_core::config::Credentials;
use ephemeral_core::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// Everything except the RFC 3986 unreserved characters is escaped.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

/// Percent-encode a parameter name or value.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// Encode request parameters as a query string, in the given order.
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the signature base string for a request.
///
/// `url` must be the request URL without its query; `params` holds every
/// query/body parameter plus the `oauth_*` parameters except the signature.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&normalized)
    )
}

/// Sign a base string with the consumer and token secrets.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| Error::internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(base_string.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Produces `Authorization` headers for one set of credentials.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: Credentials,
}

impl OAuthSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Header for a request, with a fresh nonce and the current time.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp();

        self.authorization_header_with(method, url, params, &nonce, timestamp)
    }

    /// Header for a request with a caller-chosen nonce and timestamp.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let mut oauth_params = vec![
            (
                "oauth_consumer_key".to_string(),
                self.credentials.consumer_key.expose_secret().clone(),
            ),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            (
                "oauth_token".to_string(),
                self.credentials.access_token.expose_secret().clone(),
            ),
            ("oauth_version".to_string(), "1.0".to_string()),
        ];

        let mut all_params = params.to_vec();
        all_params.extend(oauth_params.iter().cloned());

        let base_string = signature_base_string(method, url, &all_params);
        let signature = sign(
            &base_string,
            self.credentials.consumer_secret.expose_secret(),
            self.credentials.access_token_secret.expose_secret(),
        )?;

        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", fields))
    }
}
