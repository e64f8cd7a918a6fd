//! REST client for the social platform.
//!
//! Implements `PlatformClient` over the v1.1 style endpoints. Requests are
//! signed with OAuth 1.0a and are never retried.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use ephemeral_core::config::{Credentials, Settings};
use ephemeral_core::{Error, Identity, PlatformClient, Post, PostId, Result, SearchResponse};

use crate::oauth::{encode_query, OAuthSigner};

/// Upper bound for a single platform request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error bodies longer than this are cut in error messages.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<PlatformErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct PlatformErrorDetail {
    code: Option<i64>,
    message: String,
}

/// Extract a readable message from an error response body.
fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|detail| match detail.code {
                Some(code) => format!("{} (code {})", detail.message, code),
                None => detail.message.clone(),
            })
            .collect();
        if !messages.is_empty() {
            return messages.join("; ");
        }
    }

    let mut end = body.len().min(MAX_ERROR_BODY);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

/// Platform client backed by `reqwest`.
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    signer: OAuthSigner,
}

impl TwitterClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `https://api.twitter.com/1.1`).
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL {:?}: {}", base_url, e)))?;
        if parsed.query().is_some() {
            return Err(Error::config(format!(
                "API base URL must not carry a query: {:?}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("ephemeral/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: OAuthSigner::new(credentials),
        })
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings.credentials.clone())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let authorization = self
            .signer
            .authorization_header(method.as_str(), &url, &params)?;

        let request_url = if params.is_empty() {
            url
        } else {
            format!("{}?{}", url, encode_query(&params))
        };

        tracing::debug!(method = %method, path = %path, "Platform request");

        let response = self
            .http
            .request(method, &request_url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Reading response from {} failed: {}", path, e)))?;

        if !status.is_success() {
            return Err(Error::platform(status.as_u16(), error_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PlatformClient for TwitterClient {
    async fn fetch_own_timeline(&self, count: u32, include_reposts: bool) -> Result<Vec<Post>> {
        self.send(
            Method::GET,
            "statuses/user_timeline.json",
            vec![
                ("count".to_string(), count.to_string()),
                ("include_rts".to_string(), include_reposts.to_string()),
            ],
        )
        .await
    }

    async fn fetch_own_identity(&self) -> Result<Identity> {
        self.send(Method::GET, "account/verify_credentials.json", Vec::new())
            .await
    }

    async fn search_posts(&self, query: &str, since_id: PostId, count: u32) -> Result<Vec<Post>> {
        let response: SearchResponse = self
            .send(
                Method::GET,
                "search/tweets.json",
                vec![
                    ("q".to_string(), query.to_string()),
                    ("since_id".to_string(), since_id.to_string()),
                    ("count".to_string(), count.to_string()),
                ],
            )
            .await?;
        Ok(response.statuses)
    }

    async fn delete_post(&self, id: PostId, trim_user: bool) -> Result<Post> {
        self.send(
            Method::POST,
            &format!("statuses/destroy/{}.json", id),
            vec![("trim_user".to_string(), trim_user.to_string())],
        )
        .await
    }
}
