use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::duration::parse_duration;
use crate::error::{Error, Result};
use crate::types::{AllowList, PolicyDurations};

/// Default REST endpoint of the platform.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Settings as they arrive from the environment, before validation.
///
/// Keys are the lowercased environment variable names.
#[derive(Debug, Deserialize, Default)]
struct RawSettings {
    twitter_consumer_key: Option<String>,
    twitter_consumer_secret: Option<String>,
    twitter_access_token: Option<String>,
    twitter_access_token_secret: Option<String>,
    max_tweet_age: Option<String>,
    tweet_interaction_timeout: Option<String>,
    whitelist: Option<String>,
    twitter_api_base_url: Option<String>,
}

/// OAuth 1.0a credentials of the account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: Secret<String>,
    pub consumer_secret: Secret<String>,
    pub access_token: Secret<String>,
    pub access_token_secret: Secret<String>,
}

/// Validated, read-only settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub policy: PolicyDurations,
    pub allow_list: AllowList,
    pub api_base_url: String,
}

impl Settings {
    /// Load settings from an optional `ephemeral.toml` in the working
    /// directory, overridden by process environment variables.
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name("ephemeral").required(false))
            .add_source(Environment::default())
            .build()
            .map_err(|e| Error::config(e.to_string()))?;

        Self::from_config(cfg)
    }

    /// Load settings from a single environment source.
    pub fn from_environment(env: Environment) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(env)
            .build()
            .map_err(|e| Error::config(e.to_string()))?;

        Self::from_config(cfg)
    }

    fn from_config(cfg: Config) -> Result<Self> {
        let raw: RawSettings = cfg
            .try_deserialize()
            .map_err(|e| Error::config(e.to_string()))?;

        let credentials = Credentials {
            consumer_key: Secret::new(required(raw.twitter_consumer_key, "TWITTER_CONSUMER_KEY")?),
            consumer_secret: Secret::new(required(raw.twitter_consumer_secret, "TWITTER_CONSUMER_SECRET")?),
            access_token: Secret::new(required(raw.twitter_access_token, "TWITTER_ACCESS_TOKEN")?),
            access_token_secret: Secret::new(required(
                raw.twitter_access_token_secret,
                "TWITTER_ACCESS_TOKEN_SECRET",
            )?),
        };

        let policy = PolicyDurations::new(
            duration(required(raw.max_tweet_age, "MAX_TWEET_AGE")?, "MAX_TWEET_AGE")?,
            duration(
                required(raw.tweet_interaction_timeout, "TWEET_INTERACTION_TIMEOUT")?,
                "TWEET_INTERACTION_TIMEOUT",
            )?,
        );

        let allow_list = raw
            .whitelist
            .as_deref()
            .map(AllowList::parse)
            .unwrap_or_default();

        let api_base_url = raw
            .twitter_api_base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            credentials,
            policy,
            allow_list,
            api_base_url,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config(format!("Missing required environment variable {}", name))),
    }
}

fn duration(raw: String, name: &str) -> Result<chrono::TimeDelta> {
    let parsed = parse_duration(&raw).map_err(|e| Error::config(format!("{}: {}", name, e)))?;
    if parsed < chrono::TimeDelta::zero() {
        return Err(Error::config(format!("{}: duration must not be negative, got {:?}", name, raw)));
    }
    Ok(parsed)
}
