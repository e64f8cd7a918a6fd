#![deny(unused)]
//! Platform client for Ephemeral.
//!
//! This crate provides:
//! - OAuth 1.0a request signing
//! - A `reqwest` based `PlatformClient` for the platform's REST API

pub mod client;
pub mod oauth;

pub use client::{TwitterClient, REQUEST_TIMEOUT};
pub use oauth::OAuthSigner;
