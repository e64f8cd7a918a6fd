#![deny(unused)]
//! Core types, traits, and error definitions for Ephemeral.
//!
//! This crate provides the building blocks shared by the platform client and
//! the retention engine: the post data model, the `PlatformClient` seam,
//! configuration loading and the common error type.

pub mod config;
pub mod duration;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
