//! Core type definitions for Ephemeral.
//!
//! Broken down into the post data model and the per-invocation policy.

pub mod policy;
pub mod post;

pub use policy::*;
pub use post::*;
