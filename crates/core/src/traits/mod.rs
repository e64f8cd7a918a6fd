//! Core traits for Ephemeral.
//!
//! - `platform`: the social platform capability set consumed by the engine

pub mod platform;

pub use platform::*;
