#![deny(unused)]
//! Retention engine for Ephemeral.
//!
//! This crate provides:
//! - Age, allow-list and interaction-recency filters
//! - The engine that scans the timeline and deletes eligible posts
//! - The per-run report and the fixed invocation response

pub mod engine;
pub mod filters;
pub mod report;
pub mod response;

pub use engine::{Decision, RetentionEngine, TIMELINE_WINDOW};
pub use filters::{AgeFilter, AllowListFilter, InteractionChecker};
pub use report::{RetentionReport, COMPLETION_MESSAGE};
pub use response::InvocationResponse;
