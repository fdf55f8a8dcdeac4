//! Shared deferred-notification domain primitives.
//!
//! This crate owns the execution payload, acknowledgment and notification
//! contracts plus the elapsed-time arithmetic. It intentionally excludes AWS
//! SDK, HTTP client and Lambda runtime concerns.

pub mod contract;
pub mod elapsed;
pub mod message;
