//! AWS-oriented adapters and handlers for deferred completion notifications.
//!
//! This crate owns runtime integration details: the Lambda handlers for the
//! initiator and worker steps, the Step Functions and webhook adapters, and
//! environment configuration. Payload contracts and elapsed-time formatting
//! live in `notify_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
