//! Business logic for the Recall memory interception layer.
//!
//! This crate is transport-free: it defines the [`service::MemoryService`]
//! trait that infrastructure implements, plus the pure pieces of the
//! pipeline -- formatting memory blocks for system-prompt injection,
//! pulling user/assistant text out of chat-completion envelopes, and
//! merging memory context into a request body.
//!
//! The concrete HTTP client lives in recall-infra; the axum middleware
//! that drives this pipeline lives in recall-api.

pub mod extract;
pub mod format;
pub mod inject;
pub mod service;
