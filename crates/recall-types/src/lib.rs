//! Shared domain types for Recall.
//!
//! This crate contains the core domain types used across the Recall memory
//! interception layer: configuration, memory blocks, chat messages, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod memory;
