//! Infrastructure implementations for Recall.
//!
//! Contains the concrete [`letta::LettaClient`] (reqwest-backed
//! implementation of `recall_core::service::MemoryService`) and the
//! environment-variable configuration loader.

pub mod config;
pub mod letta;
