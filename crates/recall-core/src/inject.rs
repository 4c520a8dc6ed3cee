//! Memory injection into chat-completion request bodies.
//!
//! The injector fetches memory blocks under a hard time budget, formats
//! them, and merges the result into the conversation's system message.
//! Every failure path degrades to returning the original body unchanged;
//! injection must never block or fail the request it decorates.

use std::time::Duration;

use serde_json::Value;

use recall_types::chat::ROLE_SYSTEM;
use recall_types::error::MemoryError;

use crate::format::format_memory;
use crate::service::MemoryService;

/// Persona used when the request carries no system message of its own.
pub const DEFAULT_PERSONA: &str = "You are an AI assistant.";

/// Produce a possibly-modified request body with memory context merged in.
///
/// The fetch is bounded by `budget` (the configured query timeout);
/// dropping the returned future -- e.g. on client disconnect -- cancels
/// the fetch as well. On any error, timeout, empty memory, or malformed
/// envelope the original bytes come back untouched.
pub async fn inject_memory<S: MemoryService>(service: &S, budget: Duration, body: &[u8]) -> Vec<u8> {
    let blocks = match tokio::time::timeout(budget, service.fetch_memory()).await {
        Ok(Ok(blocks)) => blocks,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "memory query failed, continuing without memory");
            return body.to_vec();
        }
        Err(_) => {
            let err = MemoryError::Timeout(budget.as_millis() as u64);
            tracing::warn!(error = %err, "memory query timed out, continuing without memory");
            return body.to_vec();
        }
    };

    if blocks.is_empty() {
        return body.to_vec();
    }

    let memory_context = format_memory(&blocks);
    match merge_into_system_message(body, &memory_context) {
        Some(modified) => {
            tracing::debug!(blocks = blocks.len(), "injected memory blocks");
            modified
        }
        None => body.to_vec(),
    }
}

/// Merge formatted memory into the request's system message.
///
/// The first `"system"`-role message gets the memory appended to its
/// existing content; when none exists, a new system message with the
/// default persona is inserted at index 0 and every original message
/// shifts right. Nothing outside the `messages` field is altered.
/// Returns `None` when the envelope is not mutable as described.
fn merge_into_system_message(body: &[u8], memory_context: &str) -> Option<Vec<u8>> {
    let mut root: Value = serde_json::from_slice(body).ok()?;
    let messages = root.get_mut("messages")?.as_array_mut()?;

    let system = messages
        .iter_mut()
        .find(|msg| msg.get("role").and_then(Value::as_str) == Some(ROLE_SYSTEM));

    match system {
        Some(msg) => {
            let existing = msg
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let merged = format!("{existing}{memory_context}");
            msg["content"] = Value::String(merged);
        }
        None => {
            let persona = format!("{DEFAULT_PERSONA}{memory_context}");
            messages.insert(
                0,
                serde_json::json!({ "role": ROLE_SYSTEM, "content": persona }),
            );
        }
    }

    serde_json::to_vec(&root).ok()
}
