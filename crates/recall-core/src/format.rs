//! Rendering of memory blocks and update summaries.
//!
//! Pure functions, no side effects. The formatted memory block is
//! appended verbatim to the conversation's system message by the
//! injector; the update summary becomes the single synthetic message
//! pushed back to the memory service after an exchange.

use recall_types::memory::MemoryBlock;

/// Maximum characters of the user message embedded in an update summary.
pub const USER_SUMMARY_LIMIT: usize = 500;

/// Maximum characters of the assistant response embedded in an update summary.
pub const ASSISTANT_SUMMARY_LIMIT: usize = 1000;

/// Render memory blocks into a text block for system-prompt injection.
///
/// Empty input yields an empty string (callers must then skip injection
/// entirely). Blocks with an empty value are skipped, not just emptied;
/// block order in the output matches input order.
pub fn format_memory(blocks: &[MemoryBlock]) -> String {
    if blocks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("\n\n--- Agent Memory Context ---\n");
    out.push_str(
        "The following is context from your persistent memory. Use it to maintain continuity:\n\n",
    );

    for block in blocks {
        if !block.value.is_empty() {
            out.push_str(&format!("[{}]\n{}\n\n", block.label, block.value));
        }
    }

    out.push_str("--- End Memory Context ---\n");
    out
}

/// Compose the synthetic summary message for a memory update.
///
/// The user message is truncated to [`USER_SUMMARY_LIMIT`] characters and
/// the assistant response to [`ASSISTANT_SUMMARY_LIMIT`], each with a
/// trailing ellipsis marker when truncated.
pub fn update_summary(user_message: &str, assistant_response: &str) -> String {
    format!(
        "[Memory Update] User asked: {}\n\nAssistant responded (summary): {}",
        truncate_chars(user_message, USER_SUMMARY_LIMIT),
        truncate_chars(assistant_response, ASSISTANT_SUMMARY_LIMIT),
    )
}

/// Truncate to at most `max_chars` characters, appending "..." when cut.
///
/// Counts chars rather than bytes so multi-byte text never splits a
/// code point.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}
