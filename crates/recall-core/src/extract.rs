//! Extraction of user and assistant text from chat-completion envelopes.
//!
//! Both functions are total: anything absent or malformed yields an empty
//! string rather than an error. The bodies are treated as opaque JSON;
//! only the documented paths are interpreted.

use serde_json::Value;

use recall_types::chat::ROLE_USER;

/// Content of the last `"user"`-role entry in the request's `messages`.
///
/// Returns an empty string when there is no user message, the `messages`
/// field is absent, or the body is not a JSON object.
pub fn last_user_message(body: &[u8]) -> String {
    let Ok(root) = serde_json::from_slice::<Value>(body) else {
        return String::new();
    };
    let Some(messages) = root.get("messages").and_then(Value::as_array) else {
        return String::new();
    };

    messages
        .iter()
        .rev()
        .find(|msg| msg.get("role").and_then(Value::as_str) == Some(ROLE_USER))
        .and_then(|msg| msg.get("content").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Primary assistant text of a non-streaming chat-completion response:
/// `choices[0].message.content`.
///
/// Streamed (event-stream) bodies are not JSON objects and yield an empty
/// string, which disables the memory update for that exchange. This layer
/// deliberately does not reconstruct assistant text from chunked frames.
pub fn assistant_text(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|root| {
            root.pointer("/choices/0/message/content")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default()
}
