//! Memory types for Recall.
//!
//! A memory block is a labeled unit of persistent context held by the
//! external memory service. Blocks are fetched fresh per injection
//! attempt and discarded after formatting; ordering as received from
//! the service is preserved.

use serde::{Deserialize, Serialize};

/// A single labeled memory block from the agent's core memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Block label, e.g. "persona" or "human".
    pub label: String,
    /// Block text content.
    pub value: String,
}

impl MemoryBlock {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_block_serde() {
        let block = MemoryBlock::new("persona", "Helpful assistant");
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"label":"persona","value":"Helpful assistant"}"#);
        let parsed: MemoryBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }
}
