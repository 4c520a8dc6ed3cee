use thiserror::Error;

/// Errors from memory service operations.
///
/// Every variant is caught at its origin, logged, and converted to the
/// documented fallback (pass-through body, skipped update). None of them
/// is permitted to surface as a failure of the primary chat-completion
/// request; there are no fatal errors in this layer.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Network failure or timeout on a memory service call.
    #[error("transport error: {0}")]
    Transport(String),

    /// Memory service answered with a non-success status.
    #[error("memory service returned status {0}")]
    UpstreamStatus(u16),

    /// The fetch did not complete within the configured budget.
    #[error("memory query timed out after {0}ms")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_error_display() {
        let err = MemoryError::UpstreamStatus(503);
        assert_eq!(err.to_string(), "memory service returned status 503");

        let err = MemoryError::Timeout(300);
        assert_eq!(err.to_string(), "memory query timed out after 300ms");
    }
}
