//! MemoryService trait definition.
//!
//! This is the seam between the interception pipeline and the external
//! memory service. Uses native async fn in traits (RPITIT, Rust 2024
//! edition); the concrete implementation lives in recall-infra
//! (`LettaClient`), and tests substitute in-memory stubs.

use recall_types::error::MemoryError;
use recall_types::memory::MemoryBlock;

/// Client-side view of the external memory service.
///
/// Both operations are defined no-ops when the layer is inactive
/// (disabled, or no agent configured): `fetch_memory` returns an empty
/// vec and `push_update` returns `Ok(())`, without any network access.
pub trait MemoryService: Send + Sync {
    /// Retrieve the agent's memory blocks, in service order.
    fn fetch_memory(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryBlock>, MemoryError>> + Send;

    /// Push a summary of one user/assistant exchange back to the agent.
    ///
    /// Best-effort: callers log failures and never escalate them to the
    /// serving path.
    fn push_update(
        &self,
        user_message: &str,
        assistant_response: &str,
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;
}

impl<S: MemoryService> MemoryService for std::sync::Arc<S> {
    fn fetch_memory(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MemoryBlock>, MemoryError>> + Send {
        S::fetch_memory(self)
    }

    fn push_update(
        &self,
        user_message: &str,
        assistant_response: &str,
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send {
        S::push_update(self, user_message, assistant_response)
    }
}
