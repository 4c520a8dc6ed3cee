//! Axum integration layer for Recall.
//!
//! Exposes the memory interception middleware (`http::middleware`) that a
//! host proxy attaches to its router, the response-capture body it relies
//! on, and a thin reverse proxy (`proxy`) used by the `recall-proxy`
//! binary as a stand-in host.

pub mod http;
pub mod proxy;

pub use http::middleware::{attach, attach_from_env, memory_middleware, MemoryState};
