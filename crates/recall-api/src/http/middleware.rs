//! Memory interception middleware.
//!
//! Per request: filter by path, buffer and inject memory into the request
//! body, forward through a capture body, and after the response finishes
//! writing, push an exchange summary to the memory service from a
//! detached task. Every memory-subsystem failure degrades to pass-through;
//! the middleware never alters the status or body of the primary request
//! because of it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;

use recall_core::extract::{assistant_text, last_user_message};
use recall_core::inject::inject_memory;
use recall_core::service::MemoryService;
use recall_infra::config::load_from_env;
use recall_infra::letta::LettaClient;
use recall_types::config::MemoryConfig;

use super::capture::CaptureBody;

/// Requests whose path contains this marker are chat completions.
const CHAT_COMPLETIONS_MARKER: &str = "/chat/completions";

/// Budget for the detached post-response update task.
const UPDATE_TIMEOUT: Duration = Duration::from_secs(5);

/// State captured by the middleware closure: the long-lived service
/// client plus the immutable configuration. No process-global client;
/// substitute services plug in for tests.
pub struct MemoryState<S> {
    service: Arc<S>,
    config: MemoryConfig,
}

impl<S> Clone for MemoryState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            config: self.config.clone(),
        }
    }
}

impl<S: MemoryService> MemoryState<S> {
    pub fn new(service: S, config: MemoryConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

/// Attach the memory interception layer to a host router.
///
/// Returns the router unchanged when the configuration is inactive, so
/// hosts can call this unconditionally.
pub fn attach<S: MemoryService + 'static>(
    router: Router,
    service: S,
    config: MemoryConfig,
) -> Router {
    if !config.is_active() {
        tracing::info!("memory injection disabled (set LETTA_ENABLED=true to enable)");
        return router;
    }

    tracing::info!(
        server = %config.server_url,
        agent = %config.agent_id,
        "memory injection enabled"
    );

    let state = MemoryState::new(service, config);
    router.layer(axum::middleware::from_fn_with_state(
        state,
        memory_middleware::<S>,
    ))
}

/// Attach the layer using `LETTA_*` environment configuration and a
/// [`LettaClient`].
pub fn attach_from_env(router: Router) -> Router {
    let config = load_from_env();
    let client = LettaClient::new(config.clone());
    attach(router, client, config)
}

/// The interception middleware itself, generic over the memory service
/// so tests can substitute a stub. Compatible with
/// `axum::middleware::from_fn_with_state`.
pub async fn memory_middleware<S: MemoryService + 'static>(
    State(state): State<MemoryState<S>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.is_active() || !request.uri().path().contains(CHAT_COMPLETIONS_MARKER) {
        return next.run(request).await;
    }

    // The whole payload is needed for JSON mutation, so buffer it up front.
    let (parts, body) = request.into_parts();
    let original = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "failed to buffer request body, skipping memory injection");
            let request = Request::from_parts(parts, Body::empty());
            return next.run(request).await;
        }
    };

    let budget = Duration::from_millis(state.config.timeout_ms());
    let modified = inject_memory(state.service.as_ref(), budget, &original).await;
    // The user message comes from the original body, pre-injection.
    let user_message = last_user_message(&original);

    let content_length = modified.len();
    let mut request = Request::from_parts(parts, Body::from(modified));
    request
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

    let response = next.run(request).await;

    if user_message.is_empty() {
        return response;
    }

    let service = Arc::clone(&state.service);
    let (parts, body) = response.into_parts();
    let capture = CaptureBody::new(body, move |captured| {
        if captured.is_empty() {
            return;
        }
        spawn_update(service, user_message, captured);
    });

    Response::from_parts(parts, Body::new(capture))
}

/// Dispatch the post-response memory update as a detached task.
///
/// The task owns its lifetime: a 5-second timeout unrelated to the
/// original request's context, no join point, failures logged and never
/// retried. Best-effort delivery by design; concurrent updates are
/// neither queued nor deduplicated.
fn spawn_update<S: MemoryService + 'static>(
    service: Arc<S>,
    user_message: String,
    response_body: bytes::Bytes,
) {
    tokio::spawn(async move {
        let update = async {
            let assistant = assistant_text(&response_body);
            if assistant.is_empty() {
                // Streamed or non-standard response; nothing to summarize.
                return Ok(());
            }
            service.push_update(&user_message, &assistant).await
        };

        match tokio::time::timeout(UPDATE_TIMEOUT, update).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(error = %err, "memory update failed"),
            Err(_) => tracing::warn!(
                timeout_s = UPDATE_TIMEOUT.as_secs(),
                "memory update timed out"
            ),
        }
    });
}
