//! Thin reverse proxy standing in for the host chat-completion proxy.
//!
//! Forwards any method on any path to a single upstream base URL,
//! stripping hop-by-hop headers in both directions. This is deliberately
//! minimal: routing, authentication, and provider translation belong to
//! the real host, not to the memory layer. The `recall-proxy` binary
//! attaches the interception middleware on top of this router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;

/// Upstream HTTP client plus the base URL it forwards to.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Build a catch-all router that forwards every request upstream.
pub fn proxy_router(upstream: Arc<UpstreamClient>) -> Router {
    Router::new().fallback(forward).with_state(upstream)
}

async fn forward(
    State(upstream): State<Arc<UpstreamClient>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> axum::response::Response {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(uri.path());
    let url = format!("{}{}", upstream.base_url, path_and_query);

    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("failed to read request body: {err}"),
            )
                .into_response();
        }
    };

    let request = upstream
        .client
        .request(method, &url)
        .headers(filter_headers(&headers))
        .body(body_bytes);

    match request.send().await {
        Ok(response) => build_response(response).await,
        Err(err) => {
            tracing::warn!(error = %err, url = %url, "upstream request failed");
            (
                StatusCode::BAD_GATEWAY,
                format!("failed to reach upstream: {err}"),
            )
                .into_response()
        }
    }
}

async fn build_response(response: reqwest::Response) -> axum::response::Response {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            return (
                StatusCode::BAD_GATEWAY,
                format!("failed to read upstream response: {err}"),
            )
                .into_response();
        }
    };

    let mut builder = axum::response::Response::builder().status(status.as_u16());
    if let Some(header_map) = builder.headers_mut() {
        for (name, value) in headers.iter() {
            if is_hop_by_hop(name.as_str()) {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                axum::http::HeaderName::try_from(name.as_str()),
                axum::http::HeaderValue::from_bytes(value.as_bytes()),
            ) {
                header_map.append(name, value);
            }
        }
    }

    builder
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}

fn filter_headers(headers: &HeaderMap) -> reqwest::header::HeaderMap {
    let mut filtered = reqwest::header::HeaderMap::new();
    for (name, value) in headers.iter() {
        if is_hop_by_hop(name.as_str()) || name == axum::http::header::HOST {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            reqwest::header::HeaderName::try_from(name.as_str()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            filtered.append(name, value);
        }
    }
    filtered
}

fn is_hop_by_hop(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_headers_are_recognized() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("transfer-encoding"));
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop("authorization"));
    }

    #[test]
    fn filter_headers_drops_host_and_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("host", "proxy.local".parse().unwrap());
        headers.insert("connection", "keep-alive".parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("authorization", "Bearer token".parse().unwrap());

        let filtered = filter_headers(&headers);
        assert!(!filtered.contains_key("host"));
        assert!(!filtered.contains_key("connection"));
        assert_eq!(filtered.get("content-type").unwrap(), "application/json");
        assert_eq!(filtered.get("authorization").unwrap(), "Bearer token");
    }

    #[test]
    fn upstream_base_url_is_normalized() {
        let upstream = UpstreamClient::new("http://localhost:8080/".to_string());
        assert_eq!(upstream.base_url, "http://localhost:8080");
    }
}
