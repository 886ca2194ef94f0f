//! Handlers for registering and listing callbacks.

use crate::core::CallbackRegistry;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Request body for registering a callback.
#[derive(Debug, Deserialize)]
struct SetCallback {
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "URL")]
    url: String,
}

/// HTTP front for the callback registry.
///
/// Holds a shared reference to the registry and calls into it directly; it
/// keeps no state of its own.
#[derive(Clone)]
pub struct ControlApi {
    registry: Arc<CallbackRegistry>,
}

impl ControlApi {
    /// Create a control API over a shared registry.
    pub fn new(registry: Arc<CallbackRegistry>) -> Self {
        Self { registry }
    }

    /// The registry behind this API.
    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    /// Respond with the JSON array of callback URLs for `path`.
    pub async fn list(&self, path: &str) -> Response {
        Json(self.registry.get(path).await).into_response()
    }

    /// Register the callback described by a `{"Path", "URL"}` JSON body.
    ///
    /// An empty or malformed body is answered with a 500 and leaves the
    /// registry untouched.
    pub async fn register(&self, body: &[u8]) -> Response {
        if body.is_empty() {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Body was empty.").into_response();
        }

        let request: SetCallback = match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "rejecting malformed callback registration");
                return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
            }
        };

        info!(path = %request.path, url = %request.url, "callback registered");
        self.registry.set(&request.path, request.url).await;
        StatusCode::OK.into_response()
    }

    /// Dispatch by method: GET lists, POST registers, anything else is 404.
    pub async fn route(&self, method: &Method, path: &str, body: &[u8]) -> Response {
        match *method {
            Method::GET => self.list(path).await,
            Method::POST => self.register(body).await,
            _ => not_found(),
        }
    }
}

pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found!").into_response()
}

pub(crate) async fn callbacks_root(
    State(api): State<ControlApi>,
    method: Method,
    body: Bytes,
) -> Response {
    api.route(&method, "", &body).await
}

pub(crate) async fn callbacks_at(
    State(api): State<ControlApi>,
    method: Method,
    Path(path): Path<String>,
    body: Bytes,
) -> Response {
    api.route(&method, &path, &body).await
}
