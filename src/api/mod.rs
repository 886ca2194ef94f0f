//! HTTP surface: the callback control API and the static file responder.
//!
//! | Route              | Method     | Behavior                                  |
//! |--------------------|------------|-------------------------------------------|
//! | `/callbacks/<path>`| `GET`      | JSON array of callback URLs for `<path>`  |
//! | `/callbacks/<any>` | `POST`     | register `{"Path": .., "URL": ..}`        |
//! | `/callbacks/...`   | other      | `404`                                     |
//! | `/files/<path>`    | `GET/HEAD` | contents of `<watch-root>/<path>`         |

mod callbacks;

pub use callbacks::ControlApi;

use crate::core::CallbackRegistry;
use axum::Router;
use axum::routing::any;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router for the control API.
///
/// When `files_root` is set and the `static-files` feature is enabled, files
/// under it are served at `/files/`.
pub fn router(registry: Arc<CallbackRegistry>, files_root: Option<PathBuf>) -> Router {
    let api = ControlApi::new(registry);

    let router = Router::new()
        .route("/callbacks", any(callbacks::callbacks_root))
        .route("/callbacks/", any(callbacks::callbacks_root))
        .route("/callbacks/{*path}", any(callbacks::callbacks_at))
        .with_state(api);

    with_files(router, files_root).layer(TraceLayer::new_for_http())
}

#[cfg(feature = "static-files")]
fn with_files(router: Router, files_root: Option<PathBuf>) -> Router {
    use tower_http::services::ServeDir;

    match files_root {
        Some(root) => router.nest_service("/files", ServeDir::new(root)),
        None => router,
    }
}

#[cfg(not(feature = "static-files"))]
fn with_files(router: Router, files_root: Option<PathBuf>) -> Router {
    if let Some(root) = files_root {
        tracing::warn!(root = %root.display(), "static-files feature disabled, /files/ not mounted");
    }
    router
}
