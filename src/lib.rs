//! # fswatch-hooks
//!
//! Watch a directory tree and POST a JSON notification to every webhook
//! registered for the path that changed.
//!
//! ## Overview
//!
//! - A [`CallbackRegistry`](core::CallbackRegistry) maps normalized paths to
//!   the callback URLs registered for them.
//! - A filesystem event source feeds a single translation loop, which turns
//!   each raw event into a [`Notification`](core::Notification) and hands it
//!   to the [`NotificationDispatcher`](delivery::NotificationDispatcher).
//! - Dispatch fans out one delivery task per callback URL. Deliveries are
//!   best-effort: failures are logged, never retried.
//! - A small HTTP control API registers and lists callbacks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fswatch_hooks::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> fswatch_hooks::error::Result<()> {
//! let registry = Arc::new(CallbackRegistry::new("/srv/watch"));
//! registry.set("reports/daily.csv", "http://example.test/hook").await;
//!
//! let dispatcher = NotificationDispatcher::new(Arc::clone(&registry));
//! let notification = Notification::new("reports/daily.csv", ChangeKind::Modify);
//!
//! // Returns once the deliveries are spawned
//! let dispatch = dispatcher.dispatch(&notification).await?;
//! assert_eq!(dispatch.recipients(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Wire format
//!
//! Each callback receives `POST <url>` with `Content-Type: application/json`:
//!
//! ```json
//! {"Path": "reports/daily.csv", "Event": "Modify"}
//! ```
//!
//! `Event` is one of `Attrib`, `Create`, `Delete`, `Modify`, `Rename`,
//! `Unknown`.
//!
//! ## Feature Flags
//!
//! - `file-watch` (default): the `notify`-backed event source, the
//!   translation loop and [`server::Server`].
//! - `static-files` (default): serve the watch root at `/files/`.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod core;
pub mod delivery;
pub mod error;

#[cfg(feature = "file-watch")]
pub mod server;

#[cfg(feature = "file-watch")]
pub mod watch;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::{Settings, SettingsBuilder};
    pub use crate::core::{CallbackRegistry, ChangeKind, Notification, PathMatcher};
    pub use crate::delivery::{Dispatch, NotificationDispatcher, WebhookClient};
    pub use crate::error::{HookError, Result};

    #[cfg(feature = "file-watch")]
    pub use crate::server::Server;
}
