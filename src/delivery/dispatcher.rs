//! Hands notifications to the registry for fan-out.

use super::Dispatch;
use crate::core::{CallbackRegistry, Notification};
use crate::error::Result;
use std::sync::Arc;
use tracing::info;

/// Logs each notification and triggers delivery to its subscribers.
///
/// No batching and no retries. Recipients of one notification are delivered
/// to concurrently and in no particular order.
#[derive(Clone)]
pub struct NotificationDispatcher {
    registry: Arc<CallbackRegistry>,
}

impl NotificationDispatcher {
    /// Create a dispatcher over a shared registry.
    pub fn new(registry: Arc<CallbackRegistry>) -> Self {
        Self { registry }
    }

    /// The registry notifications are dispatched through.
    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    /// Log `notification` and trigger delivery for its path.
    ///
    /// # Errors
    ///
    /// Fails only if the notification cannot be encoded.
    pub async fn dispatch(&self, notification: &Notification) -> Result<Dispatch> {
        info!(
            event = %notification.kind(),
            path = %notification.path(),
            "{}\t{}",
            notification.kind(),
            notification.path()
        );
        self.registry.trigger(notification.path(), notification).await
    }
}
