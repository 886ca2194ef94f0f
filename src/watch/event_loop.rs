//! The loop that drains the event source and dispatches notifications.

use super::{EventTranslator, RawEvent};
use crate::delivery::NotificationDispatcher;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Single consumer of raw events.
///
/// Each event is translated, logged and dispatched in the order it was
/// received. Dispatch only spawns deliveries, so a slow subscriber never
/// holds up the next event. Errors reported by the source are logged and
/// skipped.
pub struct EventTranslationLoop {
    translator: EventTranslator,
    dispatcher: NotificationDispatcher,
}

impl EventTranslationLoop {
    /// Create a loop that translates with `translator` and dispatches through
    /// `dispatcher`.
    pub fn new(translator: EventTranslator, dispatcher: NotificationDispatcher) -> Self {
        Self {
            translator,
            dispatcher,
        }
    }

    /// Run on a background task until the event channel closes.
    pub fn spawn(self, events: mpsc::UnboundedReceiver<RawEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    /// Drain `events` until the sending side is dropped.
    pub async fn run(self, mut events: mpsc::UnboundedReceiver<RawEvent>) {
        info!(root = %self.translator.root().display(), "event loop started");

        while let Some(event) = events.recv().await {
            match event {
                Ok(event) => {
                    for notification in self.translator.translate(&event) {
                        if let Err(e) = self.dispatcher.dispatch(&notification).await {
                            error!(path = %notification.path(), error = %e, "failed to dispatch notification");
                        }
                    }
                }
                Err(e) => warn!(error = %e, "file watcher reported an error"),
            }
        }

        info!("event source closed, event loop stopped");
    }
}
