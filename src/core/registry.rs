//! Callback registry: normalized path to ordered subscriber URLs.

use crate::core::{Notification, PathMatcher};
use crate::delivery::{Dispatch, WebhookClient};
use crate::error::Result;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Registry of callback URLs keyed by normalized path.
///
/// Writes take the lock exclusively, reads share it, so a reader sees either
/// all of an append or none of it. URLs are kept in registration order and
/// are neither validated nor deduplicated.
///
/// Looking up a path that has never been registered records an empty entry
/// for it. Repeated lookups of the same path reuse that entry.
///
/// The registry is built once at startup and shared through an `Arc` with
/// the control API and the event loop.
///
/// # Examples
///
/// ```rust,no_run
/// use fswatch_hooks::core::CallbackRegistry;
///
/// # async fn example() {
/// let registry = CallbackRegistry::new("/srv/watch");
/// registry.set("/foo", "http://example.test/hook").await;
///
/// let urls = registry.get("foo").await;
/// assert_eq!(urls, vec!["http://example.test/hook".to_string()]);
/// # }
/// ```
pub struct CallbackRegistry {
    matcher: PathMatcher,
    storage: RwLock<HashMap<String, Vec<String>>>,
    client: WebhookClient,
}

impl CallbackRegistry {
    /// Create a registry whose keys are normalized against `base`, delivering
    /// with a default [`WebhookClient`].
    pub fn new(base: impl AsRef<str>) -> Self {
        Self::with_client(base, WebhookClient::default())
    }

    /// Create a registry that delivers through the given client.
    pub fn with_client(base: impl AsRef<str>, client: WebhookClient) -> Self {
        Self::with_matcher(PathMatcher::new(base), client)
    }

    /// Create a registry keyed by an already configured matcher.
    pub fn with_matcher(matcher: PathMatcher, client: WebhookClient) -> Self {
        Self {
            matcher,
            storage: RwLock::new(HashMap::new()),
            client,
        }
    }

    /// The matcher used to build registry keys.
    pub fn matcher(&self) -> &PathMatcher {
        &self.matcher
    }

    /// Append `url` to the callbacks for `path`.
    ///
    /// Neither the path nor the URL is validated, so callbacks can be set for
    /// paths that do not exist yet.
    pub async fn set(&self, path: &str, url: impl Into<String>) {
        let key = self.matcher.normalize(path);
        let url = url.into();
        let mut storage = self.storage.write().await;
        debug!(path = %key, url = %url, "registering callback");
        storage.entry(key).or_default().push(url);
    }

    /// Snapshot of the callback URLs registered for `path`, in registration
    /// order. Unknown paths yield an empty list and are recorded as known.
    pub async fn get(&self, path: &str) -> Vec<String> {
        let key = self.matcher.normalize(path);
        {
            let storage = self.storage.read().await;
            if let Some(urls) = storage.get(&key) {
                return urls.clone();
            }
        }

        let mut storage = self.storage.write().await;
        storage.entry(key).or_default().clone()
    }

    /// Whether `path` has an entry, without creating one.
    pub async fn contains(&self, path: &str) -> bool {
        let key = self.matcher.normalize(path);
        self.storage.read().await.contains_key(&key)
    }

    /// Number of paths with an entry, empty or not.
    pub async fn path_count(&self) -> usize {
        self.storage.read().await.len()
    }

    /// POST `notification` as JSON to every callback registered for `path`.
    ///
    /// The body is encoded once and shared by all deliveries. Each delivery
    /// runs on its own task; this returns as soon as they are spawned. The
    /// returned [`Dispatch`] may be dropped without affecting delivery.
    ///
    /// # Errors
    ///
    /// Returns an error only if the notification cannot be encoded. Delivery
    /// failures are logged by the delivery task and never reported here.
    pub async fn trigger(&self, path: &str, notification: &Notification) -> Result<Dispatch> {
        let body = Bytes::from(notification.to_json()?);
        let key = self.matcher.normalize(path);
        let urls = self.get(&key).await;

        let handles = urls
            .into_iter()
            .map(|url| {
                let client = self.client.clone();
                let body = body.clone();
                let key = key.clone();
                tokio::spawn(async move { client.deliver(&key, &url, body).await })
            })
            .collect();

        Ok(Dispatch::new(key, handles))
    }
}
