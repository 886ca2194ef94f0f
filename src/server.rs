//! Wiring: event source, translation loop, registry and control API.

use crate::api;
use crate::config::{Settings, Validate};
use crate::core::{CallbackRegistry, PathMatcher};
use crate::delivery::{NotificationDispatcher, WebhookClient};
use crate::error::{HookError, Result};
use crate::watch::{EventTranslationLoop, EventTranslator, FsEventSource};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

/// A started server: the watch is running and the listener is bound.
///
/// Requests are not answered until [`Server::run`] is awaited.
///
/// # Examples
///
/// ```rust,no_run
/// use fswatch_hooks::config::Settings;
/// use fswatch_hooks::server::Server;
///
/// # async fn example() -> fswatch_hooks::error::Result<()> {
/// let server = Server::bind(Settings::new("/srv/watch")).await?;
/// println!("listening on {}", server.local_addr());
/// server.run().await?;
/// # Ok(())
/// # }
/// ```
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    registry: Arc<CallbackRegistry>,
    source: FsEventSource,
    event_loop: JoinHandle<()>,
}

impl Server {
    /// Validate `settings`, start watching and bind the listen address.
    ///
    /// # Errors
    ///
    /// Every error here is a startup failure: invalid settings, a missing or
    /// unwatchable root, an HTTP client that cannot be built, or an address
    /// that cannot be bound.
    pub async fn bind(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let client = match settings.delivery_timeout() {
            Some(timeout) => WebhookClient::builder().with_timeout(timeout),
            None => WebhookClient::builder().without_timeout(),
        }
        .build()?;

        let (source, events) = FsEventSource::new(&settings.watch_root, settings.recursive)?;
        let root = source.root().to_path_buf();

        let configured = std::path::absolute(&settings.watch_root)?;
        let matcher =
            PathMatcher::new(root.to_string_lossy()).with_alias(configured.to_string_lossy());
        let registry = Arc::new(CallbackRegistry::with_matcher(matcher, client));
        let dispatcher = NotificationDispatcher::new(Arc::clone(&registry));
        let event_loop =
            EventTranslationLoop::new(EventTranslator::new(&root), dispatcher).spawn(events);

        let files_root = settings.serve_files.then(|| root.clone());
        let router = api::router(Arc::clone(&registry), files_root);

        let addr = settings.listen_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| HookError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        info!(root = %root.display(), addr = %local_addr, "watching and listening");

        Ok(Self {
            listener,
            local_addr,
            router,
            registry,
            source,
            event_loop,
        })
    }

    /// The address actually bound, useful when the port was `0`.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The registry shared by the control API and the event loop.
    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    /// The canonical watch root.
    pub fn root(&self) -> &Path {
        self.source.root()
    }

    /// Serve the control API until the process is terminated.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP server stops on an IO error.
    pub async fn run(self) -> Result<()> {
        let Self {
            listener,
            router,
            source,
            event_loop,
            ..
        } = self;

        let served = axum::serve(listener, router).await;

        drop(source);
        event_loop.abort();
        served.map_err(HookError::IoError)
    }
}
