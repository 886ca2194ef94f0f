//! Filesystem event source backed by the `notify` crate.

use crate::error::{HookError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// A raw event, or an error the source hit while watching.
pub type RawEvent = notify::Result<Event>;

/// Whether `path` exists.
///
/// A missing path is `Ok(false)`; any other failure to stat it is an error.
pub fn path_exists(path: impl AsRef<Path>) -> Result<bool> {
    match std::fs::metadata(path.as_ref()) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Watches a directory and forwards raw events over a channel.
///
/// Access events (opens, reads, closes) are dropped here. Events stop once the source is dropped, which also closes the channel.
///
/// # Examples
///
/// ```rust,no_run
/// use fswatch_hooks::watch::FsEventSource;
///
/// # async fn example() -> fswatch_hooks::error::Result<()> {
/// let (source, mut events) = FsEventSource::new("/srv/watch", true)?;
///
/// while let Some(event) = events.recv().await {
///     println!("{:?} under {}", event, source.root().display());
/// }
/// # Ok(())
/// # }
/// ```
pub struct FsEventSource {
    _watcher: RecommendedWatcher,
    root: PathBuf,
    recursive: bool,
}

impl FsEventSource {
    /// Start watching `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to watch; must exist
    /// * `recursive` - Watch the whole subtree rather than only direct children
    ///
    /// # Returns
    ///
    /// Returns the source and the receiving end of its event channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing, is not a directory, cannot be
    /// resolved, or if the watcher cannot be created or attached.
    pub fn new(
        root: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<(Self, mpsc::UnboundedReceiver<RawEvent>)> {
        let root = root.as_ref();
        if !path_exists(root)? {
            return Err(HookError::WatchRootMissing(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(HookError::WatchRootNotDirectory(root.to_path_buf()));
        }

        // notify reports resolved paths, so strip against the resolved root
        let root = root.canonicalize()?;

        let (event_tx, event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let mut watcher = notify::recommended_watcher(move |res: RawEvent| {
            // Reads and closes are not changes
            if matches!(&res, Ok(event) if matches!(event.kind, EventKind::Access(_))) {
                return;
            }
            let _ = event_tx.send(res);
        })
        .map_err(|e| HookError::WatchError(format!("Failed to create file watcher: {}", e)))?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&root, mode)
            .map_err(|e| HookError::WatchError(format!("Failed to watch path: {}", e)))?;

        Ok((
            Self {
                _watcher: watcher,
                root,
                recursive,
            },
            event_rx,
        ))
    }

    /// The canonical watch root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether subdirectories are watched too.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }
}
