//! Turning raw `notify` events into notifications.

use crate::core::{ChangeKind, Notification};
use notify::event::{EventKind, ModifyKind};
use notify::Event;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

type KindPredicate = fn(&EventKind) -> bool;

/// Checked in order; the first predicate that holds picks the kind.
const KIND_PRIORITY: [(KindPredicate, ChangeKind); 5] = [
    (is_attrib, ChangeKind::Attrib),
    (is_create, ChangeKind::Create),
    (is_delete, ChangeKind::Delete),
    (is_modify, ChangeKind::Modify),
    (is_rename, ChangeKind::Rename),
];

fn is_attrib(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(ModifyKind::Metadata(_)))
}

fn is_create(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_))
}

fn is_delete(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Remove(_))
}

fn is_modify(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other)
    )
}

fn is_rename(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(ModifyKind::Name(_)))
}

/// Map a raw event kind to a [`ChangeKind`], falling back to `Unknown`.
pub fn classify(kind: &EventKind) -> ChangeKind {
    KIND_PRIORITY
        .iter()
        .find(|(predicate, _)| predicate(kind))
        .map(|(_, change)| *change)
        .unwrap_or(ChangeKind::Unknown)
}

/// `path` relative to `root`, without leading separators.
///
/// Paths outside the root are only stripped of leading separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .to_string_lossy()
        .trim_start_matches(['/', MAIN_SEPARATOR])
        .to_string()
}

/// Converts raw events observed under a watch root into notifications.
#[derive(Debug, Clone)]
pub struct EventTranslator {
    root: PathBuf,
}

impl EventTranslator {
    /// Create a translator for events under `root`.
    ///
    /// `root` should be in the same form the event source reports paths in,
    /// which for the filesystem source is canonical.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The watch root paths are made relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One notification per path carried by `event`, in order.
    ///
    /// Rename events may carry both the old and new name; each gets its own
    /// notification. Events without paths, and access events, produce nothing.
    pub fn translate(&self, event: &Event) -> Vec<Notification> {
        if matches!(event.kind, EventKind::Access(_)) {
            return Vec::new();
        }
        let kind = classify(&event.kind);
        event
            .paths
            .iter()
            .map(|path| Notification::new(relative_path(&self.root, path), kind))
            .collect()
    }
}
