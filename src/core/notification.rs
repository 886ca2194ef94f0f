//! The record delivered to subscribers when a watched path changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of filesystem change carried by a [`Notification`].
///
/// Serialized by variant name, e.g. `"Modify"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Metadata (permissions, timestamps, ownership) changed.
    Attrib,
    /// A file or directory was created.
    Create,
    /// A file or directory was removed.
    Delete,
    /// File contents were written.
    Modify,
    /// A file or directory was renamed or moved.
    Rename,
    /// The source reported a change none of the other kinds describe.
    Unknown,
}

impl ChangeKind {
    /// Name used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attrib => "Attrib",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Modify => "Modify",
            Self::Rename => "Rename",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filesystem change, as posted to each callback URL.
///
/// Encodes as `{"Path": "<path>", "Event": "<kind>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "Event")]
    kind: ChangeKind,
}

impl Notification {
    /// Create a notification for `path`.
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Path of the change, relative to the watch root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind of the change.
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Encode the notification as its JSON delivery body.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
