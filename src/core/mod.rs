//! Core types: path normalization, notifications and the callback registry.

mod notification;
mod path;
mod registry;

pub use notification::{ChangeKind, Notification};
pub use path::{PathMatcher, normalize};
pub use registry::CallbackRegistry;
