//! Filesystem change watching.
//!
//! The source forwards raw `notify` events; the translation loop turns them
//! into notifications and hands them to the dispatcher.

mod event_loop;
mod source;
mod translate;

pub use event_loop::EventTranslationLoop;
pub use source::{FsEventSource, RawEvent, path_exists};
pub use translate::{EventTranslator, classify, relative_path};
