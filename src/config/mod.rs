//! Settings loading and validation.

mod builder;
mod settings;
mod validation;

pub use builder::{DEFAULT_ENV_PREFIX, SettingsBuilder};
pub use settings::{DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_PORT, Settings};
pub use validation::Validate;
