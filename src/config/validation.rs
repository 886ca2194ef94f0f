//! Settings validation support.

use crate::error::InvalidSetting;

/// Trait for settings validation.
///
/// Checks that cannot be expressed by deserialization alone, such as whether
/// a configured directory exists, go here. [`SettingsBuilder::build`] calls it
/// before handing settings back.
///
/// [`SettingsBuilder::build`]: crate::config::SettingsBuilder::build
///
/// # Examples
///
/// ```rust
/// use fswatch_hooks::config::Validate;
/// use fswatch_hooks::error::InvalidSetting;
///
/// struct Limits {
///     max_subscribers: usize,
/// }
///
/// impl Validate for Limits {
///     fn validate(&self) -> Result<(), InvalidSetting> {
///         if self.max_subscribers == 0 {
///             return Err(InvalidSetting::new(
///                 "max_subscribers",
///                 "must be greater than 0",
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validate {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns the first setting found to be invalid.
    fn validate(&self) -> Result<(), InvalidSetting>;
}
