//! Process settings.

use super::Validate;
use crate::error::InvalidSetting;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Default port for the control API.
pub const DEFAULT_PORT: u16 = 8080;

/// Default delivery timeout, in seconds.
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 30;

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_delivery_timeout_secs() -> u64 {
    DEFAULT_DELIVERY_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

/// Everything the server needs to start.
///
/// Usually loaded through [`SettingsBuilder`](super::SettingsBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory whose subtree is watched. Required.
    pub watch_root: PathBuf,

    /// Port the control API listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the control API binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Upper bound on one outbound delivery, in seconds. `0` means no bound.
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,

    /// Watch subdirectories as well as the root itself.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Serve files under the watch root at `/files/`.
    #[serde(default = "default_true")]
    pub serve_files: bool,
}

impl Settings {
    /// Settings for `watch_root` with every other field at its default.
    pub fn new(watch_root: impl Into<PathBuf>) -> Self {
        Self {
            watch_root: watch_root.into(),
            port: default_port(),
            bind_address: default_bind_address(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
            recursive: true,
            serve_files: true,
        }
    }

    /// Address to bind the control API to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Delivery timeout, or `None` when deliveries are unbounded.
    pub fn delivery_timeout(&self) -> Option<Duration> {
        match self.delivery_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), InvalidSetting> {
        if self.watch_root.as_os_str().is_empty() {
            return Err(InvalidSetting::new("watch_root", "Path was not set."));
        }
        if !self.watch_root.exists() {
            return Err(InvalidSetting::new(
                "watch_root",
                format!("{} does not exist", self.watch_root.display()),
            ));
        }
        if !self.watch_root.is_dir() {
            return Err(InvalidSetting::new(
                "watch_root",
                format!("{} is not a directory", self.watch_root.display()),
            ));
        }
        Ok(())
    }
}
