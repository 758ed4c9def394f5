//! Server configuration loaded from environment variables.
//!
//! Every setting has a default so the server starts with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address for the gRPC server.
    /// Env: `PCBOOK_ADDR`
    /// Default: `0.0.0.0:8080`
    pub addr: SocketAddr,

    /// Folder where uploaded laptop images are written.
    /// Env: `PCBOOK_IMAGE_DIR`
    /// Default: `img`
    pub image_dir: PathBuf,

    /// Artificial per-laptop delay during searches, in milliseconds.
    /// Env: `PCBOOK_SCAN_DELAY_MS`
    /// Default: `0`
    pub scan_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: ([0, 0, 0, 0], 8080).into(),
            image_dir: PathBuf::from("img"),
            scan_delay: Duration::ZERO,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("PCBOOK_ADDR") {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.addr = parsed,
                Err(_) => {
                    tracing::warn!(value = %addr, "Invalid PCBOOK_ADDR, using default");
                }
            }
        }

        if let Some(dir) = lookup("PCBOOK_IMAGE_DIR") {
            config.image_dir = PathBuf::from(dir);
        }

        if let Some(delay) = lookup("PCBOOK_SCAN_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => config.scan_delay = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %delay, "Invalid PCBOOK_SCAN_DELAY_MS, using default");
                }
            }
        }

        config
    }
}
