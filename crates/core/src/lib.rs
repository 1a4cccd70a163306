//! CWA Weather Core Library
//!
//! Shared pieces for the fetcher and viewer binaries:
//! - Configuration discovery and loading (XDG-compliant)
//! - File system helpers
//! - Defaults both binaries agree on

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{ensure_parent_dir, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "cwa-weather";

/// Store file shared by the fetcher (writer) and the viewer (reader)
pub const DEFAULT_STORE_PATH: &str = "data.db";

/// Rainfall observation dataset from the CWA file API
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://opendata.cwa.gov.tw/fileapi/v1/opendataapi/O-A0002-001?downloadType=WEB&format=JSON";

/// Upper bound for the upstream request, in seconds
pub const DEFAULT_FETCH_TIMEOUT: u64 = 20;

/// Retries for transient transport failures before a fetch gives up
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default viewer port
pub const DEFAULT_VIEWER_PORT: u16 = 8501;
