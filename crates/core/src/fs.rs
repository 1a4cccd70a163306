//! Filesystem utilities

use std::fs;
use std::path::Path;

use log::info;

/// Create the directory that will hold `file_path`, if it has one and it is missing.
pub fn ensure_parent_dir(file_path: &str) -> std::io::Result<()> {
    let Some(parent) = Path::new(file_path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }
    fs::create_dir_all(parent)?;
    info!("Created directory: {}", parent.display());
    Ok(())
}

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}
