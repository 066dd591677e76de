use crate::error::{GitcalError, Result};
use directories::BaseDirs;
use std::path::PathBuf;

/// Resolve `name` inside the current user's home directory.
pub fn home_file(name: &str) -> Result<PathBuf> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| GitcalError::Other("Cannot determine home directory".to_string()))?;
    Ok(dirs.home_dir().join(name))
}

pub fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect()
}
