mod config;

pub use config::{CanvasConfig, Config, LogConfig, RemindersConfig, StorageConfig};

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "UNIVREMINDER_HOME";

/// Returns `~/.univreminder/`, or `$UNIVREMINDER_HOME` when set, creating it if needed.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => dirs::home_dir()
            .ok_or_else(|| ConfigError::DataDir("could not determine home directory".into()))?
            .join(".univreminder"),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Replace `path` with `contents` via a sibling temp file and a rename, so
/// readers see either the old or the new file, never a partial one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}
