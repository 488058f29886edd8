//! Configuration file handling for inkwell.
//!
//! Looks for `.config/inkwell.styx` in the current directory or any parent directory.

pub use inkwell_config::Config;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Location of the config file relative to a project directory.
pub const CONFIG_FILE: &str = ".config/inkwell.styx";

/// Load configuration from `.config/inkwell.styx`, searching up the directory tree.
pub fn load() -> Result<(Config, PathBuf), ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    load_from(&cwd)
}

/// Load configuration starting from a specific directory.
pub fn load_from(start: &Path) -> Result<(Config, PathBuf), ConfigError> {
    load_from_dirs(start.ancestors())
}

/// Load configuration if a file exists, falling back to the defaults otherwise.
pub fn load_or_default(start: &Path) -> Result<Config, ConfigError> {
    or_default(load_from(start))
}

/// Load from the first of `dirs` that holds `.config/inkwell.styx`.
fn load_from_dirs<'a>(
    dirs: impl IntoIterator<Item = &'a Path>,
) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = find_config_file(dirs)?;
    let config = parse_file(&config_path)?;
    Ok((config, config_path))
}

fn or_default(loaded: Result<(Config, PathBuf), ConfigError>) -> Result<Config, ConfigError> {
    match loaded {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded inkwell config");
            Ok(config)
        }
        Err(ConfigError::NotFound) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

fn parse_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    facet_styx::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find `.config/inkwell.styx` in the first directory that has one.
fn find_config_file<'a>(
    dirs: impl IntoIterator<Item = &'a Path>,
) -> Result<PathBuf, ConfigError> {
    dirs.into_iter()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.exists())
        .ok_or(ConfigError::NotFound)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.config/inkwell.styx` found in any parent directory
    #[error("no .config/inkwell.styx found in current directory or any parent")]
    NotFound,

    /// I/O error reading the file
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Parse error in the Styx file
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
