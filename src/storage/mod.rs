pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{Config, ConfigStorage, GeneralConfig, PlayerConfig, ThemeConfig, TomlConfigStorage};

const APP_DIR: &str = "reelcull";

/// Per-user directories for the log and config files
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// $XDG_DATA_HOME/reelcull (default: ~/.local/share/reelcull)
    pub data: PathBuf,
    /// $XDG_CONFIG_HOME/reelcull (default: ~/.config/reelcull)
    pub config: PathBuf,
}

impl AppDirs {
    pub fn log_file(&self) -> PathBuf {
        self.data.join("reelcull.log")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config.join("reelcull.toml")
    }
}

/// Resolve an XDG base directory, falling back to a path under $HOME
fn xdg_dir(var: &str, home: &Path, fallback: &str) -> PathBuf {
    match env::var_os(var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR),
        _ => home.join(fallback).join(APP_DIR),
    }
}

/// Resolve and create the data and config directories
pub fn ensure_directories() -> Result<AppDirs> {
    let home = PathBuf::from(env::var_os("HOME").context("HOME environment variable not set")?);

    let dirs = AppDirs {
        data: xdg_dir("XDG_DATA_HOME", &home, ".local/share"),
        config: xdg_dir("XDG_CONFIG_HOME", &home, ".config"),
    };

    for dir in [&dirs.data, &dirs.config] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))?;
    }

    log::debug!("Directories: {:?}", dirs);
    Ok(dirs)
}
