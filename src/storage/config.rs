use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Input poll timeout; also the tick at which a running player is checked
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Level for the session log file (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

/// External player invocation; the preview path is appended to `args`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_program")]
    pub program: String,

    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            program: default_player_program(),
            args: default_player_args(),
        }
    }
}

/// Color names for the review screen (anything ratatui's `Color` parser accepts)
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_normal_highlight")]
    pub normal_highlight: String,
    #[serde(default = "default_play_highlight")]
    pub play_highlight: String,
    #[serde(default = "default_marked")]
    pub marked: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            normal_highlight: default_normal_highlight(),
            play_highlight: default_play_highlight(),
            marked: default_marked(),
            title: default_title(),
            status: default_status(),
        }
    }
}

// Default value functions for serde
fn default_poll_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_player_program() -> String {
    "cvlc".to_string()
}

fn default_player_args() -> Vec<String> {
    vec!["--play-and-exit".to_string()]
}

fn default_normal_highlight() -> String {
    "blue".to_string()
}

fn default_play_highlight() -> String {
    "green".to_string()
}

fn default_marked() -> String {
    "red".to_string()
}

fn default_title() -> String {
    "cyan".to_string()
}

fn default_status() -> String {
    "white".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        use anyhow::Context;
        use std::fs;

        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: poll_interval_ms={}, player={}",
            config.general.poll_interval_ms,
            config.player.program
        );

        Ok(config)
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../reelcull.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.general.poll_interval_ms, 100);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.player.program, "cvlc");
        assert_eq!(config.player.args, vec!["--play-and-exit".to_string()]);
        assert_eq!(config.theme.marked, "red");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
        [player]
        program = "mpv"
        args = ["--really-quiet"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player.program, "mpv");
        assert_eq!(config.player.args, vec!["--really-quiet".to_string()]);
        assert_eq!(config.general.poll_interval_ms, 100);
        assert_eq!(config.theme.play_highlight, "green");
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../reelcull.toml.example")).unwrap();
        assert_eq!(config.player.program, "cvlc");
    }

    #[test]
    fn test_load_creates_default_file() {
        let tmp = TempDir::new().unwrap();
        let storage = TomlConfigStorage::new(tmp.path().join("conf/reelcull.toml"));

        let config = storage.load().unwrap();

        assert!(storage.path().exists());
        assert_eq!(config.general.poll_interval_ms, 100);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("reelcull.toml");
        std::fs::write(&path, "[general\npoll_interval_ms = ").unwrap();

        let err = TomlConfigStorage::new(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
