//! Configuration loading for chess-perft.

use std::path::Path;

use anyhow::Context;
use chess_engine::fen::STARTPOS;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_fen")]
    pub fen: String,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default)]
    pub divide: bool,
}

fn default_fen() -> String {
    STARTPOS.to_string()
}

fn default_depth() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fen: default_fen(),
            depth: default_depth(),
            divide: false,
        }
    }
}

impl Config {
    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.depth, 3);
        assert_eq!(config.fen, STARTPOS);
    }

    #[test]
    fn partial_file_overrides_some_keys() {
        let config: Config = toml::from_str("depth = 5\ndivide = true\n").unwrap();
        assert_eq!(config.depth, 5);
        assert!(config.divide);
        assert_eq!(config.fen, STARTPOS);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(toml::from_str::<Config>("depth = \"deep\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_file(Path::new("does/not/exist.toml")).is_err());
    }
}
