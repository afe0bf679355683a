// Mon Aug 24 2026

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub config_file: PathBuf,
    pub headers_root: PathBuf,
    pub scripts_root: PathBuf,
    pub script_extensions: Vec<String>,
    pub read_only: bool,
    /// Apply raw substitutions before construct processing instead of after.
    pub raw_before_constructs: bool,
    pub report_file: Option<PathBuf>,
    pub enable_progress_bars: bool,
    pub verbosity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from("delit.ini"),
            headers_root: PathBuf::from("."),
            scripts_root: PathBuf::from("."),
            script_extensions: vec!["ssl".to_string()],
            read_only: false,
            raw_before_constructs: false,
            report_file: None,
            enable_progress_bars: true,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = path;
        self
    }

    pub fn with_headers_root(mut self, path: PathBuf) -> Self {
        self.headers_root = path;
        self
    }

    pub fn with_scripts_root(mut self, path: PathBuf) -> Self {
        self.scripts_root = path;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.script_extensions.is_empty() {
            return Err("at least one script extension must be set".to_string());
        }
        if self.script_extensions.iter().any(|ext| ext.contains('.')) {
            return Err("script extensions must not contain dots".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_extensions() {
        let mut config = Config::default();
        config.script_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let mut config = Config::default();
        config.script_extensions = vec![".ssl".to_string()];
        assert!(config.validate().is_err());
    }
}
