//! User configuration, read from `config.json` in the platform config dir.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::form::FormMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Form shown at startup. Login when unset.
    pub initial_mode: Option<FormMode>,
    /// Character limit for the bio field.
    pub bio_max_length: usize,
    /// Capture the mouse for select popovers.
    pub mouse: bool,
    pub fps: u32,
    pub log_file: Option<PathBuf>,
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_mode: None,
            bio_max_length: 500,
            mouse: true,
            fps: 60,
            log_file: None,
            log_filter: "authform=info".to_string(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/authform/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "authform", "authform")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// none is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.fps = config.fps.clamp(1, 120);
        Ok(config)
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.initial_mode = Some(mode);
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if cli.no_mouse {
            self.mouse = false;
        }
    }

    pub fn mode(&self) -> FormMode {
        self.initial_mode.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn scratch(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("authform-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mode(), FormMode::Login);
        assert_eq!(config.bio_max_length, 500);
        assert!(config.mouse);
        assert_eq!(config.fps, 60);
        assert_eq!(config.log_filter, "authform=info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("authform-no-such-dir/config.json");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = scratch(
            "partial.json",
            r#"{ "initial_mode": "forgot-password", "bio_max_length": 140 }"#,
        );
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.mode(), FormMode::ForgotPassword);
        assert_eq!(config.bio_max_length, 140);
        assert!(config.mouse);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn fps_is_clamped() {
        let path = scratch("fps.json", r#"{ "fps": 1000 }"#);
        assert_eq!(Config::load(Some(&path)).unwrap().fps, 120);
        let path = scratch("fps-zero.json", r#"{ "fps": 0 }"#);
        assert_eq!(Config::load(Some(&path)).unwrap().fps, 1);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = scratch("broken.json", "{ not json");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = Config {
            initial_mode: Some(FormMode::Register),
            ..Config::default()
        };
        let cli = Cli::try_parse_from([
            "authform",
            "--mode",
            "login",
            "--log-file",
            "/tmp/authform.log",
            "--no-mouse",
        ])
        .unwrap();
        config.apply_cli(&cli);
        assert_eq!(config.mode(), FormMode::Login);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/authform.log")));
        assert!(!config.mouse);
    }

    #[test]
    fn absent_cli_flags_keep_file_values() {
        let mut config = Config {
            initial_mode: Some(FormMode::Register),
            mouse: true,
            ..Config::default()
        };
        config.apply_cli(&Cli::try_parse_from(["authform"]).unwrap());
        assert_eq!(config.mode(), FormMode::Register);
        assert!(config.mouse);
    }
}
