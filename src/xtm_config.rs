// User configuration and on-disk locations
// Config is persisted as TOML under the platform config directory

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::xtm_board::Difficulty;
use crate::xtm_error::{AppError, Result};

const APP_NAME: &str = "xtmines";

/// User preferences, persisted to disk as TOML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,        // last selected preset
    pub language: String,              // "en" or "es"
    pub sound: bool,                   // terminal bell on game events
    pub ascii_icons: bool,             // ASCII fallback glyphs
    pub scores_file: Option<PathBuf>,  // overrides the default score table location
    pub log_level: String,             // tracing level for the log file
}

impl Default for Config {
    fn default() -> Self {
        // Pick the UI language from the system locale on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let language = if system_lang.to_lowercase().starts_with("es") {
            "es".to_string()
        } else {
            "en".to_string()
        };

        Config {
            difficulty: Difficulty::Easy,
            language,
            sound: true,
            ascii_icons: false,
            scores_file: None,
            log_level: "info".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "xhbl", APP_NAME)
}

/// Config file path, e.g. ~/.config/xtmines/xtmines.toml on Linux
/// Falls back to the current directory if no home directory is known
pub fn config_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        let mut path = proj.config_dir().to_path_buf();
        path.push(format!("{}.toml", APP_NAME));
        return Some(path);
    }
    let mut path = env::current_dir().ok()?;
    path.push(format!("{}.toml", APP_NAME));
    Some(path)
}

/// Directory for the score table and the log file
pub fn data_dir() -> Result<PathBuf> {
    if let Some(proj) = project_dirs() {
        return Ok(proj.data_dir().to_path_buf());
    }
    env::current_dir().map_err(|_| AppError::NoProjectDirs)
}

/// Where the score table lives for this config
pub fn scores_path(cfg: &Config) -> Result<PathBuf> {
    match &cfg.scores_file {
        Some(path) => Ok(path.clone()),
        None => Ok(data_dir()?.join("scores.csv")),
    }
}

pub fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    Ok(toml::from_str::<Config>(&s)?)
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }
    fs::write(path, s).map_err(|e| AppError::io(path, e))
}

/// Load the config, writing defaults on first run
pub fn load_or_create_config() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    if path.exists() {
        return read_config(&path);
    }
    let cfg = Config::default();
    write_config(&path, &cfg)?;
    Ok(cfg)
}

/// Persist the config; failures are logged and otherwise ignored
pub fn save_config(cfg: &Config) {
    if let Some(path) = config_path() {
        if let Err(e) = write_config(&path, cfg) {
            error!(error = %e, "failed to save config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_toml() {
        let mut path = env::temp_dir();
        path.push(format!("xtmines-test-{}-config", std::process::id()));
        path.push("xtmines.toml");

        let cfg = Config {
            difficulty: Difficulty::Hard,
            language: "es".to_string(),
            sound: false,
            ascii_icons: true,
            scores_file: Some(PathBuf::from("/tmp/somewhere.csv")),
            log_level: "debug".to_string(),
        };
        write_config(&path, &cfg).unwrap();
        assert_eq!(read_config(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = toml::from_str("difficulty = \"Medium\"\n").unwrap();
        assert_eq!(cfg.difficulty, Difficulty::Medium);
        assert!(cfg.sound);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.scores_file.is_none());
    }

    #[test]
    fn unknown_difficulty_is_a_parse_error() {
        assert!(toml::from_str::<Config>("difficulty = \"Nightmare\"\n").is_err());
    }

    #[test]
    fn explicit_scores_file_wins() {
        let cfg = Config {
            scores_file: Some(PathBuf::from("here.csv")),
            ..Config::default()
        };
        assert_eq!(scores_path(&cfg).unwrap(), PathBuf::from("here.csv"));
    }
}
