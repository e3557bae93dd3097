use std::path::PathBuf;

use crate::embeddings::Diagnostics;

const DEFAULT_CONF_LEVEL: f64 = 0.95;
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub show_progress: bool,
    pub warn_malformed: bool,
    pub conf_level: f64,
    /// Directory of the daily log file; no file logging when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_progress: true,
            warn_malformed: true,
            conf_level: DEFAULT_CONF_LEVEL,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("RUST_LOG").unwrap_or(defaults.log_level);

        let show_progress = env_flag("WORDSIM_PROGRESS").unwrap_or(defaults.show_progress);
        let warn_malformed = env_flag("WORDSIM_WARN_MALFORMED").unwrap_or(defaults.warn_malformed);

        let conf_level = std::env::var("WORDSIM_CONF_LEVEL")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| *value > 0.0 && *value < 1.0)
            .unwrap_or(defaults.conf_level);

        let log_dir = file_log_dir(env_flag("ENABLE_FILE_LOGS"), std::env::var("LOG_DIR").ok());

        Self {
            log_level,
            show_progress,
            warn_malformed,
            conf_level,
            log_dir,
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            report_malformed: self.warn_malformed,
            show_progress: self.show_progress,
        }
    }
}

fn file_log_dir(enabled: Option<bool>, dir: Option<String>) -> Option<PathBuf> {
    if !enabled.unwrap_or(false) {
        return None;
    }
    Some(PathBuf::from(dir.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())))
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
