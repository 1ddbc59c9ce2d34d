use crate::error::{AppError, Result};
use std::path::PathBuf;

pub const DEFAULT_IMPORT_DIR: &str = "imports";
pub const DEFAULT_ERROR_PREVIEW: usize = 10;

const APP_DIR: &str = "question-bank";
const DB_FILE: &str = "bank.db";
const LOG_FILE: &str = "import.log";

pub const ENV_IMPORT_DIR: &str = "QBANK_IMPORT_DIR";
pub const ENV_DB_PATH: &str = "QBANK_DB_PATH";
pub const ENV_LOG_PATH: &str = "QBANK_LOG_PATH";
pub const ENV_ERROR_PREVIEW: &str = "QBANK_ERROR_PREVIEW";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub import_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    /// How many row errors the summary screen lists.
    pub error_preview_limit: usize,
}

fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = get_data_dir();
        Self {
            import_dir: PathBuf::from(DEFAULT_IMPORT_DIR),
            db_path: data_dir.join(DB_FILE),
            log_path: data_dir.join(LOG_FILE),
            error_preview_limit: DEFAULT_ERROR_PREVIEW,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns for the
    /// `QBANK_*` keys. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(dir) = lookup(ENV_IMPORT_DIR) {
            config.import_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_LOG_PATH) {
            config.log_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_ERROR_PREVIEW) {
            config.error_preview_limit = raw.trim().parse::<usize>().map_err(|_| {
                AppError::Configuration {
                    message: format!(
                        "{} must be a non-negative integer, got {:?}",
                        ENV_ERROR_PREVIEW, raw
                    ),
                }
            })?;
        }

        Ok(config)
    }
}
