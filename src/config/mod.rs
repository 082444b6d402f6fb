use crate::core::summary::SortColumn;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_transitions_log")]
    pub transitions_log: String,
    /// Minutes before the end at which the reminder fires (0 = none).
    #[serde(default)]
    pub default_notify_before: i64,
    /// Minutes used by `start` when neither --duration nor --end is given.
    #[serde(default)]
    pub default_duration: Option<i64>,
    #[serde(default = "default_summary_sort")]
    pub summary_sort: SortColumn,
    #[serde(default = "default_summary_descending")]
    pub summary_descending: bool,
}

fn default_transitions_log() -> String {
    Config::config_dir()
        .join("pomolog.csv")
        .to_string_lossy()
        .to_string()
}

fn default_summary_sort() -> SortColumn {
    SortColumn::Start
}

fn default_summary_descending() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            transitions_log: default_transitions_log(),
            default_notify_before: 0,
            default_duration: None,
            summary_sort: default_summary_sort(),
            summary_descending: default_summary_descending(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("pomolog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".pomolog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pomolog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pomolog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.transitions_log = expand_tilde(&cfg.transitions_log)
            .to_string_lossy()
            .to_string();
        Ok(cfg)
    }

    /// Point the database at `custom`. The transitions file follows the
    /// database so that separate stores keep separate audit files.
    pub fn with_database(mut self, custom: &str) -> Self {
        let db = resolve_db_path(custom);
        self.transitions_log = db.with_extension("csv").to_string_lossy().to_string();
        self.database = db.to_string_lossy().to_string();
        self
    }

    pub fn transitions_path(&self) -> PathBuf {
        PathBuf::from(&self.transitions_log)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would have been, in
    /// test mode).
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let config = match custom_db {
            Some(name) => Self::default().with_database(name),
            None => Self::default(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        let db_path = PathBuf::from(&config.database);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}

/// Absolute paths and `~/...` are used as given; bare names land in the
/// configuration directory.
fn resolve_db_path(name: &str) -> PathBuf {
    let p = expand_tilde(name);
    if p.is_absolute() || p.parent().is_some_and(|d| !d.as_os_str().is_empty()) {
        p
    } else {
        Config::config_dir().join(p)
    }
}
