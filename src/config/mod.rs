//! Configuration management.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`StoreConfig::db_path`].
pub const ENV_DB_PATH: &str = "INVENTORY_VAULT_DB_PATH";

/// Environment variable overriding [`StoreConfig::busy_timeout`], in milliseconds.
pub const ENV_BUSY_TIMEOUT_MS: &str = "INVENTORY_VAULT_BUSY_TIMEOUT_MS";

const DEFAULT_DB_FILE: &str = "inventories.sqlite3";
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_STATEMENT_CACHE_CAPACITY: usize = 16;

/// `SQLite` journal mode applied when the store opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JournalMode {
    /// Write-ahead logging.
    #[default]
    Wal,
    /// Rollback journal, deleted after each transaction.
    Delete,
}

impl JournalMode {
    /// Returns the pragma value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wal => "WAL",
            Self::Delete => "DELETE",
        }
    }

    /// Parses a journal mode name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] for anything but `wal` or
    /// `delete`.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "wal" => Ok(Self::Wal),
            "delete" => Ok(Self::Delete),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown journal_mode '{other}', expected 'wal' or 'delete'"
            ))),
        }
    }
}

/// Settings for an [`InventoryStore`](crate::InventoryStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// How long `SQLite` waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Journal mode.
    pub journal_mode: JournalMode,
    /// Use `synchronous = NORMAL` instead of `FULL`.
    pub synchronous_normal: bool,
    /// Capacity of the prepared statement cache. Never below the number of
    /// statements the store keeps prepared.
    pub statement_cache_capacity: usize,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub db_path: Option<String>,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: Option<u64>,
    /// Journal mode: "wal" or "delete".
    pub journal_mode: Option<String>,
    /// Whether to use `synchronous = NORMAL`.
    pub synchronous_normal: Option<bool>,
    /// Prepared statement cache capacity.
    pub statement_cache_capacity: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            journal_mode: JournalMode::default(),
            synchronous_normal: true,
            statement_cache_capacity: DEFAULT_STATEMENT_CACHE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] if the text is not valid TOML
    /// for [`ConfigFile`] or names an unknown journal mode.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| crate::Error::InvalidConfig(format!("cannot parse config: {e}")))?;

        Self::from_config_file(file)
    }

    /// Loads configuration from the default location.
    ///
    /// Reads `inventory-vault/config.toml` from the platform config directory
    /// and returns defaults when the file is missing or unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs
            .config_dir()
            .join("inventory-vault")
            .join("config.toml");
        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                },
            }
        }

        Self::default()
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Pass `|key| std::env::var(key).ok()` to read the process environment.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.is_empty()) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.busy_timeout = Duration::from_millis(ms),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring {ENV_BUSY_TIMEOUT_MS}");
                },
            }
        }
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Converts a `ConfigFile` to `StoreConfig`.
    fn from_config_file(file: ConfigFile) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(db_path) = file.db_path {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(ms) = file.busy_timeout_ms {
            config.busy_timeout = Duration::from_millis(ms);
        }
        if let Some(mode) = file.journal_mode {
            config.journal_mode = JournalMode::parse(&mode)?;
        }
        if let Some(v) = file.synchronous_normal {
            config.synchronous_normal = v;
        }
        if let Some(capacity) = file.statement_cache_capacity {
            config.statement_cache_capacity = capacity;
        }

        Ok(config)
    }
}

/// Returns the default database path.
///
/// `<data dir>/inventory-vault/inventories.sqlite3`, or a file in the current
/// directory when no home directory is known.
#[must_use]
pub fn default_db_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(DEFAULT_DB_FILE),
        |d| d.data_dir().join("inventory-vault").join(DEFAULT_DB_FILE),
    )
}
