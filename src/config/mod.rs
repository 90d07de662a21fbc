use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::errors::{ExpenseError, Result};

const CONFIG_FILE: &str = "config.json";

/// Deployment settings for the assistant host. The core reads the allow-list
/// and storage location; the chat shell reads the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Currency unit word shown after amounts.
    pub currency_unit: String,
    /// Chat id of the shared channel receiving the weekly broadcast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_chat: Option<i64>,
    /// User ids allowed to talk to the assistant. Empty means open access.
    #[serde(default)]
    pub allowed_users: Vec<i64>,
    /// Greeting-name overrides keyed by user id.
    #[serde(default)]
    pub display_names: HashMap<i64, String>,
    /// Ledger file location. `None` falls back to the host's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_unit: "sum".into(),
            broadcast_chat: None,
            allowed_users: Vec::new(),
            display_names: HashMap::new(),
            storage_path: None,
        }
    }
}

impl Config {
    /// Whether `user` may use the assistant.
    pub fn allows(&self, user: UserId) -> bool {
        self.allowed_users.is_empty() || self.allowed_users.contains(&user.0)
    }

    /// Greeting-name override for `user`, when configured.
    pub fn display_name_for(&self, user: UserId) -> Option<&str> {
        self.display_names.get(&user.0).map(String::as_str)
    }
}

/// Loads and saves the config file under a base directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the platform config dir.
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| ExpenseError::Config("no config directory on this platform".into()))?;
        Self::with_base_dir(base.join("expense_core"))
    }

    /// Manager rooted at an explicit directory, for tests and containers.
    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| ExpenseError::Config(err.to_string()))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let data = serde_json::to_string_pretty(config)
            .map_err(|err| ExpenseError::Config(err.to_string()))?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
