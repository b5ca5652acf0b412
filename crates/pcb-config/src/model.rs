use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_VAULT_DIR: &str = "Vault";

/// Stores user-configurable forecast defaults and vault location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_buffer_threshold")]
    pub buffer_threshold: f64,
    #[serde(default = "Config::default_max_injections")]
    pub max_injections: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom vault root. Defaults to `~/Documents/Vault`.
    pub vault_root: Option<PathBuf>,

    #[serde(default)]
    pub layout: VaultLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            buffer_threshold: Self::default_buffer_threshold(),
            max_injections: Self::default_max_injections(),
            vault_root: None,
            layout: VaultLayout::default(),
        }
    }
}

impl Config {
    pub fn default_buffer_threshold() -> f64 {
        100.0
    }

    pub fn default_max_injections() -> usize {
        500
    }

    pub const KEYS: [&'static str; 5] = [
        "locale",
        "currency",
        "buffer_threshold",
        "max_injections",
        "vault_root",
    ];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let value = value.trim();
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_ascii_uppercase(),
            "buffer_threshold" => {
                self.buffer_threshold = value
                    .parse::<f64>()
                    .ok()
                    .filter(|amount| amount.is_finite())
                    .ok_or_else(invalid)?;
            }
            "max_injections" => self.max_injections = value.parse().map_err(|_| invalid())?,
            "vault_root" if value.is_empty() => self.vault_root = None,
            "vault_root" => self.vault_root = Some(PathBuf::from(value)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn resolve_vault_root(&self) -> PathBuf {
        if let Some(path) = &self.vault_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(DEFAULT_VAULT_DIR)
    }
}

/// Folder of each record kind, relative to the vault root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VaultLayout {
    pub bills: PathBuf,
    pub debts: PathBuf,
    pub income: PathBuf,
    pub injectors: PathBuf,
    pub accounts: PathBuf,
    pub checking: PathBuf,
}

impl Default for VaultLayout {
    fn default() -> Self {
        let engine_room = Path::new("Engine Room");
        Self {
            bills: engine_room.join("Bills"),
            debts: engine_room.join("Debts"),
            income: engine_room.join("Income"),
            injectors: engine_room.join("Injectors"),
            accounts: engine_room.join("Accounts"),
            checking: engine_room.join("Checking"),
        }
    }
}
