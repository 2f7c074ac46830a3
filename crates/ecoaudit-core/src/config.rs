//! Ecosystem configuration and reference snapshots.
//!
//! Both files are TOML. Relative paths inside the ecosystem file resolve
//! against the directory that contains it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ecoaudit_canonical::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinator::AllowList;
use crate::daylight::DaylightState;
use crate::identity::ComponentIdentity;
use crate::reference::{ReferenceSet, ReferenceSets};
use crate::registry::{ComponentRegistry, RegistryError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading or writing a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// TOML parse error.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Daylight state file is not valid JSON.
    #[error("invalid state file: {0}")]
    State(#[from] serde_json::Error),
    /// A table key is not a component role.
    #[error("unknown component role '{0}'")]
    UnknownRole(String),
    /// Two keys of one snapshot table name the same role.
    #[error("role '{role}' appears more than once in [{table}]")]
    DuplicateRole {
        /// Table holding the duplicate keys.
        table: String,
        /// Role named twice.
        role: ComponentIdentity,
    },
    /// Registry addresses are inconsistent.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Canonical address of each component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Pool address.
    pub pool: Address,
    /// Bond address.
    pub bond: Address,
    /// Bank address.
    pub bank: Address,
    /// Policy address.
    pub policy: Address,
    /// Settlement address.
    pub settlement: Address,
    /// Adjustor address.
    pub adjustor: Address,
    /// Timer address.
    pub timer: Address,
    /// Trust address.
    pub trust: Address,
}

impl RegistryConfig {
    /// Builds the validated registry.
    pub fn to_registry(&self) -> Result<ComponentRegistry, RegistryError> {
        ComponentRegistry::new([
            self.pool.clone(),
            self.bond.clone(),
            self.bank.clone(),
            self.policy.clone(),
            self.settlement.clone(),
            self.adjustor.clone(),
            self.timer.clone(),
            self.trust.clone(),
        ])
    }
}

/// Daylight-saving settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaylightConfig {
    /// Season to start in when no state file exists.
    #[serde(default)]
    pub is_winter_time: bool,
    /// Where the current state is persisted.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Callers allowed to run transitions; defaults to the Trust address.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorized_callers: Vec<Address>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("daylight.json")
}

impl Default for DaylightConfig {
    fn default() -> Self {
        Self {
            is_winter_time: false,
            state_path: default_state_path(),
            authorized_callers: Vec::new(),
        }
    }
}

/// Pool audit journal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalConfig {
    /// Journal file.
    #[serde(default = "default_journal_path")]
    pub path: PathBuf,
    /// Fsync after each append.
    #[serde(default)]
    pub sync: bool,
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("pool-audit.ecj")
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
            sync: false,
        }
    }
}

/// Top-level ecosystem configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcosystemConfig {
    /// Canonical registry.
    pub registry: RegistryConfig,
    /// Daylight-saving settings.
    #[serde(default)]
    pub daylight: DaylightConfig,
    /// Audit journal settings.
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl EcosystemConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        let mut config = Self::from_toml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validated registry.
    pub fn registry(&self) -> Result<ComponentRegistry, ConfigError> {
        Ok(self.registry.to_registry()?)
    }

    /// Access policy for the coordinator.
    pub fn allow_list(&self, registry: &ComponentRegistry) -> AllowList {
        if self.daylight.authorized_callers.is_empty() {
            AllowList::trust_only(registry)
        } else {
            AllowList::new(self.daylight.authorized_callers.iter().cloned())
        }
    }

    /// Journal path resolved against the config directory.
    pub fn journal_path(&self) -> PathBuf {
        self.resolve(&self.journal.path)
    }

    /// State file path resolved against the config directory.
    pub fn state_path(&self) -> PathBuf {
        self.resolve(&self.daylight.state_path)
    }

    /// Current daylight state: the state file if present, else the configured season.
    pub fn load_state(&self) -> Result<DaylightState, ConfigError> {
        let path = self.state_path();
        if path.exists() {
            load_state(&path)
        } else {
            Ok(DaylightState::new(self.daylight.is_winter_time))
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Reads a persisted daylight state.
pub fn load_state(path: &Path) -> Result<DaylightState, ConfigError> {
    let content = read(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Persists a daylight state, replacing the file atomically.
pub fn save_state(path: &Path, state: &DaylightState) -> Result<(), ConfigError> {
    let json = serde_json::to_vec_pretty(state)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json).map_err(|source| ConfigError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reference sets as reported by each component, keyed by role name.
///
/// ```toml
/// [reporters.bond]
/// pool = "0x…"
/// bank = "0x…"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSnapshot {
    /// Reporter name → (role name → address).
    #[serde(default)]
    pub reporters: BTreeMap<String, BTreeMap<String, Address>>,
}

impl ReferenceSnapshot {
    /// Loads a snapshot from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&read(path)?)
    }

    /// Parses a snapshot from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Snapshot in which every component reports `registry` exactly.
    pub fn from_registry(registry: &ComponentRegistry) -> Self {
        let view: BTreeMap<String, Address> = registry
            .iter()
            .map(|(role, address)| (role.name().to_string(), address.clone()))
            .collect();
        Self {
            reporters: ComponentIdentity::ALL
                .into_iter()
                .map(|role| (role.name().to_string(), view.clone()))
                .collect(),
        }
    }

    /// Converts to typed reference sets.
    ///
    /// Role names are case-insensitive, so `Bank` and `bank` in one table
    /// (or `[reporters.Bond]` next to `[reporters.bond]`) are rejected
    /// rather than letting one silently replace the other.
    pub fn to_reference_sets(&self) -> Result<ReferenceSets, ConfigError> {
        let mut sets = ReferenceSets::new();
        for (reporter_name, entries) in &self.reporters {
            let reporter = parse_role(reporter_name)?;
            if sets.get(reporter).is_some() {
                return Err(ConfigError::DuplicateRole {
                    table: "reporters".to_string(),
                    role: reporter,
                });
            }
            let mut set = ReferenceSet::default();
            for (role_name, address) in entries {
                let role = parse_role(role_name)?;
                if set.get(role).is_some() {
                    return Err(ConfigError::DuplicateRole {
                        table: format!("reporters.{}", reporter_name),
                        role,
                    });
                }
                set.set(role, Some(address.clone()));
            }
            sets.insert(reporter, set);
        }
        Ok(sets)
    }
}

fn parse_role(name: &str) -> Result<ComponentIdentity, ConfigError> {
    name.parse()
        .map_err(|_| ConfigError::UnknownRole(name.to_string()))
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
