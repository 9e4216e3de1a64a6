//! # Node Configuration
//!
//! Runtime parameters of one node: chain identity, file locations, the halt
//! height and the activation height of every upgrade.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults: every upgrade disabled (`HEIGHT_NEVER`)
//! 2. `<home>/config/app.toml`, `[base]` and `[upgrade]` tables
//! 3. `BK_*` environment variables
//!
//! Every node of a network must resolve the same upgrade heights, otherwise
//! replicas diverge at the first gated block.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_types::{BlockHeight, UpgradeName, HEIGHT_NEVER};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CHAIN_ID: &str = "barkis-chain";
pub const DEFAULT_HOME: &str = ".barkisd";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Upgrade {0} is configured at height 0; use a positive height or leave it unset")]
    ZeroUpgradeHeight(UpgradeName),

    #[error("Chain id must not be empty")]
    EmptyChainId,
}

/// Activation height of every upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeHeights {
    #[serde(rename = "TokenIssueHeight")]
    pub token_issue: BlockHeight,
    #[serde(rename = "UpdateTokenSymbolRulesHeight")]
    pub update_token_symbol_rules: BlockHeight,
    #[serde(rename = "TokenDesLenLimitUpgradeHeight")]
    pub token_des_len_limit: BlockHeight,
}

impl Default for UpgradeHeights {
    fn default() -> Self {
        Self {
            token_issue: HEIGHT_NEVER,
            update_token_symbol_rules: HEIGHT_NEVER,
            token_des_len_limit: HEIGHT_NEVER,
        }
    }
}

impl UpgradeHeights {
    /// Every upgrade active from `height` on.
    pub fn all_at(height: BlockHeight) -> Self {
        Self {
            token_issue: height,
            update_token_symbol_rules: height,
            token_des_len_limit: height,
        }
    }

    pub fn get(&self, name: UpgradeName) -> BlockHeight {
        match name {
            UpgradeName::TokenIssue => self.token_issue,
            UpgradeName::UpdateTokenSymbolRules => self.update_token_symbol_rules,
            UpgradeName::TokenDesLenLimit => self.token_des_len_limit,
        }
    }

    fn slot_mut(&mut self, name: UpgradeName) -> &mut BlockHeight {
        match name {
            UpgradeName::TokenIssue => &mut self.token_issue,
            UpgradeName::UpdateTokenSymbolRules => &mut self.update_token_symbol_rules,
            UpgradeName::TokenDesLenLimit => &mut self.token_des_len_limit,
        }
    }

    /// `(name, height)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (UpgradeName, BlockHeight)> + '_ {
        UpgradeName::ALL.iter().map(move |name| (*name, self.get(*name)))
    }
}

/// The `[base]` table of `app.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    pub chain_id: String,
    /// Stop after committing this height. `0` disables.
    pub halt_height: BlockHeight,
    /// Genesis document path. Relative paths resolve against the home dir.
    pub genesis_file: Option<PathBuf>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            halt_height: 0,
            genesis_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppToml {
    base: BaseConfig,
    upgrade: UpgradeHeights,
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub chain_id: String,
    pub home: PathBuf,
    pub genesis_file: PathBuf,
    pub halt_height: BlockHeight,
    pub upgrade: UpgradeHeights,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_home(DEFAULT_HOME)
    }
}

impl NodeConfig {
    /// Defaults rooted at `home`.
    pub fn for_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            genesis_file: default_genesis_path(&home),
            home,
            halt_height: 0,
            upgrade: UpgradeHeights::default(),
        }
    }

    /// `<home>/config/app.toml`.
    pub fn app_toml_path(home: &Path) -> PathBuf {
        home.join("config").join("app.toml")
    }

    /// Reads the `app.toml` under `home`. A missing file yields defaults.
    pub fn load(home: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let home = home.into();
        let path = Self::app_toml_path(&home);
        let mut config = Self::for_home(home);
        if !path.exists() {
            debug!(path = %path.display(), "No app.toml found, using defaults");
            return Ok(config);
        }

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed: AppToml = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        config.chain_id = parsed.base.chain_id;
        config.halt_height = parsed.base.halt_height;
        if let Some(genesis) = parsed.base.genesis_file {
            config.genesis_file = config.resolve(genesis);
        }
        config.upgrade = parsed.upgrade;
        info!(path = %path.display(), "Loaded app.toml");
        Ok(config)
    }

    /// Applies `BK_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup`. Split from
    /// [`NodeConfig::apply_env_overrides`] so tests need not mutate the
    /// process environment.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(chain_id) = lookup("BK_CHAIN_ID") {
            self.chain_id = chain_id;
        }
        if let Some(home) = lookup("BK_HOME") {
            self.home = PathBuf::from(home);
        }
        if let Some(genesis) = lookup("BK_GENESIS") {
            self.genesis_file = self.resolve(PathBuf::from(genesis));
        }
        if let Some(height) = parse_height(&lookup, "BK_HALT_HEIGHT")? {
            self.halt_height = height;
        }

        let upgrade_vars = [
            (UpgradeName::TokenIssue, "BK_TOKEN_ISSUE_HEIGHT"),
            (UpgradeName::UpdateTokenSymbolRules, "BK_UPDATE_TOKEN_SYMBOL_RULES_HEIGHT"),
            (UpgradeName::TokenDesLenLimit, "BK_TOKEN_DES_LEN_LIMIT_HEIGHT"),
        ];
        for (name, var) in upgrade_vars {
            if let Some(height) = parse_height(&lookup, var)? {
                *self.upgrade.slot_mut(name) = height;
            }
        }
        Ok(())
    }

    /// Rejects settings that would abort upgrade wiring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id.trim().is_empty() {
            return Err(ConfigError::EmptyChainId);
        }
        for (name, height) in self.upgrade.iter() {
            if height == 0 {
                return Err(ConfigError::ZeroUpgradeHeight(name));
            }
        }
        Ok(())
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.home.join(path)
        }
    }
}

fn default_genesis_path(home: &Path) -> PathBuf {
    home.join("config").join("genesis.json")
}

fn parse_height(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<BlockHeight>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}
