// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Resolver configuration: alias table and rewrite strategy

use crate::address::Address;
use crate::error::ContractResult;
use crate::transpiler::RewriteStrategy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "DEPLOY_RESOLVER_CONFIG";

/// Errors raised while reading or writing configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub rewrite: RewriteStrategy,
    /// Import location -> address of a contract deployed outside the batch
    pub aliases: BTreeMap<String, String>,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, location: impl Into<String>, address: impl Into<String>) -> Self {
        self.aliases.insert(location.into(), address.into());
        self
    }

    pub fn with_rewrite(mut self, rewrite: RewriteStrategy) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path first, then `DEPLOY_RESOLVER_CONFIG`, then defaults
    pub fn resolve(explicit_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve_with_env(explicit_path, std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }

    fn resolve_with_env(explicit_path: Option<PathBuf>, env_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match explicit_path.or(env_path) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Alias table with addresses parsed
    pub fn aliases(&self) -> ContractResult<BTreeMap<String, Address>> {
        self.aliases
            .iter()
            .map(|(location, address)| Ok((location.clone(), address.parse::<Address>()?)))
            .collect::<ContractResult<BTreeMap<_, _>>>()
    }
}

impl From<HashMap<String, String>> for ResolverConfig {
    fn from(aliases: HashMap<String, String>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
            rewrite: RewriteStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContractError;

    #[test]
    fn test_parse_toml() {
        let config = ResolverConfig::from_toml_str(
            r#"
            rewrite = "first-occurrence"

            [aliases]
            "./FungibleToken.cdc" = "0xee82856bf20e2aa6"
            "#,
        )
        .unwrap();

        assert_eq!(config.rewrite, RewriteStrategy::FirstOccurrence);
        let aliases = config.aliases().unwrap();
        assert_eq!(aliases["./FungibleToken.cdc"].to_hex_literal(), "0xee82856bf20e2aa6");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ResolverConfig::from_toml_str("").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = ResolverConfig::from_toml_str("rewrite = \"everywhere\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_alias_address() {
        let config = ResolverConfig::new().with_alias("Foo", "0xnothex");
        let err = config.aliases().unwrap_err();
        assert!(matches!(err, ContractError::InvalidAddress { ref value, .. } if value == "0xnothex"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolver.toml");
        let config = ResolverConfig::new()
            .with_alias("Foo", "0x01")
            .with_rewrite(RewriteStrategy::FirstOccurrence);

        config.save_to_file(&path).unwrap();
        assert_eq!(ResolverConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResolverConfig::load_from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_resolve_order() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let env = dir.path().join("env.toml");
        ResolverConfig::new().with_alias("A", "0x01").save_to_file(&explicit).unwrap();
        ResolverConfig::new().with_alias("B", "0x02").save_to_file(&env).unwrap();

        let config = ResolverConfig::resolve_with_env(Some(explicit.clone()), Some(env.clone())).unwrap();
        assert!(config.aliases.contains_key("A"));

        let config = ResolverConfig::resolve_with_env(None, Some(env)).unwrap();
        assert!(config.aliases.contains_key("B"));

        assert_eq!(ResolverConfig::resolve_with_env(None, None).unwrap(), ResolverConfig::default());
    }
}
