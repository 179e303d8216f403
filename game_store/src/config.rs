//! Store configuration, loadable from TOML.
//!
//! ```toml
//! [resolver]
//! include_locked = true
//!
//! [validation]
//! require_documented = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::resolver::ResolverConfig;

/// Checks run when a game is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject world graphs with cycles or edges to unknown worlds.
    pub require_acyclic: bool,

    /// Reject levels that reference undocumented inventory items instead of
    /// only logging a warning.
    pub require_documented: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_acyclic: true,
            require_documented: false,
        }
    }
}

/// Top-level configuration of a build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub resolver: ResolverConfig,
    pub validation: ValidationConfig,
}

impl StoreConfig {
    /// Parse a configuration. Missing tables and keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.validation.require_acyclic);
        assert!(config.resolver.exercises_unlock_lemmas);
    }

    #[test]
    fn test_partial_config() {
        let config = StoreConfig::from_toml_str(
            r#"
            [resolver]
            include_locked = true

            [validation]
            require_documented = true
            "#,
        )
        .unwrap();

        assert!(config.resolver.include_locked);
        assert!(config.resolver.exercises_unlock_lemmas);
        assert!(config.validation.require_documented);
        assert!(config.validation.require_acyclic);
    }

    #[test]
    fn test_invalid_config() {
        let err = StoreConfig::from_toml_str("[resolver]\ninclude_locked = \"yes\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
