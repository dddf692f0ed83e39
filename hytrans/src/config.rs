//! Translation settings, optionally loaded from a TOML file.
//!
//! ```toml
//! prime_suffix = "'"
//! frame_var_prefix = "__arg_"
//! old_index = 0
//! new_index = 1
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TransError, TransResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Appended to a mutable symbol to name its post-state copy.
    pub prime_suffix: String,

    /// Prefix of the variables quantified in frame axioms, followed by the
    /// argument position.
    pub frame_var_prefix: String,

    /// Trace index encoded as the pre-state of a two-state model.
    pub old_index: usize,

    /// Trace index encoded as the post-state of a two-state model.
    pub new_index: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            prime_suffix: "'".to_string(),
            frame_var_prefix: "__arg_".to_string(),
            old_index: 0,
            new_index: 1,
        }
    }
}

impl TranslationConfig {
    pub fn validate(&self) -> TransResult<()> {
        if self.prime_suffix.is_empty() {
            return Err(TransError::InvalidConfig(
                "`prime_suffix` must not be empty".to_string(),
            ));
        }
        if self.frame_var_prefix.is_empty() {
            return Err(TransError::InvalidConfig(
                "`frame_var_prefix` must not be empty".to_string(),
            ));
        }
        if self.old_index == self.new_index {
            return Err(TransError::InvalidConfig(format!(
                "`old_index` and `new_index` are both {}",
                self.old_index
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text. Missing keys take
    /// their default value.
    pub fn from_toml_str(toml_str: &str) -> TransResult<Self> {
        Self::parse(toml_str, "<inline>")
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> TransResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;
        Self::parse(&toml_str, &path.display().to_string())
    }

    /// `file` names the source of `toml_str` in parse errors.
    fn parse(toml_str: &str, file: &str) -> TransResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| TransError::ConfigParseError {
            source: e,
            file: file.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save this configuration to a TOML file.
    pub fn save_to_toml(&self, path: &Path) -> TransResult<()> {
        let toml_str = toml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = TranslationConfig::from_toml_str("prime_suffix = \"_post\"").unwrap();
        assert_eq!(config.prime_suffix, "_post");
        assert_eq!(config.frame_var_prefix, "__arg_");
        assert_eq!((config.old_index, config.new_index), (0, 1));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(
            TranslationConfig::from_toml_str("prime_suffix = \"\"")
                .unwrap_err()
                .is_invalid_config()
        );
        assert!(
            TranslationConfig::from_toml_str("old_index = 1")
                .unwrap_err()
                .is_invalid_config()
        );
        assert!(
            TranslationConfig::from_toml_str("old_index = \"zero\"")
                .unwrap_err()
                .is_config_parse_error()
        );
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("hytrans-config-{}", std::process::id()));
        let path = dir.join("translation.toml");
        let config = TranslationConfig {
            new_index: 4,
            ..Default::default()
        };
        config.save_to_toml(&path).unwrap();
        assert_eq!(TranslationConfig::load_from_toml(&path).unwrap(), config);
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = std::env::temp_dir().join(format!("hytrans-bad-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("translation.toml");
        std::fs::write(&path, "frame_var_prefix = \"x_\"\nold_index = \"zero\"\n").unwrap();

        let err = TranslationConfig::load_from_toml(&path).unwrap_err();
        let TransError::ConfigParseError { file, .. } = &err else {
            panic!("expected a parse error, got {}", err);
        };
        assert_eq!(file, &path.display().to_string());
        assert!(!err.to_string().contains("frame_var_prefix"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
