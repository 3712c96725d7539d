use crate::error::{MaintrackError, Result};
use crate::logic::seeds::DEFAULT_PROFILE_CODE;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub garage: GarageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GarageConfig {
    /// Profile code bound to newly created vehicles
    #[serde(default = "default_profile_code")]
    pub default_profile: String,
}

fn default_profile_code() -> String {
    DEFAULT_PROFILE_CODE.to_string()
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            default_profile: default_profile_code(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub show_ok_items: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "VND".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ok_items: false,
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Load config from the override path or the standard locations.
    /// A missing file is not an error: defaults are used instead.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            if config_override.is_some() {
                return Err(MaintrackError::Config(format!(
                    "Config file not found at {:?}",
                    config_path
                )));
            }
            tracing::warn!(
                path = %config_path.display(),
                "No config file found, using defaults. Run `maintrack init` to create one."
            );
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| MaintrackError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| MaintrackError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Default path for writing new config files (~/.config/maintrack/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MaintrackError::Config("Cannot determine config directory".into()))?
            .join("maintrack");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up maintrack!");
        println!();

        let default_profile: String = Input::new()
            .with_prompt("  Default maintenance profile for new vehicles")
            .default(DEFAULT_PROFILE_CODE.into())
            .interact_text()
            .map_err(|e| MaintrackError::Config(format!("Input error: {}", e)))?;

        let show_ok_items = Confirm::new()
            .with_prompt("  List items that are still OK in status reports?")
            .default(false)
            .interact()
            .map_err(|e| MaintrackError::Config(format!("Input error: {}", e)))?;

        let currency: String = Input::new()
            .with_prompt("  Currency label for service costs")
            .default(default_currency())
            .interact_text()
            .map_err(|e| MaintrackError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            garage: GarageConfig {
                default_profile: default_profile.trim().to_uppercase(),
            },
            display: DisplayConfig {
                show_ok_items,
                currency,
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| MaintrackError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# maintrack configuration\n# Generated by `maintrack init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("MAINTRACK_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| MaintrackError::Config("Cannot determine data directory".into()))?
            .join("maintrack");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("maintrack.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.garage.default_profile, DEFAULT_PROFILE_CODE);
        assert!(!config.display.show_ok_items);
        assert_eq!(config.display.currency, "VND");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("display:\n  show_ok_items: true\n").unwrap();
        assert!(config.display.show_ok_items);
        assert_eq!(config.display.currency, "VND");
        assert_eq!(config.garage.default_profile, DEFAULT_PROFILE_CODE);
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("MAINTRACK_TEST_PROFILE", "GENERIC_SCOOTER_HCM");
        let config =
            Config::from_yaml("garage:\n  default_profile: ${MAINTRACK_TEST_PROFILE}\n").unwrap();
        assert_eq!(config.garage.default_profile, "GENERIC_SCOOTER_HCM");
    }

    #[test]
    fn unknown_env_var_is_left_in_place() {
        let out = Config::substitute_env_vars("currency: ${MAINTRACK_SURELY_UNSET_VAR}");
        assert_eq!(out, "currency: ${MAINTRACK_SURELY_UNSET_VAR}");
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = Config::from_yaml("garage: [unclosed").unwrap_err();
        assert!(matches!(err, MaintrackError::Config(_)));
    }
}
