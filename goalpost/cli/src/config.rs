use goalpost_core::Locale;
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = "goalpost";
const ENV_PREFIX: &str = "GOALPOST";

/// Settings layered from `goalpost.toml` and `GOALPOST_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Directory holding one JSON file per slot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub locale: Locale,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            locale: Locale::default(),
        }
    }
}

impl Config {
    /// Loads the optional config file from the working directory, then
    /// applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize_from_toml() {
        // Arrange
        let toml_str = r#"
            data_dir = "/var/lib/goalpost"
            locale = "ja"
        "#;

        // Act
        let config: Config = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/goalpost"));
        assert_eq!(config.locale, Locale::Ja);
    }

    #[test]
    fn test_config_defaults_when_empty() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_config_accepts_language_tag() {
        let config: Config = toml::from_str(r#"locale = "ja-JP""#).unwrap();

        assert_eq!(config.locale, Locale::Ja);
    }

    #[test]
    fn test_config_rejects_unknown_locale() {
        let result = toml::from_str::<Config>(r#"locale = "fr""#);

        assert!(result.is_err());
    }
}
