#![doc = include_str!("../README.md")]

use multilang_core::options::{self, MultiLangOptions};
use multilang_core::{OptionsError, PayloadFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

pub const CONFIG_FILE_NAME: &str = "multilang.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("multilang.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A detection pattern is not usable.
    #[error(transparent)]
    InvalidPattern(#[from] OptionsError),
    /// The default language is not a valid language identifier.
    #[error("Invalid default language '{name}'")]
    InvalidDefaultLanguage {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
}

/// Represents the `version` field in `multilang.toml`.
/// Supports both a string and an integer.
///
/// ```toml
/// version = "2024-06"
/// ```
///
/// ```toml
/// version = 3
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceVersion {
    Text(String),
    Number(i64),
}

impl Default for ResourceVersion {
    fn default() -> Self {
        ResourceVersion::Text(options::DEFAULT_VERSION.to_string())
    }
}

impl std::fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceVersion::Text(s) => f.write_str(s),
            ResourceVersion::Number(n) => write!(f, "{}", n),
        }
    }
}

/// The contents of `multilang.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiLangConfig {
    /// Language codes the application ships files for. Empty accepts any code.
    pub supported: Vec<String>,
    /// Base path or URL of the language files.
    pub path: String,
    /// Fallback code when detection yields nothing usable.
    pub default_lang: String,
    /// Cache-busting version appended to resource requests.
    pub version: ResourceVersion,
    pub lang_url_pattern: String,
    pub lang_ua_pattern: String,
    pub location_url_pattern: String,
    pub location_ua_pattern: String,
    /// Codes rendered right-to-left.
    pub rtl: Vec<String>,
    /// Either `"json"` or `"txt"`.
    pub format: PayloadFormat,
}

impl Default for MultiLangConfig {
    fn default() -> Self {
        Self {
            supported: Vec::new(),
            path: String::new(),
            default_lang: options::DEFAULT_LANG.to_string(),
            version: ResourceVersion::default(),
            lang_url_pattern: options::DEFAULT_LANG_URL_PATTERN.to_string(),
            lang_ua_pattern: options::DEFAULT_LANG_UA_PATTERN.to_string(),
            location_url_pattern: options::DEFAULT_LOCATION_URL_PATTERN.to_string(),
            location_ua_pattern: options::DEFAULT_LOCATION_UA_PATTERN.to_string(),
            rtl: options::DEFAULT_RTL.iter().map(|code| code.to_string()).collect(),
            format: PayloadFormat::default(),
        }
    }
}

impl MultiLangConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        tracing::debug!("Loaded multilang configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the configuration from the manifest directory.
    pub fn read_from_manifest_dir() -> Result<Self, ConfigError> {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| ConfigError::NotFound)?;
        Self::from_manifest_dir(Path::new(&manifest_dir))
    }

    /// Reads `multilang.toml` from the given manifest directory.
    pub fn from_manifest_dir(manifest_dir: &Path) -> Result<Self, ConfigError> {
        Self::read_from_path(manifest_dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the configured default language as a `LanguageIdentifier`.
    pub fn default_language_identifier(&self) -> Result<LanguageIdentifier, ConfigError> {
        self.default_lang
            .parse::<LanguageIdentifier>()
            .map_err(|source| ConfigError::InvalidDefaultLanguage {
                name: self.default_lang.clone(),
                source,
            })
    }

    /// Validates the configuration and converts it into loader options.
    ///
    /// Codes are lower-cased, matching the form detection produces.
    pub fn into_options(self) -> Result<MultiLangOptions, ConfigError> {
        self.default_language_identifier()?;

        let options = MultiLangOptions::default()
            .with_supported(&self.supported)
            .with_path(self.path)
            .with_default_lang(&self.default_lang)
            .with_version(&self.version)
            .with_rtl(&self.rtl)
            .with_format(self.format)
            .with_lang_url_pattern(&self.lang_url_pattern)?
            .with_lang_ua_pattern(&self.lang_ua_pattern)?
            .with_location_url_pattern(&self.location_url_pattern)?
            .with_location_ua_pattern(&self.location_ua_pattern)?;

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            temp_dir.path(),
            r#"
supported = ["ar", "vi", "th", "id"]
path = "./example/lang"
version = 1
"#,
        );

        let config = MultiLangConfig::read_from_path(&config_path).unwrap();

        assert_eq!(config.supported, vec!["ar", "vi", "th", "id"]);
        assert_eq!(config.path, "./example/lang");
        assert_eq!(config.version, ResourceVersion::Number(1));
        assert_eq!(config.default_lang, "en");
        assert_eq!(config.rtl, vec!["ar"]);
        assert_eq!(config.format, PayloadFormat::Json);
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let non_existent_path = Path::new("/non/existent/path/multilang.toml");
        let result = MultiLangConfig::read_from_path(non_existent_path);
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_read_from_path_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path(), "supported = [\"en\"\n");

        let result = MultiLangConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = MultiLangConfig::from_toml_str(r#"langs = ["en"]"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = MultiLangConfig::from_toml_str("").unwrap();
        assert_eq!(config, MultiLangConfig::default());
    }

    #[rstest]
    #[case::json(r#"format = "json""#, PayloadFormat::Json)]
    #[case::txt(r#"format = "txt""#, PayloadFormat::Text)]
    #[case::text_alias(r#"format = "text""#, PayloadFormat::Text)]
    fn test_format(#[case] source: &str, #[case] expected: PayloadFormat) {
        let config = MultiLangConfig::from_toml_str(source).unwrap();
        assert_eq!(config.format, expected);
    }

    #[rstest]
    #[case::text(r#"version = "2024-06""#, "2024-06")]
    #[case::number("version = 7", "7")]
    #[case::default("", "1")]
    fn test_version(#[case] source: &str, #[case] expected: &str) {
        let config = MultiLangConfig::from_toml_str(source).unwrap();
        assert_eq!(config.version.to_string(), expected);
    }

    #[test]
    fn test_into_options() {
        let config = MultiLangConfig::from_toml_str(
            r#"
supported = ["AR", "vi"]
path = "https://cdn.example.com/lang"
default_lang = "vi"
version = 3
rtl = ["ar", "ur"]
format = "txt"
lang_url_pattern = '\blanguage=([\w-]+)'
"#,
        )
        .unwrap();

        let options = config.into_options().unwrap();

        assert_eq!(options.supported, vec!["ar", "vi"]);
        assert!(options.supports("ar"));
        assert_eq!(options.path, "https://cdn.example.com/lang");
        assert_eq!(options.default_lang, "vi");
        assert_eq!(options.version, "3");
        assert!(options.is_rtl("ur"));
        assert_eq!(options.format, PayloadFormat::Text);
        assert_eq!(options.lang_url_pattern.as_str(), r"\blanguage=([\w-]+)");
    }

    #[test]
    fn test_into_options_rejects_bad_pattern() {
        let config = MultiLangConfig {
            location_ua_pattern: "location/(".to_string(),
            ..Default::default()
        };

        let result = config.into_options();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern(OptionsError::InvalidPattern {
                field: "location_ua_pattern",
                ..
            }))
        ));
    }

    #[test]
    fn test_default_language_identifier_invalid() {
        let config = MultiLangConfig {
            default_lang: "invalid-lang!".to_string(),
            ..Default::default()
        };

        let result = config.default_language_identifier();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDefaultLanguage { name, .. }) if name == "invalid-lang!"
        ));
        assert!(config.into_options().is_err());
    }

    #[test]
    fn test_from_manifest_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), r#"default_lang = "cn""#);

        let config = MultiLangConfig::from_manifest_dir(temp_dir.path()).unwrap();
        assert_eq!(config.default_lang, "cn");
    }

    #[test]
    #[serial]
    fn test_read_from_manifest_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), r#"supported = ["ja"]"#);

        let config = temp_env::with_var("CARGO_MANIFEST_DIR", Some(temp_dir.path()), || {
            MultiLangConfig::read_from_manifest_dir()
        })
        .unwrap();

        assert_eq!(config.supported, vec!["ja"]);
    }

    #[test]
    #[serial]
    fn test_read_from_manifest_dir_without_env() {
        let result = temp_env::with_var_unset("CARGO_MANIFEST_DIR", || {
            MultiLangConfig::read_from_manifest_dir()
        });
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }
}
