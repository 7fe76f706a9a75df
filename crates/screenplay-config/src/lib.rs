//! User settings for the screenplay tools, stored as TOML under
//! `~/.config/screenplay-studio/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use screenplay_engine::LayoutConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/screenplay-studio";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {config_path}: {source}")]
    ConfigWriteError {
        config_path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid page setting {field} = {value}: {reason}")]
    InvalidPage {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// User settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where exports go when no explicit output path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Page geometry used for PDF and Word export.
    #[serde(default)]
    pub page: LayoutConfig,
}

impl Config {
    /// Read settings from `config_path`; a missing file is `Ok(None)`.
    ///
    /// `output_dir` has `~` and `$VAR` expanded, and the page geometry is
    /// checked with [`Config::validate`].
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        config.output_dir = config
            .output_dir
            .map(|dir| expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Write the settings as pretty TOML, creating parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let content = self.to_toml()?;
        let write = || -> io::Result<()> {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(config_path, content)
        };
        write().map_err(|source| ConfigError::ConfigWriteError {
            config_path: config_path.to_path_buf(),
            source,
        })
    }

    /// Write the default settings to `config_path`. An existing file is only
    /// replaced when `force` is set.
    pub fn init_at<P: AsRef<Path>>(config_path: P, force: bool) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        if config_path.exists() && !force {
            return Err(ConfigError::AlreadyExists(config_path.to_path_buf()));
        }
        let config = Config::default();
        config.save_to_path(config_path)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref()).join("config.toml")
    }

    /// Check that the page geometry leaves room for text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page;
        let invalid = |field: &'static str, value: f32, reason: &'static str| {
            ConfigError::InvalidPage {
                field,
                value,
                reason,
            }
        };

        for (field, value) in [
            ("page_width", page.page_width),
            ("page_height", page.page_height),
            ("line_height", page.line_height),
            ("font_size", page.font_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, value, "must be a positive number"));
            }
        }
        for (field, value) in [
            ("margin_left", page.margin_left),
            ("margin_right", page.margin_right),
            ("margin_top", page.margin_top),
            ("margin_bottom", page.margin_bottom),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, value, "must be zero or more"));
            }
        }

        if page.margin_left + page.margin_right >= page.page_width {
            return Err(invalid(
                "page_width",
                page.page_width,
                "leaves no room between the left and right margins",
            ));
        }
        if page.margin_top + page.margin_bottom >= page.page_height {
            return Err(invalid(
                "page_height",
                page.page_height,
                "leaves no room between the top and bottom margins",
            ));
        }
        Ok(())
    }
}

/// Expand `~` and environment variables; `None` when a variable is unset.
fn expand_path(path: &Path) -> Option<PathBuf> {
    shellexpand::full(&path.to_string_lossy())
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/screenplay-studio/config.toml"));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page.page_width, 8.5);
        assert_eq!(config.page.margin_left, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_page_table_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[page]
page_height = 11.75
font_size = 13.0
"#,
        )
        .unwrap();

        assert_eq!(config.page.page_height, 11.75);
        assert_eq!(config.page.font_size, 13.0);
        assert_eq!(config.page.margin_top, 1.0);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = expand_path(Path::new("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SCREENPLAY_TEST_VAR", "/test/env/path");
        }

        let expanded = expand_path(Path::new("$SCREENPLAY_TEST_VAR/subdir"));

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("SCREENPLAY_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_unset_var_fails() {
        assert_eq!(expand_path(Path::new("$SCREENPLAY_SURELY_UNSET_VAR/x")), None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = Config::load_from_path(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ConfigReadError { .. })));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[page\nmargin_left = ").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_margins_wider_than_page_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[page]\nmargin_left = 5.0\nmargin_right = 4.0\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPage {
                field: "page_width",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_sizes_are_rejected() {
        let config = Config {
            page: LayoutConfig {
                line_height: 0.0,
                ..LayoutConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPage {
                field: "line_height",
                ..
            })
        ));

        let config = Config {
            page: LayoutConfig {
                margin_top: f32::NAN,
                ..LayoutConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPage {
                field: "margin_top",
                ..
            })
        ));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            output_dir: Some(PathBuf::from("/tmp/scripts")),
            page: LayoutConfig {
                margin_left: 1.25,
                ..LayoutConfig::default()
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("screenplay/config.toml");

        let created = Config::init_at(&config_file, false).unwrap();
        assert_eq!(created, Config::default());
        assert_eq!(
            Config::load_from_path(&config_file).unwrap(),
            Some(Config::default())
        );

        assert!(matches!(
            Config::init_at(&config_file, false),
            Err(ConfigError::AlreadyExists(_))
        ));
        assert!(Config::init_at(&config_file, true).is_ok());
    }

    #[test]
    fn test_output_dir_with_env_var_in_toml() {
        unsafe {
            env::set_var("SCRIPTS_ROOT", "/custom/scripts");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "output_dir = \"$SCRIPTS_ROOT/drafts\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.output_dir,
            Some(PathBuf::from("/custom/scripts/drafts"))
        );

        unsafe {
            env::remove_var("SCRIPTS_ROOT");
        }
    }
}
