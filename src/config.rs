// Configuration types for the translator, its engine and the debug handler

use crate::error::ConfigError;
use crate::options::{CompilationOptions, SourceMapMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the settings section that configures the translator
pub const TRANSLATOR_SECTION: &str = "translator";

/// Top-level settings, read once at startup and passed by reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub translator: TranslatorSettings,
    pub engine: EngineSettings,
    pub debug_handler: DebugHandlerSettings,
    pub logging: LoggingSettings,
}

/// Translator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    /// Name of the JS engine to host the transpiler in (required)
    pub js_engine: Option<String>,

    /// Keep comments in the output
    pub comments: bool,

    /// Strip superfluous whitespace
    pub compact: bool,

    /// Highlight code frames in syntax error messages
    pub highlight_code: bool,

    /// Source map emission mode
    pub source_maps: SourceMapMode,

    /// Location of the transpiler script (e.g. Babel standalone)
    pub library_path: PathBuf,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            js_engine: None,
            comments: false,
            compact: true,
            highlight_code: true,
            source_maps: SourceMapMode::None,
            library_path: PathBuf::from("babel.min.js"),
        }
    }
}

impl TranslatorSettings {
    /// Build the per-compile options these settings describe
    pub fn compilation_options(&self) -> CompilationOptions {
        CompilationOptions {
            comments: self.comments,
            compact: self.compact,
            highlight_code: self.highlight_code,
            source_maps: self.source_maps,
        }
    }

    /// The configured engine name, if one is set and not blank
    pub fn engine_name(&self) -> Option<&str> {
        self.js_engine
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Limits applied to every engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Memory limit per engine in bytes (0 = unlimited)
    pub memory_limit: usize,

    /// Maximum JS stack size in bytes (0 = engine default)
    pub max_stack_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            memory_limit: 256 * 1024 * 1024, // 256MB
            max_stack_size: 0,
        }
    }
}

/// Debug HTTP handler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugHandlerSettings {
    /// Address to listen on
    pub bind: String,

    /// Physical directory virtual paths resolve against
    pub root: PathBuf,

    /// Whether the host runs in debug mode
    pub debug_mode: bool,
}

impl Default for DebugHandlerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8085".to_string(),
            root: PathBuf::from("."),
            debug_mode: true,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default multi-field output
    #[default]
    Full,
    /// Single-line output
    Compact,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter; `RUST_LOG` takes precedence
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
        }
    }
}

impl Settings {
    /// Load settings
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and parse a settings file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        tracing::debug!("Loaded settings from '{}'", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Per-user config file location (e.g. ~/.config/es2015-translator/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "es2015-translator")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_translator_settings() {
        let settings = TranslatorSettings::default();
        assert!(settings.js_engine.is_none());
        assert!(!settings.comments);
        assert!(settings.compact);
        assert!(settings.highlight_code);
        assert_eq!(settings.source_maps, SourceMapMode::None);
    }

    #[test]
    fn compilation_options_follow_settings() {
        let settings = TranslatorSettings {
            comments: true,
            compact: false,
            highlight_code: false,
            source_maps: SourceMapMode::Both,
            ..Default::default()
        };

        let options = settings.compilation_options();
        assert!(options.comments);
        assert!(!options.compact);
        assert!(!options.highlight_code);
        assert_eq!(options.source_maps, SourceMapMode::Both);
    }

    #[test]
    fn blank_engine_name_counts_as_missing() {
        let mut settings = TranslatorSettings::default();
        assert_eq!(settings.engine_name(), None);

        settings.js_engine = Some("   ".to_string());
        assert_eq!(settings.engine_name(), None);

        settings.js_engine = Some(" quickjs ".to_string());
        assert_eq!(settings.engine_name(), Some("quickjs"));
    }

    #[test]
    fn parse_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [translator]
            js_engine = "quickjs"
            source_maps = "inline"

            [debug_handler]
            bind = "0.0.0.0:9000"
            "#,
        )
        .unwrap();

        assert_eq!(settings.translator.engine_name(), Some("quickjs"));
        assert_eq!(settings.translator.source_maps, SourceMapMode::Inline);
        assert!(settings.translator.compact);
        assert_eq!(settings.debug_handler.bind, "0.0.0.0:9000");
        assert_eq!(settings.engine, EngineSettings::default());
        assert_eq!(settings.logging.format, LogFormat::Full);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Settings::from_toml("[translator]\nsource_maps = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.translator.js_engine = Some("quickjs".to_string());
        settings.logging.format = LogFormat::Compact;

        let text = settings.to_toml().unwrap();
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_from_file_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[translator\n").unwrap();

        match Settings::load(Some(&path)).unwrap_err() {
            ConfigError::Parse { path: reported, .. } => {
                assert!(reported.ends_with("config.toml"))
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
