//! Run settings: an optional TOML settings file layered under command-line
//! overrides, resolved once into [`Settings`].

mod host;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::decode::Format;
use crate::dispatch::{BodyMode, OutputMode, Resolver};

pub use host::Host;

/// Contents of a settings file. Every key is optional.
///
/// ```toml
/// format = "directives"
/// body = "args"
/// output = "relay"
/// hooks-dir = "/var/atlassian/hooks"
/// ```
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsFile {
    pub format: Option<Format>,
    pub body: Option<BodyMode>,
    pub output: Option<OutputMode>,
    pub hooks_dir: Option<PathBuf>,
    pub search_path: Option<bool>,
}

/// Errors that can occur when loading or resolving settings.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("settings file not found: {}", .0.display())]
    #[diagnostic(code(bithooker::config::not_found))]
    NotFound(PathBuf),
    #[error("failed to read settings: {0}")]
    #[diagnostic(code(bithooker::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid TOML settings: {0}")]
    #[diagnostic(code(bithooker::config::parse))]
    ParseError(String),
    #[error("invalid settings: {0}")]
    #[diagnostic(code(bithooker::config::invalid))]
    ValidationError(String),
}

impl SettingsFile {
    /// Load settings from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a TOML string into settings.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;
        if file.hooks_dir.is_some() && file.search_path == Some(true) {
            return Err(ConfigError::ValidationError(
                "hooks-dir and search-path = true are mutually exclusive".to_string(),
            ));
        }
        Ok(file)
    }
}

/// Values given on the command line or through environment variables.
/// They take precedence over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub format: Option<Format>,
    pub body: Option<BodyMode>,
    pub output: Option<OutputMode>,
    pub hooks_dir: Option<PathBuf>,
    pub search_path: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: Format,
    pub body: BodyMode,
    pub output: OutputMode,
    pub resolver: Resolver,
}

impl Settings {
    /// Layer overrides over the file over defaults.
    ///
    /// `default_dir` is used when neither layer picks a resolver. Table
    /// format always delivers its values as stdin data.
    pub fn resolve(
        overrides: &Overrides,
        file: Option<SettingsFile>,
        default_dir: &Path,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let format = overrides.format.or(file.format).unwrap_or_default();

        let body = match (format, overrides.body.or(file.body)) {
            (Format::Table, Some(BodyMode::Args)) => {
                return Err(ConfigError::ValidationError(
                    "table format only supports data bodies".to_string(),
                ));
            }
            (Format::Table, _) => BodyMode::Data,
            (Format::Directives, body) => body.unwrap_or_default(),
        };

        let resolver = if overrides.search_path {
            Resolver::SearchPath
        } else if let Some(dir) = &overrides.hooks_dir {
            Resolver::Directory(dir.clone())
        } else if file.search_path == Some(true) {
            Resolver::SearchPath
        } else if let Some(dir) = file.hooks_dir {
            Resolver::Directory(dir)
        } else {
            Resolver::Directory(default_dir.to_path_buf())
        };

        Ok(Settings {
            format,
            body,
            output: overrides.output.or(file.output).unwrap_or_default(),
            resolver,
        })
    }
}
