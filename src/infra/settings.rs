//! Layered settings loader.
//!
//! Settings are read from `settings.yaml` and then `settings-<env>.yaml` in
//! the settings folder, followed by `NGX_`-prefixed environment variables.
//! Later sources override earlier ones key by key; nested tables merge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::domain::{AppError, ConfigError, DatabaseSettings, Identifier};

/// Prefix scoping every environment variable the loader reads.
pub const ENV_VAR_PREFIX: &str = "NGX";

/// Profile used when `NGX_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Folder the settings files are read from, relative to the working directory.
pub const DEFAULT_SETTINGS_FOLDER: &str = "config";

/// Separator between nested keys in environment overrides,
/// e.g. `NGX_RELATIONAL__PRICES__CONFIGURATION__PORT`.
pub const ENV_KEY_SEPARATOR: &str = "__";

/// Resolved application settings. Read-only once loaded.
///
/// Identifier blocks are kept raw and only decoded when looked up, so one
/// malformed block does not stop the others from resolving.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub relational: HashMap<Identifier, Value>,
}

impl Settings {
    /// Load settings from the default folder using the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        SettingsLoader::new().load()
    }

    /// Adds (or replaces) the block for an identifier.
    #[must_use]
    pub fn with_database(
        mut self,
        identifier: impl Into<Identifier>,
        settings: DatabaseSettings,
    ) -> Self {
        self.relational.insert(identifier.into(), settings.into());
        self
    }

    /// Decode the settings block for an identifier.
    ///
    /// An exact key match wins; otherwise identifiers compare
    /// case-insensitively.
    pub fn relational(&self, identifier: &str) -> Result<DatabaseSettings, AppError> {
        let value = self
            .relational
            .get(identifier)
            .or_else(|| {
                self.relational
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(identifier))
                    .map(|(_, value)| value)
            })
            .ok_or_else(|| ConfigError::UnknownIdentifier(identifier.to_string()))?;

        Ok(DatabaseSettings::from_value(value.clone())?)
    }

    /// Sorted list of configured identifiers.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.relational.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Settings file names for an environment, in merge order.
pub fn settings_files(environment: &str) -> [String; 2] {
    [
        "settings.yaml".to_string(),
        format!("settings-{environment}.yaml"),
    ]
}

/// Environment names become part of a file name.
fn is_valid_environment(environment: &str) -> bool {
    !environment.is_empty()
        && environment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Builder for [`Settings`].
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    folder: PathBuf,
    environment: Option<String>,
    env_prefix: String,
    env_source: Option<HashMap<String, String>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            folder: PathBuf::from(DEFAULT_SETTINGS_FOLDER),
            environment: None,
            env_prefix: ENV_VAR_PREFIX.to_string(),
            env_source: None,
        }
    }

    /// Read settings files from `folder` instead of `config/`.
    #[must_use]
    pub fn folder(mut self, folder: impl AsRef<Path>) -> Self {
        self.folder = folder.as_ref().to_path_buf();
        self
    }

    /// Force the environment profile instead of reading `<prefix>_ENV`.
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Use the given variables instead of the process environment.
    #[must_use]
    pub fn env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Environment profile selected by `<prefix>_ENV`, or `local`.
    pub fn resolve_environment(&self) -> String {
        if let Some(environment) = &self.environment {
            return environment.clone();
        }
        let key = format!("{}_ENV", self.env_prefix);
        let value = match &self.env_source {
            Some(vars) => vars.get(&key).cloned(),
            None => std::env::var(&key).ok(),
        };
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    #[instrument(skip(self), fields(folder = %self.folder.display()))]
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let environment = self.resolve_environment();
        if !is_valid_environment(&environment) {
            return Err(ConfigError::InvalidValue {
                key: format!("{}_ENV", self.env_prefix),
                message: format!("'{environment}' is not a valid environment name"),
            });
        }
        let [base, overlay] = settings_files(&environment);
        info!(environment = %environment, "Loading settings");

        let mut env = Environment::with_prefix(&self.env_prefix)
            .prefix_separator("_")
            .separator(ENV_KEY_SEPARATOR)
            .try_parsing(true);
        if let Some(vars) = &self.env_source {
            env = env.source(Some(vars.clone().into_iter().collect()));
        }

        let config = Config::builder()
            .add_source(
                File::from(self.folder.join(&base))
                    .format(FileFormat::Yaml)
                    .required(true),
            )
            .add_source(
                File::from(self.folder.join(&overlay))
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(env)
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        debug!(
            identifiers = ?settings.identifiers(),
            "Settings loaded"
        );
        Ok(settings)
    }
}
