//! User settings loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::state::{InstallationFilter, RepositoryContext};

mod paths;

pub use paths::{config_dir, config_file, logs_dir};

/// Repository context used when nothing else is configured.
pub const DEFAULT_REPOSITORY_CONTEXT: &str = "eu.gcr.io/gardener-project/development";

/// Dashboard server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Failure to load an explicitly requested settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("unable to read config {path}: {source}")]
    Read {
        /// Offending file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// File is not valid TOML for [`Settings`].
    #[error("unable to parse config {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Result of [`Settings::load`].
#[derive(Debug)]
pub struct LoadedSettings {
    /// Settings to run with.
    pub settings: Settings,
    /// Problem with the default config file that was replaced by defaults.
    pub ignored: Option<ConfigError>,
}

impl LoadedSettings {
    /// Settings loaded without any ignored problem.
    const fn clean(settings: Settings) -> Self {
        Self {
            settings,
            ignored: None,
        }
    }
}

/// Dashboard settings. Missing keys take their defaults; unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the dashboard server.
    pub server_url: String,
    /// Context selected at startup.
    pub default_repository_context: String,
    /// Contexts offered by the picker.
    pub repository_contexts: Vec<String>,
    /// Connect and request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Namespace filter for installations; empty means all.
    pub installation_namespace: String,
    /// Also list encompassed installations.
    pub include_subinstallations: bool,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            default_repository_context: DEFAULT_REPOSITORY_CONTEXT.to_string(),
            repository_contexts: Vec::new(),
            request_timeout_secs: 15,
            installation_namespace: String::new(),
            include_subinstallations: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// What: Parse settings from TOML text.
    ///
    /// # Errors
    /// - Returns the TOML error when the text does not match [`Settings`].
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// What: Load settings.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any.
    ///
    /// Output:
    /// - Settings from `explicit`, else from the default config file, else defaults.
    ///   An unparsable default file is handed back in [`LoadedSettings::ignored`]
    ///   so the caller can report it once logging is up.
    ///
    /// # Errors
    /// - `Read`/`Parse` only for an explicit path.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
        Self::load_with_default(explicit, &config_file())
    }

    /// `load` with the default file location injected.
    fn load_with_default(
        explicit: Option<&Path>,
        default_file: &Path,
    ) -> Result<LoadedSettings, ConfigError> {
        if let Some(path) = explicit {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let settings = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            return Ok(LoadedSettings::clean(settings));
        }
        let Ok(text) = fs::read_to_string(default_file) else {
            return Ok(LoadedSettings::clean(Self::default()));
        };
        Ok(match Self::from_toml_str(&text) {
            Ok(settings) => LoadedSettings::clean(settings),
            Err(source) => LoadedSettings {
                settings: Self::default(),
                ignored: Some(ConfigError::Parse {
                    path: default_file.to_path_buf(),
                    source,
                }),
            },
        })
    }

    /// Request timeout, at least one second.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Startup repository context.
    #[must_use]
    pub fn default_context(&self) -> RepositoryContext {
        RepositoryContext::new(&self.default_repository_context)
    }

    /// What: Picker options with the default context first and no duplicates.
    #[must_use]
    pub fn known_contexts(&self) -> Vec<String> {
        let mut out = vec![self.default_repository_context.trim().to_string()];
        for c in &self.repository_contexts {
            let c = c.trim();
            if !c.is_empty() && !out.iter().any(|o| o == c) {
                out.push(c.to_string());
            }
        }
        out.retain(|c| !c.is_empty());
        out
    }

    /// Installation filter derived from the settings.
    #[must_use]
    pub fn installation_filter(&self) -> InstallationFilter {
        InstallationFilter {
            namespace: self.installation_namespace.trim().to_string(),
            include_subinstallations: self.include_subinstallations,
        }
    }
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
