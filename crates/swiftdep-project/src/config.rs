//! Analyzer configuration: file values, discovery and command-line overrides.

use crate::builder::Fidelity;
use crate::error::{ProjectError, ProjectResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file names searched in every candidate directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".swiftdeprc", ".swift-dep.toml"];

/// Configuration for an analysis run
///
/// Loaded from TOML; every key is optional:
///
/// ```toml
/// ignore_patterns = ["Pods", "Carthage/Build"]
/// custom_extensions = [".pch"]
/// cache_enabled = true
/// shallow_mode = true
/// include_modules = false
/// max_depth = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Root-relative path prefixes (directories or exact files) to skip
    pub ignore_patterns: Vec<String>,

    /// Extra extensions (with leading dot), analyzed as Objective-C family
    pub custom_extensions: Vec<String>,

    /// Reuse graphs from the result cache
    pub cache_enabled: bool,

    /// Shallow (symbol-usage) graph instead of the extended one
    pub shallow_mode: bool,

    /// Let transitive closures walk through external modules
    pub include_modules: bool,

    /// Edge limit for path queries (None = analyzer default)
    pub max_depth: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            custom_extensions: Vec::new(),
            cache_enabled: true,
            shallow_mode: true,
            include_modules: false,
            max_depth: None,
        }
    }
}

/// Command-line style overrides; anything set here wins over file values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Appended to the configured ignore patterns
    pub ignore: Vec<String>,
    /// Build the extended graph
    pub extended: bool,
    /// Include external modules in closures
    pub include_modules: bool,
    /// Bypass the result cache
    pub no_cache: bool,
    /// Path query depth
    pub max_depth: Option<usize>,
}

impl AnalyzerConfig {
    /// Load and validate a TOML configuration file.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Io`] if the file cannot be read, [`ProjectError::Config`] if
    /// it is not valid TOML for this schema, [`ProjectError::InvalidConfig`] if the
    /// values fail [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> ProjectResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        let config: Self = toml::from_str(&text).map_err(|e| ProjectError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the first configuration file found in `search_dirs`.
    ///
    /// Each directory is checked for every name in [`CONFIG_FILE_NAMES`]. Only the
    /// first existing file is considered; if it fails to load, a warning is logged
    /// and defaults are returned.
    pub fn discover<P: AsRef<Path>>(search_dirs: &[P]) -> Self {
        let Some(path) = find_config_file(search_dirs) else {
            debug!("No configuration file found, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// [`discover`](Self::discover) in the current directory, then the home directory.
    pub fn discover_default() -> Self {
        let search_dirs: Vec<PathBuf> = std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::home_dir())
            .collect();
        Self::discover(&search_dirs)
    }

    /// Write the configuration as TOML.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Config`] if serialization fails, [`ProjectError::Io`] if the
    /// file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> ProjectResult<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self).map_err(|e| ProjectError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, text).map_err(|e| ProjectError::io(path, e))
    }

    /// Apply overrides on top of the current values.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        self.ignore_patterns.extend(overrides.ignore.iter().cloned());
        if overrides.extended {
            self.shallow_mode = false;
        }
        if overrides.include_modules {
            self.include_modules = true;
        }
        if overrides.no_cache {
            self.cache_enabled = false;
        }
        if overrides.max_depth.is_some() {
            self.max_depth = overrides.max_depth;
        }
    }

    /// Reject values the analysis cannot work with.
    ///
    /// # Errors
    ///
    /// [`ProjectError::InvalidConfig`] for `max_depth = 0` or an extension without a
    /// leading dot.
    pub fn validate(&self) -> ProjectResult<()> {
        if self.max_depth == Some(0) {
            return Err(ProjectError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if let Some(ext) = self
            .custom_extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(ProjectError::InvalidConfig(format!(
                "custom extension {ext:?} must look like \".ext\""
            )));
        }
        Ok(())
    }

    /// Graph fidelity selected by `shallow_mode`.
    pub fn fidelity(&self) -> Fidelity {
        if self.shallow_mode {
            Fidelity::Shallow
        } else {
            Fidelity::Extended
        }
    }
}

fn find_config_file<P: AsRef<Path>>(search_dirs: &[P]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.as_ref().join(name)))
        .find(|path| path.is_file())
}
