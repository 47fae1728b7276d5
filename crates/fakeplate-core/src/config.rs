//! Generator configuration (`fakeplate.config.json`).
//!
//! ```json
//! {
//!   "template": "templates/record.txt",
//!   "count": 10,
//!   "workers": 4,
//!   "seed": null,
//!   "sink": { "kind": "directory", "path": "out" }
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the config file
//! via [`GeneratorConfig::resolve_paths`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FakeplateError, Result};

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE: &str = "fakeplate.config.json";

/// Where rendered records go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    /// Print each record to standard output.
    #[default]
    Stdout,
    /// Write each record to `<path>/<key>.txt`.
    Directory { path: PathBuf },
}

impl SinkConfig {
    /// Build a sink config from a kind name such as `--sink directory`.
    ///
    /// `directory` without a path writes to [`crate::project::OUTPUT_DIR`].
    pub fn from_kind(kind: &str, path: Option<PathBuf>) -> Result<Self> {
        match kind {
            "stdout" => Ok(Self::Stdout),
            "directory" => Ok(Self::Directory {
                path: path.unwrap_or_else(|| PathBuf::from(crate::project::OUTPUT_DIR)),
            }),
            other => Err(FakeplateError::UnknownSink(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Directory { .. } => "directory",
        }
    }
}

/// Batch generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Template file to render.
    pub template: PathBuf,
    /// Number of records to generate.
    #[serde(default = "default_count")]
    pub count: u64,
    /// Concurrent render workers.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Base seed. Record `i` uses `seed + i`; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub sink: SinkConfig,
}

fn default_count() -> u64 {
    1
}

fn default_workers() -> usize {
    1
}

impl GeneratorConfig {
    /// A config rendering `template` once to stdout.
    pub fn for_template(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            count: default_count(),
            workers: default_workers(),
            seed: None,
            sink: SinkConfig::default(),
        }
    }

    /// Load and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| FakeplateError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| FakeplateError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| FakeplateError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(FakeplateError::InvalidConfig(
                "workers must be at least 1".into(),
            ));
        }
        if self.template.as_os_str().is_empty() {
            return Err(FakeplateError::InvalidConfig(
                "template path is empty".into(),
            ));
        }
        Ok(())
    }

    /// Make relative template and sink paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.template.is_relative() {
            self.template = base.join(&self.template);
        }
        if let SinkConfig::Directory { path } = &mut self.sink {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
