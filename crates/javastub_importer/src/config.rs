// javastub_importer/config - Importer settings and their override layers
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Package prefixes that are not part of the platform framework.
pub const DEFAULT_NON_FRAMEWORK_PREFIXES: [&str; 3] =
    ["android.support.", "com.google.android.gms.", "renderscript."];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Shape of the serialized API description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Every type, member and attribute as XML.
    #[default]
    Full,
    /// Only parameter names and types of methods and constructors that have
    /// parameters, as XML.
    ParametersOnly,
    /// The normalized model serialized as JSON.
    Json,
}

impl OutputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputMode::Full => "full",
            OutputMode::ParametersOnly => "parameters-only",
            OutputMode::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub output_mode: OutputMode,
    /// Drop packages matching `non_framework_prefixes` before normalization.
    pub framework_only: bool,
    pub non_framework_prefixes: Vec<String>,
    pub verbose: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::default(),
            framework_only: false,
            non_framework_prefixes: DEFAULT_NON_FRAMEWORK_PREFIXES
                .iter()
                .map(|prefix| prefix.to_string())
                .collect(),
            verbose: false,
        }
    }
}

impl ImporterConfig {
    /// Applies `layers` in order; later layers win.
    pub fn with_layers(mut self, layers: &[ImporterConfigLayer]) -> Self {
        for layer in layers {
            self.apply_layer(layer);
        }
        self
    }

    fn apply_layer(&mut self, layer: &ImporterConfigLayer) {
        if let Some(output_mode) = layer.output_mode {
            self.output_mode = output_mode;
        }
        if let Some(framework_only) = layer.framework_only {
            self.framework_only = framework_only;
        }
        if let Some(prefixes) = &layer.non_framework_prefixes {
            self.non_framework_prefixes = prefixes.clone();
        }
        if let Some(verbose) = layer.verbose {
            self.verbose = verbose;
        }
    }

    /// True when `package` is excluded by the framework filter.
    pub fn is_filtered_package(&self, package: &str) -> bool {
        self.framework_only
            && self
                .non_framework_prefixes
                .iter()
                .any(|prefix| package.starts_with(prefix.as_str()))
    }
}

/// Partial settings from a config file or the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImporterConfigLayer {
    pub output_mode: Option<OutputMode>,
    pub framework_only: Option<bool>,
    pub non_framework_prefixes: Option<Vec<String>>,
    pub verbose: Option<bool>,
}

impl ImporterConfigLayer {
    pub fn is_empty(&self) -> bool {
        self.output_mode.is_none()
            && self.framework_only.is_none()
            && self.non_framework_prefixes.is_none()
            && self.verbose.is_none()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
