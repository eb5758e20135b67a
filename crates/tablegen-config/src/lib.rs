//! Project configuration and schema loading.
//!
//! `tablegen.toml` names the schema document and the output directory.
//! Schema documents are JSON or TOML, picked by file extension; both keep
//! declaration order, which is the encoding order.

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tablegen_schema::doc::RawSchema;
use thiserror::Error as ThisError;

/// Default project configuration file name.
pub const CONFIG_FILE: &str = "tablegen.toml";

/// Runtime crate generated code refers to unless configured otherwise.
pub const DEFAULT_RUNTIME_CRATE: &str = "tablegen_runtime";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported schema format for {path}: expected a .json or .toml file")]
    UnsupportedFormat { path: PathBuf },
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        let kind = match &err {
            ConfigError::Io { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidData,
        };

        Self::new(kind, err)
    }
}

///
/// SchemaFormat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

///
/// CodegenConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    pub runtime_crate: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

///
/// TablegenConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TablegenConfig {
    pub schema: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub codegen: CodegenConfig,
}

impl TablegenConfig {
    /// Load a config file; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read(path)?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `dir/tablegen.toml` if it exists, otherwise fall back to defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.schema, &mut self.out_dir].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Load a raw schema document, choosing the parser by file extension.
pub fn load_schema(path: &Path) -> Result<RawSchema, ConfigError> {
    let format = SchemaFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = read(path)?;

    parse_schema(&text, format, path)
}

/// Parse schema text; `path` is only used for error context.
pub fn parse_schema(text: &str, format: SchemaFormat, path: &Path) -> Result<RawSchema, ConfigError> {
    match format {
        SchemaFormat::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        SchemaFormat::Toml => toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
