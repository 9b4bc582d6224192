//! File loading: format detection, discovery, and deserialization into
//! [`CatalogRecords`].

use craftgraph_core::catalog::{Catalog, CatalogError, CatalogRecords};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Conventional base name of the resource document (`resources.yaml`);
/// [`find_config_file`] accepts any supported format.
pub const DEFAULT_BASE_NAME: &str = "resources";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported config format: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting config formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// No config file with the given base name exists in the directory.
    #[error("no '{base}' config file found in {dir}")]
    NotFound { base: String, dir: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The decoded records failed catalog construction.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Ron,
    Json,
    Toml,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        Some("ron") => Ok(Format::Ron),
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(ConfigError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a config file with the given base name.
///
/// Looks for `{base}.yaml`, `.yml`, `.ron`, `.json`, and `.toml`. Errors if
/// more than one format is present for the same base name.
pub fn find_config_file(dir: &Path, base: &str) -> Result<PathBuf, ConfigError> {
    let extensions = ["yaml", "yml", "ron", "json", "toml"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(ConfigError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    found.ok_or_else(|| ConfigError::NotFound {
        base: base.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Loading
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Ron => ron::from_str(&content).map_err(|e| ConfigError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

/// Decode a file into catalog records according to its format.
pub fn load_records(path: &Path) -> Result<CatalogRecords, ConfigError> {
    deserialize_file(path)
}

/// Load a file and assemble the catalog in one step. Referential validation
/// remains the caller's explicit gate (`craftgraph_core::validate`).
pub fn catalog_from_path(path: &Path) -> Result<Catalog, ConfigError> {
    let records = load_records(path)?;
    Ok(Catalog::from_records(records)?)
}

// ===========================================================================
// Tests
// ===========================================================================
