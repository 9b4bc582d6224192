//! Configuration front-end for craftgraph: reads a declarative resource
//! document (YAML, RON, JSON, or TOML), decodes it into catalog records, and
//! hands them to `craftgraph-core`'s catalog builder.

pub mod loader;

pub use loader::{
    ConfigError, Format, catalog_from_path, deserialize_file, detect_format, find_config_file,
    load_records, DEFAULT_BASE_NAME,
};
