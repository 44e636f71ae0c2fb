//! Reading definitions from JSON and TOML.
//!
//! The main entry point is [`load`], which picks the format from the file
//! extension (`.toml` for TOML, anything else JSON).

use std::path::Path;

use crate::error::DefinitionError;
use crate::types::Definition;

/// Document formats a definition can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Toml => "TOML",
        }
    }
}

pub fn from_json_str(source: &str) -> Result<Definition, DefinitionError> {
    serde_json::from_str(source).map_err(|e| parse_error(Format::Json, e))
}

pub fn from_toml_str(source: &str) -> Result<Definition, DefinitionError> {
    toml::from_str(source).map_err(|e| parse_error(Format::Toml, e))
}

/// Parse an already-decoded JSON document.
pub fn from_value(value: serde_json::Value) -> Result<Definition, DefinitionError> {
    serde_json::from_value(value).map_err(|e| parse_error(Format::Json, e))
}

pub fn from_str(source: &str, format: Format) -> Result<Definition, DefinitionError> {
    match format {
        Format::Json => from_json_str(source),
        Format::Toml => from_toml_str(source),
    }
}

/// Read and parse a definition file.
pub fn load(path: &Path) -> Result<Definition, DefinitionError> {
    let source = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = Format::from_path(path);
    tracing::debug!(path = %path.display(), format = format.name(), "loading definition");
    from_str(&source, format)
}

fn parse_error(format: Format, err: impl std::fmt::Display) -> DefinitionError {
    DefinitionError::Parse {
        format: format.name(),
        message: err.to_string(),
    }
}
