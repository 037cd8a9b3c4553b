//! Error types for route loading, document generation, and payload validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which part of the document a conflicting key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Channel,
    Operation,
    Message,
    Schema,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictKind::Channel => "channel",
            ConflictKind::Operation => "operation",
            ConflictKind::Message => "message",
            ConflictKind::Schema => "schema",
        };
        f.write_str(name)
    }
}

/// Failure reported by a [`SchemaGenerator`](crate::SchemaGenerator).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SchemaGenerationError {
    pub message: String,
}

impl SchemaGenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A type expression that cannot be reduced to a single-level payload type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type `{expression}`: {reason}")]
pub struct TypeShapeError {
    pub expression: String,
    pub reason: String,
}

/// Errors during AsyncAPI document generation.
///
/// Every variant aborts generation as a whole; no partial document is returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{kind} key '{key}' is declared more than once ({detail})")]
    ConfigurationConflict {
        kind: ConflictKind,
        key: String,
        detail: String,
    },

    #[error("route '{route}'{}: unsupported type `{expression}`: {reason}",
        parameter.as_ref().map(|p| format!(", parameter '{}'", p)).unwrap_or_default())]
    UnsupportedTypeShape {
        route: String,
        parameter: Option<String>,
        expression: String,
        reason: String,
    },

    #[error("cannot generate schema for {type_name}: {source}")]
    SchemaGeneration {
        type_name: String,
        #[source]
        source: SchemaGenerationError,
    },

    #[error("document generation is disabled")]
    FeatureDisabled,

    #[error("failed to serialize document: {message}")]
    Serialization { message: String },
}

impl GenerateError {
    pub(crate) fn unsupported_shape(
        route: &str,
        parameter: Option<&str>,
        err: TypeShapeError,
    ) -> Self {
        GenerateError::UnsupportedTypeShape {
            route: route.to_string(),
            parameter: parameter.map(String::from),
            expression: err.expression,
            reason: err.reason,
        }
    }

    /// True when a serving boundary should answer "not found" instead of
    /// reporting an internal error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GenerateError::FeatureDisabled)
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::FeatureDisabled => 4,
            _ => 2,
        }
    }
}

/// Errors while reading manifests, schemas, or documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid route manifest: {source}")]
    InvalidManifest {
        #[source]
        source: serde_json::Error,
    },

    #[error("pointer not found: {pointer}")]
    PointerNotFound { pointer: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors while validating a sample payload against a generated document.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("message '{name}' not found in components/messages")]
    UnknownMessage { name: String },

    #[error("invalid payload schema: {message}")]
    InvalidSchema { message: String },

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Invalid { .. } => 1,
            _ => 2,
        }
    }
}
