//! Error types for serializer construction, sessions and feature configuration
//!
//! Every recoverable condition is reported through [`SerializeError`].
//! Registration-time programmer errors (duplicate syntax names) are not
//! represented here: they panic, because a partially registered registry is
//! never a valid state to continue from.

use crate::features::Feature;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the serializer registry, serializer sessions and syntax writers
#[derive(Debug, Error)]
pub enum SerializeError {
    /// No registered syntax has this name or alias
    #[error("Unknown syntax: {name}")]
    UnknownSyntax { name: String },

    /// A default syntax was requested but the registry is empty
    #[error("No serializers registered")]
    NoSerializers,

    /// The operation needs an active session (start was not called, or end already ran)
    #[error("No active serialization session")]
    NoActiveSession,

    /// A session is already running on this serializer
    #[error("Serialization session already active for syntax {syntax}")]
    SessionActive { syntax: String },

    /// The syntax does not implement an optional operation
    #[error("Syntax {syntax} does not support {operation}")]
    Unsupported {
        syntax: String,
        operation: &'static str,
    },

    /// The feature is unknown to serializers or has the wrong value type
    #[error("Unsupported serializer feature: {0}")]
    UnsupportedFeature(String),

    /// The feature exists but the value was rejected
    #[error("Invalid value for feature {feature}: {message}")]
    InvalidFeatureValue { feature: Feature, message: String },

    /// An IRI could not be parsed
    #[error("Invalid IRI <{iri}>: {message}")]
    InvalidIri { iri: String, message: String },

    /// A filename could not be turned into a base URI
    #[error("Cannot derive a URI from filename {}", .0.display())]
    InvalidFilename(PathBuf),

    /// The syntax writer refused to initialise
    #[error("Failed to initialise {syntax} serializer: {message}")]
    Init { syntax: String, message: String },

    /// The syntax writer could not express a statement
    #[error("Serialization error in {syntax}: {message}")]
    Syntax { syntax: String, message: String },

    /// A serializer configuration could not be parsed or written as JSON
    #[error("Invalid serializer configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Writing to the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for serializer operations
pub type SerializeResult<T> = Result<T, SerializeError>;

impl SerializeError {
    /// Create an unknown syntax error
    pub fn unknown_syntax(name: impl Into<String>) -> Self {
        Self::UnknownSyntax { name: name.into() }
    }

    /// Create an unsupported operation error
    pub fn unsupported(syntax: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            syntax: syntax.into(),
            operation,
        }
    }

    /// Create an invalid IRI error
    pub fn invalid_iri(iri: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidIri {
            iri: iri.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid feature value error
    pub fn invalid_feature_value(feature: Feature, message: impl Into<String>) -> Self {
        Self::InvalidFeatureValue {
            feature,
            message: message.into(),
        }
    }

    /// Create a syntax-level serialization error
    pub fn syntax(syntax: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            syntax: syntax.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from the underlying sink
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
