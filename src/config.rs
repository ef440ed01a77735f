//! Declarative serializer configuration
//!
//! A [`SerializerConfig`] names a syntax, a base URI, feature settings and
//! namespace declarations, and can be loaded from JSON:
//!
//! ```rust
//! use oxirs_serialize::{Feature, SerializerConfig, SerializerRegistry};
//!
//! let config = SerializerConfig::from_json(r#"{
//!     "syntax": "rdfxml",
//!     "base_uri": "http://example.org/",
//!     "features": { "writerXMLVersion": 11, "relativeURIs": "0" },
//!     "namespaces": [ { "prefix": "ex", "uri": "http://example.org/ns#" } ]
//! }"#)?;
//!
//! let registry = SerializerRegistry::with_builtins();
//! let serializer = config.build(&registry)?;
//! assert_eq!(serializer.get_feature(Feature::WriterXmlVersion), 11);
//! assert_eq!(serializer.get_feature(Feature::RelativeUris), 0);
//! # Ok::<(), oxirs_serialize::SerializeError>(())
//! ```

use crate::error::{SerializeError, SerializeResult};
use crate::features::Feature;
use crate::registry::SerializerRegistry;
use crate::serializer::Serializer;
use crate::uri::BaseUri;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A feature value as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureSetting {
    Integer(i64),
    String(String),
}

impl fmt::Display for FeatureSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

/// A namespace declaration in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDeclaration {
    /// Prefix; absent or empty for the default namespace
    #[serde(default)]
    pub prefix: Option<String>,
    pub uri: String,
}

/// Serializer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Syntax name or alias; the first registered syntax when absent
    pub syntax: Option<String>,
    /// Base URI for sessions started from this configuration
    pub base_uri: Option<String>,
    /// Feature short name → value, applied in order
    pub features: IndexMap<String, FeatureSetting>,
    pub namespaces: Vec<NamespaceDeclaration>,
}

impl SerializerConfig {
    pub fn new(syntax: impl Into<String>) -> Self {
        Self {
            syntax: Some(syntax.into()),
            ..Self::default()
        }
    }

    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> SerializeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SerializeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: FeatureSetting) -> Self {
        self.features.insert(name.into(), value);
        self
    }

    pub fn with_namespace(mut self, prefix: Option<&str>, uri: impl Into<String>) -> Self {
        self.namespaces.push(NamespaceDeclaration {
            prefix: prefix.map(str::to_string),
            uri: uri.into(),
        });
        self
    }

    /// The configured base URI, parsed
    pub fn base_uri(&self) -> SerializeResult<Option<BaseUri>> {
        self.base_uri.as_deref().map(BaseUri::parse).transpose()
    }

    /// Create a serializer and apply every configured feature.
    ///
    /// Features go through the string setter, so integer features may be
    /// given either as numbers or as numeric strings.
    pub fn build(&self, registry: &SerializerRegistry) -> SerializeResult<Serializer> {
        let mut serializer = Serializer::new(registry, self.syntax.as_deref())?;
        for (name, value) in &self.features {
            let feature = Feature::from_name(name)
                .ok_or_else(|| SerializeError::UnsupportedFeature(name.clone()))?;
            serializer.set_feature_string(feature, &value.to_string())?;
        }
        Ok(serializer)
    }

    /// Declare the configured namespaces on `serializer`
    pub fn declare_namespaces(&self, serializer: &mut Serializer) -> SerializeResult<()> {
        for namespace in &self.namespaces {
            serializer.set_namespace(&namespace.uri, namespace.prefix.as_deref())?;
        }
        Ok(())
    }
}
