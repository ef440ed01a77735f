//! Base URI handling for serializer sessions

use crate::error::{SerializeError, SerializeResult};
use oxiri::Iri;
use std::fmt;
use std::path::Path;
use url::Url;

/// An absolute IRI used as the base of a serialization session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri {
    iri: Iri<String>,
}

impl BaseUri {
    /// Parse an absolute IRI
    pub fn parse(iri: impl Into<String>) -> SerializeResult<Self> {
        let iri = iri.into();
        match Iri::parse(iri.clone()) {
            Ok(iri) => Ok(Self { iri }),
            Err(e) => Err(SerializeError::invalid_iri(iri, e)),
        }
    }

    /// Derive a `file:` URI from a filename, resolving relative paths
    /// against the current directory
    pub fn from_filename(path: impl AsRef<Path>) -> SerializeResult<Self> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path)
            .map_err(|_| SerializeError::InvalidFilename(path.to_path_buf()))?;
        let url = Url::from_file_path(&absolute)
            .map_err(|()| SerializeError::InvalidFilename(path.to_path_buf()))?;
        Self::parse(String::from(url))
    }

    pub fn as_str(&self) -> &str {
        self.iri.as_str()
    }

    /// Express `iri` relative to this base, if it can be
    pub fn relativize(&self, iri: &str) -> Option<String> {
        let target = Iri::parse(iri).ok()?;
        let relative = self.iri.relativize(&target).ok()?;
        Some(relative.into_inner())
    }

    /// Resolve a possibly relative reference against this base
    pub fn resolve(&self, reference: &str) -> SerializeResult<Self> {
        let resolved = self
            .iri
            .resolve(reference)
            .map_err(|e| SerializeError::invalid_iri(reference, e))?;
        Ok(Self { iri: resolved })
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for BaseUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
