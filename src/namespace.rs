//! Namespace prefix declarations

use std::fmt;

/// A namespace URI with an optional prefix (`None` is the default namespace)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    uri: String,
    prefix: Option<String>,
}

impl Namespace {
    pub fn new(uri: impl Into<String>, prefix: Option<&str>) -> Self {
        Self {
            uri: uri.into(),
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Split into the `(uri, prefix)` pair used by namespace declarations
    pub fn as_pair(&self) -> (&str, Option<&str>) {
        (self.uri(), self.prefix())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: <{}>", self.prefix().unwrap_or(""), self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix_is_default() {
        let ns = Namespace::new("http://example.org/", Some(""));
        assert_eq!(ns.prefix(), None);
        assert_eq!(ns.to_string(), ": <http://example.org/>");
    }

    #[test]
    fn test_pair() {
        let ns = Namespace::new("http://xmlns.com/foaf/0.1/", Some("foaf"));
        assert_eq!(ns.as_pair(), ("http://xmlns.com/foaf/0.1/", Some("foaf")));
    }
}
