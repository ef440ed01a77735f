//! Minimal RDF statement model passed through the serializer
//!
//! Serializers never interpret statements beyond reading their terms, so
//! this model only carries what the syntax writers need: IRIs, blank node
//! identifiers and literals.

use crate::error::{SerializeError, SerializeResult};
use oxiri::Iri;
use std::fmt;

/// Common vocabulary IRIs
pub mod vocab {
    pub mod rdf {
        pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
        pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
        pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    }

    pub mod xsd {
        pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
        pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
        pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    }
}

/// An IRI node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedNode {
    iri: String,
}

impl NamedNode {
    /// Create a named node, validating the IRI
    pub fn new(iri: impl Into<String>) -> SerializeResult<Self> {
        let iri = iri.into();
        if let Err(e) = Iri::parse(iri.as_str()) {
            return Err(SerializeError::invalid_iri(iri, e));
        }
        Ok(Self { iri })
    }

    /// Create a named node without validation
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// A blank node identified by a local label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    /// Create a blank node; the label must start with an alphanumeric or
    /// `_` and continue with alphanumerics, `_`, `-` and `.` (not trailing)
    pub fn new(id: impl Into<String>) -> SerializeResult<Self> {
        let id = id.into();
        let mut chars = id.chars();
        let valid = chars
            .next()
            .is_some_and(|first| first.is_alphanumeric() || first == '_')
            && !id.ends_with('.')
            && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(SerializeError::syntax(
                "model",
                format!("invalid blank node label '{id}'"),
            ));
        }
        Ok(Self { id })
    }

    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

/// A literal with either a language tag or a datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    value: String,
    language: Option<String>,
    datatype: NamedNode,
}

impl Literal {
    /// A plain `xsd:string` literal
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: NamedNode::new_unchecked(vocab::xsd::STRING),
        }
    }

    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype,
        }
    }

    /// A language-tagged literal; the tag is stored lowercased
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> SerializeResult<Self> {
        let language = language.into();
        let valid = !language.is_empty()
            && language
                .split('-')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !valid {
            return Err(SerializeError::syntax(
                "model",
                format!("invalid language tag '{language}'"),
            ));
        }
        Ok(Self {
            value: value.into(),
            language: Some(language.to_ascii_lowercase()),
            datatype: NamedNode::new_unchecked(vocab::rdf::LANG_STRING),
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn datatype(&self) -> &NamedNode {
        &self.datatype
    }

    /// Whether this is a plain `xsd:string` literal
    pub fn is_plain(&self) -> bool {
        self.language.is_none() && self.datatype.as_str() == vocab::xsd::STRING
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)?;
        if let Some(language) = &self.language {
            write!(f, "@{language}")
        } else if !self.is_plain() {
            write!(f, "^^{}", self.datatype)
        } else {
            Ok(())
        }
    }
}

/// Subject position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl From<NamedNode> for Subject {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
        }
    }
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl From<NamedNode> for Object {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Object {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Object {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

/// A subject / predicate / object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    subject: Subject,
    predicate: NamedNode,
    object: Object,
}

impl Triple {
    pub fn new(
        subject: impl Into<Subject>,
        predicate: NamedNode,
        object: impl Into<Object>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn predicate(&self) -> &NamedNode {
        &self.predicate
    }

    pub fn object(&self) -> &Object {
        &self.object
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
