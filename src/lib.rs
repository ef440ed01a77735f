//! # OxiRS Serialize
//!
//! Pluggable RDF serializer registry with streaming writer sessions.
//!
//! Syntaxes are registered once in a [`SerializerRegistry`] and looked up by
//! name or alias. A [`Serializer`] built from the registry writes one
//! document per session:
//!
//! - start a session against a [`Sink`] (writer, file, in-memory buffer or
//!   open file handle), optionally with a base URI
//! - declare namespace prefixes
//! - emit statements one at a time
//! - end the session, which flushes and releases the sink
//!
//! Behaviour is tuned through typed [`Feature`]s, settable as integers or
//! strings, and writers report problems as error and warning
//! [`Diagnostic`]s routed to caller handlers.
//!
//! Built-in syntaxes: N-Triples, Turtle, RDF/XML and GraphViz DOT.
//!
//! ## Quick Start
//!
//! ```rust
//! use oxirs_serialize::{BaseUri, Literal, NamedNode, Serializer, SerializerRegistry, Triple};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SerializerRegistry::with_builtins();
//! let mut serializer = Serializer::new(&registry, Some("turtle"))?;
//!
//! let base = BaseUri::parse("http://example.org/")?;
//! let output = serializer.start_to_buffer(Some(&base))?;
//! serializer.set_namespace("http://xmlns.com/foaf/0.1/", Some("foaf"))?;
//! serializer.serialize_statement(&Triple::new(
//!     NamedNode::new("http://example.org/alice")?,
//!     NamedNode::new("http://xmlns.com/foaf/0.1/name")?,
//!     Literal::new_simple_literal("Alice"),
//! ))?;
//! serializer.end()?;
//!
//! assert_eq!(
//!     output.to_string_lossy(),
//!     "@base <http://example.org/> .\n\
//!      @prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\
//!      <alice> foaf:name \"Alice\" .\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Listing syntaxes
//!
//! ```rust
//! use oxirs_serialize::SerializerRegistry;
//!
//! let registry = SerializerRegistry::with_builtins();
//! let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
//! assert_eq!(names, ["ntriples", "turtle", "rdfxml", "dot"]);
//! assert!(registry.enumerate(names.len()).is_none());
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod features;
pub mod formats;
pub mod model;
pub mod namespace;
pub mod registry;
pub mod serializer;
pub mod sink;
pub mod toolkit;
pub mod uri;

pub use config::{FeatureSetting, NamespaceDeclaration, SerializerConfig};
pub use diagnostics::{Diagnostic, Locator, Severity};
pub use error::{SerializeError, SerializeResult};
pub use factory::{FactoryDescriptor, SerializerContext, SerializerFactory, SyntaxWriter};
pub use features::{Feature, FeatureInfo, FeatureType, FeatureValues};
pub use model::{BlankNode, Literal, NamedNode, Object, Subject, Triple};
pub use namespace::Namespace;
pub use registry::SerializerRegistry;
pub use serializer::Serializer;
pub use sink::{SharedBuffer, Sink, SinkKind};
pub use uri::BaseUri;
