//! Syntax factory contract
//!
//! A syntax module provides a [`FactoryDescriptor`] naming the syntax and a
//! [`SerializerFactory`] that builds one [`SyntaxWriter`] per serializer
//! instance. The writer owns all syntax-specific state for that instance and
//! is driven through the session by [`crate::Serializer`], which hands it a
//! [`SerializerContext`] giving access to the sink, base URI, locator,
//! features and diagnostics.

use crate::diagnostics::{Diagnostics, Locator, Severity};
use crate::error::{SerializeError, SerializeResult};
use crate::features::FeatureValues;
use crate::model::Triple;
use crate::namespace::Namespace;
use crate::sink::Sink;
use crate::uri::BaseUri;
use std::borrow::Cow;
use std::fmt;
use std::io::Write;

/// Identity and introspection metadata of one syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDescriptor {
    name: String,
    label: String,
    alias: Option<String>,
    mime_type: Option<String>,
    syntax_uri: Option<String>,
}

impl FactoryDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            alias: None,
            mime_type: None,
            syntax_uri: None,
        }
    }

    /// Set a secondary name resolving to the same syntax
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_syntax_uri(mut self, syntax_uri: impl Into<String>) -> Self {
        self.syntax_uri = Some(syntax_uri.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn syntax_uri(&self) -> Option<&str> {
        self.syntax_uri.as_deref()
    }

    /// Whether `name` is this syntax's name or alias
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.alias.as_deref() == Some(name)
    }
}

impl fmt::Display for FactoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.label)
    }
}

/// Builds syntax writers for one registered syntax
pub trait SerializerFactory: Send + Sync {
    /// Create the per-instance writer state.
    ///
    /// Called once while constructing a serializer, after feature defaults
    /// have been applied. An error aborts construction.
    fn create_writer(&self, context: &SerializerContext) -> SerializeResult<Box<dyn SyntaxWriter>>;

    /// Called once when the registry is torn down
    fn finalize(&self) {}
}

/// Syntax-specific writer owned by one serializer instance
pub trait SyntaxWriter: Send {
    /// Session start; the sink and base URI are already set
    fn start(&mut self, _context: &mut SerializerContext) -> SerializeResult<()> {
        Ok(())
    }

    /// Declare a namespace prefix mapping
    fn declare_namespace(
        &mut self,
        context: &mut SerializerContext,
        _uri: &str,
        _prefix: Option<&str>,
    ) -> SerializeResult<()> {
        Err(SerializeError::unsupported(
            context.syntax_name(),
            "namespace declarations",
        ))
    }

    /// Declare a namespace from a namespace value; by default split into
    /// `(uri, prefix)` and forwarded to [`Self::declare_namespace`]
    fn declare_namespace_from(
        &mut self,
        context: &mut SerializerContext,
        namespace: &Namespace,
    ) -> SerializeResult<()> {
        let (uri, prefix) = namespace.as_pair();
        self.declare_namespace(context, uri, prefix)
    }

    /// Write one statement
    fn emit_statement(
        &mut self,
        context: &mut SerializerContext,
        triple: &Triple,
    ) -> SerializeResult<()>;

    /// Session end, before the sink is released
    fn end(&mut self, _context: &mut SerializerContext) -> SerializeResult<()> {
        Ok(())
    }

    /// Release any state held for the instance
    fn terminate(&mut self, context: &mut SerializerContext);
}

/// Instance state shared between a serializer and its syntax writer
#[derive(Debug)]
pub struct SerializerContext {
    syntax_name: String,
    pub(crate) base_uri: Option<BaseUri>,
    pub(crate) locator: Locator,
    pub(crate) sink: Option<Sink>,
    pub(crate) features: FeatureValues,
    pub(crate) diagnostics: Diagnostics,
}

impl SerializerContext {
    pub(crate) fn new(syntax_name: impl Into<String>) -> Self {
        Self {
            syntax_name: syntax_name.into(),
            base_uri: None,
            locator: Locator::default(),
            sink: None,
            features: FeatureValues::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Name of the syntax this instance writes
    pub fn syntax_name(&self) -> &str {
        &self.syntax_name
    }

    pub fn base_uri(&self) -> Option<&BaseUri> {
        self.base_uri.as_ref()
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn locator_mut(&mut self) -> &mut Locator {
        &mut self.locator
    }

    pub fn features(&self) -> &FeatureValues {
        &self.features
    }

    pub fn is_active(&self) -> bool {
        self.sink.is_some()
    }

    /// The session sink
    pub fn sink(&mut self) -> SerializeResult<&mut Sink> {
        self.sink.as_mut().ok_or(SerializeError::NoActiveSession)
    }

    /// Write text to the sink, advancing the locator over it
    pub fn write_str(&mut self, s: &str) -> SerializeResult<()> {
        let sink = self.sink.as_mut().ok_or(SerializeError::NoActiveSession)?;
        sink.write_all(s.as_bytes())?;
        match s.rfind('\n') {
            Some(last) => {
                self.locator.line += s.matches('\n').count();
                self.locator.column = s[last + 1..].chars().count();
            }
            None => self.locator.advance(s.chars().count()),
        }
        Ok(())
    }

    /// IRI as it should appear in output: relative to the base URI when the
    /// relative-URI feature is on and the IRI can be relativized
    pub fn output_iri<'a>(&self, iri: &'a str) -> Cow<'a, str> {
        if self.features.relative_uris() {
            if let Some(relative) = self.base_uri.as_ref().and_then(|base| base.relativize(iri)) {
                return Cow::Owned(relative);
            }
        }
        Cow::Borrowed(iri)
    }

    /// Raise an error diagnostic at the current location
    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.diagnostics.report(Severity::Error, &self.locator, args);
    }

    /// Raise a warning diagnostic at the current location
    pub fn warning(&mut self, args: fmt::Arguments<'_>) {
        self.diagnostics.report(Severity::Warning, &self.locator, args);
    }

    /// Raise an error diagnostic and build the matching failure value
    pub fn fail(&mut self, message: impl Into<String>) -> SerializeError {
        let message = message.into();
        self.error(format_args!("{message}"));
        SerializeError::syntax(self.syntax_name.clone(), message)
    }
}
