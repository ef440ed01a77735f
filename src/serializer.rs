//! Serializer instances and the session state machine
//!
//! A [`Serializer`] binds one registered syntax to a sequence of output
//! sessions. Each session owns a [`Sink`] from [`Serializer::start`] until
//! [`Serializer::end`]; statements may only be emitted in between.
//!
//! ```rust
//! use oxirs_serialize::{NamedNode, Literal, Serializer, SerializerRegistry, Triple};
//!
//! let registry = SerializerRegistry::with_builtins();
//! let mut serializer = Serializer::new(&registry, Some("ntriples"))?;
//! let output = serializer.start_to_buffer(None)?;
//! serializer.serialize_statement(&Triple::new(
//!     NamedNode::new("http://example.org/s")?,
//!     NamedNode::new("http://example.org/p")?,
//!     Literal::new_simple_literal("o"),
//! ))?;
//! serializer.end()?;
//!
//! assert_eq!(
//!     output.to_string_lossy(),
//!     "<http://example.org/s> <http://example.org/p> \"o\" .\n"
//! );
//! # Ok::<(), oxirs_serialize::SerializeError>(())
//! ```

use crate::diagnostics::{Diagnostic, Locator};
use crate::error::{SerializeError, SerializeResult};
use crate::factory::{FactoryDescriptor, SerializerContext, SyntaxWriter};
use crate::features::{Feature, FeatureValues};
use crate::model::Triple;
use crate::namespace::Namespace;
use crate::registry::{RegisteredFactory, SerializerRegistry};
use crate::sink::{SharedBuffer, Sink};
use crate::uri::BaseUri;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// A serializer for one syntax, reusable across sessions
pub struct Serializer {
    factory: Arc<RegisteredFactory>,
    writer: Box<dyn SyntaxWriter>,
    context: SerializerContext,
    terminated: bool,
}

impl std::fmt::Debug for Serializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer")
            .field("syntax", &self.syntax())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Serializer {
    /// Create a serializer for the syntax registered under `name` (or alias).
    ///
    /// With no name the first registered syntax is used.
    pub fn new(registry: &SerializerRegistry, name: Option<&str>) -> SerializeResult<Self> {
        let factory = match (registry.lookup(name), name) {
            (Some(factory), _) => Arc::clone(factory),
            (None, Some(name)) => return Err(SerializeError::unknown_syntax(name)),
            (None, None) => return Err(SerializeError::NoSerializers),
        };

        let context = SerializerContext::new(factory.name());
        let writer = factory.factory().create_writer(&context)?;
        debug!(syntax = factory.name(), "created serializer");

        Ok(Self {
            factory,
            writer,
            context,
            terminated: false,
        })
    }

    /// Descriptor of the syntax this serializer writes
    pub fn descriptor(&self) -> &FactoryDescriptor {
        self.factory.descriptor()
    }

    pub fn syntax(&self) -> &str {
        self.factory.name()
    }

    /// Start a session writing to `sink`.
    ///
    /// The previous base URI is released and the locator reset to the start
    /// of the new document. Fails if a session is already active.
    pub fn start(&mut self, base_uri: Option<&BaseUri>, sink: Sink) -> SerializeResult<()> {
        self.ensure_idle()?;

        self.context.base_uri = base_uri.cloned();
        self.context.locator = Locator::new(base_uri.map(|uri| uri.to_string()));
        debug!(
            syntax = self.syntax(),
            base_uri = base_uri.map(BaseUri::as_str),
            sink = ?sink.kind(),
            "starting serialization session"
        );
        self.context.sink = Some(sink);

        self.writer.start(&mut self.context)
    }

    /// Start a session writing to a newly created file.
    ///
    /// When no base URI is given, one is derived from the filename.
    pub fn start_to_filename(
        &mut self,
        path: impl AsRef<Path>,
        base_uri: Option<&BaseUri>,
    ) -> SerializeResult<()> {
        self.ensure_idle()?;
        let path = path.as_ref();
        let derived;
        let base_uri = match base_uri {
            Some(uri) => uri,
            None => {
                derived = BaseUri::from_filename(path)?;
                &derived
            }
        };
        let sink = Sink::to_filename(path)?;
        self.start(Some(base_uri), sink)
    }

    /// Start a session accumulating into memory; the returned buffer holds
    /// the output once the session has ended
    pub fn start_to_buffer(&mut self, base_uri: Option<&BaseUri>) -> SerializeResult<SharedBuffer> {
        self.ensure_idle()?;
        let (sink, buffer) = Sink::to_buffer();
        self.start(base_uri, sink)?;
        Ok(buffer)
    }

    /// Start a session writing to an open file, which is left open
    pub fn start_to_file_handle(
        &mut self,
        base_uri: Option<&BaseUri>,
        file: &File,
    ) -> SerializeResult<()> {
        self.ensure_idle()?;
        let sink = Sink::to_file_handle(file)?;
        self.start(base_uri, sink)
    }

    /// Sinks are only built once this passes, so a rejected start never
    /// touches the caller's output target
    fn ensure_idle(&self) -> SerializeResult<()> {
        if self.context.is_active() {
            return Err(SerializeError::SessionActive {
                syntax: self.syntax().to_string(),
            });
        }
        Ok(())
    }

    /// Declare a namespace prefix (`None` for the default namespace)
    pub fn set_namespace(&mut self, uri: &str, prefix: Option<&str>) -> SerializeResult<()> {
        self.writer.declare_namespace(&mut self.context, uri, prefix)
    }

    pub fn set_namespace_from(&mut self, namespace: &Namespace) -> SerializeResult<()> {
        self.writer.declare_namespace_from(&mut self.context, namespace)
    }

    /// Write one statement to the active session
    pub fn serialize_statement(&mut self, triple: &Triple) -> SerializeResult<()> {
        if !self.context.is_active() {
            return Err(SerializeError::NoActiveSession);
        }
        self.writer.emit_statement(&mut self.context, triple)
    }

    /// End the active session.
    ///
    /// The sink is flushed and released even when the syntax writer fails to
    /// finish the document; the writer's result is returned.
    pub fn end(&mut self) -> SerializeResult<()> {
        if !self.context.is_active() {
            return Err(SerializeError::NoActiveSession);
        }

        let result = self.writer.end(&mut self.context);

        if let Some(sink) = self.context.sink.take() {
            let bytes_written = sink.bytes_written();
            match sink.close() {
                Ok(()) => debug!(
                    syntax = self.syntax(),
                    bytes_written,
                    "ended serialization session"
                ),
                Err(e) => {
                    warn!(syntax = self.syntax(), error = %e, "failed to close serializer sink");
                    if result.is_ok() {
                        return Err(e.into());
                    }
                }
            }
        }

        result
    }

    /// Release the serializer.
    ///
    /// Equivalent to dropping it; any active session is abandoned without
    /// ending the document.
    pub fn destroy(self) {}

    fn terminate(&mut self) {
        if !self.terminated {
            self.terminated = true;
            self.writer.terminate(&mut self.context);
            if let Some(mut sink) = self.context.sink.take() {
                let _ = sink.flush();
            }
            self.context.base_uri = None;
        }
    }

    /// Whether a session is active
    pub fn is_active(&self) -> bool {
        self.context.is_active()
    }

    /// Current output position
    pub fn locator(&self) -> &Locator {
        self.context.locator()
    }

    /// The active session's sink
    pub fn sink(&self) -> Option<&Sink> {
        self.context.sink.as_ref()
    }

    pub fn base_uri(&self) -> Option<&BaseUri> {
        self.context.base_uri()
    }

    pub fn features(&self) -> &FeatureValues {
        self.context.features()
    }

    /// See [`FeatureValues::get_int`]
    pub fn get_feature(&self, feature: Feature) -> i32 {
        self.context.features.get_int(feature)
    }

    /// See [`FeatureValues::set_int`]
    pub fn set_feature(&mut self, feature: Feature, value: i32) -> SerializeResult<()> {
        self.context.features.set_int(feature, value)
    }

    /// See [`FeatureValues::get_string`]
    pub fn get_feature_string(&self, feature: Feature) -> Option<&str> {
        self.context.features.get_string(feature)
    }

    /// See [`FeatureValues::set_string`]
    pub fn set_feature_string(&mut self, feature: Feature, value: &str) -> SerializeResult<()> {
        self.context.features.set_string(feature, value)
    }

    /// Handler for error diagnostics; user data is whatever the closure captures
    pub fn set_error_handler(&mut self, handler: impl FnMut(&Diagnostic) + Send + 'static) {
        self.context.diagnostics.set_error_handler(handler);
    }

    /// Handler for warning diagnostics
    pub fn set_warning_handler(&mut self, handler: impl FnMut(&Diagnostic) + Send + 'static) {
        self.context.diagnostics.set_warning_handler(handler);
    }

    /// Stream receiving diagnostics that have no handler (standard error by default)
    pub fn set_diagnostic_stream(&mut self, stream: impl Write + Send + 'static) {
        self.context.diagnostics.set_fallback_stream(stream);
    }
}

impl Drop for Serializer {
    fn drop(&mut self) {
        self.terminate();
    }
}
