//! Registry of available serializer syntaxes
//!
//! The registry is built once at startup, is read-only while serializers are
//! created from it and is torn down once at shutdown. Entries keep their
//! registration order, which is also the enumeration order.

use crate::factory::{FactoryDescriptor, SerializerFactory};
use std::sync::Arc;
use tracing::debug;

/// A registered syntax: its descriptor and the factory building its writers
pub struct RegisteredFactory {
    descriptor: FactoryDescriptor,
    factory: Box<dyn SerializerFactory>,
}

impl RegisteredFactory {
    pub fn descriptor(&self) -> &FactoryDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn factory(&self) -> &dyn SerializerFactory {
        self.factory.as_ref()
    }
}

impl std::fmt::Debug for RegisteredFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredFactory")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of serializer factories
#[derive(Debug, Default)]
pub struct SerializerRegistry {
    factories: Vec<Arc<RegisteredFactory>>,
    torn_down: bool,
}

impl SerializerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in syntaxes (N-Triples, Turtle, RDF/XML, DOT)
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::formats::register_builtins(&mut registry);
        registry
    }

    /// Register a syntax.
    ///
    /// # Panics
    ///
    /// Panics if a syntax with the same name is already registered.
    /// Registration happens at startup only, so a duplicate is a programming
    /// error rather than a runtime condition.
    pub fn register(
        &mut self,
        descriptor: FactoryDescriptor,
        factory: impl SerializerFactory + 'static,
    ) {
        if self
            .factories
            .iter()
            .any(|entry| entry.name() == descriptor.name())
        {
            panic!("serializer {} already registered", descriptor.name());
        }

        debug!(
            name = descriptor.name(),
            label = descriptor.label(),
            alias = descriptor.alias(),
            mime_type = descriptor.mime_type(),
            syntax_uri = descriptor.syntax_uri(),
            "registered serializer"
        );

        self.torn_down = false;
        self.factories.push(Arc::new(RegisteredFactory {
            descriptor,
            factory: Box::new(factory),
        }));
    }

    /// Find a syntax by name or alias.
    ///
    /// With no name, the first registered syntax is returned.
    pub fn lookup(&self, name: Option<&str>) -> Option<&Arc<RegisteredFactory>> {
        let Some(name) = name else {
            return self.factories.first();
        };

        let found = self
            .factories
            .iter()
            .find(|entry| entry.descriptor.matches(name));
        if found.is_none() {
            debug!(name, "no serializer registered under name");
        }
        found
    }

    /// Whether `name` is the name or alias of a registered syntax
    pub fn is_known(&self, name: &str) -> bool {
        self.factories
            .iter()
            .any(|entry| entry.descriptor.matches(name))
    }

    /// Descriptor at position `index` in registration order
    pub fn enumerate(&self, index: usize) -> Option<&FactoryDescriptor> {
        self.factories.get(index).map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &FactoryDescriptor> {
        self.factories.iter().map(|entry| &entry.descriptor)
    }

    /// Finalize every factory in registration order and empty the registry.
    ///
    /// Serializers created earlier keep their factory alive and stay usable.
    /// The registry may be populated again afterwards.
    pub fn teardown(&mut self) {
        for entry in &self.factories {
            entry.factory.finalize();
        }
        debug!(count = self.factories.len(), "serializer registry torn down");
        self.factories.clear();
        self.torn_down = true;
    }
}

impl Drop for SerializerRegistry {
    fn drop(&mut self) {
        if !self.torn_down {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SerializeResult;
    use crate::factory::{SerializerContext, SyntaxWriter};
    use crate::model::Triple;
    use parking_lot::Mutex;

    struct NullWriter;

    impl SyntaxWriter for NullWriter {
        fn emit_statement(
            &mut self,
            _context: &mut SerializerContext,
            _triple: &Triple,
        ) -> SerializeResult<()> {
            Ok(())
        }

        fn terminate(&mut self, _context: &mut SerializerContext) {}
    }

    struct RecordingFactory {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl SerializerFactory for RecordingFactory {
        fn create_writer(
            &self,
            _context: &SerializerContext,
        ) -> SerializeResult<Box<dyn SyntaxWriter>> {
            Ok(Box::new(NullWriter))
        }

        fn finalize(&self) {
            self.log.lock().push(self.name);
        }
    }

    fn recording(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> RecordingFactory {
        RecordingFactory {
            name,
            log: log.clone(),
        }
    }

    #[test]
    fn test_lookup_default_and_alias() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SerializerRegistry::new();
        assert!(registry.lookup(None).is_none());

        registry.register(
            FactoryDescriptor::new("first", "First").with_alias("one"),
            recording("first", &log),
        );
        registry.register(
            FactoryDescriptor::new("second", "Second"),
            recording("second", &log),
        );

        assert_eq!(registry.lookup(None).map(|f| f.name()), Some("first"));
        assert_eq!(registry.lookup(Some("one")).map(|f| f.name()), Some("first"));
        assert!(registry.lookup(Some("third")).is_none());
        assert!(registry.is_known("second"));
        assert!(!registry.is_known("Second"));
    }

    #[test]
    fn test_teardown_finalizes_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SerializerRegistry::new();
        registry.register(FactoryDescriptor::new("a", "A"), recording("a", &log));
        registry.register(FactoryDescriptor::new("b", "B"), recording("b", &log));

        registry.teardown();
        assert_eq!(log.lock().as_slice(), ["a", "b"]);
        assert!(registry.is_empty());

        // Dropping after an explicit teardown does not finalize again
        drop(registry);
        assert_eq!(log.lock().len(), 2);
    }

    #[test]
    fn test_drop_tears_down() {
        let log = Arc::new(Mutex::new(Vec::new()));
        {
            let mut registry = SerializerRegistry::new();
            registry.register(FactoryDescriptor::new("a", "A"), recording("a", &log));
        }
        assert_eq!(log.lock().as_slice(), ["a"]);
    }
}
