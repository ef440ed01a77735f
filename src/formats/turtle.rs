//! Turtle writer
//!
//! Writes `@base` and `@prefix` directives, abbreviates IRIs with declared
//! prefixes (or relative to the base URI when the relative-URI feature is
//! on) and groups consecutive statements about the same subject with `;`.

use crate::error::SerializeResult;
use crate::factory::{FactoryDescriptor, SerializerContext, SerializerFactory, SyntaxWriter};
use crate::formats::ntriples::format_literal;
use crate::model::{vocab, Object, Subject, Triple};
use crate::toolkit::PrefixMap;

pub fn descriptor() -> FactoryDescriptor {
    FactoryDescriptor::new("turtle", "Turtle Terse RDF Triple Language")
        .with_alias("ttl")
        .with_mime_type("text/turtle")
        .with_syntax_uri("http://www.w3.org/ns/formats/Turtle")
}

/// Factory for [`TurtleWriter`]
#[derive(Debug, Default, Clone, Copy)]
pub struct TurtleFactory;

impl SerializerFactory for TurtleFactory {
    fn create_writer(
        &self,
        _context: &SerializerContext,
    ) -> SerializeResult<Box<dyn SyntaxWriter>> {
        Ok(Box::new(TurtleWriter::default()))
    }
}

/// Turtle writer state for one serializer
#[derive(Debug, Default)]
pub struct TurtleWriter {
    prefixes: PrefixMap,
    /// Subject of the statement block still open in the output
    current_subject: Option<Subject>,
}

impl TurtleWriter {
    fn format_iri(&self, context: &SerializerContext, iri: &str) -> String {
        if let Some(prefixed) = self.prefixes.abbreviate(iri) {
            return prefixed;
        }
        format!("<{}>", context.output_iri(iri))
    }

    fn format_subject(&self, context: &SerializerContext, subject: &Subject) -> String {
        match subject {
            Subject::NamedNode(node) => self.format_iri(context, node.as_str()),
            Subject::BlankNode(node) => format!("_:{}", node.as_str()),
        }
    }

    fn format_predicate(&self, context: &SerializerContext, predicate: &str) -> String {
        if predicate == vocab::rdf::TYPE {
            "a".to_string()
        } else {
            self.format_iri(context, predicate)
        }
    }

    fn format_object(&self, context: &SerializerContext, object: &Object) -> String {
        match object {
            Object::NamedNode(node) => self.format_iri(context, node.as_str()),
            Object::BlankNode(node) => format!("_:{}", node.as_str()),
            Object::Literal(literal) => {
                format_literal(literal, |datatype| self.format_iri(context, datatype))
            }
        }
    }

    fn close_block(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        if self.current_subject.take().is_some() {
            context.write_str(" .\n")?;
        }
        Ok(())
    }

    fn write_prefix(
        context: &mut SerializerContext,
        prefix: &str,
        uri: &str,
    ) -> SerializeResult<()> {
        context.write_str(&format!("@prefix {prefix}: <{uri}> .\n"))
    }
}

impl SyntaxWriter for TurtleWriter {
    fn start(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        self.current_subject = None;

        if let Some(base) = context.base_uri() {
            let line = format!("@base <{}> .\n", base.as_str());
            context.write_str(&line)?;
        }

        // Prefixes declared before the session started
        let declared: Vec<(String, String)> = self
            .prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect();
        for (prefix, uri) in &declared {
            Self::write_prefix(context, prefix, uri)?;
        }
        Ok(())
    }

    fn declare_namespace(
        &mut self,
        context: &mut SerializerContext,
        uri: &str,
        prefix: Option<&str>,
    ) -> SerializeResult<()> {
        let prefix = prefix.unwrap_or("");
        if self.prefixes.insert(prefix, uri) && context.is_active() {
            self.close_block(context)?;
            Self::write_prefix(context, prefix, uri)?;
        }
        Ok(())
    }

    fn emit_statement(
        &mut self,
        context: &mut SerializerContext,
        triple: &Triple,
    ) -> SerializeResult<()> {
        let predicate = self.format_predicate(context, triple.predicate().as_str());
        let object = self.format_object(context, triple.object());

        if self.current_subject.as_ref() == Some(triple.subject()) {
            context.write_str(&format!(" ;\n    {predicate} {object}"))
        } else {
            self.close_block(context)?;
            let subject = self.format_subject(context, triple.subject());
            context.write_str(&format!("{subject} {predicate} {object}"))?;
            self.current_subject = Some(triple.subject().clone());
            Ok(())
        }
    }

    fn end(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        self.close_block(context)
    }

    fn terminate(&mut self, _context: &mut SerializerContext) {
        self.prefixes.clear();
        self.current_subject = None;
    }
}
