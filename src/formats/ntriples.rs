//! N-Triples writer
//!
//! One statement per line, every IRI written in full. N-Triples has no
//! namespace declarations, so declaring one fails as unsupported.

use crate::error::SerializeResult;
use crate::factory::{FactoryDescriptor, SerializerContext, SerializerFactory, SyntaxWriter};
use crate::model::{Literal, Object, Subject, Triple};
use crate::toolkit::escape_literal;

pub fn descriptor() -> FactoryDescriptor {
    FactoryDescriptor::new("ntriples", "N-Triples")
        .with_alias("nt")
        .with_mime_type("application/n-triples")
        .with_syntax_uri("http://www.w3.org/ns/formats/N-Triples")
}

/// Factory for [`NTriplesWriter`]
#[derive(Debug, Default, Clone, Copy)]
pub struct NTriplesFactory;

impl SerializerFactory for NTriplesFactory {
    fn create_writer(
        &self,
        _context: &SerializerContext,
    ) -> SerializeResult<Box<dyn SyntaxWriter>> {
        Ok(Box::new(NTriplesWriter))
    }
}

/// Stateless N-Triples writer
#[derive(Debug, Default)]
pub struct NTriplesWriter;

impl SyntaxWriter for NTriplesWriter {
    fn emit_statement(
        &mut self,
        context: &mut SerializerContext,
        triple: &Triple,
    ) -> SerializeResult<()> {
        let line = format!(
            "{} <{}> {} .\n",
            format_subject(triple.subject()),
            triple.predicate().as_str(),
            format_object(triple.object())
        );
        context.write_str(&line)
    }

    fn terminate(&mut self, _context: &mut SerializerContext) {}
}

pub(crate) fn format_subject(subject: &Subject) -> String {
    match subject {
        Subject::NamedNode(node) => format!("<{}>", node.as_str()),
        Subject::BlankNode(node) => format!("_:{}", node.as_str()),
    }
}

pub(crate) fn format_object(object: &Object) -> String {
    match object {
        Object::NamedNode(node) => format!("<{}>", node.as_str()),
        Object::BlankNode(node) => format!("_:{}", node.as_str()),
        Object::Literal(literal) => format_literal(literal, |iri| format!("<{iri}>")),
    }
}

/// Quoted literal with its language tag or datatype; `datatype` renders the
/// datatype IRI
pub(crate) fn format_literal(literal: &Literal, datatype: impl FnOnce(&str) -> String) -> String {
    let mut result = escape_literal(literal.value());
    if let Some(language) = literal.language() {
        result.push('@');
        result.push_str(language);
    } else if !literal.is_plain() {
        result.push_str("^^");
        result.push_str(&datatype(literal.datatype().as_str()));
    }
    result
}
