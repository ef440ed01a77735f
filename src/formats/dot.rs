//! GraphViz DOT writer
//!
//! Edges are streamed as statements arrive. Node declarations, styled with
//! the border and fill features, are written when the session ends together
//! with a graph label listing the base URI and declared namespaces.

use crate::error::SerializeResult;
use crate::factory::{FactoryDescriptor, SerializerContext, SerializerFactory, SyntaxWriter};
use crate::features::Feature;
use crate::model::{Literal, Object, Subject, Triple};
use crate::toolkit::{escape_dot, PrefixMap};
use indexmap::IndexMap;
use std::fmt::Write as _;

pub fn descriptor() -> FactoryDescriptor {
    FactoryDescriptor::new("dot", "GraphViz DOT format")
        .with_alias("graphviz")
        .with_mime_type("text/x-graphviz")
        .with_syntax_uri("http://www.graphviz.org/doc/info/lang.html")
}

/// Factory for [`DotWriter`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DotFactory;

impl SerializerFactory for DotFactory {
    fn create_writer(
        &self,
        _context: &SerializerContext,
    ) -> SerializeResult<Box<dyn SyntaxWriter>> {
        Ok(Box::new(DotWriter::default()))
    }
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Resource,
    Blank,
    Literal,
}

impl NodeKind {
    fn heading(self) -> &'static str {
        match self {
            Self::Resource => "Resources",
            Self::Blank => "Anonymous nodes",
            Self::Literal => "Literals",
        }
    }

    fn shape(self) -> &'static str {
        match self {
            Self::Resource => "ellipse",
            Self::Blank => "circle",
            Self::Literal => "record",
        }
    }

    fn border(self) -> Feature {
        match self {
            Self::Resource => Feature::ResourceBorder,
            Self::Blank => Feature::BnodeBorder,
            Self::Literal => Feature::LiteralBorder,
        }
    }

    fn fill(self) -> Feature {
        match self {
            Self::Resource => Feature::ResourceFill,
            Self::Blank => Feature::BnodeFill,
            Self::Literal => Feature::LiteralFill,
        }
    }
}

fn named_nodes(nodes: &IndexMap<String, String>) -> impl Iterator<Item = (String, &str)> {
    nodes.iter().map(|(id, label)| (id.clone(), label.as_str()))
}

/// DOT writer state for one serializer
#[derive(Debug, Default)]
pub struct DotWriter {
    namespaces: PrefixMap,
    /// Node identifier → label, in first-seen order
    resources: IndexMap<String, String>,
    blanks: IndexMap<String, String>,
    /// Literal → label; the node identifier is `L` plus the entry's index
    literals: IndexMap<Literal, String>,
}

impl DotWriter {
    fn iri_label(&self, context: &SerializerContext, iri: &str) -> String {
        self.namespaces
            .abbreviate(iri)
            .unwrap_or_else(|| context.output_iri(iri).into_owned())
    }

    fn literal_label(literal: &Literal) -> String {
        let mut label = literal.value().to_string();
        if let Some(language) = literal.language() {
            label.push('|');
            label.push_str(language);
        } else if !literal.is_plain() {
            label.push('|');
            label.push_str(literal.datatype().as_str());
        }
        label
    }

    fn subject_node(&mut self, context: &SerializerContext, subject: &Subject) -> String {
        match subject {
            Subject::NamedNode(node) => self.resource_node(context, node.as_str()),
            Subject::BlankNode(node) => self.blank_node(node.as_str()),
        }
    }

    fn object_node(&mut self, context: &SerializerContext, object: &Object) -> String {
        match object {
            Object::NamedNode(node) => self.resource_node(context, node.as_str()),
            Object::BlankNode(node) => self.blank_node(node.as_str()),
            Object::Literal(literal) => {
                let entry = self.literals.entry(literal.clone());
                let id = format!("L{}", entry.index());
                entry.or_insert_with(|| Self::literal_label(literal));
                id
            }
        }
    }

    fn resource_node(&mut self, context: &SerializerContext, iri: &str) -> String {
        let id = format!("R{}", context.output_iri(iri));
        if !self.resources.contains_key(&id) {
            let label = self.iri_label(context, iri);
            self.resources.insert(id.clone(), label);
        }
        id
    }

    fn blank_node(&mut self, id: &str) -> String {
        let node = format!("B{id}");
        self.blanks
            .entry(node.clone())
            .or_insert_with(|| id.to_string());
        node
    }

    fn write_nodes<'a>(
        out: &mut String,
        context: &SerializerContext,
        kind: NodeKind,
        nodes: impl IntoIterator<Item = (String, &'a str)>,
    ) {
        let mut nodes = nodes.into_iter().peekable();
        if nodes.peek().is_none() {
            return;
        }
        let features = context.features();
        let _ = writeln!(out, "\n\t// {}", kind.heading());
        for (id, label) in nodes {
            let _ = write!(
                out,
                "\t\"{}\" [ label=\"{}\", shape = {}",
                escape_dot(&id),
                escape_dot(label),
                kind.shape()
            );
            if let Some(color) = features.style(kind.border()) {
                let _ = write!(out, ", color={color}");
            }
            if let Some(fill) = features.style(kind.fill()) {
                let _ = write!(out, ", style = filled, fillcolor={fill}");
            }
            out.push_str(" ];\n");
        }
    }
}

impl SyntaxWriter for DotWriter {
    fn start(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        self.resources.clear();
        self.blanks.clear();
        self.literals.clear();
        context.write_str("digraph {\n\trankdir = LR;\n\tcharset=\"utf-8\";\n\n")
    }

    fn declare_namespace(
        &mut self,
        _context: &mut SerializerContext,
        uri: &str,
        prefix: Option<&str>,
    ) -> SerializeResult<()> {
        self.namespaces.insert(prefix.unwrap_or(""), uri);
        Ok(())
    }

    fn emit_statement(
        &mut self,
        context: &mut SerializerContext,
        triple: &Triple,
    ) -> SerializeResult<()> {
        let subject = self.subject_node(context, triple.subject());
        let object = self.object_node(context, triple.object());
        let predicate = self.iri_label(context, triple.predicate().as_str());
        let edge = format!(
            "\t\"{}\" -> \"{}\" [ label=\"{}\" ];\n",
            escape_dot(&subject),
            escape_dot(&object),
            escape_dot(&predicate)
        );
        context.write_str(&edge)
    }

    fn end(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        let mut out = String::new();
        Self::write_nodes(&mut out, context, NodeKind::Resource, named_nodes(&self.resources));
        Self::write_nodes(&mut out, context, NodeKind::Blank, named_nodes(&self.blanks));
        let literals = self
            .literals
            .values()
            .enumerate()
            .map(|(index, label)| (format!("L{index}"), label.as_str()));
        Self::write_nodes(&mut out, context, NodeKind::Literal, literals);

        out.push_str("\n\tlabel=\"\\n\\nModel:\\n");
        match context.base_uri() {
            Some(base) => out.push_str(&escape_dot(base.as_str())),
            None => out.push_str("(Unknown)"),
        }
        if !self.namespaces.is_empty() {
            out.push_str("\\n\\nNamespaces:\\n");
            for (prefix, uri) in self.namespaces.iter() {
                let _ = write!(out, "{}: {}\\n", escape_dot(prefix), escape_dot(uri));
            }
        }
        out.push_str("\";\n}\n");
        context.write_str(&out)
    }

    fn terminate(&mut self, _context: &mut SerializerContext) {
        self.namespaces.clear();
        self.resources.clear();
        self.blanks.clear();
        self.literals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{vocab, NamedNode};

    #[test]
    fn test_literal_label() {
        let typed = Literal::new_typed_literal("7", NamedNode::new_unchecked(vocab::xsd::INTEGER));
        assert_eq!(
            DotWriter::literal_label(&typed),
            "7|http://www.w3.org/2001/XMLSchema#integer"
        );
        assert_eq!(DotWriter::literal_label(&Literal::new_simple_literal("x")), "x");
    }

    #[test]
    fn test_literal_nodes_do_not_merge_on_label() {
        let mut writer = DotWriter::default();
        let context = SerializerContext::new("dot");
        let plain = Object::Literal(Literal::new_simple_literal("a|en"));
        let tagged = Object::Literal(Literal::new_language_tagged_literal("a", "en").unwrap());

        assert_eq!(writer.object_node(&context, &plain), "L0");
        assert_eq!(writer.object_node(&context, &tagged), "L1");
        assert_eq!(writer.object_node(&context, &plain), "L0");
        assert_eq!(writer.literals.len(), 2);
    }
}
