//! RDF/XML writer
//!
//! Statements are grouped into one `rdf:Description` per run of identical
//! subjects. The `rdf:RDF` root, carrying `xml:base` and every declared
//! namespace, is written lazily before the first statement, so namespaces
//! must be declared before emitting; later declarations are reported as a
//! warning and ignored.

use crate::error::{SerializeError, SerializeResult};
use crate::factory::{FactoryDescriptor, SerializerContext, SerializerFactory, SyntaxWriter};
use crate::model::{vocab, Object, Subject, Triple};
use crate::toolkit::{split_iri, PrefixMap};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io;

pub fn descriptor() -> FactoryDescriptor {
    FactoryDescriptor::new("rdfxml", "RDF/XML")
        .with_alias("rdf/xml")
        .with_mime_type("application/rdf+xml")
        .with_syntax_uri("http://www.w3.org/ns/formats/RDF_XML")
}

/// Factory for [`RdfXmlWriter`]
#[derive(Debug, Default, Clone, Copy)]
pub struct RdfXmlFactory;

impl SerializerFactory for RdfXmlFactory {
    fn create_writer(
        &self,
        _context: &SerializerContext,
    ) -> SerializeResult<Box<dyn SyntaxWriter>> {
        Ok(Box::new(RdfXmlWriter::new()))
    }
}

fn xml_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b' ', 2)
}

fn map_err(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> SerializeError {
    SerializeError::Io(io::Error::other(error))
}

/// RDF/XML writer state for one serializer
pub struct RdfXmlWriter {
    xml: Writer<Vec<u8>>,
    namespaces: PrefixMap,
    root_written: bool,
    current_subject: Option<Subject>,
}

impl Default for RdfXmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RdfXmlWriter {
    pub fn new() -> Self {
        Self {
            xml: xml_writer(),
            namespaces: PrefixMap::new(),
            root_written: false,
            current_subject: None,
        }
    }

    fn write_event(&mut self, event: Event<'_>) -> SerializeResult<()> {
        self.xml.write_event(event).map_err(map_err)
    }

    /// Move buffered XML to the sink
    fn drain(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        let bytes = std::mem::take(self.xml.get_mut());
        if bytes.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8(bytes)
            .map_err(|e| SerializeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        context.write_str(&text)
    }

    fn write_root(&mut self, context: &SerializerContext) -> SerializeResult<()> {
        let features = context.features();
        if features.write_xml_declaration() {
            self.write_event(Event::Decl(BytesDecl::new(
                features.xml_version(),
                Some("utf-8"),
                None,
            )))?;
        }

        let mut rdf_open = BytesStart::new("rdf:RDF");
        rdf_open.push_attribute(("xmlns:rdf", vocab::rdf::NAMESPACE));
        for (prefix, uri) in self.namespaces.iter() {
            match prefix {
                "rdf" => continue,
                "" => rdf_open.push_attribute(("xmlns", uri)),
                _ => rdf_open.push_attribute((format!("xmlns:{prefix}").as_str(), uri)),
            }
        }
        if features.relative_uris() {
            if let Some(base) = context.base_uri() {
                rdf_open.push_attribute(("xml:base", base.as_str()));
            }
        }
        self.write_event(Event::Start(rdf_open))?;
        self.root_written = true;
        Ok(())
    }

    fn close_description(&mut self) -> SerializeResult<()> {
        if self.current_subject.take().is_some() {
            self.write_event(Event::End(BytesEnd::new("rdf:Description")))?;
        }
        Ok(())
    }

    /// Element name for a predicate, plus a namespace attribute when the
    /// predicate's namespace was never declared
    fn predicate_qname(&self, predicate: &str) -> Option<(String, Option<(String, String)>)> {
        let (namespace, local) = split_iri(predicate);
        if local.is_empty() {
            return None;
        }
        if namespace == vocab::rdf::NAMESPACE {
            return Some((format!("rdf:{local}"), None));
        }
        match self.namespaces.prefix_for(namespace) {
            Some("") => Some((local.to_string(), None)),
            Some(prefix) => Some((format!("{prefix}:{local}"), None)),
            None if self.namespaces.get("").is_none() => Some((
                local.to_string(),
                Some(("xmlns".to_string(), namespace.to_string())),
            )),
            None => Some((
                format!("ns0:{local}"),
                Some(("xmlns:ns0".to_string(), namespace.to_string())),
            )),
        }
    }
}

impl SyntaxWriter for RdfXmlWriter {
    fn start(&mut self, _context: &mut SerializerContext) -> SerializeResult<()> {
        self.xml = xml_writer();
        self.root_written = false;
        self.current_subject = None;
        Ok(())
    }

    fn declare_namespace(
        &mut self,
        context: &mut SerializerContext,
        uri: &str,
        prefix: Option<&str>,
    ) -> SerializeResult<()> {
        if self.root_written {
            context.warning(format_args!(
                "Cannot declare namespace <{uri}> after the document root has been written"
            ));
            return Ok(());
        }
        let prefix = prefix.unwrap_or("");
        let reserved = match prefix {
            "rdf" => uri != vocab::rdf::NAMESPACE,
            "xml" | "xmlns" => true,
            _ => false,
        };
        if reserved {
            context.warning(format_args!(
                "Cannot bind reserved prefix {prefix} to namespace <{uri}>"
            ));
            return Ok(());
        }
        self.namespaces.insert(prefix, uri);
        Ok(())
    }

    fn emit_statement(
        &mut self,
        context: &mut SerializerContext,
        triple: &Triple,
    ) -> SerializeResult<()> {
        let predicate = triple.predicate().as_str();
        let Some((qname, xmlns)) = self.predicate_qname(predicate) else {
            return Err(context.fail(format!(
                "Cannot split predicate <{predicate}> into an XML qualified name"
            )));
        };

        if !self.root_written {
            self.write_root(context)?;
        }

        if self.current_subject.as_ref() != Some(triple.subject()) {
            self.close_description()?;
            let mut description = BytesStart::new("rdf:Description");
            match triple.subject() {
                Subject::NamedNode(node) => description
                    .push_attribute(("rdf:about", context.output_iri(node.as_str()).as_ref())),
                Subject::BlankNode(node) => {
                    description.push_attribute(("rdf:nodeID", node.as_str()))
                }
            }
            self.write_event(Event::Start(description))?;
            self.current_subject = Some(triple.subject().clone());
        }

        let mut property = BytesStart::new(qname.as_str());
        if let Some((name, value)) = &xmlns {
            property.push_attribute((name.as_str(), value.as_str()));
        }
        match triple.object() {
            Object::NamedNode(node) => {
                property.push_attribute((
                    "rdf:resource",
                    context.output_iri(node.as_str()).as_ref(),
                ));
                self.write_event(Event::Empty(property))?;
            }
            Object::BlankNode(node) => {
                property.push_attribute(("rdf:nodeID", node.as_str()));
                self.write_event(Event::Empty(property))?;
            }
            Object::Literal(literal) => {
                if let Some(language) = literal.language() {
                    property.push_attribute(("xml:lang", language));
                } else if !literal.is_plain() {
                    property.push_attribute((
                        "rdf:datatype",
                        context.output_iri(literal.datatype().as_str()).as_ref(),
                    ));
                }
                self.write_event(Event::Start(property))?;
                self.write_event(Event::Text(BytesText::new(literal.value())))?;
                self.write_event(Event::End(BytesEnd::new(qname.as_str())))?;
            }
        }

        self.drain(context)
    }

    fn end(&mut self, context: &mut SerializerContext) -> SerializeResult<()> {
        if !self.root_written {
            self.write_root(context)?;
        }
        self.close_description()?;
        self.write_event(Event::End(BytesEnd::new("rdf:RDF")))?;
        self.drain(context)?;
        context.write_str("\n")
    }

    fn terminate(&mut self, _context: &mut SerializerContext) {
        self.xml = xml_writer();
        self.namespaces.clear();
        self.current_subject = None;
        self.root_written = false;
    }
}
