//! Output of the built-in syntax writers

use oxirs_serialize::model::vocab;
use oxirs_serialize::{
    BaseUri, BlankNode, Feature, Literal, NamedNode, Serializer, SerializerRegistry, Triple,
};

fn iri(s: &str) -> NamedNode {
    NamedNode::new_unchecked(s)
}

fn write_all(
    serializer: &mut Serializer,
    base: Option<&str>,
    namespaces: &[(&str, &str)],
    triples: &[Triple],
) -> String {
    let base = base.map(|b| BaseUri::parse(b).unwrap());
    let output = serializer.start_to_buffer(base.as_ref()).unwrap();
    for (prefix, uri) in namespaces {
        serializer.set_namespace(uri, Some(prefix)).unwrap();
    }
    for triple in triples {
        serializer.serialize_statement(triple).unwrap();
    }
    serializer.end().unwrap();
    output.to_string_lossy()
}

fn person_triples() -> Vec<Triple> {
    vec![
        Triple::new(
            iri("http://example.org/alice"),
            iri(vocab::rdf::TYPE),
            iri("http://example.org/Person"),
        ),
        Triple::new(
            iri("http://example.org/alice"),
            iri("http://example.org/name"),
            Literal::new_language_tagged_literal("Alice", "en").unwrap(),
        ),
        Triple::new(
            BlankNode::new_unchecked("b1"),
            iri("http://example.org/knows"),
            iri("http://example.org/alice"),
        ),
    ]
}

#[test]
fn test_ntriples_lines() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("ntriples")).unwrap();
    let output = write_all(
        &mut serializer,
        Some("http://example.org/"),
        &[],
        &[Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            Literal::new_simple_literal("line\nbreak \"quoted\""),
        )],
    );
    assert_eq!(
        output,
        "<http://example.org/s> <http://example.org/p> \"line\\nbreak \\\"quoted\\\"\" .\n"
    );
}

#[test]
fn test_turtle_groups_subjects() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("ttl")).unwrap();
    let output = write_all(
        &mut serializer,
        None,
        &[("ex", "http://example.org/")],
        &person_triples(),
    );
    assert_eq!(
        output,
        "@prefix ex: <http://example.org/> .\n\
         ex:alice a ex:Person ;\n    ex:name \"Alice\"@en .\n\
         _:b1 ex:knows ex:alice .\n"
    );
}

#[test]
fn test_turtle_relative_uris_feature() {
    let registry = SerializerRegistry::with_builtins();
    let triples = [Triple::new(
        iri("http://example.org/base/x"),
        iri("http://example.org/base/p"),
        iri("http://example.org/base/y"),
    )];

    let mut relative = Serializer::new(&registry, Some("turtle")).unwrap();
    let output = write_all(&mut relative, Some("http://example.org/base/"), &[], &triples);
    assert_eq!(output, "@base <http://example.org/base/> .\n<x> <p> <y> .\n");

    let mut absolute = Serializer::new(&registry, Some("turtle")).unwrap();
    absolute.set_feature(Feature::RelativeUris, 0).unwrap();
    let output = write_all(&mut absolute, Some("http://example.org/base/"), &[], &triples);
    assert!(output.contains(
        "<http://example.org/base/x> <http://example.org/base/p> <http://example.org/base/y> .\n"
    ));
}

#[test]
fn test_turtle_prefix_declared_before_start() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("turtle")).unwrap();
    serializer
        .set_namespace("http://example.org/", Some("ex"))
        .unwrap();
    let output = write_all(&mut serializer, None, &[], &person_triples()[2..]);
    assert_eq!(
        output,
        "@prefix ex: <http://example.org/> .\n_:b1 ex:knows ex:alice .\n"
    );
}

#[test]
fn test_rdfxml_document() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("rdf/xml")).unwrap();
    let output = write_all(
        &mut serializer,
        Some("http://example.org/"),
        &[("ex", "http://example.org/")],
        &person_triples(),
    );

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(output.contains("xmlns:ex=\"http://example.org/\""));
    assert!(output.contains("xml:base=\"http://example.org/\""));
    assert!(output.contains("rdf:about=\"alice\""));
    assert!(output.contains("<rdf:type rdf:resource=\"Person\"/>"));
    assert!(output.contains("<ex:name xml:lang=\"en\">Alice</ex:name>"));
    assert!(output.contains("rdf:nodeID=\"b1\""));
    assert_eq!(output.matches("<rdf:Description").count(), 2);
    assert!(output.ends_with("</rdf:RDF>\n"));
}

#[test]
fn test_rdfxml_declaration_features() {
    let registry = SerializerRegistry::with_builtins();

    let mut versioned = Serializer::new(&registry, Some("rdfxml")).unwrap();
    versioned.set_feature(Feature::WriterXmlVersion, 11).unwrap();
    let output = write_all(&mut versioned, None, &[], &[]);
    assert!(output.starts_with("<?xml version=\"1.1\" encoding=\"utf-8\"?>"));

    let mut bare = Serializer::new(&registry, Some("rdfxml")).unwrap();
    bare.set_feature(Feature::WriterXmlDeclaration, 0).unwrap();
    let output = write_all(&mut bare, None, &[], &[]);
    assert!(output.starts_with("<rdf:RDF"));
}

#[test]
fn test_dot_graph() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("graphviz")).unwrap();
    serializer
        .set_feature_string(Feature::ResourceFill, "yellow")
        .unwrap();
    serializer
        .set_feature_string(Feature::LiteralBorder, "red")
        .unwrap();
    let output = write_all(
        &mut serializer,
        None,
        &[("ex", "http://example.org/")],
        &person_triples(),
    );

    assert!(output.starts_with("digraph {\n"));
    assert!(output.contains(
        "\t\"Rhttp://example.org/alice\" -> \"L0\" [ label=\"ex:name\" ];\n"
    ));
    assert!(output.contains(
        "\t\"Rhttp://example.org/alice\" [ label=\"ex:alice\", shape = ellipse, style = filled, fillcolor=yellow ];\n"
    ));
    assert!(output.contains("\t\"Bb1\" [ label=\"b1\", shape = circle ];\n"));
    assert!(
        output.contains("\t\"L0\" [ label=\"Alice|en\", shape = record, color=red ];\n")
    );
    assert!(output.contains("Model:\\n(Unknown)"));
    assert!(output.contains("Namespaces:\\nex: http://example.org/\\n"));
    assert!(output.ends_with("\";\n}\n"));
}

#[test]
fn test_dot_keeps_distinct_literals_with_equal_labels() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("dot")).unwrap();
    let triples = [
        Triple::new(
            iri("http://e/s"),
            iri("http://e/p"),
            Literal::new_simple_literal("a|en"),
        ),
        Triple::new(
            iri("http://e/s"),
            iri("http://e/p"),
            Literal::new_language_tagged_literal("a", "en").unwrap(),
        ),
    ];
    let output = write_all(&mut serializer, None, &[], &triples);

    assert!(output.contains("\t\"Rhttp://e/s\" -> \"L0\" [ label=\"http://e/p\" ];\n"));
    assert!(output.contains("\t\"Rhttp://e/s\" -> \"L1\" [ label=\"http://e/p\" ];\n"));
    assert!(output.contains("\t\"L0\" [ label=\"a|en\", shape = record ];\n"));
    assert!(output.contains("\t\"L1\" [ label=\"a|en\", shape = record ];\n"));
}

#[test]
fn test_rdfxml_ignores_rdf_prefix_for_other_namespace() {
    let registry = SerializerRegistry::with_builtins();
    let mut serializer = Serializer::new(&registry, Some("rdfxml")).unwrap();
    let warnings = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = warnings.clone();
    serializer.set_warning_handler(move |diagnostic| {
        sink.lock().push(diagnostic.message().to_string())
    });

    let output = write_all(
        &mut serializer,
        None,
        &[("rdf", "http://example.org/other#")],
        &[Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/other#p"),
            Literal::new_simple_literal("v"),
        )],
    );

    assert!(!output.contains("<rdf:p"), "{output}");
    assert!(output.contains("<p xmlns=\"http://example.org/other#\">v</p>"), "{output}");
    assert_eq!(warnings.lock().len(), 1);
    assert!(warnings.lock()[0].contains("rdf"));
}
