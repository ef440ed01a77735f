//! Built-in syntax writers
//!
//! Each module provides a factory and the descriptor it is registered under.

pub mod dot;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use crate::registry::SerializerRegistry;

pub use dot::DotFactory;
pub use ntriples::NTriplesFactory;
pub use rdfxml::RdfXmlFactory;
pub use turtle::TurtleFactory;

/// Register the built-in syntaxes in their canonical order
pub fn register_builtins(registry: &mut SerializerRegistry) {
    registry.register(ntriples::descriptor(), NTriplesFactory);
    registry.register(turtle::descriptor(), TurtleFactory);
    registry.register(rdfxml::descriptor(), RdfXmlFactory);
    registry.register(dot::descriptor(), DotFactory);
}
