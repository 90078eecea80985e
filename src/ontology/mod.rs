//! Ontology entity primitives consumed by the hierarchy extractor.
//!
//! Entities are treated as already materialized input: an identifier plus the
//! raw parent references declared on it. Label lookups, storage and transport
//! belong to the callers.

pub mod entities;
pub mod value_objects;

pub use entities::{Entity, HierarchyEntity, ParentReference};
pub use value_objects::{Iri, IriError, UniversalRoots, OWL_THING, OWL_TOP_OBJECT_PROPERTY};
