//! Ontology entity hierarchy extraction.
//!
//! Converts a flat list of ontology entities, each declaring parent
//! references, into a forest of root entities plus a parent-to-children
//! mapping that tree and graph views render directly.
//!
//! ```
//! use entity_hierarchy::{extract_hierarchy, Entity, Iri, OWL_THING};
//!
//! let entities = vec![
//!     Entity::new(Iri::new("https://example.org/Animal").unwrap()).with_parent(OWL_THING),
//!     Entity::new(Iri::new("https://example.org/Dog").unwrap())
//!         .with_parent("https://example.org/Animal"),
//! ];
//!
//! let hierarchy = extract_hierarchy(&entities);
//! assert_eq!(hierarchy.roots().len(), 1);
//! assert_eq!(hierarchy.children_of("https://example.org/Animal").len(), 1);
//! ```

pub mod config;
pub mod hierarchy;
pub mod ontology;

pub use config::{ConfigError, HierarchySettings};
pub use hierarchy::{
    extract_hierarchy, Hierarchy, HierarchyExtractor, HierarchySnapshot, HierarchyWalk,
    RemovedEdge, WalkStep,
};
pub use ontology::{
    Entity, HierarchyEntity, Iri, IriError, ParentReference, UniversalRoots, OWL_THING,
    OWL_TOP_OBJECT_PROPERTY,
};
