use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    cycles::break_cycles,
    index::HierarchyIndex,
    snapshot::HierarchySnapshot,
    walk::HierarchyWalk,
};
use crate::{
    config::{ConfigError, HierarchySettings},
    ontology::{entities::HierarchyEntity, value_objects::UniversalRoots},
};

/// Unflattens entity lists into a cycle-free forest.
#[derive(Clone, Debug, Default)]
pub struct HierarchyExtractor {
    universal_roots: UniversalRoots,
}

impl HierarchyExtractor {
    /// Creates an extractor excluding the supplied sentinels.
    #[must_use]
    pub fn new(universal_roots: UniversalRoots) -> Self {
        Self { universal_roots }
    }

    /// Creates an extractor from validated settings.
    pub fn from_settings(settings: &HierarchySettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.universal_roots()?))
    }

    /// Returns the sentinels this extractor excludes.
    #[must_use]
    pub fn universal_roots(&self) -> &UniversalRoots {
        &self.universal_roots
    }

    /// Splits `entities` into root entities and a child mapping.
    ///
    /// Parent references that are anonymous, dangling or point at a sentinel
    /// are ignored, and cycles are broken by cutting the edge that re-enters
    /// the ancestor path being walked. Roots keep input order; children keep
    /// the input order of the child entities. With duplicate identifiers, a
    /// child entry is the entity that declared the edge.
    ///
    /// # Panics
    ///
    /// Panics if the internal parent and child indices drift apart, which
    /// signals a bug rather than malformed input.
    pub fn extract<'a, E: HierarchyEntity>(&self, entities: &'a [E]) -> Hierarchy<'a, E> {
        let mut index = HierarchyIndex::build(entities, &self.universal_roots);
        let cuts = break_cycles(&mut index);

        let roots: Vec<&'a E> = entities
            .iter()
            .enumerate()
            .filter(|&(position, _)| {
                let node = index.node_at(position);
                !index.is_sentinel(node) && index.parents_of(node).is_empty()
            })
            .map(|(_, entity)| entity)
            .collect();

        let mut children: BTreeMap<&'a str, Vec<&'a E>> = BTreeMap::new();
        for node in 0..index.node_count() {
            let declarations = index.child_declarations(node);
            if declarations.is_empty() {
                continue;
            }
            children.insert(
                index.identifier(node),
                declarations
                    .iter()
                    .map(|&position| &entities[position])
                    .collect(),
            );
        }

        let removed_edges: Vec<RemovedEdge> = cuts
            .into_iter()
            .map(|(child, parent)| RemovedEdge {
                child: index.identifier(child).to_string(),
                parent: index.identifier(parent).to_string(),
            })
            .collect();

        debug!(
            entities = entities.len(),
            roots = roots.len(),
            edges = index.edge_count(),
            removed_edges = removed_edges.len(),
            "hierarchy_extracted"
        );

        Hierarchy {
            roots,
            children,
            removed_edges,
        }
    }
}

/// Extracts a hierarchy excluding the default OWL sentinels.
pub fn extract_hierarchy<E: HierarchyEntity>(entities: &[E]) -> Hierarchy<'_, E> {
    HierarchyExtractor::default().extract(entities)
}

/// Parent edge cut while breaking a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedEdge {
    pub child: String,
    pub parent: String,
}

/// Forest extracted from an entity list, borrowing the entities.
#[derive(Debug)]
pub struct Hierarchy<'a, E> {
    roots: Vec<&'a E>,
    children: BTreeMap<&'a str, Vec<&'a E>>,
    removed_edges: Vec<RemovedEdge>,
}

impl<'a, E: HierarchyEntity> Hierarchy<'a, E> {
    /// Entities without a surviving parent, in input order.
    #[must_use]
    pub fn roots(&self) -> &[&'a E] {
        &self.roots
    }

    /// Direct children of `iri`; empty when it has none.
    #[must_use]
    pub fn children_of(&self, iri: &str) -> &[&'a E] {
        self.children.get(iri).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every parent identifier with at least one child.
    #[must_use]
    pub fn children(&self) -> &BTreeMap<&'a str, Vec<&'a E>> {
        &self.children
    }

    #[must_use]
    pub fn is_root(&self, iri: &str) -> bool {
        self.roots.iter().any(|root| root.iri() == iri)
    }

    /// Edges cut to break cycles, in cut order.
    #[must_use]
    pub fn removed_edges(&self) -> &[RemovedEdge] {
        &self.removed_edges
    }

    /// Number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order walk over the forest.
    #[must_use]
    pub fn walk(&self) -> HierarchyWalk<'_, 'a, E> {
        HierarchyWalk::new(self)
    }

    /// Owned, serializable copy of the forest keyed by identifier.
    #[must_use]
    pub fn snapshot(&self) -> HierarchySnapshot {
        HierarchySnapshot::from(self)
    }
}
