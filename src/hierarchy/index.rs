use std::collections::{hash_map::Entry, HashMap};

use tracing::{debug, warn};

use crate::ontology::{entities::HierarchyEntity, value_objects::UniversalRoots};

/// Dense handle for a distinct identifier in the input.
pub(crate) type NodeId = usize;

/// Mirrored parent/child adjacency built once per extraction.
///
/// Nodes are distinct identifiers. When several entities share an identifier
/// all of them contribute edges to the same node, and each child edge remembers
/// the input position of the entity that first declared it.
#[derive(Clone, Debug)]
pub(crate) struct HierarchyIndex<'a> {
    identifiers: Vec<&'a str>,
    sentinel: Vec<bool>,
    parents: Vec<Vec<NodeId>>,
    children: Vec<Vec<NodeId>>,
    // aligned with `children`: declaring entity of each child edge
    declared_by: Vec<Vec<usize>>,
    positions: Vec<NodeId>,
}

impl<'a> HierarchyIndex<'a> {
    pub(crate) fn build<E: HierarchyEntity>(
        entities: &'a [E],
        universal_roots: &UniversalRoots,
    ) -> Self {
        let mut lookup: HashMap<&'a str, NodeId> = HashMap::with_capacity(entities.len());
        let mut index = Self {
            identifiers: Vec::with_capacity(entities.len()),
            sentinel: Vec::with_capacity(entities.len()),
            parents: Vec::with_capacity(entities.len()),
            children: Vec::with_capacity(entities.len()),
            declared_by: Vec::with_capacity(entities.len()),
            positions: Vec::with_capacity(entities.len()),
        };

        for (position, entity) in entities.iter().enumerate() {
            let iri = entity.iri();
            let node = match lookup.entry(iri) {
                Entry::Occupied(slot) => {
                    warn!(iri = %iri, "hierarchy_duplicate_identifier");
                    *slot.get()
                }
                Entry::Vacant(slot) => {
                    let node = index.identifiers.len();
                    index.identifiers.push(iri);
                    index.sentinel.push(universal_roots.contains(iri));
                    index.parents.push(Vec::new());
                    index.children.push(Vec::new());
                    index.declared_by.push(Vec::new());
                    slot.insert(node);
                    node
                }
            };
            index.positions.push(node);
        }

        for (position, entity) in entities.iter().enumerate() {
            let child = index.positions[position];
            if index.sentinel[child] {
                continue;
            }
            for reference in entity.parent_references() {
                // anonymous references (restrictions, class expressions) carry no identifier
                let Some(parent_iri) = reference.as_iri() else {
                    continue;
                };
                let Some(&parent) = lookup.get(parent_iri) else {
                    debug!(child = %entity.iri(), parent = %parent_iri, "hierarchy_parent_unresolved");
                    continue;
                };
                if index.sentinel[parent] {
                    continue;
                }
                index.link(child, parent, position);
            }
        }

        index
    }

    fn link(&mut self, child: NodeId, parent: NodeId, declared_at: usize) {
        if self.parents[child].contains(&parent) {
            return;
        }
        self.parents[child].push(parent);
        self.children[parent].push(child);
        self.declared_by[parent].push(declared_at);
    }

    /// Removes `child -> parent` together with its mirror.
    ///
    /// # Panics
    ///
    /// Panics when either adjacency list lacks the edge, which means the two
    /// lists drifted apart.
    pub(crate) fn unlink(&mut self, child: NodeId, parent: NodeId) {
        let upward = self.parents[child].iter().position(|&p| p == parent);
        let downward = self.children[parent].iter().position(|&c| c == child);
        let (Some(upward), Some(downward)) = (upward, downward) else {
            panic!(
                "hierarchy index out of sync on edge {} -> {} (parent entry: {}, child entry: {})",
                self.identifiers[child],
                self.identifiers[parent],
                upward.is_some(),
                downward.is_some()
            );
        };
        self.parents[child].remove(upward);
        self.children[parent].remove(downward);
        self.declared_by[parent].remove(downward);
    }

    pub(crate) fn node_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Node of the entity at `position` in the input.
    pub(crate) fn node_at(&self, position: usize) -> NodeId {
        self.positions[position]
    }

    pub(crate) fn input_len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn identifier(&self, node: NodeId) -> &'a str {
        self.identifiers[node]
    }

    /// Input positions of the entities that declared each child edge of
    /// `node`, aligned with [`Self::children_of`].
    pub(crate) fn child_declarations(&self, node: NodeId) -> &[usize] {
        &self.declared_by[node]
    }

    pub(crate) fn is_sentinel(&self, node: NodeId) -> bool {
        self.sentinel[node]
    }

    pub(crate) fn parents_of(&self, node: NodeId) -> &[NodeId] {
        &self.parents[node]
    }

    pub(crate) fn children_of(&self, node: NodeId) -> &[NodeId] {
        &self.children[node]
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.parents.iter().map(Vec::len).sum()
    }
}
