use super::extractor::Hierarchy;
use crate::ontology::entities::HierarchyEntity;

/// Entity visited by a [`HierarchyWalk`] together with its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep<'a, E> {
    /// Zero for roots.
    pub depth: usize,
    pub entity: &'a E,
}

/// Depth-first, pre-order iterator over a [`Hierarchy`].
///
/// An entity with several parents is visited once under each of them, the
/// way a tree view expands it.
pub struct HierarchyWalk<'h, 'a, E> {
    hierarchy: &'h Hierarchy<'a, E>,
    stack: Vec<(usize, &'a E)>,
}

impl<'h, 'a, E: HierarchyEntity> HierarchyWalk<'h, 'a, E> {
    pub(crate) fn new(hierarchy: &'h Hierarchy<'a, E>) -> Self {
        let stack = hierarchy
            .roots()
            .iter()
            .rev()
            .map(|&root| (0, root))
            .collect();
        Self { hierarchy, stack }
    }
}

impl<'h, 'a, E: HierarchyEntity> Iterator for HierarchyWalk<'h, 'a, E> {
    type Item = WalkStep<'a, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, entity) = self.stack.pop()?;
        self.stack.extend(
            self.hierarchy
                .children_of(entity.iri())
                .iter()
                .rev()
                .map(|&child| (depth + 1, child)),
        );
        Some(WalkStep { depth, entity })
    }
}
