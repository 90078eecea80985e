//! Cycle breaking over the parent index.
//!
//! Every input entity seeds a depth-first walk up its ancestors. A parent that
//! is already on the current path closes a cycle, and the edge leading back to
//! it is cut. Seeds are taken in input order and parents in declaration order,
//! so the cut edge is fully determined by the input.
//!
//! The walk keeps an explicit stack. A node whose walk has finished has an
//! acyclic ancestry, so later walks skip it: no edge above it can ever close a
//! cycle on a path passing through it.

use tracing::debug;

use super::index::{HierarchyIndex, NodeId};

struct Frame {
    node: NodeId,
    // parents as they were when the node was entered
    parents: Vec<NodeId>,
    next: usize,
}

impl Frame {
    fn enter(index: &HierarchyIndex<'_>, node: NodeId) -> Self {
        Self {
            node,
            parents: index.parents_of(node).to_vec(),
            next: 0,
        }
    }
}

/// Removes back edges until the parent index is acyclic.
///
/// Returns the cut edges as `(child, parent)` pairs in the order they were cut.
pub(crate) fn break_cycles(index: &mut HierarchyIndex<'_>) -> Vec<(NodeId, NodeId)> {
    let mut removed = Vec::new();
    let mut on_path = vec![false; index.node_count()];
    let mut settled = vec![false; index.node_count()];
    let mut stack: Vec<Frame> = Vec::new();

    for position in 0..index.input_len() {
        let seed = index.node_at(position);
        if settled[seed] {
            continue;
        }
        on_path[seed] = true;
        stack.push(Frame::enter(index, seed));

        while let Some(frame) = stack.last_mut() {
            let Some(&parent) = frame.parents.get(frame.next) else {
                on_path[frame.node] = false;
                settled[frame.node] = true;
                stack.pop();
                continue;
            };
            frame.next += 1;
            let child = frame.node;

            if on_path[parent] {
                debug!(
                    child = %index.identifier(child),
                    parent = %index.identifier(parent),
                    "hierarchy_cycle_edge_removed"
                );
                index.unlink(child, parent);
                removed.push((child, parent));
            } else if !settled[parent] {
                on_path[parent] = true;
                stack.push(Frame::enter(index, parent));
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::break_cycles;
    use crate::hierarchy::index::{HierarchyIndex, NodeId};
    use crate::ontology::{
        entities::Entity,
        value_objects::{Iri, UniversalRoots},
    };

    fn name(i: usize) -> String {
        format!("https://example.org/n{i}")
    }

    fn graph(parent_lists: &[Vec<usize>]) -> Vec<Entity> {
        parent_lists
            .iter()
            .enumerate()
            .map(|(i, parents)| {
                parents.iter().fold(
                    Entity::new(Iri::new(name(i)).expect("valid iri")),
                    |entity, &parent| entity.with_parent(name(parent)),
                )
            })
            .collect()
    }

    fn cut_names(index: &HierarchyIndex<'_>, cuts: &[(NodeId, NodeId)]) -> Vec<(String, String)> {
        cuts.iter()
            .map(|&(child, parent)| {
                (
                    index.identifier(child).to_string(),
                    index.identifier(parent).to_string(),
                )
            })
            .collect()
    }

    /// Unpruned recursive walk with a fresh visited set per step.
    fn reference_walk(
        index: &mut HierarchyIndex<'_>,
        node: NodeId,
        mut visited: HashSet<NodeId>,
        removed: &mut Vec<(NodeId, NodeId)>,
    ) {
        visited.insert(node);
        for parent in index.parents_of(node).to_vec() {
            if visited.contains(&parent) {
                index.unlink(node, parent);
                removed.push((node, parent));
            } else {
                reference_walk(index, parent, visited.clone(), removed);
            }
        }
    }

    fn reference_break_cycles(index: &mut HierarchyIndex<'_>) -> Vec<(NodeId, NodeId)> {
        let mut removed = Vec::new();
        for position in 0..index.input_len() {
            let seed = index.node_at(position);
            reference_walk(index, seed, HashSet::new(), &mut removed);
        }
        removed
    }

    fn has_cycle(index: &HierarchyIndex<'_>) -> bool {
        // Kahn: every node drains iff the parent graph is acyclic
        let mut pending: Vec<usize> = (0..index.node_count())
            .map(|node| index.parents_of(node).len())
            .collect();
        let mut ready: Vec<NodeId> = (0..index.node_count())
            .filter(|&node| pending[node] == 0)
            .collect();
        let mut drained = 0;
        while let Some(node) = ready.pop() {
            drained += 1;
            for &child in index.children_of(node) {
                pending[child] -= 1;
                if pending[child] == 0 {
                    ready.push(child);
                }
            }
        }
        drained != index.node_count()
    }

    #[test]
    fn cuts_self_reference() {
        let entities = graph(&[vec![0]]);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(0), name(0))]);
        assert_eq!(index.edge_count(), 0);
    }

    #[test]
    fn cuts_back_edge_of_two_cycle() {
        // n0 -> n1 -> n0; the walk from n0 reaches n1 and finds n0 on the path
        let entities = graph(&[vec![1], vec![0]]);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(1), name(0))]);
        assert_eq!(index.parents_of(index.node_at(0)), &[index.node_at(1)]);
        assert!(index.parents_of(index.node_at(1)).is_empty());
    }

    #[test]
    fn cut_depends_on_seed_order() {
        let entities = graph(&[vec![1], vec![2], vec![0]]);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(2), name(0))]);

        let mut reordered = entities.clone();
        reordered.rotate_left(1);
        let mut index = HierarchyIndex::build(&reordered, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(0), name(1))]);
    }

    #[test]
    fn keeps_diamonds_intact() {
        let entities = graph(&[vec![], vec![0], vec![0], vec![1, 2]]);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        assert!(break_cycles(&mut index).is_empty());
        assert_eq!(index.edge_count(), 4);
    }

    #[test]
    fn cuts_only_the_cycle_in_a_larger_graph() {
        // n3 -> n2 -> n1 -> n0 with an extra n1 -> n3 back reference;
        // seeding at n1 walks n1 -> n3 -> n2 and cuts n2 -> n1
        let entities = graph(&[vec![], vec![0, 3], vec![1], vec![2]]);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(2), name(1))]);
        assert_eq!(index.edge_count(), 3);
        assert!(!has_cycle(&index));
    }

    #[test]
    fn walks_deep_chains_without_recursion() {
        let depth = 200_000;
        let mut lists: Vec<Vec<usize>> = (0..depth).map(|i| vec![i + 1]).collect();
        lists.push(vec![0]);
        let entities = graph(&lists);
        let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
        let cuts = break_cycles(&mut index);
        assert_eq!(cut_names(&index, &cuts), vec![(name(depth), name(0))]);
        assert_eq!(index.edge_count(), depth);
    }

    fn parent_lists() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (1usize..10).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n, 0..4), n))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_matches_unpruned_recursive_walk(lists in parent_lists()) {
            let entities = graph(&lists);
            let mut pruned = HierarchyIndex::build(&entities, &UniversalRoots::default());
            let mut reference = pruned.clone();

            let cuts = break_cycles(&mut pruned);
            let expected = reference_break_cycles(&mut reference);

            prop_assert_eq!(&cuts, &expected);
            for node in 0..pruned.node_count() {
                prop_assert_eq!(pruned.parents_of(node), reference.parents_of(node));
                prop_assert_eq!(pruned.children_of(node), reference.children_of(node));
            }
        }

        #[test]
        fn prop_leaves_no_cycle(lists in parent_lists()) {
            let entities = graph(&lists);
            let mut index = HierarchyIndex::build(&entities, &UniversalRoots::default());
            let before = index.edge_count();
            let cuts = break_cycles(&mut index);
            prop_assert!(!has_cycle(&index));
            prop_assert_eq!(index.edge_count() + cuts.len(), before);
        }
    }
}
