use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::extractor::{Hierarchy, RemovedEdge};
use crate::ontology::entities::HierarchyEntity;

/// Serializable view of a [`Hierarchy`] handed to tree and graph renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySnapshot {
    pub roots: Vec<String>,
    pub children: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_edges: Vec<RemovedEdge>,
}

impl<'a, E: HierarchyEntity> From<&Hierarchy<'a, E>> for HierarchySnapshot {
    fn from(hierarchy: &Hierarchy<'a, E>) -> Self {
        Self {
            roots: hierarchy
                .roots()
                .iter()
                .map(|root| root.iri().to_string())
                .collect(),
            children: hierarchy
                .children()
                .iter()
                .map(|(parent, children)| {
                    (
                        (*parent).to_string(),
                        children.iter().map(|child| child.iri().to_string()).collect(),
                    )
                })
                .collect(),
            removed_edges: hierarchy.removed_edges().to_vec(),
        }
    }
}
