//! Hierarchy extraction: flat entity lists to root/children forests.
//!
//! Extraction runs in three passes over indices built fresh for each call:
//! parent references are resolved into mirrored parent/child adjacency,
//! cycles are broken by cutting back edges found while walking ancestors, and
//! entities left without parents become roots. Universal-root sentinels never
//! appear in the result.

mod cycles;
mod extractor;
mod index;
mod snapshot;
mod walk;

pub use extractor::{extract_hierarchy, Hierarchy, HierarchyExtractor, RemovedEdge};
pub use snapshot::HierarchySnapshot;
pub use walk::{HierarchyWalk, WalkStep};
