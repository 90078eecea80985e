use serde::{Deserialize, Serialize};

use super::value_objects::Iri;

/// Raw parent reference as found on an ontology entity.
///
/// Named references point at another entity by identifier. Anything else
/// (restrictions, anonymous class expressions and other blank-node shapes)
/// is kept verbatim and takes no part in hierarchy construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentReference {
    /// Reference to another entity by identifier. Not validated.
    Named(String),
    /// Structural value without an identifier.
    Anonymous(serde_json::Value),
}

impl ParentReference {
    /// Returns the referenced identifier for named references.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Named(iri) => Some(iri.as_str()),
            Self::Anonymous(_) => None,
        }
    }
}

/// Contract the hierarchy extractor needs from an entity.
///
/// Callers holding their own entity model implement this instead of
/// converting into [`Entity`].
pub trait HierarchyEntity {
    /// Stable unique identifier of the entity.
    fn iri(&self) -> &str;

    /// Parent references in declaration order.
    fn parent_references(&self) -> &[ParentReference];
}

impl<T: HierarchyEntity + ?Sized> HierarchyEntity for &T {
    fn iri(&self) -> &str {
        (**self).iri()
    }

    fn parent_references(&self) -> &[ParentReference] {
        (**self).parent_references()
    }
}

/// Ontology entity (class, property or individual) with its declared parents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    iri: Iri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    parents: Vec<ParentReference>,
}

impl Entity {
    /// Creates a new [`Entity`] without parents.
    #[must_use]
    pub fn new(iri: Iri) -> Self {
        Self {
            iri,
            label: None,
            parents: Vec::new(),
        }
    }

    /// Sets a human friendly label for the entity.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Appends a named parent reference.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(ParentReference::Named(parent.into()));
        self
    }

    /// Appends a structural parent reference.
    #[must_use]
    pub fn with_anonymous_parent(mut self, value: serde_json::Value) -> Self {
        self.parents.push(ParentReference::Anonymous(value));
        self
    }

    /// Returns the optional label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the label, falling back to the identifier's local name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label().unwrap_or_else(|| self.iri.local_name())
    }

    /// Returns the parent references in declaration order.
    #[must_use]
    pub fn parents(&self) -> &[ParentReference] {
        &self.parents
    }
}

impl HierarchyEntity for Entity {
    fn iri(&self) -> &str {
        self.iri.as_str()
    }

    fn parent_references(&self) -> &[ParentReference] {
        &self.parents
    }
}
