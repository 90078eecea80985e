use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the top-of-everything class.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

/// Identifier of the top-of-everything object property, spelled as the
/// ontology index emits it.
pub const OWL_TOP_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#TopObjectProperty";

/// Value object ensuring that supplied text represents a valid IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// Entity identifiers must be absolute IRIs; parent references are kept
    /// as raw text and never go through this constructor.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the trailing path segment, useful as a fallback display name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.value
            .rsplit(|c: char| c == '/' || c == '#')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.value)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Borrow<str> for Iri {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.value
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// Sentinel identifiers standing for "no real parent".
///
/// Entities carrying one of these identifiers never show up in an extracted
/// hierarchy, and an edge pointing at one turns the child into a root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniversalRoots {
    iris: BTreeSet<Iri>,
}

impl UniversalRoots {
    /// Builds a sentinel set from already validated identifiers.
    #[must_use]
    pub fn new(iris: impl IntoIterator<Item = Iri>) -> Self {
        Self {
            iris: iris.into_iter().collect(),
        }
    }

    /// Returns `true` when `iri` is one of the sentinels.
    #[must_use]
    pub fn contains(&self, iri: &str) -> bool {
        self.iris.contains(iri)
    }

    /// Iterates over the sentinels in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &Iri> {
        self.iris.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iris.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iris.is_empty()
    }
}

impl Default for UniversalRoots {
    fn default() -> Self {
        Self {
            iris: BTreeSet::from([
                Iri {
                    value: OWL_THING.to_owned(),
                },
                Iri {
                    value: OWL_TOP_OBJECT_PROPERTY.to_owned(),
                },
            ]),
        }
    }
}
