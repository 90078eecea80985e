//! Configuration for hierarchy extraction.
//!
//! Settings are read from YAML:
//!
//! ```yaml
//! universal_roots:
//!   - http://www.w3.org/2002/07/owl#Thing
//!   - http://www.w3.org/2002/07/owl#TopObjectProperty
//! ```
//!
//! Omitting `universal_roots` keeps the two OWL defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::ontology::value_objects::{
    Iri, IriError, UniversalRoots, OWL_THING, OWL_TOP_OBJECT_PROPERTY,
};

/// Hierarchy extraction settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySettings {
    /// Identifiers treated as "top of everything".
    #[serde(default = "default_universal_roots")]
    pub universal_roots: Vec<String>,
}

fn default_universal_roots() -> Vec<String> {
    vec![OWL_THING.to_string(), OWL_TOP_OBJECT_PROPERTY.to_string()]
}

impl Default for HierarchySettings {
    fn default() -> Self {
        Self {
            universal_roots: default_universal_roots(),
        }
    }
}

impl HierarchySettings {
    /// Parses settings from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads and parses a YAML settings file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Validates the configured sentinels.
    pub fn universal_roots(&self) -> Result<UniversalRoots, ConfigError> {
        if self.universal_roots.is_empty() {
            return Err(ConfigError::EmptyUniversalRoots);
        }
        let iris = self
            .universal_roots
            .iter()
            .map(|value| Iri::new(value.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UniversalRoots::new(iris))
    }
}

/// Errors raised while loading [`HierarchySettings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read hierarchy settings `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The settings document is not valid YAML for [`HierarchySettings`].
    #[error("invalid hierarchy settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A configured sentinel is not a valid IRI.
    #[error("invalid universal root: {0}")]
    InvalidUniversalRoot(#[from] IriError),
    /// The sentinel list was explicitly emptied.
    #[error("at least one universal root must be configured")]
    EmptyUniversalRoots,
}
