//! Producer identifiers and their classification into module names.
//!
//! A module name is derived from what produced an artifact, never from the
//! artifact's file name, so every artifact of one component lands in the
//! same module map.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Identifies the component that produced a resolved artifact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ComponentIdentifier {
    /// An externally published library, addressed by coordinates.
    Module {
        group: String,
        module: String,
        version: String,
    },
    /// A sibling build unit, addressed by its `:`-separated path.
    Project { path: String },
    /// One binary variant of a library declared by a project.
    LibraryBinary {
        project_path: String,
        library_name: String,
        variant: String,
    },
    /// A producer of a kind this layer does not know how to name.
    Unknown {
        #[serde(rename = "type")]
        kind: String,
        display_name: String,
    },
}

impl ComponentIdentifier {
    pub fn module(group: &str, module: &str, version: &str) -> Self {
        ComponentIdentifier::Module {
            group: group.to_string(),
            module: module.to_string(),
            version: version.to_string(),
        }
    }

    pub fn project(path: &str) -> Self {
        ComponentIdentifier::Project {
            path: path.to_string(),
        }
    }

    pub fn library_binary(project_path: &str, library_name: &str, variant: &str) -> Self {
        ComponentIdentifier::LibraryBinary {
            project_path: project_path.to_string(),
            library_name: library_name.to_string(),
            variant: variant.to_string(),
        }
    }

    /// Human-readable form used in diagnostics.
    pub fn display_name(&self) -> String {
        match self {
            ComponentIdentifier::Module {
                group,
                module,
                version,
            } => {
                let mut s = String::new();
                if !group.is_empty() {
                    s.push_str(group);
                    s.push(':');
                }
                s.push_str(module);
                if !version.is_empty() {
                    s.push(':');
                    s.push_str(version);
                }
                s
            }
            ComponentIdentifier::Project { path } => format!("project {}", path),
            ComponentIdentifier::LibraryBinary {
                project_path,
                library_name,
                variant,
            } => format!(
                "project {} library {} variant {}",
                project_path, library_name, variant
            ),
            ComponentIdentifier::Unknown { display_name, .. } => display_name.clone(),
        }
    }

    /// Concrete identifier kind.
    pub fn kind(&self) -> &str {
        match self {
            ComponentIdentifier::Module { .. } => "ModuleComponentIdentifier",
            ComponentIdentifier::Project { .. } => "ProjectComponentIdentifier",
            ComponentIdentifier::LibraryBinary { .. } => "LibraryBinaryIdentifier",
            ComponentIdentifier::Unknown { kind, .. } => kind.as_str(),
        }
    }
}

impl fmt::Display for ComponentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Last segment of a project path: `:libs:core` → `core`, `:` → `` .
pub fn project_name(path: &str) -> &str {
    path.rsplit(':').next().unwrap_or(path)
}

/// Derive the module name for a producer.
///
/// Total over the known identifier kinds; an `Unknown` producer is an
/// error, never a fallback name.
pub fn classify(id: &ComponentIdentifier) -> Result<&str, BuildError> {
    match id {
        ComponentIdentifier::Module { module, .. } => Ok(module.as_str()),
        ComponentIdentifier::Project { path } => Ok(project_name(path)),
        ComponentIdentifier::LibraryBinary { library_name, .. } => Ok(library_name.as_str()),
        ComponentIdentifier::Unknown { .. } => Err(BuildError::UnclassifiableProducer {
            display_name: id.display_name(),
            kind: id.kind().to_string(),
        }),
    }
}
