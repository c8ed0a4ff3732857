//! Declared dependencies.
//!
//! Notation accepted in `native.toml`:
//!   - `group:module:version`, `group:module` or `module`: a published module
//!   - `:path:to:project`: a sibling project
//!   - `library:<project>/<library>/<variant>`: one binary of a library

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::component::ComponentIdentifier;
use crate::error::BuildError;

/// A dependency selector, as declared by a build unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependency {
    /// Empty `group` or `version` match any value.
    Module {
        group: String,
        module: String,
        version: String,
    },
    Project {
        path: String,
    },
    Library {
        project_path: String,
        library_name: String,
        variant: String,
    },
}

impl Dependency {
    /// Does this selector pick the given component?
    pub fn selects(&self, id: &ComponentIdentifier) -> bool {
        match (self, id) {
            (
                Dependency::Module {
                    group,
                    module,
                    version,
                },
                ComponentIdentifier::Module {
                    group: g,
                    module: m,
                    version: v,
                },
            ) => {
                module == m
                    && (group.is_empty() || group == g)
                    && (version.is_empty() || version == v)
            }
            (Dependency::Project { path }, ComponentIdentifier::Project { path: p }) => path == p,
            (
                Dependency::Library {
                    project_path,
                    library_name,
                    variant,
                },
                ComponentIdentifier::LibraryBinary {
                    project_path: pp,
                    library_name: ln,
                    variant: v,
                },
            ) => project_path == pp && library_name == ln && variant == v,
            _ => false,
        }
    }
}

impl FromStr for Dependency {
    type Err = BuildError;

    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BuildError::InvalidDependency {
            notation: notation.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = notation.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty notation"));
        }

        if let Some(rest) = trimmed.strip_prefix("library:") {
            let parts: Vec<&str> = rest.split('/').collect();
            if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
                return Err(invalid("expected library:<project>/<library>/<variant>"));
            }
            return Ok(Dependency::Library {
                project_path: parts[0].to_string(),
                library_name: parts[1].to_string(),
                variant: parts[2].to_string(),
            });
        }

        if trimmed.starts_with(':') {
            if trimmed.split(':').skip(1).any(|seg| seg.is_empty()) && trimmed != ":" {
                return Err(invalid("project path has an empty segment"));
            }
            return Ok(Dependency::Project {
                path: trimmed.to_string(),
            });
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("module coordinates have an empty segment"));
        }
        let (group, module, version) = match parts.as_slice() {
            [module] => ("", *module, ""),
            [group, module] => (*group, *module, ""),
            [group, module, version] => (*group, *module, *version),
            _ => return Err(invalid("expected group:module:version")),
        };
        Ok(Dependency::Module {
            group: group.to_string(),
            module: module.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Module {
                group,
                module,
                version,
            } => {
                if !group.is_empty() {
                    write!(f, "{}:", group)?;
                }
                write!(f, "{}", module)?;
                if !version.is_empty() {
                    write!(f, ":{}", version)?;
                }
                Ok(())
            }
            Dependency::Project { path } => write!(f, "{}", path),
            Dependency::Library {
                project_path,
                library_name,
                variant,
            } => write!(f, "library:{}/{}/{}", project_path, library_name, variant),
        }
    }
}

/// A named, ordered, duplicate-free set of declared dependencies.
///
/// Immutable once built; channels share it through `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencySet {
    name: String,
    dependencies: Vec<Dependency>,
}

impl DependencySet {
    pub fn builder(name: &str) -> DependencySetBuilder {
        DependencySetBuilder {
            name: name.to_string(),
            dependencies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.dependencies.contains(dependency)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

pub struct DependencySetBuilder {
    name: String,
    dependencies: Vec<Dependency>,
}

impl DependencySetBuilder {
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    /// Parse and add a dependency notation.
    pub fn notation(self, notation: &str) -> Result<Self, BuildError> {
        Ok(self.dependency(notation.parse()?))
    }

    pub fn build(self) -> Arc<DependencySet> {
        Arc::new(DependencySet {
            name: self.name,
            dependencies: self.dependencies,
        })
    }
}
