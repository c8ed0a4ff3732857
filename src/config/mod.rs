//! Project description file (`native.toml`).
//!
//! ```toml
//! [project]
//! name = "app"
//! module = "App"            # default: project name in UpperCamelCase
//! build_dir = "build"
//! sources = ["Sources/main.swift"]
//!
//! [dependencies]
//! implementation = ["org.json:Json:1.0", ":core"]
//!
//! [[binary]]                # default: debug, release, test
//! name = "debug"
//! debuggable = true
//! optimized = false
//!
//! [[component]]             # local repository contents
//! kind = "project"
//! path = ":core"
//!
//! [[component.variant]]
//! name = "debugHeaders"
//! attributes = { usage = "swift-interface", debuggable = true, optimized = false, requires-module-map = true }
//! files = ["core/include"]
//! dependencies = ["org.json:Json"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::attribute::AttributeSet;
use crate::binary::BinaryIdentity;
use crate::component::ComponentIdentifier;
use crate::diagnostic::Diagnostic;
use crate::error::BuildError;
use crate::resolution::{Component, LocalRepository, Variant};

pub const MANIFEST_FILE_NAME: &str = "native.toml";

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub project: ProjectSection,
    #[serde(default)]
    pub dependencies: DependenciesSection,
    #[serde(default, rename = "binary")]
    pub binaries: Vec<BinaryIdentity>,
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentSection>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependenciesSection {
    #[serde(default)]
    pub implementation: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ComponentSection {
    #[serde(flatten)]
    pub id: ComponentIdentifier,
    #[serde(default, rename = "variant")]
    pub variants: Vec<VariantSection>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSection {
    pub name: String,
    #[serde(default)]
    pub attributes: toml::Table,
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Manifest, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a manifest; parse errors carry the offending byte range.
    pub fn load(path: &Path) -> Result<Manifest, Diagnostic> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Diagnostic::error(format!("cannot read '{}': {}", path.display(), e))
                .with_help("check that the file exists and is readable".to_string())
        })?;
        Self::parse(&content).map_err(|e| {
            let d = Diagnostic::error(format!("invalid {}: {}", MANIFEST_FILE_NAME, e.message()));
            match e.span() {
                Some(span) => d.with_span(&path.display().to_string(), &content, span),
                None => d,
            }
        })
    }

    /// Find `native.toml` in `start_dir` or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Configured binaries, or the conventional debug/release/test set.
    pub fn binary_identities(&self) -> Vec<BinaryIdentity> {
        if self.binaries.is_empty() {
            BinaryIdentity::conventional()
        } else {
            self.binaries.clone()
        }
    }

    /// Build the local repository described by `[[component]]` tables.
    /// Relative file paths are taken relative to `root_dir`.
    pub fn repository(&self, root_dir: &Path) -> Result<LocalRepository, BuildError> {
        let mut repository = LocalRepository::new();
        for component in &self.components {
            let variants = component
                .variants
                .iter()
                .map(|v| v.to_variant(root_dir))
                .collect::<Result<Vec<_>, _>>()?;
            repository.add(Component {
                id: component.id.clone(),
                variants,
            });
        }
        Ok(repository)
    }
}

impl VariantSection {
    fn to_variant(&self, root_dir: &Path) -> Result<Variant, BuildError> {
        let mut attributes = AttributeSet::builder();
        for (name, raw) in &self.attributes {
            let (key, value) = AttributeSet::parse_entry(name, raw)?;
            attributes = attributes.raw(key, value);
        }
        let dependencies = self
            .dependencies
            .iter()
            .map(|d| d.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Variant {
            name: self.name.clone(),
            attributes: attributes.build(),
            files: self.files.iter().map(|f| root_dir.join(f)).collect(),
            dependencies,
        })
    }
}
