//! A build unit: one Swift component and the binaries it declares.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::binary::{BinaryDescriptor, BuildLayout};
use crate::channel::ChannelContainer;
use crate::config::Manifest;
use crate::deferred::Deferred;
use crate::dependency::DependencySet;
use crate::diagnostic::Diagnostic;
use crate::error::BuildError;
use crate::names;
use crate::resolution::ResolutionEngine;

pub struct NativeProject {
    pub name: String,
    pub root_dir: PathBuf,
    module: Arc<Deferred<String>>,
    implementation: Arc<DependencySet>,
    channels: ChannelContainer,
    binaries: Vec<BinaryDescriptor>,
}

impl NativeProject {
    /// Load `native.toml` and wire the project against its local repository.
    pub fn load(manifest_path: &Path) -> Result<NativeProject, Diagnostic> {
        let manifest = Manifest::load(manifest_path)?;
        let root_dir = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Self::from_manifest(&manifest, &root_dir).map_err(|e| Diagnostic::from(&e))
    }

    /// Wire the project using the manifest's `[[component]]` tables as the
    /// resolution engine.
    pub fn from_manifest(manifest: &Manifest, root_dir: &Path) -> Result<NativeProject, BuildError> {
        let root_dir = absolute_root(root_dir)?;
        let repository = manifest.repository(&root_dir)?;
        repository.validate()?;
        Self::with_engine(manifest, &root_dir, Arc::new(repository))
    }

    pub fn with_engine(
        manifest: &Manifest,
        root_dir: &Path,
        engine: Arc<dyn ResolutionEngine>,
    ) -> Result<NativeProject, BuildError> {
        let root_dir = absolute_root(root_dir)?;
        let root_dir = root_dir.as_path();
        let project = &manifest.project;

        let module = Arc::new(match &project.module {
            Some(module) => {
                check_module_name(module)?;
                Deferred::ready(module.clone())
            }
            None => {
                // Derivation stays lazy; only its precondition is checked here.
                if !project.name.chars().any(char::is_alphanumeric) {
                    return Err(BuildError::InvalidModuleName {
                        name: project.name.clone(),
                        reason: "project name has no letters or digits to derive a module name from"
                            .to_string(),
                    });
                }
                let name = project.name.clone();
                Deferred::new(move || names::to_module_name(&name))
            }
        });

        let implementation = manifest
            .dependencies
            .implementation
            .iter()
            .try_fold(DependencySet::builder("implementation"), |b, n| b.notation(n))?
            .build();

        let source: BTreeSet<PathBuf> = project.sources.iter().map(|s| root_dir.join(s)).collect();
        let layout = BuildLayout::new(root_dir.join(&project.build_dir));
        let channels = ChannelContainer::new();

        let binaries = manifest
            .binary_identities()
            .into_iter()
            .map(|identity| {
                BinaryDescriptor::new(
                    identity,
                    module.clone(),
                    source.clone(),
                    &channels,
                    &implementation,
                    engine.clone(),
                    &layout,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            project = %project.name,
            binaries = binaries.len(),
            channels = channels.len(),
            "wired project"
        );

        Ok(NativeProject {
            name: project.name.clone(),
            root_dir: root_dir.to_path_buf(),
            module,
            implementation,
            channels,
            binaries,
        })
    }

    pub fn module(&self) -> &str {
        self.module.get()
    }

    pub fn implementation(&self) -> &DependencySet {
        &self.implementation
    }

    pub fn channels(&self) -> &ChannelContainer {
        &self.channels
    }

    pub fn binaries(&self) -> &[BinaryDescriptor] {
        &self.binaries
    }

    pub fn binary(&self, name: &str) -> Option<&BinaryDescriptor> {
        self.binaries.iter().find(|b| b.name() == name)
    }
}

/// Anchor the project at an absolute root so module maps carry absolute
/// header paths.
fn absolute_root(root_dir: &Path) -> Result<PathBuf, BuildError> {
    std::path::absolute(root_dir).map_err(|source| BuildError::ProjectRoot {
        path: root_dir.display().to_string(),
        source,
    })
}

fn check_module_name(module: &str) -> Result<(), BuildError> {
    if module.is_empty() || !module.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(BuildError::InvalidModuleName {
            name: module.to_string(),
            reason: "expected letters, digits and underscores".to_string(),
        });
    }
    Ok(())
}
