//! Compiled binary descriptors.
//!
//! A `BinaryDescriptor` holds the immutable facts about one binary variant
//! (debug, release, testable, ...) and the artifact sets downstream compile
//! and link steps read. Constructing one registers its channels but resolves
//! nothing; resolution happens the first time an artifact set or the module
//! maps are read.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::channel::{build_channels, BinaryChannels, ChannelContainer, ChannelPurpose};
use crate::deferred::Deferred;
use crate::dependency::DependencySet;
use crate::error::BuildError;
use crate::modulemap::{module_maps_of, ModuleMap, ModuleMaps};
use crate::resolution::{ArtifactSet, ResolutionEngine};

/// Name and flags of one binary variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryIdentity {
    pub name: String,
    pub debuggable: bool,
    pub optimized: bool,
    #[serde(default)]
    pub testable: bool,
}

impl BinaryIdentity {
    pub fn debug() -> Self {
        Self {
            name: "debug".to_string(),
            debuggable: true,
            optimized: false,
            testable: false,
        }
    }

    pub fn release() -> Self {
        Self {
            name: "release".to_string(),
            debuggable: true,
            optimized: true,
            testable: false,
        }
    }

    /// Debug build compiled with testability enabled.
    pub fn test() -> Self {
        Self {
            name: "test".to_string(),
            debuggable: true,
            optimized: false,
            testable: true,
        }
    }

    /// The variants a Swift component builds when none are configured.
    pub fn conventional() -> Vec<BinaryIdentity> {
        vec![Self::debug(), Self::release(), Self::test()]
    }
}

/// Where a build unit places its outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildLayout {
    pub build_dir: PathBuf,
}

impl BuildLayout {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
        }
    }
}

pub struct BinaryDescriptor {
    identity: BinaryIdentity,
    module: Arc<Deferred<String>>,
    source: BTreeSet<PathBuf>,
    channels: BinaryChannels,
    compile_modules: ArtifactSet,
    link_libraries: ArtifactSet,
    runtime_libraries: ArtifactSet,
    compile_module_maps: ModuleMaps,
    objects_dir: PathBuf,
    modules_dir: PathBuf,
    module_maps_dir: PathBuf,
}

impl BinaryDescriptor {
    /// Wire a binary: register its three channels in `container` and set up
    /// the lazily resolved artifact sets and module maps.
    pub fn new(
        identity: BinaryIdentity,
        module: Arc<Deferred<String>>,
        source: BTreeSet<PathBuf>,
        container: &ChannelContainer,
        implementation: &Arc<DependencySet>,
        engine: Arc<dyn ResolutionEngine>,
        layout: &BuildLayout,
    ) -> Result<Self, BuildError> {
        let channels = build_channels(container, &identity, implementation)?;
        let artifacts = |purpose: ChannelPurpose| {
            ArtifactSet::new(channels.get(purpose).request(), engine.clone())
        };
        let compile_modules = artifacts(ChannelPurpose::SwiftCompile);
        let link_libraries = artifacts(ChannelPurpose::NativeLink);
        let runtime_libraries = artifacts(ChannelPurpose::NativeRuntime);
        let compile_module_maps = module_maps_of(&channels.compile, engine);

        Ok(Self {
            objects_dir: layout.build_dir.join("obj").join(&identity.name),
            modules_dir: layout.build_dir.join("modules").join(&identity.name),
            module_maps_dir: layout.build_dir.join("module-maps").join(&identity.name),
            identity,
            module,
            source,
            channels,
            compile_modules,
            link_libraries,
            runtime_libraries,
            compile_module_maps,
        })
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn identity(&self) -> &BinaryIdentity {
        &self.identity
    }

    /// Swift module name; computed on first read.
    pub fn module(&self) -> &str {
        self.module.get()
    }

    pub fn is_debuggable(&self) -> bool {
        self.identity.debuggable
    }

    pub fn is_optimized(&self) -> bool {
        self.identity.optimized
    }

    pub fn is_testable(&self) -> bool {
        self.identity.testable
    }

    pub fn swift_source(&self) -> &BTreeSet<PathBuf> {
        &self.source
    }

    pub fn channels(&self) -> &BinaryChannels {
        &self.channels
    }

    pub fn compile_modules(&self) -> &ArtifactSet {
        &self.compile_modules
    }

    pub fn link_libraries(&self) -> &ArtifactSet {
        &self.link_libraries
    }

    pub fn runtime_libraries(&self) -> &ArtifactSet {
        &self.runtime_libraries
    }

    pub fn artifacts(&self, purpose: ChannelPurpose) -> &ArtifactSet {
        match purpose {
            ChannelPurpose::SwiftCompile => &self.compile_modules,
            ChannelPurpose::NativeLink => &self.link_libraries,
            ChannelPurpose::NativeRuntime => &self.runtime_libraries,
        }
    }

    /// Module maps for the C/C++ headers this binary imports.
    ///
    /// The first call resolves and aggregates; later calls return the same
    /// result, including a cached error.
    pub fn compile_module_maps(&self) -> Result<&[ModuleMap], &BuildError> {
        self.compile_module_maps.get().as_ref().map(Vec::as_slice)
    }

    pub fn module_maps_evaluated(&self) -> bool {
        self.compile_module_maps.is_evaluated()
    }

    /// Directory the compiler writes object files into.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Where the compile step materialises this binary's module map files.
    pub fn module_maps_dir(&self) -> &Path {
        &self.module_maps_dir
    }

    /// `<build>/modules/<binary>/<Module>.swiftmodule`
    pub fn module_file(&self) -> PathBuf {
        self.modules_dir.join(format!("{}.swiftmodule", self.module()))
    }
}

impl std::fmt::Debug for BinaryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryDescriptor")
            .field("identity", &self.identity)
            .field("module", &self.module)
            .field("source", &self.source)
            .field("compile_modules", &self.compile_modules)
            .field("link_libraries", &self.link_libraries)
            .field("runtime_libraries", &self.runtime_libraries)
            .field("compile_module_maps", &self.compile_module_maps)
            .finish()
    }
}
