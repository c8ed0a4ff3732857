//! Shared fixtures for unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::attribute::{AttributeSet, Usage, DEBUGGABLE, OPTIMIZED, USAGE};
use crate::binary::BinaryIdentity;
use crate::component::ComponentIdentifier;
use crate::dependency::DependencySet;
use crate::modulemap::REQUIRES_MODULE_MAP;
use crate::resolution::{
    ArtifactRequest, Component, LocalRepository, ResolutionEngine, ResolutionFailure,
    ResolvedArtifact, Variant,
};

pub(crate) fn attrs(usage: Usage, debuggable: bool, optimized: bool) -> AttributeSet {
    AttributeSet::builder()
        .attribute(USAGE, usage)
        .attribute(DEBUGGABLE, debuggable)
        .attribute(OPTIMIZED, optimized)
        .build()
}

pub(crate) fn with_module_map(attributes: AttributeSet) -> AttributeSet {
    attributes.merged(
        &AttributeSet::builder()
            .attribute(REQUIRES_MODULE_MAP, true)
            .build(),
    )
}

pub(crate) fn variant(name: &str, attributes: AttributeSet, files: &[&str], deps: &[&str]) -> Variant {
    Variant {
        name: name.to_string(),
        attributes,
        files: files.iter().map(|f| PathBuf::from(*f)).collect(),
        dependencies: deps.iter().map(|d| d.parse().unwrap()).collect(),
    }
}

pub(crate) fn identity(name: &str, debuggable: bool, optimized: bool) -> BinaryIdentity {
    BinaryIdentity {
        name: name.to_string(),
        debuggable,
        optimized,
        testable: false,
    }
}

pub(crate) fn implementation(notations: &[&str]) -> Arc<DependencySet> {
    notations
        .iter()
        .fold(DependencySet::builder("implementation"), |b, n| {
            b.notation(n).unwrap()
        })
        .build()
}

/// A C library with headers, a C project that depends on it, and a Swift
/// project without a module map; debug and release variants for each.
pub(crate) fn sample_repository() -> LocalRepository {
    use Usage::*;
    let mut json = Vec::new();
    let mut core = Vec::new();
    let mut swift = Vec::new();
    for (flavour, optimized) in [("debug", false), ("release", true)] {
        json.push(variant(
            &format!("{}Headers", flavour),
            with_module_map(attrs(SwiftInterface, true, optimized)),
            &["/a/Json.h"],
            &[],
        ));
        json.push(variant(
            &format!("{}Link", flavour),
            attrs(NativeLink, true, optimized),
            &[format!("/a/{}/libJson.a", flavour).as_str()],
            &[],
        ));
        json.push(variant(
            &format!("{}Runtime", flavour),
            attrs(NativeRuntime, true, optimized),
            &[],
            &[],
        ));

        core.push(variant(
            &format!("{}Headers", flavour),
            with_module_map(attrs(SwiftInterface, true, optimized)),
            &["/b/core.h", "/b/core2.h"],
            &["org.json:Json"],
        ));
        core.push(variant(
            &format!("{}Link", flavour),
            attrs(NativeLink, true, optimized),
            &[format!("/b/{}/libcore.a", flavour).as_str()],
            &["org.json:Json"],
        ));
        core.push(variant(
            &format!("{}Runtime", flavour),
            attrs(NativeRuntime, true, optimized),
            &[],
            &["org.json:Json"],
        ));

        swift.push(variant(
            &format!("{}Api", flavour),
            attrs(SwiftInterface, true, optimized),
            &[format!("/s/{}/Util.swiftmodule", flavour).as_str()],
            &[":core"],
        ));
        swift.push(variant(
            &format!("{}Link", flavour),
            attrs(NativeLink, true, optimized),
            &[format!("/s/{}/libUtil.a", flavour).as_str()],
            &[":core"],
        ));
        swift.push(variant(
            &format!("{}Runtime", flavour),
            attrs(NativeRuntime, true, optimized),
            &[format!("/s/{}/libUtil.dylib", flavour).as_str()],
            &[":core"],
        ));
    }

    LocalRepository::new()
        .with_component(Component {
            id: ComponentIdentifier::module("org.json", "Json", "1.0"),
            variants: json,
        })
        .with_component(Component {
            id: ComponentIdentifier::project(":core"),
            variants: core,
        })
        .with_component(Component {
            id: ComponentIdentifier::project(":util"),
            variants: swift,
        })
}

/// Engine that returns a fixed artifact list for every request.
pub(crate) struct FixedEngine(pub(crate) Vec<ResolvedArtifact>);

impl ResolutionEngine for FixedEngine {
    fn resolve(&self, _request: &ArtifactRequest) -> Result<Vec<ResolvedArtifact>, ResolutionFailure> {
        Ok(self.0.clone())
    }
}

/// Wraps an engine and counts `resolve` calls.
pub(crate) struct CountingEngine<E> {
    pub(crate) inner: E,
    calls: AtomicUsize,
}

impl<E> CountingEngine<E> {
    pub(crate) fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: ResolutionEngine> ResolutionEngine for CountingEngine<E> {
    fn resolve(&self, request: &ArtifactRequest) -> Result<Vec<ResolvedArtifact>, ResolutionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(request)
    }
}
