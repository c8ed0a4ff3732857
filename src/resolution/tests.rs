use std::path::Path;

use super::*;
use crate::attribute::Usage;
use crate::channel::{build_channels, ChannelContainer};
use crate::modulemap::REQUIRES_MODULE_MAP;
use crate::test_support::*;

fn channels_for(
    repo_deps: &[&str],
    debuggable: bool,
    optimized: bool,
) -> crate::channel::BinaryChannels {
    let container = ChannelContainer::new();
    build_channels(
        &container,
        &identity("main", debuggable, optimized),
        &implementation(repo_deps),
    )
    .unwrap()
}

fn files(artifacts: &[ResolvedArtifact]) -> Vec<&str> {
    artifacts
        .iter()
        .map(|a| a.file.to_str().unwrap())
        .collect()
}

#[test]
fn test_compile_channel_walks_graph_depth_first() {
    let repo = sample_repository();
    let channels = channels_for(&[":util", "Json"], true, false);
    let artifacts = repo.resolve(&channels.compile.request()).unwrap();
    assert_eq!(
        files(&artifacts),
        vec!["/s/debug/Util.swiftmodule", "/b/core.h", "/b/core2.h", "/a/Json.h"]
    );
    assert_eq!(artifacts[0].producer, ComponentIdentifier::project(":util"));
}

#[test]
fn test_link_and_runtime_select_by_usage_and_flags() {
    let repo = sample_repository();
    let channels = channels_for(&[":util"], true, true);
    let link = repo.resolve(&channels.link.request()).unwrap();
    assert_eq!(
        files(&link),
        vec!["/s/release/libUtil.a", "/b/release/libcore.a", "/a/release/libJson.a"]
    );
    let runtime = repo.resolve(&channels.runtime.request()).unwrap();
    assert_eq!(files(&runtime), vec!["/s/release/libUtil.dylib"]);
}

#[test]
fn test_module_map_view_skips_components_without_module_maps() {
    let repo = sample_repository();
    let channels = channels_for(&[":util"], true, false);
    let view = channels.compile.artifact_view(
        AttributeSet::builder()
            .attribute(REQUIRES_MODULE_MAP, true)
            .build(),
    );
    let artifacts = repo.resolve(&view).unwrap();
    assert_eq!(files(&artifacts), vec!["/b/core.h", "/b/core2.h", "/a/Json.h"]);
}

#[test]
fn test_missing_component() {
    let repo = sample_repository();
    let channels = channels_for(&[":nowhere"], true, false);
    let err = repo.resolve(&channels.compile.request()).unwrap_err();
    assert_eq!(
        err,
        ResolutionFailure::MissingComponent {
            dependency: ":nowhere".into(),
            channel: "swiftCompileMain".into(),
        }
    );
}

#[test]
fn test_no_matching_variant() {
    let repo = LocalRepository::new().with_component(Component {
        id: ComponentIdentifier::project(":core"),
        variants: vec![variant(
            "debugHeaders",
            attrs(Usage::SwiftInterface, true, false),
            &["/b/core.h"],
            &[],
        )],
    });
    let channels = channels_for(&[":core"], true, true);
    match repo.resolve(&channels.compile.request()).unwrap_err() {
        ResolutionFailure::NoMatchingVariant {
            component, channel, ..
        } => {
            assert_eq!(component, "project :core");
            assert_eq!(channel, "swiftCompileMain");
        }
        other => panic!("expected NoMatchingVariant, got {:?}", other),
    }
}

#[test]
fn test_ambiguous_variants() {
    let repo = LocalRepository::new().with_component(Component {
        id: ComponentIdentifier::project(":core"),
        variants: vec![
            variant("a", attrs(Usage::NativeLink, true, false), &["/a.a"], &[]),
            variant("b", attrs(Usage::NativeLink, true, false), &["/b.a"], &[]),
        ],
    });
    let channels = channels_for(&[":core"], true, false);
    assert!(matches!(
        repo.resolve(&channels.link.request()),
        Err(ResolutionFailure::AmbiguousVariants { candidates: 2, .. })
    ));
}

#[test]
fn test_validate_detects_cycles() {
    assert!(sample_repository().validate().is_ok());

    let looped = LocalRepository::new()
        .with_component(Component {
            id: ComponentIdentifier::project(":a"),
            variants: vec![variant("v", attrs(Usage::NativeLink, true, false), &[], &[":b"])],
        })
        .with_component(Component {
            id: ComponentIdentifier::project(":b"),
            variants: vec![variant("v", attrs(Usage::NativeLink, true, false), &[], &[":a"])],
        });
    assert!(matches!(
        looped.validate(),
        Err(ResolutionFailure::DependencyCycle { .. })
    ));
    // Walking a cyclic graph still terminates.
    let channels = channels_for(&[":a"], true, false);
    assert!(looped.resolve(&channels.link.request()).unwrap().is_empty());
}

#[test]
fn test_artifact_set_resolves_lazily_once() {
    let engine = Arc::new(CountingEngine::new(sample_repository()));
    let channels = channels_for(&["Json"], true, false);
    let set = ArtifactSet::new(channels.link.request(), engine.clone());

    assert!(!set.is_resolved());
    assert_eq!(engine.calls(), 0);

    assert_eq!(set.files().unwrap(), vec![Path::new("/a/debug/libJson.a")]);
    assert_eq!(set.artifacts().unwrap().len(), 1);
    assert!(set.is_resolved());
    assert_eq!(engine.calls(), 1);
    assert_eq!(set.channel().name(), "nativeLinkMain");
}

#[test]
fn test_artifact_set_keeps_failures() {
    let engine = Arc::new(CountingEngine::new(sample_repository()));
    let channels = channels_for(&[":missing"], true, false);
    let set = ArtifactSet::new(channels.compile.request(), engine.clone());
    assert!(set.artifacts().is_err());
    assert!(set.files().is_err());
    assert_eq!(engine.calls(), 1);
}
