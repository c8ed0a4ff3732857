use super::*;
use crate::channel::{build_channels, ChannelContainer};
use crate::component::ComponentIdentifier;
use crate::resolution::ResolvedArtifact;
use crate::test_support::*;

fn artifact(producer: ComponentIdentifier, path: &str) -> ResolvedArtifact {
    ResolvedArtifact::new(producer, path)
}

fn unknown() -> ComponentIdentifier {
    ComponentIdentifier::Unknown {
        kind: "OpaqueComponentIdentifier".into(),
        display_name: "opaque".into(),
    }
}

// ── aggregate ─────────────────────────────────────────────────

#[test]
fn test_aggregate_groups_by_producer() {
    let artifacts = vec![
        artifact(ComponentIdentifier::module("", "Json", ""), "/a/Json.h"),
        artifact(ComponentIdentifier::project(":core"), "/b/core.h"),
        artifact(ComponentIdentifier::project(":core"), "/b/core2.h"),
    ];
    let maps = aggregate(&artifacts).unwrap();
    assert_eq!(
        maps,
        vec![
            ModuleMap::new("Json", vec!["/a/Json.h".into()]),
            ModuleMap::new("core", vec!["/b/core.h".into(), "/b/core2.h".into()]),
        ]
    );
}

#[test]
fn test_aggregate_orders_by_first_sighting() {
    let x = ComponentIdentifier::library_binary(":native", "x", "debug");
    let y = ComponentIdentifier::project(":y");
    let artifacts = vec![
        artifact(x.clone(), "/A.h"),
        artifact(y, "/B.h"),
        artifact(x, "/C.h"),
    ];
    let maps = aggregate(&artifacts).unwrap();
    assert_eq!(
        maps,
        vec![
            ModuleMap::new("x", vec!["/A.h".into(), "/C.h".into()]),
            ModuleMap::new("y", vec!["/B.h".into()]),
        ]
    );
}

#[test]
fn test_aggregate_merges_different_producers_with_same_name() {
    // A published module and a sibling project both named `core`.
    let artifacts = vec![
        artifact(ComponentIdentifier::module("org", "core", "1.0"), "/m/core.h"),
        artifact(ComponentIdentifier::project(":other"), "/o/other.h"),
        artifact(ComponentIdentifier::project(":core"), "/p/core.h"),
    ];
    let maps = aggregate(&artifacts).unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[0].module_name, "core");
    assert_eq!(maps[0].public_header_paths, vec!["/m/core.h", "/p/core.h"]);
}

#[test]
fn test_aggregate_keeps_duplicate_paths() {
    let core = ComponentIdentifier::project(":core");
    let artifacts = vec![
        artifact(core.clone(), "/b/core.h"),
        artifact(core, "/b/core.h"),
    ];
    let maps = aggregate(&artifacts).unwrap();
    assert_eq!(maps[0].public_header_paths, vec!["/b/core.h", "/b/core.h"]);
}

#[test]
fn test_aggregate_empty() {
    assert!(aggregate(&[]).unwrap().is_empty());
}

#[test]
fn test_aggregate_fails_on_unknown_producer() {
    let artifacts = vec![
        artifact(ComponentIdentifier::project(":core"), "/b/core.h"),
        artifact(unknown(), "/x/opaque.h"),
    ];
    match aggregate(&artifacts) {
        Err(BuildError::UnclassifiableProducer { display_name, kind }) => {
            assert_eq!(display_name, "opaque");
            assert_eq!(kind, "OpaqueComponentIdentifier");
        }
        other => panic!("expected UnclassifiableProducer, got {:?}", other),
    }
}

// ── module_maps_of ────────────────────────────────────────────

#[test]
fn test_module_maps_of_uses_view_and_is_lazy() {
    let engine = Arc::new(CountingEngine::new(sample_repository()));
    let container = ChannelContainer::new();
    let channels = build_channels(
        &container,
        &identity("debug", true, false),
        &implementation(&[":util", "org.json:Json"]),
    )
    .unwrap();

    let maps = module_maps_of(&channels.compile, engine.clone());
    assert_eq!(engine.calls(), 0);
    assert!(!maps.is_evaluated());

    let first = maps.get().as_ref().unwrap().clone();
    let second = maps.get().as_ref().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(engine.calls(), 1);
    assert_eq!(
        first,
        vec![
            ModuleMap::new("core", vec!["/b/core.h".into(), "/b/core2.h".into()]),
            ModuleMap::new("Json", vec!["/a/Json.h".into()]),
        ]
    );
}

#[test]
fn test_module_maps_of_propagates_resolution_failure() {
    let engine: Arc<dyn ResolutionEngine> = Arc::new(sample_repository());
    let container = ChannelContainer::new();
    let channels = build_channels(
        &container,
        &identity("debug", true, false),
        &implementation(&[":missing"]),
    )
    .unwrap();
    let maps = module_maps_of(&channels.compile, engine);
    match maps.get() {
        Err(BuildError::Resolution(failure)) => {
            assert!(failure.to_string().contains("':missing'"))
        }
        other => panic!("expected resolution failure, got {:?}", other),
    }
}

#[test]
fn test_module_maps_of_yields_no_partial_result() {
    let engine = Arc::new(FixedEngine(vec![
        artifact(ComponentIdentifier::project(":core"), "/b/core.h"),
        artifact(unknown(), "/x/opaque.h"),
    ]));
    let container = ChannelContainer::new();
    let channels = build_channels(
        &container,
        &identity("debug", true, false),
        &implementation(&[":core"]),
    )
    .unwrap();
    let maps = module_maps_of(&channels.compile, engine);
    assert!(matches!(
        maps.get(),
        Err(BuildError::UnclassifiableProducer { .. })
    ));
}

// ── rendering ─────────────────────────────────────────────────

#[test]
fn test_render_headers() {
    let map = ModuleMap::new("Json", vec!["/a/Json.h".into(), "/a/Json+Extra.h".into()]);
    insta::assert_snapshot!(map.render_with(|_| false), @r###"
    module Json {
        header "/a/Json.h"
        header "/a/Json+Extra.h"
        export *
    }
    "###);
}

#[test]
fn test_render_umbrella_directory_and_escaping() {
    let map = ModuleMap::new(
        "core",
        vec!["/b/include".into(), "/b/odd \"name\".h".into()],
    );
    let text = map.render_with(|p| p.ends_with("include"));
    assert_eq!(
        text,
        "module core {\n    umbrella \"/b/include\"\n    header \"/b/odd \\\"name\\\".h\"\n    export *\n}\n"
    );
}

#[test]
fn test_write_module_map_creates_and_preserves() {
    let dir = tempfile::tempdir().unwrap();
    let headers = dir.path().join("include");
    std::fs::create_dir(&headers).unwrap();
    let map = ModuleMap::new("core", vec![headers.display().to_string()]);

    let path = write_module_map(&map, &dir.path().join("maps")).unwrap();
    assert_eq!(path, dir.path().join("maps").join("core").join(MODULE_MAP_FILE_NAME));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(&format!("umbrella \"{}\"", headers.display())));

    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(20));
    write_module_map(&map, &dir.path().join("maps")).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
}

#[test]
fn test_write_module_map_rejects_names_escaping_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("maps");
    for name in ["../x", "a/b", "..", ".", ""] {
        let map = ModuleMap::new(name, vec!["/b/core.h".into()]);
        let err = write_module_map(&map, &out).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput, "{:?}", name);
    }
    assert!(!dir.path().join("x").exists());
    assert!(!out.exists());
}
