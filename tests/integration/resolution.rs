use pom_bridge::models::Coordinate;
use pom_bridge::resolver::Resolver;
use pom_bridge::test_utils::{PomBuilder, ProjectFixture};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// root <- platform <- {service-a, service-b}
fn layered_fixture() -> ProjectFixture {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write_pom(
            "",
            &PomBuilder::new("com.example", "root")
                .property("junit.version", "4.13.2")
                .property("guava.version", "31.1-jre")
                .dependency("junit", "junit", |d| d.version("${junit.version}").scope("test"))
                .build(),
        )
        .unwrap();
    fixture
        .write_pom(
            "platform",
            &PomBuilder::new("com.example", "platform")
                .parent("com.example", "root", "..")
                .property("guava.version", "32.0-jre")
                .dependency("com.google.guava", "guava", |d| {
                    d.version("${guava.version}").exclude("com.google.code.findbugs", "jsr305")
                })
                .build(),
        )
        .unwrap();
    for name in ["service-a", "service-b"] {
        fixture
            .write_pom(
                &format!("services/{name}"),
                &PomBuilder::new("com.example", name)
                    .parent("com.example", "platform", "../../platform/pom.xml")
                    .build(),
            )
            .unwrap();
    }
    fixture
}

#[test]
fn test_three_level_chain() {
    let fixture = layered_fixture();
    let resolver = Resolver::default();

    let service = resolver.resolve(Path::new("services/service-a"), Some(fixture.root())).unwrap();

    assert_eq!(service.coordinate, Some(Coordinate::new("com.example", "service-a")));
    assert_eq!(service.parent, Some(PathBuf::from("platform/pom.xml")));
    assert_eq!(service.property("guava.version"), "32.0-jre");
    assert_eq!(service.property("junit.version"), "4.13.2");

    let coordinates: Vec<String> =
        service.dependencies.iter().map(|d| d.coordinate.to_string()).collect();
    assert_eq!(
        coordinates,
        vec![
            "com.example:platform",
            "com.example:root",
            "com.google.guava:guava",
            "junit:junit",
        ]
    );
    let guava = &service.dependencies[2];
    assert_eq!(guava.version.as_deref(), Some("32.0-jre"));
    assert_eq!(guava.exclusions[0].coordinate.artifact_id, "jsr305");
    assert!(service.dependencies[3].is_test_scoped());

    let platform = resolver.parent(&service).unwrap().unwrap();
    let root = resolver.parent(&platform).unwrap().unwrap();
    assert_eq!(root.source, PathBuf::from("pom.xml"));
    assert!(resolver.parent(&root).unwrap().is_none());
}

#[test]
fn test_siblings_share_parent_parses() {
    let fixture = layered_fixture();
    let resolver = Resolver::default();

    resolver.resolve(Path::new("services/service-a"), Some(fixture.root())).unwrap();
    resolver.resolve(Path::new("services/service-b"), Some(fixture.root())).unwrap();

    // root, platform, service-a, service-b
    assert_eq!(resolver.cache().parse_count(), 4);
    assert_eq!(resolver.len(), 4);
}

#[test]
fn test_concurrent_resolution_converges() {
    let fixture = layered_fixture();
    let resolver = Resolver::default();
    let root = fixture.root();

    let descriptors: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = &resolver;
                scope.spawn(move || {
                    let module =
                        if i % 2 == 0 { "services/service-a" } else { "services/service-b" };
                    resolver.resolve(Path::new(module), Some(root)).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(resolver.cache().parse_count(), 4);
    let canonical = resolver.resolve(Path::new("services/service-a"), Some(root)).unwrap();
    for descriptor in descriptors.iter().step_by(2) {
        assert!(Arc::ptr_eq(descriptor, &canonical));
    }
}

#[test]
fn test_relative_root_free_resolution() {
    let fixture = layered_fixture();
    let resolver = Resolver::default();
    let absolute = fixture.root().join("platform");

    let platform = resolver.resolve(&absolute, None).unwrap();
    assert_eq!(platform.artifact_id(), Some("platform"));
    assert_eq!(platform.property("junit.version"), "4.13.2");
}
