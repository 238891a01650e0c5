use pom_bridge::catalog::TargetCatalog;
use pom_bridge::classifier::{PrefixPolicy, ReferenceBuilder, ReferenceOptions};
use pom_bridge::models::DependencyScope;
use pom_bridge::resolver::Resolver;
use pom_bridge::targets::TargetIndex;
use pom_bridge::templating::ArtifactRenderer;
use pom_bridge::test_utils::{PomBuilder, ProjectFixture, init_test_logging};
use std::path::Path;

/// Parent `b` declares `x` and `y`; child `a` redeclares `x` as a test dependency.
fn parent_child_fixture() -> ProjectFixture {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write_pom(
            "b",
            &PomBuilder::new("com.example", "b")
                .property("x.version", "1.0")
                .dependency("org.ext", "x", |d| d.version("${x.version}"))
                .dependency("org.ext", "y", |d| d.version("3.1"))
                .build(),
        )
        .unwrap();
    fixture
        .write_pom(
            "a",
            &PomBuilder::new("com.example", "a")
                .parent("com.example", "b", "../b")
                .property("x.version", "2.0")
                .dependency("org.ext", "x", |d| d.version("${x.version}").scope("test"))
                .build(),
        )
        .unwrap();
    fixture
}

#[test]
fn test_child_test_dependency_shadows_parent_library_dependency() {
    init_test_logging(None);
    let fixture = parent_child_fixture();
    let resolver = Resolver::default();
    let catalog = TargetCatalog::build(&resolver, &["a", "b"], Some(fixture.root())).unwrap();
    let targets = TargetIndex::new(fixture.root());
    let policy = PrefixPolicy::new(["com.example."], Vec::<String>::new());
    let renderer = ArtifactRenderer::new().unwrap();
    let options = ReferenceOptions {
        root: Some(fixture.root().to_path_buf()),
        ..ReferenceOptions::default()
    };
    let builder =
        ReferenceBuilder::new(&resolver, &catalog, &targets, &policy, &renderer, &options);

    let test_refs = builder.references(Path::new("a"), DependencyScope::Test).unwrap();
    let lib_refs = builder.references(Path::new("a"), DependencyScope::Library).unwrap();

    assert_eq!(test_refs, vec!["jar(org='org.ext', name='x', rev='2.0')"]);
    // The parent coordinate is a local dependency too, but `b` has no sources to reference.
    assert_eq!(lib_refs, vec!["jar(org='org.ext', name='y', rev='3.1')"]);
}

#[test]
fn test_parent_with_sources_is_referenced_locally() {
    let fixture = parent_child_fixture();
    fixture.add_source_file("b", "src/main/resources", "defaults.properties").unwrap();
    let resolver = Resolver::default();
    let catalog = TargetCatalog::build(&resolver, &["a", "b"], Some(fixture.root())).unwrap();
    let targets = TargetIndex::new(fixture.root());
    let policy = PrefixPolicy::new(["com.example."], ["org.ext.y"]);
    let renderer = ArtifactRenderer::new().unwrap();
    let options = ReferenceOptions {
        root: Some(fixture.root().to_path_buf()),
        third_party_namespace: "vendor".to_string(),
        ..ReferenceOptions::default()
    };
    let builder =
        ReferenceBuilder::new(&resolver, &catalog, &targets, &policy, &renderer, &options);

    let lib_refs = builder.references(Path::new("a/pom.xml"), DependencyScope::Library).unwrap();

    assert_eq!(lib_refs, vec!["'b/src/main/resources:resources'", "'vendor:org.ext.y'"]);
}

#[test]
fn test_library_target_wins_over_resources() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_pom("core", &PomBuilder::new("com.example", "core").build()).unwrap();
    fixture.add_source_file("core", "src/main/java", "Core.java").unwrap();
    fixture.add_source_file("core", "src/main/resources", "core.properties").unwrap();
    fixture
        .write_pom(
            "app",
            &PomBuilder::new("com.example", "app")
                .dependency("com.example", "core", |d| d.version("1.0"))
                .build(),
        )
        .unwrap();
    let resolver = Resolver::default();
    let catalog = TargetCatalog::build(&resolver, &["core", "app"], Some(fixture.root())).unwrap();
    let targets = TargetIndex::new(fixture.root());
    let policy = PrefixPolicy::new(["com.example."], Vec::<String>::new());
    let renderer = ArtifactRenderer::new().unwrap();
    let options = ReferenceOptions {
        root: Some(fixture.root().to_path_buf()),
        ..ReferenceOptions::default()
    };
    let builder =
        ReferenceBuilder::new(&resolver, &catalog, &targets, &policy, &renderer, &options);

    assert_eq!(
        builder.references(Path::new("app"), DependencyScope::Library).unwrap(),
        vec!["'core/src/main/java:lib'"]
    );
}

#[test]
fn test_external_protos_module_is_referenced_before_generation() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write_pom(
            "external-protos/billing",
            &PomBuilder::new("com.example.protos", "billing").build(),
        )
        .unwrap();
    fixture
        .write_pom(
            "app",
            &PomBuilder::new("com.example", "app")
                .dependency("com.example.protos", "billing", |d| d)
                .build(),
        )
        .unwrap();
    let resolver = Resolver::default();
    let catalog = TargetCatalog::build(
        &resolver,
        &["external-protos/billing", "app"],
        Some(fixture.root()),
    )
    .unwrap();
    let targets = TargetIndex::new(fixture.root());
    let policy = PrefixPolicy::new(["com.example"], Vec::<String>::new());
    let renderer = ArtifactRenderer::new().unwrap();
    let options = ReferenceOptions {
        root: Some(fixture.root().to_path_buf()),
        ..ReferenceOptions::default()
    };
    let builder =
        ReferenceBuilder::new(&resolver, &catalog, &targets, &policy, &renderer, &options);

    assert_eq!(
        builder.references(Path::new("app"), DependencyScope::Library).unwrap(),
        vec!["'external-protos/billing/src/main/proto:proto'"]
    );
}
