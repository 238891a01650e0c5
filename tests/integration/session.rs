use pom_bridge::classifier::DependencyClass;
use pom_bridge::config::ConverterConfig;
use pom_bridge::models::DependencyScope;
use pom_bridge::session::Session;
use pom_bridge::test_utils::{PomBuilder, ProjectFixture};
use std::fs;
use std::path::{Path, PathBuf};

fn monorepo() -> ProjectFixture {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_pom("", &PomBuilder::aggregator(&["common", "legacy", "web"]).build()).unwrap();
    fixture.write_pom("common", &PomBuilder::new("com.example", "common").build()).unwrap();
    fixture.add_source_file("common", "src/main/java", "Common.java").unwrap();
    fixture.add_source_file("common", "src/test/java", "Fixtures.java").unwrap();
    fixture.write_pom("legacy", &PomBuilder::new("com.example", "legacy").build()).unwrap();
    fixture.add_source_file("legacy", "src/main/java", "Old.java").unwrap();
    fixture
        .write_pom(
            "web",
            &PomBuilder::new("com.example", "web")
                .property("slf4j.version", "2.0.9")
                .dependency("com.example", "common", |d| d)
                .dependency("com.example", "legacy", |d| d)
                .dependency("com.example", "common", |d| d.kind("test-jar").scope("test"))
                .dependency("org.slf4j", "slf4j-api", |d| d.version("${slf4j.version}"))
                .dependency("io.netty", "netty-all", |d| d)
                .dependency("junit", "junit", |d| d.version("4.13.2").scope("test"))
                .build(),
        )
        .unwrap();
    fixture
}

fn write_config(fixture: &ProjectFixture) -> PathBuf {
    let path = fixture.root().join("converter.toml");
    fs::write(
        &path,
        format!(
            r#"
root_dir = "{}"
exclude_project_targets = ["legacy"]

[policy]
local_prefixes = ["com.example."]
third_party = ["io.netty."]
"#,
            fixture.root().display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_session_end_to_end() {
    let fixture = monorepo();
    let config = ConverterConfig::load_from(&write_config(&fixture)).unwrap();

    let session = Session::open(config).unwrap();

    assert_eq!(
        session.catalog().targets().collect::<Vec<_>>(),
        vec!["com.example.common", "com.example.legacy", "com.example.web"]
    );
    assert_eq!(
        session.references(Path::new("web"), DependencyScope::Library).unwrap(),
        vec![
            "'common/src/main/java:lib'",
            "'3rdparty:io.netty.netty-all'",
            "jar(org='org.slf4j', name='slf4j-api', rev='2.0.9')",
        ]
    );
    assert_eq!(
        session.references(Path::new("web"), DependencyScope::Test).unwrap(),
        vec!["'common/src/test/java:lib'", "jar(org='junit', name='junit', rev='4.13.2')"]
    );

    let web = session.dependencies(Path::new("web")).unwrap();
    assert_eq!(web.target, "com.example.web");
    assert_eq!(web.property("slf4j.version"), "2.0.9");
}

#[test]
fn test_session_with_custom_policy() {
    let fixture = monorepo();
    let config = ConverterConfig {
        root_dir: fixture.root().to_path_buf(),
        ..ConverterConfig::default()
    };
    let everything_third_party = |_: &str| DependencyClass::ThirdParty;

    let session = Session::with_policy(config, everything_third_party).unwrap();
    let refs = session.references(Path::new("web"), DependencyScope::Test).unwrap();

    assert_eq!(refs, vec!["'3rdparty:com.example.common'", "'3rdparty:junit.junit'"]);
}

#[test]
fn test_session_without_top_pom_has_empty_catalog() {
    let fixture = ProjectFixture::new().unwrap();
    let config = ConverterConfig {
        root_dir: fixture.root().to_path_buf(),
        ..ConverterConfig::default()
    };

    let session = Session::open(config).unwrap();
    assert!(session.catalog().is_empty());
    let refs = session.references(Path::new("anything"), DependencyScope::Library).unwrap();
    assert!(refs.is_empty());
}
