use pom_bridge::config::ConverterConfig;
use pom_bridge::core::{PomError, user_friendly_error};
use pom_bridge::models::DependencyScope;
use pom_bridge::resolver::Resolver;
use pom_bridge::session::Session;
use pom_bridge::test_utils::{PomBuilder, ProjectFixture};
use std::path::{Path, PathBuf};

#[test]
fn test_malformed_descriptor_reports_excerpt() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write_pom(
            "broken",
            "<project>\n  <groupId>g</groupId>\n  <artifactId>a</groupId>\n</project>\n",
        )
        .unwrap();
    let resolver = Resolver::default();

    let error = resolver.resolve(Path::new("broken"), Some(fixture.root())).unwrap_err();

    let PomError::MalformedDocument { path, excerpt, .. } = &error else {
        panic!("expected malformed document, got {error:?}");
    };
    assert_eq!(path, &PathBuf::from("broken/pom.xml"));
    let excerpt = excerpt.as_deref().expect("excerpt");
    assert!(excerpt.contains("<artifactId>a</groupId>"));
    assert!(excerpt.contains('^'));
    assert!(error.to_string().starts_with("Malformatted pom.xml broken/pom.xml"));

    // Not cached: fixing the file makes the next resolution succeed.
    fixture.write_pom("broken", &PomBuilder::new("g", "a").build()).unwrap();
    assert!(resolver.resolve(Path::new("broken"), Some(fixture.root())).is_ok());
}

#[test]
fn test_missing_version_through_session() {
    let fixture = ProjectFixture::new().unwrap();
    fixture
        .write_pom(
            "svc",
            &PomBuilder::new("com.example", "svc").dependency("org.ext", "unpinned", |d| d).build(),
        )
        .unwrap();
    let config = ConverterConfig {
        root_dir: fixture.root().to_path_buf(),
        ..ConverterConfig::default()
    };
    let session = Session::open(config).unwrap();

    let error = session.references(Path::new("svc/pom.xml"), DependencyScope::Library).unwrap_err();

    assert_eq!(
        error.to_string(),
        "Expected artifact unpinned group org.ext in pom svc/pom.xml to have a version."
    );

    let context = user_friendly_error(error.into());
    assert!(context.suggestion.is_some());
    assert!(context.to_string().contains("Suggestion:"));
}

#[test]
fn test_cycle_reports_chain() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.write_pom("x", &PomBuilder::new("g", "x").parent("g", "y", "../y").build()).unwrap();
    fixture.write_pom("y", &PomBuilder::new("g", "y").parent("g", "x", "../x").build()).unwrap();
    let resolver = Resolver::default();

    let error = resolver.resolve(Path::new("x"), Some(fixture.root())).unwrap_err();

    let message = error.to_string();
    assert!(message.starts_with("Cyclic parent inheritance"));
    assert!(message.contains("x/pom.xml"));
    assert!(message.contains("y/pom.xml"));
}

#[test]
fn test_config_errors_become_user_friendly() {
    let fixture = ProjectFixture::new().unwrap();
    let path = fixture.root().join("converter.toml");
    std::fs::write(&path, "root_dir = [").unwrap();

    let error = ConverterConfig::load_from(&path).unwrap_err();
    let context = user_friendly_error(error);

    let PomError::Other { message } = &context.error else {
        panic!("expected a plain config error, got {:?}", context.error);
    };
    assert!(message.starts_with("Failed to parse converter config"));
    assert!(!context.to_string().contains("Failed to render"));
}
