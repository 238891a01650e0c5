use pom_bridge::targets::{SOURCE_LAYOUT, TargetIndex};
use pom_bridge::test_utils::ProjectFixture;
use std::collections::BTreeSet;

#[test]
fn test_empty_java_dir_and_populated_proto_dir() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.add_empty_dir("service", "src/main/java").unwrap();
    fixture.add_source_file("service", "src/main/proto", "service.proto").unwrap();
    let index = TargetIndex::new(fixture.root());

    let expected: BTreeSet<String> = ["service:lib", "service/src/main/proto:proto"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(*index.targets("service"), expected);
}

#[test]
fn test_populating_directories_only_adds_targets() {
    let fixture = ProjectFixture::new().unwrap();
    for (dir, _) in SOURCE_LAYOUT {
        fixture.add_empty_dir("grow", dir).unwrap();
    }

    let mut previous = TargetIndex::new(fixture.root()).targets("grow");
    assert_eq!(previous.len(), 1);

    for (i, (dir, kinds)) in SOURCE_LAYOUT.iter().enumerate() {
        fixture.add_source_file("grow", dir, &format!("file{i}")).unwrap();
        // A fresh index sees the filesystem as it is now.
        let current = TargetIndex::new(fixture.root()).targets("grow");
        assert!(previous.is_subset(&current), "{dir} removed targets");
        for kind in *kinds {
            assert!(current.contains(&format!("grow/{dir}:{kind}")));
        }
        previous = current;
    }

    // src/test/java adds two kinds; every other directory adds one.
    assert_eq!(previous.len(), 1 + SOURCE_LAYOUT.len() + 1);
}

#[test]
fn test_file_in_place_of_directory_is_ignored() {
    let fixture = ProjectFixture::new().unwrap();
    fixture.add_source_file("odd", "src/main", "java").unwrap();
    let index = TargetIndex::new(fixture.root());

    assert_eq!(index.targets("odd").len(), 1);
}
