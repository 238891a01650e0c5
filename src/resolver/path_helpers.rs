//! Descriptor path helpers.

use std::path::{Component, Path, PathBuf};

use crate::constants::DESCRIPTOR_FILE_NAME;

/// Append the conventional descriptor file name unless `path` already ends with it.
///
/// ```
/// use std::path::Path;
/// use pom_bridge::resolver::path_helpers::descriptor_file;
///
/// assert_eq!(descriptor_file(Path::new("service")), Path::new("service/pom.xml"));
/// assert_eq!(descriptor_file(Path::new("service/pom.xml")), Path::new("service/pom.xml"));
/// ```
pub fn descriptor_file(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|name| name == DESCRIPTOR_FILE_NAME) {
        path.to_path_buf()
    } else {
        path.join(DESCRIPTOR_FILE_NAME)
    }
}

/// Lexically normalize a path: drop `.`, fold `name/..`.
///
/// Leading `..` components that have nothing to fold into are kept, so a parent that
/// lives above the resolution root is still addressed correctly.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Where a `<relativePath>` points, seen from the child descriptor file.
pub fn parent_descriptor_path(child_descriptor: &Path, relative_path: &str) -> PathBuf {
    let base = child_descriptor.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&base.join(descriptor_file(Path::new(relative_path))))
}

/// The project root of a descriptor: its containing directory.
pub fn project_root(descriptor: &Path) -> PathBuf {
    descriptor.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_and_keeps_leading_parents() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("../../x")), PathBuf::from("../../x"));
        assert_eq!(normalize_path(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_parent_descriptor_path() {
        assert_eq!(
            parent_descriptor_path(Path::new("services/api/pom.xml"), "../parent"),
            PathBuf::from("services/parent/pom.xml")
        );
        assert_eq!(
            parent_descriptor_path(Path::new("services/api/pom.xml"), "../pom.xml"),
            PathBuf::from("services/pom.xml")
        );
        assert_eq!(
            parent_descriptor_path(Path::new("pom.xml"), "../shared"),
            PathBuf::from("../shared/pom.xml")
        );
    }

    #[test]
    fn test_project_root() {
        assert_eq!(project_root(Path::new("services/api/pom.xml")), PathBuf::from("services/api"));
        assert_eq!(project_root(Path::new("pom.xml")), PathBuf::from(""));
    }
}
