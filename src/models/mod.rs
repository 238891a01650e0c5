//! Shared data models for descriptor resolution
//!
//! These are plain value types: the extractors produce them, the resolver merges them,
//! and the reference builder classifies them. Dependency and exclusion records use fixed
//! fields rather than open maps so a misspelt field is a compile error, not a silent miss.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::TEST_SCOPE;

/// A `(groupId, artifactId)` pair identifying a module or dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// The `<groupId>` value, empty if the descriptor declares none
    pub group_id: String,
    /// The `<artifactId>` value
    pub artifact_id: String,
}

impl Coordinate {
    /// Create a coordinate from its two parts.
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// The qualified `groupId.artifactId` form used as a lookup key.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.group_id, self.artifact_id)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// An `<exclusion>` inside a dependency declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExclusionRecord {
    /// Artifact to exclude from the dependency's transitive closure
    pub coordinate: Coordinate,
}

/// A `<dependency>` declaration.
///
/// Field order matters: the derived ordering is the sort order used before
/// partitioning dependencies by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyRecord {
    /// Dependency identity; child declarations override parent ones on this key
    pub coordinate: Coordinate,
    /// `<version>`, required only when an external reference is built
    pub version: Option<String>,
    /// `<scope>`; `test` routes the record into the test partition
    pub scope: Option<String>,
    /// `<type>`, e.g. `test-jar`
    pub kind: Option<String>,
    /// `<classifier>`
    pub classifier: Option<String>,
    /// `<exclusions>` in declaration order
    pub exclusions: Vec<ExclusionRecord>,
}

impl DependencyRecord {
    /// True when the declared scope is `test`.
    pub fn is_test_scoped(&self) -> bool {
        self.scope.as_deref() == Some(TEST_SCOPE)
    }

    /// Apply `f` to every textual field, exclusions included.
    pub fn map_fields(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let mut map_opt = |value: &Option<String>| value.as_deref().map(&mut f);
        let version = map_opt(&self.version);
        let scope = map_opt(&self.scope);
        let kind = map_opt(&self.kind);
        let classifier = map_opt(&self.classifier);
        Self {
            coordinate: Coordinate::new(
                f(&self.coordinate.group_id),
                f(&self.coordinate.artifact_id),
            ),
            version,
            scope,
            kind,
            classifier,
            exclusions: self
                .exclusions
                .iter()
                .map(|e| ExclusionRecord {
                    coordinate: Coordinate::new(
                        f(&e.coordinate.group_id),
                        f(&e.coordinate.artifact_id),
                    ),
                })
                .collect(),
        }
    }
}

/// Which partition of a module's dependencies to build references for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    /// Everything not scoped `test`
    Library,
    /// Dependencies scoped `test`
    Test,
}

/// Raw `<parent>` block as declared in a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLink {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

impl ParentLink {
    /// The relative path, but only if the link names a full coordinate too.
    ///
    /// A parent without an explicit `<relativePath>` is not followed.
    pub fn followable_path(&self) -> Option<&str> {
        match (&self.group_id, &self.artifact_id, &self.relative_path) {
            (Some(_), Some(_), Some(path)) => Some(path.as_str()),
            _ => None,
        }
    }
}

/// Parsed module metadata with its parent chain already merged in.
///
/// Descriptors are created on a cache miss and never change afterwards. The parent is
/// kept as a lookup key into the resolver's cache, not as an owned value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    /// Descriptor file path as resolved (relative to `root` when one was given)
    pub source: PathBuf,
    /// Resolution root the path is relative to
    pub root: Option<PathBuf>,
    /// Own coordinate; `None` when the file did not exist
    pub coordinate: Option<Coordinate>,
    /// Effective properties after merge and substitution
    pub properties: BTreeMap<String, String>,
    /// Effective dependencies after merge and substitution
    pub dependencies: Vec<DependencyRecord>,
    /// Path of the parent descriptor, if the parent link was followable
    pub parent: Option<PathBuf>,
}

impl Descriptor {
    /// The placeholder for a descriptor file that does not exist.
    pub fn empty(source: &Path, root: Option<&Path>) -> Self {
        Self {
            source: source.to_path_buf(),
            root: root.map(Path::to_path_buf),
            ..Self::default()
        }
    }

    /// True if this stands in for a missing file.
    pub fn is_empty(&self) -> bool {
        self.coordinate.is_none()
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.coordinate.as_ref().map(|c| c.artifact_id.as_str())
    }

    pub fn group_id(&self) -> Option<&str> {
        self.coordinate.as_ref().map(|c| c.group_id.as_str())
    }

    /// Property value, or empty string when undefined.
    pub fn property(&self, name: &str) -> &str {
        self.properties.get(name).map_or("", String::as_str)
    }
}
