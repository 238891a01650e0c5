//! Constants shared across the resolution engine.
//!
//! File names, namespaces, and Maven vocabulary that several modules need to
//! agree on are defined here so the heuristics stay discoverable.

/// Conventional descriptor file name appended to bare module directories.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

/// Default alias namespace for third-party references (`'3rdparty:group.artifact'`).
pub const DEFAULT_THIRD_PARTY_NAMESPACE: &str = "3rdparty";

/// Project roots under this prefix get a protocol target even before their
/// generated sources exist on disk.
pub const DEFAULT_EXTERNAL_PROTOS_PREFIX: &str = "external-protos";

/// Dependency scope that routes a record into the test partition.
pub const TEST_SCOPE: &str = "test";

/// Dependency type Maven uses for test archives.
pub const TEST_JAR_TYPE: &str = "test-jar";

/// Classifier the destination resolver expects for test archives.
pub const TESTS_CLASSIFIER: &str = "tests";

/// Source-tree prefix used for test-archive dependencies.
pub const TEST_SOURCE_PREFIX: &str = "src/test/";

/// Source-tree prefix used for every other local dependency.
pub const MAIN_SOURCE_PREFIX: &str = "src/main/";
