//! Buildable targets derived from a project's directory layout.
//!
//! A project root always has the whole-project `<root>:lib` target. Beyond that each
//! conventional source directory that exists *and has at least one entry* contributes
//! `<root>/<dir>:<kind>` for each of its kinds ([`SOURCE_LAYOUT`]). Empty directories
//! contribute nothing.
//!
//! Roots under the external-protos namespace always get `<root>/src/main/proto:proto`,
//! because their generated sources may not be materialized yet.
//!
//! Results are cached per project root for the lifetime of the [`TargetIndex`].

use dashmap::DashMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::DEFAULT_EXTERNAL_PROTOS_PREFIX;

/// Target kinds contributed by each conventional source directory.
pub const SOURCE_LAYOUT: &[(&str, &[&str])] = &[
    ("src/main/java", &["lib"]),
    ("src/main/proto", &["proto"]),
    ("src/main/resources", &["resources"]),
    ("src/test/java", &["lib", "test"]),
    ("src/test/proto", &["proto"]),
    ("src/test/resources", &["resources"]),
    ("src/main/wire_proto", &["wire_proto"]),
];

/// Directory that is assumed populated for external-protos roots.
const EXTERNAL_PROTO_DIR: &str = "src/main/proto";

/// Set of target strings for one project root.
pub type TargetSet = BTreeSet<String>;

/// Per-root cache of [`TargetSet`]s.
#[derive(Debug)]
pub struct TargetIndex {
    base_dir: PathBuf,
    external_protos_prefix: String,
    entries: DashMap<String, Arc<TargetSet>>,
}

impl Default for TargetIndex {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TargetIndex {
    /// An index checking directories relative to `base_dir`.
    ///
    /// Target strings are built from the project root as given, not from `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            external_protos_prefix: DEFAULT_EXTERNAL_PROTOS_PREFIX.to_string(),
            entries: DashMap::new(),
        }
    }

    /// Override the external-protos namespace.
    #[must_use]
    pub fn with_external_protos_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.external_protos_prefix = prefix.into();
        self
    }

    /// The targets of `project_root`, computed on first request.
    pub fn targets(&self, project_root: &str) -> Arc<TargetSet> {
        if let Some(cached) = self.entries.get(project_root) {
            return cached.value().clone();
        }
        let computed = Arc::new(self.compute(project_root));
        self.entries.entry(project_root.to_string()).or_insert(computed).value().clone()
    }

    /// Whether `target` is among the targets of `project_root`.
    pub fn contains(&self, project_root: &str, target: &str) -> bool {
        self.targets(project_root).contains(target)
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn compute(&self, project_root: &str) -> TargetSet {
        let mut targets = TargetSet::new();
        targets.insert(format!("{project_root}:lib"));

        for (dir, kinds) in SOURCE_LAYOUT {
            if self.is_candidate_dir(&Path::new(project_root).join(dir)) {
                for kind in *kinds {
                    targets.insert(target_name(project_root, dir, kind));
                }
            }
        }

        if project_root.starts_with(&self.external_protos_prefix) {
            targets.insert(target_name(project_root, EXTERNAL_PROTO_DIR, "proto"));
        }

        debug!(target: "targets", "Targets for {}: {:?}", project_root, targets);
        targets
    }

    /// True for an existing directory with at least one entry.
    fn is_candidate_dir(&self, relative: &Path) -> bool {
        let dir = self.base_dir.join(relative);
        if !dir.is_dir() {
            return false;
        }
        match std::fs::read_dir(&dir) {
            Ok(mut entries) => entries.next().is_some(),
            Err(e) => {
                warn!(target: "targets", "Cannot list {}: {}", dir.display(), e);
                false
            }
        }
    }
}

/// `<root>/<dir>:<kind>`.
pub fn target_name(project_root: &str, dir: &str, kind: &str) -> String {
    if project_root.is_empty() {
        format!("{dir}:{kind}")
    } else {
        format!("{}/{dir}:{kind}", project_root.trim_end_matches('/'))
    }
}
