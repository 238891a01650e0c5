//! Index of which repository module provides which artifact.
//!
//! The catalog is built once from a list of module directories. Every module's
//! descriptor is resolved and its path (`<module>/pom.xml`) is recorded under the bare
//! artifact id and under the qualified `groupId.artifactId` id. Both keys map to lists
//! because unrelated modules may reuse an artifact id; callers must cope with zero, one
//! or many matches.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::PomError;
use crate::resolver::Resolver;
use crate::resolver::path_helpers::descriptor_file;

/// Artifact lookups over the modules of one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetCatalog {
    by_artifact: BTreeMap<String, Vec<PathBuf>>,
    by_target: BTreeMap<String, Vec<PathBuf>>,
}

impl TargetCatalog {
    /// Resolve each module in `modules` and index it.
    ///
    /// Modules without a descriptor are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Propagates malformed-document and cyclic-inheritance errors from resolution.
    pub fn build<S: AsRef<str>>(
        resolver: &Resolver,
        modules: &[S],
        root: Option<&Path>,
    ) -> Result<Self, PomError> {
        let mut catalog = Self::default();
        for module in modules {
            let pom = descriptor_file(Path::new(module.as_ref()));
            let descriptor = resolver.resolve(&pom, root)?;
            let Some(coordinate) = &descriptor.coordinate else {
                warn!(
                    target: "catalog",
                    "Module {} has no descriptor at {}, skipping",
                    module.as_ref(),
                    pom.display()
                );
                continue;
            };
            catalog
                .by_artifact
                .entry(coordinate.artifact_id.clone())
                .or_default()
                .push(pom.clone());
            catalog.by_target.entry(coordinate.qualified()).or_default().push(pom);
        }
        debug!(
            target: "catalog",
            "Indexed {} targets from {} modules",
            catalog.by_target.len(),
            modules.len()
        );
        Ok(catalog)
    }

    /// Build from the `<modules>` list of the aggregator descriptor `top_pom`.
    pub fn from_top_pom(
        resolver: &Resolver,
        top_pom: &Path,
        root: Option<&Path>,
    ) -> Result<Self, PomError> {
        let modules = resolver.modules(top_pom, root)?;
        debug!(target: "catalog", "Modules of {}: {:?}", top_pom.display(), modules);
        Self::build(resolver, &modules, root)
    }

    /// Descriptor paths of modules whose artifact id is `artifact_id`.
    pub fn find_artifact(&self, artifact_id: &str) -> &[PathBuf] {
        self.by_artifact.get(artifact_id).map_or(&[], Vec::as_slice)
    }

    /// Descriptor paths of modules providing the qualified id `group.artifact`.
    pub fn find_target(&self, qualified: &str) -> &[PathBuf] {
        self.by_target.get(qualified).map_or(&[], Vec::as_slice)
    }

    /// Every known qualified id, sorted.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.by_target.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}
