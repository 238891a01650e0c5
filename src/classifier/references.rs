//! Build-file references for a module's dependencies.
//!
//! References for one scope come out in three groups, in this order:
//!
//! 1. local targets, looked up through the [`TargetCatalog`] and the [`TargetIndex`]
//! 2. third-party aliases
//! 3. external `jar(...)` artifacts
//!
//! Within each group the sorted dependency order is kept.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::policy::{ClassificationPolicy, DependencyClass};
use crate::catalog::TargetCatalog;
use crate::constants::{
    DEFAULT_THIRD_PARTY_NAMESPACE, MAIN_SOURCE_PREFIX, TEST_JAR_TYPE, TEST_SOURCE_PREFIX,
};
use crate::core::PomError;
use crate::models::{DependencyRecord, DependencyScope, Descriptor};
use crate::resolver::Resolver;
use crate::resolver::path_helpers::project_root;
use crate::targets::{TargetIndex, target_name};
use crate::templating::{ArtifactRef, ArtifactRenderer, local_reference, third_party_reference};

/// Local target lookup order, as `(source directory, kind)` under the chosen source
/// prefix. A library target covers the others when it exists.
pub const LOCAL_TARGET_PRECEDENCE: &[(&str, &str)] = &[
    ("java", "lib"),
    ("proto", "proto"),
    ("wire_proto", "wire_proto"),
    ("resources", "resources"),
];

/// Sorted dependencies split by scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub library: Vec<DependencyRecord>,
    pub test: Vec<DependencyRecord>,
}

impl Partition {
    pub fn scope(&self, scope: DependencyScope) -> &[DependencyRecord] {
        match scope {
            DependencyScope::Library => &self.library,
            DependencyScope::Test => &self.test,
        }
    }
}

/// Sort `descriptor`'s effective dependencies and split them on `scope == "test"`.
pub fn partition(descriptor: &Descriptor) -> Partition {
    let mut sorted = descriptor.dependencies.clone();
    sorted.sort();
    let (test, library) = sorted.into_iter().partition(DependencyRecord::is_test_scoped);
    Partition {
        library,
        test,
    }
}

/// A module's identity, properties and partitioned dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDependencies {
    /// Qualified `group.artifact` id; empty when the descriptor does not exist
    pub target: String,
    pub group_id: String,
    pub artifact_id: String,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Partition,
}

impl ModuleDependencies {
    /// Property value, or empty string when undefined.
    pub fn property(&self, name: &str) -> &str {
        self.properties.get(name).map_or("", String::as_str)
    }
}

/// Knobs for [`ReferenceBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOptions {
    /// Resolution root for descriptor paths
    pub root: Option<PathBuf>,
    /// Namespace of third-party aliases
    pub third_party_namespace: String,
    /// Project roots whose local references are dropped
    pub exclude_project_targets: BTreeSet<String>,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            root: None,
            third_party_namespace: DEFAULT_THIRD_PARTY_NAMESPACE.to_string(),
            exclude_project_targets: BTreeSet::new(),
        }
    }
}

/// Turns resolved dependencies into ordered reference strings.
pub struct ReferenceBuilder<'a> {
    resolver: &'a Resolver,
    catalog: &'a TargetCatalog,
    targets: &'a TargetIndex,
    policy: &'a dyn ClassificationPolicy,
    renderer: &'a ArtifactRenderer,
    options: &'a ReferenceOptions,
}

impl<'a> ReferenceBuilder<'a> {
    pub fn new(
        resolver: &'a Resolver,
        catalog: &'a TargetCatalog,
        targets: &'a TargetIndex,
        policy: &'a dyn ClassificationPolicy,
        renderer: &'a ArtifactRenderer,
        options: &'a ReferenceOptions,
    ) -> Self {
        Self {
            resolver,
            catalog,
            targets,
            policy,
            renderer,
            options,
        }
    }

    /// Resolve `pom` and partition its dependencies.
    pub fn dependencies(&self, pom: &Path) -> Result<ModuleDependencies, PomError> {
        let descriptor = self.resolver.resolve(pom, self.options.root.as_deref())?;
        let coordinate = descriptor.coordinate.clone().unwrap_or_default();
        Ok(ModuleDependencies {
            target: if descriptor.is_empty() { String::new() } else { coordinate.qualified() },
            group_id: coordinate.group_id,
            artifact_id: coordinate.artifact_id,
            properties: descriptor.properties.clone(),
            dependencies: partition(&descriptor),
        })
    }

    /// Ordered references for the `scope` dependencies of `pom`.
    ///
    /// # Errors
    ///
    /// Resolution errors, [`PomError::MissingVersion`] for an unversioned external
    /// dependency, or [`PomError::Template`] if rendering fails.
    pub fn references(&self, pom: &Path, scope: DependencyScope) -> Result<Vec<String>, PomError> {
        let module = self.dependencies(pom)?;
        self.build_references(module.dependencies.scope(scope), pom)
    }

    /// References for an already partitioned dependency list declared in `pom_file`.
    pub fn build_references(
        &self,
        deps: &[DependencyRecord],
        pom_file: &Path,
    ) -> Result<Vec<String>, PomError> {
        let classes: Vec<DependencyClass> =
            deps.iter().map(|dep| self.policy.classify(&dep.coordinate.qualified())).collect();
        let classified = || deps.iter().zip(classes.iter().copied());

        let mut refs = Vec::with_capacity(deps.len());

        for (dep, _) in classified().filter(|(_, c)| *c == DependencyClass::Local) {
            if let Some(target) = self.local_target(dep) {
                refs.push(local_reference(&target));
            }
        }

        for (dep, _) in classified().filter(|(_, c)| *c == DependencyClass::ThirdParty) {
            refs.push(third_party_reference(&self.options.third_party_namespace, &dep.coordinate));
        }

        for (dep, _) in classified().filter(|(_, c)| *c == DependencyClass::External) {
            let Some(version) = dep.version.as_deref() else {
                return Err(PomError::MissingVersion {
                    artifact_id: dep.coordinate.artifact_id.clone(),
                    group_id: dep.coordinate.group_id.clone(),
                    pom_file: pom_file.to_path_buf(),
                });
            };
            refs.push(self.renderer.render(&ArtifactRef::from_record(dep, version))?);
        }

        Ok(refs)
    }

    /// The best local target for `dep`, or `None` if it should be dropped.
    fn local_target(&self, dep: &DependencyRecord) -> Option<String> {
        let qualified = dep.coordinate.qualified();
        let root = match self.catalog.find_target(&qualified).first() {
            Some(pom) => project_root(pom).to_string_lossy().into_owned(),
            None => {
                debug!(
                    target: "classifier",
                    "{} not in catalog, guessing root {}",
                    qualified,
                    dep.coordinate.artifact_id
                );
                dep.coordinate.artifact_id.clone()
            }
        };

        if self.options.exclude_project_targets.contains(&root) {
            debug!(target: "classifier", "Dropping {}: project {} is excluded", qualified, root);
            return None;
        }

        let prefix = if dep.kind.as_deref() == Some(TEST_JAR_TYPE) {
            TEST_SOURCE_PREFIX
        } else {
            MAIN_SOURCE_PREFIX
        };
        let target = closest_match(self.targets, &root, prefix);
        if target.is_none() {
            debug!(
                target: "classifier",
                "Dropping {}: no target under {}/{}",
                qualified,
                root,
                prefix
            );
        }
        target
    }
}

/// First target of [`LOCAL_TARGET_PRECEDENCE`] that exists under `project_root/prefix`.
pub fn closest_match(targets: &TargetIndex, project_root: &str, prefix: &str) -> Option<String> {
    let available = targets.targets(project_root);
    LOCAL_TARGET_PRECEDENCE
        .iter()
        .map(|(dir, kind)| target_name(project_root, &format!("{prefix}{dir}"), kind))
        .find(|candidate| available.contains(candidate))
}
