//! Descriptor resolution with parent-chain merging.
//!
//! [`Resolver::resolve`] turns a descriptor path into an effective [`Descriptor`]:
//!
//! 1. A bare directory gets `pom.xml` appended.
//! 2. A descriptor file that does not exist resolves to an empty descriptor. Modules get
//!    removed while other descriptors still point at them; that is not an error.
//! 3. Own coordinate, properties and dependencies come from the [`ResolutionCache`]. The
//!    `<parent>` coordinate is itself one of the dependencies.
//! 4. If the `<parent>` names a coordinate and a `<relativePath>`, the parent descriptor
//!    is resolved recursively through the same caches, so shared parents are built once.
//! 5. Merge: parent dependencies are appended unless the child declares the same
//!    coordinate; parent properties are overridden by the child's.
//! 6. Substitute once: every property value against the merged map, then every field
//!    of every dependency against the substituted map.
//!
//! A parent chain that loops back on itself fails with
//! [`PomError::CyclicInheritance`] instead of recursing forever.
//!
//! # Caching
//!
//! Effective descriptors are cached per `(path, root)`. Resolution happens outside any
//! map lock and the result is published with `entry().or_insert`, so callers racing on
//! the same key all get the first published `Arc`. The parses underneath are
//! single-flight through the [`ResolutionCache`].

pub mod path_helpers;
pub mod substitution;


use dashmap::DashMap;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::core::PomError;
use crate::models::{Coordinate, DependencyRecord, Descriptor};
use crate::pom::{
    CacheKey, DependencyListInfo, DependencyManagementInfo, ModuleListInfo, ProjectInfo,
    ResolutionCache,
};
use path_helpers::{descriptor_file, normalize_path, parent_descriptor_path};
use substitution::{substitute_properties, substitute_record};

/// Resolves descriptors and caches the effective results.
#[derive(Debug, Default)]
pub struct Resolver {
    cache: ResolutionCache,
    descriptors: DashMap<CacheKey, Arc<Descriptor>>,
}

impl Resolver {
    /// A resolver on top of an existing parse cache.
    pub fn new(cache: ResolutionCache) -> Self {
        Self {
            cache,
            descriptors: DashMap::new(),
        }
    }

    /// The parse cache underneath.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolve the effective descriptor for `path` (a file or a module directory).
    ///
    /// # Errors
    ///
    /// - [`PomError::MalformedDocument`] if this descriptor or any ancestor is not valid XML
    /// - [`PomError::CyclicInheritance`] if the parent chain loops
    /// - [`PomError::MissingInfo`] if the parse cache was built without the core extractors
    pub fn resolve(&self, path: &Path, root: Option<&Path>) -> Result<Arc<Descriptor>, PomError> {
        self.resolve_chain(path, root, &mut Vec::new())
    }

    /// The parent of an already resolved descriptor, if it has a followable link.
    pub fn parent(&self, descriptor: &Descriptor) -> Result<Option<Arc<Descriptor>>, PomError> {
        descriptor
            .parent
            .as_deref()
            .map(|parent| self.resolve(parent, descriptor.root.as_deref()))
            .transpose()
    }

    /// `<dependencyManagement>` entries, substituted against the descriptor's own
    /// properties. Parents are not consulted. A missing file yields an empty list.
    pub fn managed_dependencies(
        &self,
        path: &Path,
        root: Option<&Path>,
    ) -> Result<Vec<DependencyRecord>, PomError> {
        let source = descriptor_file(path);
        let Some(results) = self.cache.results(&source, root)? else {
            return Ok(Vec::new());
        };
        let project = results.get::<ProjectInfo>()?;
        let managed = results.get::<DependencyManagementInfo>()?;
        Ok(managed
            .dependencies
            .iter()
            .map(|record| substitute_record(record, &project.properties))
            .collect())
    }

    /// `<modules>` of an aggregator descriptor. A missing file yields an empty list.
    pub fn modules(&self, path: &Path, root: Option<&Path>) -> Result<Vec<String>, PomError> {
        let source = descriptor_file(path);
        Ok(self
            .cache
            .get::<ModuleListInfo>(&source, root)?
            .map(|info| info.modules.clone())
            .unwrap_or_default())
    }

    /// Number of cached effective descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Drop every cached descriptor and parse result.
    pub fn clear(&mut self) {
        self.descriptors.clear();
        self.cache.clear();
    }

    fn resolve_chain(
        &self,
        path: &Path,
        root: Option<&Path>,
        in_progress: &mut Vec<PathBuf>,
    ) -> Result<Arc<Descriptor>, PomError> {
        let source = descriptor_file(path);
        let key = CacheKey::new(&source, root);
        if let Some(descriptor) = self.descriptors.get(&key) {
            return Ok(descriptor.value().clone());
        }

        let identity = normalize_path(&key.full_path());
        if let Some(start) = in_progress.iter().position(|p| *p == identity) {
            let mut chain = in_progress[start..].to_vec();
            chain.push(identity);
            return Err(PomError::CyclicInheritance { chain });
        }

        in_progress.push(identity);
        let built = self.build(&source, root, in_progress);
        in_progress.pop();
        let descriptor = built?;

        Ok(self.descriptors.entry(key).or_insert_with(|| Arc::new(descriptor)).value().clone())
    }

    fn build(
        &self,
        source: &Path,
        root: Option<&Path>,
        in_progress: &mut Vec<PathBuf>,
    ) -> Result<Descriptor, PomError> {
        let Some(results) = self.cache.results(source, root)? else {
            debug!(
                target: "resolver",
                "Descriptor {} does not exist, resolving as empty",
                source.display()
            );
            return Ok(Descriptor::empty(source, root));
        };
        let project = results.get::<ProjectInfo>()?;
        let declared = results.get::<DependencyListInfo>()?;

        let mut dependencies = declared.dependencies.clone();
        let mut properties = BTreeMap::new();

        let parent_path = project
            .parent
            .followable_path()
            .map(|relative| parent_descriptor_path(source, relative));
        if let Some(parent_path) = &parent_path {
            trace!(
                target: "resolver",
                "{} inherits from {}",
                source.display(),
                parent_path.display()
            );
            let parent = self.resolve_chain(parent_path, root, in_progress)?;

            let own: HashSet<&Coordinate> =
                declared.dependencies.iter().map(|d| &d.coordinate).collect();
            dependencies.extend(
                parent.dependencies.iter().filter(|d| !own.contains(&d.coordinate)).cloned(),
            );
            properties.extend(parent.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        properties.extend(project.properties.iter().map(|(k, v)| (k.clone(), v.clone())));

        let properties = substitute_properties(&properties);
        let dependencies =
            dependencies.iter().map(|record| substitute_record(record, &properties)).collect();

        Ok(Descriptor {
            source: source.to_path_buf(),
            root: root.map(Path::to_path_buf),
            coordinate: Some(Coordinate::new(
                project.group_id.clone().unwrap_or_default(),
                project.artifact_id.clone().unwrap_or_default(),
            )),
            properties,
            dependencies,
            parent: parent_path,
        })
    }
}
