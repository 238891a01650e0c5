//! The extractors the resolution engine is built on.
//!
//! - [`ProjectInfo`]: own coordinate, `<parent>` link and `<properties>`
//! - [`DependencyListInfo`]: `<dependencies>`, plus the parent itself as one record
//! - [`DependencyManagementInfo`]: `<dependencyManagement><dependencies>`
//! - [`ModuleListInfo`]: `<modules>` of an aggregator descriptor

use std::collections::BTreeMap;
use tracing::trace;

use super::extractor::{InfoBuilder, PomInfo};
use super::parser::ParseView;
use crate::models::{Coordinate, DependencyRecord, ExclusionRecord, ParentLink};

/// Own coordinate, parent link and properties of a descriptor, before any merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub parent: ParentLink,
    pub properties: BTreeMap<String, String>,
}

#[derive(Default)]
pub struct ProjectInfoBuilder(ProjectInfo);

impl InfoBuilder for ProjectInfoBuilder {
    type Info = ProjectInfo;

    fn end_element(&mut self, name: &str, view: &ParseView<'_>) {
        let info = &mut self.0;
        let text = || Some(view.text().to_string());

        if view.path_is(&["project", "groupId"]) {
            info.group_id = text();
        } else if view.path_is(&["project", "artifactId"]) {
            info.artifact_id = text();
        } else if view.path_is(&["project", "version"]) {
            info.version = text();
        } else if view.path_starts_with(&["project", "properties"]) && view.depth() == 3 {
            info.properties.insert(name.to_string(), view.text().to_string());
        } else if view.path_starts_with(&["project", "parent"]) && view.depth() == 3 {
            match name {
                "groupId" => info.parent.group_id = text(),
                "artifactId" => info.parent.artifact_id = text(),
                "version" => info.parent.version = text(),
                "relativePath" => info.parent.relative_path = text(),
                _ => {}
            }
        }
    }

    fn finish(self) -> ProjectInfo {
        self.0
    }
}

impl PomInfo for ProjectInfo {
    const NAME: &'static str = "ProjectInfo";
    type Builder = ProjectInfoBuilder;
}

/// Partially read `<dependency>` or `<parent>` block.
#[derive(Debug, Default)]
struct PendingDependency {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    scope: Option<String>,
    kind: Option<String>,
    classifier: Option<String>,
    exclusions: Vec<ExclusionRecord>,
}

impl PendingDependency {
    fn set(&mut self, field: &str, value: &str) {
        let value = Some(value.to_string());
        match field {
            "groupId" => self.group_id = value,
            "artifactId" => self.artifact_id = value,
            "version" => self.version = value,
            "scope" => self.scope = value,
            "type" => self.kind = value,
            "classifier" => self.classifier = value,
            _ => {}
        }
    }

    /// Records without both coordinate parts are dropped.
    fn into_record(self) -> Option<DependencyRecord> {
        let (Some(group_id), Some(artifact_id)) = (self.group_id, self.artifact_id) else {
            trace!("Dropping dependency declaration without groupId and artifactId");
            return None;
        };
        Some(DependencyRecord {
            coordinate: Coordinate::new(group_id, artifact_id),
            version: self.version,
            scope: self.scope,
            kind: self.kind,
            classifier: self.classifier,
            exclusions: self.exclusions,
        })
    }
}

/// Collects `<dependency>` blocks found directly under `base`.
#[derive(Debug, Default)]
struct DependencyCollector {
    dependency: PendingDependency,
    exclusion: (Option<String>, Option<String>),
    records: Vec<DependencyRecord>,
}

impl DependencyCollector {
    fn end_element(&mut self, base: &[&str], name: &str, view: &ParseView<'_>) {
        if !view.path_starts_with(base) {
            return;
        }
        let depth = view.depth() - base.len();
        let in_exclusion = view
            .path()
            .get(base.len()..base.len() + 2)
            .is_some_and(|p| p[0] == "exclusions" && p[1] == "exclusion");

        if in_exclusion {
            match depth {
                3 => match name {
                    "groupId" => self.exclusion.0 = Some(view.text().to_string()),
                    "artifactId" => self.exclusion.1 = Some(view.text().to_string()),
                    _ => {}
                },
                2 => match std::mem::take(&mut self.exclusion) {
                    (Some(group_id), Some(artifact_id)) => {
                        self.dependency.exclusions.push(ExclusionRecord {
                            coordinate: Coordinate::new(group_id, artifact_id),
                        });
                    }
                    _ => trace!("Dropping exclusion without groupId and artifactId"),
                },
                _ => {}
            }
        } else if depth == 1 {
            self.dependency.set(name, view.text());
        } else if depth == 0 {
            if let Some(record) = std::mem::take(&mut self.dependency).into_record() {
                self.records.push(record);
            }
        }
    }
}

const DEPENDENCY_PATH: &[&str] = &["project", "dependencies", "dependency"];
const MANAGED_DEPENDENCY_PATH: &[&str] =
    &["project", "dependencyManagement", "dependencies", "dependency"];

/// Declared dependencies in document order.
///
/// The `<parent>` coordinate and version are included as one more record, the way
/// the legacy build tool treats the parent artifact as a dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyListInfo {
    pub dependencies: Vec<DependencyRecord>,
}

#[derive(Default)]
pub struct DependencyListBuilder {
    collector: DependencyCollector,
    parent: PendingDependency,
}

impl InfoBuilder for DependencyListBuilder {
    type Info = DependencyListInfo;

    fn end_element(&mut self, name: &str, view: &ParseView<'_>) {
        if view.path_starts_with(&["project", "parent"]) {
            match view.depth() {
                3 => self.parent.set(name, view.text()),
                2 => {
                    if let Some(record) = std::mem::take(&mut self.parent).into_record() {
                        self.collector.records.push(record);
                    }
                }
                _ => {}
            }
            return;
        }
        self.collector.end_element(DEPENDENCY_PATH, name, view);
    }

    fn finish(self) -> DependencyListInfo {
        DependencyListInfo {
            dependencies: self.collector.records,
        }
    }
}

impl PomInfo for DependencyListInfo {
    const NAME: &'static str = "DependencyListInfo";
    type Builder = DependencyListBuilder;
}

/// Entries of `<dependencyManagement><dependencies>` in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManagementInfo {
    pub dependencies: Vec<DependencyRecord>,
}

#[derive(Default)]
pub struct DependencyManagementBuilder(DependencyCollector);

impl InfoBuilder for DependencyManagementBuilder {
    type Info = DependencyManagementInfo;

    fn end_element(&mut self, name: &str, view: &ParseView<'_>) {
        self.0.end_element(MANAGED_DEPENDENCY_PATH, name, view);
    }

    fn finish(self) -> DependencyManagementInfo {
        DependencyManagementInfo {
            dependencies: self.0.records,
        }
    }
}

impl PomInfo for DependencyManagementInfo {
    const NAME: &'static str = "DependencyManagementInfo";
    type Builder = DependencyManagementBuilder;
}

/// `<modules><module>` entries of an aggregator descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleListInfo {
    pub modules: Vec<String>,
}

#[derive(Default)]
pub struct ModuleListBuilder(ModuleListInfo);

impl InfoBuilder for ModuleListBuilder {
    type Info = ModuleListInfo;

    fn end_element(&mut self, _name: &str, view: &ParseView<'_>) {
        if view.path_is(&["project", "modules", "module"]) {
            self.0.modules.push(view.text().to_string());
        }
    }

    fn finish(self) -> ModuleListInfo {
        self.0
    }
}

impl PomInfo for ModuleListInfo {
    const NAME: &'static str = "ModuleListInfo";
    type Builder = ModuleListBuilder;
}
