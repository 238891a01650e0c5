//! Fixtures for descriptor trees on disk

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fluent builder for `pom.xml` content.
#[derive(Debug, Clone, Default)]
pub struct PomBuilder {
    group_id: Option<String>,
    artifact_id: Option<String>,
    parent: Option<(String, String, Option<String>, Option<String>)>,
    properties: Vec<(String, String)>,
    modules: Vec<String>,
    dependencies: Vec<DependencyEntry>,
    managed: Vec<DependencyEntry>,
}

/// One `<dependency>` in a [`PomBuilder`].
#[derive(Debug, Clone, Default)]
pub struct DependencyEntry {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<String>,
    kind: Option<String>,
    classifier: Option<String>,
    exclusions: Vec<(String, String)>,
}

impl DependencyEntry {
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn classifier(mut self, classifier: &str) -> Self {
        self.classifier = Some(classifier.to_string());
        self
    }

    pub fn exclude(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.exclusions.push((group_id.to_string(), artifact_id.to_string()));
        self
    }

    fn render(&self, indent: &str, out: &mut String) {
        out.push_str(&format!("{indent}<dependency>\n"));
        let inner = format!("{indent}  ");
        push_element(out, &inner, "groupId", Some(&self.group_id));
        push_element(out, &inner, "artifactId", Some(&self.artifact_id));
        push_element(out, &inner, "version", self.version.as_deref());
        push_element(out, &inner, "scope", self.scope.as_deref());
        push_element(out, &inner, "type", self.kind.as_deref());
        push_element(out, &inner, "classifier", self.classifier.as_deref());
        if !self.exclusions.is_empty() {
            out.push_str(&format!("{inner}<exclusions>\n"));
            for (group_id, artifact_id) in &self.exclusions {
                out.push_str(&format!("{inner}  <exclusion>\n"));
                push_element(out, &format!("{inner}    "), "groupId", Some(group_id));
                push_element(out, &format!("{inner}    "), "artifactId", Some(artifact_id));
                out.push_str(&format!("{inner}  </exclusion>\n"));
            }
            out.push_str(&format!("{inner}</exclusions>\n"));
        }
        out.push_str(&format!("{indent}</dependency>\n"));
    }
}

fn push_element(out: &mut String, indent: &str, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("{indent}<{name}>{}</{name}>\n", escape(value)));
    }
}

impl PomBuilder {
    /// A descriptor with the given coordinate.
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: Some(group_id.to_string()),
            artifact_id: Some(artifact_id.to_string()),
            ..Self::default()
        }
    }

    /// An aggregator descriptor listing `modules`.
    pub fn aggregator(modules: &[&str]) -> Self {
        Self {
            group_id: Some("com.example".to_string()),
            artifact_id: Some("aggregator".to_string()),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Declare a `<parent>` with a `<relativePath>`.
    pub fn parent(mut self, group_id: &str, artifact_id: &str, relative_path: &str) -> Self {
        self.parent = Some((
            group_id.to_string(),
            artifact_id.to_string(),
            Some("1.0".to_string()),
            Some(relative_path.to_string()),
        ));
        self
    }

    /// Declare a `<parent>` without `<relativePath>`, which is never followed.
    pub fn unlinked_parent(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.parent =
            Some((group_id.to_string(), artifact_id.to_string(), Some("1.0".to_string()), None));
        self
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.properties.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a dependency, configured through `configure`.
    pub fn dependency(
        mut self,
        group_id: &str,
        artifact_id: &str,
        configure: impl FnOnce(DependencyEntry) -> DependencyEntry,
    ) -> Self {
        self.dependencies.push(configure(DependencyEntry {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            ..DependencyEntry::default()
        }));
        self
    }

    /// Add a `<dependencyManagement>` entry.
    pub fn managed(
        mut self,
        group_id: &str,
        artifact_id: &str,
        configure: impl FnOnce(DependencyEntry) -> DependencyEntry,
    ) -> Self {
        self.managed.push(configure(DependencyEntry {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            ..DependencyEntry::default()
        }));
        self
    }

    /// Render the descriptor XML.
    pub fn build(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n");
        if let Some((group_id, artifact_id, version, relative_path)) = &self.parent {
            out.push_str("  <parent>\n");
            push_element(&mut out, "    ", "groupId", Some(group_id));
            push_element(&mut out, "    ", "artifactId", Some(artifact_id));
            push_element(&mut out, "    ", "version", version.as_deref());
            push_element(&mut out, "    ", "relativePath", relative_path.as_deref());
            out.push_str("  </parent>\n");
        }
        push_element(&mut out, "  ", "groupId", self.group_id.as_deref());
        push_element(&mut out, "  ", "artifactId", self.artifact_id.as_deref());
        if !self.properties.is_empty() {
            out.push_str("  <properties>\n");
            for (name, value) in &self.properties {
                push_element(&mut out, "    ", name, Some(value));
            }
            out.push_str("  </properties>\n");
        }
        if !self.modules.is_empty() {
            out.push_str("  <modules>\n");
            for module in &self.modules {
                push_element(&mut out, "    ", "module", Some(module));
            }
            out.push_str("  </modules>\n");
        }
        if !self.managed.is_empty() {
            out.push_str("  <dependencyManagement>\n    <dependencies>\n");
            for dependency in &self.managed {
                dependency.render("      ", &mut out);
            }
            out.push_str("    </dependencies>\n  </dependencyManagement>\n");
        }
        if !self.dependencies.is_empty() {
            out.push_str("  <dependencies>\n");
            for dependency in &self.dependencies {
                dependency.render("    ", &mut out);
            }
            out.push_str("  </dependencies>\n");
        }
        out.push_str("</project>\n");
        out
    }
}

/// A temporary repository tree of modules and source directories.
pub struct ProjectFixture {
    temp_dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp directory")?,
        })
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` as `<module>/pom.xml`; an empty module writes the root descriptor.
    pub fn write_pom(&self, module: &str, content: &str) -> Result<PathBuf> {
        let dir = self.root().join(module);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("pom.xml");
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Create `<module>/<source_dir>` without any entries.
    pub fn add_empty_dir(&self, module: &str, source_dir: &str) -> Result<PathBuf> {
        let dir = self.root().join(module).join(source_dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }

    /// Create `<module>/<source_dir>/<file_name>`.
    pub fn add_source_file(
        &self,
        module: &str,
        source_dir: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        let dir = self.add_empty_dir(module, source_dir)?;
        let path = dir.join(file_name);
        fs::write(&path, "").with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
