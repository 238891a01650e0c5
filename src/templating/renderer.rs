//! Reference rendering with Tera.
//!
//! External artifacts render through a fixed `jar(...)` template. Local and third-party
//! references are plain quoted strings and need no engine.

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::constants::{TEST_JAR_TYPE, TESTS_CLASSIFIER};
use crate::core::PomError;
use crate::models::{Coordinate, DependencyRecord};

const JAR_TEMPLATE_NAME: &str = "jar";

/// Template for one external artifact plus its exclude clauses.
pub const JAR_TEMPLATE: &str = "jar(org='{{ org }}', name='{{ name }}', rev='{{ rev }}'\
{% if classifier %}, classifier='{{ classifier }}'{% endif %}\
{% if type_ %}, type_='{{ type_ }}'{% endif %})\
{% for exclude in excludes %}\
.exclude(org='{{ exclude.org }}', name='{{ exclude.name }}')\
{% endfor %}";

/// Template context for [`JAR_TEMPLATE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRef {
    pub org: String,
    pub name: String,
    pub rev: String,
    pub classifier: Option<String>,
    pub type_: Option<String>,
    pub excludes: Vec<ExcludeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludeRef {
    pub org: String,
    pub name: String,
}

impl ArtifactRef {
    /// Build from a record whose version is already known.
    ///
    /// A `test-jar` type becomes classifier `tests` with no type.
    pub fn from_record(record: &DependencyRecord, rev: &str) -> Self {
        let (classifier, type_) = if record.kind.as_deref() == Some(TEST_JAR_TYPE) {
            (Some(TESTS_CLASSIFIER.to_string()), None)
        } else {
            (record.classifier.clone(), record.kind.clone())
        };
        Self {
            org: record.coordinate.group_id.clone(),
            name: record.coordinate.artifact_id.clone(),
            rev: rev.to_string(),
            classifier,
            type_,
            excludes: record
                .exclusions
                .iter()
                .map(|e| ExcludeRef {
                    org: e.coordinate.group_id.clone(),
                    name: e.coordinate.artifact_id.clone(),
                })
                .collect(),
        }
    }
}

/// Renders [`ArtifactRef`]s with a pre-parsed template.
pub struct ArtifactRenderer {
    tera: Tera,
}

impl std::fmt::Debug for ArtifactRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactRenderer").finish_non_exhaustive()
    }
}

impl ArtifactRenderer {
    /// A renderer for the standard `jar(...)` template.
    ///
    /// # Errors
    ///
    /// [`PomError::Template`] if the template does not parse.
    pub fn new() -> Result<Self, PomError> {
        Self::with_template(JAR_TEMPLATE)
    }

    /// A renderer for a custom template over the same [`ArtifactRef`] context.
    pub fn with_template(template: &str) -> Result<Self, PomError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(JAR_TEMPLATE_NAME, template).map_err(|e| template_error(&e))?;
        Ok(Self {
            tera,
        })
    }

    /// Render one external artifact reference.
    pub fn render(&self, artifact: &ArtifactRef) -> Result<String, PomError> {
        let context = TeraContext::from_serialize(artifact).map_err(|e| template_error(&e))?;
        let rendered =
            self.tera.render(JAR_TEMPLATE_NAME, &context).map_err(|e| template_error(&e))?;
        tracing::trace!(
            target: "templating",
            "Rendered {}:{} as {}",
            artifact.org,
            artifact.name,
            rendered
        );
        Ok(rendered)
    }
}

/// `'<target>'`
pub fn local_reference(target: &str) -> String {
    format!("'{target}'")
}

/// `'<namespace>:<group>.<artifact>'`
pub fn third_party_reference(namespace: &str, coordinate: &Coordinate) -> String {
    format!("'{namespace}:{}'", coordinate.qualified())
}

/// Flatten a Tera error chain into one message.
fn template_error(error: &tera::Error) -> PomError {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(err) = source {
        messages.push(err.to_string());
        source = err.source();
    }
    PomError::Template {
        message: messages.join(": "),
    }
}
