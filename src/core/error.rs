//! Error handling for descriptor resolution
//!
//! The resolution engine distinguishes three fatal conditions and one tolerated one:
//!
//! - [`PomError::MalformedDocument`] - XML syntax error in a descriptor. Aborts resolution of
//!   the file and of everything inheriting from it.
//! - [`PomError::MissingInfo`] - an extractor result was requested that the registry never
//!   produced. This is a programming or configuration error.
//! - [`PomError::MissingVersion`] - an external dependency lacks the version required to
//!   build a fully-versioned reference.
//! - A missing descriptor file is *not* an error. The cache reports it as `Ok(None)` and
//!   the resolver turns it into an empty [`Descriptor`](crate::models::Descriptor).
//!
//! [`ErrorContext`] and [`user_friendly_error`] wrap these for terminal display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pom_bridge::core::{PomError, user_friendly_error};
//!
//! let error = PomError::MissingVersion {
//!     artifact_id: "guava".to_string(),
//!     group_id: "com.google.guava".to_string(),
//!     pom_file: "service/pom.xml".into(),
//! };
//! user_friendly_error(error.into()).display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for descriptor resolution and reference building.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PomError {
    /// A descriptor is not well-formed XML.
    ///
    /// `excerpt` holds up to three source lines around the reported position with a caret
    /// under the offending column. It is omitted when it could not be built.
    #[error(
        "Malformatted pom.xml {}:\n{diagnostic}{}",
        path.display(),
        format_excerpt(excerpt.as_deref())
    )]
    MalformedDocument {
        /// Descriptor path as it was requested
        path: PathBuf,
        /// Diagnostic reported by the XML reader
        diagnostic: String,
        /// Best-effort source excerpt
        excerpt: Option<String>,
    },

    /// An extractor result was requested but the registry has no such extractor.
    #[error("Extractor registry has no {info}")]
    MissingInfo {
        /// Name of the requested info type
        info: String,
    },

    /// An external dependency has no version.
    #[error(
        "Expected artifact {artifact_id} group {group_id} in pom {} to have a version.",
        pom_file.display()
    )]
    MissingVersion {
        /// Artifact id of the offending dependency
        artifact_id: String,
        /// Group id of the offending dependency
        group_id: String,
        /// Descriptor the references were being built for
        pom_file: PathBuf,
    },

    /// A parent chain refers back to a descriptor that is still being resolved.
    #[error("Cyclic parent inheritance: {}", format_chain(chain))]
    CyclicInheritance {
        /// Descriptor paths from the first repeated entry back to itself
        chain: Vec<PathBuf>,
    },

    /// Rendering an external reference failed.
    #[error("Failed to render artifact reference: {message}")]
    Template {
        /// Renderer diagnostic
        message: String,
    },

    /// Any other failure, such as reading or parsing the converter config.
    #[error("{message}")]
    Other {
        /// Full error chain
        message: String,
    },
}

fn format_excerpt(excerpt: Option<&str>) -> String {
    excerpt.map(|e| format!("\n{e}")).unwrap_or_default()
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" → ")
}

impl PomError {
    /// Build a [`PomError::MalformedDocument`] for a reader failure at byte `offset` of `content`.
    ///
    /// Excerpt construction never fails: if the offset cannot be mapped to a line, the
    /// excerpt is simply left out.
    pub fn malformed(
        path: impl Into<PathBuf>,
        diagnostic: impl fmt::Display,
        content: &str,
        offset: Option<usize>,
    ) -> Self {
        let excerpt = offset.and_then(|offset| {
            let (line, column) = line_and_column(content, offset)?;
            source_excerpt(content, line, column)
        });
        Self::MalformedDocument {
            path: path.into(),
            diagnostic: diagnostic.to_string(),
            excerpt,
        }
    }
}

/// Map a byte offset to a zero-based line and zero-based character column.
fn line_and_column(content: &str, offset: usize) -> Option<(usize, usize)> {
    let prefix = content.get(..offset)?;
    let line = prefix.matches('\n').count();
    let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
    let column = prefix.get(line_start..)?.chars().count();
    Some((line, column))
}

/// Three lines centered on `line`, with a caret line under `column`.
fn source_excerpt(content: &str, line: usize, column: usize) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let error_line = lines.get(line)?;

    let mut excerpt = String::new();
    if let Some(prev) = line.checked_sub(1).and_then(|i| lines.get(i)) {
        excerpt.push_str(prev);
        excerpt.push('\n');
    }
    excerpt.push_str(error_line);
    excerpt.push('\n');
    excerpt.push_str(&" ".repeat(column));
    excerpt.push('^');
    if let Some(next) = lines.get(line + 1) {
        excerpt.push('\n');
        excerpt.push_str(next);
    }
    Some(excerpt)
}

/// A [`PomError`] with an optional suggestion and details for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PomError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PomError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions where the cause is known.
///
/// Errors that are not a [`PomError`] become [`PomError::Other`] carrying the full error chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pom_error) = error.downcast_ref::<PomError>() {
        return create_error_context(pom_error.clone());
    }

    ErrorContext::new(PomError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: PomError) -> ErrorContext {
    match &error {
        PomError::MalformedDocument { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the XML syntax near the marked position")
            .with_details("Every module inheriting from this pom.xml fails until it parses"),
        PomError::MissingInfo { .. } => ErrorContext::new(error)
            .with_suggestion("Register the info type with the ExtractorRegistry before resolving")
            .with_details("Extractor results only exist for types registered before the parse"),
        PomError::MissingVersion { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Declare a <version> for the dependency or mark its group as local or third-party",
            )
            .with_details("External dependencies are referenced by fully versioned coordinates"),
        PomError::CyclicInheritance { .. } => ErrorContext::new(error)
            .with_suggestion("Check the <parent><relativePath> entries along the chain"),
        PomError::Template { .. } | PomError::Other { .. } => ErrorContext::new(error),
    }
}
