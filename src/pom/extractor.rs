//! Extractor registry: several independent extractors over one parse pass.
//!
//! An extractor is a [`PomInfo`] type (the finished result) paired with an
//! [`InfoBuilder`] (the per-parse state machine). The [`ExtractorRegistry`] holds an
//! ordered list of registered info types; for each document it creates one fresh builder
//! per type and fans every element close out to them in registration order. Builders
//! see only the shared [`ParseView`] and never each other, so adding an extractor is a
//! new type plus one `register` call.
//!
//! # Example
//!
//! ```rust,no_run
//! use pom_bridge::pom::{ExtractorRegistry, InfoBuilder, ParseView, PomInfo};
//!
//! #[derive(Debug, Default)]
//! struct PackagingInfo {
//!     packaging: Option<String>,
//! }
//!
//! #[derive(Default)]
//! struct PackagingBuilder(PackagingInfo);
//!
//! impl InfoBuilder for PackagingBuilder {
//!     type Info = PackagingInfo;
//!
//!     fn end_element(&mut self, _name: &str, view: &ParseView<'_>) {
//!         if view.path_is(&["project", "packaging"]) {
//!             self.0.packaging = Some(view.text().to_string());
//!         }
//!     }
//!
//!     fn finish(self) -> PackagingInfo {
//!         self.0
//!     }
//! }
//!
//! impl PomInfo for PackagingInfo {
//!     const NAME: &'static str = "PackagingInfo";
//!     type Builder = PackagingBuilder;
//! }
//!
//! let registry = ExtractorRegistry::standard().with::<PackagingInfo>();
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::parser::{ElementVisitor, ParseView, parse_document};
use crate::core::PomError;

/// Per-document state machine producing one [`PomInfo`].
pub trait InfoBuilder: Default + Send + 'static {
    /// The result type this builder produces.
    type Info: PomInfo;

    /// Called on every element close, before the element is popped from the path.
    fn end_element(&mut self, name: &str, view: &ParseView<'_>);

    /// Consume the builder once the document has ended.
    fn finish(self) -> Self::Info;
}

/// A structured result extracted from a descriptor.
pub trait PomInfo: Any + Send + Sync + Sized {
    /// Human-readable name used in [`PomError::MissingInfo`].
    const NAME: &'static str;

    /// The builder that produces this info.
    type Builder: InfoBuilder<Info = Self>;
}

/// Object-safe face of an [`InfoBuilder`].
trait ErasedBuilder: Send {
    fn end_element(&mut self, name: &str, view: &ParseView<'_>);
    fn finish(self: Box<Self>) -> Arc<dyn Any + Send + Sync>;
}

struct Erased<B>(B);

impl<B: InfoBuilder> ErasedBuilder for Erased<B> {
    fn end_element(&mut self, name: &str, view: &ParseView<'_>) {
        self.0.end_element(name, view);
    }

    fn finish(self: Box<Self>) -> Arc<dyn Any + Send + Sync> {
        Arc::new(self.0.finish())
    }
}

#[derive(Clone, Copy)]
struct Registration {
    type_id: TypeId,
    name: &'static str,
    create: fn() -> Box<dyn ErasedBuilder>,
}

fn create_builder<T: PomInfo>() -> Box<dyn ErasedBuilder> {
    Box::new(Erased(T::Builder::default()))
}

/// Ordered list of extractor types run over every parsed descriptor.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    registrations: Vec<Registration>,
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.registrations.iter().map(|r| r.name)).finish()
    }
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every extractor the resolution engine relies on.
    pub fn standard() -> Self {
        Self::new()
            .with::<super::ProjectInfo>()
            .with::<super::DependencyListInfo>()
            .with::<super::DependencyManagementInfo>()
            .with::<super::ModuleListInfo>()
    }

    /// Register `T`, keeping the first registration if `T` is already present.
    pub fn register<T: PomInfo>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.registrations.iter().any(|r| r.type_id == type_id) {
            return;
        }
        self.registrations.push(Registration {
            type_id,
            name: T::NAME,
            create: create_builder::<T>,
        });
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<T: PomInfo>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Whether `T` is registered.
    pub fn contains<T: PomInfo>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.registrations.iter().any(|r| r.type_id == type_id)
    }

    /// Names of the registered extractors, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.registrations.iter().map(|r| r.name).collect()
    }

    /// Parse one document and run every registered extractor over it.
    pub fn extract(&self, source: &Path, content: &str) -> Result<ExtractionResults, PomError> {
        let mut fan_out = FanOut {
            builders: self.registrations.iter().map(|r| (r.create)()).collect(),
        };
        parse_document(source, content, &mut fan_out)?;

        let results = self
            .registrations
            .iter()
            .zip(fan_out.builders)
            .map(|(registration, builder)| (registration.type_id, builder.finish()))
            .collect();
        Ok(ExtractionResults { results })
    }
}

struct FanOut {
    builders: Vec<Box<dyn ErasedBuilder>>,
}

impl ElementVisitor for FanOut {
    fn end_element(&mut self, name: &str, view: &ParseView<'_>) {
        for builder in &mut self.builders {
            builder.end_element(name, view);
        }
    }
}

/// Finished results of one parse pass, keyed by info type.
#[derive(Clone, Default)]
pub struct ExtractionResults {
    results: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl std::fmt::Debug for ExtractionResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionResults").field("len", &self.results.len()).finish()
    }
}

impl ExtractionResults {
    /// The result for `T`, or [`PomError::MissingInfo`] if `T` was never registered.
    pub fn get<T: PomInfo>(&self) -> Result<Arc<T>, PomError> {
        self.results
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|info| info.downcast::<T>().ok())
            .ok_or_else(|| PomError::MissingInfo {
                info: T::NAME.to_string(),
            })
    }

    /// Number of extractor results held.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
