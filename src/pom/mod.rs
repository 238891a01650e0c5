//! Descriptor parsing: the path-tracking reader, the extractor framework, and the
//! parse-once cache.
//!
//! Data flows leaf to root:
//!
//! 1. [`parser`] reads XML and reports each element close with the current path and
//!    the text gathered directly inside that element.
//! 2. [`extractor`] fans those closes out to independent [`InfoBuilder`]s, one per
//!    registered [`PomInfo`] type.
//! 3. [`cache`] runs the registry at most once per descriptor and keeps all results.
//!
//! [`infos`] holds the extractors the resolver needs. Plugin-specific extractors live
//! with their owners and plug in through [`ExtractorRegistry::register`].

pub mod cache;
pub mod extractor;
pub mod infos;
pub mod parser;

pub use cache::{CacheKey, ResolutionCache};
pub use extractor::{ExtractionResults, ExtractorRegistry, InfoBuilder, PomInfo};
pub use infos::{DependencyListInfo, DependencyManagementInfo, ModuleListInfo, ProjectInfo};
pub use parser::{ElementVisitor, ParseView, parse_document};
