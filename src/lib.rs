//! pom-bridge - Maven descriptors to build-graph references
//!
//! Reads the `pom.xml` files of a Maven-style repository and turns each module's
//! dependencies into the reference strings another build system expects: local
//! targets inside the repository, aliases into a third-party namespace, and fully
//! versioned external artifacts.
//!
//! # Architecture Overview
//!
//! Resolution runs leaf to root:
//!
//! - [`pom`] parses each descriptor once with a path-tracking XML reader and fans the
//!   element closes out to independent extractors.
//! - [`resolver`] follows `<parent>` links, merges inherited dependencies and
//!   properties, and substitutes `${name}` references.
//! - [`targets`] inspects the conventional source directories of a project root.
//! - [`catalog`] maps artifact ids to the modules that provide them.
//! - [`classifier`] sorts a module's dependencies into local, third-party and external
//!   groups and renders their references through [`templating`].
//! - [`session`] owns every cache for one run.
//!
//! # Supporting Modules
//!
//! - [`config`] - converter settings (`converter.toml`)
//! - [`core`] - the error type and user-facing error formatting
//! - [`models`] - coordinates, dependency records and descriptors
//! - [`constants`] - file names, namespaces and Maven vocabulary
//!
//! # Configuration
//!
//! ```toml
//! root_dir = "."
//! top_pom = "pom.xml"
//! third_party_namespace = "3rdparty"
//!
//! [policy]
//! local_prefixes = ["com.example."]
//! third_party = ["com.google.guava."]
//! ```
//!
//! # Output
//!
//! ```text
//! 'service/src/main/java:lib'
//! '3rdparty:com.google.guava.guava'
//! jar(org='junit', name='junit', rev='4.13.2')
//! ```

// Descriptor parsing and resolution
pub mod pom;
pub mod resolver;

// Target discovery and classification
pub mod catalog;
pub mod classifier;
pub mod targets;
pub mod templating;

// Supporting modules
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod session;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
