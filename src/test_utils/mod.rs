//! Test utilities for the resolution engine
//!
//! Helpers for building throwaway repository trees: a fluent [`PomBuilder`] for descriptor
//! XML and a [`ProjectFixture`] that lays descriptors and source directories out in a
//! temporary directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use pom_bridge::test_utils::{PomBuilder, ProjectFixture};
//!
//! let fixture = ProjectFixture::new().unwrap();
//! fixture
//!     .write_pom("service", &PomBuilder::new("com.example", "service").build())
//!     .unwrap();
//! fixture.add_source_file("service", "src/main/java", "App.java").unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{PomBuilder, ProjectFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a test subscriber once per process.
///
/// An explicit `level` applies to every target. Without one, `RUST_LOG` is used when
/// set and logging stays off otherwise. Engine targets are `pom::cache`, `resolver`,
/// `targets`, `catalog`, `classifier` and `templating`.
///
/// ```bash
/// RUST_LOG=resolver=trace,pom::cache=debug cargo test --test integration
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = match (level, EnvFilter::try_from_default_env()) {
            (Some(level), _) => EnvFilter::default().add_directive(level.into()),
            (None, Ok(from_env)) => from_env,
            (None, Err(_)) => return,
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
