//! Rendering of build-file references.
//!
//! See [`renderer::ArtifactRenderer`] for the external `jar(...)` form.

pub mod renderer;

pub use renderer::{
    ArtifactRef, ArtifactRenderer, ExcludeRef, JAR_TEMPLATE, local_reference,
    third_party_reference,
};
