//! Configuration for a conversion run.
//!
//! Settings live in a TOML file read with `serde`. Unknown keys are rejected so a
//! misspelt option fails loudly instead of silently taking its default.

pub mod converter;

pub use converter::{ConverterConfig, PolicyConfig};
