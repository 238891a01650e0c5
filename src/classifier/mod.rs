//! Dependency classification and reference building.
//!
//! A [`ClassificationPolicy`] decides whether each coordinate is local, third-party or
//! external. The [`ReferenceBuilder`] then renders each group in turn. Local
//! dependencies map to the closest existing target of the providing module, following
//! [`LOCAL_TARGET_PRECEDENCE`].

pub mod policy;
pub mod references;


pub use policy::{ClassificationPolicy, DependencyClass, PrefixPolicy};
pub use references::{
    LOCAL_TARGET_PRECEDENCE, ModuleDependencies, Partition, ReferenceBuilder, ReferenceOptions,
    closest_match, partition,
};
