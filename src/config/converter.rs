//! Converter settings loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_EXTERNAL_PROTOS_PREFIX, DEFAULT_THIRD_PARTY_NAMESPACE, DESCRIPTOR_FILE_NAME,
};

/// Settings for one conversion run.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// root_dir = "/src/monorepo"
/// third_party_namespace = "3rdparty"
/// exclude_project_targets = ["legacy/bundle"]
///
/// [policy]
/// local_prefixes = ["com.example."]
/// third_party = ["com.google.guava.", "org.slf4j.slf4j-api"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// Repository root; resolution root and base of filesystem checks.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Aggregator descriptor whose `<modules>` seed the target catalog.
    #[serde(default = "default_top_pom")]
    pub top_pom: PathBuf,

    #[serde(default = "default_third_party_namespace")]
    pub third_party_namespace: String,

    /// Namespace of protocol sources that are generated later.
    #[serde(default = "default_external_protos_prefix")]
    pub external_protos_prefix: String,

    /// Project roots whose local references are dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_project_targets: Vec<String>,

    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Inputs of the default [`PrefixPolicy`](crate::classifier::PrefixPolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Qualified-id prefixes of repository modules
    #[serde(default)]
    pub local_prefixes: Vec<String>,
    /// Qualified ids (or prefixes ending in `.`) served from the alias namespace
    #[serde(default)]
    pub third_party: Vec<String>,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_top_pom() -> PathBuf {
    PathBuf::from(DESCRIPTOR_FILE_NAME)
}

fn default_third_party_namespace() -> String {
    DEFAULT_THIRD_PARTY_NAMESPACE.to_string()
}

fn default_external_protos_prefix() -> String {
    DEFAULT_EXTERNAL_PROTOS_PREFIX.to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            top_pom: default_top_pom(),
            third_party_namespace: default_third_party_namespace(),
            external_protos_prefix: default_external_protos_prefix(),
            exclude_project_targets: Vec::new(),
            policy: PolicyConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// Load from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or contains
    /// unknown keys.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read converter config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse converter config from {}", path.display()))
    }

    /// Load from `path` if it exists, else use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!("No converter config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
