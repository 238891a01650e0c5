//! One conversion run and the caches it owns.
//!
//! A [`Session`] builds its target catalog once, from the top-level aggregator
//! descriptor, then answers reference queries for any module. Every cache lives inside
//! the session. Starting over means opening a new one.
//!
//! ```rust,no_run
//! use pom_bridge::config::ConverterConfig;
//! use pom_bridge::models::DependencyScope;
//! use pom_bridge::session::Session;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ConverterConfig::load_or_default(Path::new("converter.toml"))?;
//! let session = Session::open(config)?;
//! for reference in session.references(Path::new("service"), DependencyScope::Library)? {
//!     println!("{reference}");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use tracing::info;

use crate::catalog::TargetCatalog;
use crate::classifier::{
    ClassificationPolicy, ModuleDependencies, PrefixPolicy, ReferenceBuilder, ReferenceOptions,
};
use crate::config::ConverterConfig;
use crate::core::PomError;
use crate::models::DependencyScope;
use crate::resolver::Resolver;
use crate::targets::TargetIndex;
use crate::templating::ArtifactRenderer;

pub struct Session {
    config: ConverterConfig,
    resolver: Resolver,
    targets: TargetIndex,
    catalog: TargetCatalog,
    policy: Box<dyn ClassificationPolicy>,
    renderer: ArtifactRenderer,
    options: ReferenceOptions,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session classifying with the config's [`PrefixPolicy`].
    ///
    /// # Errors
    ///
    /// Fails if the top descriptor or any listed module cannot be resolved.
    pub fn open(config: ConverterConfig) -> Result<Self, PomError> {
        let policy = PrefixPolicy::from_config(&config.policy);
        Self::with_policy(config, policy)
    }

    /// Open a session with a host-supplied classification policy.
    pub fn with_policy(
        config: ConverterConfig,
        policy: impl ClassificationPolicy + 'static,
    ) -> Result<Self, PomError> {
        let root = config.root_dir.clone();
        let resolver = Resolver::default();
        let catalog =
            TargetCatalog::from_top_pom(&resolver, &config.top_pom, Some(root.as_path()))?;
        info!(
            "Opened session at {} with {} catalogued targets",
            root.display(),
            catalog.len()
        );

        let targets = TargetIndex::new(&root)
            .with_external_protos_prefix(config.external_protos_prefix.clone());
        let options = ReferenceOptions {
            root: Some(root),
            third_party_namespace: config.third_party_namespace.clone(),
            exclude_project_targets: config.exclude_project_targets.iter().cloned().collect(),
        };

        Ok(Self {
            config,
            resolver,
            targets,
            catalog,
            policy: Box::new(policy),
            renderer: ArtifactRenderer::new()?,
            options,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.catalog
    }

    pub fn targets(&self) -> &TargetIndex {
        &self.targets
    }

    /// A reference builder over this session's caches.
    pub fn reference_builder(&self) -> ReferenceBuilder<'_> {
        ReferenceBuilder::new(
            &self.resolver,
            &self.catalog,
            &self.targets,
            &*self.policy,
            &self.renderer,
            &self.options,
        )
    }

    /// Identity, properties and partitioned dependencies of the module at `pom`.
    pub fn dependencies(&self, pom: &Path) -> Result<ModuleDependencies, PomError> {
        self.reference_builder().dependencies(pom)
    }

    /// Ordered references for the `scope` dependencies of the module at `pom`.
    pub fn references(&self, pom: &Path, scope: DependencyScope) -> Result<Vec<String>, PomError> {
        self.reference_builder().references(pom, scope)
    }
}
