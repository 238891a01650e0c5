//! Local / third-party / external classification of coordinates.

use crate::config::PolicyConfig;

/// Where a dependency is expected to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyClass {
    /// Another module of this repository
    Local,
    /// A pre-declared alias in the third-party namespace
    ThirdParty,
    /// A fully versioned artifact
    External,
}

/// Answers exactly one [`DependencyClass`] for a qualified `group.artifact` id.
pub trait ClassificationPolicy: Send + Sync {
    fn classify(&self, qualified: &str) -> DependencyClass;
}

impl<F> ClassificationPolicy for F
where
    F: Fn(&str) -> DependencyClass + Send + Sync,
{
    fn classify(&self, qualified: &str) -> DependencyClass {
        self(qualified)
    }
}

/// Prefix-driven policy.
///
/// A coordinate listed in `third_party` (exactly, or under an entry ending in `.`) is
/// third-party. Otherwise one starting with any `local_prefixes` entry is local.
/// Everything else is external.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixPolicy {
    local_prefixes: Vec<String>,
    third_party: Vec<String>,
}

impl PrefixPolicy {
    pub fn new<L, T>(local_prefixes: L, third_party: T) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            local_prefixes: local_prefixes.into_iter().map(Into::into).collect(),
            third_party: third_party.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.local_prefixes.iter().cloned(), config.third_party.iter().cloned())
    }

    fn is_third_party(&self, qualified: &str) -> bool {
        self.third_party.iter().any(|entry| {
            entry == qualified || (entry.ends_with('.') && qualified.starts_with(entry.as_str()))
        })
    }
}

impl ClassificationPolicy for PrefixPolicy {
    fn classify(&self, qualified: &str) -> DependencyClass {
        if self.is_third_party(qualified) {
            DependencyClass::ThirdParty
        } else if self.local_prefixes.iter().any(|p| qualified.starts_with(p.as_str())) {
            DependencyClass::Local
        } else {
            DependencyClass::External
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_policy_order() {
        let policy =
            PrefixPolicy::new(["com.example."], ["com.example.vendored.", "org.slf4j.slf4j-api"]);

        assert_eq!(policy.classify("com.example.core"), DependencyClass::Local);
        assert_eq!(policy.classify("com.example.vendored.zlib"), DependencyClass::ThirdParty);
        assert_eq!(policy.classify("org.slf4j.slf4j-api"), DependencyClass::ThirdParty);
        assert_eq!(policy.classify("org.slf4j.slf4j-simple"), DependencyClass::External);
    }

    #[test]
    fn test_exact_third_party_entry_is_not_a_prefix() {
        let policy = PrefixPolicy::new(Vec::<String>::new(), ["org.slf4j"]);
        assert_eq!(policy.classify("org.slf4j"), DependencyClass::ThirdParty);
        assert_eq!(policy.classify("org.slf4j.api"), DependencyClass::External);
    }

    #[test]
    fn test_closure_policy() {
        let policy = |q: &str| {
            if q == "a.b" { DependencyClass::Local } else { DependencyClass::External }
        };
        assert_eq!(policy.classify("a.b"), DependencyClass::Local);
        assert_eq!(policy.classify("a.c"), DependencyClass::External);
    }

    #[test]
    fn test_from_config() {
        let config = PolicyConfig {
            local_prefixes: vec!["com.acme.".to_string()],
            third_party: vec!["io.netty.".to_string()],
        };
        let policy = PrefixPolicy::from_config(&config);
        assert_eq!(policy.classify("com.acme.web"), DependencyClass::Local);
        assert_eq!(policy.classify("io.netty.netty-all"), DependencyClass::ThirdParty);
    }
}
